use action::Action;
use hanoi::{parse, Halt, Phase, PuzzleManager, Simulator, Step};
use keymap::{Config, KeyMapConfig};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap},
    Frame,
};

const BLOCK_PADDING: Padding = Padding::new(1, 1, 0, 0);

/// Disk colors, cycled by size so towers stay readable past eleven disks.
const DISK_COLORS: [Color; 11] = [
    Color::Red,
    Color::LightRed,
    Color::Yellow,
    Color::LightYellow,
    Color::Green,
    Color::LightGreen,
    Color::Cyan,
    Color::LightCyan,
    Color::Blue,
    Color::LightBlue,
    Color::Magenta,
];

pub struct App {
    simulator: Simulator,
    current_puzzle_index: usize,
    auto_play: bool,
    message: String,
    show_help: bool,
    pub(crate) keymap: Config<Action>,
    // Indicates if the puzzle was loaded from a file/stdin, disabling puzzle switching
    puzzle_loaded_from_source: bool,
    puzzle_content: String,
}

impl App {
    pub fn new_default() -> Self {
        let puzzle = PuzzleManager::get_puzzle_by_index(0).unwrap();
        let puzzle_content = PuzzleManager::get_puzzle_text_by_index(0)
            .unwrap()
            .to_string();
        let simulator = Simulator::new(puzzle);

        Self {
            simulator,
            keymap: Action::keymap_config(),
            current_puzzle_index: 0,
            auto_play: false,
            message: "Press 'h' for help.".to_string(),
            show_help: false,
            puzzle_loaded_from_source: false,
            puzzle_content,
        }
    }

    pub fn new_from_puzzle_string(puzzle_content: String) -> Result<Self, String> {
        let puzzle =
            parse(&puzzle_content).map_err(|e| format!("Failed to load puzzle: {}", e))?;
        let simulator = Simulator::new(puzzle);

        Ok(Self {
            simulator,
            keymap: Action::keymap_config(),
            current_puzzle_index: 0, // Not relevant for a single puzzle, but keep for consistency
            auto_play: false,
            message: "Puzzle loaded from source. Press 'h' for help.".to_string(),
            show_help: false,
            puzzle_loaded_from_source: true,
            puzzle_content,
        })
    }

    pub fn render(&mut self, f: &mut Frame) {
        let margin_size = Margin::new(1, 0);
        let inner_area = f.area().inner(margin_size);

        // Main vertical chunks: Puzzle Info, Middle (Source + Simulation), Status
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(5), // Puzzle info (fixed height + margin)
                Constraint::Min(0),    // Middle section (flexible height)
                Constraint::Length(3), // Status/controls (fixed height + margin)
            ])
            .split(inner_area);

        self.render_puzzle_info(f, main_chunks[0]);

        // Middle horizontal chunks: Puzzle Source (left), Simulation (right)
        let middle_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(40), // Puzzle source
                Constraint::Length(1),
                Constraint::Percentage(60), // Simulation
            ])
            .split(main_chunks[1]);

        self.render_source(f, middle_chunks[0]);

        // Right vertical chunks: Simulation State, Pegs/Help
        let right_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Simulation state
                Constraint::Min(0),    // Pegs
            ])
            .split(middle_chunks[2]);

        self.render_simulation_state(f, right_chunks[0]);

        if self.show_help {
            self.render_help(f, right_chunks[1]);
        } else {
            self.render_pegs(f, right_chunks[1]);
        }

        self.render_status(f, main_chunks[2]);
    }

    fn render_source(&self, f: &mut Frame, area: Rect) {
        let keywords = ["name:", "disks:", "moves:"];

        let mut lines = Vec::new();
        for line in self.puzzle_content.lines() {
            let mut spans = Vec::new();
            let mut parts = line.split_whitespace();
            if let Some(first_word) = parts.next() {
                if keywords.contains(&first_word) {
                    spans.push(Span::styled(first_word, Style::default().fg(Color::Yellow)));
                    spans.push(Span::raw(" "));
                    spans.push(Span::raw(parts.collect::<Vec<_>>().join(" ")));
                } else {
                    spans.push(Span::raw(line));
                }
            } else {
                spans.push(Span::raw(line));
            }
            lines.push(Line::from(spans));
        }

        let paragraph = section("Puzzle Source", lines).wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_puzzle_info(&self, f: &mut Frame, area: Rect) {
        let puzzle = self.simulator.puzzle();

        let text = vec![
            Line::from(vec![
                Span::styled("Puzzle: ", Style::default().fg(Color::Yellow)),
                Span::raw(if self.puzzle_loaded_from_source {
                    format!("{} (Custom)", puzzle.name)
                } else {
                    format!(
                        "{} ({}/{})",
                        puzzle.name,
                        self.current_puzzle_index + 1,
                        PuzzleManager::count()
                    )
                }),
            ]),
            Line::from(vec![
                Span::styled("Disks: ", Style::default().fg(Color::Yellow)),
                Span::raw(puzzle.disks.to_string()),
                Span::styled(" | Moves: ", Style::default().fg(Color::Yellow)),
                Span::raw(puzzle.move_count().to_string()),
                Span::styled(" | Sequence: ", Style::default().fg(Color::Yellow)),
                Span::raw(if puzzle.is_minimal() {
                    "minimal"
                } else {
                    "non-minimal"
                }),
            ]),
        ];

        let paragraph = Paragraph::new(text)
            .block(block("Hanoi - Tower of Hanoi Simulator (TUI)").title_alignment(Alignment::Center));

        f.render_widget(paragraph, area);
    }

    fn render_pegs(&self, f: &mut Frame, area: Rect) {
        let pegs = self.simulator.pegs();
        let disks = pegs.disks().max(1) as usize;
        // Column width fits the widest disk plus one space either side.
        let field = 2 * disks + 3;

        let mut lines = Vec::new();

        for level in (0..disks).rev() {
            let mut spans = Vec::new();
            for peg in 0..3 {
                match pegs.peg(peg).get(level) {
                    Some(&disk) => {
                        let width = 2 * disk as usize + 1;
                        let pad = (field - width) / 2;
                        spans.push(Span::raw(" ".repeat(pad)));
                        spans.push(Span::styled(
                            " ".repeat(width),
                            Style::default().bg(disk_color(disk)),
                        ));
                        spans.push(Span::raw(" ".repeat(field - pad - width)));
                    }
                    None => {
                        let pad = field / 2;
                        spans.push(Span::raw(" ".repeat(pad)));
                        spans.push(Span::styled("│", Style::default().fg(Color::DarkGray)));
                        spans.push(Span::raw(" ".repeat(field - pad - 1)));
                    }
                }
            }
            lines.push(Line::from(spans));
        }

        lines.push(Line::from(Span::styled(
            "─".repeat(field * 3),
            Style::default().fg(Color::DarkGray),
        )));

        let mut label_spans = Vec::new();
        for peg in 1..=3u8 {
            let pad = field / 2;
            label_spans.push(Span::raw(" ".repeat(pad)));
            label_spans.push(Span::styled(
                peg.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
            label_spans.push(Span::raw(" ".repeat(field - pad - 1)));
        }
        lines.push(Line::from(label_spans));

        let paragraph = section("Pegs", lines);
        f.render_widget(paragraph, area);
    }

    fn render_simulation_state(&self, f: &mut Frame, area: Rect) {
        let (status_text, status_color) = match self.simulator.phase() {
            Phase::AwaitingStart => ("READY", Color::Blue),
            Phase::Running => ("RUNNING", Color::Green),
            Phase::Finished => ("FINISHED", Color::Green),
            Phase::HaltedOnError => ("HALTED", Color::Red),
        };

        let mut text = vec![Line::from(vec![
            Span::styled("Status: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                status_text,
                Style::default()
                    .fg(status_color)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" | Moves applied: ", Style::default().fg(Color::Yellow)),
            Span::raw(format!(
                "{}/{}",
                self.simulator.moves_applied(),
                self.simulator.total_moves()
            )),
        ])];

        if let Some(fault) = self.simulator.fault() {
            text.push(Line::from(vec![
                Span::styled("Fault: ", Style::default().fg(Color::Red)),
                Span::raw(fault.to_string()),
            ]));
        }

        let paragraph = section("Simulation State", text);
        f.render_widget(paragraph, area);
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let help_text = vec![
            Line::from("Controls:"),
            Line::from("  Space - Start the run / apply the next move"),
            Line::from("  r - Reset the simulation"),
            Line::from("  p - Toggle auto-play"),
            Line::from(if self.puzzle_loaded_from_source {
                "  ← → - Puzzle switching disabled (loaded from file/stdin)"
            } else {
                "  ← → - Switch puzzles"
            }),
            Line::from("  h - Toggle this help"),
            Line::from("  q - Quit"),
            Line::from(""),
            Line::from("Each disk is drawn as a colored bar, widest at the bottom."),
            Line::from("A run halts on the first invalid move and reports the rule it broke."),
        ];

        let paragraph = section("Help", help_text);
        f.render_widget(paragraph, area);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        let outer = block("Status");
        let inner = outer.inner(area);
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(12)])
            .split(inner);

        let auto_play_status = if self.auto_play { "ON" } else { "OFF" };
        let status = Line::from(vec![
            Span::raw("Auto-play: "),
            Span::styled(auto_play_status, Style::default().fg(Color::Yellow)),
            Span::raw(format!(" | {}", self.message)),
        ]);

        let hint = Text::from(
            Line::from(Span::styled("q to quit", Style::default().fg(Color::Yellow)))
                .right_aligned(),
        );

        f.render_widget(outer, area);
        f.render_widget(status, chunks[0]);
        f.render_widget(hint, chunks[1]);
    }

    /// Sends the start signal on the first press, then applies one move per
    /// press until the run halts.
    pub fn step_simulation(&mut self) {
        if self.simulator.phase() == Phase::AwaitingStart {
            self.simulator.start();
        }

        match self.simulator.step() {
            Step::Pending => {
                self.message = "Press space to start.".to_string();
            }
            Step::Applied(applied) => {
                self.message = format!(
                    "Move {}/{}: {} -> {} (disk {})",
                    applied.index, applied.total, applied.from, applied.to, applied.disk
                );
            }
            Step::Halt(Halt::Finished) => {
                self.message = "Simulation finished! Press 'r' to reset.".to_string();
                self.auto_play = false;
            }
            Step::Halt(Halt::Err(fault)) => {
                self.message = format!("Halted: {}. Press 'r' to reset.", fault);
                self.auto_play = false;
            }
        }
    }

    pub fn reset_simulation(&mut self) {
        self.simulator.reset();
        self.message = "Simulation reset".to_string();
        self.auto_play = false;
    }

    pub fn toggle_auto_play(&mut self) {
        self.auto_play = !self.auto_play;
        self.message = format!(
            "Auto-play {}",
            if self.auto_play {
                "enabled"
            } else {
                "disabled"
            }
        );
    }

    pub fn is_auto_playing(&self) -> bool {
        self.auto_play && !self.simulator.is_halted()
    }

    pub fn next_puzzle(&mut self) {
        if self.puzzle_loaded_from_source {
            self.message = "Cannot switch puzzles when loaded from file/stdin.".to_string();
            return;
        }
        let count = PuzzleManager::count();
        self.current_puzzle_index = (self.current_puzzle_index + 1) % count;
        self.load_current_puzzle();
    }

    pub fn previous_puzzle(&mut self) {
        if self.puzzle_loaded_from_source {
            self.message = "Cannot switch puzzles when loaded from file/stdin.".to_string();
            return;
        }
        let count = PuzzleManager::count();
        self.current_puzzle_index = if self.current_puzzle_index == 0 {
            count - 1
        } else {
            self.current_puzzle_index - 1
        };
        self.load_current_puzzle();
    }

    fn load_current_puzzle(&mut self) {
        let puzzle = PuzzleManager::get_puzzle_by_index(self.current_puzzle_index).unwrap();
        self.puzzle_content = PuzzleManager::get_puzzle_text_by_index(self.current_puzzle_index)
            .unwrap()
            .to_string();
        let puzzle_name = puzzle.name.clone();
        let disks = puzzle.disks;
        self.simulator = Simulator::new(puzzle);
        self.auto_play = false;

        self.message = format!("Loaded {}-disk puzzle: {}", disks, puzzle_name);
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }
}

fn disk_color(disk: hanoi::Disk) -> Color {
    DISK_COLORS[(disk as usize - 1) % DISK_COLORS.len()]
}

fn section<'a>(title: &'a str, content: Vec<Line<'a>>) -> Paragraph<'a> {
    Paragraph::new(content).block(block(title))
}

fn block(title: &str) -> Block {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {title} "))
        .padding(BLOCK_PADDING)
}
