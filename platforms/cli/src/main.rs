use clap::Parser;
use hanoi::loader::PuzzleLoader;
use hanoi::simulator::Simulator;
use hanoi::solver;
use hanoi::types::{Halt, Puzzle, Step, DEFAULT_MOVE_DELAY_MS, PRACTICAL_DISK_LIMIT};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::exit;
use std::time::Duration;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Number of disks to solve for
    #[clap(short = 'n', long)]
    disks: Option<String>,

    /// A .hanoi puzzle file to run instead of a generated solution
    #[clap(short, long, conflicts_with = "disks")]
    puzzle: Option<String>,

    /// Delay between moves in milliseconds
    #[clap(short, long, default_value_t = DEFAULT_MOVE_DELAY_MS)]
    delay: u64,

    /// Print the full move list without simulating
    #[clap(long)]
    print_moves: bool,

    /// Skip the confirmation prompt for large disk counts
    #[clap(short, long)]
    yes: bool,
}

fn main() {
    let cli = Cli::parse();

    let puzzle = match resolve_puzzle(&cli) {
        Ok(puzzle) => puzzle,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if cli.print_moves {
        for (i, mov) in puzzle.moves.iter().enumerate() {
            println!("Move {}/{}: {}", i + 1, puzzle.move_count(), mov);
        }
        return;
    }

    println!(
        "Solving Tower of Hanoi with {} disks ({} moves).",
        puzzle.disks,
        puzzle.move_count()
    );

    if atty::is(atty::Stream::Stdin) {
        print!("Press Enter to start...");
        io::stdout().flush().ok();
        io::stdin().lock().lines().next();
    }

    let mut simulator = Simulator::new(puzzle);
    let delay = Duration::from_millis(cli.delay);
    let halt = simulator.run_paced(delay, |step| {
        if let Step::Applied(applied) = step {
            println!(
                "Move {}/{}: {} -> {} (disk {})",
                applied.index, applied.total, applied.from, applied.to, applied.disk
            );
        }
    });

    match halt {
        Halt::Finished => println!("Simulation finished!"),
        Halt::Err(fault) => {
            eprintln!("Simulation halted: {}", fault);
            exit(1);
        }
    }
}

fn resolve_puzzle(cli: &Cli) -> Result<Puzzle, String> {
    if let Some(path) = &cli.puzzle {
        return PuzzleLoader::load_puzzle(Path::new(path)).map_err(|e| e.to_string());
    }

    let disks = match &cli.disks {
        Some(raw) => solver::parse_disk_count(raw).map_err(|e| e.to_string())?,
        None => prompt_disk_count()?,
    };

    if disks > PRACTICAL_DISK_LIMIT && !cli.yes {
        println!(
            "Warning: solving for more than {} disks takes {} moves.",
            PRACTICAL_DISK_LIMIT,
            solver::minimum_moves(disks)
        );
        if !confirm("Continue anyway? (y/n) ")? {
            return Err("aborted".to_string());
        }
    }

    Ok(Puzzle::solved(format!("{} disks", disks), disks))
}

/// Reads a disk count from stdin, re-prompting until the input parses.
fn prompt_disk_count() -> Result<u32, String> {
    if !atty::is(atty::Stream::Stdin) {
        return Err("no disk count given and stdin is not a terminal".to_string());
    }

    let stdin = io::stdin();
    loop {
        print!("Enter the number of disks: ");
        io::stdout().flush().ok();

        let mut line = String::new();
        let read = stdin
            .lock()
            .read_line(&mut line)
            .map_err(|e| e.to_string())?;
        if read == 0 {
            return Err("No input provided. Exiting.".to_string());
        }

        match solver::parse_disk_count(line.trim()) {
            Ok(disks) => return Ok(disks),
            Err(e) => println!("{}", e),
        }
    }
}

fn confirm(prompt: &str) -> Result<bool, String> {
    print!("{}", prompt);
    io::stdout().flush().ok();

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(|e| e.to_string())?;
    Ok(line.trim().eq_ignore_ascii_case("y"))
}
