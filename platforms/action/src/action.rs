use keymap::KeyMap;

#[derive(KeyMap, Clone, Copy, Debug, PartialEq)]
pub enum Action {
    /// Quit the application
    #[key("q")]
    Quit,
    /// Reset the simulation to its initial state
    #[key("r")]
    Reset,
    /// Start the run, or advance it by one move
    #[key("space")]
    Step,
    /// Toggle auto-play
    #[key("p")]
    ToggleAutoPlay,
    /// Toggle help display
    #[key("h")]
    ToggleHelp,
    /// Load the previous preset puzzle
    #[key("left")]
    PreviousPuzzle,
    /// Load the next preset puzzle
    #[key("right")]
    NextPuzzle,
}
