use crate::types::{HanoiError, Puzzle};

use std::sync::RwLock;

// Default embedded puzzles
const PUZZLE_TEXTS: [&str; 6] = [
    include_str!("../presets/single-disk.hanoi"),
    include_str!("../presets/twin-disks.hanoi"),
    include_str!("../presets/classic-three.hanoi"),
    include_str!("../presets/scenic-route.hanoi"),
    include_str!("../presets/four-disks.hanoi"),
    include_str!("../presets/towering-six.hanoi"),
];

lazy_static::lazy_static! {
    pub static ref PUZZLES: RwLock<Vec<Puzzle>> = RwLock::new(Vec::new());
}

pub struct PuzzleManager;

impl PuzzleManager {
    /// Initialize the PuzzleManager with the embedded preset puzzles
    pub fn load() -> Result<(), HanoiError> {
        let mut puzzles = Vec::new();

        for puzzle_text in PUZZLE_TEXTS {
            if let Ok(puzzle) = crate::parser::parse(puzzle_text) {
                puzzles.push(puzzle);
            } else {
                eprintln!("Failed to parse preset puzzle");
            }
        }

        if let Ok(mut write_guard) = PUZZLES.write() {
            *write_guard = puzzles;
        } else {
            return Err(HanoiError::FileError(
                "Failed to acquire write lock".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the number of available puzzles
    pub fn count() -> usize {
        // Initialize with preset puzzles if not already initialized
        let _ = Self::load();

        PUZZLES.read().map(|puzzles| puzzles.len()).unwrap_or(0)
    }

    /// Get a puzzle by its index
    pub fn get_puzzle_by_index(index: usize) -> Result<Puzzle, HanoiError> {
        // Initialize with preset puzzles if not already initialized
        let _ = Self::load();

        PUZZLES
            .read()
            .map_err(|_| HanoiError::FileError("Failed to acquire read lock".to_string()))?
            .get(index)
            .cloned()
            .ok_or_else(|| {
                HanoiError::ValidationError(format!("Puzzle index {} out of range", index))
            })
    }

    /// Get a puzzle by its name
    pub fn get_puzzle_by_name(name: &str) -> Result<Puzzle, HanoiError> {
        // Initialize with preset puzzles if not already initialized
        let _ = Self::load();

        PUZZLES
            .read()
            .map_err(|_| HanoiError::FileError("Failed to acquire read lock".to_string()))?
            .iter()
            .find(|puzzle| puzzle.name == name)
            .cloned()
            .ok_or_else(|| HanoiError::ValidationError(format!("Puzzle '{}' not found", name)))
    }

    /// List all puzzle names
    pub fn list_puzzle_names() -> Vec<String> {
        // Initialize with preset puzzles if not already initialized
        let _ = Self::load();

        PUZZLES
            .read()
            .map(|puzzles| puzzles.iter().map(|puzzle| puzzle.name.clone()).collect())
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get information about a puzzle by its index
    pub fn get_puzzle_info(index: usize) -> Result<PuzzleInfo, HanoiError> {
        let puzzle = Self::get_puzzle_by_index(index)?;

        Ok(PuzzleInfo {
            index,
            name: puzzle.name.clone(),
            disks: puzzle.disks,
            move_count: puzzle.move_count(),
            minimal: puzzle.is_minimal(),
        })
    }

    /// Search for puzzles by name
    pub fn search_puzzles(query: &str) -> Vec<usize> {
        // Initialize with preset puzzles if not already initialized
        let _ = Self::load();

        PUZZLES
            .read()
            .map(|puzzles| {
                puzzles
                    .iter()
                    .enumerate()
                    .filter(|(_, puzzle)| {
                        puzzle.name.to_lowercase().contains(&query.to_lowercase())
                    })
                    .map(|(index, _)| index)
                    .collect()
            })
            .unwrap_or_else(|_| Vec::new())
    }

    /// Get the original text of a puzzle by its index
    pub fn get_puzzle_text_by_index(index: usize) -> Result<&'static str, HanoiError> {
        PUZZLE_TEXTS.get(index).cloned().ok_or_else(|| {
            HanoiError::ValidationError(format!("Puzzle text index {} out of range", index))
        })
    }
}

#[derive(Debug, Clone)]
pub struct PuzzleInfo {
    pub index: usize,
    pub name: String,
    pub disks: u32,
    pub move_count: usize,
    pub minimal: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::check_solution;
    use crate::simulator::Simulator;
    use crate::types::Halt;

    #[test]
    fn test_puzzle_manager_initialization() {
        let result = PuzzleManager::load();
        assert!(result.is_ok());

        assert_eq!(PuzzleManager::count(), PUZZLE_TEXTS.len());
    }

    #[test]
    fn test_all_presets_solve_their_puzzle() {
        let _ = PuzzleManager::load();

        for i in 0..PuzzleManager::count() {
            let puzzle = PuzzleManager::get_puzzle_by_index(i).unwrap();
            assert!(
                check_solution(&puzzle).is_ok(),
                "Preset '{}' does not solve its puzzle",
                puzzle.name
            );
        }
    }

    #[test]
    fn test_all_presets_run_to_completion() {
        let _ = PuzzleManager::load();

        for i in 0..PuzzleManager::count() {
            let puzzle = PuzzleManager::get_puzzle_by_index(i).unwrap();
            let name = puzzle.name.clone();
            let mut sim = Simulator::new(puzzle);

            let halt = sim.run(|_| {});
            assert_eq!(halt, Halt::Finished, "Preset '{}' halted early", name);
        }
    }

    #[test]
    fn test_puzzle_names() {
        let _ = PuzzleManager::load();

        let names = PuzzleManager::list_puzzle_names();
        assert!(names.contains(&"Single Disk".to_string()));
        assert!(names.contains(&"Classic Three".to_string()));
        assert!(names.contains(&"Scenic Route".to_string()));
        assert!(names.contains(&"Towering Six".to_string()));
    }

    #[test]
    fn test_get_puzzle_by_index() {
        let puzzle = PuzzleManager::get_puzzle_by_index(0);
        assert!(puzzle.is_ok());

        let result = PuzzleManager::get_puzzle_by_index(999);
        assert!(result.is_err());
    }

    #[test]
    fn test_get_puzzle_by_name() {
        let puzzle = PuzzleManager::get_puzzle_by_name("Classic Three");
        assert!(puzzle.is_ok());

        let puzzle = puzzle.unwrap();
        assert_eq!(puzzle.disks, 3);
        assert_eq!(puzzle.move_count(), 7);
        assert!(puzzle.is_minimal());

        let result = PuzzleManager::get_puzzle_by_name("Nonexistent");
        assert!(result.is_err());
    }

    #[test]
    fn test_get_puzzle_info() {
        let info = PuzzleManager::get_puzzle_info(3);
        assert!(info.is_ok());

        let info = info.unwrap();
        assert_eq!(info.index, 3);
        assert_eq!(info.name, "Scenic Route");
        assert_eq!(info.disks, 2);
        assert_eq!(info.move_count, 5);
        assert!(!info.minimal);
    }

    #[test]
    fn test_search_puzzles() {
        let results = PuzzleManager::search_puzzles("disk");
        assert!(results.len() >= 3); // "Single Disk", "Twin Disks", "Four Disks"

        let results = PuzzleManager::search_puzzles("scenic");
        assert_eq!(results.len(), 1);

        let results = PuzzleManager::search_puzzles("nonexistent");
        assert_eq!(results.len(), 0);
    }

    #[test]
    fn test_get_puzzle_text_by_index() {
        let text = PuzzleManager::get_puzzle_text_by_index(2);
        assert!(text.is_ok());
        assert!(text.unwrap().contains("name: Classic Three"));

        let result = PuzzleManager::get_puzzle_text_by_index(999);
        assert!(result.is_err());
    }
}
