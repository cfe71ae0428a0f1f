//! This module provides the `PuzzleLoader` struct, responsible for loading
//! puzzle definitions from various sources, including files and strings.

use crate::parser::parse;
use crate::types::{HanoiError, Puzzle};
use std::fs;
use std::path::{Path, PathBuf};

/// `PuzzleLoader` is a utility struct for loading puzzle definitions.
/// It provides methods to load puzzles from individual files, from string
/// content, and to discover and load all `.hanoi` files within a directory.
pub struct PuzzleLoader;

impl PuzzleLoader {
    /// Loads a single puzzle from the specified file path.
    ///
    /// # Arguments
    ///
    /// * `path` - A reference to the `Path` of the `.hanoi` file to load.
    ///
    /// # Returns
    ///
    /// * `Ok(Puzzle)` if the file is successfully read and parsed.
    /// * `Err(HanoiError::FileError)` if the file cannot be read.
    /// * `Err(HanoiError::ParseError)` if the file content is not a valid puzzle.
    pub fn load_puzzle(path: &Path) -> Result<Puzzle, HanoiError> {
        let content = fs::read_to_string(path).map_err(|e| {
            HanoiError::FileError(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a single puzzle from the provided string content.
    ///
    /// This is useful for puzzles that are not stored in files, e.g., piped
    /// via stdin.
    ///
    /// # Arguments
    ///
    /// * `content` - A string slice containing the puzzle definition.
    ///
    /// # Returns
    ///
    /// * `Ok(Puzzle)` if the content is successfully parsed.
    /// * `Err(HanoiError::ParseError)` if the content is not a valid puzzle.
    pub fn load_puzzle_from_string(content: &str) -> Result<Puzzle, HanoiError> {
        parse(content)
    }

    /// Loads all valid puzzle files (`.hanoi` extension) from a given directory.
    ///
    /// It iterates through the directory, attempts to load each `.hanoi` file,
    /// and collects the results. Directories and other files are skipped.
    ///
    /// # Arguments
    ///
    /// * `directory` - A reference to the `Path` of the directory to scan.
    ///
    /// # Returns
    ///
    /// * `Vec<Result<(PathBuf, Puzzle), HanoiError>>` - A vector where each
    ///   element is a `Result` indicating whether a puzzle was successfully
    ///   loaded (containing its path and the `Puzzle` itself) or if an error
    ///   occurred during loading.
    pub fn load_puzzles(directory: &Path) -> Vec<Result<(PathBuf, Puzzle), HanoiError>> {
        if !directory.exists() {
            return vec![Err(HanoiError::FileError(format!(
                "Directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(HanoiError::FileError(format!(
                    "Failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(HanoiError::FileError(format!(
                            "Failed to read directory entry: {}",
                            e
                        ))))
                    }
                };

                let path = entry.path();

                // Skip directories and non-.hanoi files
                if path.is_dir() || path.extension().is_none_or(|ext| ext != "hanoi") {
                    return None;
                }

                match Self::load_puzzle(&path) {
                    Ok(puzzle) => Some(Ok((path, puzzle))),
                    Err(e) => Some(Err(HanoiError::FileError(format!(
                        "Failed to load puzzle from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_load_valid_puzzle() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("test.hanoi");

        let puzzle_content = "name: Test Puzzle\ndisks: 2";

        let mut file = File::create(&file_path).unwrap();
        file.write_all(puzzle_content.as_bytes()).unwrap();

        let result = PuzzleLoader::load_puzzle(&file_path);
        assert!(result.is_ok());

        let puzzle = result.unwrap();
        assert_eq!(puzzle.name, "Test Puzzle");
        assert_eq!(puzzle.disks, 2);
        assert_eq!(puzzle.move_count(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("missing.hanoi");

        let result = PuzzleLoader::load_puzzle(&file_path);
        assert!(matches!(result, Err(HanoiError::FileError(_))));
    }

    #[test]
    fn test_load_invalid_puzzle() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.hanoi");

        let invalid_content = "This is not a valid puzzle";

        let mut file = File::create(&file_path).unwrap();
        file.write_all(invalid_content.as_bytes()).unwrap();

        let result = PuzzleLoader::load_puzzle(&file_path);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_puzzles_from_directory() {
        let dir = tempdir().unwrap();

        // Create a valid puzzle file
        let valid_path = dir.path().join("valid.hanoi");
        let valid_content = "name: Valid Puzzle\ndisks: 1\nmoves:\n  1 -> 3";
        let mut valid_file = File::create(&valid_path).unwrap();
        valid_file.write_all(valid_content.as_bytes()).unwrap();

        // Create an invalid puzzle file
        let invalid_path = dir.path().join("invalid.hanoi");
        let invalid_content = "This is not a valid puzzle";
        let mut invalid_file = File::create(&invalid_path).unwrap();
        invalid_file.write_all(invalid_content.as_bytes()).unwrap();

        // Create a non-.hanoi file that should be ignored
        let ignored_path = dir.path().join("ignored.txt");
        let ignored_content = "This file should be ignored";
        let mut ignored_file = File::create(&ignored_path).unwrap();
        ignored_file.write_all(ignored_content.as_bytes()).unwrap();

        let results = PuzzleLoader::load_puzzles(dir.path());

        // We should have 2 results: 1 success and 1 error
        assert_eq!(results.len(), 2);

        let mut success_count = 0;
        let mut error_count = 0;

        for result in results {
            match result {
                Ok(_) => success_count += 1,
                Err(_) => error_count += 1,
            }
        }

        assert_eq!(success_count, 1);
        assert_eq!(error_count, 1);
    }

    #[test]
    fn test_load_puzzles_from_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nowhere");

        let results = PuzzleLoader::load_puzzles(&missing);
        assert_eq!(results.len(), 1);
        assert!(matches!(&results[0], Err(HanoiError::FileError(_))));
    }
}
