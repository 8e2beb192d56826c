//! Puzzle inputs on the local filesystem

use crate::error::InputError;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Locates puzzle inputs.
///
/// Directory structure: `{input_dir}/{year}/day{day:02}.txt`, unless a single
/// explicit file was given, which then serves every lookup.
#[derive(Debug, Clone)]
pub struct InputStore {
    input_dir: PathBuf,
    explicit: Option<PathBuf>,
}

impl InputStore {
    pub fn new(input_dir: PathBuf, explicit: Option<PathBuf>) -> Self {
        Self {
            input_dir,
            explicit,
        }
    }

    /// Where the input for a year/day is expected
    pub fn input_path(&self, year: u16, day: u8) -> PathBuf {
        match &self.explicit {
            Some(path) => path.clone(),
            None => self
                .input_dir
                .join(year.to_string())
                .join(format!("day{:02}.txt", day)),
        }
    }

    pub fn contains(&self, year: u16, day: u8) -> bool {
        self.input_path(year, day).is_file()
    }

    /// Read the whole input file
    pub fn read(&self, year: u16, day: u8) -> Result<String, InputError> {
        let path = self.input_path(year, day);
        fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => InputError::NotFound(path),
            _ => InputError::Io { path, source },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_input_path_format() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), None);

        assert_eq!(
            store.input_path(2023, 1),
            temp.path().join("2023").join("day01.txt")
        );
        assert!(store.input_path(2023, 25).ends_with("2023/day25.txt"));
    }

    #[test]
    fn test_read_existing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), None);
        fs::create_dir_all(temp.path().join("2023")).unwrap();
        fs::write(store.input_path(2023, 6), "Time: 7\nDistance: 9\n").unwrap();

        assert!(store.contains(2023, 6));
        assert_eq!(store.read(2023, 6).unwrap(), "Time: 7\nDistance: 9\n");
    }

    #[test]
    fn test_missing_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(temp.path().to_path_buf(), None);

        assert!(!store.contains(2023, 2));
        assert!(matches!(store.read(2023, 2), Err(InputError::NotFound(_))));
    }

    #[test]
    fn test_explicit_file_wins() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("custom.txt");
        fs::write(&file, "abc").unwrap();
        let store = InputStore::new(PathBuf::from("does-not-exist"), Some(file.clone()));

        assert_eq!(store.input_path(2023, 9), file);
        assert_eq!(store.read(2023, 9).unwrap(), "abc");
    }

    #[test]
    fn test_directory_is_not_an_input() {
        let temp = TempDir::new().unwrap();
        let store = InputStore::new(PathBuf::new(), Some(temp.path().to_path_buf()));

        assert!(!store.contains(2023, 1));
        assert!(matches!(store.read(2023, 1), Err(InputError::Io { .. })));
    }
}
