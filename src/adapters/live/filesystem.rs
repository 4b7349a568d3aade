//! Live filesystem adapter using `std::fs`.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::ports::filesystem::FileSystem;

/// Live filesystem adapter backed by real disk I/O.
pub struct LiveFileSystem;

impl FileSystem for LiveFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn append(
        &self,
        path: &Path,
        contents: &str,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        file.write_all(contents.as_bytes())?;
        file.sync_data()?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_creates_and_extends_file() {
        let dir = std::env::temp_dir().join("ftbfs_reminder_live_fs_append");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("ledger");
        let _ = std::fs::remove_file(&path);

        let fs = LiveFileSystem;
        assert!(!fs.exists(&path));
        fs.append(&path, "1\n").unwrap();
        fs.append(&path, "2\n").unwrap();

        assert!(fs.exists(&path));
        assert_eq!(fs.read_to_string(&path).unwrap(), "1\n2\n");
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_missing_file_errors() {
        let fs = LiveFileSystem;
        let result = fs.read_to_string(Path::new("/nonexistent/ftbfs_reminder/ledger"));
        assert!(result.is_err());
    }
}
