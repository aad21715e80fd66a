//! Rotating file writer with size-based rotation and backup retention.
//!
//! Keeps log files from growing without bound: once the current file passes
//! the size threshold it is shifted to `<name>.1`, older backups move up by
//! one and the oldest beyond the retention limit is removed.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;

/// Maximum file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Thread-safe rotating file writer.
///
/// Usable directly through `io::Write` on `&FileWriter`, and as a
/// `tracing-subscriber` [`MakeWriter`].
///
/// # Rotation Strategy
///
/// 1. Check file size before each write
/// 2. If size > limit, rotate:
///    - Remove `<name>.3`
///    - Rename `<name>.2` → `<name>.3`, `<name>.1` → `<name>.2`
///    - Rename the current file to `<name>.1`
/// 3. Reopen a fresh file
///
/// # Example
///
/// ```rust
/// use patient_roster::observability::FileWriter;
/// use std::io::Write;
///
/// let dir = tempfile::tempdir().unwrap();
/// let writer = FileWriter::new(dir.path().join("roster.log"));
/// (&writer).write_all(b"roster started\n").unwrap();
/// ```
pub struct FileWriter {
    file_path: PathBuf,
    max_file_size: u64,
    max_backups: usize,
    /// Lazily-initialized file handle (opens on first write).
    writer: Mutex<Option<File>>,
}

impl FileWriter {
    /// Creates a writer with the default limits (10 MB, 3 backups).
    ///
    /// The file is not opened until the first write, so construction succeeds
    /// even if the file cannot be opened yet.
    #[must_use]
    pub const fn new(file_path: PathBuf) -> Self {
        Self::with_limits(file_path, MAX_FILE_SIZE_BYTES, MAX_BACKUP_FILES)
    }

    /// Creates a writer with custom rotation limits.
    #[must_use]
    pub const fn with_limits(file_path: PathBuf, max_file_size: u64, max_backups: usize) -> Self {
        Self {
            file_path,
            max_file_size,
            max_backups,
            writer: Mutex::new(None),
        }
    }

    /// Appends `bytes` to the file, rotating first if it grew too large.
    ///
    /// # Errors
    ///
    /// May fail due to:
    /// - File system permissions
    /// - Disk space exhaustion
    /// - Mutex poisoning (if another thread panicked while holding the lock)
    pub fn write_bytes(&self, bytes: &[u8]) -> io::Result<()> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|e| io::Error::other(format!("Mutex poisoned: {e}")))?;

        self.check_and_rotate(&mut writer)?;

        if writer.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *writer = Some(file);
        }

        let file = writer
            .as_mut()
            .ok_or_else(|| io::Error::other("No file available"))?;

        file.write_all(bytes)?;
        file.flush()?;
        drop(writer);

        Ok(())
    }

    /// Closes the handle and rotates when the file exceeds the size limit.
    fn check_and_rotate(&self, writer: &mut Option<File>) -> io::Result<()> {
        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > self.max_file_size {
                *writer = None;
                self.rotate_files()?;
            }
        }
        Ok(())
    }

    /// Path of the `index`-th backup, `<name>.<index>`.
    fn backup_path(&self, index: usize) -> PathBuf {
        let mut name = self.file_path.clone().into_os_string();
        name.push(format!(".{index}"));
        PathBuf::from(name)
    }

    fn rotate_files(&self) -> io::Result<()> {
        if self.max_backups == 0 {
            return fs::remove_file(&self.file_path);
        }

        let oldest = self.backup_path(self.max_backups);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        for index in (1..self.max_backups).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }

        if self.file_path.exists() {
            fs::rename(&self.file_path, self.backup_path(1))?;
        }

        Ok(())
    }
}

impl Write for &FileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for FileWriter {
    type Writer = &'a Self;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}

impl std::fmt::Debug for FileWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileWriter")
            .field("file_path", &self.file_path)
            .field("max_file_size", &self.max_file_size)
            .field("max_backups", &self.max_backups)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_to_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.log");
        let writer = FileWriter::new(path.clone());

        writer.write_bytes(b"one\n").unwrap();
        (&writer).write_all(b"two\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[test]
    fn rotates_and_keeps_a_bounded_number_of_backups() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roster.log");
        let writer = FileWriter::with_limits(path.clone(), 4, 2);

        for line in ["aaaaa\n", "bbbbb\n", "ccccc\n", "ddddd\n"] {
            writer.write_bytes(line.as_bytes()).unwrap();
        }

        assert_eq!(fs::read_to_string(&path).unwrap(), "ddddd\n");
        assert_eq!(fs::read_to_string(writer.backup_path(1)).unwrap(), "ccccc\n");
        assert_eq!(fs::read_to_string(writer.backup_path(2)).unwrap(), "bbbbb\n");
        assert!(!writer.backup_path(3).exists());
    }
}
