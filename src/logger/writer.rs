//! Shared file writer for the file logging layer

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use crate::logger::config::FileConfig;

/// Appends formatted events to one log file.
///
/// Every event is flushed when its guard drops, so the file stays readable
/// while the server runs. Write failures fall back to stderr.
#[derive(Clone)]
pub struct LogFileWriter {
    file: Arc<Mutex<BufWriter<File>>>,
}

impl LogFileWriter {
    pub fn new(config: &FileConfig) -> io::Result<Self> {
        if let Some(parent) = config.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        Ok(Self {
            file: Arc::new(Mutex::new(open_log_file(&config.path, config.append)?)),
        })
    }
}

impl<'a> MakeWriter<'a> for LogFileWriter {
    type Writer = LogFileGuard;

    fn make_writer(&'a self) -> Self::Writer {
        LogFileGuard {
            file: self.file.clone(),
        }
    }
}

pub struct LogFileGuard {
    file: Arc<Mutex<BufWriter<File>>>,
}

impl Write for LogFileGuard {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?;

        match file.write(buf) {
            Ok(written) => Ok(written),
            Err(e) => {
                eprintln!("[Logger] File write failed, falling back to stderr: {}", e);
                io::stderr().write(buf)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .lock()
            .map_err(|_| io::Error::other("Failed to acquire writer lock"))?
            .flush()
    }
}

impl Drop for LogFileGuard {
    fn drop(&mut self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

fn open_log_file(path: &Path, append: bool) -> io::Result<BufWriter<File>> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(append)
        .truncate(!append)
        .open(path)?;

    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::LogFormat;
    use tempfile::TempDir;

    fn file_config(dir: &TempDir, append: bool) -> FileConfig {
        FileConfig::new(
            true,
            dir.path().join("nested").join("app.log"),
            append,
            LogFormat::Full,
        )
    }

    #[test]
    fn test_writer_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true);

        let writer = LogFileWriter::new(&config).unwrap();
        writer.make_writer().write_all(b"hello\n").unwrap();

        assert!(config.path.exists());
        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "hello\n");
    }

    #[test]
    fn test_append_keeps_existing_content() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, true);

        LogFileWriter::new(&config)
            .unwrap()
            .make_writer()
            .write_all(b"first\n")
            .unwrap();
        LogFileWriter::new(&config)
            .unwrap()
            .make_writer()
            .write_all(b"second\n")
            .unwrap();

        assert_eq!(
            std::fs::read_to_string(&config.path).unwrap(),
            "first\nsecond\n"
        );
    }

    #[test]
    fn test_truncate_when_not_appending() {
        let dir = TempDir::new().unwrap();
        let config = file_config(&dir, false);

        LogFileWriter::new(&config)
            .unwrap()
            .make_writer()
            .write_all(b"old\n")
            .unwrap();
        LogFileWriter::new(&config)
            .unwrap()
            .make_writer()
            .write_all(b"new\n")
            .unwrap();

        assert_eq!(std::fs::read_to_string(&config.path).unwrap(), "new\n");
    }
}
