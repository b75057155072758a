use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

use nodeswitch_platform::AppPaths;

/// Append-only log that rolls the active file over to a single backup once
/// it would grow past `max_bytes`. Each CLI run appends to the same file, so
/// the cap is checked on every write rather than once at startup.
struct RotatingLogFile {
    path: PathBuf,
    backup: PathBuf,
    max_bytes: u64,
    written: u64,
    file: Option<File>,
}

impl RotatingLogFile {
    fn open(path: PathBuf, backup: PathBuf, max_bytes: u64) -> io::Result<Self> {
        let file = open_append(&path)?;
        let written = file.metadata()?.len();
        Ok(Self {
            path,
            backup,
            max_bytes,
            written,
            file: Some(file),
        })
    }

    fn rotate(&mut self) -> io::Result<()> {
        // Windows refuses to rename a file that is still open.
        drop(self.file.take());
        std::fs::rename(&self.path, &self.backup)?;
        self.file = Some(open_append(&self.path)?);
        self.written = 0;
        Ok(())
    }

    fn would_overflow(&self, incoming: usize) -> bool {
        self.written > 0 && self.written.saturating_add(incoming as u64) > self.max_bytes
    }
}

fn open_append(path: &std::path::Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

impl Write for RotatingLogFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.would_overflow(buf.len()) {
            self.rotate()?;
        }
        // A failed rotation leaves no handle behind.
        if self.file.is_none() {
            self.file = Some(open_append(&self.path)?);
        }
        let Some(file) = self.file.as_mut() else {
            return Err(io::Error::other("log file not available"));
        };
        let written = file.write(buf)?;
        self.written += written as u64;
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.as_mut().map_or(Ok(()), Write::flush)
    }
}

fn terminal_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

fn log_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("nodeswitch")
        .build()
}

/// Install the global logger.
///
/// Warnings always reach stderr; `verbose` lowers that to debug. The debug
/// log file under the data directory is only opened when `write_file` is set.
pub fn init_logging(write_file: bool, verbose: bool, max_log_size: u64) {
    let config = log_config();
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        terminal_level(verbose),
        config.clone(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    let mut log_path = None;
    if write_file {
        match open_log_file(max_log_size) {
            Ok((path, file)) => {
                loggers.push(WriteLogger::new(LevelFilter::Debug, config, file));
                log_path = Some(path);
            }
            Err(error) => eprintln!("warning: debug log unavailable: {error}"),
        }
    }

    let _ = CombinedLogger::init(loggers);

    if let Some(path) = log_path {
        log::debug!("Debug log file: {}", path.display());
    }
}

fn open_log_file(max_log_size: u64) -> io::Result<(PathBuf, RotatingLogFile)> {
    let paths = AppPaths::new().map_err(io::Error::other)?;
    paths.ensure_data_dir()?;
    let path = paths.log_file();
    let file = RotatingLogFile::open(path.clone(), paths.rotated_log_file(), max_log_size)?;
    Ok((path, file))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;
    use std::path::Path;

    use super::*;

    fn open_in(dir: &Path, max_bytes: u64) -> RotatingLogFile {
        RotatingLogFile::open(dir.join("debug.log"), dir.join("debug.log.1"), max_bytes)
            .expect("log file should open")
    }

    fn read(path: &Path) -> String {
        std::fs::read_to_string(path).expect("log file should be readable")
    }

    #[test]
    fn reopening_appends_and_counts_existing_bytes() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        std::fs::write(temp_dir.path().join("debug.log"), "nvm: running list-installed\n")
            .expect("seed log should be written");

        let mut log = open_in(temp_dir.path(), 1024);
        log.write_all(b"nvm: using version 20.11.0\n")
            .expect("append should succeed");

        assert_eq!(log.written, 55);
        assert_eq!(
            read(&temp_dir.path().join("debug.log")),
            "nvm: running list-installed\nnvm: using version 20.11.0\n"
        );
    }

    #[test]
    fn overflowing_write_rolls_to_backup() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let mut log = open_in(temp_dir.path(), 32);

        log.write_all(b"nvm: running manager-version\n")
            .expect("first write should succeed");
        log.write_all(b"nvm: running list-installed\n")
            .expect("second write should rotate");

        assert_eq!(
            read(&temp_dir.path().join("debug.log.1")),
            "nvm: running manager-version\n"
        );
        assert_eq!(
            read(&temp_dir.path().join("debug.log")),
            "nvm: running list-installed\n"
        );
    }

    #[test]
    fn rotation_replaces_previous_backup() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        std::fs::write(temp_dir.path().join("debug.log.1"), "stale\n")
            .expect("old backup should be written");
        let mut log = open_in(temp_dir.path(), 8);

        log.write_all(b"first!\n").expect("write should succeed");
        log.write_all(b"second\n").expect("write should rotate");

        assert_eq!(read(&temp_dir.path().join("debug.log.1")), "first!\n");
    }

    #[test]
    fn oversized_record_in_empty_file_is_kept() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let mut log = open_in(temp_dir.path(), 4);

        log.write_all(b"nvm: installing version 22.1.0\n")
            .expect("write should succeed");

        assert!(!temp_dir.path().join("debug.log.1").exists());
        assert_eq!(
            read(&temp_dir.path().join("debug.log")),
            "nvm: installing version 22.1.0\n"
        );
    }

    #[test]
    fn terminal_shows_warnings_unless_verbose() {
        assert_eq!(terminal_level(false), LevelFilter::Warn);
        assert_eq!(terminal_level(true), LevelFilter::Debug);
    }
}
