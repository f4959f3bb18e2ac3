// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! The logging backend of the batch runner.
//!
//! Every record at `DEBUG` or above goes to a fresh file under the log
//! directory, named after the start time of the run. Records at `INFO` or
//! above are echoed to stderr with a `TERMINAL:` prefix.

use log::{LevelFilter, Log, Metadata, Record};
use std::{
    fs::File,
    io::{LineWriter, Write},
    path::{Path, PathBuf},
    sync::Mutex,
    time::{SystemTime, UNIX_EPOCH},
};

/// Returns the log file name for a run started at `unix_secs`.
#[inline]
pub fn log_file_name(unix_secs: u64) -> String {
    format!("branch_and_bound_{}.log", unix_secs)
}

fn now() -> std::time::Duration {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
}

/// A `log::Log` writing to a file and to stderr.
#[derive(Debug)]
pub struct BenchLogger {
    file: Mutex<LineWriter<File>>,
    path: PathBuf,
    file_level: LevelFilter,
    console_level: LevelFilter,
}

impl BenchLogger {
    /// Creates `log_dir` if needed and opens a new, truncated log file in it.
    pub fn create<P: AsRef<Path>>(log_dir: P) -> std::io::Result<Self> {
        let log_dir = log_dir.as_ref();
        std::fs::create_dir_all(log_dir)?;
        let path = log_dir.join(log_file_name(now().as_secs()));
        let file = File::create(&path)?;
        Ok(Self {
            file: Mutex::new(LineWriter::new(file)),
            path,
            file_level: LevelFilter::Debug,
            console_level: LevelFilter::Info,
        })
    }

    /// Returns the path of the log file.
    #[inline]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The most verbose level either sink accepts.
    #[inline]
    pub fn max_level(&self) -> LevelFilter {
        self.file_level.max(self.console_level)
    }

    fn file_line(record: &Record) -> String {
        let t = now();
        format!(
            "{}.{:03} - {} - {}",
            t.as_secs(),
            t.subsec_millis(),
            record.level(),
            record.args()
        )
    }

    fn console_line(record: &Record) -> String {
        format!("TERMINAL: {} - {}", record.level(), record.args())
    }
}

impl Log for BenchLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level()
    }

    fn log(&self, record: &Record) {
        if record.level() <= self.file_level {
            if let Ok(mut file) = self.file.lock() {
                // a failing log sink must not take the batch down
                let _ = writeln!(file, "{}", Self::file_line(record));
            }
        }
        if record.level() <= self.console_level {
            eprintln!("{}", Self::console_line(record));
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Installs a `BenchLogger` writing into `log_dir` as the global logger and
/// returns the path of its file.
pub fn init<P: AsRef<Path>>(log_dir: P) -> anyhow::Result<PathBuf> {
    let logger = BenchLogger::create(log_dir)?;
    let path = logger.path().to_path_buf();
    let max_level = logger.max_level();
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(max_level);
    Ok(path)
}
