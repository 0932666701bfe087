//! Log output: `pretty_env_logger` formatting on stderr, with every line also
//! appended to a log file.
use std::{
    env,
    fs::{File, OpenOptions},
    io::{self, Write},
    path::Path,
};

use env_logger::{Builder, Target, WriteStyle};

const DEFAULT_LOG_FILTER: &str = "grade_notifier=info";

/// Writes everything to stderr and to the log file.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stderr().write_all(buf)?;
        self.file.write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        self.file.flush()
    }
}

fn builder(log_path: &Path, filters: &str) -> io::Result<Builder> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)?;
    let mut builder = pretty_env_logger::formatted_timed_builder();
    builder
        .parse_filters(filters)
        // no escape codes in the file
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(Tee { file })));
    Ok(builder)
}

/// Installs the global logger. `RUST_LOG` overrides the default filter.
pub fn init(log_path: &Path) -> io::Result<()> {
    let filters = env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());
    builder(log_path, &filters)?.init();
    Ok(())
}
