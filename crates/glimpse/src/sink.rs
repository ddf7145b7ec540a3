//! A log file that collects summaries.
//!
//! [`DebugLog`] writes free-form messages and plain (unstyled) summary lines
//! to `<dir>/log.txt`, and forwards each entry to `tracing` so that a
//! subscriber can pick them up alongside the rest of an application's events:
//!
//! - messages go to target `glimpse::log`,
//! - summaries go to target `glimpse::debug`, without the line prefix,
//! - metric values go to target `glimpse::value` with `name`, `index` and
//!   `value` fields.
//!
//! Messages and summaries carry a running `index` field, counted separately.
//! Metric indexes are kept per metric name.
//!
//! ```rust,no_run
//! use glimpse::DebugLog;
//!
//! # fn main() -> glimpse::Result<()> {
//! let mut log = DebugLog::create("logs/run-1", true)?;
//! log.log("epoch 1")?;
//! let losses = vec![0.9, 0.7, 0.4];
//! log.debug(&losses, None, false)?;
//! for loss in &losses {
//!     log.log_value("loss", *loss, None)?;
//! }
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{LineWriter, Write};
use std::panic::Location;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::Result;
use crate::inspect::{Inspect, Scalar};
use crate::modes::Inspector;
use crate::name::name_or_resolve;
use crate::palette::ColorChoice;

pub const LOG_FILE: &str = "log.txt";

const LOG_TARGET: &str = "glimpse::log";
const DEBUG_TARGET: &str = "glimpse::debug";
const VALUE_TARGET: &str = "glimpse::value";

#[derive(Debug)]
pub struct DebugLog {
    path: PathBuf,
    file: LineWriter<File>,
    /// Formats the lines written to the file.
    plain: Inspector,
    /// Formats the lines echoed to stdout.
    echo: Option<Inspector>,
    log_index: u64,
    debug_index: u64,
    /// Last index written per metric name.
    value_indexes: HashMap<String, u64>,
}

impl DebugLog {
    /// Creates `dir` (and its parents) and truncates `dir/log.txt`.
    ///
    /// With `echo`, every entry is also printed to stdout, styled according
    /// to [`Settings::from_env`].
    pub fn create(dir: impl AsRef<Path>, echo: bool) -> Result<Self> {
        Self::with_settings(dir, echo, Settings::from_env())
    }

    pub fn with_settings(dir: impl AsRef<Path>, echo: bool, settings: Settings) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(LOG_FILE);
        let file = LineWriter::new(File::create(&path)?);
        tracing::debug!(path = %path.display(), "created debug log");

        Ok(DebugLog {
            path,
            file,
            plain: Inspector::new(settings.clone().color(ColorChoice::Never)),
            echo: echo.then(|| Inspector::new(settings)),
            log_index: 0,
            debug_index: 0,
            value_indexes: HashMap::new(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes `(Log) message`.
    pub fn log(&mut self, message: &str) -> Result<()> {
        let line = format!("(Log) {message}");
        if self.echo.is_some() {
            println!("{line}");
        }
        writeln!(self.file, "{line}")?;
        tracing::info!(target: LOG_TARGET, index = self.log_index, "{message}");
        self.log_index += 1;
        Ok(())
    }

    /// Writes `(Value) name - index: value` for one point of a metric series.
    ///
    /// Without an explicit `index` the metric's previous index is incremented,
    /// starting at 0. An explicit index becomes the new counter for `name`.
    pub fn log_value(
        &mut self,
        name: &str,
        value: impl Into<Scalar>,
        index: Option<u64>,
    ) -> Result<()> {
        let index = match (index, self.value_indexes.get(name)) {
            (Some(index), _) => index,
            (None, Some(last)) => last + 1,
            (None, None) => 0,
        };
        self.value_indexes.insert(name.to_string(), index);

        let value = value.into();
        let line = format!("(Value) {name} - {index}: {value}");
        if self.echo.is_some() {
            println!("{line}");
        }
        writeln!(self.file, "{line}")?;
        tracing::info!(target: VALUE_TARGET, name, index, value = %value, "{line}");
        Ok(())
    }

    /// Writes a compact summary of `value`.
    #[track_caller]
    pub fn debug<T: Inspect + ?Sized>(
        &mut self,
        value: &T,
        name_hint: Option<&str>,
        highlighted: bool,
    ) -> Result<()> {
        let name = name_or_resolve(name_hint, Location::caller(), "debug");
        self.record(|inspector| inspector.compact(&name, &value, highlighted))
    }

    /// Writes an untruncated summary of `value`.
    #[track_caller]
    pub fn raw<T: Inspect + ?Sized>(
        &mut self,
        value: &T,
        name_hint: Option<&str>,
        highlighted: bool,
    ) -> Result<()> {
        let name = name_or_resolve(name_hint, Location::caller(), "raw");
        self.record(|inspector| inspector.raw(&name, &value, highlighted))
    }

    /// Writes a summary of `value` over at most `max_lines` rows.
    #[track_caller]
    pub fn wrapped<T: Inspect + ?Sized>(
        &mut self,
        value: &T,
        name_hint: Option<&str>,
        max_lines: Option<usize>,
        highlighted: bool,
    ) -> Result<()> {
        let name = name_or_resolve(name_hint, Location::caller(), "wrapped");
        self.record(|inspector| inspector.wrapped(&name, &value, max_lines, highlighted))
    }

    pub fn flush(&mut self) -> Result<()> {
        self.file.flush()?;
        Ok(())
    }

    fn record(&mut self, format: impl Fn(&Inspector) -> String) -> Result<()> {
        if let Some(echo) = &self.echo {
            println!("{}", format(echo));
        }
        let line = format(&self.plain);
        writeln!(self.file, "{line}")?;

        let prefix = &self.plain.settings().prefix;
        let body = line.strip_prefix(prefix.as_str()).unwrap_or(&line);
        tracing::info!(target: DEBUG_TARGET, index = self.debug_index, "{body}");
        self.debug_index += 1;
        Ok(())
    }
}

impl Drop for DebugLog {
    fn drop(&mut self) {
        if let Err(err) = self.file.flush() {
            tracing::warn!(path = %self.path.display(), error = %err, "could not flush debug log");
        }
    }
}
