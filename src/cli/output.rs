/// Output handling: sink resolution, diagnostics on stderr, debug timing.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use super::errors::{ArgsError, SinkError};

/// Output context passed to the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputCtx {
    /// When true, print phase timings to stderr.
    pub debug: bool,
}

impl OutputCtx {
    /// Construct from CLI settings.
    #[must_use]
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Start a named debug timer. Prints elapsed on drop only when `--debug` is set.
    #[must_use]
    pub fn timer(&self, label: &'static str) -> DebugTimer {
        DebugTimer::new(label, self.debug)
    }
}

// --- Sink ---

/// Destination for rendered text: stdout or a file created for this run.
///
/// The file handle is flushed and closed when the sink is dropped, whichever
/// way the invocation ends.
#[derive(Debug)]
pub enum Sink {
    /// The process's standard output.
    Stdout(io::Stdout),
    /// A file created (or truncated) at the requested path.
    File(BufWriter<File>),
}

impl Sink {
    /// Resolve `output` to a sink. An empty path means stdout.
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Create` if the file cannot be created.
    pub fn resolve(output: &str) -> Result<Self, SinkError> {
        if output.is_empty() {
            return Ok(Self::Stdout(io::stdout()));
        }
        File::create(output)
            .map(|f| Self::File(BufWriter::new(f)))
            .map_err(|source| SinkError::Create {
                path: output.to_owned(),
                source,
            })
    }
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Stdout(out) => out.write(buf),
            Self::File(out) => out.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(out) => out.flush(),
            Self::File(out) => out.flush(),
        }
    }
}

impl Drop for Sink {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

// --- Diagnostics ---

/// Write a one-line diagnostic with a phase prefix to stderr.
pub fn write_error(prefix: &str, err: &dyn std::fmt::Display) {
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = writeln!(out, "{prefix}: {err}");
}

/// Report an argument parsing outcome: usage on stdout for help, otherwise
/// the error and usage on stderr.
pub fn write_args_error(err: &ArgsError) {
    if let ArgsError::Help { usage } = err {
        println!("{usage}");
        return;
    }
    write_error("error parsing arguments", err);
    let stderr = io::stderr();
    let mut out = stderr.lock();
    let _ = write!(out, "{}", err.usage());
}

// --- Debug timer ---

/// A RAII timer that prints elapsed milliseconds to stderr on drop.
///
/// Created via [`OutputCtx::timer`]. Does nothing when `debug` is false.
pub struct DebugTimer {
    label: &'static str,
    start: std::time::Instant,
    active: bool,
}

impl DebugTimer {
    #[must_use]
    fn new(label: &'static str, active: bool) -> Self {
        Self {
            label,
            start: std::time::Instant::now(),
            active,
        }
    }
}

impl Drop for DebugTimer {
    fn drop(&mut self) {
        if self.active {
            let ms = self.start.elapsed().as_secs_f64() * 1000.0;
            eprintln!("[debug] {}: {ms:.2}ms", self.label);
        }
    }
}
