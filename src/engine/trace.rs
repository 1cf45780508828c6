//! Game-trace output: everything the session writes is duplicated into a
//! text file, so a finished game leaves a complete transcript behind.

use std::fs::File;
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::game::options::Options;

/// A writer that duplicates everything into an optional secondary sink.
///
/// The session loop writes through a single stream; with a `Tee` over stdout
/// and the trace file neither the loop nor the tests need to know whether
/// tracing is enabled.
pub struct Tee<P, S> {
    primary: P,
    secondary: Option<S>,
}

impl<P: Write, S: Write> Tee<P, S> {
    #[allow(missing_docs)]
    pub const fn new(primary: P, secondary: Option<S>) -> Self {
        Self { primary, secondary }
    }
}

impl<P: Write, S: Write> Write for Tee<P, S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.primary.write(buf)?;
        if let Some(secondary) = &mut self.secondary {
            secondary.write_all(&buf[..written])?;
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.primary.flush()?;
        if let Some(secondary) = &mut self.secondary {
            secondary.flush()?;
        }
        Ok(())
    }
}

/// Creates the trace file for a session in `dir`, never clobbering an
/// existing trace: `game_trace_[true]_[5]_[100].txt`, then `...(1).txt` and
/// so on.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be created.
pub fn open_trace_file(dir: &Path, options: &Options) -> io::Result<(PathBuf, File)> {
    let base = format!(
        "game_trace_[{}]_[{}]_[{}]",
        options.alpha_beta,
        options
            .max_time
            .map_or_else(|| "none".to_owned(), |seconds| seconds.to_string()),
        options
            .max_turns
            .map_or_else(|| "none".to_owned(), |turns| turns.to_string()),
    );

    let mut suffix = 0;
    loop {
        let name = if suffix == 0 {
            format!("{base}.txt")
        } else {
            format!("{base}({suffix}).txt")
        };
        let path = dir.join(name);
        match File::create_new(&path) {
            Ok(file) => return Ok((path, file)),
            Err(error) if error.kind() == ErrorKind::AlreadyExists => suffix += 1,
            Err(error) => return Err(error),
        }
    }
}
