//! Terminal and file collaborators around the engine.
//!
//! None of these make game decisions: they move text in and out.

use generals_rules::{GameError, SetupSource, normalize};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

/// Line returned when reading fails; it interprets as an invalid command.
pub const INVALID_INPUT: &str = "invalid";

/// Source of raw command lines.
pub trait Input {
    /// Reads the next line, trimmed and whitespace-collapsed.
    ///
    /// Returns `None` once the source is exhausted. Read failures yield
    /// [`INVALID_INPUT`] instead of an error.
    fn read(&mut self) -> Option<String>;
}

/// Sink for text shown to the players.
pub trait Output {
    /// Writes `text` as-is.
    fn write(&mut self, text: &str);

    /// Writes `text` followed by a newline.
    fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }
}

/// Line input over any buffered reader.
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    /// Wraps `reader`.
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LineInput<std::io::StdinLock<'static>> {
    /// Reads from standard input.
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock())
    }
}

impl<R: BufRead> Input for LineInput<R> {
    fn read(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) => {
                debug!("Input exhausted");
                None
            }
            Ok(_) => Some(normalize(&line)),
            Err(error) => {
                warn!(%error, "Failed to read input");
                Some(INVALID_INPUT.to_string())
            }
        }
    }
}

/// Output over any writer, flushed after every write.
#[derive(Debug)]
pub struct WriterOutput<W> {
    writer: W,
}

impl<W: Write> WriterOutput<W> {
    /// Wraps `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterOutput<std::io::Stdout> {
    /// Writes to standard output.
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Output for WriterOutput<W> {
    fn write(&mut self, text: &str) {
        if let Err(error) = self
            .writer
            .write_all(text.as_bytes())
            .and_then(|()| self.writer.flush())
        {
            warn!(%error, "Failed to write output");
        }
    }
}

/// Setup read from a `.gggn` file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSetup {
    path: PathBuf,
}

impl FileSetup {
    /// Setup source for the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl SetupSource for FileSetup {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn read_setup(&self) -> Result<String, GameError> {
        std::fs::read_to_string(&self.path).map_err(|e| {
            GameError::SetupUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_input_normalizes_and_ends() {
        let mut input = LineInput::new("  SET  W A1   FLG \nexit\n".as_bytes());
        assert_eq!(input.read().as_deref(), Some("SET W A1 FLG"));
        assert_eq!(input.read().as_deref(), Some("exit"));
        assert_eq!(input.read(), None);
    }

    #[test]
    fn test_line_input_maps_read_errors_to_sentinel() {
        // Invalid UTF-8 makes read_line fail.
        let mut input = LineInput::new(&[0xff, 0xfe, b'\n'][..]);
        assert_eq!(input.read().as_deref(), Some(INVALID_INPUT));
    }

    #[test]
    fn test_writer_output_collects_text() {
        let mut output = WriterOutput::new(Vec::new());
        output.write("Enter command: ");
        output.write_line("ok");
        assert_eq!(String::from_utf8(output.into_inner()).unwrap(), "Enter command: ok\n");
    }

    #[test]
    fn test_missing_setup_file_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSetup::new(dir.path().join("missing.gggn"));
        assert!(matches!(
            source.read_setup(),
            Err(GameError::SetupUnavailable(_))
        ));
    }
}
