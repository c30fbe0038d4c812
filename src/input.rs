//! Sources of operator input lines.
//!
//! End of input is not reported as a separate condition: it simply terminates the
//! current line, which may be empty. A caller that keeps reading after EOF therefore
//! keeps receiving empty lines.

use crate::error::ShellError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};
use tracing::warn;

/// Something that can show a prompt and hand back one line of input.
pub trait LineSource {
    /// Show `prompt`, then read up to the next newline or end of input.
    ///
    /// The returned line is the raw input bytes, without the terminating newline.
    fn read_line(&mut self, prompt: &str) -> Result<Vec<u8>, ShellError>;
}

/// Reads lines from any buffered reader and writes prompts to a separate writer.
pub struct PlainLines<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PlainLines<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

#[cfg(test)]
impl<R, W> PlainLines<R, W> {
    pub(crate) fn into_parts(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> LineSource for PlainLines<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Vec<u8>, ShellError> {
        self.output.write_all(prompt.as_bytes())?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if let Err(e) = self.input.read_until(b'\n', &mut buf) {
            // Whatever was read so far still forms the line.
            warn!("failed to read input: {e}");
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        Ok(buf)
    }
}

/// Reads lines through an interactive line editor.
///
/// Lines are never added to the editor's history.
pub struct EditorLines {
    editor: DefaultEditor,
}

impl EditorLines {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for EditorLines {
    fn read_line(&mut self, prompt: &str) -> Result<Vec<u8>, ShellError> {
        editor_line(self.editor.readline(prompt))
    }
}

/// Turn the editor's result into a line. Ctrl-D and Ctrl-C both end the line with
/// nothing on it.
fn editor_line(result: rustyline::Result<String>) -> Result<Vec<u8>, ShellError> {
    match result {
        Ok(line) => Ok(line.into_bytes()),
        Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => Ok(Vec::new()),
        Err(e) => Err(e.into()),
    }
}
