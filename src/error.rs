use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the interpreter.
///
/// Errors from commands are recoverable: the dispatcher reports them on the error
/// stream and keeps the loop running. Only an error from the line source, such as a
/// prompt that cannot be written, ends the loop.
#[derive(Debug, Error)]
pub enum ShellError {
    /// A built-in was called without a required argument.
    #[error("expected argument to \"{command}\"")]
    MissingArgument { command: &'static str },

    /// `cd` could not change the working directory.
    #[error("cd: {}: {source}", .path.display())]
    ChangeDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The program could not be resolved, executed or forked.
    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Waiting for a child failed.
    #[error("wait: {source}")]
    Wait {
        #[source]
        source: nix::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("line editor: {0}")]
    Editor(#[from] rustyline::error::ReadlineError),
}
