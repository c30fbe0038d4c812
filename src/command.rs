use crate::builtin::Registry;
use crate::error::ShellError;
use crate::external::Termination;
use std::ffi::OsStr;
use std::io::Write;

/// Outcome of dispatching one line: keep prompting or halt the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// A command implemented inside the interpreter process.
///
/// Built-ins are stored in a [`Registry`] and looked up by exact [`Builtin::name`].
pub trait Builtin {
    /// Name the command is invoked by, e.g. "cd".
    fn name(&self) -> &'static str;

    /// Runs the command.
    ///
    /// `args` is the full token sequence, so `args[0]` is the command name itself.
    /// The registry is passed in for commands that describe the shell, like `help`.
    /// An `Err` is reported by the caller and does not stop the loop.
    fn execute(
        &self,
        args: &[&OsStr],
        registry: &Registry,
        stdout: &mut dyn Write,
    ) -> Result<Flow, ShellError>;
}

/// Starts an external program and blocks until it terminates.
pub trait Launcher {
    /// `args[0]` is the program to resolve, and also the new program's argument 0.
    fn launch(&mut self, args: &[&OsStr]) -> Result<Termination, ShellError>;
}
