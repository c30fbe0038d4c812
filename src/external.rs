use crate::command::Launcher;
use crate::error::ShellError;
use nix::errno::Errno;
use nix::sys::signal::Signal;
use nix::sys::wait::{WaitPidFlag, WaitStatus, waitpid};
use nix::unistd::Pid;
use std::ffi::{OsStr, OsString};
use std::process::{Child, Command};
use tracing::debug;

/// Command that is not a builtin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    pub fn new(program: OsString, args: Vec<OsString>) -> Self {
        Self { program, args }
    }

    /// Build a command from a token sequence: the first token is the program, the rest
    /// are its arguments. Returns `None` for an empty sequence.
    pub fn from_tokens(tokens: &[&OsStr]) -> Option<Self> {
        let (program, args) = tokens.split_first()?;
        Some(Self::new(
            program.into(),
            args.iter().map(|x| x.into()).collect(),
        ))
    }

    /// Start the program with the interpreter's standard streams, environment and
    /// working directory.
    ///
    /// A bare program name is searched for in `PATH`; a name containing a slash is used
    /// as a path. Argument 0 of the new program is the program name as given.
    pub fn spawn(&self) -> Result<Child, ShellError> {
        Command::new(&self.program)
            .args(&self.args)
            .spawn()
            .map_err(|source| ShellError::Spawn {
                program: self.program.to_string_lossy().into_owned(),
                source,
            })
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Exited normally with the given code.
    Exited(i32),
    /// Killed by a signal.
    Signaled(Signal),
}

/// Launches external programs as child processes, one at a time.
#[derive(Debug, Default)]
pub struct ProcessLauncher;

impl Launcher for ProcessLauncher {
    fn launch(&mut self, args: &[&OsStr]) -> Result<Termination, ShellError> {
        let Some(cmd) = ExternalCommand::from_tokens(args) else {
            return Ok(Termination::Exited(0));
        };
        let child = cmd.spawn()?;
        let pid = Pid::from_raw(child.id() as i32);
        debug!(%pid, ?args, "spawned child");

        let termination = wait_for(pid)?;
        debug!(%pid, ?termination, "child terminated");
        Ok(termination)
    }
}

/// Block until `pid` has exited or been killed by a signal.
///
/// A stopped child is not terminated, so waiting continues until it is resumed and ends.
fn wait_for(pid: Pid) -> Result<Termination, ShellError> {
    loop {
        match waitpid(pid, Some(WaitPidFlag::WUNTRACED)) {
            Ok(WaitStatus::Exited(_, code)) => return Ok(Termination::Exited(code)),
            Ok(WaitStatus::Signaled(_, signal, _)) => return Ok(Termination::Signaled(signal)),
            Ok(status) => debug!(?status, "child still running"),
            Err(Errno::EINTR) => continue,
            Err(source) => return Err(ShellError::Wait { source }),
        }
    }
}
