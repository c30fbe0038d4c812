use crate::builtin::Registry;
use crate::command::{Flow, Launcher};
use crate::error::ShellError;
use crate::external::ProcessLauncher;
use crate::input::LineSource;
use crate::lexer;
use std::ffi::OsStr;
use std::io::Write;
use tracing::debug;

/// Prompt shown before every line when none is configured.
pub const DEFAULT_PROMPT: &str = "> ";

/// A minimal interactive interpreter that runs built-in and external commands.
///
/// The interpreter owns the [`Registry`] of built-ins and a [`Launcher`] for everything
/// else. See [`Default`] for the standard setup.
///
/// Example
/// ```
/// use bsh::{Interpreter, command::Flow};
/// use std::ffi::OsStr;
/// let mut sh: Interpreter = Interpreter::default();
/// let (mut out, mut err) = (Vec::<u8>::new(), Vec::<u8>::new());
/// assert_eq!(sh.execute(&[OsStr::new("exit")], &mut out, &mut err), Flow::Stop);
/// ```
pub struct Interpreter<L = ProcessLauncher> {
    registry: Registry,
    launcher: L,
    prompt: String,
}

impl<L: Launcher> Interpreter<L> {
    /// Create an interpreter with custom built-ins and launcher.
    pub fn new(registry: Registry, launcher: L) -> Self {
        Self {
            registry,
            launcher,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    /// Replace the prompt shown before each line.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Dispatch one token sequence.
    ///
    /// An empty sequence does nothing. A first token naming a built-in runs that
    /// built-in; anything else is launched as an external program and waited for.
    /// Failures are written to `stderr` and never stop the loop: only a built-in
    /// such as `exit` can return [`Flow::Stop`].
    pub fn execute(
        &mut self,
        tokens: &[&OsStr],
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Flow {
        let Some(name) = tokens.first() else {
            return Flow::Continue;
        };

        if let Some(builtin) = self.registry.get(name) {
            debug!(builtin = ?name, "dispatching to builtin");
            return match builtin.execute(tokens, &self.registry, stdout) {
                Ok(flow) => flow,
                Err(e) => {
                    report(stderr, &e);
                    Flow::Continue
                }
            };
        }

        debug!(program = ?name, "dispatching to external program");
        if let Err(e) = self.launcher.launch(tokens) {
            report(stderr, &e);
        }
        Flow::Continue
    }

    /// Run one cycle of the loop: prompt, read a line, split it and dispatch it.
    ///
    /// Only a failure of the line source itself is returned as an error.
    pub fn step(
        &mut self,
        input: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<Flow, ShellError> {
        let line = input.read_line(&self.prompt)?;
        let tokens = lexer::split_into_tokens(&line);
        Ok(self.execute(&tokens, stdout, stderr))
    }

    /// Run the read-split-execute loop until a command signals [`Flow::Stop`].
    ///
    /// End of input yields empty lines, which are no-ops, so the loop keeps prompting
    /// after EOF instead of returning.
    pub fn repl(
        &mut self,
        input: &mut dyn LineSource,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> Result<(), ShellError> {
        while self.step(input, stdout, stderr)? == Flow::Continue {}
        Ok(())
    }
}

impl Default for Interpreter {
    /// Create an interpreter with the standard built-ins (`cd`, `help`, `exit`) that
    /// launches everything else as a child process.
    fn default() -> Self {
        Self::new(Registry::default(), ProcessLauncher)
    }
}

fn report(stderr: &mut dyn Write, err: &ShellError) {
    debug!(error = %err, "command failed");
    // Nowhere left to report to if stderr itself fails.
    let _ = writeln!(stderr, "bsh: {err}");
}
