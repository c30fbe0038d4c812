//! Command-line options of the `bsh` binary.

use crate::interpreter::DEFAULT_PROMPT;
use argh::FromArgs;

#[derive(FromArgs, Debug, PartialEq)]
/// A minimal interactive command interpreter.
///
/// Reads commands from standard input, runs `cd`, `help` and `exit` in-process and
/// everything else as a child program. Set RUST_LOG to see diagnostics on stderr.
pub struct Config {
    #[argh(option, default = "DEFAULT_PROMPT.to_string()")]
    /// text shown before each line of input.
    pub prompt: String,

    #[argh(switch)]
    /// read lines through an interactive line editor instead of plain standard input.
    pub editor: bool,
}
