//! A minimal interactive command interpreter.
//!
//! Each line read from the operator is split on whitespace into a command and its
//! arguments. The command either names one of the in-process built-ins (`cd`, `help`,
//! `exit`) or an external program, which is spawned and waited for before the next
//! prompt. There is no shell grammar: no quoting, pipes, redirection or expansion.
//!
//! The main entry point is [`Interpreter`]. The [`command`] module exposes the traits
//! used to plug in built-ins and process launchers.

mod builtin;
pub mod command;
pub mod config;
mod error;
mod external;
pub mod input;
mod interpreter;
mod lexer;

pub use builtin::{Cd, Exit, Help, Registry};
pub use error::ShellError;
pub use external::{ExternalCommand, ProcessLauncher, Termination};
pub use interpreter::Interpreter;
pub use lexer::split_into_tokens;
