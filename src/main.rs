use bsh::Interpreter;
use bsh::config::Config;
use bsh::input::{EditorLines, LineSource, PlainLines};
use std::io;

fn main() -> anyhow::Result<()> {
    let config: Config = argh::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut input: Box<dyn LineSource> = if config.editor {
        Box::new(EditorLines::new()?)
    } else {
        Box::new(PlainLines::new(io::stdin().lock(), io::stdout()))
    };

    let sh: Interpreter = Interpreter::default();
    let mut sh = sh.with_prompt(config.prompt);
    sh.repl(input.as_mut(), &mut io::stdout(), &mut io::stderr())?;
    Ok(())
}
