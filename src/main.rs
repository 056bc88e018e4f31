use clap::Parser;

use bddsh::interp::Interp;
use bddsh::repl::{evaluate, repl};

#[derive(Debug, Parser)]
#[command(author, version, about = "An interactive shell for binary decision diagrams")]
struct Cli {
    /// Script to execute instead of starting the interactive shell.
    #[arg(long, value_name = "PATH")]
    source: Option<String>,

    /// Log engine internals.
    #[arg(long)]
    verbose: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Cli::parse();

    simplelog::TermLogger::init(
        if args.verbose {
            simplelog::LevelFilter::Debug
        } else {
            simplelog::LevelFilter::Warn
        },
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut interp = Interp::new();
    match args.source {
        Some(path) => evaluate(&format!("source {};", path), &mut interp),
        None => repl(&mut interp)?,
    }
    Ok(())
}
