use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use serde_json::Value;

use cad_macro_utils::commands::{self, Command, Host};
use cad_macro_utils::console::TerminalConsole;
use cad_macro_utils::dialog::TerminalDialogs;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, short = 'j', global = true)]
    json: bool,

    /// Show debug diagnostics on stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    TerminalConsole::new(level).install()?;

    let console = TerminalConsole::new(level);
    let mut dialogs = TerminalDialogs::new();
    let mut host = Host {
        console: &console,
        dialogs: &mut dialogs,
    };

    let result = commands::execute(cli.command, &mut host)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result {
        Value::Null => {}
        Value::String(text) => println!("{}", text),
        other => println!("{}", other),
    }

    Ok(())
}
