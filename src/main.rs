use clap::Parser;
use env_logger::Builder;
use human_panic::setup_panic;
use keggkit_cli::{
    commands::{Cli, Command},
    conv::conv,
    get::get,
    parse::parse,
    reactions::reactions,
};

fn main() -> anyhow::Result<()> {
    setup_panic!();

    let cli = Cli::parse();

    let mut builder = Builder::new();
    builder
        .filter(None, cli.verbose.log_level_filter())
        .init();
    match &cli.command {
        Command::Get { .. } => get(&cli.command)?,
        Command::Parse { .. } => parse(&cli.command)?,
        Command::Reactions { .. } => reactions(&cli.command)?,
        Command::Conv { .. } => conv(&cli.command)?,
    }
    Ok(())
}
