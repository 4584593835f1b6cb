use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Layout;

mod build;
mod commands;
mod config;

#[derive(Parser)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: MdcatalogCommand,
}

#[derive(Parser)]
struct InitArgs {
    /// The path to initialize the project in
    path: PathBuf,

    /// Whether to create the directory if it doesn't exist
    #[arg(short, long, default_value = "false")]
    create: bool,
}

#[derive(Parser)]
struct BuildArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "mdcatalog.yaml")]
    config_file: Option<PathBuf>,

    /// Override the input markdown document from the config
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Override the output directory from the config
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Override the page layout from the config
    #[arg(short, long, value_enum)]
    layout: Option<Layout>,
}

#[derive(Parser)]
struct CheckArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = "mdcatalog.yaml")]
    config_file: Option<PathBuf>,

    /// Override the input markdown document from the config
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum MdcatalogCommand {
    /// Initialize a new mdcatalog project
    Init(InitArgs),

    /// Parse the catalog document and generate the HTML pages
    Build(BuildArgs),

    /// Parse the catalog document and report records without writing
    Check(CheckArgs),
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        MdcatalogCommand::Init(args) => {
            commands::init::run(&args)?;
        }
        MdcatalogCommand::Build(args) => {
            commands::build::run(&args)?;
        }
        MdcatalogCommand::Check(args) => {
            commands::check::run(&args)?;
        }
    }

    Ok(())
}
