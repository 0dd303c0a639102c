use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use inspect::inspect;
use mine::mine;

mod inspect;
mod loader;
mod mine;

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the GNP miner against a dataset and write rules + witnesses
    Mine {
        /// Dataset CSV file (`T, X, Attr0, Attr1, ...` columns)
        #[arg(short, long)]
        data: PathBuf,

        /// OPTIONAL mining parameter record (JSON); defaults used if absent
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Directory to write `summary.tsv` and `witnesses/` into
        #[arg(short, long)]
        out: PathBuf,
    },
    /// Print a mining parameter record as a table
    Inspect {
        /// Mining parameter record (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

fn main() -> Result<()> {
    let args = Args::parse();
    match args.command {
        Command::Mine { data, config, out } => mine(&data, config.as_deref(), &out),
        Command::Inspect { config } => inspect(&config),
    }
}
