use crate::Commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "circle")]
#[command(about = "Circle maintenance CLI for the live event and camera streams")]
#[command(version)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}
