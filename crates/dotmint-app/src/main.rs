//! DotMint command-line entry point.

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotmint_app::{App, AppConfig};
use std::path::PathBuf;

/// Pixel-art canvas tools: replay sessions, render share links, sample images
#[derive(Parser, Debug)]
#[command(name = "dotmint")]
#[command(version)]
struct Args {
    /// JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Origin used for share links
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a JSON script of editing actions
    Replay {
        script: PathBuf,
        /// Output PNG
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Keep grid lines in the PNG
        #[arg(long)]
        grid: bool,
    },
    /// Render a share link or token to PNG
    Render {
        link: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        grid: bool,
    },
    /// Sample an image into a 30x30 drawing
    Sample {
        image: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        grid: bool,
    },
    /// Print the share link for a snapshot JSON file
    Share { snapshot: PathBuf },
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("Starting DotMint");

    let mut config = match &args.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if let Some(base_url) = args.base_url {
        config.base_url = base_url;
    }

    match args.command {
        Command::Replay { script, output, grid } => {
            config.output = output.unwrap_or(config.output);
            let link = App::new(config).replay(&script, grid)?;
            println!("{link}");
        }
        Command::Render { link, output, grid } => {
            config.output = output.unwrap_or(config.output);
            App::new(config).render(&link, grid)?;
        }
        Command::Sample { image, output, grid } => {
            config.output = output.unwrap_or(config.output);
            let link = App::new(config).sample(&image, grid)?;
            println!("{link}");
        }
        Command::Share { snapshot } => {
            println!("{}", App::new(config).share(&snapshot)?);
        }
    }
    Ok(())
}
