use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;
mod config;
mod content;
mod locale;
mod mapper;
mod render;
mod resolve;
mod server;
mod util;

#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// The command to execute
    #[command(subcommand)]
    command: ControllerCommand,
}

#[derive(Parser)]
struct ServeArgs {
    /// The path to an optional YAML configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Parser)]
struct RenderArgs {
    /// Bulletin document as returned by the content API
    #[arg(short, long)]
    bulletin: PathBuf,

    /// Breadcrumb trail as returned by the content API
    #[arg(long)]
    breadcrumb: Option<PathBuf>,

    /// Language to render the page in
    #[arg(short, long, default_value = "en")]
    lang: String,

    /// Template to render, without the `.html` extension
    #[arg(short, long, default_value = "bulletin")]
    template: String,

    /// The path to an optional YAML configuration file
    #[arg(short, long)]
    config_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum ControllerCommand {
    /// Serve bulletin pages over HTTP
    Serve(ServeArgs),

    /// Render a bulletin document from disk to stdout
    Render(RenderArgs),
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        ControllerCommand::Serve(args) => {
            commands::serve::run(&args).await?;
        }
        ControllerCommand::Render(args) => {
            commands::render::run(&args).await?;
        }
    }

    Ok(())
}
