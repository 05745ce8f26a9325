//! CLI entry point for blog-builder

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-builder")]
#[command(version)]
#[command(about = "Builds a static blog from Markdown posts and Handlebars templates", long_about = None)]
struct Cli {
    /// Set the base directory holding src/ and build/ (defaults to current directory)
    #[arg(short, long, global = true, env = "DIRNAME")]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the build directory and build the site (default)
    #[command(alias = "b")]
    Build,

    /// Delete the build directory
    Clean,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_builder=debug,info"
    } else {
        "blog_builder=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };
    let site = blog_builder::Site::new(&base_dir)?;

    match cli.command.unwrap_or(Commands::Build) {
        Commands::Build => {
            let report = site.build().await?;
            println!(
                "Built {} posts and {} pages into {:?}",
                report.posts, report.pages, site.build_dir
            );
        }

        Commands::Clean => {
            site.clean()?;
            println!("Cleaned successfully!");
        }
    }

    Ok(())
}
