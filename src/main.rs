//! CLI entry point for postdeck

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "postdeck")]
#[command(version)]
#[command(about = "Read a manifest-driven markdown blog from the terminal or a browser", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List posts, newest first
    #[command(alias = "ls")]
    List,

    /// Show a post
    Show {
        /// Slug of the post
        slug: String,

        /// Print the body as HTML
        #[arg(long)]
        html: bool,
    },

    /// Print a post's table of contents
    Toc {
        /// Slug of the post
        slug: String,
    },

    /// Browse posts interactively
    #[command(alias = "b")]
    Browse,

    /// Check the manifest against the posts directory
    Check,

    /// Start the preview server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Open browser automatically
        #[arg(short, long)]
        open: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "postdeck=debug,info"
    } else {
        "postdeck=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };
    let blog = postdeck::Blog::new(&base_dir)?;

    match cli.command {
        Commands::List => postdeck::commands::list::run(&blog).await?,

        Commands::Show { slug, html } => postdeck::commands::show::run(&blog, &slug, html).await?,

        Commands::Toc { slug } => postdeck::commands::toc::run(&blog, &slug).await?,

        Commands::Browse => postdeck::commands::browse::run(&blog).await?,

        Commands::Check => postdeck::commands::check::run(&blog)?,

        Commands::Serve { port, ip, open } => {
            tracing::info!("Starting server at http://{}:{}", ip, port);
            postdeck::server::start(&blog, &ip, port, open).await?;
        }
    }

    Ok(())
}
