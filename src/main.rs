//! CLI entry point for mdblog

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "mdblog")]
#[command(version)]
#[command(about = "A small Markdown blog with header-block indexing", long_about = None)]
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
    /// Create a new post
    New {
        /// Title of the new post
        title: String,
    },

    /// List indexed posts in landing-page order
    #[command(alias = "ls")]
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Render one article to stdout
    Show {
        /// Link slug, or path fragment in address lookup mode
        identifier: String,
    },

    /// Start the blog server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "mdblog=debug,info"
    } else {
        "mdblog=info"
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
    let blog = mdblog::Blog::new(&base_dir)?;

    match cli.command {
        Commands::New { title } => {
            tracing::info!("Creating new post with title: {}", title);
            blog.new_post(&title)?;
        }

        Commands::List { json } => {
            mdblog::commands::list::run(&blog, json)?;
        }

        Commands::Show { identifier } => {
            mdblog::commands::show::run(&blog, &identifier)?;
        }

        Commands::Serve { port, ip } => {
            tracing::info!("Building content index...");
            let content = blog.initialize()?;
            tracing::info!("Starting server at http://{}:{}", ip, port);
            mdblog::server::start(content, &ip, port).await?;
        }
    }

    Ok(())
}
