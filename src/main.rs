//! CLI entry point for folio

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::{commands, server};
use folio::timer::{
    parse_field, ReaderConfig, BPM_FALLBACK, CHUNK_FALLBACK, DEFAULT_BPM, DEFAULT_CHUNK_SIZE,
    DEFAULT_MINUTES, DEFAULT_SECONDS, DEFAULT_WPM, WPM_FALLBACK,
};
use folio::Folio;

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Build tooling and timing widgets for a markdown blog", long_about = None)]
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
    /// Build the article manifest and publish the articles
    #[command(alias = "g")]
    Generate {
        /// Regenerate when sources change
        #[arg(short, long)]
        watch: bool,
    },

    /// Prepare the built app for static hosting
    Postbuild,

    /// Remove generated article data
    Clean,

    /// List published articles
    List {
        /// Page number, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show one article
    Show {
        /// Article id (file name without .md)
        id: String,

        /// Print HTML instead of text
        #[arg(long)]
        html: bool,
    },

    /// Show the about page
    About,

    /// Serve the built site locally
    #[command(alias = "s")]
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "4000")]
        port: u16,

        /// IP address to bind to
        #[arg(short, long, default_value = "localhost")]
        ip: String,

        /// Regenerate articles when sources change
        #[arg(short, long)]
        watch: bool,
    },

    /// List the timing tools
    Tools,

    /// Speed-read a file, or stdin with `-`
    Read {
        source: String,

        /// Words per minute
        #[arg(long)]
        wpm: Option<String>,

        /// Words shown at once
        #[arg(long)]
        chunk: Option<String>,
    },

    /// Run the metronome
    Metronome {
        /// Beats per minute
        #[arg(long)]
        bpm: Option<String>,

        /// Stop after this many beats
        #[arg(long)]
        beats: Option<u64>,

        /// Ring on every beat
        #[arg(long)]
        sound: bool,
    },

    /// Run a countdown
    Timer {
        #[arg(short, long)]
        minutes: Option<String>,

        #[arg(short, long)]
        seconds: Option<String>,

        /// Ring when time is up
        #[arg(long)]
        sound: bool,
    },

    /// Display version information
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
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
        None => std::env::current_dir().context("Failed to read the current directory")?,
    };

    match cli.command {
        Commands::Generate { watch } => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Generating article manifest...");
            let report = folio.generate()?;
            println!(
                "Generated {} articles -> {}",
                report.articles,
                report.manifest_path.display()
            );

            if watch {
                commands::generate::watch(&folio, |report| {
                    println!("Regenerated {} articles", report.articles);
                })?;
            }
        }

        Commands::Postbuild => {
            let folio = Folio::new(&base_dir)?;
            folio.postbuild()?;
            println!("Prepared {} for static hosting", folio.build_dir.display());
        }

        Commands::Clean => {
            let folio = Folio::new(&base_dir)?;
            tracing::info!("Cleaning generated articles...");
            folio.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::List { page } => {
            let folio = Folio::new(&base_dir)?;
            commands::list::run(&folio, page).await?;
        }

        Commands::Show { id, html } => {
            let folio = Folio::new(&base_dir)?;
            commands::show::run(&folio, &id, html).await?;
        }

        Commands::About => {
            let folio = Folio::new(&base_dir)?;
            commands::about::run(&folio)?;
        }

        Commands::Serve { port, ip, watch } => {
            let folio = Folio::new(&base_dir)?;

            // Generate first
            tracing::info!("Generating article manifest...");
            folio.generate()?;

            tracing::info!("Starting server at http://{}:{}", ip, port);
            server::start(&folio, &ip, port, watch).await?;
        }

        Commands::Tools => commands::tools::list(),

        Commands::Read { source, wpm, chunk } => {
            let config = ReaderConfig {
                wpm: parse_field(wpm.as_deref(), DEFAULT_WPM, WPM_FALLBACK),
                chunk_size: parse_field(chunk.as_deref(), DEFAULT_CHUNK_SIZE, CHUNK_FALLBACK),
            };
            commands::tools::read(&source, config).await?;
        }

        Commands::Metronome { bpm, beats, sound } => {
            let bpm = parse_field(bpm.as_deref(), DEFAULT_BPM, BPM_FALLBACK);
            commands::tools::metronome(bpm, beats, sound).await?;
        }

        Commands::Timer {
            minutes,
            seconds,
            sound,
        } => {
            // An explicit 0 is meaningful here, so only absent fields fall back
            let minutes = parse_field(minutes.as_deref(), DEFAULT_MINUTES, 0);
            let seconds = parse_field(seconds.as_deref(), DEFAULT_SECONDS, 0);
            commands::tools::timer(minutes, seconds, sound).await?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
