//! deezer-discovery - browse Deezer's artist charts with a local dev proxy
//!
//! `serve` runs the proxy/static server; the other subcommands query the
//! artist repository once and print JSON.

mod api;
mod clients;
mod config;
mod core;
mod error;
mod models;
mod server;
mod stores;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::clients::LastFmClient;
use crate::config::{AppConfig, ProxyMode};
use crate::core::ArtistRepository;

/// Deezer artist discovery
#[derive(Parser, Debug)]
#[command(name = "deezer-discovery")]
#[command(version)]
#[command(about = "Browse Deezer's artist charts and run the discovery dev server")]
struct Args {
    /// Settings file (defaults to settings.json in the config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the dev proxy and static file server
    Serve {
        /// Proxy flavour
        #[arg(long, value_enum)]
        mode: Option<ProxyMode>,

        /// Port to listen on (overrides PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Built application directory
        #[arg(long)]
        dist: Option<PathBuf>,
    },

    /// Print the current top artists
    Top {
        #[arg(long)]
        count: Option<usize>,
    },

    /// Search artists by name
    Search { query: String },

    /// Print one artist with albums
    Artist { id: String },

    /// Print an artist's albums
    Albums { id: String },

    /// Print the Last.fm top artists chart
    LastfmTop {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(format!("{},hyper=warn", log_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    let mut config = AppConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Serve { mode, port, dist } => {
            let mode = mode.unwrap_or(config.proxy.mode);
            if let Some(port) = port {
                config.proxy.port = Some(port);
            }
            if let Some(dist) = dist {
                config.proxy.dist_dir = dist;
            }

            info!("deezer-discovery v{} starting...", env!("CARGO_PKG_VERSION"));
            server::run(config, mode).await
        }
        Command::Top { count } => {
            let repo = ArtistRepository::from_config(&config)?;
            let count = count.unwrap_or(config.top_artists_count);
            print_json(&repo.get_top_artists(count).await)
        }
        Command::Search { query } => {
            let repo = ArtistRepository::from_config(&config)?;
            print_json(&repo.search_artists(&query).await)
        }
        Command::Artist { id } => {
            let repo = ArtistRepository::from_config(&config)?;
            match repo.get_artist_by_id(&id).await {
                Some(artist) => print_json(&artist),
                None => anyhow::bail!("Artist {} not found", id),
            }
        }
        Command::Albums { id } => {
            let repo = ArtistRepository::from_config(&config)?;
            print_json(&repo.get_artist_albums(&id).await)
        }
        Command::LastfmTop { limit } => {
            let lastfm = LastFmClient::from_config(&config)?;
            print_json(&lastfm.top_artists(limit).await?)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
