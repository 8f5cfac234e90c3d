//! CLI entry point for the downloadstation tool.

use anyhow::{Context, Result, bail};
use clap::Parser;
use downloadstation_core::{
    ApiResponse, ClientConfig, DownloadStation, Params, TaskQuery, TorrentSource,
};
use tracing::{debug, info};

mod app_config;
mod cli;

use app_config::FileConfig;
use cli::{Args, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(command = ?args.command, "CLI arguments parsed");

    let file_config = app_config::load_config(args.config.as_deref())?.unwrap_or_default();
    let mut station = connect(&args, &file_config)?;

    let response = run_command(&mut station, args.command).await?;
    println!("{}", serde_json::to_string_pretty(response.as_map())?);
    Ok(())
}

fn connect(args: &Args, file_config: &FileConfig) -> Result<DownloadStation> {
    let Some(host) = args.host.clone().or_else(|| file_config.host.clone()) else {
        bail!("No host configured. Pass --host or set `host` in the config file.");
    };
    let username = args
        .username
        .clone()
        .or_else(|| file_config.username.clone())
        .unwrap_or_default();
    let password = args
        .password
        .clone()
        .or_else(|| file_config.password.clone())
        .unwrap_or_default();

    let scheme = if args.https {
        "https"
    } else {
        file_config.scheme.as_deref().unwrap_or("http")
    };
    let mut config = ClientConfig::new().with_scheme(scheme);
    if let Some(secs) = file_config.connect_timeout_secs {
        config = config.with_connect_timeout_secs(secs);
    }
    if let Some(secs) = file_config.read_timeout_secs {
        config = config.with_read_timeout_secs(secs);
    }

    info!(host = %host, scheme, "Connecting to Download Station");
    DownloadStation::with_config(host, username, password, config)
        .context("Failed to create Download Station client")
}

async fn run_command(station: &mut DownloadStation, command: Command) -> Result<ApiResponse> {
    let response = match command {
        Command::Login => {
            let sid = station.authenticate().await?.to_string();
            ApiResponse::from(serde_json::Map::from_iter([(
                "sid".to_string(),
                serde_json::Value::String(sid),
            )]))
        }
        Command::Logout => station.misc_logout(Params::new()).await?,
        Command::Tasks {
            field,
            descending,
            limit,
            from,
        } => {
            let mut query = TaskQuery::new().with_limit(limit);
            if let Some(from) = from {
                query = query.with_from(from);
            }
            if let Some(field) = field {
                query = query.sorted_by(field, !descending);
            }
            station.task_query(&query, Params::new()).await?
        }
        Command::AddUrl {
            url,
            move_path,
            temp_path,
        } => {
            station
                .task_add_url(&url, &move_path, temp_path.as_deref(), Params::new())
                .await?
        }
        Command::AddTorrent {
            file,
            move_path,
            temp_path,
        } => {
            station
                .task_add_torrent(
                    TorrentSource::path(file),
                    &move_path,
                    temp_path.as_deref(),
                    Params::new(),
                )
                .await?
        }
        Command::Start { hash } => station.task_start(&hash, Params::new()).await?,
        Command::Stop { hash } => station.task_stop(&hash, Params::new()).await?,
        Command::Pause { hash } => station.task_pause(&hash, Params::new()).await?,
        Command::Remove { hash } => station.task_remove(&hash, Params::new()).await?,
        Command::Call {
            group,
            action,
            params,
        } => {
            station
                .call_endpoint(&group, &action, params.into_iter().collect())
                .await?
        }
    };
    Ok(response)
}
