use std::{path::PathBuf, sync::Arc};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{ClientConfig, Notification, PagesClient, ReqwestTransport};
use serde_json::Value;
use shared::domain::Page;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

#[derive(Parser, Debug)]
#[command(about = "Manage the pages of a content backend")]
struct Args {
    /// Backend API root, e.g. http://localhost:4000/_api
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    List,
    Get {
        id: String,
    },
    Delete {
        id: String,
    },
    /// Create a page (no --id) or update one.
    Put {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        path: Option<String>,
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Front matter field as key=value; values that parse as JSON keep their type.
        #[arg(long = "meta", value_parser = parse_meta)]
        meta: Vec<(String, Value)>,
    },
}

fn parse_meta(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty front matter key in '{raw}'"));
    }
    let value =
        serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_url = api_url;
    }
    info!(api_url = %settings.api_url, "pages: using backend");

    let transport = match settings.request_timeout {
        Some(timeout) => ReqwestTransport::with_timeout(timeout)?,
        None => ReqwestTransport::new(),
    };
    let config = ClientConfig::new(&settings.api_url, Arc::new(transport))?;

    let (tx, rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_notifications(rx));
    let client = PagesClient::new(config, Arc::new(tx));

    match args.command {
        Command::List => client.fetch_pages().await,
        Command::Get { id } => client.fetch_page(&id).await,
        Command::Delete { id } => client.delete_page(&id).await,
        Command::Put {
            id,
            name,
            path,
            content_file,
            meta,
        } => {
            let content = match content_file {
                Some(file) => tokio::fs::read_to_string(&file)
                    .await
                    .with_context(|| format!("failed to read '{}'", file.display()))?,
                None => String::new(),
            };
            let mut snapshot = Page {
                name,
                path,
                content,
                ..Page::default()
            };
            snapshot.metadata.extend(meta);
            client.put_page(&snapshot, id.as_deref()).await;
        }
    }

    // Dropping the client closes the channel so the printer can finish.
    drop(client);
    let failed = printer.await?;
    if failed {
        return Err(anyhow!("request did not succeed"));
    }
    Ok(())
}

/// Writes each notification as one JSON line; returns whether any was a failure.
async fn print_notifications(mut rx: mpsc::UnboundedReceiver<Notification>) -> bool {
    let mut failed = false;
    while let Some(notification) = rx.recv().await {
        failed |= notification.kind().is_failure();
        match serde_json::to_string(&notification) {
            Ok(line) => println!("{line}"),
            Err(err) => eprintln!("failed to encode {}: {err}", notification.kind()),
        }
    }
    failed
}
