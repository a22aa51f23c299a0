//! Headless worker binary: connects to a coordinator and works jobs until
//! interrupted.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use cracklet::{CRACKLET_VERSION, ClientConfig, EngineEvent, WorkerClient};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("CRACKLET_LOG").unwrap_or_else(|_| EnvFilter::new("info"));
    let use_json = std::env::var("LOG_FORMAT").as_deref() == Ok("json");

    if use_json {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr));
        let _ = subscriber.try_init();
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr));
        let _ = subscriber.try_init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--version") {
        println!("cracklet {CRACKLET_VERSION}");
        return Ok(());
    }

    init_tracing();

    let host = arg
        .or_else(|| std::env::var("CRACKLET_HOST").ok())
        .context("usage: cracklet <host:port> (or set CRACKLET_HOST)")?;

    let (client, mut events) = WorkerClient::new(ClientConfig::default());

    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            match event {
                EngineEvent::ServerLog(line) => {
                    tracing::info!(target: "cracklet::server", "{}", line);
                }
                EngineEvent::HashComplete(line) => {
                    tracing::info!(target: "cracklet::server", "Hash complete: {}", line);
                }
            }
        }
    });

    if !client.connect(&host).await {
        anyhow::bail!("could not connect to {host}");
    }

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for ctrl-c")?;
    client.disconnect().await;
    Ok(())
}
