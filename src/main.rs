//! kaulmate - a rate-limited Twitch chat bot.

use kaulmate::clock::MonotonicClock;
use kaulmate::config::{Config, resolve_profile};
use kaulmate::handlers::Registry;
use kaulmate::transport::Transport;
use kaulmate::transport::irc::{IrcOptions, IrcTransport};
use kaulmate::{Dispatcher, Session, telemetry};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    telemetry::init();

    let Some(profile) = std::env::args().nth(1) else {
        error!("Usage: {} <profile>", kaulmate::NAME);
        anyhow::bail!("no profile given");
    };

    // Load configuration
    let dir = resolve_profile(&profile).map_err(|e| {
        error!(%profile, error = %e, "Failed to find profile");
        e
    })?;
    let settings = Config::load_profile(&dir)
        .and_then(|config| config.into_settings(&dir))
        .map_err(|e| {
            error!(profile = %dir.display(), error = %e, "Failed to load config");
            e
        })?;

    info!(
        version = kaulmate::VERSION,
        channel = %settings.channel,
        nick = %settings.nick,
        "Starting {}",
        kaulmate::NAME
    );

    let options = IrcOptions {
        host: settings.host.clone(),
        port: settings.port,
        nick: settings.nick.clone(),
        pass: settings.pass.clone(),
    };
    let (transport, mut events) = IrcTransport::connect(&options).await.map_err(|e| {
        error!(host = %options.host, port = options.port, error = %e, "Could not connect");
        e
    })?;

    let session = Session::new(&settings, transport.clone(), Arc::new(MonotonicClock));
    let registry = Registry::standard(&session);
    let mut dispatcher = Dispatcher::new(registry, session);

    let shutdown = CancellationToken::new();
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Could not listen for Ctrl-C");
                return;
            }
            info!("Received Ctrl-C");
            shutdown.cancel();
        });
    }

    dispatcher.run(&mut events, &shutdown).await;

    if !transport.is_closed()
        && let Err(e) = transport.quit(None).await
    {
        warn!(error = %e, "Could not quit cleanly");
    }

    for (token, count) in dispatcher.registry().command_stats() {
        if count > 0 {
            info!(%token, count, "Command usage");
        }
    }
    info!("Good bye");
    Ok(())
}
