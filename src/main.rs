use anyhow::Context;
use lantern::config::Config;
use lantern::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let mut cfg = Config::load()?;

    // A port given on the command line wins over the environment
    if let Some(port) = std::env::args().nth(1) {
        cfg.server.port = port
            .parse()
            .with_context(|| format!("invalid port argument {port:?}"))?;
    }

    tokio::select! {
        res = server::listener::run(&cfg) => {
            if let Err(e) = &res {
                tracing::error!("Error on start server at port {}: {:#}", cfg.server.port, e);
            }
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
