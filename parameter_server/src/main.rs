use std::io;

use comms::specs::ServerSpec;
use log::info;
use parameter_server::{ServerBuilder, ServerConfig};
use tokio::{fs, net::TcpListener, signal};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let config = ServerConfig::from_env()?;
    let json = fs::read_to_string(&config.spec_path).await?;
    let spec = ServerSpec::from_json(&json)?;
    info!(
        variables = spec.variables.len();
        "loaded server spec from {}", config.spec_path.display()
    );

    let pserver = ServerBuilder::new()
        .build(&spec)?
        .with_max_payload_bytes(config.max_payload_bytes);

    let listener = TcpListener::bind(&config.addr).await?;
    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();

    tokio::spawn(async move {
        if signal::ctrl_c().await.is_ok() {
            info!("received SIGINT, shutting down");
        }
        shutdown.cancel();
    });

    pserver.serve(listener, cancel).await
}
