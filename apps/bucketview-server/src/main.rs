//! BucketView Server - lists the first-level contents of one S3 bucket.
//!
//! Serves `GET /list-bucket-content/{path}` on top of `bucketview-http`,
//! with the listing itself done by `bucketview-core` against S3 (or any
//! S3-compatible endpoint).
//!
//! # Usage
//!
//! ```text
//! BUCKET_NAME=my-bucket GATEWAY_LISTEN=0.0.0.0:5000 bucketview-server
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `GATEWAY_LISTEN` | `0.0.0.0:5000` | Bind address |
//! | `BUCKET_NAME` | `python-app-terraform` | Bucket to list |
//! | `AWS_REGION` / `DEFAULT_REGION` | *(SDK chain)* | Region override |
//! | `S3_ENDPOINT_URL` | *(unset)* | Custom S3-compatible endpoint |
//! | `S3_FORCE_PATH_STYLE` | `false` | Path-style bucket addressing |
//! | `UPSTREAM_TIMEOUT_MS` | `10000` | Per-call upstream timeout |
//! | `UPSTREAM_CONNECT_TIMEOUT_MS` | `3000` | Upstream connect timeout |
//! | `UPSTREAM_MAX_ATTEMPTS` | `1` | Upstream attempts per call |
//! | `LISTING_MODE` | `raw` | `raw` keeps duplicate entries, `unique` drops them |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `LOG_FORMAT` | `text` | `text` or `json` |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |
//!
//! Credentials come from the standard AWS provider chain.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as HttpConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use bucketview_core::{BucketViewConfig, BucketViewHandler, LogFormat, S3ObjectStore};
use bucketview_http::dispatch::ListingHandler;
use bucketview_http::service::{BucketViewHttpConfig, BucketViewHttpService};

/// Server version reported at startup.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(config: &BucketViewConfig) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("invalid log level filter: {}", config.log_level))?
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match config.log_format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }

    Ok(())
}

/// Build the [`BucketViewHttpConfig`] from the application config.
fn build_http_config(config: &BucketViewConfig) -> BucketViewHttpConfig {
    BucketViewHttpConfig {
        bucket: config.bucket_name.clone(),
        ..BucketViewHttpConfig::default()
    }
}

/// Address the health check connects to; wildcard binds are probed on the
/// loopback address of the same family.
fn health_check_addr(gateway_listen: &str) -> String {
    let Ok(mut addr) = gateway_listen.parse::<SocketAddr>() else {
        return gateway_listen.to_owned();
    };

    if addr.ip().is_unspecified() {
        let loopback: IpAddr = match addr {
            SocketAddr::V4(_) => Ipv4Addr::LOCALHOST.into(),
            SocketAddr::V6(_) => Ipv6Addr::LOCALHOST.into(),
        };
        addr.set_ip(loopback);
    }

    addr.to_string()
}

/// Whether a raw HTTP response reports a running service.
fn is_healthy_response(response: &str) -> bool {
    response.contains("200 OK") && response.contains("\"status\":\"running\"")
}

/// Run the accept loop, serving connections until a shutdown signal is received.
async fn serve<H: ListingHandler>(
    listener: TcpListener,
    service: BucketViewHttpService<H>,
) -> Result<()> {
    let graceful = hyper_util::server::graceful::GracefulShutdown::new();
    let http = HttpConnBuilder::new(TokioExecutor::new());

    let shutdown = async {
        tokio::signal::ctrl_c().await.ok();
        info!("received shutdown signal, draining connections");
    };

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            result = listener.accept() => {
                let (stream, peer_addr) = match result {
                    Ok(conn) => conn,
                    Err(e) => {
                        warn!(error = %e, "failed to accept connection");
                        continue;
                    }
                };

                let svc = service.clone();
                let conn = http.serve_connection(TokioIo::new(stream), svc);
                let conn = graceful.watch(conn.into_owned());

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        error!(peer_addr = %peer_addr, error = %e, "connection error");
                    }
                });
            }

            () = &mut shutdown => {
                info!("shutting down gracefully");
                break;
            }
        }
    }

    graceful.shutdown().await;
    info!("all connections drained, exiting");

    Ok(())
}

/// Request `GET /health` from a running server.
///
/// Succeeds only on a `200 OK` whose body reports `running`.
async fn run_health_check(addr: &str) -> Result<()> {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    let stream = TcpStream::connect(addr)
        .await
        .with_context(|| format!("cannot connect to {addr}"))?;

    let (mut reader, mut writer) = stream.into_split();

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    writer.write_all(request.as_bytes()).await?;
    writer.shutdown().await?;

    let mut response = String::new();
    reader.read_to_string(&mut response).await?;

    if is_healthy_response(&response) {
        Ok(())
    } else {
        anyhow::bail!("unhealthy response from {addr}")
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Handle --health-check flag for Docker HEALTHCHECK.
    if std::env::args().any(|a| a == "--health-check") {
        let config = BucketViewConfig::from_env();
        let healthy = run_health_check(&health_check_addr(&config.gateway_listen))
            .await
            .is_ok();
        std::process::exit(i32::from(!healthy));
    }

    let config = BucketViewConfig::from_env();

    init_tracing(&config)?;

    info!(
        gateway_listen = %config.gateway_listen,
        bucket = %config.bucket_name,
        listing_mode = ?config.listing_mode,
        upstream_timeout_ms = config.upstream_timeout_ms,
        version = VERSION,
        "starting BucketView Server",
    );

    let store = S3ObjectStore::from_config(&config).await;
    let handler = Arc::new(BucketViewHandler::new(Arc::new(store), config.listing_mode));
    let service = BucketViewHttpService::new(handler, build_http_config(&config));

    let addr: SocketAddr = config
        .gateway_listen
        .parse()
        .with_context(|| format!("invalid bind address: {}", config.gateway_listen))?;

    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(%addr, "listening for connections");

    serve(listener, service).await
}
