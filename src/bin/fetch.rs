//! Fetches one document and writes the raw response to stdout.
//!
//! Reads `FETCH_URL` (e.g. `http://localhost:6789/index.html`), or else
//! `FETCH_HOST`, `FETCH_PORT` and `FETCH_TARGET`, falling back to
//! `localhost`, `6789` and `index.html`.

use anyhow::Context;
use tokio::io::AsyncWriteExt;

const DEFAULT_HOST: &str = "localhost";
const DEFAULT_PORT: u16 = 6789;
const DEFAULT_TARGET: &str = "index.html";

struct FetchArgs {
    host: String,
    port: u16,
    target: String,
}

impl FetchArgs {
    fn from_env() -> anyhow::Result<Self> {
        if let Ok(raw) = std::env::var("FETCH_URL") {
            let url = url::Url::parse(&raw).context("Invalid FETCH_URL")?;
            let host = url.host_str().context("FETCH_URL missing host")?;
            let mut target = url.path().to_string();
            if let Some(query) = url.query() {
                target.push('?');
                target.push_str(query);
            }
            return Ok(Self {
                host: host.to_string(),
                port: url.port_or_known_default().unwrap_or(DEFAULT_PORT),
                target,
            });
        }

        let port = match std::env::var("FETCH_PORT") {
            Ok(p) => p.parse().context("Invalid FETCH_PORT")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host: std::env::var("FETCH_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            target: std::env::var("FETCH_TARGET").unwrap_or_else(|_| DEFAULT_TARGET.to_string()),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();

    let args = FetchArgs::from_env()?;
    tracing::info!(host = %args.host, port = args.port, path = %args.target, "Fetching");

    let response = docserve::client::fetch(&args.host, args.port, &args.target)
        .await
        .with_context(|| format!("fetching {} from {}:{}", args.target, args.host, args.port))?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(&response).await?;
    stdout.flush().await?;

    Ok(())
}
