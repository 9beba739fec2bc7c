use anyhow::{Context, Result};
use comvestscraper::{
    fetch::HttpSession,
    survey::{run_all, topics},
};
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Written to the working directory once every topic has been mined.
const OUTPUT_FILE: &str = "Dados_ComvestUnicamp.xls";

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) open browser session ─────────────────────────────────────
    // the session is dropped (closed) on every exit path below
    let mut session = HttpSession::new().context("opening browser session")?;

    // ─── 3) mine every topic, then write the workbook ────────────────
    let out = Path::new(OUTPUT_FILE);
    let sheets = run_all(&mut session, &topics::ALL, out)
        .with_context(|| format!("building {}", out.display()))?;

    info!(sheets = sheets.len(), "all done");
    Ok(())
}
