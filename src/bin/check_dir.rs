use anyhow::{bail, Result};
use csvgate::{
    schema::DEFAULT_SCHEMA,
    session::{Phase, Session},
};
use glob::glob;
use std::path::Path;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Preflight every CSV under a directory before a bulk upload. One verdict
/// line per file; exits non-zero if any file fails its gate.
#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    let dir = match std::env::args().nth(1) {
        Some(d) => d,
        None => bail!("Usage: check_dir <CSV_DIR>"),
    };
    let dir = Path::new(&dir);
    if !dir.is_dir() {
        bail!("`{}` is not a directory", dir.display());
    }

    let pattern = format!("{}/**/*.csv", dir.display());
    let mut session = Session::new(DEFAULT_SCHEMA.clone());
    let mut checked = 0usize;
    let mut failed = 0usize;

    for entry in glob(&pattern)? {
        let path = match entry {
            Ok(p) => p,
            Err(e) => {
                warn!("cannot read glob entry: {:?}", e);
                continue;
            }
        };

        session.evaluate_file(&path).await?;
        checked += 1;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let line = match session.phase() {
            Phase::ParseFailed { error, .. } => error.message(),
            Phase::Validated { result, .. } => result.summary.clone(),
            Phase::Idle | Phase::Reading { .. } => unreachable!(),
        };
        println!("{:<40} {}", name, line);

        if !session.submit_enabled() {
            failed += 1;
        }
    }

    if checked == 0 {
        warn!("no CSV files under {}", dir.display());
        return Ok(());
    }

    if failed > 0 {
        warn!("{}/{} file(s) need rework", failed, checked);
        std::process::exit(1);
    }
    info!("all {} file(s) ready", checked);
    Ok(())
}
