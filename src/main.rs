use anyhow::{bail, Result};
use csvgate::{
    preview::{self, Preview},
    schema::{load_schema, DEFAULT_SCHEMA},
    session::{Phase, Session},
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

struct Args {
    file: PathBuf,
    schema_path: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut file = None;
    let mut schema_path = None;
    let mut json = false;

    let mut argv = std::env::args().skip(1);
    while let Some(arg) = argv.next() {
        if arg == "--schema" {
            match argv.next() {
                Some(p) => schema_path = Some(PathBuf::from(p)),
                None => bail!("--schema needs a path"),
            }
        } else if arg == "--json" {
            json = true;
        } else if file.is_none() {
            file = Some(PathBuf::from(arg));
        } else {
            bail!("unexpected argument `{}`", arg);
        }
    }

    match file {
        Some(file) => Ok(Args {
            file,
            schema_path,
            json,
        }),
        None => bail!("Usage: csvgate [--schema <schema.yaml>] [--json] <file.csv>"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();

    let args = parse_args()?;

    // ─── 2) resolve the upload schema ────────────────────────────────
    let schema = match &args.schema_path {
        Some(path) => load_schema(path)?,
        None => DEFAULT_SCHEMA.clone(),
    };
    info!(
        "checking {} against columns [{}]",
        args.file.display(),
        schema.required().join(", ")
    );

    // ─── 3) evaluate the file ────────────────────────────────────────
    let mut session = Session::new(schema);
    session.evaluate_file(&args.file).await?;

    // ─── 4) report ───────────────────────────────────────────────────
    match session.phase() {
        Phase::ParseFailed { error, .. } => {
            if args.json {
                let doc = serde_json::json!({
                    "ok": false,
                    "error": error,
                    "message": error.message(),
                });
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                println!("{}", error.message());
            }
        }
        Phase::Validated { table, result, .. } => {
            if args.json {
                println!("{}", serde_json::to_string_pretty(result)?);
            } else {
                let rendered = preview::render(&Preview::of(table));
                if !rendered.is_empty() {
                    println!("{}", rendered);
                }
                println!("{}", result.summary);
                for issue in &result.issues {
                    println!(
                        "  line {:>4}  {:<18}  {}",
                        issue.line,
                        issue.kind.as_str(),
                        issue.detail
                    );
                }
            }
        }
        // evaluate_file always leaves a terminal phase behind
        Phase::Idle | Phase::Reading { .. } => unreachable!(),
    }

    if !session.submit_enabled() {
        std::process::exit(1);
    }
    info!("file is ready to submit");
    Ok(())
}
