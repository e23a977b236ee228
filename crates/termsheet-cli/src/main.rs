use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use termsheet_bench::HistoricalDeal;
use termsheet_ingest::{MediaType, ProcessedResult, process_document};

mod display;
mod report;

#[derive(Parser)]
#[command(name = "termsheet")]
#[command(about = "Term sheet ingestion, extraction and analysis")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract structured fields from a document and validate them.
    Process {
        file: PathBuf,
        /// Declared media type; inferred from the file extension when omitted.
        #[arg(long)]
        media_type: Option<String>,
        /// Owner stamped into the store payload.
        #[arg(long, env = "TERMSHEET_USER", default_value = "local")]
        user: String,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Process a document, then run clause analysis plus the optional
    /// integrity and benchmark layers.
    Analyze {
        file: PathBuf,
        #[arg(long)]
        media_type: Option<String>,
        /// JSON file holding the historical deal corpus.
        #[arg(long)]
        corpus: Option<PathBuf>,
        /// Industry tag used to filter comparable deals.
        #[arg(long, default_value = "technology")]
        industry: String,
        /// Expected content digest; enables modification detection.
        #[arg(long)]
        expected_digest: Option<String>,
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the SHA-256 content digest of a file.
    Digest { file: PathBuf },
    /// Encrypt a file under a passphrase.
    Seal {
        file: PathBuf,
        #[arg(long, env = "TERMSHEET_PASSPHRASE")]
        passphrase: String,
        /// Output path; defaults to `<file>.sealed`.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Decrypt a sealed file.
    Open {
        file: PathBuf,
        #[arg(long, env = "TERMSHEET_PASSPHRASE")]
        passphrase: String,
        /// Output path; defaults to stdout.
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    info!("termsheet v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Commands::Process {
            file,
            media_type,
            user,
            json,
        } => {
            let (_, result) = run_pipeline(&file, media_type.as_deref()).await?;
            if json {
                let payload = result.store_payload(&user);
                println!("{}", serde_json::to_string_pretty(&payload)?);
            } else {
                display::print_record_card(&result);
            }
        }
        Commands::Analyze {
            file,
            media_type,
            corpus,
            industry,
            expected_digest,
            json,
        } => {
            let (bytes, result) = run_pipeline(&file, media_type.as_deref()).await?;
            let corpus = corpus.map(load_corpus).transpose()?;
            let deal_report = report::build_report(
                &result,
                &bytes,
                expected_digest.as_deref(),
                corpus,
                &industry,
            )
            .await?;

            if json {
                let combined = serde_json::json!({
                    "result": result,
                    "report": deal_report,
                });
                println!("{}", serde_json::to_string_pretty(&combined)?);
            } else {
                display::print_record_card(&result);
                display::print_report_card(&deal_report);
            }
        }
        Commands::Digest { file } => {
            let bytes =
                std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            println!("{}", termsheet_crypto::content_digest(&bytes));
        }
        Commands::Seal {
            file,
            passphrase,
            out,
        } => {
            let bytes =
                std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            let envelope = termsheet_crypto::seal(&bytes, &passphrase)?;
            let out = out.unwrap_or_else(|| appended_extension(&file, ".sealed"));
            std::fs::write(&out, &envelope)
                .with_context(|| format!("write {}", out.display()))?;
            info!(out = %out.display(), bytes = envelope.len(), "sealed document");
            println!("{}", out.display());
        }
        Commands::Open {
            file,
            passphrase,
            out,
        } => {
            let envelope =
                std::fs::read(&file).with_context(|| format!("read {}", file.display()))?;
            let plain = termsheet_crypto::open(&envelope, &passphrase)?;
            match out {
                Some(path) => {
                    std::fs::write(&path, &plain)
                        .with_context(|| format!("write {}", path.display()))?;
                    println!("{}", path.display());
                }
                None => {
                    use std::io::Write;
                    std::io::stdout().write_all(&plain)?;
                }
            }
        }
    }
    Ok(())
}

/// Read the file, resolve its media type and run the processing pipeline.
async fn run_pipeline(
    file: &Path,
    media_type: Option<&str>,
) -> anyhow::Result<(Vec<u8>, ProcessedResult)> {
    let bytes = std::fs::read(file).with_context(|| format!("read {}", file.display()))?;
    let media = resolve_media(file, media_type)?;
    let source = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());
    let result = process_document(&bytes, media, &source).await?;
    Ok((bytes, result))
}

fn resolve_media(file: &Path, declared: Option<&str>) -> anyhow::Result<MediaType> {
    if let Some(declared) = declared {
        return MediaType::parse(declared).map_err(Into::into);
    }
    MediaType::from_extension(file)
        .with_context(|| format!("cannot infer media type of {}", file.display()))
}

fn load_corpus(path: PathBuf) -> anyhow::Result<Vec<HistoricalDeal>> {
    let raw = std::fs::read_to_string(&path)
        .with_context(|| format!("read corpus {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parse corpus {}", path.display()))
}

fn appended_extension(file: &Path, suffix: &str) -> PathBuf {
    let mut os = file.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}
