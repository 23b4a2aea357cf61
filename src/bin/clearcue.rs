//! CLI binary for clearcue.
//!
//! A thin shim over the library crate: maps flags to `AnalysisConfig` /
//! `ServerConfig`, runs one subcommand and prints the result.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use clearcue::pipeline::extract::{extract, try_extract};
use clearcue::server::{self, AppState};
use clearcue::{
    analyze, generate_report, write_report, AnalysisConfig, AnalysisRequest,
    CannedReplyGenerator, DiagnosisRecord, FormData, LlmReplyGenerator, Mode, Record,
    RenderRequest, ReplyGenerator, ServerConfig, SkincarePlanRecord, UploadedImage,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn yellow(s: &str) -> String {
    format!("\x1b[33m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Run the HTTP service for the web front end
  clearcue serve --port 3000

  # Diagnose from photos and save the PDF report
  clearcue analyze --mode diagnosis --form answers.json \
      --image rash1.jpg --image rash2.jpg --pdf report.pdf

  # Replay a saved model reply through the extraction engine
  clearcue extract --mode skincare reply.txt

  # Render a stored record without calling the model
  clearcue render --mode skincare --record plan.json --form form.json -o plan.pdf

ENVIRONMENT VARIABLES:
  GEMINI_API_KEY          Google Gemini API key (default provider)
  OPENAI_API_KEY          OpenAI API key
  EDGEQUAKE_LLM_PROVIDER  Override provider (gemini, openai, anthropic, ollama)
  EDGEQUAKE_MODEL         Override model ID
  RUST_LOG                Log filter, overrides -v / -q
"#;

/// Skin consultations with a vision model: validated records and PDF reports.
#[derive(Parser, Debug)]
#[command(
    name = "clearcue",
    version,
    about = "Skin consultations with a vision model: validated records and PDF reports",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, global = true, env = "CLEARCUE_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true, env = "CLEARCUE_QUIET")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (/api/analyze, /api/generate-pdf, /health).
    Serve {
        #[arg(long, env = "CLEARCUE_HOST", default_value = "127.0.0.1")]
        host: String,

        #[arg(long, env = "CLEARCUE_PORT", default_value_t = 3000)]
        port: u16,

        /// Maximum request body in MiB.
        #[arg(long, env = "CLEARCUE_BODY_LIMIT_MB", default_value_t = 25)]
        body_limit_mb: usize,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Run one consultation and print the record as JSON.
    Analyze {
        #[arg(long, value_enum)]
        mode: ModeArg,

        /// JSON file with the mode's form answers.
        #[arg(long)]
        form: PathBuf,

        /// Photo to attach; repeat for several (diagnosis takes up to 4).
        #[arg(long = "image")]
        images: Vec<PathBuf>,

        /// Also write the PDF report to this path.
        #[arg(long)]
        pdf: Option<PathBuf>,

        /// Disable the spinner.
        #[arg(long, env = "CLEARCUE_NO_PROGRESS")]
        no_progress: bool,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Run the extraction engine on saved model output (file or stdin).
    Extract {
        #[arg(long, value_enum)]
        mode: ModeArg,

        /// Reply text file. Reads stdin when omitted.
        input: Option<PathBuf>,
    },

    /// Render a stored record to PDF.
    Render {
        #[arg(long, value_enum)]
        mode: ModeArg,

        /// JSON file with the record.
        #[arg(long)]
        record: PathBuf,

        /// JSON file with the form answers.
        #[arg(long)]
        form: Option<PathBuf>,

        #[arg(short, long)]
        output: PathBuf,
    },
}

/// Model selection shared by `serve` and `analyze`.
#[derive(Args, Debug)]
struct ModelArgs {
    /// Vision model ID. Default: gemini-2.0-flash.
    #[arg(long, env = "EDGEQUAKE_MODEL")]
    model: Option<String>,

    /// LLM provider: gemini, openai, anthropic, ollama, azure.
    #[arg(long, env = "EDGEQUAKE_PROVIDER")]
    provider: Option<String>,

    /// LLM temperature (0.0–2.0).
    #[arg(long, env = "CLEARCUE_TEMPERATURE", default_value_t = 0.4)]
    temperature: f32,

    /// Max LLM output tokens.
    #[arg(long, env = "CLEARCUE_MAX_TOKENS", default_value_t = 4096)]
    max_tokens: usize,

    /// Model call timeout in seconds.
    #[arg(long, env = "CLEARCUE_API_TIMEOUT", default_value_t = 60)]
    api_timeout: u64,

    /// Retries on model failure.
    #[arg(long, env = "CLEARCUE_MAX_RETRIES", default_value_t = 0)]
    max_retries: u32,

    /// Answer every consultation with the contents of this file instead of
    /// calling a model.
    #[arg(long, env = "CLEARCUE_CANNED_REPLY")]
    canned_reply: Option<PathBuf>,
}

impl ModelArgs {
    fn config(&self) -> Result<AnalysisConfig> {
        let mut builder = AnalysisConfig::builder()
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .api_timeout_secs(self.api_timeout)
            .max_retries(self.max_retries);
        if let Some(ref model) = self.model {
            builder = builder.model(model);
        }
        if let Some(ref provider) = self.provider {
            builder = builder.provider_name(provider);
        }
        Ok(builder.build()?)
    }

    fn generator(&self, config: &AnalysisConfig) -> Result<Arc<dyn ReplyGenerator>> {
        match self.canned_reply {
            Some(ref path) => {
                let reply = read_text(path)?;
                Ok(Arc::new(CannedReplyGenerator::new(reply)))
            }
            None => Ok(Arc::new(LlmReplyGenerator::from_config(config)?)),
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Diagnosis,
    Skincare,
}

impl From<ModeArg> for Mode {
    fn from(v: ModeArg) -> Self {
        match v {
            ModeArg::Diagnosis => Mode::Diagnosis,
            ModeArg::Skincare => Mode::SkincarePlan,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner replaces INFO-level library logs during `analyze`.
    let show_progress = !cli.quiet
        && matches!(
            cli.command,
            Command::Analyze {
                no_progress: false,
                ..
            }
        );
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Serve {
            host,
            port,
            body_limit_mb,
            model,
        } => {
            let config = model.config()?;
            let generator = model.generator(&config)?;
            let server_config = ServerConfig {
                host,
                port,
                body_limit_bytes: body_limit_mb * 1024 * 1024,
            };
            server::serve(AppState::new(generator, config), &server_config).await?;
        }

        Command::Analyze {
            mode,
            form,
            images,
            pdf,
            no_progress,
            model,
        } => {
            let mode = Mode::from(mode);
            let config = model.config()?;
            let generator = model.generator(&config)?;
            let form = FormData::from_json(mode, &read_text(&form)?)?;
            let uploads = images
                .iter()
                .map(|path| {
                    std::fs::read(path)
                        .map(|bytes| UploadedImage::new(bytes, None))
                        .with_context(|| format!("reading image {}", path.display()))
                })
                .collect::<Result<Vec<_>>>()?;

            let progress = (show_progress && !no_progress).then(|| spinner(mode));
            let request = AnalysisRequest::new(mode, form.clone(), uploads);
            let outcome = analyze(&request, generator.as_ref(), &config).await;
            if let Some(ref bar) = progress {
                bar.finish_and_clear();
            }
            let record = outcome?;

            println!("{}", serde_json::to_string_pretty(&record)?);

            if let Some(path) = pdf {
                write_pdf(RenderRequest { mode, record, form }, &path, cli.quiet)?;
            }
        }

        Command::Extract { mode, input } => {
            let mode = Mode::from(mode);
            let raw = match input {
                Some(ref path) => read_text(path)?,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading model reply from stdin")?;
                    buf
                }
            };
            if let Err(reason) = try_extract(raw.trim(), mode) {
                if !cli.quiet {
                    eprintln!("{} {}", yellow("⚠"), dim(&format!("using fallback: {reason}")));
                }
            }
            let record = extract(raw.trim(), mode);
            println!("{}", serde_json::to_string_pretty(&record)?);
        }

        Command::Render {
            mode,
            record,
            form,
            output,
        } => {
            let mode = Mode::from(mode);
            let record = read_record(mode, &record)?;
            let form = match form {
                Some(ref path) => FormData::from_json(mode, &read_text(path)?)?,
                None => FormData::empty(mode),
            };
            write_pdf(RenderRequest { mode, record, form }, &output, cli.quiet)?;
        }
    }

    Ok(())
}

fn spinner(mode: Mode) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  ⏱ {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]),
    );
    bar.set_prefix("Analyzing");
    bar.set_message(format!("{mode} consultation…"));
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

fn write_pdf(request: RenderRequest, path: &Path, quiet: bool) -> Result<()> {
    let report = generate_report(&request)?;
    write_report(&report, path)?;
    if !quiet {
        eprintln!(
            "{} {}  {}",
            green("✓"),
            path.display(),
            dim(&format!("{} pages, {} bytes", report.page_count, report.bytes.len()))
        );
    }
    Ok(())
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_record(mode: Mode, path: &Path) -> Result<Record> {
    let json = read_text(path)?;
    let record = match mode {
        Mode::Diagnosis => Record::Diagnosis(
            serde_json::from_str::<DiagnosisRecord>(&json)
                .with_context(|| format!("{} is not a diagnosis record", path.display()))?,
        ),
        Mode::SkincarePlan => Record::SkincarePlan(
            serde_json::from_str::<SkincarePlanRecord>(&json)
                .with_context(|| format!("{} is not a skincare-plan record", path.display()))?,
        ),
    };
    Ok(record)
}
