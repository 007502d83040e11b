#![warn(missing_docs)]
//! # fine-print binary
//!
//! Terminal front end: collects content from flags, runs one analysis, and
//! prints the resulting report.
//!
//! ## Exit codes
//!
//! - 0: report rendered
//! - 1: submission failed (the banner explains why)
//! - 2: usage or configuration error

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fine_print_analysis_contract::StatusKind;
use fine_print_app::{
    AnalysisOrchestrator, AppConfig, AppError, build_fetcher, init_tracing, parse_timeout_secs,
    submit, user_message,
};
use fine_print_core::{AttachedFile, FormInput, InputCollector};
use fine_print_fetch::ContentFetcher;
use fine_print_page::{ContentScript, PageSnapshot, PageTextRequest, PageTextResponder, StaticPage};
use fine_print_ui::{HeadlessSurfaces, LOADING_STATUS_TEXT, PresentationController};
use tracing::debug;

const RISK_BAR_CELLS: usize = 20;

/// Scam and fine-print analysis client.
#[derive(Parser)]
#[command(name = "fine-print")]
#[command(version = fine_print_app::APP_VERSION)]
#[command(about = "Check messages, links, and documents for scams and unfair terms", long_about = None)]
struct Cli {
    /// Analysis service base URL (overrides FINE_PRINT_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds (overrides FINE_PRINT_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<String>,

    /// Analysis language (overrides FINE_PRINT_LANGUAGE)
    #[arg(long, global = true)]
    language: Option<String>,

    /// Print the presentation record as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze pasted text, a document, or a link
    Analyze {
        /// Text to analyze
        #[arg(long)]
        text: Option<String>,

        /// Read the text to analyze from a file
        #[arg(long, conflicts_with = "text")]
        text_file: Option<PathBuf>,

        /// Document to upload for parsing (PDF)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Link to include with the analysis
        #[arg(long)]
        link: Option<String>,
    },

    /// Answer the browser extension's getText request for a page
    Page {
        /// Page title, used for terms-page detection
        #[arg(long)]
        title: String,

        /// Page URL
        #[arg(long, default_value = "")]
        url: String,

        /// File holding the page's body text
        #[arg(long)]
        text_file: Option<PathBuf>,

        /// Analyze the page after answering
        #[arg(long)]
        analyze: bool,
    },

    /// Ask for a fairer rewrite of a clause
    SuggestFix {
        /// Clause text
        #[arg(long)]
        text: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing("fine_print=warn");

    match run(Cli::parse()).await {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = resolve_config(&cli)?;
    debug!(api_url = %config.api_base_url, timeout_ms = config.timeout.as_millis() as u64, "configuration loaded");

    let fetcher: Arc<dyn ContentFetcher> = Arc::new(build_fetcher(&config)?);
    let orchestrator = AnalysisOrchestrator::new(fetcher, config.language.clone());

    match cli.command {
        Commands::Analyze {
            text,
            text_file,
            file,
            link,
        } => {
            let text = match text_file {
                Some(path) => read_text(&path)?,
                None => text.unwrap_or_default(),
            };
            let file = file.as_deref().map(read_attachment).transpose()?;
            let form = FormInput::new(text, file, link.unwrap_or_default());
            Ok(analyze(&orchestrator, &form, cli.json).await)
        }
        Commands::Page {
            title,
            url,
            text_file,
            analyze: run_analysis,
        } => {
            let body_text = text_file.as_deref().map(read_text).transpose()?.unwrap_or_default();
            let script = ContentScript::new(StaticPage::new(PageSnapshot {
                title,
                body_text,
                url,
            }));
            let response = script
                .respond(&PageTextRequest::get_text())
                .await?
                .context("content script did not answer getText")?;

            if !run_analysis {
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(ExitCode::SUCCESS);
            }
            Ok(analyze(&orchestrator, &response, cli.json).await)
        }
        Commands::SuggestFix { text } => match orchestrator.suggest_fix(&text).await {
            Ok(fix) => {
                println!("{}", fix.suggestion);
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                eprintln!("{}", user_message(&error));
                Ok(ExitCode::FAILURE)
            }
        },
    }
}

fn resolve_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = AppConfig::from_env()?;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    if let Some(raw) = &cli.timeout_secs {
        config.timeout = parse_timeout_secs(raw)?;
    }
    if let Some(language) = &cli.language {
        config.language = language.clone();
    }
    Ok(config)
}

async fn analyze<C>(
    orchestrator: &AnalysisOrchestrator<dyn ContentFetcher>,
    collector: &C,
    json: bool,
) -> ExitCode
where
    C: InputCollector + ?Sized,
{
    let mut controller = PresentationController::new(HeadlessSurfaces::new());
    if !json {
        eprintln!("{LOADING_STATUS_TEXT}");
    }

    let result = submit(&mut controller, orchestrator, collector).await;

    if json {
        match serde_json::to_string_pretty(controller.record()) {
            Ok(encoded) => println!("{encoded}"),
            Err(error) => eprintln!("error: {error}"),
        }
    } else {
        print!("{}", render_report(controller.surfaces()));
    }

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(AppError::Config(_)) => ExitCode::from(2),
        Err(_) => ExitCode::FAILURE,
    }
}

fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_attachment(path: &Path) -> Result<AttachedFile> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    Ok(AttachedFile::new(name, bytes))
}

fn render_report(surfaces: &HeadlessSurfaces) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Status:  [{}] {}\n",
        status_tag(surfaces.status_kind),
        surfaces.status_text
    ));
    out.push_str(&format!(
        "Risk:    {:<8} {} {}\n",
        surfaces.risk_level.display_name(),
        risk_bar(surfaces.risk_score),
        surfaces.risk_score
    ));
    out.push_str(&format!("Summary: {}\n", surfaces.summary));
    out.push_str("Actions:\n");
    for step in &surfaces.steps {
        out.push_str(&format!("  {}. {}\n", step.number, step.text));
    }
    out
}

fn status_tag(kind: StatusKind) -> &'static str {
    match kind {
        StatusKind::Ready => "READY",
        StatusKind::Loading => "LOADING",
        StatusKind::Success => "OK",
        StatusKind::Warning => "WARNING",
        StatusKind::Error => "ERROR",
    }
}

fn risk_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * RISK_BAR_CELLS as f64).round() as usize;
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(RISK_BAR_CELLS - filled)
    )
}
