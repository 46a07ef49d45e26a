// textlens CLI: run the analysis HTTP service, or analyze one input from the shell.
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing_subscriber::EnvFilter;

use textlens::nlp::SentimentLabel;
use textlens::{server, AnalysisResult, ServiceConfig, Source};

#[derive(Parser)]
#[command(name = "textlens", version, about = "Sentiment, keywords and summaries for text or web articles")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API
    Serve(ServiceConfig),
    /// Analyze a single text, file or URL and print the result
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
struct AnalyzeArgs {
    #[arg(short, long, conflicts_with_all = ["file", "url"], required_unless_present_any = ["file", "url"])]
    text: Option<String>,
    /// txt, md, csv, json or pdf file
    #[arg(short, long, conflicts_with = "url")]
    file: Option<PathBuf>,
    #[arg(short, long)]
    url: Option<String>,
    /// Print the raw JSON result
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    config: ServiceConfig,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("textlens=info,tower_http=info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn read_text_file(p: &Path) -> Result<String> {
    let mut s = String::new();
    let mut f = File::open(p)?;
    f.read_to_string(&mut s)?;
    Ok(s)
}

fn read_file_content(p: &Path) -> Result<String> {
    let ext = p.extension().and_then(|s| s.to_str()).unwrap_or("");
    match ext {
        "txt" | "md" | "csv" | "json" => read_text_file(p),
        "pdf" => pdf_extract::extract_text(p).map_err(|e| anyhow!("PDF extraction failed: {}", e)),
        _ => Err(anyhow!("Unsupported file format: {}", ext)),
    }
}

async fn serve(config: ServiceConfig) -> Result<()> {
    let addr = config.resolve_addr().await?;
    let ctx = config.build_context()?;
    let settings = ctx.settings();
    tracing::info!(
        sentiment_char_limit = settings.sentiment_char_limit,
        summary_max = settings.summary.max_length,
        summary_min = settings.summary.min_length,
        "analysis capabilities loaded"
    );
    server::run_server(ctx, addr).await
}

async fn analyze(args: AnalyzeArgs) -> Result<()> {
    let ctx = args.config.build_context()?;
    let result = if let Some(url) = args.url {
        let pb = ProgressBar::new_spinner();
        pb.set_style(ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {msg}")?);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message(format!("fetching {}", url));
        let outcome = ctx.analyze_url(url).await;
        pb.finish_and_clear();
        outcome?
    } else if let Some(path) = args.file {
        ctx.analyze_text(read_file_content(&path)?).await?
    } else {
        let text = args.text.ok_or_else(|| anyhow!("one of --text, --file or --url is required"))?;
        ctx.analyze_text(text).await?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_report(&result)?;
    }
    Ok(())
}

fn label_color(label: SentimentLabel) -> Color {
    match label {
        SentimentLabel::Positive => Color::Green,
        SentimentLabel::Negative => Color::Red,
        SentimentLabel::Neutral => Color::Yellow,
    }
}

fn print_report(result: &AnalysisResult) -> Result<()> {
    let mut out = StandardStream::stdout(ColorChoice::Auto);
    let bold = ColorSpec::new().set_bold(true).clone();

    if let Source::Url(url) = &result.source {
        out.set_color(&bold)?;
        write!(out, "Source:    ")?;
        out.reset()?;
        writeln!(out, "{}", url)?;
    }

    out.set_color(&bold)?;
    write!(out, "Sentiment: ")?;
    out.set_color(ColorSpec::new().set_fg(Some(label_color(result.sentiment))).set_bold(true))?;
    writeln!(out, "{}", result.sentiment)?;

    out.set_color(&bold)?;
    write!(out, "Keywords:  ")?;
    out.reset()?;
    if result.top_keywords.is_empty() {
        writeln!(out, "(none)")?;
    } else {
        writeln!(out, "{}", result.top_keywords.join(", "))?;
    }

    out.set_color(&bold)?;
    writeln!(out, "Summary:")?;
    out.reset()?;
    writeln!(out, "{}", result.summary)?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(config) => {
            init_tracing(config.log_json);
            serve(config).await?
        }
        Commands::Analyze(args) => {
            init_tracing(args.config.log_json);
            analyze(args).await?
        }
    }
    Ok(())
}
