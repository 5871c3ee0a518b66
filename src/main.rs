// reviewpulse CLI: score text, analyze products, run the maintenance pass.
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use tracing::info;

use reviewpulse::config::{EngineKind, Overrides, Settings};
use reviewpulse::hype::Evidence;
use reviewpulse::maintenance::repair_catalog;
use reviewpulse::models::{SentimentClass, SentimentCounts, TextAnalysis};
use reviewpulse::{HypeAnalyzer, ReviewAnalyzer};

#[derive(Parser)]
#[command(name = "reviewpulse", about = "Review sentiment and hype-vs-reality analysis")]
struct Cli {
    /// Product dataset: a JSON file or a directory of JSON files. Defaults to the sample catalog.
    #[arg(long, global = true)]
    data: Option<PathBuf>,
    /// JSON lexicon override.
    #[arg(long, global = true)]
    lexicon: Option<PathBuf>,
    #[arg(long, global = true, value_enum)]
    engine: Option<EngineKind>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a piece of text
    Score {
        text: String,
        #[arg(long)]
        json: bool,
    },
    /// Full analysis of one product
    Product {
        #[arg(short, long)]
        id: u64,
    },
    /// Sentiment summary for every product
    Products,
    /// Check description claims against ad-hoc review texts
    Hype {
        #[arg(short, long)]
        description: String,
        #[arg(short, long = "review")]
        reviews: Vec<String>,
    },
    /// Fill in missing scores, classes, keywords and ratings; write the repaired catalog
    Maintain {
        #[arg(short, long, default_value = "reviewpulse_catalog.json")]
        out: PathBuf,
    },
}

#[derive(Serialize)]
struct ProductSummary {
    id: u64,
    name: String,
    category: String,
    sentiment_score: f64,
    sentiment_counts: SentimentCounts,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn print_score(result: &TextAnalysis) -> Result<()> {
    let color = match result.sentiment_class {
        SentimentClass::Positive => Color::Green,
        SentimentClass::Neutral => Color::Yellow,
        SentimentClass::Negative => Color::Red,
    };
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    stdout.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(stdout, "{}", result.sentiment_class)?;
    stdout.reset()?;
    writeln!(stdout, " ({:.3})", result.sentiment_score)?;
    for kw in &result.keywords {
        match &kw.context {
            Some(ctx) => writeln!(stdout, "  {} [{}]: \"{}\"", kw.keyword, kw.category, ctx)?,
            None => writeln!(stdout, "  {} [{}]", kw.keyword, kw.category)?,
        }
    }
    Ok(())
}

fn maintain(settings: &Settings, analyzer: &ReviewAnalyzer, out: &Path) -> Result<()> {
    let source = settings.open_source()?;
    let mut products = source.fetch_all()?;

    let pb = ProgressBar::new(products.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} [{elapsed_precise}] {wide_bar} {pos}/{len} {msg}")?
            .progress_chars("=>-"),
    );

    let report = repair_catalog(analyzer, &mut products, |_| pb.inc(1));
    pb.finish_with_message("repaired");

    let fout = File::create(out)?;
    serde_json::to_writer_pretty(fout, &products)?;
    info!(out = %out.display(), "wrote repaired catalog");
    print_json(&report)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let settings = Settings::resolve(Overrides {
        data: cli.data,
        lexicon: cli.lexicon,
        engine: cli.engine,
    })?;
    let analyzer = settings.build_analyzer()?;

    match cli.command {
        Commands::Score { text, json } => {
            let result = analyzer.analyze_text(&text);
            if json {
                print_json(&result)?;
            } else {
                print_score(&result)?;
            }
        }
        Commands::Product { id } => {
            let source = settings.open_source()?;
            let product = source
                .fetch(id)?
                .ok_or_else(|| anyhow!("product {} not found in {} source", id, source.name()))?;
            print_json(&analyzer.analyze_product(&product))?;
        }
        Commands::Products => {
            let source = settings.open_source()?;
            let summaries: Vec<ProductSummary> = source
                .fetch_all()?
                .iter()
                .map(|product| {
                    let analysis = analyzer.analyze_product(product);
                    ProductSummary {
                        id: product.id,
                        name: product.name.clone(),
                        category: product.category.clone(),
                        sentiment_score: analysis.sentiment_score,
                        sentiment_counts: analysis.sentiment_counts,
                    }
                })
                .collect();
            print_json(&summaries)?;
        }
        Commands::Hype { description, reviews } => {
            let evidence: Vec<Evidence<'_>> =
                reviews.iter().map(|text| Evidence::new(text, None)).collect();
            let report = HypeAnalyzer::new(analyzer.lexicon(), analyzer.scorer())
                .analyze(&description, &evidence);
            print_json(&report)?;
        }
        Commands::Maintain { out } => maintain(&settings, &analyzer, &out)?,
    }
    Ok(())
}
