//! CLI entry point for dataset profiling and model analysis.

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::{Path, PathBuf};
use tabula_insight::ai::{ExplanationProvider, ExplanationRequest, explain_or_fallback};
use tabula_insight::{
    AnalysisConfig, AnalysisReport, DataProfiler, DatasetMeta, ModelAnalyzer, NormalizationMode,
    PredictionResult, Row, VariableSelection, create_histogram, load_rows,
};
use tracing::{debug, info};

#[cfg(feature = "ai")]
use tabula_insight::ai::GeminiProvider;
#[cfg(feature = "ai")]
use tracing::warn;

#[derive(Parser, Debug)]
#[command(
    author = "Tabula Insight Team",
    version,
    about = "Profile tabular datasets and estimate feature predictiveness",
    long_about = "Profile a CSV (or parquet) dataset, bucket columns into histograms and\n\
                  estimate how well a set of features predicts a target.\n\n\
                  ENVIRONMENT VARIABLES:\n  \
                  GEMINI_API_KEY    API key for Gemini explanations (optional)\n\n\
                  EXAMPLES:\n  \
                  # Column profile\n  \
                  tabula-insight profile data.csv\n\n  \
                  # Histogram of one column\n  \
                  tabula-insight histogram data.csv --column age --bins 20\n\n  \
                  # Model analysis with a reproducible split\n  \
                  tabula-insight analyze data.csv --target churn --features age,tenure --seed 42\n\n  \
                  # JSON output for other tools\n  \
                  tabula-insight --json analyze data.csv -t churn -f age | jq .prediction"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show errors and final result)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output JSON to stdout instead of human-readable summary
    ///
    /// Disables all progress logs; only outputs the final JSON report.
    #[arg(long, global = true)]
    json: bool,

    /// Write a JSON report into this directory
    ///
    /// The report will be saved as <input_name>_report.json
    #[arg(short = 'r', long, global = true)]
    report_dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Profile every column of a dataset
    Profile {
        /// Path to the dataset (.csv, .txt or .parquet)
        file: PathBuf,
    },

    /// Bucket a numeric column into equal-width bins
    Histogram {
        file: PathBuf,

        /// Column to bin
        #[arg(short, long)]
        column: String,

        /// Number of bins
        #[arg(short, long)]
        bins: Option<usize>,
    },

    /// Estimate how well the features predict the target
    Analyze {
        file: PathBuf,

        /// Target column
        #[arg(short, long)]
        target: String,

        /// Comma-separated feature columns
        #[arg(short, long, value_delimiter = ',', required = true)]
        features: Vec<String>,

        /// Seed for the train/test shuffle
        #[arg(long)]
        seed: Option<u64>,

        /// Scale test features with the training bounds (KNN only)
        #[arg(long)]
        fit_on_train: bool,

        /// Number of neighbors for KNN regression
        #[arg(long)]
        knn_neighbors: Option<usize>,
    },

    /// Explain the relationship between one feature and the target
    Explain {
        file: PathBuf,

        #[arg(short, long)]
        target: String,

        #[arg(short, long)]
        feature: String,

        /// Skip the AI provider and use the fallback text
        #[arg(long)]
        no_ai: bool,
    },
}

/// Initialize the tracing subscriber for logging.
///
/// When `json_output` is true, logging is completely disabled to ensure
/// only JSON is written to stdout.
fn init_logging(level: &str, quiet: bool, json_output: bool) {
    if json_output {
        return;
    }

    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args.log_level, args.quiet, args.json);

    dotenv().ok();

    let report = match &args.command {
        Command::Profile { file } => {
            let (_, meta) = load_and_profile(file, &AnalysisConfig::default())?;
            if !args.json {
                print_profile(&meta);
            }
            AnalysisReport::new(file.display().to_string(), meta)
        }
        Command::Histogram { file, column, bins } => {
            let config = histogram_config(*bins)?;
            let bins = config.histogram_bins;
            let (rows, meta) = load_and_profile(file, &config)?;
            if !meta.has_column(column) {
                return Err(anyhow!("Column '{}' not found in {}", column, file.display()));
            }
            let histogram = create_histogram(&rows, column, bins);
            if !args.json {
                print_histogram(column, &histogram);
            }
            AnalysisReport::new(file.display().to_string(), meta).with_histogram(column, histogram)
        }
        Command::Analyze {
            file,
            target,
            features,
            seed,
            fit_on_train,
            knn_neighbors,
        } => {
            let config = build_config(*seed, *fit_on_train, *knn_neighbors)?;
            let (rows, meta) = load_and_profile(file, &config)?;
            let selection = VariableSelection::new(&meta, target.clone(), features.clone())?;
            let result = ModelAnalyzer::new(config).run_selection(&rows, &selection);
            if !args.json {
                print_prediction(&selection, &result);
            }
            AnalysisReport::new(file.display().to_string(), meta).with_prediction(&selection, result)
        }
        Command::Explain {
            file,
            target,
            feature,
            no_ai,
        } => {
            let (_, meta) = load_and_profile(file, &AnalysisConfig::default())?;
            let selection = VariableSelection::new(&meta, target.clone(), vec![feature.clone()])?;
            let request = ExplanationRequest::from_meta(&meta, selection.target(), feature);
            let provider = if *no_ai { None } else { explanation_provider() };
            let text = explain_or_fallback(provider.as_deref(), &request);
            if !args.json {
                println!();
                println!("{}", request.statistics);
                println!();
                println!("{}", text);
            }
            AnalysisReport::new(file.display().to_string(), meta).with_explanation(text)
        }
    };

    if args.json {
        println!("{}", report.to_json_pretty()?);
    }

    if let Some(dir) = &args.report_dir {
        let path = report.write_to_file(dir, &extract_file_stem(command_file(&args.command)))?;
        if !args.json {
            println!("\nReport saved to: {}", path.display());
        }
    }

    Ok(())
}

fn build_config(
    seed: Option<u64>,
    fit_on_train: bool,
    knn_neighbors: Option<usize>,
) -> Result<AnalysisConfig> {
    let mut builder = AnalysisConfig::builder();
    if let Some(seed) = seed {
        builder = builder.seed(seed);
    }
    if fit_on_train {
        builder = builder.normalization(NormalizationMode::FitOnTrain);
    }
    if let Some(k) = knn_neighbors {
        builder = builder.knn_neighbors(k);
    }
    Ok(builder.build()?)
}

fn histogram_config(bins: Option<usize>) -> Result<AnalysisConfig> {
    let mut builder = AnalysisConfig::builder();
    if let Some(bins) = bins {
        builder = builder.histogram_bins(bins);
    }
    Ok(builder.build()?)
}

fn load_and_profile(path: &Path, config: &AnalysisConfig) -> Result<(Vec<Row>, DatasetMeta)> {
    if !path.exists() {
        return Err(anyhow!("Input file not found: {}", path.display()));
    }
    info!("Loading dataset from: {}", path.display());
    let rows = load_rows(path)?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let meta = DataProfiler::new(config).analyze_dataset(&rows, &file_name);
    Ok((rows, meta))
}

#[cfg(feature = "ai")]
fn explanation_provider() -> Option<Box<dyn ExplanationProvider>> {
    match GeminiProvider::from_env() {
        Ok(Some(provider)) => {
            debug!("Using {} ({:?}) for explanations", provider.name(), provider.model());
            Some(Box::new(provider))
        }
        Ok(None) => {
            debug!("GEMINI_API_KEY not set, explanations use the fallback text");
            None
        }
        Err(e) => {
            warn!("Could not create Gemini provider: {}", e);
            None
        }
    }
}

#[cfg(not(feature = "ai"))]
fn explanation_provider() -> Option<Box<dyn ExplanationProvider>> {
    debug!("Built without the 'ai' feature, explanations use the fallback text");
    None
}

fn command_file(command: &Command) -> &Path {
    match command {
        Command::Profile { file }
        | Command::Histogram { file, .. }
        | Command::Analyze { file, .. }
        | Command::Explain { file, .. } => file,
    }
}

/// Extract the file stem from a path (filename without extension).
fn extract_file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("dataset")
        .to_string()
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

fn format_optional(value: Option<f64>) -> String {
    value.map(|v| format!("{:.2}", v)).unwrap_or_else(|| "-".to_string())
}

// Human-readable output uses println! on purpose: it is the result of the
// command and must show regardless of log level.

fn print_profile(meta: &DatasetMeta) {
    println!("\n{}", "=".repeat(80));
    println!("DATASET PROFILE");
    println!("{}", "=".repeat(80));
    println!("  File: {}", meta.file_name);
    println!("  Rows: {}", meta.row_count);
    println!("  Columns: {}", meta.columns.len());
    println!();

    println!(
        "{:<20} {:<12} {:<10} {:<8} {:<10} {:<10} {:<10}",
        "Column", "Type", "Missing %", "Unique", "Mean", "Min", "Max"
    );
    println!("{}", "-".repeat(84));

    for column in &meta.columns {
        let Some(stats) = meta.column_stats(column) else {
            continue;
        };
        println!(
            "{:<20} {:<12} {:<10.1} {:<8} {:<10} {:<10} {:<10}",
            truncate_str(column, 19),
            stats.column_type,
            meta.missing_percentage(column).unwrap_or_default(),
            stats.unique_count,
            format_optional(stats.mean),
            format_optional(stats.min),
            format_optional(stats.max)
        );
    }
    println!();
}

fn print_histogram(column: &str, bins: &[tabula_insight::BinData]) {
    println!("\nHISTOGRAM: {}", column);
    println!("{}", "-".repeat(40));
    if bins.is_empty() {
        println!("  No numeric values to bin");
        return;
    }
    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bin in bins {
        let bar = "#".repeat(bin.count * 30 / max_count);
        println!("  {:<24} {:>6}  {}", bin.bin, bin.count, bar);
    }
    println!();
}

fn print_prediction(selection: &VariableSelection, result: &PredictionResult) {
    println!("\n{}", "=".repeat(80));
    println!("MODEL ANALYSIS");
    println!("{}", "=".repeat(80));
    println!("  Target: {}", selection.target());
    println!("  Features: {}", selection.features().join(", "));
    println!();

    if result.is_insufficient_data() {
        println!("  Not enough complete rows to train a model.");
        println!();
        return;
    }

    println!("  Model: {}", result.model_name);
    println!("  Problem type: {}", result.problem_type);
    println!("  {}: {:.4}", result.score_label(), result.accuracy);
    if result.problem_type == tabula_insight::ProblemType::Classification {
        println!("  auc (estimate): {:.4}", result.auc);
    }
    println!();
}
