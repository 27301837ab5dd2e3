//! Rationalize CLI - document similarity analysis and reporting tool
//!
//! Compares paragraph-level text blocks across a PDF/HTML corpus with TF-IDF
//! cosine similarity and renders reusability reports.

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use rationalize_core::{
    compare_segments, ComparisonMode, ExtractOptions, RationalizeError, RunConfig, TextSegment,
    DEFAULT_THRESHOLD,
};
use rationalize_extract::{collect_rules, extract_directory, CorpusExtraction};
use rationalize_report::{
    write_html_report, write_rules_report, write_summary, write_xlsx_report, EffortSummary,
    RuleRow,
};
use std::fs;
use std::io::Write as _;
use std::path::{Path, PathBuf};

/// Name of the per-run failure log kept in the output base directory.
const PROCESSING_LOG: &str = "processing_log.txt";

/// Verbosity level for output control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    /// Suppress all output except errors
    Quiet,
    /// Normal output (default)
    Normal,
    /// Verbose output with extra details
    Verbose,
}

impl Verbosity {
    const fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    const fn should_show_output(self) -> bool {
        !matches!(self, Self::Quiet)
    }

    const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "rationalize",
    about = "Analyze template reuse across a PDF/HTML document corpus",
    long_about = "Extracts paragraph-level text blocks from PDF and HTML documents,\n\
                  scores them against each other with TF-IDF cosine similarity, and\n\
                  writes HTML/XLSX reusability reports plus an effort reduction estimate.",
    version
)]
struct Args {
    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Show detailed processing information
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare one reference document against the rest of the corpus
    #[command(long_about = "Compare the reference document's paragraphs against every\n\
                      document in the corpus directory. Reference paragraphs are never\n\
                      scored against each other.")]
    OneVsMany {
        /// Directory holding the reference document
        #[arg(short, long, value_name = "DIR", default_value = "singlepdf")]
        reference: PathBuf,

        /// Directory holding the corpus documents
        #[arg(short, long, value_name = "DIR", default_value = "allpdf")]
        corpus: PathBuf,

        /// Base output directory (reports land in a timestamped subdirectory)
        #[arg(short, long, value_name = "DIR", default_value = "result")]
        output: PathBuf,

        /// Raw cosine similarity threshold; a pair must strictly exceed it
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Number of extraction workers (default: available parallelism)
        #[arg(short = 'j', long, value_name = "N")]
        workers: Option<usize>,

        /// Strip runs of five-or-more x/X redaction placeholders before filtering
        #[arg(long)]
        strip_redactions: bool,
    },

    /// Compare every paragraph in the corpus against every other
    #[command(long_about = "Upper-triangular scan over all corpus paragraphs. Paragraphs\n\
                      from the same document are still compared; duplicated boilerplate\n\
                      within one document counts as reuse.")]
    AllVsAll {
        /// Directory holding the corpus documents
        #[arg(short, long, value_name = "DIR", default_value = "allpdf")]
        corpus: PathBuf,

        /// Base output directory (reports land in a timestamped subdirectory)
        #[arg(short, long, value_name = "DIR", default_value = "result")]
        output: PathBuf,

        /// Raw cosine similarity threshold; a pair must strictly exceed it
        #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
        threshold: f64,

        /// Number of extraction workers (default: available parallelism)
        #[arg(short = 'j', long, value_name = "N")]
        workers: Option<usize>,

        /// Strip runs of five-or-more x/X redaction placeholders before filtering
        #[arg(long)]
        strip_redactions: bool,
    },

    /// Extract rule definitions from exported HTML rule catalogs
    #[command(long_about = "Walk a directory of exported HTML rule catalogs, extract every\n\
                      R-numbered rule with its formula, categorize it by name keywords,\n\
                      and write rules_report.xlsx.")]
    ExtractRules {
        /// Directory holding the exported HTML files
        #[arg(short, long, value_name = "DIR", default_value = "input_htm")]
        input: PathBuf,

        /// Output directory for rules_report.xlsx
        #[arg(short, long, value_name = "DIR", default_value = "result")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let verbosity = Verbosity::from_flags(args.quiet, args.verbose);

    match args.command {
        Commands::OneVsMany {
            reference,
            corpus,
            output,
            threshold,
            workers,
            strip_redactions,
        } => {
            let config = RunConfig::new(corpus, output)
                .with_reference_dir(reference)
                .with_threshold(threshold)
                .with_workers(workers)
                .with_extract_options(
                    ExtractOptions::default().with_redaction_stripping(strip_redactions),
                );
            comparison_command(&config, verbosity)
        }
        Commands::AllVsAll {
            corpus,
            output,
            threshold,
            workers,
            strip_redactions,
        } => {
            let config = RunConfig::new(corpus, output)
                .with_threshold(threshold)
                .with_workers(workers)
                .with_extract_options(
                    ExtractOptions::default().with_redaction_stripping(strip_redactions),
                );
            comparison_command(&config, verbosity)
        }
        Commands::ExtractRules { input, output } => {
            extract_rules_command(&input, &output, verbosity)
        }
    }
}

fn spinner(verbosity: Verbosity, message: String) -> ProgressBar {
    if !verbosity.should_show_output() {
        return ProgressBar::hidden();
    }
    let s = ProgressBar::new_spinner();
    s.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .expect("template is compile-time constant")
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    s.set_message(message);
    s.enable_steady_tick(std::time::Duration::from_millis(80));
    s
}

/// Append one run's extraction outcome to the failure log in the output base.
fn append_processing_log(output_dir: &Path, extractions: &[&CorpusExtraction]) -> Result<()> {
    let path = output_dir.join(PROCESSING_LOG);
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
    for extraction in extractions {
        for failure in &extraction.failures {
            writeln!(file, "[{now}] FAILED {}: {}", failure.path.display(), failure.reason)?;
        }
        writeln!(
            file,
            "[{now}] extracted {} documents ({} segments, {} failures)",
            extraction.documents.len(),
            extraction.total_segments(),
            extraction.failures.len()
        )?;
    }
    Ok(())
}

fn extract_with_spinner(
    dir: &Path,
    config: &RunConfig,
    verbosity: Verbosity,
) -> Result<CorpusExtraction> {
    let s = spinner(verbosity, format!("Extracting text from {}...", dir.display()));
    let extraction = extract_directory(dir, &config.extract, config.workers)
        .with_context(|| format!("Failed to extract documents from {}", dir.display()))?;
    s.finish_and_clear();

    if verbosity.is_verbose() {
        eprintln!(
            "{} {}: {} documents, {} segments, {} pages",
            "Info:".blue().bold(),
            dir.display(),
            extraction.documents.len(),
            extraction.total_segments(),
            extraction.total_pages()
        );
    }
    for failure in &extraction.failures {
        eprintln!(
            "{} skipping {}: {}",
            "Warning:".yellow().bold(),
            failure.path.display(),
            failure.reason
        );
    }
    Ok(extraction)
}

fn comparison_command(config: &RunConfig, verbosity: Verbosity) -> Result<()> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            config.output_dir.display()
        )
    })?;

    // Reference first (one-vs-many only), then the corpus.
    let reference = match &config.reference_dir {
        Some(dir) => Some(extract_with_spinner(dir, config, verbosity)?),
        None => None,
    };
    let corpus = extract_with_spinner(&config.corpus_dir, config, verbosity)?;

    let extractions: Vec<&CorpusExtraction> = reference.iter().chain([&corpus]).collect();
    append_processing_log(&config.output_dir, &extractions)?;

    if corpus.total_segments() == 0 {
        eprintln!(
            "{} No usable text found in {}",
            "Error:".red().bold(),
            config.corpus_dir.display()
        );
        eprintln!(
            "{} The corpus directory must contain readable .pdf/.html files with \
             paragraphs of at least ten words",
            "Help:".cyan().bold()
        );
        return Err(RationalizeError::EmptyCorpus(config.corpus_dir.clone()).into());
    }

    // Assemble the comparison set: reference segments lead, corpus follows.
    // The first recognized document in the reference directory is the
    // reference; any others there are ignored.
    let mut segments: Vec<TextSegment> = Vec::new();
    let reference_count = match &reference {
        Some(extraction) => {
            let first = extraction
                .documents
                .iter()
                .find(|d| !d.segments.is_empty());
            let Some(document) = first else {
                eprintln!(
                    "{} No usable text found in reference directory {}",
                    "Error:".red().bold(),
                    config
                        .reference_dir
                        .as_deref()
                        .unwrap_or(Path::new("?"))
                        .display()
                );
                return Err(RationalizeError::EmptyCorpus(
                    config.reference_dir.clone().unwrap_or_default(),
                )
                .into());
            };
            segments.extend(document.segments.iter().cloned());
            segments.len()
        }
        None => 0,
    };
    for document in &corpus.documents {
        segments.extend(document.segments.iter().cloned());
    }

    let mode = if reference.is_some() {
        ComparisonMode::OneVsMany { reference_count }
    } else {
        ComparisonMode::AllVsAll
    };

    let s = spinner(verbosity, format!("Comparing {} paragraphs...", segments.len()));
    let start = std::time::Instant::now();
    let result = compare_segments(&segments, mode, config.threshold);
    let elapsed = start.elapsed();
    s.finish_and_clear();

    if verbosity.is_verbose() {
        eprintln!(
            "{} Comparison completed in {:.2}s",
            "Info:".blue().bold(),
            elapsed.as_secs_f64()
        );
    }

    let report_dir = config.output_dir.join(format!(
        "pdf_rationalization_report_{}",
        Local::now().format("%Y_%m_%d_%H_%M_%S")
    ));
    fs::create_dir_all(&report_dir)
        .with_context(|| format!("Failed to create {}", report_dir.display()))?;

    let mut written = vec![
        write_html_report(&result, &report_dir)?,
        write_xlsx_report(&result, &report_dir)?,
    ];

    // The effort reduction estimate only makes sense over the whole corpus,
    // not against a single reference document.
    let summary = if reference.is_none() {
        let summary = EffortSummary {
            total_segments: segments.len(),
            match_count: result.total_matches(),
            total_pages: corpus.total_pages(),
        };
        written.push(write_summary(&summary, &report_dir)?);
        Some(summary)
    } else {
        None
    };

    if verbosity.should_show_output() {
        eprintln!(
            "{} {} paragraphs matched above {:.0}% similarity",
            "✓".green().bold(),
            result.len().to_string().cyan(),
            config.threshold * 100.0
        );
        if let Some(summary) = summary {
            eprintln!(
                "{} Estimated effort reduction: {}",
                "✓".green().bold(),
                format!("{:.2}%", summary.effort_reduction_percent()).cyan()
            );
        }
        for path in &written {
            eprintln!(
                "{} Report written to: {}",
                "✓".green().bold(),
                path.display().to_string().bright_white()
            );
        }
    }

    Ok(())
}

fn extract_rules_command(input: &Path, output: &Path, verbosity: Verbosity) -> Result<()> {
    let s = spinner(
        verbosity,
        format!("Extracting rules from {}...", input.display()),
    );
    let categorizer = rationalize_core::rules::Categorizer::standard();
    let rules = collect_rules(input, &categorizer)
        .with_context(|| format!("Failed to read rule catalogs from {}", input.display()))?;
    s.finish_and_clear();

    if rules.is_empty() {
        eprintln!(
            "{} No rule definitions found in {}",
            "Error:".red().bold(),
            input.display()
        );
        eprintln!(
            "{} Rule catalogs are HTML exports with <div class=\"rule\"> blocks",
            "Help:".cyan().bold()
        );
        anyhow::bail!("No rule definitions found in {}", input.display());
    }

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create output directory: {}", output.display()))?;

    let rows: Vec<RuleRow> = rules
        .into_iter()
        .map(|r| RuleRow {
            id: r.id,
            name: r.name,
            category: r.category,
            formula: r.formula,
        })
        .collect();
    let path = write_rules_report(&rows, output)?;

    if verbosity.should_show_output() {
        eprintln!(
            "{} {} rules written to: {}",
            "✓".green().bold(),
            rows.len().to_string().cyan(),
            path.display().to_string().bright_white()
        );
    }

    Ok(())
}
