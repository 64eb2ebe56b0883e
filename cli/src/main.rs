//! pdfsplit CLI - split PDFs into one file per person

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfsplit::{
    output, AnchoredHeuristicStrategy, LabeledFieldStrategy, NameResolver, PageSource,
    SourceDocument, SplitOptions, Splitter, Strategy,
};

#[derive(Parser)]
#[command(name = "pdfsplit")]
#[command(version)]
#[command(about = "Split a PDF into single-page files named after each person", long_about = None)]
struct Cli {
    /// Input PDF file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(flatten)]
    split: SplitArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF into one file per resolvable page
    Split {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        split: SplitArgs,
    },

    /// Show page text and the name each strategy would pick
    Inspect {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Only this page (1-based)
        #[arg(long)]
        page: Option<usize>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

/// Options shared by the default command and `split`.
#[derive(Args)]
struct SplitArgs {
    /// Name resolution strategy
    #[arg(short, long, value_enum, default_value = "labeled", env = "PDFSPLIT_STRATEGY")]
    strategy: StrategyArg,

    /// Output directory (default: colaboradores/ or clt/ depending on strategy)
    #[arg(short, long, value_name = "DIR", conflicts_with = "zip")]
    output: Option<PathBuf>,

    /// Write a single zip archive instead of a directory
    #[arg(long, value_name = "FILE")]
    zip: Option<PathBuf>,

    /// Worker threads (0 = one per CPU)
    #[arg(long, default_value = "0", env = "PDFSPLIT_THREADS")]
    threads: usize,

    /// Process pages one at a time
    #[arg(long)]
    sequential: bool,

    /// Print the run report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    /// Name on the line after "NOME COMPLETO"
    #[value(alias = "colaborador")]
    Labeled,
    /// Name above a six-digit CBO code
    #[value(alias = "clt")]
    Anchored,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Labeled => Strategy::LabeledField,
            StrategyArg::Anchored => Strategy::AnchoredHeuristic,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Split { input, split }) => cmd_split(&input, &split),
        Some(Commands::Inspect { input, page, json }) => cmd_inspect(&input, page, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => match cli.input {
            Some(input) => cmd_split(&input, &cli.split),
            None => {
                println!(
                    "{}",
                    "Usage: pdfsplit <FILE> [--strategy labeled|anchored]".yellow()
                );
                println!("       pdfsplit --help for more information");
                Ok(())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Default output directory for each strategy.
fn default_output_dir(strategy: Strategy) -> PathBuf {
    match strategy {
        Strategy::LabeledField => PathBuf::from("colaboradores"),
        Strategy::AnchoredHeuristic => PathBuf::from("clt"),
    }
}

fn cmd_split(input: &Path, args: &SplitArgs) -> Result<(), Box<dyn std::error::Error>> {
    let strategy: Strategy = args.strategy.into();
    let doc = SourceDocument::open(input)?;
    let page_count = doc.page_count();
    log::debug!("{}: {} pages", input.display(), page_count);

    let pb = if args.json {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(page_count as u64)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    pb.set_message("Splitting pages...");

    let (tx, rx) = crossbeam_channel::unbounded();
    let mut options = SplitOptions::new()
        .with_strategy(strategy)
        .with_threads(args.threads)
        .with_progress(tx);
    if args.sequential {
        options = options.sequential();
    }
    let splitter = Splitter::with_options(options);

    // The splitter owns the only sender, so the channel closes when it is done.
    let worker = std::thread::spawn(move || splitter.run(&doc));
    for _event in rx.iter() {
        pb.inc(1);
    }
    let report = worker
        .join()
        .map_err(|_| "split worker thread panicked")?;
    pb.finish_and_clear();

    let saved: Vec<PathBuf> = if let Some(ref zip_path) = args.zip {
        output::write_archive(zip_path, &report.artifacts)?;
        vec![zip_path.clone()]
    } else {
        let dir = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_dir(strategy));
        output::write_artifacts(&dir, &report.artifacts)?;
        report
            .artifacts
            .iter()
            .map(|a| dir.join(&a.filename))
            .collect()
    };

    if args.json {
        println!("{}", report.to_json(true)?);
        return Ok(());
    }

    for warning in &report.warnings {
        println!(
            "{} page {}: {}",
            "Warning".yellow().bold(),
            warning.page_index + 1,
            warning.reason
        );
    }

    println!(
        "\n{} {} of {} pages",
        "Done!".green().bold(),
        report.artifact_count(),
        page_count
    );
    if !saved.is_empty() {
        println!("{}", "Saved files:".green().bold());
        let last = saved.len() - 1;
        for (i, path) in saved.iter().enumerate() {
            let branch = if i == last { "└─" } else { "├─" };
            println!("  {} {}", branch.dimmed(), path.display());
        }
    }

    Ok(())
}

fn cmd_inspect(
    input: &Path,
    page: Option<usize>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let doc = SourceDocument::open(input)?;
    let page_count = doc.page_count();

    let indices: Vec<usize> = match page {
        Some(0) => return Err("pages are numbered from 1".into()),
        Some(n) if n > page_count => {
            return Err(format!("page {} does not exist ({} pages)", n, page_count).into())
        }
        Some(n) => vec![n - 1],
        None => (0..page_count).collect(),
    };

    let labeled = LabeledFieldStrategy::new();
    let anchored = AnchoredHeuristicStrategy::new();

    let mut entries = Vec::with_capacity(indices.len());
    for index in indices {
        let text = doc.page_text(index)?;
        let labeled_name = labeled.resolve(&text);
        let anchored_name = anchored.resolve(&text);

        if json {
            entries.push(serde_json::json!({
                "page": index + 1,
                "text": text,
                "labeled": labeled_name,
                "anchored": anchored_name,
            }));
            continue;
        }

        println!("{}", format!("Page {}", index + 1).cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}", text.trim_end());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "labeled".bold(), display_name(labeled_name.as_deref()));
        println!("{}: {}", "anchored".bold(), display_name(anchored_name.as_deref()));
        println!();
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    Ok(())
}

fn display_name(name: Option<&str>) -> String {
    match name {
        Some(name) => name.green().to_string(),
        None => "-".dimmed().to_string(),
    }
}

fn cmd_version() {
    println!("{} {}", "pdfsplit".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Split PDFs into single-page files named after each person");
    println!();
    println!("License: MIT");
}
