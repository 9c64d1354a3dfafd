use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use crossterm::style::{style, Stylize};
use lexicon_core::core::aggregator::word_ambiguity_report;
use lexicon_core::persistence::{load_lexicon, save_as, Format};
use lexicon_core::{
    to_probability_distribution, CharacterDictionary, Lexicon, LexiconConfig, LexiconSummary,
    PruningEngine,
};
use std::io::{stdout, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Statistics, pruning and probability conversion for treebank lexicons
#[derive(Parser, Debug)]
#[command(name = "lexicon_stats", version)]
struct Cli {
    /// TOML config file (threshold, store, output_dir, breakdown thresholds)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace); RUST_LOG takes precedence
    #[arg(long, global = true, default_value = "info", value_parser = ["error", "warn", "info", "debug", "trace"])]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print word/type counts, averages and threshold breakdowns
    Summary {
        /// Lexicon file (.json or bincode snapshot)
        lexicon: PathBuf,

        /// Also list the N most ambiguous words
        #[arg(long, default_value = "0")]
        top: usize,
    },

    /// Remove types occurring at most THRESHOLD times, then words left without types
    Prune {
        lexicon: PathBuf,

        #[arg(long, allow_negative_numbers = true)]
        threshold: Option<i64>,

        /// Store the pruned lexicon, one file per threshold
        #[arg(long)]
        store: bool,

        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Repeat the sweep until nothing more is removed
        #[arg(long)]
        converge: bool,
    },

    /// Convert counts to per-word probability vectors (JSON)
    Distribution {
        lexicon: PathBuf,

        /// Output file (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Encode strings with a shared, growing character dictionary
    Encode {
        #[arg(required = true)]
        text: Vec<String>,

        /// Start from a..z = 1..26 instead of an empty dictionary
        #[arg(long)]
        latin_seed: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = LexiconConfig::load(cli.config.as_deref())
        .with_context(|| "Could not load configuration")?;

    match cli.command {
        Command::Summary { lexicon, top } => summary(&config, &lexicon, top),
        Command::Prune {
            lexicon,
            threshold,
            store,
            output_dir,
            converge,
        } => {
            let mut config = config;
            if let Some(threshold) = threshold {
                config.threshold = threshold;
            }
            if store {
                config.store = true;
            }
            if let Some(dir) = output_dir {
                config.output_dir = dir;
            }
            prune(&config, &lexicon, converge)
        }
        Command::Distribution { lexicon, output } => distribution(&lexicon, output.as_deref()),
        Command::Encode { text, latin_seed } => encode(&text, latin_seed),
    }
}

fn load(path: &Path) -> Result<Lexicon> {
    load_lexicon(path).with_context(|| format!("Could not load lexicon from '{}'", path.display()))
}

fn print_header(title: &str) {
    println!("{}", style(title).bold().cyan());
    println!("-----------------------------------------------------------");
}

fn summary(config: &LexiconConfig, path: &Path, top: usize) -> Result<()> {
    let lexicon = load(path)?;
    print_header(&format!("Lexicon summary: {}", path.display()));
    println!("{}", LexiconSummary::compute(&lexicon, &config.report_thresholds()));

    if top > 0 {
        println!("\nMost ambiguous words:");
        for (word, n) in word_ambiguity_report(&lexicon).into_iter().take(top) {
            println!("  {} ({} types)", word, n);
        }
    }
    Ok(())
}

fn prune(config: &LexiconConfig, path: &Path, converge: bool) -> Result<()> {
    let lexicon = load(path)?;
    let engine = PruningEngine::from_config(config)?;

    let outcome = if converge {
        engine.prune_to_fixpoint(lexicon)?
    } else {
        engine.remove_low_occurrence_types(lexicon)?
    };

    print_header(&format!("Pruned at threshold {}", engine.threshold()));
    println!(
        "Deleted {} types and {} words",
        outcome.deleted_assignments, outcome.deleted_words
    );
    if converge {
        println!("Sweeps: {}", outcome.rounds);
    }
    println!("{}", outcome.summary);

    match outcome.stored {
        Some(Ok(stored)) => {
            println!("Stored pruned lexicon at '{}'", stored.display());
            Ok(())
        }
        Some(Err(e)) => Err(anyhow::Error::new(e).context("Could not store pruned lexicon")),
        None => Ok(()),
    }
}

fn distribution(path: &Path, output: Option<&Path>) -> Result<()> {
    let lexicon = load(path)?;
    let pdf = to_probability_distribution(lexicon)?;

    match output {
        Some(output) => {
            save_as(&pdf, output, Format::Json)
                .with_context(|| format!("Could not write '{}'", output.display()))?;
            println!(
                "Wrote {} words over {} types to '{}'",
                pdf.len(),
                pdf.types.len(),
                output.display()
            );
        }
        None => {
            let mut out = stdout().lock();
            serde_json::to_writer_pretty(&mut out, &pdf)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn encode(texts: &[String], latin_seed: bool) -> Result<()> {
    let mut dictionary = if latin_seed {
        CharacterDictionary::latin_lowercase()
    } else {
        CharacterDictionary::new()
    };

    for text in texts {
        let codes = dictionary.encode(text);
        println!("{} => {:?}", text, codes);
    }
    println!("Dictionary size: {}", dictionary.len());
    Ok(())
}
