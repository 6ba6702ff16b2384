//! Equation dependency graph CLI.
//!
//! Provides the `eqgraph` binary with two subcommands: `extract` turns raw
//! calculator-annotated chains into processed sample records, and `analyze`
//! combines samples, links them into a dependency graph, and runs the full
//! analysis pipeline (group, order, chain, render).
//!
//! Both subcommands speak JSON files so runs can be chained and diffed.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};

use eqgraph_core::NodeId;
use eqgraph_dataset::{
    build_graph, combine_samples, load_samples, save_samples, ChainExtractor, DatasetError,
    Sample,
};
use eqgraph_engine::{
    build_chains, classify, render, sequence, ChainTree, EngineConfig, EngineError,
};

/// Equation dependency graph tools.
#[derive(Parser)]
#[command(name = "eqgraph", about = "Equation dependency graph tools")]
struct Cli {
    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Extract processed samples from raw annotated chains.
    Extract {
        /// Path to a JSON array of raw chain strings.
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for the processed samples.
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Analyze processed samples: group, order, and chain the equations.
    Analyze {
        /// Path to a processed samples file.
        #[arg(short, long)]
        input: PathBuf,

        /// Sample indices to combine (default: all).
        #[arg(short, long, value_delimiter = ',')]
        samples: Vec<usize>,

        /// Shuffle seed used when combining samples.
        #[arg(long, default_value_t = 0)]
        seed: u64,

        /// Fail groups whose dependencies form a cycle.
        #[arg(long)]
        strict: bool,

        /// Root sinkless groups at global node 0 (historical behavior).
        #[arg(long)]
        legacy_root: bool,

        /// Print the full report as JSON instead of rendered chains.
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Extract { input, output } => run_extract(&input, &output),
        Commands::Analyze {
            input,
            samples,
            seed,
            strict,
            legacy_root,
            json,
        } => run_analyze(&input, &samples, seed, strict, legacy_root, json),
    };
    process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Execute the extract subcommand.
///
/// Returns exit code: 0 = success, 1 = extraction error, 2 = malformed
/// input, 3 = I/O error.
fn run_extract(input: &Path, output: &Path) -> i32 {
    let text = match fs::read_to_string(input) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", input.display(), e);
            return 3;
        }
    };

    let raws: Vec<String> = match serde_json::from_str(&text) {
        Ok(raws) => raws,
        Err(e) => {
            eprintln!("Error: '{}' is not a JSON array of chains: {}", input.display(), e);
            return 2;
        }
    };

    let mut extractor = match ChainExtractor::new() {
        Ok(extractor) => extractor,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let mut samples = Vec::with_capacity(raws.len());
    for (index, raw) in raws.iter().enumerate() {
        match extractor.process_chain(raw) {
            Ok(sample) => {
                if sample.is_empty() {
                    warn!(chain = index, "no annotated equations found");
                }
                samples.push(sample);
            }
            Err(e) => {
                eprintln!("Error: chain {}: {}", index, e);
                return 1;
            }
        }
    }
    info!(chains = samples.len(), "extraction complete");

    match save_samples(output, &samples) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: failed to write '{}': {}", output.display(), e);
            3
        }
    }
}

/// Analysis report for `--json` output.
#[derive(Serialize)]
struct AnalyzeReport<'a> {
    groups: &'a [Vec<NodeId>],
    orderings: &'a [Result<Vec<NodeId>, EngineError>],
    chains: &'a [Result<ChainTree, EngineError>],
}

/// Execute the analyze subcommand.
///
/// Returns exit code: 0 = success, 1 = one or more groups failed,
/// 2 = malformed input, 3 = I/O error.
fn run_analyze(
    input: &Path,
    selection: &[usize],
    seed: u64,
    strict: bool,
    legacy_root: bool,
    json: bool,
) -> i32 {
    let samples = match load_samples(input) {
        Ok(samples) => samples,
        Err(DatasetError::Io(e)) => {
            eprintln!("Error: failed to read '{}': {}", input.display(), e);
            return 3;
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            return 2;
        }
    };

    let selected: Vec<Sample> = if selection.is_empty() {
        samples
    } else {
        let mut picked = Vec::with_capacity(selection.len());
        for &index in selection {
            match samples.get(index) {
                Some(sample) => picked.push(sample.clone()),
                None => {
                    eprintln!(
                        "Error: sample index {} out of range ({} samples)",
                        index,
                        samples.len()
                    );
                    return 2;
                }
            }
        }
        picked
    };

    let combined = combine_samples(&selected, seed);
    let graph = match build_graph(&combined) {
        Ok(graph) => graph,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "dependency graph built"
    );

    let config = EngineConfig {
        strict,
        legacy_terminal_fallback: legacy_root,
    };

    let classification = classify(&graph);
    info!(groups = classification.groups.len(), "groups classified");

    let orderings = sequence(
        &classification.groups,
        &graph,
        &classification.reverse,
        &config,
    );
    let chains = build_chains(
        &classification.groups,
        &graph,
        &classification.reverse,
        &config,
    );

    let mut failed = false;
    for result in orderings.iter().map(|r| r.as_ref().err()) {
        if let Some(e) = result {
            warn!(group = e.group(), "{}", e);
            failed = true;
        }
    }

    if json {
        let report = AnalyzeReport {
            groups: &classification.groups,
            orderings: &orderings,
            chains: &chains,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: failed to serialize report: {}", e);
                return 1;
            }
        }
        failed |= chains.iter().any(|c| c.is_err());
    } else {
        for chain in &chains {
            match chain {
                Ok(tree) => print!("{}", render(tree, &graph)),
                Err(e) => {
                    warn!(group = e.group(), "{}", e);
                    failed = true;
                }
            }
        }
    }

    if failed {
        1
    } else {
        0
    }
}
