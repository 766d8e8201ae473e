//! Symbol id generator, benchmark and status server
//!
//! # Commands
//! - **generate**: exchange metadata -> `symbols.json` + perfect-hash source
//! - **filter**: narrow a runtime map by keyword
//! - **bench**: perfect hash vs dynamic map vs sorted table lookup cost
//! - **verify**: check both artifacts describe the same table
//! - **serve**: status-ingestion endpoint

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hft_symbols::artifacts::{
    filter_file, load_json_map, verify_agreement, ArtifactError, CaseTransform, PerfectHashSource,
    SymbolFilter,
};
use hft_symbols::bench::{
    measure_decode, measure_lookup, measure_lookup_parallel, read_capture, Comparison, LookupWorkload,
};
use hft_symbols::core::DynamicSymbolMap;
use hft_symbols::infrastructure::api::start_server;
use hft_symbols::infrastructure::logging::{init_console_logging, init_logging};
use hft_symbols::infrastructure::StatusService;
use hft_symbols::parsing::{ScanDecoder, SimdJsonDecoder};
use hft_symbols::phf::{DisplacementCompiler, HashTableCompiler};
use hft_symbols::pipeline::generate;
use hft_symbols::source::ExchangeInfoSource;
use hft_symbols::{Config, SymbolError};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(name = "hft-symbols")]
#[command(about = "Dense symbol ids and perfect-hash lookup tables for market-data hot paths")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the runtime map and perfect-hash source from exchange metadata
    Generate {
        /// Ignore the cached exchange info and fetch it again
        #[arg(long)]
        refresh: bool,
    },
    /// Write the subset of a runtime map whose keys match a keyword
    Filter {
        input: PathBuf,
        output: PathBuf,
        /// Substring to match (case-insensitive); the quote asset with --bases
        #[arg(default_value = "USDT")]
        keyword: String,
        /// Uppercase keys in the output
        #[arg(long)]
        capitalize: bool,
        /// Keep only keys starting with one of these base assets
        #[arg(long, value_delimiter = ',')]
        bases: Vec<String>,
    },
    /// Measure lookup cost of each lookup path
    Bench {
        /// Line-delimited bookTicker capture for decode timing
        #[arg(long)]
        capture: Option<PathBuf>,
    },
    /// Check that both artifacts agree
    Verify,
    /// Run the status endpoint
    Serve,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let config = Config::load().context("Failed to load configuration")?;

    match args.command {
        Command::Generate { refresh } => {
            let _guards = init_logging(&config.logging.dir)?;
            run_generate(&config, refresh).await
        }
        Command::Filter {
            input,
            output,
            keyword,
            capitalize,
            bases,
        } => {
            init_console_logging();
            run_filter(&input, &output, keyword, capitalize, bases)
        }
        Command::Bench { capture } => {
            let _guards = init_logging(&config.logging.dir)?;
            run_bench(&config, capture.as_deref())
        }
        Command::Verify => {
            init_console_logging();
            let paths = config.artifact_paths();
            let count = verify_agreement(&paths.json_map, &paths.perfect_hash_source)?;
            println!("Artifacts agree on {} symbols", count);
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve => {
            let _guards = init_logging(&config.logging.dir)?;
            let service = Arc::new(StatusService::new());
            start_server(service, config.api.port).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn run_generate(config: &Config, refresh: bool) -> Result<ExitCode> {
    let source = ExchangeInfoSource::from_config(&config.source);
    let info = source.load(refresh).await.map_err(SymbolError::from)?;

    let report = generate(&info, &config.artifact_paths())?;
    if report.empty_warning {
        println!("Warning: no tradable symbols; artifacts are empty");
    }
    println!(
        "Saved {} symbols to {} and {}",
        report.entries,
        report.paths.json_map.display(),
        report.paths.perfect_hash_source.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn run_filter(
    input: &Path,
    output: &Path,
    keyword: String,
    capitalize: bool,
    bases: Vec<String>,
) -> Result<ExitCode> {
    let filter = if bases.is_empty() {
        SymbolFilter::contains(keyword)
    } else {
        SymbolFilter::QuotedBase { bases, quote: keyword }
    };
    let transform = if capitalize {
        CaseTransform::Upper
    } else {
        CaseTransform::Preserve
    };

    match filter_file(input, output, &filter, transform) {
        Ok(filtered) => {
            println!("Filtered {} symbols into {}", filtered.len(), output.display());
            Ok(ExitCode::SUCCESS)
        }
        Err(ArtifactError::MissingInput(path)) => {
            eprintln!("Input file does not exist: {}", path.display());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn run_bench(config: &Config, capture: Option<&Path>) -> Result<ExitCode> {
    let paths = config.artifact_paths();
    let table = load_json_map(&paths.json_map)?;

    let source_text = std::fs::read_to_string(&paths.perfect_hash_source)
        .with_context(|| format!("Failed to read {}", paths.perfect_hash_source.display()))?;
    let source = PerfectHashSource::parse(&source_text)?;
    let perfect_hash = DisplacementCompiler::default().compile(&source)?;
    let dynamic = DynamicSymbolMap::from_table(&table);

    println!("Loaded {} symbols\n", table.len());

    let workload = LookupWorkload::uniform(
        table.entries().map(|(name, _)| name),
        config.bench.trials,
        config.bench.seed,
    );

    let phf_report = measure_lookup("perfect hash", &perfect_hash, &workload);
    let map_report = measure_lookup("std::HashMap", &dynamic, &workload);
    let sorted_report = measure_lookup("sorted table", &table, &workload);
    for report in [&map_report, &sorted_report, &phf_report] {
        println!("{}", report);
    }

    if config.bench.threads > 1 {
        let parallel =
            measure_lookup_parallel("perfect hash", &perfect_hash, &workload, config.bench.threads)?;
        println!("{}", parallel);
    }

    if let Some(path) = capture {
        let lines = read_capture(path)?;
        println!("\nDecoding {} captured lines", lines.len());
        println!("{}", measure_decode("scan + perfect hash", &mut ScanDecoder::new(&perfect_hash), &lines));
        println!("{}", measure_decode("scan + std::HashMap", &mut ScanDecoder::new(&dynamic), &lines));
        println!("{}", measure_decode("simd-json + perfect hash", &mut SimdJsonDecoder::new(&perfect_hash), &lines));
    }

    let comparison =
        Comparison::new(&phf_report, &map_report).with_tolerance(config.bench.regression_tolerance);
    println!("\n{}", comparison);

    if comparison.is_regression() {
        tracing::warn!("Perfect-hash lookup slower than dynamic map beyond tolerance");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
