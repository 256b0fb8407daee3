// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-splice CLI
//!
//! Scores the splicing impact of variants in a VCF or CSV file.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::util::SubscriberInitExt;

use ferro_splice::annotation::{load_gtf, GeneDb};
use ferro_splice::batch::{BatchConfig, BatchProcessor};
use ferro_splice::cli::InputFormat;
use ferro_splice::config::{CliOverrides, FileConfig};
use ferro_splice::model::load_ensemble;
use ferro_splice::{
    ColumnIds, FastaProvider, GroupSelection, SpliceError, TableAnnotator, VariantScorer,
    VcfAnnotator,
};

#[derive(Parser)]
#[command(name = "ferro-splice")]
#[command(author, version, about = "Score variant effects on splicing")]
#[command(
    long_about = "Score the splicing impact of variants against an ensemble of splice-site models.

Each scored record gets, per overlapping gene, the largest predicted splice-site
gain and loss within the scoring distance and their offsets from the variant.

Examples:
  ferro-splice calls.vcf.gz GRCh38.fa genes.gtf.gz out --models models.json
  ferro-splice table.csv GRCh38.fa genes.gtf out --models models.json -c chr,pos,ref,alt -m -s 0.2"
)]
struct Cli {
    /// Variant file (.vcf or .csv, optionally gzipped)
    variants: PathBuf,

    /// Indexed reference FASTA
    reference: PathBuf,

    /// Gene annotation (GTF, optionally gzipped, or a JSON gene database)
    annotation: PathBuf,

    /// Output prefix; writes <prefix>.vcf or <prefix>.csv
    output_prefix: String,

    /// Model ensemble manifest (JSON)
    #[arg(long)]
    models: PathBuf,

    /// CSV column ids for chromosome, position, ref and alt
    #[arg(short = 'c', long, default_value = "CHROM,POS,REF,ALT")]
    column_ids: ColumnIds,

    /// Mask gains at annotated splice sites and losses elsewhere
    #[arg(short, long)]
    mask: bool,

    /// Report every position with |score| >= cutoff instead of the top hit
    #[arg(short = 's', long)]
    score_cutoff: Option<f32>,

    /// Bases on each side of the variant to score
    #[arg(short, long)]
    distance: Option<usize>,

    /// Context groups to consult: "all" or comma-separated indices
    #[arg(long)]
    groups: Option<GroupSelection>,

    /// Average replicates within each group before aggregating
    #[arg(long)]
    replicate_mean: bool,

    /// Worker threads (0 uses all cores)
    #[arg(long, default_value = "0")]
    threads: usize,

    /// Config file (defaults to .ferro-splice.toml or ~/.config/ferro-splice/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "info" or "ferro_splice=debug"
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e.detailed_message());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), SpliceError> {
    let format = InputFormat::detect(&cli.variants)?;

    let file_config = match &cli.config {
        Some(path) => FileConfig::load_from_path(path)?,
        None => FileConfig::load()?.unwrap_or_default(),
    };
    let config = file_config.merge_with_cli(&CliOverrides {
        distance: cli.distance,
        mask: cli.mask,
        score_cutoff: cli.score_cutoff,
        context_groups: cli.groups.clone(),
        replicate_mean: cli.replicate_mean,
    })?;

    #[cfg(feature = "parallel")]
    ferro_splice::parallel::configure_threads(cli.threads)?;

    let sequences = FastaProvider::new(&cli.reference)?;
    let genes = load_annotation(&cli.annotation)?;
    let ensemble = load_ensemble(&cli.models)?;
    info!(
        "Loaded {} genes and {} models in {} context groups",
        genes.len(),
        ensemble.member_count(),
        ensemble.groups().len()
    );

    let scorer = VariantScorer::new(&sequences, &genes, &ensemble, &config)?;
    let processor = BatchProcessor::with_config(&scorer, BatchConfig::new());
    let output = format.output_path(&cli.output_prefix);

    let stats = match format {
        InputFormat::Vcf => VcfAnnotator::new().annotate_file(&cli.variants, &output, &processor)?,
        InputFormat::Csv => TableAnnotator::new(cli.column_ids.clone()).annotate_file(
            &cli.variants,
            &output,
            &processor,
        )?,
    };

    info!("Wrote {} ({})", output.display(), stats);
    Ok(())
}

fn load_annotation(path: &Path) -> Result<GeneDb, SpliceError> {
    if path.extension().is_some_and(|ext| ext == "json") {
        GeneDb::from_json(path)
    } else {
        load_gtf(path)
    }
}

/// Initialize tracing with the given filter; `log` records are forwarded.
fn init_tracing(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter};

    let filter =
        EnvFilter::try_new(level).map_err(|e| format!("Invalid log level '{}': {}", level, e))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()?;

    Ok(())
}
