//! A command line tool for partitioning a chromosome into exonic, intronic,
//! and intergenic intervals from a GFF3 gene model.
//!
//! ```shell
//! cargo run --release --bin=gffpartition --features=binaries -- \
//!     partition annotation.gff3.gz 248956422 chr1.tsv
//! cargo run --release --bin=gffpartition --features=binaries -- stats chr1.tsv
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use anyhow::bail;
use clap::Parser;
use clap::Subcommand;
use clap_verbosity_flag::Verbosity;
use gffpartition::core::Chromosome;
use gffpartition::core::Label;
use gffpartition::gff;
use gffpartition::model;
use gffpartition::partition;
use gffpartition::pedigree;
use gffpartition::pedigree::Pedigree;
use gffpartition::stats;
use gffpartition::table;
use tabled::builder::Builder;
use tabled::settings::Alignment;
use tabled::settings::Style;
use tabled::settings::object::Rows;
use tracing::info;
use tracing::warn;
use tracing_log::AsTrace as _;
use tracing_subscriber::EnvFilter;

////////////////////////////////////////////////////////////////////////////////////////
// Partition
////////////////////////////////////////////////////////////////////////////////////////

/// Arguments for the `partition` subcommand.
#[derive(Debug, Parser)]
struct PartitionArgs {
    /// The GFF3 gene model (optionally gzip-compressed).
    gff: PathBuf,

    /// The length of the chromosome.
    chromosome_length: String,

    /// The labelled-interval table to write.
    output: PathBuf,

    /// Merge exons across genes so that overlapping genes do not label any
    /// position twice.
    #[arg(long, default_value_t = false)]
    merge_across_genes: bool,
}

fn partition_chromosome(args: &PartitionArgs) -> Result<()> {
    let chromosome = args
        .chromosome_length
        .parse::<Chromosome>()
        .with_context(|| format!("parsing chromosome length: {}", args.chromosome_length))?;

    let reader = gffpartition::io::open(&args.gff)
        .with_context(|| format!("opening gene model: {}", args.gff.display()))?;

    let model = model::Builder
        .try_build_from(gff::Reader::new(reader))
        .with_context(|| format!("reading gene model: {}", args.gff.display()))?;

    info!(
        "read {} genes ({} records skipped)",
        model.len(),
        model.skipped()
    );

    let partition = partition::Builder::default()
        .merge_across_genes(args.merge_across_genes)
        .build_from(&model, &chromosome);

    if !partition.overlapping_genes().is_empty() {
        warn!(
            "{} pairs of genes overlap: some positions are labelled more than once",
            partition.overlapping_genes().len()
        );
    }

    write_table(&args.output, &partition)
        .with_context(|| format!("writing table: {}", args.output.display()))?;

    let summary = partition.summary();

    for label in Label::ALL {
        println!("{} count: {}", label, summary.tally(label).count());
    }

    println!(
        "mean EXON length: {:.2}",
        summary.tally(Label::Exon).mean_length()
    );
    println!(
        "mean INTRON length: {:.2}",
        summary.tally(Label::Intron).mean_length()
    );
    println!(
        "EXON percentage of covered length: {:.2}%",
        summary.percentage(Label::Exon)
    );
    println!("output written to: {}", args.output.display());

    Ok(())
}

fn write_table(path: &Path, partition: &partition::Partition) -> Result<()> {
    let file = File::create(path).context("creating file")?;
    let mut writer = table::Writer::new(BufWriter::new(file));

    writer
        .write_all(partition.intervals())
        .context("writing rows")?;
    writer.finish().context("flushing rows")?;

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////
// Stats
////////////////////////////////////////////////////////////////////////////////////////

/// Arguments for the `stats` subcommand.
#[derive(Debug, Parser)]
struct StatsArgs {
    /// The labelled-interval table.
    table: PathBuf,
}

fn compute_stats(args: &StatsArgs) -> Result<()> {
    let reader = gffpartition::io::open(&args.table)
        .with_context(|| format!("opening table: {}", args.table.display()))?;

    let report = stats::Reducer::try_reduce_from(table::Reader::new(reader))
        .with_context(|| format!("reading table: {}", args.table.display()))?;

    if report.unrecognized() > 0 {
        warn!(
            "{} rows with an unrecognized label were counted towards the total length only",
            report.unrecognized()
        );
    }

    if !report.is_consistent() {
        warn!(
            "labelled length ({}) does not match the total length ({}): rows overlap",
            report.labelled_length(),
            report.total_length()
        );
    }

    let mut builder = Builder::default();
    builder.push_record(["Feature", "Count", "Mean Length", "Percentage"]);

    for label in Label::ALL {
        builder.push_record([
            label.to_string(),
            report.count(label).to_string(),
            format!("{:.2}", report.mean_length(label)),
            format!("{:.2}%", report.percentage(label)),
        ]);
    }

    let table = builder
        .build()
        .with(Style::rounded())
        .modify(Rows::new(1..), Alignment::left())
        .to_string();

    println!("{}", table);
    println!("total length: {}", report.total_length());

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////
// Pedigree
////////////////////////////////////////////////////////////////////////////////////////

/// Arguments for the `pedigree` subcommand.
#[derive(Debug, Parser)]
struct PedigreeArgs {
    /// The pedigree file.
    pedigree: PathBuf,

    /// The identifier of a founder (may be repeated).
    #[arg(short, long = "founder", required = true)]
    founders: Vec<String>,

    /// Where to write the filtered pedigree (defaults to stdout).
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn filter_pedigree(args: &PedigreeArgs) -> Result<()> {
    if args.founders.iter().any(|id| id == pedigree::UNKNOWN_PARENT) {
        bail!(
            "`{}` marks an unknown parent and cannot be a founder",
            pedigree::UNKNOWN_PARENT
        );
    }

    let reader = gffpartition::io::open(&args.pedigree)
        .with_context(|| format!("opening pedigree: {}", args.pedigree.display()))?;

    let individuals = Pedigree::try_read_from(reader)
        .with_context(|| format!("reading pedigree: {}", args.pedigree.display()))?;

    let founders = args.founders.iter().cloned().collect::<HashSet<_>>();
    let descendants = individuals.descendants_of(&founders);

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output: {}", path.display()))?;
            pedigree::write_records(&mut BufWriter::new(file), descendants)
                .with_context(|| format!("writing output: {}", path.display()))?;
            info!("filtered pedigree written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            pedigree::write_records(&mut stdout.lock(), descendants)
                .context("writing to stdout")?;
        }
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////////////
// Main
////////////////////////////////////////////////////////////////////////////////////////

/// The available subcommands.
#[derive(Debug, Subcommand)]
enum Command {
    /// Partitions a chromosome into EXON, INTRON, and NC intervals.
    Partition(PartitionArgs),

    /// Computes statistics from a labelled-interval table.
    Stats(StatsArgs),

    /// Filters a pedigree down to the descendants of a set of founders.
    Pedigree(PedigreeArgs),
}

/// Partitions a chromosome into exonic, intronic, and intergenic intervals.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// The subcommand.
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbose: Verbosity,
}

fn run(args: &Args) -> Result<()> {
    match &args.command {
        Command::Partition(args) => partition_chromosome(args),
        Command::Stats(args) => compute_stats(args),
        Command::Pedigree(args) => filter_pedigree(args),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    match std::env::var("RUST_LOG") {
        Ok(_) => tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_max_level(args.verbose.log_level_filter().as_trace())
            .init(),
    };

    run(&args)
}
