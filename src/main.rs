use std::path::PathBuf;

use clap::Parser;
use log::LevelFilter;
use simple_logger::SimpleLogger;

use record_cluster_sort::sort::ClusterSort;

/// Sort a delimited record file by price across a group of workers.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input file of delimiter separated records: name, price, brand, category
    input: PathBuf,

    /// Output file for the sorted records
    output: PathBuf,

    /// Number of workers; 0 uses all available cores
    #[arg(short, long, default_value_t = 0)]
    workers: usize,

    /// Field separator
    #[arg(short = 's', long, default_value_t = ',')]
    field_separator: char,
}

fn main() -> Result<(), anyhow::Error> {
    SimpleLogger::new().with_level(LevelFilter::Info).init()?;
    let args = Args::parse();

    let mut cluster_sort = ClusterSort::new(args.input, args.output);
    cluster_sort.with_workers(args.workers);
    cluster_sort.with_field_separator(args.field_separator);
    let report = cluster_sort.sort()?;

    log::info!(
        "Total sorting time: {} ms, records: {}",
        report.elapsed().as_millis(),
        report.records(),
    );
    Ok(())
}
