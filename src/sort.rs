use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context};
use regex::Regex;

use crate::config::Config;
use crate::distribution;
use crate::error::SortError;
use crate::merge;
use crate::plan::PartitionPlan;
use crate::quicksort;
use crate::record::Record;
use crate::worker_group::{WorkerGroup, COORDINATOR};

/// Sort a delimited record file with a fixed group of message passing workers
///
/// # Examples
/// ```
/// use std::path::PathBuf;
/// use record_cluster_sort::sort::ClusterSort;
///
/// // distributed record sort
/// fn sort_products(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
///     let mut cluster_sort = ClusterSort::new(input, output);
///     // set the number of workers the sort will partition the input over. The
///     // default is to use all available cores.
///     cluster_sort.with_workers(4);
///     cluster_sort.sort()?;
///     Ok(())
/// }
/// ```
pub struct ClusterSort {
    input: PathBuf,
    output: PathBuf,
    workers: usize,
    field_separator: char,
    ignore_lines: Option<Regex>,
}

impl ClusterSort {
    /// Create a default ClusterSort definition.
    ///
    /// * the default field separator is a comma (',')
    /// * the default worker count is zero, which will use all available cores
    /// * blank lines are always skipped
    /// * no lines are ignored by pattern
    pub fn new(input: PathBuf, output: PathBuf) -> ClusterSort {
        ClusterSort {
            input,
            output,
            workers: 0,
            field_separator: ',',
            ignore_lines: None,
        }
    }

    /// Set the number of workers. The default is zero which will result in
    /// using all system cores. Each worker owns one contiguous partition of
    /// the input.
    pub fn with_workers(&mut self, workers: usize) {
        self.workers = workers;
    }

    /// Set the field separator. The default is ','
    pub fn with_field_separator(&mut self, field_separator: char) {
        self.field_separator = field_separator
    }

    /// Specify which lines to skip on read. Each line matching the regex will
    /// be dropped and will not appear in the output.
    pub fn with_ignore_lines(&mut self, r: Regex) {
        self.ignore_lines = Some(r)
    }

    /// Sort the input file into the output file.
    ///
    /// The coordinator reads and decodes the whole input, broadcasts the
    /// record count, scatters one partition to every worker, sorts its own
    /// partition, then folds each worker's sorted partition back into a
    /// single run in ascending rank order. The output file is opened only
    /// after the merge completes, so a failed run leaves no partial output.
    pub fn sort(&self) -> Result<SortReport, anyhow::Error> {
        let config = self.create_config();
        let start = Instant::now();
        log::info!("Start cluster sort, workers: {}", config.workers());
        let records = Self::read_records(&self.input, &config)?;
        log::info!("Read {} records from {}", records.len(), self.input.to_string_lossy());
        let sorted = Self::run_group(records, &config)?;
        Self::write_records(&self.output, &sorted, config.field_separator())?;
        let report = SortReport::new(sorted.len(), start.elapsed());
        log::info!(
            "Finish cluster sort, records: {}, elapsed: {} ms",
            report.records(),
            report.elapsed().as_millis(),
        );
        Ok(report)
    }

    /// Verify that the input file is already sorted, non decreasing in price.
    pub fn check(&self) -> Result<bool, anyhow::Error> {
        let config = self.create_config();
        Self::internal_check(&self.input, &config)
    }

    fn create_config(&self) -> Config {
        let mut workers = self.workers;
        if self.workers == 0 {
            workers = num_cpus::get();
        }
        Config::new(workers, self.field_separator, self.ignore_lines.clone())
    }

    pub(crate) fn internal_check(path: &PathBuf, config: &Config) -> Result<bool, anyhow::Error> {
        let mut result = true;
        let mut previous: Option<i64> = None;
        let reader = BufReader::new(
            File::open(path).with_context(|| format!("path: {}", path.to_string_lossy()))?
        );
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            if let Some(r) = config.ignore_lines() {
                if r.is_match(line) {
                    continue;
                }
            }
            let record = Record::decode(line, config.field_separator())
                .with_context(|| format!("file: {}, line: {}", path.to_string_lossy(), n + 1))?;
            match previous {
                None => {
                    previous = Some(record.price_cents());
                }
                Some(previous_price) => {
                    if previous_price <= record.price_cents() {
                        previous = Some(record.price_cents());
                    } else {
                        result = false;
                        break;
                    }
                }
            }
        }
        Ok(result)
    }

    fn read_records(path: &PathBuf, config: &Config) -> Result<Vec<Record>, anyhow::Error> {
        let reader = BufReader::new(
            File::open(path).with_context(|| format!("path: {}", path.to_string_lossy()))?
        );
        let mut records = Vec::new();
        for (n, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                continue;
            }
            if let Some(r) = config.ignore_lines() {
                if r.is_match(line) {
                    continue;
                }
            }
            let record = Record::decode(line, config.field_separator())
                .with_context(|| format!("file: {}, line: {}", path.to_string_lossy(), n + 1))?;
            records.push(record);
        }
        Ok(records)
    }

    fn write_records(path: &PathBuf, records: &[Record], field_separator: char) -> Result<(), anyhow::Error> {
        let mut writer = BufWriter::new(
            File::create(path).with_context(|| format!("path: {}", path.to_string_lossy()))?
        );
        for record in records {
            writeln!(writer, "{}", record.encode(field_separator))?;
        }
        Ok(())
    }

    fn run_group(records: Vec<Record>, config: &Config) -> Result<Vec<Record>, anyhow::Error> {
        thread::scope(|scope| {
            let mut handles = WorkerGroup::mesh(config.workers());
            let coordinator = handles.remove(0);
            let mut joins = Vec::new();
            for group in handles {
                let worker_config = config.clone();
                let join = thread::Builder::new()
                    .name(format!("worker-{}", group.rank()))
                    .spawn_scoped(scope, move || node(&group, &worker_config, None))?;
                joins.push(join);
            }
            let result = node(&coordinator, config, Some(records))?;
            drop(coordinator);
            for join in joins {
                match join.join() {
                    Ok(node_result) => {
                        node_result?;
                    }
                    Err(_) => {
                        return Err(anyhow!("worker thread panicked"));
                    }
                }
            }
            result.ok_or_else(|| anyhow!("coordinator produced no result"))
        })
    }
}

/// One rank's lifecycle inside the group. The coordinator passes the decoded
/// input and gets the merged run back; workers pass nothing and return
/// nothing, their partition travels through the channels.
fn node(
    group: &WorkerGroup,
    config: &Config,
    input: Option<Vec<Record>>,
) -> Result<Option<Vec<Record>>, SortError> {
    let rank = group.rank();
    let local_total = input.as_ref().map_or(0, |records| records.len());
    let total = group.broadcast(COORDINATOR, local_total as u64)? as usize;
    let plan = PartitionPlan::new(total, group.size())?;

    let mut partition = match input {
        Some(records) => distribution::scatter(group, &records, &plan, config.field_separator())?,
        None => distribution::recv_partition(group, COORDINATOR, plan.size(rank), config.field_separator())?,
    };
    quicksort::sort_by_price(&mut partition);
    log::debug!(
        "Sorted partition of {} records, thread: {}",
        partition.len(),
        thread::current().name().unwrap_or("unnamed"),
    );

    let result = if rank == COORDINATOR {
        let mut sorted = partition;
        for peer in 1..group.size() {
            let incoming = distribution::recv_partition(group, peer, plan.size(peer), config.field_separator())?;
            log::debug!("Merging {} sorted records from worker {}", incoming.len(), peer);
            sorted = merge::merge_by_price(sorted, incoming);
        }
        Some(sorted)
    } else {
        distribution::send_partition(group, COORDINATOR, &partition, config.field_separator())?;
        None
    };
    group.barrier();
    Ok(result)
}

/// Outcome of a successful sort: the number of records written and the wall
/// clock time of the whole run.
#[derive(Clone, Debug)]
pub struct SortReport {
    records: usize,
    elapsed: Duration,
}

impl SortReport {
    pub(crate) fn new(records: usize, elapsed: Duration) -> SortReport {
        SortReport {
            records,
            elapsed,
        }
    }

    pub fn records(&self) -> usize {
        self.records
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}
