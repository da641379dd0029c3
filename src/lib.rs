//! This crate implements a distributed sort for text files composed of line records,
//! for example CSV or TSV, ordered by one numeric field.
//!
//! The input is split over a fixed group of workers. Each worker runs on its own
//! thread with private memory and communicates only through blocking point to point
//! channels: rank 0, the coordinator, reads the input, computes a balanced partition
//! plan, broadcasts the record count and scatters one partition to every worker;
//! every rank sorts its partition independently; the workers stream their sorted
//! partitions back and the coordinator folds them into one globally ordered run
//! before writing the output. The design favors a simple, fully serialized
//! coordinator over throughput and is intended for batch, non interactive use.
//!
//! The record schema is fixed: {name, price, brand, category}, sorted ascending by
//! price. Records with equal prices keep no particular relative order.
//!
//! # Examples
//! ```
//! use std::path::PathBuf;
//! use record_cluster_sort::sort::ClusterSort;
//!
//! // optimized for use with Jemalloc
//! use tikv_jemallocator::Jemalloc;
//! #[global_allocator]
//! static GLOBAL: Jemalloc = Jemalloc;
//!
//! // distributed record sort
//! fn sort_products(input: PathBuf, output: PathBuf) -> Result<(), anyhow::Error> {
//!     let mut cluster_sort = ClusterSort::new(input, output);
//!
//!     // set the number of workers the input will be partitioned over. When given
//!     // a number that exceeds the record count the excess workers receive empty
//!     // partitions. The default is to use all available cores.
//!     cluster_sort.with_workers(4);
//!
//!     cluster_sort.sort()?;
//!     Ok(())
//! }
//! ```
//!

pub(crate) mod config;
pub(crate) mod distribution;
pub(crate) mod merge;
pub(crate) mod quicksort;
pub(crate) mod worker_group;

pub mod error;
pub mod plan;
pub mod record;
pub mod sort;
