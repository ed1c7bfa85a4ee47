//! Per-station min/mean/max over large `station;temperature` files.
//!
//! The input is never loaded whole. [`chunk::compute_chunks`] cuts it into line-aligned byte
//! ranges, [`worker::process_chunk`] folds each range into its own [`Table`] on a worker pool, and
//! [`reduce::reduce`] merges those tables on a single thread as they complete.
//!
//! ```no_run
//! use tempagg::{aggregate_path, write_report, Config, Format};
//!
//! let table = aggregate_path("measurements.txt", &Config::default())?;
//! write_report(&mut std::io::stdout().lock(), &table, Format::Standard)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use rustc_hash::FxHashMap as HashMap;

pub mod chunk;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod reduce;
pub mod report;
pub mod source;
pub mod summary;
pub mod worker;

pub use chunk::{compute_chunks, verify_partition, Chunk};
pub use config::Config;
pub use coordinator::{aggregate, aggregate_path};
pub use error::{Error, RecordError, Result};
pub use report::{write_report, Format};
pub use source::ByteSource;
pub use summary::Summary;

/// Station name to its running summary.
pub type Table = HashMap<String, Summary>;
