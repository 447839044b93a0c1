//! Parallel scheduling of fingerprint, MIME, and context-classification jobs
//! over a bounded worker pool. The Store is untouched by workers; the
//! orchestrator upserts the returned batch as a single writer.

mod aggregate;
mod indexer;
mod progress;

pub use aggregate::Aggregator;
pub use indexer::index;
pub use progress::{IndicatifSink, NoopSink, ProgressSink};
