use std::collections::BTreeMap;

use deduplab_classify::ContextTag;
use deduplab_store::FileRecord;

/// Stand-in for the source's pluggable dataframe backend (SPEC_FULL.md §B.1):
/// just enough aggregation to report scan totals, with one inline
/// implementation rather than a GPU/CPU-switchable trait object.
pub trait Aggregator {
    fn total_bytes(&self) -> u64;
    fn by_context_tag(&self) -> BTreeMap<ContextTag, u64>;
}

impl Aggregator for [FileRecord] {
    fn total_bytes(&self) -> u64 {
        self.iter().map(|r| r.size.max(0) as u64).sum()
    }

    fn by_context_tag(&self) -> BTreeMap<ContextTag, u64> {
        let mut counts = BTreeMap::new();
        for record in self {
            *counts.entry(record.context_tag).or_insert(0u64) += 1;
        }
        counts
    }
}
