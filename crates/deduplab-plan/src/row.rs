use serde::{Deserialize, Serialize};

/// A single plan entry. Field order is fixed and matches the CSV header
/// exactly: `status,op,src_path,dst_path,content_id,reason,rollback_key,ts`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanRow {
    pub status: String,
    pub op: String,
    pub src_path: String,
    pub dst_path: String,
    pub content_id: String,
    pub reason: String,
    pub rollback_key: String,
    pub ts: String,
}

impl PlanRow {
    pub fn planned_move(
        src_path: String,
        dst_path: String,
        sha256: &str,
        context_tag: &str,
        rollback_ordinal: u32,
        ts: &str,
    ) -> Self {
        Self {
            status: "planned".to_string(),
            op: "move".to_string(),
            src_path,
            dst_path,
            content_id: format!("b3:sha256:{sha256}:ctx:{context_tag}"),
            reason: "dedup".to_string(),
            rollback_key: format!("rbk:{rollback_ordinal:06}"),
            ts: ts.to_string(),
        }
    }
}
