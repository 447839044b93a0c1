//! Context-aware duplicate group planning: deterministic keeper selection,
//! collision-free destination resolution, and the CSV plan codec.

mod codec;
mod planner;
mod row;
mod unique;

pub use codec::{read_plan_csv, write_plan_csv, Error, Result};
pub use planner::{build_plan, build_plan_at, QUARANTINE_DIR};
pub use row::PlanRow;
pub use unique::ensure_unique;
