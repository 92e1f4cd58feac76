//! Cohort analytics over stored sessions and the CSV exports consumed by reporting.

mod export;
mod router;
mod summary;
mod views;


pub use export::{
    barriers_csv, sessions_csv, write_barriers_csv, write_sessions_csv, ExportError,
};
pub use router::analytics_router;
pub use views::{
    AnalyticsSummary, BarrierStatistic, CategoryDistribution, IndexDrift, ModelSummary,
    CROSS_CUTTING_LABEL,
};
