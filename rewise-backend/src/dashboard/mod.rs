//! Review dashboard: progress metrics rendered onto a dedicated page.

pub mod metrics;
pub mod publish;
pub mod render;

pub use metrics::DashboardMetrics;
pub use render::Section;
