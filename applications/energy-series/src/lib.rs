pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod series;
pub mod service;
pub mod source;
pub mod state;

// Re-export commonly used items
pub use config::Config;
pub use error::{AppError, Result};
pub use models::{Bucket, EnergyUpdate, Reading, StreamEvent, SystemOverview};
pub use series::{aggregate, Aggregator, AuthoritativeTotals, Granularity, Series};
pub use service::{Dashboard, DashboardService};
pub use state::{DisplayedSeries, SeriesStore};
