pub mod collect;
pub mod http;

pub use collect::collect_readings;
pub use http::HttpReadingSource;

use crate::error::Result;
use crate::models::{Reading, SystemOverview};
use async_trait::async_trait;

/// Backend that reports the system overview and per-installation readings
#[async_trait]
pub trait ReadingSource: Send + Sync {
    async fn system_overview(&self) -> Result<SystemOverview>;

    /// Most recent readings for one installation, in no particular order
    async fn recent_readings(&self, installation_id: i64, limit: usize) -> Result<Vec<Reading>>;
}
