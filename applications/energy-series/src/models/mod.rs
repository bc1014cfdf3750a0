pub mod bucket;
pub mod event;
pub mod overview;
pub mod reading;
pub mod timestamp;

pub use bucket::Bucket;
pub use event::{EnergyUpdate, StreamEvent, ENERGY_UPDATE};
pub use overview::{InstallationSummary, SummaryFigures, SystemOverview};
pub use reading::{InstallationType, Reading};
pub use timestamp::Timestamp;
