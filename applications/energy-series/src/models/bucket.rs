use super::reading::InstallationType;
use serde::{Deserialize, Serialize};

/// One time slot of a chart series. All figures are kWh.
///
/// `total` is always the sum of the three category figures; every mutation
/// goes through methods that keep it that way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    #[serde(alias = "name")]
    pub label: String,
    pub total: f64,
    pub residential: f64,
    pub commercial: f64,
    pub industrial: f64,
    pub consumption: f64,
}

impl Bucket {
    pub fn empty(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            total: 0.0,
            residential: 0.0,
            commercial: 0.0,
            industrial: 0.0,
            consumption: 0.0,
        }
    }

    /// Add generation to one category
    pub fn add_generation(&mut self, category: InstallationType, kwh: f64) {
        match category {
            InstallationType::Residential => self.residential += kwh,
            InstallationType::Commercial => self.commercial += kwh,
            InstallationType::Industrial => self.industrial += kwh,
        }
        self.sync_total();
    }

    pub fn add_consumption(&mut self, kwh: f64) {
        self.consumption += kwh;
    }

    /// Multiply every figure by `factor`
    pub fn scale(&mut self, factor: f64) {
        self.residential *= factor;
        self.commercial *= factor;
        self.industrial *= factor;
        self.consumption *= factor;
        self.sync_total();
    }

    /// Set the bucket's generation to `kwh`, keeping the category mix.
    ///
    /// A bucket with no prior generation has no mix to keep, so everything
    /// lands in the default category.
    pub fn set_generation(&mut self, kwh: f64) {
        if self.total > 0.0 {
            let ratio = kwh / self.total;
            self.residential *= ratio;
            self.commercial *= ratio;
            self.industrial *= ratio;
        } else {
            self.residential = kwh;
            self.commercial = 0.0;
            self.industrial = 0.0;
        }
        self.sync_total();
    }

    pub fn category_sum(&self) -> f64 {
        self.residential + self.commercial + self.industrial
    }

    fn sync_total(&mut self) {
        self.total = self.category_sum();
    }
}
