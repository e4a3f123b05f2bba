//! Output locations for metrics and the run report.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Metrics history export; `.csv` writes CSV, anything else JSON.
    pub metrics_path: Option<String>,
    /// JSON run report.
    pub report_path: Option<String>,
}
