//! Sampling loop configuration.

use serde::{Deserialize, Serialize};

use super::defaults;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of EVALUATE/SAMPLE/TRAIN cycles after the initial fit. Default: 3.
    pub num_iterations: Option<usize>,
    /// Examples requested per sampling step, split across classes. Default: 5000.
    pub sampling_size: Option<usize>,
}

impl SamplingConfig {
    pub fn effective_num_iterations(&self) -> usize {
        self.num_iterations.unwrap_or(defaults::DEFAULT_NUM_ITERATIONS)
    }

    pub fn effective_sampling_size(&self) -> usize {
        self.sampling_size.unwrap_or(defaults::DEFAULT_SAMPLING_SIZE)
    }
}
