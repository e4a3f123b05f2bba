//! # quarry-model
//!
//! The classifier plugged into the sampling controller: logistic
//! regression over L2-normalized bag-of-tokens features, trained with
//! mini-batch SGD + momentum and validation-loss early stopping.

pub mod features;
pub mod logistic;
pub mod optimizer;

pub use logistic::{LogisticRegression, LogisticRegressionConfig, ModelSnapshot};
pub use optimizer::MomentumSgd;
