//! Carbon footprint estimation over an OpenRouter chat-completion model.
//!
//! The gateway owns the HTTP surface; this crate owns everything between a
//! validated activity string and a parsed kg CO₂e number.

pub mod config;
pub mod error;
pub mod llm;
pub mod parse;
pub mod prompt;

pub use config::EstimatorConfig;
pub use error::EstimateError;
pub use llm::{Estimate, Estimator};
pub use prompt::Activity;
