//! Application-level configuration.
//!
//! - [`EvalConfig`]: which workflow a session runs and how calibration
//!   quizzes are judged

pub mod eval_config;

pub use eval_config::EvalConfig;
