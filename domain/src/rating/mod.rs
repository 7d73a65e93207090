//! Rating domain
//!
//! Everything that ends up in, or is derived from, the result store.
//!
//! - [`record::RatingRecord`]: the unit of persistence, keyed by [`record::RecordKey`]
//! - [`consistency::evaluate_consistency`]: scores vs. blind preference agreement
//! - [`calibration::CalibrationReport`]: per-rater accuracy on reference samples
//! - [`criteria`]: the static rating legend

pub mod calibration;
pub mod consistency;
pub mod criteria;
pub mod record;

pub use calibration::{CalibrationPolicy, CalibrationReport};
pub use consistency::evaluate_consistency;
pub use record::{Preference, RatingRecord, RecordKey};
