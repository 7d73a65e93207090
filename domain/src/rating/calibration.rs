//! Criteria calibration metrics
//!
//! A calibration quiz plays reference samples with known expected scores and
//! measures how far the rater's scores land from them.

use super::record::RatingRecord;
use serde::{Deserialize, Serialize};

/// Thresholds for judging a calibration run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationPolicy {
    /// Largest absolute error still counted as correct
    pub tolerance: f64,
    /// Minimum accuracy (percent) required to pass
    pub pass_threshold: f64,
}

impl Default for CalibrationPolicy {
    fn default() -> Self {
        Self {
            tolerance: 1.0,
            pass_threshold: 80.0,
        }
    }
}

/// Accuracy of one rater over the reference samples they rated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalibrationReport {
    pub rated: usize,
    /// Percentage of ratings within tolerance
    pub accuracy: f64,
    pub avg_error: f64,
    pub min_error: f64,
    pub max_error: f64,
    pub passed: bool,
}

impl CalibrationReport {
    /// Build a report from records carrying a reference score
    ///
    /// Records without a reference score are ignored. Returns `None` when no
    /// record qualifies.
    pub fn from_records<'a>(
        records: impl IntoIterator<Item = &'a RatingRecord>,
        policy: &CalibrationPolicy,
    ) -> Option<Self> {
        let errors: Vec<f64> = records
            .into_iter()
            .filter_map(RatingRecord::reference_error)
            .collect();
        if errors.is_empty() {
            return None;
        }

        let rated = errors.len();
        let within = errors.iter().filter(|e| **e <= policy.tolerance).count();
        let accuracy = within as f64 / rated as f64 * 100.0;
        let avg_error = errors.iter().sum::<f64>() / rated as f64;
        let min_error = errors.iter().copied().fold(f64::INFINITY, f64::min);
        let max_error = errors.iter().copied().fold(0.0, f64::max);

        Some(Self {
            rated,
            accuracy,
            avg_error,
            min_error,
            max_error,
            passed: accuracy >= policy.pass_threshold,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::subject::Subject;
    use crate::core::rater::RaterName;
    use crate::core::score::{Score, ScoreScale};

    fn rated(reference: Option<f64>, score: i64) -> RatingRecord {
        let rater = RaterName::try_new("Alex").unwrap();
        let mut subject = Subject::new("test", format!("sample_{score}.wav"), "t", 0);
        subject.reference_score = reference;
        RatingRecord::new(&rater, &subject, Score::new(score, ScoreScale::Decile).unwrap())
    }

    #[test]
    fn test_no_reference_records() {
        let records = vec![rated(None, 3)];
        assert!(CalibrationReport::from_records(&records, &CalibrationPolicy::default()).is_none());
    }

    #[test]
    fn test_report_metrics() {
        let records = vec![
            rated(Some(0.0), 0),
            rated(Some(3.0), 4),
            rated(Some(5.0), 8),
            rated(Some(9.0), 9),
            rated(None, 1),
        ];
        let report =
            CalibrationReport::from_records(&records, &CalibrationPolicy::default()).unwrap();

        assert_eq!(report.rated, 4);
        assert_eq!(report.accuracy, 75.0);
        assert_eq!(report.avg_error, 1.0);
        assert_eq!(report.min_error, 0.0);
        assert_eq!(report.max_error, 3.0);
        assert!(!report.passed);
    }

    #[test]
    fn test_pass_threshold_inclusive() {
        let records = vec![
            rated(Some(1.0), 1),
            rated(Some(2.0), 3),
            rated(Some(4.0), 4),
            rated(Some(6.0), 6),
            rated(Some(8.0), 2),
        ];
        let report =
            CalibrationReport::from_records(&records, &CalibrationPolicy::default()).unwrap();
        assert_eq!(report.accuracy, 80.0);
        assert!(report.passed);
    }

    #[test]
    fn test_custom_tolerance() {
        let records = vec![rated(Some(5.0), 7)];
        let strict = CalibrationPolicy {
            tolerance: 1.0,
            pass_threshold: 100.0,
        };
        let lenient = CalibrationPolicy {
            tolerance: 2.0,
            pass_threshold: 100.0,
        };
        assert!(!CalibrationReport::from_records(&records, &strict).unwrap().passed);
        assert!(CalibrationReport::from_records(&records, &lenient).unwrap().passed);
    }
}
