//! Agreement between numeric scores and a categorical preference

use super::record::Preference;
use crate::core::score::Score;

/// Decide whether a stated preference agrees with the scores given
///
/// Returns `None` when either score is unknown. A `Tie` preference agrees
/// only with equal scores; any other preference agrees only when its side
/// scored strictly higher, so equal scores with a non-tie preference do not
/// agree.
pub fn evaluate_consistency(
    baseline: Option<Score>,
    experimental: Option<Score>,
    preference: Preference,
) -> Option<bool> {
    let (baseline, experimental) = (baseline?, experimental?);
    let consistent = match preference {
        Preference::Tie => baseline == experimental,
        Preference::Baseline => baseline > experimental,
        Preference::Experimental => experimental > baseline,
    };
    Some(consistent)
}
