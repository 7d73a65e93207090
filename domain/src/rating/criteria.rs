//! Rating criteria legend shown next to the rating control

use crate::core::score::ScoreScale;

/// One band of the legend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaBand {
    pub range: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

const fn band(
    range: &'static str,
    label: &'static str,
    description: &'static str,
) -> CriteriaBand {
    CriteriaBand {
        range,
        label,
        description,
    }
}

const PERCENT_LEGEND: [CriteriaBand; 11] = [
    band("0-9", "Not speech", "Just noise or broken sound."),
    band("10-19", "Very hard to hear", "Almost nothing is clear."),
    band("20-29", "Very bad", "Many word errors."),
    band("30-39", "Bad", "Robotic or awkward."),
    band("40-49", "Not natural", "Flat or unnatural."),
    band("50-59", "Clear but robotic", "No emotion."),
    band("60-69", "Mostly accurate", "Some pitch/emotion."),
    band("70-79", "Natural feel", "Minor issues."),
    band("80-89", "Very natural", "Almost no errors."),
    band("90-99", "Extremely natural", "Feels human."),
    band("100", "Perfect", "Indistinguishable from real."),
];

const DECILE_LEGEND: [CriteriaBand; 11] = [
    band("0", "Not speech", "Just noise or broken sound."),
    band("1", "Very hard to hear", "Almost nothing is clear."),
    band("2", "Very bad", "Many word errors."),
    band("3", "Bad", "Robotic or awkward."),
    band("4", "Not natural", "Flat or unnatural."),
    band("5", "Clear but robotic", "No emotion."),
    band("6", "Mostly accurate", "Some pitch/emotion."),
    band("7", "Natural feel", "Minor issues."),
    band("8", "Very natural", "Almost no errors."),
    band("9", "Extremely natural", "Feels human."),
    band("10", "Perfect", "Indistinguishable from real."),
];

/// The legend matching `scale`
pub fn legend(scale: ScoreScale) -> &'static [CriteriaBand] {
    match scale {
        ScoreScale::Percent => &PERCENT_LEGEND,
        ScoreScale::Decile => &DECILE_LEGEND,
    }
}
