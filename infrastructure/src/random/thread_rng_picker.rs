//! `rand`-backed side picker

use rand::Rng;
use rand::seq::SliceRandom;
use ttseval_application::ports::side_picker::SidePicker;
use ttseval_domain::{Side, Subject};

/// Uniform, independent draws from the thread-local generator
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomSidePicker;

impl RandomSidePicker {
    pub fn new() -> Self {
        Self
    }
}

impl SidePicker for RandomSidePicker {
    fn baseline_side(&self) -> Side {
        if rand::thread_rng().gen_bool(0.5) {
            Side::Left
        } else {
            Side::Right
        }
    }

    fn shuffle(&self, subjects: &mut [Subject]) {
        subjects.shuffle(&mut rand::thread_rng());
    }
}
