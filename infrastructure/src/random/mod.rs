//! Randomness adapters

mod thread_rng_picker;

pub use thread_rng_picker::RandomSidePicker;
