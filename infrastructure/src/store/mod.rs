//! Result store adapters

mod jsonl_store;
mod lock;

pub use jsonl_store::JsonlResultStore;
