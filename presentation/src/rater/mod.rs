//! Interactive rater session

mod command;
mod repl;

pub use command::{ReplCommand, parse_command};
pub use repl::RaterRepl;
