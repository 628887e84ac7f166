pub mod cli;
pub mod config;
pub mod errors;
pub mod git;
pub mod stash;
pub mod tui;

pub use errors::StashError;
