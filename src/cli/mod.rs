//! Command-line interface for the dataset fetcher

mod main;

pub use main::{main, Cli};
