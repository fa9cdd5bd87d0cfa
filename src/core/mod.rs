pub mod config;
pub mod layout;
pub mod outcome;

#[cfg(test)]
mod config_test;

pub use config::*;
pub use layout::*;
pub use outcome::*;
