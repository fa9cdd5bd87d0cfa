pub mod app;
pub mod strings;

#[cfg(test)]
mod app_test;

pub use app::*;
