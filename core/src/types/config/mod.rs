mod core;
mod repository;

pub use core::Config;
pub use repository::{ConfigError, RepositoryConfig, RepositorySettings};

#[cfg(test)]
mod tests;
