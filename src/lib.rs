pub mod client;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use client::{CatalogClient, ClientConfig};
pub use config::TomlConfig;
pub use core::engine::{Recommendations, Recommender};
pub use domain::model::{AttributeCounts, Bean, Color, Combination, Health, Page, ScoredCombination};
pub use domain::ports::CatalogApi;
pub use utils::error::{CatalogError, Result};
