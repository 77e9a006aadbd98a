pub mod discovery;
pub mod engine;
pub mod recommend;
pub mod table;

pub use crate::domain::model::{Bean, Color, Combination, Page, ScoredCombination};
pub use crate::domain::ports::CatalogApi;
pub use crate::utils::error::Result;
