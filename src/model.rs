//! Translation set model.
/// Model error types
mod error;
pub mod translation_set;

pub use error::ModelError;
pub use translation_set::{
    LanguageValues,
    StatusCounts,
    TranslationSet,
};
