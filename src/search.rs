//! Search and filtering over a translation set.
pub mod query;
pub mod stats;
pub mod view;

pub use query::SearchQuery;
pub use stats::Stats;
pub use view::{
    FilteredView,
    ViewRow,
    compare_keys,
};
