//! Data models module
//!
//! Defines the imported exam records and the user's selection of them.

pub mod exam;
pub mod selection;

pub use exam::{sort_by_instant, ExamRecord};
pub use selection::Selection;
