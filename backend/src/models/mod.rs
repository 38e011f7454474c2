//! Domain model for the beer catalog.
//!
//! - [`beer`]: catalog records, styles, validated construction and updates
//! - [`page`]: page requests and paged results

pub mod beer;
pub mod macros;
pub mod page;

pub use beer::*;
pub use page::*;
