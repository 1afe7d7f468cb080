//! Lay colored, non-overlapping feature segments over a sequence and build the
//! matching legend for a sequence viewer.
//!
//! Features are sorted by start and accepted greedily: a feature is kept when it
//! starts at or after the end of the last kept one, and reported to a
//! [`coverage::RejectionSink`] otherwise.

pub mod coverage;
pub mod error;
pub mod export;
pub mod feature;
pub mod io;
pub mod palette;
pub mod render;

pub use crate::coverage::{highlight, BuildOptions, Coverage, CoverageBuilder};
pub use crate::error::{Error, Result};
pub use crate::feature::{sort_features, Feature, SortOrder, TypeId};
pub use crate::palette::{ColorTable, Palette};
