mod builder;
pub mod diagnostics;

pub(crate) use crate::coverage::builder::clamped;
pub use crate::coverage::builder::{
    highlight, BoundsPolicy, BuildOptions, Coverage, CoverageBuilder, CoverageSegment,
    LegendEntry, TEXT_COLOR,
};
pub use crate::coverage::diagnostics::{Ignore, LogSink, RejectReason, Rejection, RejectionSink};
