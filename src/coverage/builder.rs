use crate::coverage::diagnostics::{RejectReason, Rejection, RejectionSink};
use crate::feature::{sort_features, Feature, SortOrder};
use crate::palette::ColorTable;
use std::ops::Range;

pub const TEXT_COLOR: &str = "black";

/// What to do with features whose bounds fall outside the sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum BoundsPolicy {
    /// Accept the feature and clamp its substring to the sequence.
    #[default]
    Truncate,
    /// Skip the feature and report it like an overlap.
    Reject,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildOptions {
    pub sort: SortOrder,
    pub bounds: BoundsPolicy,
}

/// A painted interval handed to the sequence viewer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageSegment {
    pub start: usize,
    pub end: usize,
    pub background_color: Option<String>,
    pub text_color: String,
    pub underline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LegendEntry {
    pub name: String,
    pub color: Option<String>,
    pub underline: bool,
}

/// Accepted features in acceptance order. `segments` and `legend` are parallel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    pub segments: Vec<CoverageSegment>,
    pub legend: Vec<LegendEntry>,
    /// Concatenated substrings of the accepted features.
    pub covered: String,
}

impl Coverage {
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Segments zipped with their legend entries.
    pub fn entries(&self) -> impl Iterator<Item = (&CoverageSegment, &LegendEntry)> {
        self.segments.iter().zip(self.legend.iter())
    }
}

/// Greedy left-to-right selection of non-overlapping features.
#[derive(Debug, Clone, Copy)]
pub struct CoverageBuilder<'a> {
    colors: &'a ColorTable,
    bounds: BoundsPolicy,
}

impl<'a> CoverageBuilder<'a> {
    pub fn new(colors: &'a ColorTable) -> Self {
        Self {
            colors,
            bounds: BoundsPolicy::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: BoundsPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    /// Walk `features`, which must already be sorted by start, and keep every
    /// feature starting at or after the end of the last kept one. Skipped
    /// features go to `sink`.
    pub fn build(
        &self,
        features: &[Feature],
        sequence: &str,
        mut sink: impl RejectionSink,
    ) -> Coverage {
        let seq_len = sequence.len();
        let mut coverage = Coverage::default();
        let mut boundary = 0;

        for feature in features {
            if feature.start < boundary {
                sink.reject(Rejection::new(feature, RejectReason::Overlap { boundary }));
                continue;
            }
            if !feature.fits(seq_len) {
                match self.bounds {
                    BoundsPolicy::Reject => {
                        sink.reject(Rejection::new(
                            feature,
                            RejectReason::OutOfBounds {
                                sequence_len: seq_len,
                            },
                        ));
                        continue;
                    }
                    BoundsPolicy::Truncate => tracing::warn!(
                        "label {} [{}, {}) truncated to sequence of length {}",
                        feature.label,
                        feature.start,
                        feature.end,
                        seq_len
                    ),
                }
            }

            // end < start only for malformed input; never move the boundary back
            boundary = boundary.max(feature.end);

            let color = self.colors.get(&feature.type_id).map(str::to_string);
            coverage.segments.push(CoverageSegment {
                start: feature.start,
                end: feature.end,
                background_color: color.clone(),
                text_color: TEXT_COLOR.to_string(),
                underline: false,
            });
            coverage.legend.push(LegendEntry {
                name: feature.label.clone(),
                color,
                underline: false,
            });
            coverage
                .covered
                .push_str(covered_text(sequence, feature.start, feature.end));
        }

        if !features.is_empty() {
            tracing::debug!(
                "{} of {} features accepted, {} bases covered",
                coverage.len(),
                features.len(),
                coverage.covered.len()
            );
        }
        coverage
    }
}

/// `start..end` with both ends clamped to `len`; empty when the clamped range
/// is empty or reversed.
pub(crate) fn clamped(len: usize, start: usize, end: usize) -> Range<usize> {
    let start = start.min(len);
    let end = end.min(len);
    if start < end {
        start..end
    } else {
        start..start
    }
}

/// The clamped substring of `sequence`. A bound that splits a multi-byte
/// character yields no text.
fn covered_text(sequence: &str, start: usize, end: usize) -> &str {
    sequence.get(clamped(sequence.len(), start, end)).unwrap_or("")
}

/// Sort a copy of `features` and build the coverage from it.
pub fn highlight(
    features: &[Feature],
    sequence: &str,
    colors: &ColorTable,
    options: BuildOptions,
    sink: impl RejectionSink,
) -> Coverage {
    let mut sorted = features.to_vec();
    sort_features(&mut sorted, options.sort);
    CoverageBuilder::new(colors)
        .with_bounds(options.bounds)
        .build(&sorted, sequence, sink)
}
