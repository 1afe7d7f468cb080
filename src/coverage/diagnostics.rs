use crate::feature::Feature;
use std::fmt;

/// Why a feature was left out of the coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// The feature starts before the end of an already accepted feature.
    Overlap { boundary: usize },
    /// The feature does not fit inside the sequence.
    OutOfBounds { sequence_len: usize },
}

/// A skipped feature, reported to a [`RejectionSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    pub label: String,
    pub start: usize,
    pub end: usize,
    pub reason: RejectReason,
}

impl Rejection {
    pub(crate) fn new(feature: &Feature, reason: RejectReason) -> Self {
        Self {
            label: feature.label.clone(),
            start: feature.start,
            end: feature.end,
            reason,
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            RejectReason::Overlap { boundary } => write!(
                f,
                "skipping label {} [{}, {}): inside another feature ending at {}",
                self.label, self.start, self.end, boundary
            ),
            RejectReason::OutOfBounds { sequence_len } => write!(
                f,
                "skipping label {} [{}, {}): outside sequence of length {}",
                self.label, self.start, self.end, sequence_len
            ),
        }
    }
}

/// Receives one [`Rejection`] per skipped feature.
pub trait RejectionSink {
    fn reject(&mut self, rejection: Rejection);
}

impl RejectionSink for Vec<Rejection> {
    fn reject(&mut self, rejection: Rejection) {
        self.push(rejection);
    }
}

impl<S: RejectionSink + ?Sized> RejectionSink for &mut S {
    fn reject(&mut self, rejection: Rejection) {
        (**self).reject(rejection);
    }
}

/// Emits every rejection as an `info` event and counts them by reason.
#[derive(Debug, Default)]
pub struct LogSink {
    pub overlaps: usize,
    pub out_of_bounds: usize,
}

impl LogSink {
    pub fn count(&self) -> usize {
        self.overlaps + self.out_of_bounds
    }
}

impl RejectionSink for LogSink {
    fn reject(&mut self, rejection: Rejection) {
        match rejection.reason {
            RejectReason::Overlap { .. } => self.overlaps += 1,
            RejectReason::OutOfBounds { .. } => self.out_of_bounds += 1,
        }
        tracing::info!(label = %rejection.label, "{rejection}");
    }
}

/// Discards rejections.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ignore;

impl RejectionSink for Ignore {
    fn reject(&mut self, _rejection: Rejection) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_label() {
        let feature = Feature::new(3, 8, "B", 2);
        let rejection = Rejection::new(&feature, RejectReason::Overlap { boundary: 5 });
        let msg = rejection.to_string();
        assert!(msg.contains("label B"));
        assert!(msg.contains("ending at 5"));

        let rejection = Rejection::new(&feature, RejectReason::OutOfBounds { sequence_len: 4 });
        assert!(rejection.to_string().contains("length 4"));
    }

    #[test]
    fn test_sinks() {
        let feature = Feature::new(0, 1, "A", 1);
        fn report(mut sink: impl RejectionSink, feature: &Feature) {
            sink.reject(Rejection::new(feature, RejectReason::Overlap { boundary: 2 }));
        }

        let mut collected: Vec<Rejection> = Vec::new();
        report(&mut collected, &feature);
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].label, "A");

        let mut log = LogSink::default();
        log.reject(Rejection::new(&feature, RejectReason::Overlap { boundary: 2 }));
        log.reject(Rejection::new(&feature, RejectReason::Overlap { boundary: 2 }));
        log.reject(Rejection::new(&feature, RejectReason::OutOfBounds { sequence_len: 0 }));
        assert_eq!(log.overlaps, 2);
        assert_eq!(log.out_of_bounds, 1);
        assert_eq!(log.count(), 3);
    }
}
