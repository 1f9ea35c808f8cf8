//! Two-handle numeric range input.
//!
//! The handles never get closer than `min_gap` to each other: dragging one
//! past the other clamps it instead of crossing. Text entry is committed on
//! blur or Enter; anything that does not parse as an integer leaves the
//! previous value in place.

use serde::Serialize;

use crate::core::domain::NodeRange;

pub const DEFAULT_MIN_GAP: u64 = 10;

/// Left and right offsets of the highlighted track segment, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackInsets {
    pub left: f64,
    pub right: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RangeSelector {
    domain: NodeRange,
    value: NodeRange,
    min_gap: u64,
}

impl RangeSelector {
    /// Creates a selector over `domain` with both handles at its ends.
    pub fn new(domain: NodeRange) -> Self {
        Self {
            domain,
            value: domain,
            min_gap: DEFAULT_MIN_GAP,
        }
    }

    pub fn with_min_gap(mut self, min_gap: u64) -> Self {
        self.min_gap = min_gap;
        self
    }

    /// Places the handles at `value`, clamped into the domain.
    pub fn with_value(mut self, value: NodeRange) -> Self {
        self.value = value.clamped_to(self.domain);
        self
    }

    pub fn domain(&self) -> NodeRange {
        self.domain
    }

    pub fn value(&self) -> NodeRange {
        self.value
    }

    pub fn min_gap(&self) -> u64 {
        self.min_gap
    }

    /// Largest value the lower handle may take.
    pub fn min_handle_limit(&self) -> u64 {
        self.value.max.saturating_sub(self.min_gap).max(self.domain.min)
    }

    /// Smallest value the upper handle may take.
    pub fn max_handle_limit(&self) -> u64 {
        self.value.min.saturating_add(self.min_gap).min(self.domain.max)
    }

    /// Moves the lower handle during a drag and returns the new range.
    pub fn drag_min(&mut self, value: u64) -> NodeRange {
        self.value.min = value.max(self.domain.min).min(self.min_handle_limit());
        self.value
    }

    /// Moves the upper handle during a drag and returns the new range.
    pub fn drag_max(&mut self, value: u64) -> NodeRange {
        self.value.max = value.min(self.domain.max).max(self.max_handle_limit());
        self.value
    }

    /// Commits typed text for the lower handle.
    pub fn commit_min_text(&mut self, text: &str) -> NodeRange {
        match parse_handle(text) {
            Some(value) => {
                let value = value.clamp(self.domain.min as i64, self.min_handle_limit() as i64);
                self.value.min = value as u64;
            }
            None => log::debug!("Keeping lower bound {}: {:?} is not a number", self.value.min, text),
        }
        self.value
    }

    /// Commits typed text for the upper handle.
    pub fn commit_max_text(&mut self, text: &str) -> NodeRange {
        match parse_handle(text) {
            Some(value) => {
                let value = value.clamp(self.max_handle_limit() as i64, self.domain.max as i64);
                self.value.max = value as u64;
            }
            None => log::debug!("Keeping upper bound {}: {:?} is not a number", self.value.max, text),
        }
        self.value
    }

    /// Position of `value` along the track, in percent.
    pub fn position_percent(&self, value: u64) -> f64 {
        let span = self.domain.max.saturating_sub(self.domain.min);
        let span = if span == 0 { 1.0 } else { span as f64 };
        (value as f64 - self.domain.min as f64) / span * 100.0
    }

    pub fn track_insets(&self) -> TrackInsets {
        TrackInsets {
            left: self.position_percent(self.value.min),
            right: 100.0 - self.position_percent(self.value.max),
        }
    }
}

fn parse_handle(text: &str) -> Option<i64> {
    let text = text.trim();
    text.parse::<i64>()
        .ok()
        .or_else(|| text.parse::<f64>().ok().filter(|v| v.is_finite()).map(|v| v.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> RangeSelector {
        RangeSelector::new(NodeRange::new(0, 100))
    }

    #[test]
    fn test_drag_min_clamps_at_gap() {
        let mut s = selector().with_value(NodeRange::new(0, 50));
        assert_eq!(s.drag_min(45), NodeRange::new(40, 50));
        assert_eq!(s.drag_min(90), NodeRange::new(40, 50));
        assert_eq!(s.drag_min(20), NodeRange::new(20, 50));
    }

    #[test]
    fn test_drag_max_clamps_at_gap() {
        let mut s = selector().with_value(NodeRange::new(30, 100));
        assert_eq!(s.drag_max(35), NodeRange::new(30, 40));
        assert_eq!(s.drag_max(0), NodeRange::new(30, 40));
        assert_eq!(s.drag_max(200), NodeRange::new(30, 100));
    }

    #[test]
    fn test_custom_gap() {
        let mut s = selector().with_min_gap(25).with_value(NodeRange::new(0, 60));
        assert_eq!(s.drag_min(59), NodeRange::new(35, 60));
    }

    #[test]
    fn test_commit_text_valid() {
        let mut s = selector();
        assert_eq!(s.commit_min_text("25"), NodeRange::new(25, 100));
        assert_eq!(s.commit_max_text(" 70 "), NodeRange::new(25, 70));
        assert_eq!(s.commit_min_text("69"), NodeRange::new(60, 70));
        assert_eq!(s.commit_max_text("12.9"), NodeRange::new(60, 70));
    }

    #[test]
    fn test_commit_text_out_of_domain() {
        let mut s = selector();
        assert_eq!(s.commit_min_text("-40"), NodeRange::new(0, 100));
        assert_eq!(s.commit_max_text("4000"), NodeRange::new(0, 100));
    }

    #[test]
    fn test_commit_text_rejects_garbage() {
        let mut s = selector().with_value(NodeRange::new(20, 80));
        assert_eq!(s.commit_min_text("twenty"), NodeRange::new(20, 80));
        assert_eq!(s.commit_max_text(""), NodeRange::new(20, 80));
    }

    #[test]
    fn test_position_percent() {
        let s = RangeSelector::new(NodeRange::new(100, 300)).with_value(NodeRange::new(150, 250));
        assert_eq!(s.position_percent(100), 0.0);
        assert_eq!(s.position_percent(200), 50.0);
        assert_eq!(
            s.track_insets(),
            TrackInsets {
                left: 25.0,
                right: 25.0
            }
        );
    }

    #[test]
    fn test_degenerate_domain() {
        let s = RangeSelector::new(NodeRange::new(7, 7));
        assert_eq!(s.position_percent(7), 0.0);
        assert!(s.position_percent(7).is_finite());
    }
}
