//! Selection snapshots: the unit of selection state commands read, write
//! and record into jump history.

use crate::buffers::BufferId;
use sable_text::{SelectionRange, TextBuffer};

/// An ordered set of selection ranges over one buffer, with a designated
/// main range.
///
/// Snapshots are immutable at rest: the jump list stores them verbatim,
/// and [`SelectionSnapshot::update`] brings one back in line with buffer
/// content that changed since capture. The buffer reference is an id; a
/// snapshot does not keep its buffer alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    buffer: BufferId,
    ranges: Vec<SelectionRange>,
    main_index: usize,
}

impl SelectionSnapshot {
    /// Creates a snapshot. Panics on an empty range list or an
    /// out-of-bounds main index; both indicate a caller bug.
    pub fn new(buffer: BufferId, ranges: Vec<SelectionRange>, main_index: usize) -> Self {
        assert!(
            !ranges.is_empty(),
            "selection snapshot must hold at least one range"
        );
        assert!(
            main_index < ranges.len(),
            "main selection index {main_index} out of bounds"
        );
        Self {
            buffer,
            ranges,
            main_index,
        }
    }

    /// The single default-range snapshot installed when a context lands on
    /// a buffer without a client to place it.
    pub fn bare(buffer: BufferId) -> Self {
        Self {
            buffer,
            ranges: vec![SelectionRange::new(0)],
            main_index: 0,
        }
    }

    /// The buffer the ranges live in.
    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    /// All ranges, in selection order.
    pub fn ranges(&self) -> &[SelectionRange] {
        &self.ranges
    }

    pub fn main_index(&self) -> usize {
        self.main_index
    }

    /// The main range.
    pub fn main(&self) -> &SelectionRange {
        &self.ranges[self.main_index]
    }

    /// Marks another range as main. Panics when out of bounds.
    pub fn set_main_index(&mut self, index: usize) {
        assert!(index < self.ranges.len(), "main selection index {index} out of bounds");
        self.main_index = index;
    }

    /// Replaces all ranges wholesale; same structural requirements as
    /// [`SelectionSnapshot::new`].
    pub fn replace(&mut self, ranges: Vec<SelectionRange>, main_index: usize) {
        assert!(
            !ranges.is_empty(),
            "selection snapshot must hold at least one range"
        );
        assert!(
            main_index < ranges.len(),
            "main selection index {main_index} out of bounds"
        );
        self.ranges = ranges;
        self.main_index = main_index;
    }

    /// Re-validates the snapshot against the buffer's current content:
    /// clamps every range, then sorts and merges overlapping ranges while
    /// tracking which range is main.
    pub fn update(&mut self, buffer: &TextBuffer) {
        let len = buffer.len_chars();
        for range in &mut self.ranges {
            range.clamp(len);
        }
        if self.ranges.len() > 1 {
            self.normalize();
        }
    }

    // Sorts by position and merges overlapping neighbors; the main index
    // follows its range through the reorder.
    fn normalize(&mut self) {
        let main = self.ranges[self.main_index];
        self.ranges.sort_by_key(|range| (range.min(), range.max()));
        self.main_index = self
            .ranges
            .iter()
            .position(|range| *range == main)
            .unwrap_or(0);

        let mut i = 0;
        while i + 1 < self.ranges.len() {
            if self.ranges[i].overlaps(&self.ranges[i + 1]) {
                let min = self.ranges[i].min().min(self.ranges[i + 1].min());
                let max = self.ranges[i].max().max(self.ranges[i + 1].max());
                self.ranges[i] = SelectionRange::with_range(min, max);
                self.ranges.remove(i + 1);
                if self.main_index > i + 1 {
                    self.main_index -= 1;
                } else if self.main_index == i + 1 {
                    self.main_index = i;
                }
            } else {
                i += 1;
            }
        }
    }

    /// Extracts the buffer text each range covers, min to max inclusive,
    /// one string per range in selection order.
    pub fn extract_content(&self, buffer: &TextBuffer) -> Vec<String> {
        self.ranges
            .iter()
            .map(|range| buffer.slice(range.min(), buffer.char_next(range.max())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(pairs: &[(usize, usize)]) -> Vec<SelectionRange> {
        pairs
            .iter()
            .map(|&(anchor, cursor)| SelectionRange::with_range(anchor, cursor))
            .collect()
    }

    #[test]
    fn test_equality() {
        let a = SelectionSnapshot::new(0, ranges(&[(0, 4), (6, 10)]), 1);
        let b = SelectionSnapshot::new(0, ranges(&[(0, 4), (6, 10)]), 1);
        let other_buffer = SelectionSnapshot::new(1, ranges(&[(0, 4), (6, 10)]), 1);
        let other_ranges = SelectionSnapshot::new(0, ranges(&[(0, 4), (6, 11)]), 1);

        assert_eq!(a, b);
        assert_ne!(a, other_buffer);
        assert_ne!(a, other_ranges);
    }

    #[test]
    #[should_panic(expected = "at least one range")]
    fn test_empty_ranges_panics() {
        SelectionSnapshot::new(0, Vec::new(), 0);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_main_index_out_of_bounds_panics() {
        SelectionSnapshot::new(0, ranges(&[(0, 0)]), 1);
    }

    #[test]
    fn test_update_clamps_stale_ranges() {
        let buffer = TextBuffer::from_str("0123456789");
        let mut snapshot = SelectionSnapshot::new(0, ranges(&[(4, 25)]), 0);

        snapshot.update(&buffer);
        assert_eq!(snapshot.main().min(), 4);
        assert_eq!(snapshot.main().max(), 9);
    }

    #[test]
    fn test_update_merges_overlapping_and_tracks_main() {
        let buffer = TextBuffer::from_str("0123456789");
        let mut snapshot = SelectionSnapshot::new(0, ranges(&[(0, 5), (3, 8), (20, 25)]), 2);

        snapshot.update(&buffer);
        assert_eq!(snapshot.ranges().len(), 2);
        assert_eq!(
            snapshot.ranges()[0],
            SelectionRange::with_range(0, 8)
        );
        // The stale (20, 25) range clamps to the last character and stays
        // main.
        assert_eq!(snapshot.main_index(), 1);
        assert_eq!(*snapshot.main(), SelectionRange::with_range(9, 9));
    }

    #[test]
    fn test_update_main_survives_merge() {
        let buffer = TextBuffer::from_str("0123456789");
        let mut snapshot = SelectionSnapshot::new(0, ranges(&[(0, 5), (3, 8)]), 1);

        snapshot.update(&buffer);
        assert_eq!(snapshot.ranges().len(), 1);
        assert_eq!(snapshot.main_index(), 0);
        assert_eq!(*snapshot.main(), SelectionRange::with_range(0, 8));
    }

    #[test]
    fn test_extract_content_is_inclusive() {
        let buffer = TextBuffer::from_str("hello world");
        let snapshot = SelectionSnapshot::new(0, ranges(&[(0, 4), (6, 6), (10, 6)]), 0);

        let content = snapshot.extract_content(&buffer);
        assert_eq!(content, vec!["hello", "w", "world"]);
    }

    #[test]
    fn test_extract_content_on_empty_buffer() {
        let buffer = TextBuffer::new();
        let mut snapshot = SelectionSnapshot::bare(0);
        snapshot.update(&buffer);

        assert_eq!(snapshot.extract_content(&buffer), vec![String::new()]);
    }
}
