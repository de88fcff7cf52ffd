//! Section classification for narrative harness logs
//!
//! The narrative log switches between record formats with marker lines such
//! as `Case 2: Missing measurement from k=20 to k=29.`. The classifier scans
//! lines in order, tracks the active section and labels every line.

use std::iter::FusedIterator;
use std::slice;

use crate::app::models::{IgnoreReason, LineLabel, RawLine, Section};
use crate::constants::NORMAL_OPERATION_HEADER_PREFIX;

/// Label one line given the currently active section
///
/// Returns the active section after the line together with the line's label.
pub fn classify_line(active: Option<Section>, line: &RawLine) -> (Option<Section>, LineLabel) {
    let trimmed = line.trimmed();

    if let Some(section) = Section::from_marker_line(trimmed) {
        return (Some(section), LineLabel::Ignore(IgnoreReason::Marker));
    }

    if trimmed.is_empty() {
        return (active, LineLabel::Ignore(IgnoreReason::Blank));
    }

    if active == Some(Section::NormalOperation)
        && trimmed.starts_with(NORMAL_OPERATION_HEADER_PREFIX)
    {
        return (active, LineLabel::Ignore(IgnoreReason::ColumnHeader));
    }

    let label = match active {
        Some(section) => LineLabel::Data(section),
        None => LineLabel::Unsectioned,
    };
    (active, label)
}

/// Lazy single-pass classifier over a buffered line sequence
///
/// Each classifier owns its own active-section state; classifying the same
/// lines again means constructing a new classifier.
#[derive(Debug, Clone)]
pub struct SectionClassifier<'a> {
    lines: slice::Iter<'a, RawLine>,
    active: Option<Section>,
}

impl<'a> SectionClassifier<'a> {
    pub fn new(lines: &'a [RawLine]) -> Self {
        Self {
            lines: lines.iter(),
            active: None,
        }
    }

    /// Section active after the lines consumed so far
    pub fn active_section(&self) -> Option<Section> {
        self.active
    }
}

impl<'a> Iterator for SectionClassifier<'a> {
    type Item = (&'a RawLine, LineLabel);

    fn next(&mut self) -> Option<Self::Item> {
        let line = self.lines.next()?;
        let (active, label) = classify_line(self.active, line);
        self.active = active;
        Some((line, label))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.lines.size_hint()
    }
}

impl ExactSizeIterator for SectionClassifier<'_> {}

impl FusedIterator for SectionClassifier<'_> {}
