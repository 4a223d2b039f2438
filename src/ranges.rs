//! Collapses the sorted code-point list into contiguous inclusive ranges.

/// An inclusive run of consecutive code points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeRange {
    pub start: u32,
    pub end: u32,
}

/// Collapse a sorted code list into maximal inclusive runs.
///
/// Repeated values stay inside the current run; a gap of more than one
/// opens a new range. The trailing run is always flushed, so every input
/// code is covered by exactly one range even when the whole input is a
/// single unbroken run.
pub fn compress_ranges(codes: &[u32]) -> Vec<CodeRange> {
    let Some((&first, rest)) = codes.split_first() else {
        return Vec::new();
    };

    let mut ranges = Vec::new();
    let mut start = first;
    let mut last = first;

    for &code in rest {
        if code > last.saturating_add(1) {
            ranges.push(CodeRange { start, end: last });
            start = code;
        }
        last = code;
    }
    ranges.push(CodeRange { start, end: last });

    ranges
}
