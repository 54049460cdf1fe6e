//! Masonry layout: responsive column count and column balancing.
//!
//! Tiles flow top to bottom, column by column, like CSS multi-column layout.
//! Reading the columns left to right gives back the gallery order, and a tile
//! never spans two columns.

use crate::config::{
    BREAKPOINT_MEDIUM_PX, BREAKPOINT_WIDE_PX, COLUMNS_MEDIUM, COLUMNS_NARROW, COLUMNS_WIDE,
};
use std::ops::Range;

const BALANCE_ITERATIONS: usize = 48;

/// Number of columns for a viewport width in logical pixels.
pub fn column_count(width: f32) -> usize {
    if width < BREAKPOINT_MEDIUM_PX {
        COLUMNS_NARROW
    } else if width < BREAKPOINT_WIDE_PX {
        COLUMNS_MEDIUM
    } else {
        COLUMNS_WIDE
    }
}

/// Greedy fill: starts a new column whenever the next tile would push the
/// current one past `capacity`. Returns the column boundaries.
fn fill_columns(heights: &[f32], capacity: f32) -> Vec<Range<usize>> {
    let mut columns = Vec::new();
    let mut start = 0;
    let mut filled = 0.0;

    for (index, height) in heights.iter().enumerate() {
        if index > start && filled + height > capacity {
            columns.push(start..index);
            start = index;
            filled = 0.0;
        }
        filled += height;
    }
    if start < heights.len() {
        columns.push(start..heights.len());
    }
    columns
}

/// Splits tiles with the given relative heights into exactly `columns`
/// contiguous runs, keeping the tallest column as short as possible.
///
/// Trailing runs are empty when there are fewer tiles than columns or when
/// balancing needs fewer columns.
pub fn partition_columns(heights: &[f32], columns: usize) -> Vec<Range<usize>> {
    let columns = columns.max(1);
    let heights: Vec<f32> = heights.iter().map(|h| h.max(0.0)).collect();

    let mut low = heights.iter().copied().fold(0.0_f32, f32::max);
    let mut high: f32 = heights.iter().sum();

    if columns > 1 && !heights.is_empty() {
        for _ in 0..BALANCE_ITERATIONS {
            let mid = (low + high) / 2.0;
            if fill_columns(&heights, mid).len() <= columns {
                high = mid;
            } else {
                low = mid;
            }
        }
    }

    let mut ranges = fill_columns(&heights, high);
    // Float rounding at the boundary can leave one run too many.
    while ranges.len() > columns {
        if let Some(last) = ranges.pop() {
            if let Some(previous) = ranges.last_mut() {
                previous.end = last.end;
            }
        }
    }
    let end = heights.len();
    ranges.resize(columns, end..end);
    ranges
}
