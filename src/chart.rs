use super::error::ConvertError;
use super::{min_and_max, TimeRate, ELAPSED_COLUMN, RATE_COLUMN};
use std::ops::Range;

pub const TITLE: &str = "Requests per second over elapsed time";

/// Line chart of the rate against the elapsed time.
/// Holds every row as a point, NAN coordinates mark the gaps.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_desc: String,
    pub y_desc: String,
    pub points: Vec<(f64, f64)>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl LineChart {
    /// Fails when the values are too far apart for the axis width to be finite.
    pub fn from_table(timerate: &TimeRate) -> Result<LineChart, ConvertError> {
        Ok(LineChart {
            title: TITLE.to_string(),
            x_desc: ELAPSED_COLUMN.to_string(),
            y_desc: RATE_COLUMN.to_string(),
            points: timerate.points().collect(),
            x_range: padded_range(&timerate.elapsed, 20.)
                .ok_or_else(|| ConvertError::RangeOverflow(ELAPSED_COLUMN.to_string()))?,
            y_range: padded_range(&timerate.rate, 10.)
                .ok_or_else(|| ConvertError::RangeOverflow(RATE_COLUMN.to_string()))?,
        })
    }

    /// contiguous runs of drawable points, split on the gaps
    pub fn segments(&self) -> Vec<&[(f64, f64)]> {
        self.points
            .split(|(x, y)| !x.is_finite() || !y.is_finite())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

/// data extent extended on each side by span / divisor,
/// None when the padded width is not finite
fn padded_range(values: &[f64], divisor: f64) -> Option<Range<f64>> {
    let range = match min_and_max(values) {
        None => 0.0..1.0,
        Some((min, max)) if min == max => {
            let pad = (min.abs() / 10.).max(1.);
            (min - pad)..(max + pad)
        }
        Some((min, max)) => {
            let margin = (max - min) / divisor;
            (min - margin)..(max + margin)
        }
    };
    if (range.end - range.start).is_finite() {
        Some(range)
    } else {
        None
    }
}
