use super::model::Table;
use crate::error::{Result, VizError};

/// Width of the inlier band in interquartile ranges on either side of the box.
pub const IQR_MULTIPLIER: f64 = 2.2;

// ---------------------------------------------------------------------------
// Inlier bound
// ---------------------------------------------------------------------------

/// Closed interval `[Q1 - 2.2·IQR, Q3 + 2.2·IQR]` of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InlierBound {
    pub lower: f64,
    pub upper: f64,
}

impl InlierBound {
    /// Derive the bound from a column's numbers (any order).
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let q1 = percentile(&sorted, 0.25)?;
        let q3 = percentile(&sorted, 0.75)?;
        let iqr = q3 - q1;
        Some(InlierBound {
            lower: q1 - IQR_MULTIPLIER * iqr,
            upper: q3 + IQR_MULTIPLIER * iqr,
        })
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }
}

/// Percentile `p` (0.0 to 1.0) of sorted data, interpolating linearly
/// between the two nearest order statistics. `None` for empty data.
pub fn percentile(sorted_values: &[f64], p: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    let pos = last as f64 * p;
    let lo = pos.floor() as usize;
    let hi = (pos.ceil() as usize).min(last);
    let frac = pos - lo as f64;
    Some(sorted_values[lo] + (sorted_values[hi] - sorted_values[lo]) * frac)
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Compute the inlier bound of `column` over the whole table.
pub fn inlier_bound(table: &Table, column: &str) -> Result<InlierBound> {
    let col = table.require_column(column)?;
    if !col.is_numeric() {
        return Err(VizError::ColumnNotNumeric(column.to_string()));
    }
    let values: Vec<f64> = col.numbers_iter().collect();
    InlierBound::from_values(&values).ok_or_else(|| VizError::ColumnNotNumeric(column.to_string()))
}

/// Return indices of rows whose `column` value lies inside the inlier bound.
///
/// The bound is computed once from the full column, then applied as a single
/// predicate. Missing cells never pass.
pub fn inlier_indices(table: &Table, column: &str) -> Result<Vec<usize>> {
    let bound = inlier_bound(table, column)?;
    log::debug!(
        "Inlier bound for '{column}': [{}, {}]",
        bound.lower,
        bound.upper
    );

    let col = table.require_column(column)?;
    Ok(col
        .cells
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.as_f64().is_some_and(|v| bound.contains(v)))
        .map(|(i, _)| i)
        .collect())
}

/// Drop rows that are IQR outliers in `column`. The input is left untouched.
pub fn iqr_filter(table: &Table, column: &str) -> Result<Table> {
    let keep = inlier_indices(table, column)?;
    log::info!(
        "IQR filter on '{column}' kept {} of {} rows",
        keep.len(),
        table.len()
    );
    Ok(table.select_rows(&keep))
}

/// Apply [`iqr_filter`] once per column, in order, each pass working on the
/// previous pass's output.
pub fn filter_columns<S: AsRef<str>>(table: &Table, columns: &[S]) -> Result<Table> {
    let mut current = table.clone();
    for column in columns {
        current = iqr_filter(&current, column.as_ref())?;
    }
    Ok(current)
}
