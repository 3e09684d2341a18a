pub mod item;

use std::collections::HashSet;

use crate::error::ChartwellGuidesError;

pub use item::{make_legend_marks, LegendArrangement, LegendItemSpec, LegendLayout, LegendMarks};

/// Common length of per-instance columns, where length 1 broadcasts.
///
/// Fails when two columns have different lengths greater than one.
pub fn compute_encoding_length(lengths: &[usize]) -> Result<usize, ChartwellGuidesError> {
    let lengths = lengths
        .iter()
        .copied()
        .filter(|&len| len > 1)
        .collect::<HashSet<_>>();

    if lengths.len() > 1 {
        return Err(ChartwellGuidesError::InvalidEncodingLength(lengths));
    }
    Ok(lengths.into_iter().next().unwrap_or(1))
}
