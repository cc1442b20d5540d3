/// Rescale every value to [0,1] via `(v - min) / (max - min)`.
///
/// Degenerate-range policy: when `max == min` (a perfectly constant cadence)
/// every output is defined as exactly 0.5, so no division by zero can occur.
pub fn min_max(values: &[f64]) -> Vec<f64> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![0.5; values.len()];
    }

    values
        .iter()
        .map(|value| (value - min) / (max - min))
        .collect()
}
