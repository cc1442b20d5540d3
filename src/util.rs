/// Aggregate dispersion figures for a raw interval window, used for
/// per-request diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CadenceSummary {
    pub mean_ms: f64,
    pub std_dev_ms: f64,
}

pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    Some(data.iter().sum::<f64>() / data.len() as f64)
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}

/// Summarize a raw interval window; `None` when the window is empty.
pub fn summarize(intervals: &[f64]) -> Option<CadenceSummary> {
    Some(CadenceSummary {
        mean_ms: mean(intervals)?,
        std_dev_ms: std_dev(intervals)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[10., 20., 30., 15., 22.]), Some(19.4));
        assert_eq!(mean(&[15., 7., 55., 12., 4.]), Some(18.6));
    }

    #[test]
    fn test_mean_empty_slice() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_std_dev() {
        assert_eq!(
            std_dev(&[100., 120., 90., 102., 94.]),
            Some(10.322790320451151)
        );
    }

    #[test]
    fn test_std_dev_identical_values() {
        assert_eq!(std_dev(&[150.0, 150.0, 150.0, 150.0]), Some(0.0));
    }

    #[test]
    fn test_std_dev_empty_slice() {
        assert_eq!(std_dev(&[]), None);
    }

    #[test]
    fn summarize_combines_both_figures() {
        let summary = summarize(&[100.0, 100.0, 100.0]).unwrap();
        assert_eq!(summary.mean_ms, 100.0);
        assert_eq!(summary.std_dev_ms, 0.0);
    }

    #[test]
    fn summarize_empty_window_is_none() {
        assert_eq!(summarize(&[]), None);
    }
}
