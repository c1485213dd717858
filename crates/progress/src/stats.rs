//! Windowed velocity statistics.

/// Arithmetic mean, `None` for an empty sample.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (denominator `n - 1`), `None` below two points.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let squares: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    Some((squares / (values.len() - 1) as f64).sqrt())
}

/// The last `min(width, end + 1)` values ending at index `end` (inclusive).
pub fn trailing_window(values: &[f64], end: usize, width: usize) -> &[f64] {
    let end = end.min(values.len().saturating_sub(1));
    if values.is_empty() {
        return values;
    }
    let start = (end + 1).saturating_sub(width);
    &values[start..=end]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[4.0]), Some(4.0));
        assert!(close(mean(&[10.0, 15.0, 15.0]).unwrap(), 40.0 / 3.0));
    }

    #[test]
    fn test_sample_std_dev() {
        assert_eq!(sample_std_dev(&[3.0]), None);
        assert_eq!(sample_std_dev(&[2.0, 2.0]), Some(0.0));
        assert!(close(sample_std_dev(&[10.0, 15.0, 15.0]).unwrap(), (25.0_f64 / 3.0).sqrt()));
    }

    #[test]
    fn test_trailing_window_shrinks_at_start() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(trailing_window(&values, 0, 3), &[1.0]);
        assert_eq!(trailing_window(&values, 1, 3), &[1.0, 2.0]);
        assert_eq!(trailing_window(&values, 4, 3), &[3.0, 4.0, 5.0]);
        assert!(trailing_window(&[], 2, 3).is_empty());
    }
}
