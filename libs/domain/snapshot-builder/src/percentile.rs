// [libs/domain/snapshot-builder/src/percentile.rs]
//! Percentil 99 por "nearest-rank", tal como exige §4.2.

/// `idx = clamp(ceil(0.99 * N) - 1, 0, N - 1)` sobre los valores
/// ordenados. Lista vacía ⇒ `0.0`.
pub fn p99_nearest_rank(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = sorted.len();
    let raw_idx = (0.99 * n as f64).ceil() as isize - 1;
    let idx = raw_idx.clamp(0, n as isize - 1) as usize;
    sorted[idx]
}

pub fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_zero() {
        assert_eq!(p99_nearest_rank(&[]), 0.0);
    }

    #[test]
    fn single_value() {
        assert_eq!(p99_nearest_rank(&[42.0]), 42.0);
    }

    #[test]
    fn hundred_values_picks_99th() {
        let values: Vec<f64> = (1..=100).map(|n| n as f64).collect();
        // ceil(0.99*100) - 1 = 99 - 1 = 98 (0-indexed) -> sorted[98] = 99.0
        assert_eq!(p99_nearest_rank(&values), 99.0);
    }

    #[test]
    fn small_sample_clamped_to_last() {
        let values = vec![10.0, 20.0, 30.0];
        // ceil(0.99*3) - 1 = 3 - 1 = 2 -> sorted[2] = 30.0
        assert_eq!(p99_nearest_rank(&values), 30.0);
    }

    #[test]
    fn rounding_behaves() {
        assert_eq!(round_2(1.005), 1.0);
        assert_eq!(round_2(1.2349), 1.23);
        assert_eq!(round_2(1.235), 1.24);
    }
}
