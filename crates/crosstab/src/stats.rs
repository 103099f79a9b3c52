//! Descriptive statistics over numeric responses

/// Arithmetic mean; `None` for an empty slice
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Middle value of the sorted data, averaging the two middle values when the
/// count is even
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// Population standard deviation (divisor `n`)
pub fn population_std_dev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.sqrt())
}

/// `count / base * 100`; `None` for a zero base
pub fn percent(count: usize, base: usize) -> Option<f64> {
    if base == 0 {
        None
    } else {
        Some(count as f64 / base as f64 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_population_std_dev() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_eq!(mean(&data), Some(5.0));
        assert_eq!(population_std_dev(&data), Some(2.0));
        assert_eq!(median(&data), Some(4.5));
    }

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[9.0, 1.0, 5.0]), Some(5.0));
        assert_eq!(median(&[3.0]), Some(3.0));
    }

    #[test]
    fn test_empty() {
        assert_eq!(mean(&[]), None);
        assert_eq!(median(&[]), None);
        assert_eq!(population_std_dev(&[]), None);
        assert_eq!(percent(3, 0), None);
        assert_eq!(percent(1, 4), Some(25.0));
    }

    proptest! {
        #[test]
        fn prop_permutation_invariant(mut values in proptest::collection::vec(-1000i32..1000, 1..40)) {
            let forward: Vec<f64> = values.iter().map(|&v| v as f64).collect();
            values.reverse();
            let backward: Vec<f64> = values.iter().map(|&v| v as f64).collect();

            prop_assert_eq!(median(&forward), median(&backward));
            let (a, b) = (mean(&forward).unwrap(), mean(&backward).unwrap());
            prop_assert!((a - b).abs() < 1e-9);
            let (a, b) = (population_std_dev(&forward).unwrap(), population_std_dev(&backward).unwrap());
            prop_assert!((a - b).abs() < 1e-9);
        }

        #[test]
        fn prop_median_within_bounds(values in proptest::collection::vec(-1e6f64..1e6, 1..40)) {
            let m = median(&values).unwrap();
            let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(lo <= m && m <= hi);
        }
    }
}
