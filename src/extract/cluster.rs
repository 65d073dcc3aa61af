//! One-dimensional value clustering.

/// Merge nearby values into cluster centers.
///
/// Values are sorted, then each value within `threshold` of the previous
/// member joins the running group. Every group collapses to its mean, so the
/// result is sorted ascending. Complexity: O(n log n).
pub fn cluster(values: &[f32], threshold: f32) -> Vec<f32> {
    let mut sorted: Vec<f32> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return Vec::new();
    }
    sorted.sort_by(f32::total_cmp);

    let mut centers = Vec::new();
    let mut group_sum = sorted[0];
    let mut group_len = 1_usize;
    let mut last = sorted[0];

    for &value in &sorted[1..] {
        if value - last <= threshold {
            group_sum += value;
            group_len += 1;
        } else {
            centers.push(group_sum / group_len as f32);
            group_sum = value;
            group_len = 1;
        }
        last = value;
    }
    centers.push(group_sum / group_len as f32);

    centers
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-4, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(cluster(&[], 3.0).is_empty());
    }

    #[test]
    fn groups_collapse_to_mean() {
        assert_close(&cluster(&[10.0, 11.0, 12.0, 50.0, 51.0], 3.0), &[11.0, 50.5]);
    }

    #[test]
    fn unsorted_input_is_sorted_first() {
        assert_close(&cluster(&[51.0, 10.0, 50.0, 12.0, 11.0], 3.0), &[11.0, 50.5]);
    }

    #[test]
    fn chaining_uses_last_member() {
        // Each step is within 3 even though the ends are 9 apart.
        assert_close(&cluster(&[0.0, 3.0, 6.0, 9.0], 3.0), &[4.5]);
    }

    #[test]
    fn distant_values_stay_separate() {
        assert_close(&cluster(&[0.0, 100.0, 200.0], 3.0), &[0.0, 100.0, 200.0]);
    }

    #[test]
    fn non_finite_values_are_ignored() {
        assert_close(&cluster(&[f32::NAN, 5.0, f32::INFINITY], 3.0), &[5.0]);
    }
}
