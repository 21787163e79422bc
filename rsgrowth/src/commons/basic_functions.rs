/// Check whether every value of a list is the same
/// Returns the verdict together with the distinct values, in order of first
/// appearance, so callers can report what actually differed.
pub fn identical_values<T: PartialEq + Copy>(values: &[T]) -> (bool, Vec<T>) {
    let mut distinct: Vec<T> = Vec::new();
    for &value in values {
        if !distinct.contains(&value) {
            distinct.push(value);
        }
    }
    (distinct.len() <= 1, distinct)
}

/// Minimum and maximum of a slice of class codes, None when empty
pub fn value_range(values: &[u8]) -> Option<(u8, u8)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_values() {
        let (same, distinct) = identical_values(&[5, 5, 5]);
        assert!(same);
        assert_eq!(distinct, vec![5]);
    }

    #[test]
    fn test_identical_values_reports_distinct() {
        let (same, distinct) = identical_values(&[5, 7, 5, 9]);
        assert!(!same);
        assert_eq!(distinct, vec![5, 7, 9]);
    }

    #[test]
    fn test_value_range() {
        assert_eq!(value_range(&[3, 1, 4, 2]), Some((1, 4)));
        assert_eq!(value_range(&[]), None);
    }
}
