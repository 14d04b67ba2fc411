//! Regrouping a flat schedule into sequential loan years.

use crate::types::{PeriodEntry, YearGroup};

/// Entries that carry the cyclical 1..=12 month-of-year marker.
pub trait MonthMarker {
    fn month(&self) -> u32;
}

impl MonthMarker for PeriodEntry {
    fn month(&self) -> u32 {
        self.month
    }
}

/// Split a schedule into year buckets. A bucket opens at every entry whose
/// month is 1, except the very first entry, which always opens bucket 1.
pub fn group_by_year<T: MonthMarker>(entries: Vec<T>) -> Vec<YearGroup<T>> {
    let mut groups: Vec<YearGroup<T>> = Vec::new();

    for entry in entries {
        if groups.is_empty() || entry.month() == 1 {
            let year = groups.len() as u32 + 1;
            groups.push(YearGroup {
                year,
                data: Vec::new(),
            });
        }
        if let Some(current) = groups.last_mut() {
            current.data.push(entry);
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Marker(u32);

    impl MonthMarker for Marker {
        fn month(&self) -> u32 {
            self.0
        }
    }

    fn markers(months: &[u32]) -> Vec<Marker> {
        months.iter().copied().map(Marker).collect()
    }

    #[test]
    fn test_full_years() {
        let entries: Vec<Marker> = (0..36).map(|i| Marker(i % 12 + 1)).collect();
        let groups = group_by_year(entries);
        assert_eq!(groups.len(), 3);
        assert!(groups.iter().all(|g| g.data.len() == 12));
        assert_eq!(
            groups.iter().map(|g| g.year).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_partial_last_year() {
        let entries: Vec<Marker> = (0..14).map(|i| Marker(i % 12 + 1)).collect();
        let groups = group_by_year(entries);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].data, markers(&[1, 2]));
    }

    #[test]
    fn test_first_entry_always_opens_year_one() {
        let groups = group_by_year(markers(&[1, 2, 3]));
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].year, 1);

        // A sequence that does not start at month 1 still opens year 1.
        let groups = group_by_year(markers(&[11, 12, 1, 2]));
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].data, markers(&[11, 12]));
        assert_eq!(groups[1].data, markers(&[1, 2]));
    }

    #[test]
    fn test_concatenation_reproduces_input() {
        let input: Vec<Marker> = (0..30).map(|i| Marker(i % 12 + 1)).collect();
        let groups = group_by_year(input.clone());
        let flattened: Vec<Marker> = groups.into_iter().flat_map(|g| g.data).collect();
        assert_eq!(flattened, input);
    }

    #[test]
    fn test_empty_schedule() {
        assert!(group_by_year(Vec::<Marker>::new()).is_empty());
    }
}
