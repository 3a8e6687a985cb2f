use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::models::{CrimeRecord, DashboardStats, MonthCount, TypeCount};

pub fn month_histogram(records: &[CrimeRecord]) -> Vec<MonthCount> {
    let mut months: BTreeMap<&str, usize> = BTreeMap::new();

    for record in records {
        *months.entry(record.month_key()).or_insert(0) += 1;
    }

    months
        .into_iter()
        .map(|(month, count)| MonthCount {
            month: month.to_string(),
            count,
        })
        .collect()
}

/// Counts per crime type, in the order each type is first seen.
pub fn type_histogram(records: &[CrimeRecord]) -> Vec<TypeCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<TypeCount> = Vec::new();

    for record in records {
        match index.get(record.crime_type.as_str()) {
            Some(&slot) => counts[slot].count += 1,
            None => {
                index.insert(&record.crime_type, counts.len());
                counts.push(TypeCount {
                    crime_type: record.crime_type.clone(),
                    count: 1,
                });
            }
        }
    }

    counts
}

/// Distinct crime types sorted ascending, as offered by the type filter.
pub fn type_options(records: &[CrimeRecord]) -> Vec<String> {
    records
        .iter()
        .map(|record| record.crime_type.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn summarize(records: &[CrimeRecord], current_month: &str) -> DashboardStats {
    DashboardStats {
        total: records.len(),
        distinct_types: records
            .iter()
            .map(|record| record.crime_type.as_str())
            .collect::<BTreeSet<_>>()
            .len(),
        this_month: records
            .iter()
            .filter(|record| record.date.starts_with(current_month))
            .count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Status;
    use crate::store::CrimeStore;

    fn record(crime_type: &str, date: &str) -> CrimeRecord {
        CrimeRecord {
            crime_type: crime_type.to_string(),
            location: "Main Rd".to_string(),
            date: date.to_string(),
            status: Status::Logged,
            coordinates: None,
        }
    }

    #[test]
    fn empty_input_yields_empty_histograms() {
        assert!(month_histogram(&[]).is_empty());
        assert!(type_histogram(&[]).is_empty());
        assert_eq!(
            summarize(&[], "2025-12"),
            DashboardStats {
                total: 0,
                distinct_types: 0,
                this_month: 0
            }
        );
    }

    #[test]
    fn month_histogram_sorts_keys_and_counts_every_record() {
        let records = vec![
            record("Theft", "2025-12-02"),
            record("Theft", "2024-03-11"),
            record("Assault", "2025-12-20"),
            record("Arson", "2025-01-05"),
        ];

        let histogram = month_histogram(&records);
        let months: Vec<&str> = histogram.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(months, vec!["2024-03", "2025-01", "2025-12"]);
        assert_eq!(histogram[2].count, 2);
        assert_eq!(
            histogram.iter().map(|m| m.count).sum::<usize>(),
            records.len()
        );
    }

    #[test]
    fn malformed_dates_group_under_their_prefix() {
        let records = vec![record("Theft", "not-a-date"), record("Theft", "not-a-day")];
        let histogram = month_histogram(&records);
        assert_eq!(histogram.len(), 1);
        assert_eq!(histogram[0].month, "not-a-d");
        assert_eq!(histogram[0].count, 2);
    }

    #[test]
    fn type_histogram_keeps_first_seen_order() {
        let records = vec![
            record("Robbery", "2025-11-30"),
            record("Theft", "2025-12-02"),
            record("theft", "2025-12-02"),
            record("Robbery", "2025-12-01"),
        ];

        let histogram = type_histogram(&records);
        let types: Vec<(&str, usize)> = histogram
            .iter()
            .map(|t| (t.crime_type.as_str(), t.count))
            .collect();
        assert_eq!(types, vec![("Robbery", 2), ("Theft", 1), ("theft", 1)]);
        assert_eq!(
            histogram.iter().map(|t| t.count).sum::<usize>(),
            records.len()
        );
    }

    #[test]
    fn seed_summary_matches_dashboard_tiles() {
        let store = CrimeStore::seeded();
        let stats = summarize(store.records(), "2025-12");
        assert_eq!(stats.total, 5);
        assert_eq!(stats.distinct_types, 5);
        assert_eq!(stats.this_month, 3);
        assert_eq!(
            type_options(store.records()),
            vec!["Assault", "Burglary", "Robbery", "Theft", "Vandalism"]
        );
    }
}
