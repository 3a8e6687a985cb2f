use crate::models::CrimeRecord;

/// Table filter. Absent or empty fields match every record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Case-insensitive substring of the crime type or location.
    pub search: Option<String>,
    /// Exact crime type.
    pub crime_type: Option<String>,
    /// Inclusive lower bound, compared as a string.
    pub date_from: Option<String>,
    /// Inclusive upper bound, compared as a string.
    pub date_to: Option<String>,
}

impl RecordFilter {
    pub fn matches(&self, record: &CrimeRecord) -> bool {
        let matches_search = match non_empty(&self.search) {
            Some(search) => {
                let needle = search.to_lowercase();
                record.crime_type.to_lowercase().contains(&needle)
                    || record.location.to_lowercase().contains(&needle)
            }
            None => true,
        };
        let matches_type = non_empty(&self.crime_type).map_or(true, |t| record.crime_type == t);
        let matches_from = non_empty(&self.date_from).map_or(true, |from| record.date.as_str() >= from);
        let matches_to = non_empty(&self.date_to).map_or(true, |to| record.date.as_str() <= to);

        matches_search && matches_type && matches_from && matches_to
    }

    pub fn apply<'a>(&self, records: &'a [CrimeRecord]) -> Vec<&'a CrimeRecord> {
        records.iter().filter(|record| self.matches(record)).collect()
    }

    pub fn is_empty(&self) -> bool {
        [&self.search, &self.crime_type, &self.date_from, &self.date_to]
            .into_iter()
            .all(|field| non_empty(field).is_none())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
