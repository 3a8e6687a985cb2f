use crate::models::{Coordinates, CrimeRecord, Status};

/// The records held for one session. Append-only; insertion order is kept.
#[derive(Debug, Clone, Default)]
pub struct CrimeStore {
    records: Vec<CrimeRecord>,
}

impl CrimeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded() -> Self {
        let seed = vec![
            ("Theft", "Market", "2025-12-02", Status::Logged, 40.7128, -74.0060),
            (
                "Assault",
                "Main Rd",
                "2025-12-01",
                Status::UnderReview,
                40.7489,
                -73.9680,
            ),
            (
                "Robbery",
                "Junction",
                "2025-11-30",
                Status::Confirmed,
                40.7282,
                -73.9942,
            ),
            (
                "Burglary",
                "Downtown",
                "2025-11-28",
                Status::Logged,
                40.7614,
                -73.9776,
            ),
            (
                "Vandalism",
                "Park",
                "2025-12-03",
                Status::Confirmed,
                40.7827,
                -73.9654,
            ),
        ];

        let records = seed
            .into_iter()
            .map(|(crime_type, location, date, status, lat, lng)| CrimeRecord {
                crime_type: crime_type.to_string(),
                location: location.to_string(),
                date: date.to_string(),
                status,
                coordinates: Some(Coordinates { lat, lng }),
            })
            .collect();

        Self { records }
    }

    pub fn records(&self) -> &[CrimeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn append(&mut self, record: CrimeRecord) {
        tracing::debug!(crime_type = %record.crime_type, date = %record.date, "appending record");
        self.records.push(record);
    }

    /// Appends every record in order and returns how many were added.
    pub fn extend(&mut self, records: impl IntoIterator<Item = CrimeRecord>) -> usize {
        let before = self.records.len();
        for record in records {
            self.append(record);
        }
        self.records.len() - before
    }
}
