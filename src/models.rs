use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Status {
    Logged,
    UnderReview,
    Confirmed,
    /// Status text from an imported file that is not one of the known labels.
    Other(String),
}

impl Status {
    pub fn parse(value: &str) -> Self {
        match value {
            "Logged" => Status::Logged,
            "Under Review" => Status::UnderReview,
            "Confirmed" => Status::Confirmed,
            other => Status::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Logged => "Logged",
            Status::UnderReview => "Under Review",
            Status::Confirmed => "Confirmed",
            Status::Other(value) => value.as_str(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrimeRecord {
    pub crime_type: String,
    pub location: String,
    /// Expected as `YYYY-MM-DD` but never validated.
    pub date: String,
    pub status: Status,
    pub coordinates: Option<Coordinates>,
}

impl CrimeRecord {
    /// The `YYYY-MM` grouping key: the first seven characters of the date,
    /// or the whole date when it is shorter.
    pub fn month_key(&self) -> &str {
        match self.date.char_indices().nth(7) {
            Some((idx, _)) => &self.date[..idx],
            None => &self.date,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthCount {
    pub month: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeCount {
    pub crime_type: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: usize,
    pub distinct_types: usize,
    pub this_month: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub month: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Forecast {
    pub delta: f64,
    pub points: Vec<ForecastPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub lat: f64,
    pub lng: f64,
    pub crime_type: String,
    pub location: String,
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_with_date(date: &str) -> CrimeRecord {
        CrimeRecord {
            crime_type: "Theft".to_string(),
            location: "Market".to_string(),
            date: date.to_string(),
            status: Status::Logged,
            coordinates: None,
        }
    }

    #[test]
    fn month_key_takes_year_month_prefix() {
        assert_eq!(record_with_date("2025-12-02").month_key(), "2025-12");
        assert_eq!(record_with_date("2025-1").month_key(), "2025-1");
        assert_eq!(record_with_date("12/02/2025").month_key(), "12/02/2");
    }

    #[test]
    fn status_labels_parse_case_sensitively() {
        assert_eq!(Status::parse("Under Review"), Status::UnderReview);
        assert_eq!(Status::parse("logged"), Status::Other("logged".to_string()));
        assert_eq!(Status::Other("Closed".to_string()).to_string(), "Closed");
    }
}
