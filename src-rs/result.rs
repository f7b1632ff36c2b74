use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize, Serializer};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    #[default]
    Medium,
    High,
}

impl Confidence {
    /// Case-insensitive; anything outside the three labels is `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "low" => Some(Confidence::Low),
            "medium" => Some(Confidence::Medium),
            "high" => Some(Confidence::High),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub task_name: String,
    pub estimated_hours: f64,
    pub reasoning: String,
    pub confidence: Confidence,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Active,
    Completed,
}

/// A backend timestamp, keeping whether it carried a UTC offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Timestamp {
    Aware(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl Timestamp {
    pub fn to_iso(&self) -> String {
        match self {
            Timestamp::Aware(dt) => dt.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            Timestamp::Naive(dt) => dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ActiveTimeResult {
    pub active_hours: f64,
    pub status: ActivityStatus,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[rstest]
    #[case("high", Some(Confidence::High))]
    #[case(" Low ", Some(Confidence::Low))]
    #[case("MEDIUM", Some(Confidence::Medium))]
    #[case("very high", None)]
    #[case("", None)]
    fn parses_confidence_labels(#[case] raw: &str, #[case] expected: Option<Confidence>) {
        assert_eq!(Confidence::parse(raw), expected);
    }

    #[test]
    fn timestamps_render_as_iso_strings() {
        let aware = DateTime::parse_from_rfc3339("2026-02-09T10:00:00+00:00").unwrap();
        assert_eq!(Timestamp::Aware(aware).to_iso(), "2026-02-09T10:00:00Z");

        let shifted = DateTime::parse_from_rfc3339("2026-02-09T10:00:00+03:00").unwrap();
        assert_eq!(Timestamp::Aware(shifted).to_iso(), "2026-02-09T10:00:00+03:00");

        let naive = NaiveDate::from_ymd_opt(2026, 2, 9)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        assert_eq!(Timestamp::Naive(naive).to_iso(), "2026-02-09T10:00:00");
    }

    #[test]
    fn active_result_serializes_null_completion() {
        let naive = NaiveDate::from_ymd_opt(2026, 2, 9)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let value = serde_json::to_value(ActiveTimeResult {
            active_hours: 5.0,
            status: ActivityStatus::Active,
            created_at: Timestamp::Naive(naive),
            completed_at: None,
        })
        .unwrap();
        assert_eq!(value["status"], "active");
        assert_eq!(value["created_at"], "2026-02-09T10:00:00");
        assert!(value["completed_at"].is_null());
    }
}
