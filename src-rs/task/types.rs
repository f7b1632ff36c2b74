use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A task as the backend reports it. Read-only here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i64,
    #[serde(default, deserialize_with = "string_or_null")]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "truthy_flag")]
    pub is_completed: bool,
}

impl Task {
    /// Converts one raw backend row.
    pub fn from_record(record: &Value) -> Result<Self, serde_json::Error> {
        Task::deserialize(record)
    }
}

/// Raw `{data: [...]}` listing. Rows stay untyped so one malformed row only
/// matters when it is the one being looked up.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TasksEnvelope {
    #[serde(default)]
    pub data: Vec<Value>,
}

fn string_or_null<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// SQLite stores booleans as 0/1, so accept numbers and null as well.
fn truthy_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[test]
    fn decodes_sqlite_row_with_extra_columns() {
        let task = Task::from_record(&json!({
            "id": 1,
            "username": "anna",
            "email": "anna@example.com",
            "text": "Write docs",
            "isCompleted": 1,
            "isEdited": 0,
            "createdAt": "2026-02-09 10:00:00"
        }))
        .unwrap();

        assert_eq!(task.id, 1);
        assert_eq!(task.text, "Write docs");
        assert_eq!(task.created_at.as_deref(), Some("2026-02-09 10:00:00"));
        assert!(task.is_completed);
    }

    #[rstest]
    #[case(json!(true), true)]
    #[case(json!(false), false)]
    #[case(json!(1), true)]
    #[case(json!(0), false)]
    #[case(json!(null), false)]
    fn completion_flag_accepts_bools_numbers_and_null(#[case] flag: Value, #[case] expected: bool) {
        let task = Task::from_record(&json!({"id": 3, "text": "x", "isCompleted": flag})).unwrap();
        assert_eq!(task.is_completed, expected);
    }

    #[test]
    fn null_text_and_missing_fields_default() {
        let task = Task::from_record(&json!({"id": 2, "text": null})).unwrap();
        assert_eq!(task.text, "");
        assert_eq!(task.created_at, None);
        assert!(!task.is_completed);
    }

    #[test]
    fn envelope_keeps_rows_untyped() {
        let envelope: TasksEnvelope = serde_json::from_value(json!({
            "data": [{"id": 1, "isCompleted": 0}, {"id": "broken"}],
            "pagination": {"page": 1}
        }))
        .unwrap();
        assert_eq!(envelope.data.len(), 2);

        let empty: TasksEnvelope = serde_json::from_value(json!({})).unwrap();
        assert!(empty.data.is_empty());
    }
}
