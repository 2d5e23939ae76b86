use crate::errors::{ImportError, StoreError};
use crate::models::Round;
use crate::validation::validate_collection;
use chrono::NaiveDateTime;
use serde_json::Value;

pub const EXPORT_PREFIX: &str = "CLUBF4";

/// Pretty-printed JSON array of every round, exactly as stored.
pub fn export_rounds(rounds: &[Round]) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(rounds)?)
}

/// `CLUBF4_<YYYYMMDDHHMMSS>.json` for the given export time.
pub fn export_file_name(at: NaiveDateTime) -> String {
    format!("{EXPORT_PREFIX}_{}.json", at.format("%Y%m%d%H%M%S"))
}

/// Decodes and checks an uploaded backup. Nothing is applied here; the caller
/// replaces the store only after the user confirms.
pub fn parse_backup(text: &str) -> Result<Vec<Round>, ImportError> {
    let value: Value = serde_json::from_str(text).map_err(ImportError::Parse)?;
    let Value::Array(items) = value else {
        return Err(ImportError::NotAnArray);
    };

    let mut rounds = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let round: Round = serde_json::from_value(item).map_err(|err| ImportError::Schema {
            index,
            reason: err.to_string(),
        })?;
        rounds.push(round);
    }
    validate_collection(&rounds).map_err(|(index, err)| schema(index, err.to_string()))?;
    Ok(rounds)
}

fn schema(index: usize, reason: impl Into<String>) -> ImportError {
    ImportError::Schema {
        index,
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_rounds;
    use chrono::NaiveDate;

    #[test]
    fn export_then_import_reproduces_rounds() {
        let mut rounds = seed_rounds();
        rounds.reverse();
        rounds[0].scores.truncate(2);

        let bytes = export_rounds(&rounds).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains('\n'), "export should be pretty-printed");
        assert_eq!(parse_backup(&text).unwrap(), rounds);
    }

    #[test]
    fn export_of_empty_collection_imports_as_empty() {
        let bytes = export_rounds(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(parse_backup(&text).unwrap().is_empty());
    }

    #[test]
    fn file_name_uses_compact_timestamp() {
        let at = NaiveDate::from_ymd_opt(2024, 6, 17)
            .unwrap()
            .and_hms_opt(9, 5, 3)
            .unwrap();
        assert_eq!(export_file_name(at), "CLUBF4_20240617090503.json");
    }

    #[test]
    fn object_payload_is_rejected_as_not_an_array() {
        assert!(matches!(parse_backup(r#"{"a":1}"#), Err(ImportError::NotAnArray)));
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(parse_backup("[{"), Err(ImportError::Parse(_))));
    }

    #[test]
    fn malformed_rounds_are_rejected_with_their_index() {
        let bad_shape = r#"[{"id":"1","date":"2024-05-15","course":"A","scores":[]}, {"id":"2"}]"#;
        assert!(matches!(
            parse_backup(bad_shape),
            Err(ImportError::Schema { index: 1, .. })
        ));

        let duplicate = r#"[
            {"id":"1","date":"2024-05-15","course":"A","scores":[]},
            {"id":"1","date":"2024-05-16","course":"B","scores":[]}]"#;
        assert!(matches!(
            parse_backup(duplicate),
            Err(ImportError::Schema { index: 1, .. })
        ));

        let blank_id = r#"[{"id":"","date":"2024-05-15","course":"A","scores":[]}]"#;
        assert!(matches!(
            parse_backup(blank_id),
            Err(ImportError::Schema { index: 0, .. })
        ));
    }

    #[test]
    fn round_contents_are_restored_as_stored() {
        let odd = r#"[{"id":"1","date":"2024-05-15","course":"",
            "scores":[{"playerName":"PETER","score":0},{"playerName":"SEVEN","score":-3}]}]"#;
        let rounds = parse_backup(odd).unwrap();
        assert_eq!(rounds.len(), 1);
        assert_eq!(rounds[0].course, "");
        assert_eq!(rounds[0].scores[0].score, 0);
        assert_eq!(rounds[0].scores[1].score, -3);
    }
}
