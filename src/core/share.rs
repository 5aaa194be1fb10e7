//! Share token for a roster: JSON → percent-encoding → base64.
//!
//! The token is safe to drop into a URL fragment. Decoding is all or
//! nothing: one malformed record rejects the whole batch.

use crate::errors::{AppError, AppResult};
use crate::models::employee::{DualShiftEmployee, SingleShiftEmployee};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64_STANDARD};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Characters left as-is, same set a browser's `encodeURIComponent` keeps.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A record shape that can travel in a share token.
pub trait SharedRecord: Serialize + DeserializeOwned {
    /// Check the structural shape of one raw record before deserializing.
    fn check_shape(record: &Value) -> Result<(), String>;
}

fn require_string(record: &Value, key: &str) -> Result<(), String> {
    match record.get(key) {
        Some(Value::String(_)) => Ok(()),
        _ => Err(format!("field '{key}' must be a string")),
    }
}

fn check_identity(record: &Value) -> Result<(), String> {
    if !record.is_object() {
        return Err("record is not an object".into());
    }
    require_string(record, "id")?;
    require_string(record, "name")
}

impl SharedRecord for SingleShiftEmployee {
    fn check_shape(record: &Value) -> Result<(), String> {
        check_identity(record)
    }
}

impl SharedRecord for DualShiftEmployee {
    fn check_shape(record: &Value) -> Result<(), String> {
        check_identity(record)?;
        for key in ["shift1", "shift2"] {
            match record.get(key) {
                None | Some(Value::Null) => {}
                Some(shift) => {
                    require_string(shift, "role").map_err(|e| format!("{key}: {e}"))?;
                    for bound in ["shiftStart", "shiftEnd"] {
                        if !shift.get(bound).is_some_and(Value::is_number) {
                            return Err(format!("{key}: field '{bound}' must be a number"));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

pub fn encode<T: SharedRecord>(records: &[T]) -> AppResult<String> {
    let json = serde_json::to_string(records)?;
    let escaped = utf8_percent_encode(&json, COMPONENT).to_string();
    Ok(BASE64_STANDARD.encode(escaped))
}

/// Decode a token, explaining why it was rejected.
pub fn decode_strict<T: SharedRecord>(token: &str) -> AppResult<Vec<T>> {
    let malformed = |reason: String| AppError::DecodeMalformed(reason);

    let raw = BASE64_STANDARD
        .decode(token.trim())
        .map_err(|e| malformed(format!("base64: {e}")))?;
    let escaped = String::from_utf8(raw).map_err(|e| malformed(format!("utf-8: {e}")))?;
    let json = percent_decode_str(&escaped)
        .decode_utf8()
        .map_err(|e| malformed(format!("percent-encoding: {e}")))?;

    let value: Value = serde_json::from_str(&json).map_err(|e| malformed(format!("json: {e}")))?;
    let Value::Array(items) = value else {
        return Err(malformed("payload is not an array".into()));
    };

    let mut out = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        T::check_shape(&item).map_err(|e| malformed(format!("record {i}: {e}")))?;
        let record: T = serde_json::from_value(item).map_err(|e| malformed(format!("record {i}: {e}")))?;
        out.push(record);
    }
    Ok(out)
}

/// Decode a token; anything malformed is treated as absent.
pub fn decode<T: SharedRecord>(token: &str) -> Option<Vec<T>> {
    decode_strict(token).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::employee::{EmployeeId, Shift};
    use serde_json::json;

    fn token_of(value: &Value) -> String {
        let escaped = utf8_percent_encode(&value.to_string(), COMPONENT).to_string();
        BASE64_STANDARD.encode(escaped)
    }

    fn sample() -> SingleShiftEmployee {
        SingleShiftEmployee {
            id: EmployeeId::from("1700000000000-9f"),
            name: "王小明".into(),
            role: "客服".into(),
            color: "#4F46E5".into(),
            shift_start: 10.0,
            shift_end: 18.0,
            break_start: Some(12.0),
            break_end: Some(13.0),
        }
    }

    #[test]
    fn token_is_fragment_safe() {
        let token = encode(&[sample()]).unwrap();
        assert!(token.chars().all(|c| c.is_ascii_alphanumeric() || "+/=".contains(c)));
        let back: Vec<SingleShiftEmployee> = decode(&token).unwrap();
        assert_eq!(back, vec![sample()]);
    }

    #[test]
    fn record_missing_name_rejects_whole_batch() {
        let payload = json!([
            {"id": "1", "name": "ok", "role": "r", "color": "#000000",
             "shiftStart": 10.0, "shiftEnd": 12.0, "breakStart": null, "breakEnd": null},
            {"id": "2", "role": "r", "color": "#000000",
             "shiftStart": 10.0, "shiftEnd": 12.0, "breakStart": null, "breakEnd": null}
        ]);
        assert!(decode::<SingleShiftEmployee>(&token_of(&payload)).is_none());

        let err = decode_strict::<SingleShiftEmployee>(&token_of(&payload)).unwrap_err();
        assert!(err.to_string().contains("record 1"));
    }

    #[test]
    fn numeric_id_is_rejected() {
        let payload = json!([{"id": 7, "name": "x", "shift1": null, "shift2": null}]);
        assert!(decode::<DualShiftEmployee>(&token_of(&payload)).is_none());
    }

    #[test]
    fn dual_shift_bounds_must_be_numbers() {
        let payload = json!([{
            "id": "1", "name": "林",
            "shift1": {"role": "菜口", "shiftStart": "10:00", "shiftEnd": 14.0},
            "shift2": null
        }]);
        let err = decode_strict::<DualShiftEmployee>(&token_of(&payload)).unwrap_err();
        assert!(err.to_string().contains("shift1"));
    }

    #[test]
    fn dual_records_decode() {
        let e = DualShiftEmployee {
            id: EmployeeId::from("5-e"),
            name: "林".into(),
            shift1: None,
            shift2: Some(Shift {
                role: "跑菜".into(),
                shift_start: 17.0,
                shift_end: 22.0,
            }),
        };
        let token = encode(std::slice::from_ref(&e)).unwrap();
        assert_eq!(decode::<DualShiftEmployee>(&token), Some(vec![e]));
    }

    #[test]
    fn garbage_and_non_arrays_decode_to_none() {
        assert!(decode::<SingleShiftEmployee>("%%%not-base64").is_none());
        assert!(decode::<SingleShiftEmployee>(&token_of(&json!({"id": "1"}))).is_none());
        assert_eq!(decode::<SingleShiftEmployee>(&token_of(&json!([]))), Some(vec![]));
    }
}
