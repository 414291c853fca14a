//! Pulls the reply text out of a decoded webhook payload.

use quikr_core::util::DEFAULT_REPLY_TEXT;
use serde_json::Value;
use thiserror::Error;

/// Fields checked, in order, for the reply text.
const REPLY_FIELDS: [&str; 2] = ["output", "text"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplyError {
    #[error("webhook returned an empty array")]
    EmptyArray,

    #[error("webhook returned null")]
    Null,

    #[error("reply field `{0}` is not a string")]
    NotText(&'static str),
}

/// Extract the reply text from a webhook payload.
///
/// The payload is an object or an array whose first element is that object.
/// `output` wins over `text`; fields that are missing or falsy (`null`,
/// `false`, `0`, `""`) are skipped, and when nothing usable is left the
/// reply is [`DEFAULT_REPLY_TEXT`].
pub fn extract_reply_text(payload: &Value) -> Result<String, ReplyError> {
    let data = match payload {
        Value::Array(items) => items.first().ok_or(ReplyError::EmptyArray)?,
        other => other,
    };

    let object = match data {
        Value::Object(object) => object,
        Value::Null => return Err(ReplyError::Null),
        _ => return Ok(DEFAULT_REPLY_TEXT.to_string()),
    };

    for field in REPLY_FIELDS {
        match object.get(field) {
            Some(value) if !is_truthy(value) => {}
            Some(Value::String(text)) => return Ok(text.clone()),
            Some(_) => return Err(ReplyError::NotText(field)),
            None => {}
        }
    }

    Ok(DEFAULT_REPLY_TEXT.to_string())
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f.abs() > 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn output_field() {
        let text = extract_reply_text(&json!({"output": "Hi", "text": "ignored"}));
        assert_eq!(text, Ok("Hi".to_string()));
    }

    #[test]
    fn text_field_when_output_missing() {
        assert_eq!(
            extract_reply_text(&json!({"text": "Fallback"})),
            Ok("Fallback".to_string())
        );
    }

    #[test]
    fn falsy_output_falls_through() {
        for output in [json!(null), json!(""), json!(false), json!(0)] {
            let payload = json!({"output": output, "text": "From text"});
            assert_eq!(extract_reply_text(&payload), Ok("From text".to_string()));
        }
    }

    #[test]
    fn default_when_no_field() {
        assert_eq!(
            extract_reply_text(&json!({"status": "ok"})),
            Ok(DEFAULT_REPLY_TEXT.to_string())
        );
        assert_eq!(
            extract_reply_text(&json!({"output": "", "text": ""})),
            Ok(DEFAULT_REPLY_TEXT.to_string())
        );
    }

    #[test]
    fn single_element_array() {
        let payload = json!([{"output": "- Smart Lighting\n- Voice Control"}]);
        assert_eq!(
            extract_reply_text(&payload),
            Ok("- Smart Lighting\n- Voice Control".to_string())
        );
    }

    #[test]
    fn only_first_array_element_is_read() {
        let payload = json!([{"status": "ok"}, {"output": "second"}]);
        assert_eq!(
            extract_reply_text(&payload),
            Ok(DEFAULT_REPLY_TEXT.to_string())
        );
    }

    #[test]
    fn malformed_payloads() {
        assert_eq!(extract_reply_text(&json!([])), Err(ReplyError::EmptyArray));
        assert_eq!(extract_reply_text(&json!(null)), Err(ReplyError::Null));
        assert_eq!(extract_reply_text(&json!([null])), Err(ReplyError::Null));
        assert_eq!(
            extract_reply_text(&json!({"output": 42})),
            Err(ReplyError::NotText("output"))
        );
        assert_eq!(
            extract_reply_text(&json!({"text": {"nested": true}})),
            Err(ReplyError::NotText("text"))
        );
    }

    #[test]
    fn scalar_payload_gets_default() {
        assert_eq!(
            extract_reply_text(&json!("plain string")),
            Ok(DEFAULT_REPLY_TEXT.to_string())
        );
        assert_eq!(
            extract_reply_text(&json!(7)),
            Ok(DEFAULT_REPLY_TEXT.to_string())
        );
    }
}
