//! JSON encoding of the full state and the prefix-tagged base64 export format.

use crate::migrate::migrate;
use crate::EXPORT_PREFIX;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::Value;
use thiserror::Error;
use xiuzhen_core::GameState;

/// Every way a payload can fail to decode. Callers treat all variants alike:
/// the payload is invalid.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("empty payload")]
    Empty,
    #[error("invalid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload is not a JSON object")]
    NotObject,
    #[error("missing or non-numeric saveVersion")]
    MissingVersion,
}

/// Canonical JSON encoding of the full state.
pub fn serialize(state: &GameState) -> serde_json::Result<Vec<u8>> {
    serde_json::to_vec(state)
}

/// Decode a JSON save, validating only that it is an object carrying a
/// numeric `saveVersion`. Missing fields take catalog defaults.
///
/// Any number is accepted as a version: fractions truncate and values
/// outside `u32` saturate, so `2.5` reads as 2 and `-1` as 0 before
/// migration raises it.
pub fn decode_json(bytes: &[u8]) -> Result<GameState, DecodeError> {
    let mut value: Value = serde_json::from_slice(bytes)?;
    let obj = value.as_object_mut().ok_or(DecodeError::NotObject)?;
    let version = obj
        .get("saveVersion")
        .and_then(Value::as_f64)
        .ok_or(DecodeError::MissingVersion)?;
    // `as` saturates float-to-int casts.
    obj.insert("saveVersion".into(), Value::from(version as u32));
    let state: GameState = serde_json::from_value(value)?;
    Ok(migrate(state))
}

/// `EXPORT_PREFIX` followed by base64 of the UTF-8 JSON encoding.
pub fn to_portable_string(state: &GameState) -> serde_json::Result<String> {
    let json = serialize(state)?;
    Ok(format!("{EXPORT_PREFIX}{}", STANDARD.encode(json)))
}

/// Reverse [`to_portable_string`]. A missing prefix is tolerated.
pub fn from_portable_string(text: &str) -> Result<GameState, DecodeError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(DecodeError::Empty);
    }
    let payload = trimmed.strip_prefix(EXPORT_PREFIX).unwrap_or(trimmed);
    let bytes = STANDARD.decode(payload)?;
    let json = String::from_utf8(bytes)?;
    decode_json(json.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use xiuzhen_core::{default_state, recompute};

    #[test]
    fn portable_string_round_trips_default() {
        let s = default_state(1_700_000_000_000);
        let text = to_portable_string(&s).unwrap();
        assert!(text.starts_with(EXPORT_PREFIX));
        assert_eq!(from_portable_string(&text).unwrap(), s);
    }

    #[test]
    fn prefix_is_optional_and_whitespace_ignored() {
        let s = default_state(5);
        let text = to_portable_string(&s).unwrap();
        let bare = format!("  {}\n", &text[EXPORT_PREFIX.len()..]);
        assert_eq!(from_portable_string(&bare).unwrap(), s);
    }

    #[test]
    fn rejects_garbage() {
        assert!(matches!(from_portable_string(""), Err(DecodeError::Empty)));
        assert!(matches!(
            from_portable_string("XZ1:@@@not base64@@@"),
            Err(DecodeError::Base64(_))
        ));
        let not_json = STANDARD.encode("hello");
        assert!(matches!(
            from_portable_string(&not_json),
            Err(DecodeError::Json(_))
        ));
        let array = STANDARD.encode("[1,2,3]");
        assert!(matches!(
            from_portable_string(&array),
            Err(DecodeError::NotObject)
        ));
        let no_version = STANDARD.encode(r#"{"lingshi": 5}"#);
        assert!(matches!(
            from_portable_string(&no_version),
            Err(DecodeError::MissingVersion)
        ));
        let string_version = STANDARD.encode(r#"{"saveVersion": "2"}"#);
        assert!(matches!(
            from_portable_string(&string_version),
            Err(DecodeError::MissingVersion)
        ));
    }

    #[test]
    fn minimal_payload_fills_defaults() {
        let payload = r#"{"saveVersion": 1, "lingshi": 42, "playerName": "韩立"}"#;
        let s = decode_json(payload.as_bytes()).unwrap();
        assert_eq!(s.lingshi, 42.0);
        assert_eq!(s.player_name, "韩立");
        assert_eq!(s.save_version, xiuzhen_core::CURRENT_SAVE_VERSION);
        assert_eq!(s.realms.len(), 52);
    }

    #[test]
    fn any_numeric_version_is_accepted() {
        for version in ["2.5", "-1", "0"] {
            let payload = format!(r#"{{"saveVersion": {version}, "lingshi": 7}}"#);
            let s = decode_json(payload.as_bytes()).unwrap();
            assert_eq!(s.save_version, xiuzhen_core::CURRENT_SAVE_VERSION);
            assert_eq!(s.lingshi, 7.0);
        }
        let s = decode_json(br#"{"saveVersion": 1e12}"#).unwrap();
        assert_eq!(s.save_version, u32::MAX);
    }

    #[test]
    fn unicode_survives_encoding() {
        let mut s = default_state(0);
        s.player_name = "青云子🌙".into();
        let back = from_portable_string(&to_portable_string(&s).unwrap()).unwrap();
        assert_eq!(back.player_name, "青云子🌙");
    }

    proptest! {
        #[test]
        fn round_trip_preserves_reachable_shapes(
            lingshi in 0.0f64..1e12,
            xiuwei in 0.0f64..1e9,
            realm in 0usize..52,
            root in 0usize..4,
            name in "\\PC{0,24}",
            tick in 0i64..4_000_000_000_000,
        ) {
            let mut s = default_state(tick);
            s.lingshi = lingshi;
            s.xiuwei = xiuwei;
            s.realm_index = realm;
            s.root_index = root;
            s.player_name = name;
            let s = recompute(s);
            let back = from_portable_string(&to_portable_string(&s).unwrap()).unwrap();
            prop_assert_eq!(back, s);
        }
    }
}
