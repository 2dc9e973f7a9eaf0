// venus_core/src/codec.rs

//! Wire format of the robot status topic.
//!
//! Each message is a JSON array of exactly seven scalars, read positionally:
//!
//! ```text
//! [x:int, y:int, rock:bool, colour:int|string|bool|null, size:int, cliff:bool, mountain:bool]
//! ```

use crate::error::DecodeError;
use crate::messages::RobotRecord;
use serde_json::{Map, Value};

/// Field names in wire order.
pub const RECORD_KEYS: [&str; 7] = ["x", "y", "rock", "colour", "size", "cliff", "mountain"];

/// Decodes a raw topic payload into a typed record.
pub fn decode_payload(payload: &[u8]) -> Result<RobotRecord, DecodeError> {
    let text = std::str::from_utf8(payload)?.trim();
    let value: Value = serde_json::from_str(text).map_err(DecodeError::Json)?;

    let Value::Array(values) = value else {
        return Err(DecodeError::NotAnArray);
    };
    if values.len() != RECORD_KEYS.len() {
        return Err(DecodeError::WrongLength {
            expected: RECORD_KEYS.len(),
            found: values.len(),
        });
    }

    // Name the positional values so serde can check each field's type.
    let named: Map<String, Value> = RECORD_KEYS
        .iter()
        .map(|key| key.to_string())
        .zip(values.into_iter().map(negative_zero_as_integer))
        .collect();

    serde_json::from_value(Value::Object(named)).map_err(DecodeError::Schema)
}

/// serde_json reads the literal `-0` as the float `-0.0`; the robots mean 0.
fn negative_zero_as_integer(value: Value) -> Value {
    match value.as_f64() {
        Some(f) if value.is_f64() && f == 0.0 && f.is_sign_negative() => Value::from(0),
        _ => value,
    }
}

/// Encodes a record back into its positional wire form.
pub fn encode_record(record: &RobotRecord) -> String {
    Value::Array(record_values(record)).to_string()
}

fn record_values(record: &RobotRecord) -> Vec<Value> {
    vec![
        Value::from(record.x),
        Value::from(record.y),
        Value::from(record.rock),
        serde_json::to_value(&record.colour).unwrap_or(Value::Null),
        Value::from(record.size),
        Value::from(record.cliff),
        Value::from(record.mountain),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Colour;

    #[test]
    fn decodes_a_rock_report() {
        let record = decode_payload(br#"[1, -2, true, "red", 5, false, false]"#).unwrap();
        assert_eq!(
            record,
            RobotRecord {
                x: 1,
                y: -2,
                rock: true,
                colour: Colour::Name("red".into()),
                size: 5,
                cliff: false,
                mountain: false,
            }
        );
    }

    #[test]
    fn accepts_every_colour_shape() {
        let cases = [
            (r#"[0,0,true,3,1,false,false]"#, Colour::Code(3)),
            (r#"[0,0,true,"blue",1,false,false]"#, Colour::Name("blue".into())),
            (r#"[0,0,true,false,1,false,false]"#, Colour::Flag(false)),
            (r#"[0,0,false,null,0,false,false]"#, Colour::Unset),
        ];
        for (payload, colour) in cases {
            assert_eq!(decode_payload(payload.as_bytes()).unwrap().colour, colour);
        }
    }

    #[test]
    fn negative_zero_reads_as_zero() {
        let record = decode_payload(b"[-0, 0, false, -0, -0, false, false]").unwrap();
        assert_eq!((record.x, record.y, record.size), (0, 0, 0));
        assert_eq!(record.colour, Colour::Code(0));

        // Other floats are still a schema error.
        let err = decode_payload(b"[-0.5, 0, false, null, 0, false, false]").unwrap_err();
        assert!(matches!(err, DecodeError::Schema(_)));
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert!(decode_payload(b"  [0,0,false,null,0,false,false]\r\n").is_ok());
    }

    #[test]
    fn rejects_short_payloads() {
        let err = decode_payload(b"[1, 0, true, \"red\", 5, false]").unwrap_err();
        assert!(matches!(
            err,
            DecodeError::WrongLength {
                expected: 7,
                found: 6
            }
        ));
    }

    #[test]
    fn rejects_long_payloads() {
        let err = decode_payload(b"[1,0,true,\"red\",5,false,false,false]").unwrap_err();
        assert!(matches!(err, DecodeError::WrongLength { found: 8, .. }));
    }

    #[test]
    fn rejects_objects() {
        let err = decode_payload(br#"{"x": 1}"#).unwrap_err();
        assert!(matches!(err, DecodeError::NotAnArray));
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            decode_payload(b"[1, 2,").unwrap_err(),
            DecodeError::Json(_)
        ));
    }

    #[test]
    fn rejects_invalid_utf8() {
        assert!(matches!(
            decode_payload(&[0x5b, 0xff, 0xfe, 0x5d]).unwrap_err(),
            DecodeError::Utf8(_)
        ));
    }

    #[test]
    fn rejects_mistyped_fields() {
        let err = decode_payload(br#"["1", 0, true, "red", 5, false, false]"#).unwrap_err();
        assert!(matches!(err, DecodeError::Schema(_)));
    }

    #[test]
    fn encoding_restores_the_original_array() {
        let payloads = [
            r#"[1,0,true,"red",5,false,false]"#,
            r#"[-2,2,false,null,0,true,false]"#,
            r#"[0,-1,true,false,7,false,true]"#,
            r#"[3,3,true,12,9,true,true]"#,
        ];
        for payload in payloads {
            let record = decode_payload(payload.as_bytes()).unwrap();
            let original: Value = serde_json::from_str(payload).unwrap();
            let encoded: Value = serde_json::from_str(&encode_record(&record)).unwrap();
            assert_eq!(encoded, original, "payload {payload}");
        }
    }
}
