//! Lenient deserializers for fields whose JSON type differs between backends.
//!
//! Python backends commonly emit integer primary keys and `Decimal` amounts
//! rendered as strings; the UI only needs an opaque id and an `f64`.

use serde::Deserializer;
use serde::de::{self, Visitor};
use std::fmt;

struct StringOrNumber;

impl<'de> Visitor<'de> for StringOrNumber {
    type Value = String;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string or an integer identifier")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v.to_string())
    }
}

/// Accept `"abc"` or `42` and yield a `String`.
pub fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    deserializer.deserialize_any(StringOrNumber)
}

struct NumberOrString;

impl<'de> Visitor<'de> for NumberOrString {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or a numeric string")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v as f64)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v as f64)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        v.trim()
            .parse::<f64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

/// Accept `10.5` or `"10.50"` and yield an `f64`.
pub fn number_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    deserializer.deserialize_any(NumberOrString)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
        #[serde(deserialize_with = "number_or_string")]
        valor: f64,
    }

    #[test]
    fn accepts_both_shapes() {
        let a: Row = serde_json::from_value(json!({ "id": "a1", "valor": 2 })).unwrap();
        assert_eq!(a.id, "a1");
        assert_eq!(a.valor, 2.0);

        let b: Row = serde_json::from_value(json!({ "id": -3, "valor": " 4.25 " })).unwrap();
        assert_eq!(b.id, "-3");
        assert_eq!(b.valor, 4.25);
    }

    #[test]
    fn rejects_non_numeric_amount() {
        let res: Result<Row, _> = serde_json::from_value(json!({ "id": 1, "valor": "abc" }));
        assert!(res.is_err());
    }
}
