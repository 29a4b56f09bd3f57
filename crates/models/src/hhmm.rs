//! `HH:MM` wire format for [`NaiveTime`] fields.
//!
//! Use as `#[serde(with = "models::hhmm")]`, or `hhmm::option` for `Option<NaiveTime>`.
//! Parsing also accepts `HH:MM:SS`.
use chrono::NaiveTime;
use serde::{de, Deserialize, Deserializer, Serializer};

pub const FORMAT: &str = "%H:%M";

pub fn parse(s: &str) -> Option<NaiveTime> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
        .ok()
}

pub fn format(t: &NaiveTime) -> String {
    t.format(FORMAT).to_string()
}

pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&format(t))
}

pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
    let raw = String::deserialize(d)?;
    parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid time `{raw}`, expected HH:MM")))
}

pub mod option {
    use super::*;

    pub fn serialize<S: Serializer>(t: &Option<NaiveTime>, s: S) -> Result<S::Ok, S::Error> {
        match t {
            Some(t) => s.serialize_some(&super::format(t)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<NaiveTime>, D::Error> {
        match Option::<String>::deserialize(d)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => super::parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid time `{raw}`, expected HH:MM"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize, Deserialize)]
    struct Window {
        #[serde(with = "crate::hhmm")]
        start: NaiveTime,
        #[serde(default, with = "crate::hhmm::option")]
        lunch: Option<NaiveTime>,
    }

    #[test]
    fn accepts_minutes_and_seconds() {
        assert_eq!(parse("09:30"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse("09:30:00"), NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(parse("9h30"), None);
        assert_eq!(parse("24:00"), None);
    }

    #[test]
    fn serializes_without_seconds() {
        let w = Window { start: NaiveTime::from_hms_opt(13, 0, 0).unwrap(), lunch: None };
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json, serde_json::json!({"start": "13:00", "lunch": null}));
    }

    #[test]
    fn empty_optional_is_none() {
        let w: Window = serde_json::from_str(r#"{"start":"10:00","lunch":""}"#).unwrap();
        assert_eq!(w.lunch, None);
        assert!(serde_json::from_str::<Window>(r#"{"start":"ten"}"#).is_err());
    }
}
