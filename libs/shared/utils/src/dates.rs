use chrono::{Datelike, NaiveDate};

/// Completed years between `birth_date` and `on`. Zero for future birth dates.
pub fn age_on(birth_date: NaiveDate, on: NaiveDate) -> u32 {
    if on < birth_date {
        return 0;
    }
    let mut years = on.year() - birth_date.year();
    if (on.month(), on.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

/// Serde adapter for slot times on the wire (`"HH:MM"`). Seconds are accepted
/// on input and dropped on output.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<NaiveTime, String> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
            .map_err(|e| format!("invalid time {:?}: {}", raw, e))
    }

    pub mod vec {
        use chrono::NaiveTime;
        use serde::{de::Error, ser::SerializeSeq, Deserialize, Deserializer, Serializer};

        pub fn serialize<S>(times: &[NaiveTime], serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut seq = serializer.serialize_seq(Some(times.len()))?;
            for time in times {
                seq.serialize_element(&time.format(super::FORMAT).to_string())?;
            }
            seq.end()
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<NaiveTime>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Vec::<String>::deserialize(deserializer)?
                .iter()
                .map(|raw| super::parse(raw).map_err(D::Error::custom))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use serde::{Deserialize, Serialize};

    #[test]
    fn test_age_before_and_after_birthday() {
        let birth = NaiveDate::from_ymd_opt(1956, 6, 15).unwrap();
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2026, 6, 14).unwrap()), 69);
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2026, 6, 15).unwrap()), 70);
    }

    #[test]
    fn test_age_of_unborn_is_zero() {
        let birth = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        assert_eq!(age_on(birth, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()), 0);
    }

    #[derive(Serialize, Deserialize)]
    struct Slot {
        #[serde(with = "hhmm")]
        time: NaiveTime,
    }

    #[test]
    fn test_hhmm_accepts_seconds() {
        let slot: Slot = serde_json::from_str(r#"{"time":"14:30:00"}"#).unwrap();
        assert_eq!(slot.time, NaiveTime::from_hms_opt(14, 30, 0).unwrap());
        assert_eq!(serde_json::to_string(&slot).unwrap(), r#"{"time":"14:30"}"#);
    }

    #[test]
    fn test_hhmm_rejects_garbage() {
        assert!(serde_json::from_str::<Slot>(r#"{"time":"2pm"}"#).is_err());
    }
}
