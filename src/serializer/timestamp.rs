//! Conversions between naive date-times and Unix epoch seconds.

use crate::value::Value;
use chrono::{
    DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone,
    Utc,
};
use serde::{Deserialize, Serialize};

/// Time zone naive date-times are read in when converted to or from epoch
/// seconds. Encoder and decoder must agree on it or values shift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeZonePolicy {
    /// The host's local time zone
    #[default]
    Local,
    Utc,
}

impl TimeZonePolicy {
    /// Whole epoch seconds for `dt`; sub-second precision is dropped.
    ///
    /// A local time skipped by a daylight-saving transition is read with the
    /// offset in effect before the transition, and an ambiguous local time
    /// resolves to its earlier instant.
    pub fn to_epoch_seconds(self, dt: &NaiveDateTime) -> Option<i64> {
        match self {
            TimeZonePolicy::Local => local_epoch_seconds(&Local, dt),
            TimeZonePolicy::Utc => Some(dt.and_utc().timestamp()),
        }
    }

    /// Epoch seconds of midnight at the start of `date`
    pub fn date_to_epoch_seconds(self, date: &NaiveDate) -> Option<i64> {
        self.to_epoch_seconds(&date.and_time(NaiveTime::MIN))
    }

    /// Naive date-time for whole epoch seconds
    pub fn from_epoch_seconds(self, secs: i64) -> Option<NaiveDateTime> {
        DateTime::<Utc>::from_timestamp(secs, 0).map(|utc| self.localize(utc))
    }

    /// Naive date-time for fractional epoch seconds, kept to microseconds
    pub fn from_epoch_seconds_f64(self, secs: f64) -> Option<NaiveDateTime> {
        if !secs.is_finite() {
            return None;
        }
        let micros = (secs * 1_000_000.0).round();
        if micros.abs() >= i64::MAX as f64 {
            return None;
        }
        DateTime::<Utc>::from_timestamp_micros(micros as i64).map(|utc| self.localize(utc))
    }

    /// Read a numeric value as epoch seconds; other values yield `None`
    pub fn value_to_datetime(self, value: &Value) -> Option<NaiveDateTime> {
        match value {
            Value::Integer(secs) => self.from_epoch_seconds(*secs),
            other => other
                .as_f64()
                .and_then(|secs| self.from_epoch_seconds_f64(secs)),
        }
    }

    fn localize(self, utc: DateTime<Utc>) -> NaiveDateTime {
        match self {
            TimeZonePolicy::Local => utc.with_timezone(&Local).naive_local(),
            TimeZonePolicy::Utc => utc.naive_utc(),
        }
    }
}

/// Epoch seconds of a naive time read in `tz`
fn local_epoch_seconds<Tz: TimeZone>(tz: &Tz, dt: &NaiveDateTime) -> Option<i64> {
    match tz.from_local_datetime(dt) {
        LocalResult::Single(local) => Some(local.timestamp()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.timestamp()),
        LocalResult::None => {
            let before = dt.checked_sub_signed(Duration::days(1))?;
            let offset = tz.from_local_datetime(&before).earliest()?.offset().fix();
            Some(dt.and_utc().timestamp() - i64::from(offset.local_minus_utc()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    /// UTC-5 until 2024-03-10T07:00:00Z, UTC-4 afterwards
    #[derive(Debug, Clone, Copy)]
    struct SpringForward;

    const TRANSITION: i64 = 1_710_054_000;

    fn standard() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn daylight() -> FixedOffset {
        FixedOffset::west_opt(4 * 3600).unwrap()
    }

    impl TimeZone for SpringForward {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            SpringForward
        }

        fn offset_from_local_date(&self, _: &NaiveDate) -> LocalResult<FixedOffset> {
            LocalResult::Single(standard())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let wall = local.and_utc().timestamp();
            let as_standard = wall + 5 * 3600;
            let as_daylight = wall + 4 * 3600;
            match (as_standard < TRANSITION, as_daylight >= TRANSITION) {
                (true, false) => LocalResult::Single(standard()),
                (false, true) => LocalResult::Single(daylight()),
                (true, true) => LocalResult::Ambiguous(standard(), daylight()),
                (false, false) => LocalResult::None,
            }
        }

        fn offset_from_utc_date(&self, _: &NaiveDate) -> FixedOffset {
            standard()
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            if utc.and_utc().timestamp() < TRANSITION {
                standard()
            } else {
                daylight()
            }
        }
    }

    #[test]
    fn test_skipped_local_time_uses_offset_before_transition() {
        let skipped = datetime(2024, 3, 10, 2, 30, 0);
        assert_eq!(
            local_epoch_seconds(&SpringForward, &skipped),
            Some(1_710_055_800)
        );
    }

    #[test]
    fn test_local_times_around_transition() {
        let before = datetime(2024, 3, 10, 1, 30, 0);
        assert_eq!(
            local_epoch_seconds(&SpringForward, &before),
            Some(1_710_052_200)
        );

        let after = datetime(2024, 3, 10, 3, 30, 0);
        assert_eq!(
            local_epoch_seconds(&SpringForward, &after),
            Some(1_710_055_800)
        );
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn test_utc_conversion() {
        let dt = datetime(2023, 11, 14, 22, 13, 20);
        assert_eq!(TimeZonePolicy::Utc.to_epoch_seconds(&dt), Some(1_700_000_000));
        assert_eq!(
            TimeZonePolicy::Utc.from_epoch_seconds(1_700_000_000),
            Some(dt)
        );
    }

    #[test]
    fn test_subsecond_precision_dropped() {
        let dt = datetime(2023, 11, 14, 22, 13, 20) + chrono::Duration::milliseconds(750);
        assert_eq!(TimeZonePolicy::Utc.to_epoch_seconds(&dt), Some(1_700_000_000));
    }

    #[test]
    fn test_fractional_seconds_decode() {
        let dt = TimeZonePolicy::Utc
            .from_epoch_seconds_f64(1_700_000_000.5)
            .unwrap();
        assert_eq!(
            dt,
            datetime(2023, 11, 14, 22, 13, 20) + chrono::Duration::milliseconds(500)
        );
        assert_eq!(TimeZonePolicy::Utc.from_epoch_seconds_f64(f64::NAN), None);
        assert_eq!(TimeZonePolicy::Utc.from_epoch_seconds_f64(1e300), None);
    }

    #[test]
    fn test_date_is_midnight() {
        let date = NaiveDate::from_ymd_opt(1970, 1, 2).unwrap();
        assert_eq!(TimeZonePolicy::Utc.date_to_epoch_seconds(&date), Some(86_400));
    }

    #[test]
    fn test_local_round_trip() {
        let dt = datetime(2024, 7, 15, 12, 30, 45);
        let secs = TimeZonePolicy::Local.to_epoch_seconds(&dt).unwrap();
        assert_eq!(TimeZonePolicy::Local.from_epoch_seconds(secs), Some(dt));
    }

    #[test]
    fn test_value_to_datetime() {
        let zone = TimeZonePolicy::Utc;
        assert_eq!(
            zone.value_to_datetime(&Value::Integer(0)),
            Some(datetime(1970, 1, 1, 0, 0, 0))
        );
        assert_eq!(
            zone.value_to_datetime(&Value::Float(60.0)),
            Some(datetime(1970, 1, 1, 0, 1, 0))
        );
        assert_eq!(zone.value_to_datetime(&Value::from("60")), None);
        assert_eq!(zone.value_to_datetime(&Value::Integer(i64::MAX)), None);
    }

    #[test]
    fn test_policy_serde_form() {
        assert_eq!(
            serde_json::to_string(&TimeZonePolicy::Utc).unwrap(),
            "\"utc\""
        );
        assert_eq!(
            serde_json::from_str::<TimeZonePolicy>("\"local\"").unwrap(),
            TimeZonePolicy::Local
        );
    }
}
