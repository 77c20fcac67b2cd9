//! Invalid input never yields a value, and fails with the right kind.

use ferrum_primitives::{
    Boolean, Date, DateTime, DayOfMonthPolicy, Decimal, ErrorKind, FhirPrimitive, Instant,
    Integer, ParseConfig, PositiveInteger, Time, UnsignedInteger, XsDate, XsDateTime, XsTime,
    XsTimeZone,
};
use serde_json::{json, Value};

fn kind_of<P: FhirPrimitive + std::fmt::Debug>(token: Value) -> ErrorKind {
    P::decode(&token)
        .map(|value| panic!("{} accepted {}: {:?}", P::TYPE_NAME, token, value))
        .unwrap_err()
        .kind()
}

#[test]
fn malformed_date_text() {
    for text in ["999", "-999", "10000", "-1", "", "2017-1", "2017-011", "2017/11", "2017-11-1", "x2017", "2017-"] {
        assert_eq!(kind_of::<Date>(json!(text)), ErrorKind::Malformed, "{text}");
    }
}

#[test]
fn out_of_range_date_components() {
    for text in ["2017-13", "2017-00", "2017-11-00", "2017-11-32"] {
        assert_eq!(kind_of::<Date>(json!(text)), ErrorKind::OutOfRange, "{text}");
    }
    assert_eq!(
        kind_of::<DateTime>(json!("2017-11-00T01:12:31Z")),
        ErrorKind::OutOfRange
    );
    assert_eq!(XsDate::year_only(10000).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(XsDate::year_only(-10000).unwrap_err().kind(), ErrorKind::OutOfRange);
}

#[test]
fn day_without_month_is_inconsistent() {
    assert_eq!(
        XsDate::new(2021, None, Some(12)).unwrap_err().kind(),
        ErrorKind::Inconsistent
    );
}

#[test]
fn calendar_policy_rejects_impossible_days() {
    let config = ParseConfig::default().with_day_of_month(DayOfMonthPolicy::Calendar);
    assert!(XsDate::parse("2021-02-30").is_ok());
    for text in ["2021-02-30", "2021-02-29", "2021-04-31"] {
        assert_eq!(
            XsDate::parse_with(text, &config).unwrap_err().kind(),
            ErrorKind::OutOfRange,
            "{text}"
        );
    }
    assert!(XsDate::parse_with("2020-02-29", &config).is_ok());
}

#[test]
fn malformed_and_out_of_range_times() {
    for text in ["1:00", "12:0", "12-00", "12:00:", "12:00:5", "12:00:00.", "12:00:00,5", "T12:00"] {
        assert_eq!(kind_of::<Time>(json!(text)), ErrorKind::Malformed, "{text}");
    }
    for text in ["24:00", "12:60", "12:00:60"] {
        assert_eq!(kind_of::<Time>(json!(text)), ErrorKind::OutOfRange, "{text}");
    }
    assert_eq!(
        XsTime::new(12, 0, None, Some(5), None).unwrap_err().kind(),
        ErrorKind::Inconsistent
    );
    assert_eq!(
        XsTime::new(12, 0, Some(0), None, Some(2)).unwrap_err().kind(),
        ErrorKind::Inconsistent
    );
}

#[test]
fn require_seconds_rejects_short_times() {
    let config = ParseConfig {
        require_seconds: true,
        ..ParseConfig::default()
    };
    assert_eq!(
        XsTime::parse_with("12:00", &config).unwrap_err().kind(),
        ErrorKind::Malformed
    );
    assert!(XsTime::parse_with("12:00:00", &config).is_ok());
}

#[test]
fn timezone_rules() {
    for text in ["z", "+1:00", "+01", "01:00", "+01:00:00", "GMT"] {
        assert_eq!(XsTimeZone::parse(text).unwrap_err().kind(), ErrorKind::Malformed, "{text}");
    }
    assert_eq!(XsTimeZone::parse("+24:00").unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(XsTimeZone::parse("-01:60").unwrap_err().kind(), ErrorKind::OutOfRange);
    for (hour, minute, positive) in [(1, 0, true), (0, 30, true), (0, 0, false)] {
        assert_eq!(
            XsTimeZone::new(hour, minute, positive, true).unwrap_err().kind(),
            ErrorKind::Inconsistent
        );
    }
}

#[test]
fn time_and_timezone_come_together() {
    let date = XsDate::ymd(2021, 1, 12).unwrap();
    let time = XsTime::hms(12, 0, 0).unwrap();
    assert_eq!(
        XsDateTime::new(date, Some(time), None).unwrap_err().kind(),
        ErrorKind::Inconsistent
    );
    assert_eq!(
        XsDateTime::new(date, None, Some(XsTimeZone::UTC)).unwrap_err().kind(),
        ErrorKind::Inconsistent
    );
    assert!(XsDateTime::new(date, Some(time), Some(XsTimeZone::UTC)).is_ok());
    assert!(XsDateTime::new(date, None, None).is_ok());
    assert!(XsDateTime::new(
        XsDate::year_only(2021).unwrap(),
        Some(time),
        Some(XsTimeZone::UTC)
    )
    .is_ok());

    for text in ["2021-01-12T12:00:00", "2021-01-12Z", "2021-01T12:00:00"] {
        assert_eq!(kind_of::<DateTime>(json!(text)), ErrorKind::Inconsistent, "{text}");
    }
    assert_eq!(
        kind_of::<DateTime>(json!("2021-01-12 12:00:00Z")),
        ErrorKind::Malformed
    );
}

#[test]
fn bounded_integers() {
    assert!(PositiveInteger::new(1).is_ok());
    assert_eq!(PositiveInteger::new(0).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert_eq!(UnsignedInteger::new(-1).unwrap_err().kind(), ErrorKind::OutOfRange);
    assert!(UnsignedInteger::new(0).is_ok());

    assert_eq!(kind_of::<PositiveInteger>(json!(0)), ErrorKind::OutOfRange);
    assert_eq!(kind_of::<PositiveInteger>(json!(-5)), ErrorKind::OutOfRange);
    assert_eq!(kind_of::<UnsignedInteger>(json!(-1)), ErrorKind::OutOfRange);
    assert_eq!(kind_of::<Integer>(json!(2_147_483_648i64)), ErrorKind::OutOfRange);
    assert_eq!(kind_of::<UnsignedInteger>(json!(2_147_483_648i64)), ErrorKind::OutOfRange);
    assert_eq!(kind_of::<Integer>(json!("1")), ErrorKind::Malformed);
    assert_eq!(kind_of::<Integer>(json!(1.5)), ErrorKind::Malformed);
}

#[test]
fn booleans_and_decimals_need_native_tokens() {
    assert_eq!(kind_of::<Boolean>(json!("true")), ErrorKind::Malformed);
    assert_eq!(kind_of::<Boolean>(json!(1)), ErrorKind::Malformed);
    assert_eq!(kind_of::<Decimal>(json!("0.9")), ErrorKind::Malformed);
    assert_eq!(kind_of::<Decimal>(json!(null)), ErrorKind::Malformed);
}

#[test]
fn instant_needs_full_precision() {
    for text in ["2021-01-12", "2021-01-12T12:00Z"] {
        assert_eq!(kind_of::<Instant>(json!(text)), ErrorKind::Malformed, "{text}");
    }
}

#[test]
fn malformed_primitive_fails_the_enclosing_record() {
    #[derive(Debug, serde::Deserialize)]
    #[serde(rename_all = "camelCase")]
    #[allow(dead_code)]
    struct Observation {
        effective_date_time: DateTime,
    }

    let err = serde_json::from_value::<Observation>(json!({ "effectiveDateTime": "2021-13" }))
        .unwrap_err();
    assert!(err.to_string().contains("month"), "{err}");
}
