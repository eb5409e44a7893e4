//! Unit tests for coil types and formatting helpers

use chrono::{Duration, NaiveDate};

use super::*;

fn ts(date: (i32, u32, u32), time: (u32, u32, u32), micro: u32) -> chrono::NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_micro_opt(time.0, time.1, time.2, micro)
        .unwrap()
}

#[test]
fn test_timestamp_round_trip() {
    let original = ts((2023, 3, 14), (15, 9, 26), 535_897);
    let formatted = format_timestamp(original);
    assert_eq!(formatted, "2023-03-14 15:09:26.535897");
    assert_eq!(parse_timestamp(&formatted).unwrap(), original);
}

#[test]
fn test_timestamp_format_is_fixed_width() {
    // Whole seconds still carry the full fractional part, so string
    // comparison in SQL matches chronological order
    let whole = format_timestamp(ts((2023, 1, 1), (0, 0, 0), 0));
    assert_eq!(whole, "2023-01-01 00:00:00.000000");

    let fractional = format_timestamp(ts((2023, 1, 1), (0, 0, 0), 42));
    assert_eq!(fractional, "2023-01-01 00:00:00.000042");
    assert!(whole < fractional);
}

#[test]
fn test_parse_timestamp_rejects_garbage() {
    assert!(parse_timestamp("not a timestamp").is_err());
    assert!(parse_timestamp("2023-01-01").is_err());
}

#[test]
fn test_format_duration_plain_seconds() {
    assert_eq!(format_duration(Duration::zero()), "00:00:00");
    assert_eq!(format_duration(Duration::minutes(30)), "00:30:00");
    assert_eq!(
        format_duration(Duration::hours(2) + Duration::minutes(3) + Duration::seconds(4)),
        "02:03:04"
    );
}

#[test]
fn test_format_duration_with_days() {
    assert_eq!(format_duration(Duration::days(1)), "1d 00:00:00");
    assert_eq!(
        format_duration(Duration::days(3) + Duration::hours(4) + Duration::seconds(5)),
        "3d 04:00:05"
    );
}

#[test]
fn test_format_duration_with_micros() {
    assert_eq!(
        format_duration(Duration::microseconds(1_500_000)),
        "00:00:01.500000"
    );
    assert_eq!(format_duration(Duration::microseconds(7)), "00:00:00.000007");
}

#[test]
fn test_format_duration_negative() {
    assert_eq!(format_duration(-Duration::minutes(30)), "-00:30:00");
    assert_eq!(
        format_duration(-(Duration::days(1) + Duration::microseconds(250_000))),
        "-1d 00:00:00.250000"
    );
}

#[test]
fn test_coil_serialization() {
    let coil = Coil {
        id: 7,
        length: 10,
        weight: 100,
        created_at: ts((2023, 1, 1), (10, 0, 0), 0),
        deleted_at: None,
    };

    let json = serde_json::to_value(&coil).unwrap();
    assert_eq!(json["id"], 7);
    assert_eq!(json["length"], 10);
    assert_eq!(json["weight"], 100);
    assert_eq!(json["created_at"], "2023-01-01T10:00:00");
    assert!(json["deleted_at"].is_null());
}
