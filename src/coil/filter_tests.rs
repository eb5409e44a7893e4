//! Unit tests for the range-filter builder

use chrono::{NaiveDate, NaiveTime};
use proptest::prelude::*;

use super::filter::*;

fn q() -> RangeQuery {
    RangeQuery::default()
}

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

#[test]
fn test_empty_query_is_rejected() {
    assert_eq!(build_filter(&q()), Err(FilterError::Empty));
}

#[test]
fn test_lone_lower_bound_is_rejected_for_every_pair() {
    let cases: [(RangeQuery, &str); 5] = [
        (RangeQuery { from_id: s("1"), ..q() }, "id"),
        (RangeQuery { from_weight: s("1"), ..q() }, "weight"),
        (RangeQuery { from_length: s("1"), ..q() }, "length"),
        (RangeQuery { from_created_at: s("2023-01-01"), ..q() }, "created_at"),
        (RangeQuery { from_deleted_at: s("2023-01-01"), ..q() }, "deleted_at"),
    ];

    for (query, column) in cases {
        assert_eq!(build_filter(&query), Err(FilterError::UnpairedBound(column)));
    }
}

#[test]
fn test_lone_upper_bound_is_rejected_for_every_pair() {
    let cases: [(RangeQuery, &str); 5] = [
        (RangeQuery { to_id: s("1"), ..q() }, "id"),
        (RangeQuery { to_weight: s("1"), ..q() }, "weight"),
        (RangeQuery { to_length: s("1"), ..q() }, "length"),
        (RangeQuery { to_created_at: s("2023-01-01"), ..q() }, "created_at"),
        (RangeQuery { to_deleted_at: s("2023-01-01"), ..q() }, "deleted_at"),
    ];

    for (query, column) in cases {
        assert_eq!(build_filter(&query), Err(FilterError::UnpairedBound(column)));
    }
}

#[test]
fn test_lone_bound_reported_even_with_complete_pair_present() {
    let query = RangeQuery {
        from_id: s("1"),
        to_id: s("5"),
        from_weight: s("10"),
        ..q()
    };
    assert_eq!(build_filter(&query), Err(FilterError::UnpairedBound("weight")));
}

#[test]
fn test_inverted_integer_bounds() {
    let query = RangeQuery {
        from_id: s("5"),
        to_id: s("1"),
        ..q()
    };
    assert_eq!(build_filter(&query), Err(FilterError::InvertedBounds("id")));
}

#[test]
fn test_inverted_date_bounds() {
    let query = RangeQuery {
        from_created_at: s("2024-01-01"),
        to_created_at: s("2023-01-01"),
        ..q()
    };
    assert_eq!(
        build_filter(&query),
        Err(FilterError::InvertedBounds("created_at"))
    );
}

#[test]
fn test_equal_bounds_are_valid() {
    let query = RangeQuery {
        from_length: s("5"),
        to_length: s("5"),
        ..q()
    };
    let bounds = build_filter(&query).unwrap();
    assert_eq!(bounds.len(), 1);
    assert_eq!(bounds[0].column, "length");
    assert_eq!(bounds[0].lower, BoundValue::Int(5));
    assert_eq!(bounds[0].upper, BoundValue::Int(5));
}

#[test]
fn test_equal_dates_widen_to_a_full_day() {
    // Same calendar date on both sides stays valid because the roles
    // widen it to [start of day, end of day]
    let query = RangeQuery {
        from_created_at: s("2023-01-05"),
        to_created_at: s("2023-01-05"),
        ..q()
    };
    let bounds = build_filter(&query).unwrap();

    let day = NaiveDate::from_ymd_opt(2023, 1, 5).unwrap();
    assert_eq!(
        bounds[0].lower,
        BoundValue::Timestamp(day.and_time(NaiveTime::MIN))
    );
    assert_eq!(
        bounds[0].upper,
        BoundValue::Timestamp(day.and_hms_micro_opt(23, 59, 59, 999_999).unwrap())
    );
}

#[test]
fn test_date_widening_uses_each_values_own_role() {
    // A full timestamp on one side does not change how the bare date on
    // the other side is widened
    let query = RangeQuery {
        from_deleted_at: s("2023-01-05T08:30:00"),
        to_deleted_at: s("2023-01-06"),
        ..q()
    };
    let bounds = build_filter(&query).unwrap();

    assert_eq!(
        bounds[0].lower,
        BoundValue::Timestamp(
            NaiveDate::from_ymd_opt(2023, 1, 5)
                .unwrap()
                .and_hms_opt(8, 30, 0)
                .unwrap()
        )
    );
    assert_eq!(
        bounds[0].upper,
        BoundValue::Timestamp(
            NaiveDate::from_ymd_opt(2023, 1, 6)
                .unwrap()
                .and_hms_micro_opt(23, 59, 59, 999_999)
                .unwrap()
        )
    );
}

#[test]
fn test_space_separated_timestamps_accepted() {
    let query = RangeQuery {
        from_created_at: s("2023-01-05 08:30:00"),
        to_created_at: s("2023-01-05 09:00:00.500000"),
        ..q()
    };
    assert!(build_filter(&query).is_ok());
}

#[test]
fn test_invalid_values() {
    let query = RangeQuery {
        from_id: s("abc"),
        to_id: s("5"),
        ..q()
    };
    assert_eq!(
        build_filter(&query),
        Err(FilterError::InvalidValue("id", "abc".to_string()))
    );

    let query = RangeQuery {
        from_created_at: s("not-a-date"),
        to_created_at: s("2023-01-01"),
        ..q()
    };
    assert_eq!(
        build_filter(&query),
        Err(FilterError::InvalidValue("created_at", "not-a-date".to_string()))
    );
}

#[test]
fn test_absent_pairs_contribute_nothing() {
    let query = RangeQuery {
        from_id: s("1"),
        to_id: s("10"),
        from_weight: s("50"),
        to_weight: s("100"),
        ..q()
    };
    let bounds = build_filter(&query).unwrap();

    let columns: Vec<&str> = bounds.iter().map(|b| b.column).collect();
    assert_eq!(columns, vec!["id", "weight"]);
}

#[test]
fn test_all_five_pairs_together() {
    let query = RangeQuery {
        from_id: s("1"),
        to_id: s("10"),
        from_weight: s("50"),
        to_weight: s("100"),
        from_length: s("5"),
        to_length: s("5"),
        from_created_at: s("2023-01-01"),
        to_created_at: s("2023-12-31"),
        from_deleted_at: s("2023-06-01"),
        to_deleted_at: s("2023-06-30"),
    };
    let bounds = build_filter(&query).unwrap();
    assert_eq!(bounds.len(), 5);
}

proptest! {
    #[test]
    fn prop_ordered_integer_pair_always_builds(a in i64::MIN..i64::MAX, b in i64::MIN..i64::MAX) {
        let (lower, upper) = if a <= b { (a, b) } else { (b, a) };
        let query = RangeQuery {
            from_id: Some(lower.to_string()),
            to_id: Some(upper.to_string()),
            ..RangeQuery::default()
        };

        let bounds = build_filter(&query).unwrap();
        prop_assert_eq!(bounds.len(), 1);
        prop_assert_eq!(bounds[0].lower, BoundValue::Int(lower));
        prop_assert_eq!(bounds[0].upper, BoundValue::Int(upper));
    }

    #[test]
    fn prop_inverted_integer_pair_always_fails(a in i64::MIN..i64::MAX, b in i64::MIN..i64::MAX) {
        prop_assume!(a != b);
        let (lower, upper) = if a < b { (a, b) } else { (b, a) };
        let query = RangeQuery {
            from_id: Some(upper.to_string()),
            to_id: Some(lower.to_string()),
            ..RangeQuery::default()
        };

        prop_assert_eq!(build_filter(&query), Err(FilterError::InvertedBounds("id")));
    }
}
