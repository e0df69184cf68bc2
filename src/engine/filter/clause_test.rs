use super::clause::{FilterClause, Predicate, render_where};
use super::operator::CompareOp;
use crate::engine::geo::{GeometryOptions, parse_operand};
use crate::engine::types::ScalarValue;
use crate::test_helpers::factories::{RowFactory, TimestampFactory};
use serde_json::json;

fn compare(column: &str, op: CompareOp, value: impl Into<ScalarValue>) -> FilterClause {
    FilterClause::new(
        column,
        Predicate::Compare {
            op,
            value: value.into(),
        },
    )
}

#[test]
fn comparison_uses_native_ordering() {
    let row = RowFactory::new().with("depth", 12.5).create();

    assert!(compare("depth", CompareOp::Ge, 12.5).matches(&row));
    assert!(compare("depth", CompareOp::Gt, 12_i64).matches(&row));
    assert!(!compare("depth", CompareOp::Lt, 3.0).matches(&row));
}

#[test]
fn null_sentinel_tests_for_absence() {
    let empty = RowFactory::new().with("closed_on", ScalarValue::Null).create();
    let filled = RowFactory::new().with("closed_on", "2019-02-01").create();

    let is_null = compare("closed_on", CompareOp::Eq, ScalarValue::Null);
    let not_null = compare("closed_on", CompareOp::Ne, ScalarValue::Null);

    assert!(is_null.matches(&empty));
    assert!(!is_null.matches(&filled));
    assert!(not_null.matches(&filled));
    assert!(!not_null.matches(&empty));
}

#[test]
fn null_cell_never_matches_a_value_comparison() {
    let row = RowFactory::new().with("depth", ScalarValue::Null).create();
    assert!(!compare("depth", CompareOp::Ne, 1.0).matches(&row));
}

#[test]
fn membership_and_empty_membership() {
    let row = RowFactory::new().with("community_area", 32_i64).create();

    let hit = FilterClause::new(
        "community_area",
        Predicate::In {
            values: vec![ScalarValue::Int64(8), ScalarValue::Int64(32)],
        },
    );
    let none = FilterClause::new("community_area", Predicate::In { values: vec![] });

    assert!(hit.matches(&row));
    assert!(!none.matches(&row));
}

#[test]
fn hour_of_day_compares_the_hour_only() {
    let row = RowFactory::new()
        .with("datetime", TimestampFactory::naive(2016, 6, 1, 18, 45, 0))
        .create();

    let evening = FilterClause::new(
        "datetime",
        Predicate::HourOfDay {
            op: CompareOp::Ge,
            hour: 18,
        },
    );
    let morning = FilterClause::new(
        "datetime",
        Predicate::HourOfDay {
            op: CompareOp::Le,
            hour: 9,
        },
    );

    assert!(evening.matches(&row));
    assert!(!morning.matches(&row));
}

#[test]
fn within_tests_point_containment() {
    let square = parse_operand(
        r#"{"type":"Polygon","coordinates":[[[0,0],[10,0],[10,10],[0,10],[0,0]]]}"#,
        &GeometryOptions::default(),
    )
    .unwrap();
    let clause = FilterClause::new("location", Predicate::Within { geometry: square });

    let inside = RowFactory::new()
        .with("location", ScalarValue::Geometry(json!({"type": "Point", "coordinates": [5, 5]})))
        .create();
    let outside = RowFactory::new()
        .with("location", ScalarValue::Geometry(json!({"type": "Point", "coordinates": [15, 5]})))
        .create();

    assert!(clause.matches(&inside));
    assert!(!clause.matches(&outside));
}

#[test]
fn renders_parameterised_sql() {
    let clauses = vec![
        compare("obs_date", CompareOp::Ge, "2020-01-01"),
        FilterClause::new(
            "community_area",
            Predicate::In {
                values: vec![ScalarValue::Int64(8), ScalarValue::Int64(32)],
            },
        ),
        compare("closed_on", CompareOp::Eq, ScalarValue::Null),
        FilterClause::new(
            "datetime",
            Predicate::HourOfDay {
                op: CompareOp::Le,
                hour: 6,
            },
        ),
    ];

    let fragment = render_where(&clauses);

    assert_eq!(
        fragment.sql,
        "\"obs_date\" >= $1 AND \"community_area\" IN ($2, $3) AND \"closed_on\" IS NULL \
         AND date_part('hour', \"datetime\") <= $4"
    );
    assert_eq!(
        fragment.params,
        vec![
            ScalarValue::Utf8("2020-01-01".into()),
            ScalarValue::Int64(8),
            ScalarValue::Int64(32),
            ScalarValue::Int64(6),
        ]
    );
}

#[test]
fn within_renders_geojson_parameter() {
    let square = parse_operand(
        r#"{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]}"#,
        &GeometryOptions::default(),
    )
    .unwrap();
    let fragment = render_where(&[FilterClause::new(
        "geom",
        Predicate::Within { geometry: square },
    )]);

    assert_eq!(fragment.sql, "ST_Within(\"geom\", ST_GeomFromGeoJSON($1))");
    match &fragment.params[0] {
        ScalarValue::Utf8(text) => assert!(text.contains("EPSG:4326")),
        other => panic!("unexpected parameter {other:?}"),
    }
}

#[test]
fn empty_membership_and_no_clauses_render_constants() {
    assert_eq!(
        render_where(&[FilterClause::new("a", Predicate::In { values: vec![] })]).sql,
        "FALSE"
    );
    assert_eq!(render_where(&[]).sql, "TRUE");
}

#[test]
fn identifiers_are_quoted() {
    let fragment = render_where(&[compare("odd\"name", CompareOp::Eq, 1_i64)]);
    assert_eq!(fragment.sql, "\"odd\"\"name\" = $1");
}
