use indoc::indoc;
use opendata_query::engine::filter::{
    FilterError, Predicate, QueryParams, RecordQuery, TranslatorOptions, translate,
};
use opendata_query::engine::geo::Geometry;
use opendata_query::engine::schema::{
    CachedSchemaProvider, ColumnDescriptor, ColumnType, SchemaProvider, TableDescriptor,
};
use opendata_query::engine::storage::{MemoryStore, QueryExecutor};
use opendata_query::engine::types::{Row, ScalarValue};
use serde_json::json;
use std::sync::Arc;

fn crimes_store() -> Arc<MemoryStore> {
    let store = MemoryStore::new();
    store.create_table(TableDescriptor::new(
        "crimes",
        vec![
            ColumnDescriptor::new("id", ColumnType::Integer),
            ColumnDescriptor::new("primary_type", ColumnType::Text),
            ColumnDescriptor::new("date", ColumnType::Timestamp),
            ColumnDescriptor::new("location", ColumnType::Geometry),
        ],
    ));

    let rows = [
        (1, "THEFT", "2017-03-01T09:15:00", [-87.6270, 41.8830]),
        (2, "BATTERY", "2017-03-01T22:40:00", [-87.6275, 41.8850]),
        (3, "THEFT", "2017-03-02T23:05:00", [-87.7000, 41.9500]),
        (4, "THEFT", "2017-03-03T21:30:00", [-87.6279, 41.8800]),
    ];
    for (id, kind, date, point) in rows {
        let mut row = Row::new();
        row.insert("id".into(), ScalarValue::Int64(id));
        row.insert("primary_type".into(), ScalarValue::Utf8(kind.into()));
        row.insert(
            "date".into(),
            ScalarValue::Timestamp(
                chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S").unwrap(),
            ),
        );
        row.insert(
            "location".into(),
            ScalarValue::Geometry(json!({"type": "Point", "coordinates": point})),
        );
        store.insert("crimes", row).unwrap();
    }
    Arc::new(store)
}

fn ids(rows: &[Row]) -> Vec<i64> {
    rows.iter()
        .filter_map(|r| match r.get("id") {
            Some(ScalarValue::Int64(id)) => Some(*id),
            _ => None,
        })
        .collect()
}

#[test]
fn evening_thefts_along_a_street() {
    let store = crimes_store();
    let schema = CachedSchemaProvider::new(store.clone());
    let table = schema.describe("crimes").unwrap();

    let street = indoc! {r#"
        {"type": "Feature",
         "geometry": {"type": "LineString",
                      "coordinates": [[-87.6277, 41.8781], [-87.6277, 41.8881]]}}
    "#};
    let params: QueryParams = [
        ("primary_type", "THEFT"),
        ("date__time_of_day_ge", "20"),
        ("location__within", street),
        ("order_by", "date:asc"),
    ]
    .into_iter()
    .collect();

    let query = RecordQuery::from_params(&table, &params, &TranslatorOptions::default()).unwrap();
    let rows = store.execute_filter(&query).unwrap();

    assert_eq!(ids(&rows), vec![4]);
}

#[test]
fn buffered_street_is_a_polygon_predicate() {
    let store = crimes_store();
    let table = store.describe("crimes").unwrap();
    let params = QueryParams::new().with(
        "location__within",
        r#"{"type":"LineString","coordinates":[[-87.63,41.88],[-87.62,41.88]]}"#,
    );

    let clauses = translate(&table, &params, &TranslatorOptions::default())
        .into_clauses()
        .unwrap();

    match &clauses[0].predicate {
        Predicate::Within { geometry } => {
            assert!(matches!(geometry.shape, Geometry::Polygon(_)));
            assert_eq!(
                geometry.geojson["crs"]["properties"]["name"],
                json!("EPSG:4326")
            );
        }
        other => panic!("unexpected predicate {other:?}"),
    }
}

#[test]
fn every_bad_parameter_is_reported() {
    let store = crimes_store();
    let table = store.describe("crimes").unwrap();
    let params = QueryParams::new()
        .with("id__between", "1,2")
        .with("bogus_field", "5")
        .with("date__ge", "soon")
        .with("limit", "0");

    let report = RecordQuery::from_params(&table, &params, &TranslatorOptions::default())
        .unwrap_err();

    assert_eq!(report.len(), 4);
    assert!(
        report
            .errors()
            .iter()
            .any(|e| e.error == FilterError::InvalidField("bogus_field".into()))
    );
    assert_eq!(
        report.headline().as_deref(),
        Some("'bogus_field' is not a valid field name")
    );
}

#[test]
fn membership_and_paging() {
    let store = crimes_store();
    let table = store.describe("crimes").unwrap();
    let params = QueryParams::new()
        .with("id__in", "1,2,3,4")
        .with("order_by", "id:desc")
        .with("limit", "2")
        .with("offset", "1");

    let query = RecordQuery::from_params(&table, &params, &TranslatorOptions::default()).unwrap();

    assert_eq!(ids(&store.execute_filter(&query).unwrap()), vec![3, 2]);
}
