mod common;

use common::{raw_zillow_table, RAW_ROWS};
use zillow_prep::column::ColumnType;
use zillow_prep::config::PrepareConfig;
use zillow_prep::error::Error;
use zillow_prep::zillow::{self, columns, null_report, ColumnPruner, UNKNOWN_COUNTY};

#[test]
fn test_wrangled_rows_satisfy_every_bound() {
    let prepared = zillow::wrangle(&raw_zillow_table(RAW_ROWS, 1), &PrepareConfig::default()).unwrap();
    assert!(prepared.row_count() > 0);
    assert!(prepared.row_count() < RAW_ROWS);

    let bedrooms = prepared.numeric_values(columns::BEDROOMS).unwrap();
    let bathrooms = prepared.numeric_values(columns::BATHROOMS).unwrap();
    let area = prepared.numeric_values(columns::FINISHED_AREA).unwrap();
    let lot = prepared.numeric_values(columns::LOT_SIZE).unwrap();

    for row in 0..prepared.row_count() {
        assert!(bedrooms[row] > 0.0 && bedrooms[row] < 7.0);
        assert!(bathrooms[row] > 0.0 && bathrooms[row] < 7.0);
        assert!(area[row] > 149.0 && area[row] <= 6000.0);
        assert!(lot[row] < 217_800.2);
    }
}

#[test]
fn test_wrangled_schema() {
    let prepared = zillow::wrangle(&raw_zillow_table(RAW_ROWS, 2), &PrepareConfig::default()).unwrap();

    assert_eq!(prepared.column_count(), 10);
    assert!(!prepared.has_column(columns::FIPS));
    for name in [
        columns::BEDROOMS,
        columns::FINISHED_AREA,
        columns::YEAR_BUILT,
        columns::TAX_VALUE,
    ] {
        assert_eq!(prepared.column_type(name).unwrap(), ColumnType::UInt64);
    }

    // only recognized codes survive the null drop, so no sentinel appears
    let counties = prepared.string_values(columns::COUNTY).unwrap();
    assert!(counties
        .iter()
        .all(|c| matches!(c.as_deref(), Some("Los Angeles" | "Orange" | "Ventura"))));
    assert!(!counties.iter().any(|c| c.as_deref() == Some(UNKNOWN_COUNTY)));

    let latitude = prepared.numeric_values(columns::LATITUDE).unwrap();
    assert!(latitude.iter().all(|&lat| (33.4..34.6).contains(&lat)));
}

#[test]
fn test_wrangle_is_deterministic() {
    let raw = raw_zillow_table(RAW_ROWS, 3);
    let a = zillow::wrangle(&raw, &PrepareConfig::default()).unwrap();
    let b = zillow::wrangle(&raw, &PrepareConfig::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_missing_drop_column_stops_the_run() {
    let mut raw = raw_zillow_table(50, 4);
    raw.drop_column("garagecarcnt").unwrap();

    let result = zillow::wrangle(&raw, &PrepareConfig::default());
    assert!(matches!(result, Err(Error::ColumnNotFound(name)) if name == "garagecarcnt"));
}

#[test]
fn test_pruner_guards_target() {
    let raw = raw_zillow_table(20, 5);
    let pruner = ColumnPruner::new(vec![columns::TAX_VALUE.to_string()]);
    assert!(matches!(
        pruner.prune(&raw),
        Err(Error::ProtectedColumn { .. })
    ));
}

#[test]
fn test_prepare_adds_features() {
    let prepared = zillow::prepare(&raw_zillow_table(RAW_ROWS, 6), &PrepareConfig::default()).unwrap();

    let ratio = prepared.numeric_values(columns::BED_BATH_RATIO).unwrap();
    let rooms = prepared.numeric_values(columns::MIN_ROOMS).unwrap();
    let bedrooms = prepared.numeric_values(columns::BEDROOMS).unwrap();
    let bathrooms = prepared.numeric_values(columns::BATHROOMS).unwrap();
    for row in 0..prepared.row_count() {
        assert!((ratio[row] - bedrooms[row] / bathrooms[row]).abs() < 1e-12);
        assert_eq!(rooms[row], bedrooms[row] + bathrooms[row]);
    }

    let luxury = prepared.numeric_values(columns::LUXURY_HOUSE).unwrap();
    let share = luxury.iter().sum::<f64>() / luxury.len() as f64;
    assert!(share > 0.2 && share < 0.3, "luxury share {}", share);
}

#[test]
fn test_null_report_on_raw_extract() {
    let raw = raw_zillow_table(74, 7);

    let report = null_report(&raw, 1.0).unwrap();
    assert_eq!(report.len(), raw.column_count());

    let fips = report.iter().find(|r| r.column_name == "fips").unwrap();
    // rows 37 and 74
    assert_eq!(fips.count_null, 2);
    assert_eq!(fips.percent_null, 0.027);

    let mostly_present = null_report(&raw, 0.5).unwrap();
    assert!(mostly_present.iter().all(|r| r.percent_null <= 0.5));
    assert!(mostly_present.iter().any(|r| r.column_name == "parcelid"));
    assert!(!mostly_present.iter().any(|r| r.column_name == "basementsqft"));
}
