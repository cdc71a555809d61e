mod common;

use common::{raw_zillow_table, scratch_dir, write_raw_csv};
use zillow_prep::column::{ColumnType, Float64Column};
use zillow_prep::config::{PipelineConfig, SourceConfig};
use zillow_prep::explore::AssociationEngine;
use zillow_prep::io::{
    execute_sql, read_csv, write_csv, write_json, CachedSource, CsvSource, DataSource,
};
use zillow_prep::ml::{MinMaxScaler, OneHotEncoder, ScalerBinding, Splitter, Transformer};
use zillow_prep::zillow::{self, columns, null_report, CountyMapper, UNKNOWN_COUNTY};
use zillow_prep::RecordTable;

#[test]
fn test_raw_extract_survives_csv() {
    let dir = scratch_dir();
    let path = write_raw_csv(&dir, 60, 40);
    let read = read_csv(&path).unwrap();
    let original = raw_zillow_table(60, 40);

    assert_eq!(read.column_names(), original.column_names());
    assert_eq!(read.row_count(), 60);
    assert_eq!(
        read.numeric_values(columns::TAX_VALUE).unwrap(),
        original.numeric_values(columns::TAX_VALUE).unwrap()
    );
    assert_eq!(read.column(columns::FIPS).unwrap().null_count(), 1);
    assert_eq!(read.column_type("basementsqft").unwrap(), ColumnType::Float64);
}

#[test]
fn test_prepared_table_survives_csv() {
    let dir = scratch_dir();
    let prepared = zillow::prepare(&raw_zillow_table(200, 41), &Default::default()).unwrap();
    let path = dir.path().join("prepared.csv");
    write_csv(&prepared, &path).unwrap();

    let read = read_csv(&path).unwrap();
    assert_eq!(read.row_count(), prepared.row_count());
    assert_eq!(read.column_type(columns::COUNTY).unwrap(), ColumnType::String);
    assert_eq!(
        read.column_type(columns::LUXURY_HOUSE).unwrap(),
        ColumnType::Boolean
    );
    assert_eq!(
        read.string_values(columns::COUNTY).unwrap(),
        prepared.string_values(columns::COUNTY).unwrap()
    );
}

#[test]
fn test_unknown_county_survives_csv() {
    let mut table = RecordTable::new();
    table
        .add_column(
            columns::FIPS,
            Float64Column::new(vec![6037.0, 9999.0, 6059.0, 6111.0, 9999.0, 6037.0]),
        )
        .unwrap();
    table
        .add_column(
            columns::FINISHED_AREA,
            Float64Column::new(vec![1200.0, 1500.0, 1800.0, 2100.0, 900.0, 1600.0]),
        )
        .unwrap();
    let mapped = CountyMapper::default().map(&table).unwrap();

    let dir = scratch_dir();
    let path = dir.path().join("mapped.csv");
    write_csv(&mapped, &path).unwrap();
    let read = read_csv(&path).unwrap();

    let counties = read.string_values(columns::COUNTY).unwrap();
    assert_eq!(counties, mapped.string_values(columns::COUNTY).unwrap());
    assert_eq!(counties[1].as_deref(), Some(UNKNOWN_COUNTY));

    let encoded_columns = |t: &RecordTable| {
        let mut encoder = OneHotEncoder::new(vec![columns::COUNTY.to_string()], true);
        encoder.fit(t).unwrap();
        encoder.output_columns()
    };
    assert_eq!(encoded_columns(&read), encoded_columns(&mapped));
    assert_eq!(
        encoded_columns(&read),
        vec!["county_Orange", "county_Unknown", "county_Ventura"]
    );

    let engine = AssociationEngine::default();
    let labels = |t: &RecordTable| -> Vec<String> {
        engine
            .subgroup_ttests(t, &[columns::COUNTY], &[columns::FINISHED_AREA])
            .unwrap()
            .into_iter()
            .map(|r| r.label)
            .collect()
    };
    assert_eq!(labels(&read).len(), 4);
    assert_eq!(labels(&read), labels(&mapped));
}

#[test]
fn test_nan_cells_read_as_nulls() {
    let dir = scratch_dir();
    let path = dir.path().join("nan.csv");
    std::fs::write(&path, "bedroomcnt,bathroomcnt\n3,2\nNaN,1\n4,nan\n2,1\n").unwrap();

    let read = read_csv(&path).unwrap();
    assert_eq!(read.column_type("bedroomcnt").unwrap(), ColumnType::Float64);
    assert_eq!(read.column("bedroomcnt").unwrap().null_count(), 1);

    let complete = read.drop_nulls().unwrap();
    assert_eq!(complete.numeric_values("bedroomcnt").unwrap(), vec![3.0, 2.0]);
}

fn seed_database(path: &std::path::Path) {
    let statements = [
        "CREATE TABLE propertylandusetype (propertylandusetypeid INTEGER, propertylandusedesc TEXT)",
        "INSERT INTO propertylandusetype VALUES (261, 'Single Family Residential'), (266, 'Condominium')",
        "CREATE TABLE properties_2017 (parcelid INTEGER, propertylandusetypeid INTEGER, bedroomcnt REAL, fips REAL)",
        "INSERT INTO properties_2017 VALUES (1, 261, 3.0, 6037), (2, 266, 2.0, 6059), (3, 261, 4.0, 6111), (4, 261, NULL, 6037)",
        "CREATE TABLE predictions_2017 (parcelid INTEGER, transactiondate TEXT)",
        "INSERT INTO predictions_2017 VALUES (1, '2017-01-03'), (2, '2017-02-11'), (3, '2016-12-30'), (4, '2017-06-01')",
    ];
    for statement in statements {
        execute_sql(statement, path).unwrap();
    }
}

#[test]
fn test_acquire_filters_single_family_2017_and_caches() {
    let dir = scratch_dir();
    let config = SourceConfig {
        db_path: dir.path().join("zillow.db"),
        cache_path: dir.path().join("zillow_data.csv"),
        ..SourceConfig::default()
    };
    seed_database(&config.db_path);

    let source = CachedSource::from_config(&config);
    let first = source.fetch().unwrap();
    assert_eq!(first.row_count(), 2);
    let mut parcels = first.numeric_values("parcelid").unwrap();
    parcels.sort_by(f64::total_cmp);
    assert_eq!(parcels, vec![1.0, 4.0]);
    assert!(config.cache_path.is_file());

    // the cache is served even after the database disappears
    std::fs::remove_file(&config.db_path).unwrap();
    let second = source.fetch().unwrap();
    assert_eq!(second.row_count(), 2);
    assert_eq!(second.column("bedroomcnt").unwrap().null_count(), 1);

    let cached = CsvSource::new(&config.cache_path).fetch().unwrap();
    assert_eq!(cached, second);
}

#[test]
fn test_config_file_drives_a_run() {
    let dir = scratch_dir();
    let path = dir.path().join("pipeline.toml");
    std::fs::write(
        &path,
        "[split]\nseed = 7\n\n[analysis]\nalpha = 0.01\nk = 2\n",
    )
    .unwrap();

    let config = PipelineConfig::from_toml_file(&path).unwrap();
    assert_eq!(config.split.seed, 7);
    assert_eq!(config.split.train_fraction, 0.7);
    assert_eq!(config.analysis.alpha, 0.01);
    assert_eq!(config.analysis.k, 2);
    assert_eq!(config.prepare.drop_columns.len(), columns::DROPPED_COLUMNS.len());

    std::fs::write(&path, "[analysis]\nalpha = 1.5\n").unwrap();
    assert!(PipelineConfig::from_toml_file(&path).is_err());
}

#[test]
fn test_end_to_end_from_csv() {
    let dir = scratch_dir();
    let config = PipelineConfig::default();
    let raw = read_csv(write_raw_csv(&dir, 300, 42)).unwrap();

    let report = null_report(&raw, config.analysis.max_null_percent).unwrap();
    assert_eq!(report.len(), raw.column_count());

    let prepared = zillow::prepare(&raw, &config.prepare).unwrap();
    let analysis = AssociationEngine::from_config(&config.analysis)
        .run(&prepared, &config.analysis)
        .unwrap();
    assert_eq!(analysis.correlations.len(), 28);

    let split = Splitter::new(config.split.clone()).split(&prepared).unwrap();
    let frames = zillow::model_ready(&split, &config).unwrap();

    let out = dir.path().join("scalers.json");
    write_json(&frames.bindings, &out).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(
        json.as_array().unwrap().len(),
        columns::SCALED_COLUMNS.len()
    );
}

#[test]
fn test_saved_scalers_reapply_to_held_out_rows() {
    let dir = scratch_dir();
    let config = PipelineConfig::default();
    let prepared = zillow::prepare(&raw_zillow_table(300, 43), &config.prepare).unwrap();
    let split = Splitter::new(config.split.clone()).split(&prepared).unwrap();
    let frames = zillow::model_ready(&split, &config).unwrap();

    let path = dir.path().join("scalers.json");
    write_json(&frames.bindings, &path).unwrap();
    let reloaded: Vec<ScalerBinding> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(reloaded, frames.bindings);

    let scaler = MinMaxScaler::from_bindings(reloaded);
    let test = scaler.transform(&split.test).unwrap();
    for binding in &frames.bindings {
        let name = format!("{}_scaled", binding.column);
        assert!(!test.has_column(&binding.column));
        assert_eq!(
            test.numeric_values(&name).unwrap(),
            frames.frames.test.numeric_values(&name).unwrap()
        );
    }
}
