//! Synthetic raw extracts shaped like `properties_2017`

use std::path::PathBuf;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tempfile::TempDir;

use zillow_prep::column::{Float64Column, StringColumn};
use zillow_prep::io::write_csv;
use zillow_prep::zillow::columns::DROPPED_COLUMNS;
use zillow_prep::RecordTable;

/// Default size of the synthetic extract
pub const RAW_ROWS: usize = 400;

const FIPS_CODES: [f64; 3] = [6037.0, 6059.0, 6111.0];
const BATHROOMS: [f64; 6] = [1.0, 1.5, 2.0, 2.5, 3.0, 4.0];

/// Raw extract with every column the pruner expects.
///
/// Every 17th row has no bedrooms, every 23rd eight bedrooms, every 19th no
/// bathrooms, every 29th a 120 sqft house, every 31st a huge lot and every
/// 37th a missing FIPS code.
pub fn raw_zillow_table(n: usize, seed: u64) -> RecordTable {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut parcel = Vec::with_capacity(n);
    let mut bedrooms = Vec::with_capacity(n);
    let mut bathrooms = Vec::with_capacity(n);
    let mut area = Vec::with_capacity(n);
    let mut fips = Vec::with_capacity(n);
    let mut latitude = Vec::with_capacity(n);
    let mut longitude = Vec::with_capacity(n);
    let mut lot = Vec::with_capacity(n);
    let mut year = Vec::with_capacity(n);
    let mut value = Vec::with_capacity(n);

    for i in 1..=n {
        let sqft: f64 = rng.random_range(600.0_f64..4500.0).round();

        parcel.push(Some(10_000_000.0 + i as f64));
        bedrooms.push(Some(match i {
            i if i % 17 == 0 => 0.0,
            i if i % 23 == 0 => 8.0,
            _ => rng.random_range(1..=6) as f64,
        }));
        bathrooms.push(Some(if i % 19 == 0 {
            0.0
        } else {
            BATHROOMS[rng.random_range(0..BATHROOMS.len())]
        }));
        area.push(Some(if i % 29 == 0 { 120.0 } else { sqft }));
        fips.push(if i % 37 == 0 {
            None
        } else {
            Some(FIPS_CODES[i % 3])
        });
        latitude.push(Some(rng.random_range(33_500_000..34_500_000) as f64));
        longitude.push(Some(rng.random_range(-119_000_000..-117_500_000) as f64));
        lot.push(Some(if i % 31 == 0 {
            300_000.0
        } else {
            rng.random_range(2_000.0_f64..20_000.0).round()
        }));
        year.push(Some(rng.random_range(1920..2016) as f64));
        value.push(Some((sqft * rng.random_range(150.0_f64..450.0)).round()));
    }

    let mut table = RecordTable::new();
    let kept = [
        ("parcelid", parcel),
        ("bathroomcnt", bathrooms),
        ("bedroomcnt", bedrooms),
        ("calculatedfinishedsquarefeet", area),
        ("fips", fips),
        ("latitude", latitude),
        ("longitude", longitude),
        ("lotsizesquarefeet", lot),
        ("yearbuilt", year),
        ("taxvaluedollarcnt", value),
    ];
    for (name, values) in kept {
        table
            .add_column(name, Float64Column::from_options(values))
            .unwrap();
    }

    for &name in DROPPED_COLUMNS {
        match name {
            "propertycountylandusecode" | "propertyzoningdesc" => table
                .add_column(name, StringColumn::new(vec!["0100".to_string(); n]))
                .unwrap(),
            "id" => table
                .add_column(name, Float64Column::new((0..n).map(|i| i as f64).collect()))
                .unwrap(),
            _ => table
                .add_column(name, Float64Column::from_options(vec![None; n]))
                .unwrap(),
        }
    }

    table
}

/// Temporary directory removed on drop
pub fn scratch_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Writes a synthetic extract to `dir/raw.csv`
pub fn write_raw_csv(dir: &TempDir, n: usize, seed: u64) -> PathBuf {
    let path = dir.path().join("raw.csv");
    write_csv(&raw_zillow_table(n, seed), &path).unwrap();
    path
}
