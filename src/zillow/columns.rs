//! Column names of the Zillow `properties_2017` extract

pub const PARCEL_ID: &str = "parcelid";
pub const BATHROOMS: &str = "bathroomcnt";
pub const BEDROOMS: &str = "bedroomcnt";
pub const FINISHED_AREA: &str = "calculatedfinishedsquarefeet";
pub const FIPS: &str = "fips";
pub const LATITUDE: &str = "latitude";
pub const LONGITUDE: &str = "longitude";
pub const LOT_SIZE: &str = "lotsizesquarefeet";
pub const YEAR_BUILT: &str = "yearbuilt";
pub const TAX_VALUE: &str = "taxvaluedollarcnt";

// derived
pub const COUNTY: &str = "county";
pub const BED_BATH_RATIO: &str = "bed_bath_ratio";
pub const MIN_ROOMS: &str = "min_rooms";
pub const LUXURY_HOUSE: &str = "luxury_house";

/// Sparse or redundant columns removed before any other processing
pub const DROPPED_COLUMNS: &[&str] = &[
    "airconditioningtypeid",
    "architecturalstyletypeid",
    "basementsqft",
    "buildingclasstypeid",
    "buildingqualitytypeid",
    "decktypeid",
    "finishedfloor1squarefeet",
    "finishedsquarefeet13",
    "finishedsquarefeet15",
    "finishedsquarefeet50",
    "finishedsquarefeet6",
    "fireplacecnt",
    "garagecarcnt",
    "garagetotalsqft",
    "hashottuborspa",
    "heatingorsystemtypeid",
    "poolcnt",
    "poolsizesum",
    "pooltypeid10",
    "pooltypeid2",
    "pooltypeid7",
    "propertyzoningdesc",
    "regionidcity",
    "regionidneighborhood",
    "storytypeid",
    "threequarterbathnbr",
    "typeconstructiontypeid",
    "unitcnt",
    "yardbuildingsqft17",
    "yardbuildingsqft26",
    "numberofstories",
    "fireplaceflag",
    "taxdelinquencyflag",
    "taxdelinquencyyear",
    "taxamount",
    "structuretaxvaluedollarcnt",
    "landtaxvaluedollarcnt",
    "calculatedbathnbr",
    "fullbathcnt",
    "finishedsquarefeet12",
    "propertylandusetypeid",
    "regionidcounty",
    "propertycountylandusecode",
    "regionidzip",
    "assessmentyear",
    "censustractandblock",
    "rawcensustractandblock",
    "roomcnt",
    "id",
];

/// Numeric columns compared pairwise by the correlation analysis
pub const CORRELATION_COLUMNS: &[&str] = &[
    BEDROOMS,
    BATHROOMS,
    FINISHED_AREA,
    YEAR_BUILT,
    LOT_SIZE,
    TAX_VALUE,
    LATITUDE,
    LONGITUDE,
];

/// Continuous columns tested per county
pub const CONTINUOUS_COLUMNS: &[&str] = &[
    FINISHED_AREA,
    YEAR_BUILT,
    BEDROOMS,
    BATHROOMS,
    TAX_VALUE,
    LATITUDE,
    LONGITUDE,
];

/// Columns min-max scaled for modeling
pub const SCALED_COLUMNS: &[&str] = &[
    BATHROOMS,
    BEDROOMS,
    FINISHED_AREA,
    LATITUDE,
    LONGITUDE,
    LOT_SIZE,
    YEAR_BUILT,
    BED_BATH_RATIO,
    MIN_ROOMS,
];

/// Categorical columns one-hot encoded for modeling
pub const ENCODED_COLUMNS: &[&str] = &[COUNTY, LUXURY_HOUSE];

pub(crate) fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}
