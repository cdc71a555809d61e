//! Modeling preparation: transformer pipeline, scaling and encoding, feature
//! selection and the train/validate/test split.

pub mod feature_selection;
pub mod model_selection;
pub mod pipeline;
pub mod preprocessing;

pub use feature_selection::{select_k_best, FeatureRanking, FeatureScore, SelectKBest};
pub use model_selection::{train_test_split, Splitter, TrainValidateTest};
pub use pipeline::{Pipeline, Transformer};
pub use preprocessing::{scale_columns, MinMaxScaler, OneHotEncoder, ScalerBinding};
