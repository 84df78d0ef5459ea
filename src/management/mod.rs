mod auth;
mod features;

pub use auth::TokenManager;
pub use features::{
    CleanDataset, FEATURE_COUNT, Feature, FeatureRecord, FeatureStore, FeatureVector,
    LoadOutcome, Standardization, TRACK_ID_COLUMN, clean_and_standardize,
};
