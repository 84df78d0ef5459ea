use tabled::Table;

use crate::{
    cli::spinner,
    config, error,
    management::{Feature, FeatureStore},
    types::{FeatureTableRow, ScalerTableRow},
    warning,
};

pub async fn features(track_id: String) {
    let store = load_store().await;

    match store.lookup(&track_id) {
        Ok(Some(features)) => {
            let rows: Vec<FeatureTableRow> = features
                .iter()
                .map(|(feature, value)| FeatureTableRow {
                    feature: feature.as_str().to_string(),
                    value: format!("{:.4}", value),
                })
                .collect();
            println!("{}", Table::new(rows));
        }
        Ok(None) => warning!("No audio features found for track {}.", track_id),
        Err(e) => error!("Feature lookup failed: {}", e),
    }
}

pub async fn dataset() {
    let store = load_store().await;

    let scaler = match store.standardization() {
        Ok(s) => s,
        Err(e) => error!("Feature store unavailable: {}", e),
    };

    let rows: Vec<ScalerTableRow> = Feature::ALL
        .iter()
        .map(|f| ScalerTableRow {
            feature: f.as_str().to_string(),
            mean: format!("{:.4}", scaler.mean(*f)),
            std: format!("{:.4}", scaler.std(*f)),
        })
        .collect();

    println!("{}", Table::new(rows));
}

async fn load_store() -> FeatureStore {
    let store = FeatureStore::new(config::dataset_path());
    let pb = spinner("Loading audio-feature dataset...");
    let result = store.initialize().await;
    pb.finish_and_clear();

    if let Err(e) = result {
        error!("Cannot load dataset {}. Err: {}", store.path().display(), e);
    }
    store
}
