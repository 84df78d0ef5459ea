use std::{fs, path::PathBuf, sync::Arc};

use moodradio::error::Error;
use moodradio::management::*;
use tempfile::TempDir;

const HEADER: &str = "track_id,artists,danceability,energy,valence,tempo,acousticness,speechiness,instrumentalness,liveness,loudness";

// Helper function to write a dataset file into a temporary directory
fn write_dataset(dir: &TempDir, rows: &[&str]) -> PathBuf {
    let path = dir.path().join("dataset.csv");
    let mut contents = String::from(HEADER);
    for row in rows {
        contents.push('\n');
        contents.push_str(row);
    }
    contents.push('\n');
    fs::write(&path, contents).unwrap();
    path
}

fn sample_rows() -> Vec<&'static str> {
    vec![
        "t1,Adele,0.2,0.5,0.1,100.0,0.9,0.03,0.0,0.1,-10.0",
        "t2,Muse,0.4,0.7,0.5,120.0,0.5,0.05,0.1,0.2,-7.0",
        "t3,Daft Punk,0.6,0.9,0.9,140.0,0.1,0.07,0.8,0.3,-4.0",
    ]
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[tokio::test]
async fn test_lookup_before_initialize_fails() {
    let dir = TempDir::new().unwrap();
    let store = FeatureStore::new(write_dataset(&dir, &sample_rows()));

    assert!(!store.is_ready());
    assert!(matches!(store.lookup("t1"), Err(Error::NotInitialized)));
    assert!(matches!(store.len(), Err(Error::NotInitialized)));
}

#[tokio::test]
async fn test_initialize_loads_and_standardizes() {
    let dir = TempDir::new().unwrap();
    let store = FeatureStore::new(write_dataset(&dir, &sample_rows()));

    let outcome = store.initialize().await.unwrap();
    assert_eq!(outcome, LoadOutcome::Loaded(3));
    assert!(store.is_ready());

    // danceability 0.2/0.4/0.6: mean 0.4, population std sqrt(0.08 / 3)
    let std = (0.08f64 / 3.0).sqrt();
    let t1 = store.lookup("t1").unwrap().unwrap();
    assert!(approx(t1.get(Feature::Danceability), (0.2 - 0.4) / std));
    let t2 = store.lookup("t2").unwrap().unwrap();
    assert!(approx(t2.get(Feature::Danceability), 0.0));

    let scaler = store.standardization().unwrap();
    assert!(approx(scaler.mean(Feature::Tempo), 120.0));
    assert!(approx(scaler.std(Feature::Tempo), (800.0f64 / 3.0).sqrt()));
}

#[tokio::test]
async fn test_standardized_columns_have_zero_mean_unit_variance() {
    let dir = TempDir::new().unwrap();
    let store = FeatureStore::new(write_dataset(&dir, &sample_rows()));
    store.initialize().await.unwrap();

    let records: Vec<&FeatureRecord> = store.records().unwrap().collect();
    let n = records.len() as f64;
    for feature in Feature::ALL {
        let mean = records.iter().map(|r| r.features.get(feature)).sum::<f64>() / n;
        let variance = records
            .iter()
            .map(|r| (r.features.get(feature) - mean).powi(2))
            .sum::<f64>()
            / n;
        assert!(mean.abs() < 1e-9, "{} mean {}", feature.as_str(), mean);
        assert!(approx(variance, 1.0), "{} variance {}", feature.as_str(), variance);
    }
}

#[tokio::test]
async fn test_initialize_twice_is_noop() {
    let dir = TempDir::new().unwrap();
    let store = FeatureStore::new(write_dataset(&dir, &sample_rows()));

    let first = store.initialize().await.unwrap();
    let before = store.lookup("t3").unwrap().cloned();
    let second = store.initialize().await.unwrap();

    assert_eq!(first, LoadOutcome::Loaded(3));
    assert_eq!(second, LoadOutcome::AlreadyLoaded(3));
    assert_eq!(store.lookup("t3").unwrap().cloned(), before);
}

#[tokio::test]
async fn test_concurrent_initialize_loads_once() {
    let dir = TempDir::new().unwrap();
    let store = Arc::new(FeatureStore::new(write_dataset(&dir, &sample_rows())));

    let (a, b) = tokio::join!(store.initialize(), store.initialize());
    let outcomes = [a.unwrap(), b.unwrap()];

    let loaded = outcomes
        .iter()
        .filter(|o| matches!(o, LoadOutcome::Loaded(_)))
        .count();
    assert_eq!(loaded, 1);
    assert!(outcomes.contains(&LoadOutcome::AlreadyLoaded(3)));
}

#[tokio::test]
async fn test_standardization_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let path = write_dataset(&dir, &sample_rows());

    let first = FeatureStore::new(&path);
    let second = FeatureStore::new(&path);
    first.initialize().await.unwrap();
    second.initialize().await.unwrap();

    for id in ["t1", "t2", "t3"] {
        let a = first.lookup(id).unwrap().unwrap();
        let b = second.lookup(id).unwrap().unwrap();
        for ((_, x), (_, y)) in a.iter().zip(b.iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
    }
}

#[tokio::test]
async fn test_every_record_has_all_features() {
    let dir = TempDir::new().unwrap();
    let store = FeatureStore::new(write_dataset(&dir, &sample_rows()));
    store.initialize().await.unwrap();

    for record in store.records().unwrap() {
        let json = serde_json::to_value(&record.features).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), FEATURE_COUNT);
        for feature in Feature::ALL {
            assert!(map[feature.as_str()].as_f64().unwrap().is_finite());
        }
    }
}

#[tokio::test]
async fn test_row_missing_tempo_is_excluded() {
    let dir = TempDir::new().unwrap();
    let mut rows = sample_rows();
    rows.push("t4,Nobody,0.5,0.5,0.5,,0.5,0.5,0.5,0.5,-5.0");
    let store = FeatureStore::new(write_dataset(&dir, &rows));

    assert_eq!(store.initialize().await.unwrap(), LoadOutcome::Loaded(3));
    assert_eq!(store.lookup("t4").unwrap(), None);

    // the dropped row must not take part in the fit either
    let scaler = store.standardization().unwrap();
    assert!(approx(scaler.mean(Feature::Danceability), 0.4));
}

#[tokio::test]
async fn test_row_missing_track_id_is_excluded() {
    let dir = TempDir::new().unwrap();
    let mut rows = sample_rows();
    rows.push(",Nobody,0.5,0.5,0.5,110.0,0.5,0.5,0.5,0.5,-5.0");
    rows.push("t5,Short,0.5,0.5");
    let store = FeatureStore::new(write_dataset(&dir, &rows));

    assert_eq!(store.initialize().await.unwrap(), LoadOutcome::Loaded(3));
    assert_eq!(store.lookup("t5").unwrap(), None);
}

#[tokio::test]
async fn test_lookup_miss_returns_none() {
    let dir = TempDir::new().unwrap();
    let store = FeatureStore::new(write_dataset(&dir, &sample_rows()));
    store.initialize().await.unwrap();

    assert_eq!(store.lookup("nonexistent_id").unwrap(), None);
    // matching is case-sensitive
    assert_eq!(store.lookup("T1").unwrap(), None);
}

#[tokio::test]
async fn test_missing_dataset_leaves_store_uninitialized() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("does-not-exist.csv");
    let store = FeatureStore::new(&path);

    match store.initialize().await {
        Err(Error::DatasetNotFound(p)) => assert_eq!(p, path),
        other => panic!("expected DatasetNotFound, got {:?}", other),
    }
    assert!(!store.is_ready());
    assert!(matches!(store.lookup("t1"), Err(Error::NotInitialized)));
}

#[tokio::test]
async fn test_failed_initialize_can_be_retried() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.csv");
    let store = FeatureStore::new(&path);

    assert!(store.initialize().await.is_err());

    write_dataset(&dir, &sample_rows());
    assert_eq!(store.initialize().await.unwrap(), LoadOutcome::Loaded(3));
}

#[tokio::test]
async fn test_missing_columns_are_named() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("dataset.csv");
    fs::write(
        &path,
        "track_id,danceability,energy,valence,acousticness,speechiness,instrumentalness,liveness\nt1,0.1,0.2,0.3,0.4,0.5,0.6,0.7\n",
    )
    .unwrap();
    let store = FeatureStore::new(&path);

    match store.initialize().await {
        Err(Error::Schema { missing }) => assert_eq!(missing, vec!["tempo", "loudness"]),
        other => panic!("expected Schema error, got {:?}", other),
    }
    assert!(!store.is_ready());
}

#[tokio::test]
async fn test_empty_dataset_is_legal() {
    let dir = TempDir::new().unwrap();
    let store = FeatureStore::new(write_dataset(&dir, &[]));

    assert_eq!(store.initialize().await.unwrap(), LoadOutcome::Loaded(0));
    assert!(store.is_empty().unwrap());
    assert_eq!(store.lookup("t1").unwrap(), None);
}

#[test]
fn test_duplicate_track_id_keeps_first_occurrence() {
    let csv = format!(
        "{}\n{}\n{}\n{}\n",
        HEADER,
        "dup,A,0.0,0.0,0.0,100.0,0.0,0.0,0.0,0.0,-10.0",
        "other,B,1.0,1.0,1.0,200.0,1.0,1.0,1.0,1.0,-5.0",
        "dup,C,9.0,9.0,9.0,900.0,9.0,9.0,9.0,9.0,-1.0",
    );

    let dataset = clean_and_standardize(csv.as_bytes()).unwrap();

    assert_eq!(dataset.records.len(), 2);
    assert_eq!(dataset.dropped_duplicates, 1);
    // fitted on the two kept rows only
    assert!(approx(dataset.standardization.mean(Feature::Tempo), 150.0));
    let dup = dataset
        .records
        .iter()
        .find(|r| r.track_id == "dup")
        .unwrap();
    assert!(approx(dup.features.get(Feature::Tempo), -1.0));
}

#[test]
fn test_nan_markers_count_as_missing() {
    let csv = format!(
        "{}\n{}\n{}\n",
        HEADER,
        "t1,A,0.1,0.2,0.3,100.0,0.4,0.5,0.6,0.7,-5.0",
        "t2,B,NaN,0.2,0.3,100.0,0.4,0.5,0.6,0.7,-5.0",
    );

    let dataset = clean_and_standardize(csv.as_bytes()).unwrap();

    assert_eq!(dataset.records.len(), 1);
    assert_eq!(dataset.dropped_incomplete, 1);
}

#[test]
fn test_non_numeric_feature_is_rejected() {
    let csv = format!(
        "{}\n{}\n",
        HEADER, "t1,A,loud,0.2,0.3,100.0,0.4,0.5,0.6,0.7,-5.0",
    );

    match clean_and_standardize(csv.as_bytes()) {
        Err(Error::InvalidValue { column, value, .. }) => {
            assert_eq!(column, "danceability");
            assert_eq!(value, "loud");
        }
        other => panic!("expected InvalidValue, got {:?}", other.map(|d| d.records.len())),
    }
}

#[test]
fn test_constant_column_standardizes_to_zero() {
    let rows = [[0.1; FEATURE_COUNT], [0.1; FEATURE_COUNT], [0.1; FEATURE_COUNT]];

    let scaler = Standardization::fit(&rows);

    assert_eq!(scaler.std(Feature::Energy), 1.0);
    let scaled = scaler.apply(&rows[0]);
    assert!(scaled.iter().all(|(_, v)| v.abs() < 1e-12));
}

#[test]
fn test_infinite_feature_is_rejected() {
    let csv = format!(
        "{}\n{}\n{}\n{}\n",
        HEADER,
        "t1,A,0.1,0.2,0.3,100.0,0.4,0.5,0.6,0.7,-5.0",
        "t2,B,0.1,0.2,0.3,inf,0.4,0.5,0.6,0.7,-5.0",
        "t3,C,0.1,0.2,0.3,120.0,0.4,0.5,0.6,0.7,-5.0",
    );

    match clean_and_standardize(csv.as_bytes()) {
        Err(Error::InvalidValue { line, column, value }) => {
            assert_eq!(line, 3);
            assert_eq!(column, "tempo");
            assert_eq!(value, "inf");
        }
        other => panic!("expected InvalidValue, got {:?}", other.map(|d| d.records.len())),
    }
}

#[test]
fn test_negative_infinity_is_rejected() {
    let csv = format!(
        "{}\n{}\n",
        HEADER, "t1,A,0.1,0.2,0.3,100.0,0.4,0.5,0.6,0.7,-infinity",
    );

    assert!(matches!(
        clean_and_standardize(csv.as_bytes()),
        Err(Error::InvalidValue { .. })
    ));
}

#[tokio::test]
async fn test_track_id_whitespace_is_preserved() {
    let dir = TempDir::new().unwrap();
    let store = FeatureStore::new(write_dataset(
        &dir,
        &[
            " t1,A,0.1,0.2,0.3,100.0,0.4,0.5,0.6,0.7,-5.0",
            "t2,B, 0.3 ,0.4,0.5,120.0,0.6,0.7,0.8,0.9,-3.0",
        ],
    ));
    store.initialize().await.unwrap();

    // ids are matched exactly, numeric cells may carry padding
    assert!(store.lookup(" t1").unwrap().is_some());
    assert_eq!(store.lookup("t1").unwrap(), None);
    assert!(store.lookup("t2").unwrap().is_some());
}

#[test]
fn test_dropped_rows_are_counted() {
    let csv = format!(
        "{}\n{}\n{}\n{}\n{}\n",
        HEADER,
        "t1,A,0.1,0.2,0.3,100.0,0.4,0.5,0.6,0.7,-5.0",
        "t2,B,0.1,0.2,0.3,,0.4,0.5,0.6,0.7,-5.0",
        "t1,C,0.9,0.2,0.3,110.0,0.4,0.5,0.6,0.7,-5.0",
        "t3,D,0.5,0.2,0.3,120.0,0.4,0.5,0.6,0.7,-5.0",
    );

    let dataset = clean_and_standardize(csv.as_bytes()).unwrap();

    assert_eq!(dataset.records.len(), 2);
    assert_eq!(dataset.dropped_incomplete, 1);
    assert_eq!(dataset.dropped_duplicates, 1);
}
