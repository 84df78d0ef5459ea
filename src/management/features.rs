use std::{
    collections::{HashMap, HashSet},
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
};

use serde::{Serialize, Serializer, ser::SerializeMap};
use tokio::sync::OnceCell;

use crate::{
    error::{Error, Result},
    info, success,
};

pub const TRACK_ID_COLUMN: &str = "track_id";
pub const FEATURE_COUNT: usize = 9;

// Cell contents pandas would read as NaN.
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-NaN", "-nan", "null", "NULL", "None", "<NA>", "#N/A",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Danceability,
    Energy,
    Valence,
    Tempo,
    Acousticness,
    Speechiness,
    Instrumentalness,
    Liveness,
    Loudness,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Danceability,
        Feature::Energy,
        Feature::Valence,
        Feature::Tempo,
        Feature::Acousticness,
        Feature::Speechiness,
        Feature::Instrumentalness,
        Feature::Liveness,
        Feature::Loudness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::Danceability => "danceability",
            Feature::Energy => "energy",
            Feature::Valence => "valence",
            Feature::Tempo => "tempo",
            Feature::Acousticness => "acousticness",
            Feature::Speechiness => "speechiness",
            Feature::Instrumentalness => "instrumentalness",
            Feature::Liveness => "liveness",
            Feature::Loudness => "loudness",
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Standardized audio features of one track, in [`Feature::ALL`] order.
///
/// Serializes as a JSON object keyed by feature name.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.iter().map(|f| (*f, self.0[f.index()]))
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (feature, value) in self.iter() {
            map.serialize_entry(feature.as_str(), &value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureRecord {
    pub track_id: String,
    pub features: FeatureVector,
}

/// Per-column mean and population standard deviation fitted on a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Standardization {
    means: [f64; FEATURE_COUNT],
    stds: [f64; FEATURE_COUNT],
}

impl Standardization {
    pub fn fit(rows: &[[f64; FEATURE_COUNT]]) -> Self {
        let mut means = [0.0; FEATURE_COUNT];
        let mut stds = [1.0; FEATURE_COUNT];
        if rows.is_empty() {
            return Self { means, stds };
        }

        let n = rows.len() as f64;
        for col in 0..FEATURE_COUNT {
            let mean = rows.iter().map(|row| row[col]).sum::<f64>() / n;
            let variance = rows.iter().map(|row| (row[col] - mean).powi(2)).sum::<f64>() / n;
            means[col] = mean;
            // constant column: scale by 1 so every value standardizes to 0
            stds[col] = if is_constant(variance, mean, n) {
                1.0
            } else {
                variance.sqrt()
            };
        }

        Self { means, stds }
    }

    pub fn apply(&self, row: &[f64; FEATURE_COUNT]) -> FeatureVector {
        let mut scaled = [0.0; FEATURE_COUNT];
        for col in 0..FEATURE_COUNT {
            scaled[col] = (row[col] - self.means[col]) / self.stds[col];
        }
        FeatureVector(scaled)
    }

    pub fn mean(&self, feature: Feature) -> f64 {
        self.means[feature.index()]
    }

    pub fn std(&self, feature: Feature) -> f64 {
        self.stds[feature.index()]
    }
}

/// Output of the cleaning pass: standardized records plus the fit that produced them.
#[derive(Debug, Clone)]
pub struct CleanDataset {
    pub records: Vec<FeatureRecord>,
    pub standardization: Standardization,
    pub dropped_incomplete: usize,
    pub dropped_duplicates: usize,
}

/// Reads a CSV dataset, drops incomplete rows and standardizes the features.
///
/// Only the `track_id` column and the nine feature columns are looked at;
/// any other column is ignored. Rows with a missing value in one of those
/// columns are dropped whole. Track ids are kept byte for byte; only the
/// numeric cells are trimmed. When a `track_id` repeats, the first surviving
/// row wins and later ones are discarded before the standardization is fitted.
pub fn clean_and_standardize<R: Read>(reader: R) -> Result<CleanDataset> {
    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(reader);

    let headers = csv.headers()?.clone();
    let column_of = |name: &str| headers.iter().position(|h| h == name);

    let mut missing = Vec::new();
    let track_col = column_of(TRACK_ID_COLUMN);
    if track_col.is_none() {
        missing.push(TRACK_ID_COLUMN.to_string());
    }
    let mut feature_cols = [0usize; FEATURE_COUNT];
    for feature in Feature::ALL {
        match column_of(feature.as_str()) {
            Some(idx) => feature_cols[feature.index()] = idx,
            None => missing.push(feature.as_str().to_string()),
        }
    }
    let Some(track_col) = track_col.filter(|_| missing.is_empty()) else {
        return Err(Error::Schema { missing });
    };

    let mut seen = HashSet::new();
    let mut ids = Vec::new();
    let mut rows = Vec::new();
    let mut dropped_incomplete = 0;
    let mut dropped_duplicates = 0;

    for record in csv.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let Some(track_id) = record.get(track_col).filter(|v| !is_missing(v)) else {
            dropped_incomplete += 1;
            continue;
        };

        let mut values = [0.0; FEATURE_COUNT];
        let mut complete = true;
        for feature in Feature::ALL {
            match record.get(feature_cols[feature.index()]).map(str::trim) {
                Some(raw) if !is_missing(raw) => {
                    values[feature.index()] = parse_feature(raw, line, feature)?;
                }
                _ => {
                    complete = false;
                    break;
                }
            }
        }
        if !complete {
            dropped_incomplete += 1;
            continue;
        }

        if !seen.insert(track_id.to_string()) {
            dropped_duplicates += 1;
            continue;
        }
        ids.push(track_id.to_string());
        rows.push(values);
    }

    let standardization = Standardization::fit(&rows);
    let records = ids
        .into_iter()
        .zip(rows.iter())
        .map(|(track_id, row)| FeatureRecord {
            track_id,
            features: standardization.apply(row),
        })
        .collect();

    Ok(CleanDataset {
        records,
        standardization,
        dropped_incomplete,
        dropped_duplicates,
    })
}

// Variance at or below the rounding error of summing n values of this magnitude.
fn is_constant(variance: f64, mean: f64, n: f64) -> bool {
    let eps = f64::EPSILON;
    !variance.is_finite() || variance <= n * eps * variance + (n * mean * eps).powi(2)
}

// Infinite values would poison the column mean, so they fail the load like text does.
fn parse_feature(raw: &str, line: u64, feature: Feature) -> Result<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| Error::InvalidValue {
            line,
            column: feature.as_str().to_string(),
            value: raw.to_string(),
        })
}

fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded(usize),
    AlreadyLoaded(usize),
}

#[derive(Debug)]
struct LoadedFeatures {
    records: HashMap<String, FeatureRecord>,
    standardization: Standardization,
    dropped_incomplete: usize,
    dropped_duplicates: usize,
}

/// Process-wide cache of standardized audio features keyed by track id.
///
/// Built once by [`FeatureStore::initialize`] and read-only afterwards, so
/// lookups take no lock. Share it behind an `Arc` with whatever needs it.
#[derive(Debug)]
pub struct FeatureStore {
    path: PathBuf,
    loaded: OnceCell<LoadedFeatures>,
}

impl FeatureStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            loaded: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the dataset unless that already happened.
    ///
    /// Concurrent callers wait for the one load in flight; only that caller
    /// gets [`LoadOutcome::Loaded`]. A failed load leaves the store
    /// uninitialized, so a later call tries again.
    pub async fn initialize(&self) -> Result<LoadOutcome> {
        if let Some(loaded) = self.loaded.get() {
            info!("Dataset already loaded.");
            return Ok(LoadOutcome::AlreadyLoaded(loaded.records.len()));
        }

        let mut performed = false;
        let loaded = self
            .loaded
            .get_or_try_init(|| {
                performed = true;
                info!("Loading dataset from {}...", self.path.display());
                load(&self.path)
            })
            .await?;

        if performed {
            success!(
                "Dataset loaded with {} tracks ({} incomplete rows dropped, {} duplicate ids dropped).",
                loaded.records.len(),
                loaded.dropped_incomplete,
                loaded.dropped_duplicates
            );
            Ok(LoadOutcome::Loaded(loaded.records.len()))
        } else {
            info!("Dataset already loaded.");
            Ok(LoadOutcome::AlreadyLoaded(loaded.records.len()))
        }
    }

    pub fn is_ready(&self) -> bool {
        self.loaded.initialized()
    }

    /// Returns the standardized features of `track_id`, or `None` on a miss.
    ///
    /// Matching is exact and case-sensitive.
    pub fn lookup(&self, track_id: &str) -> Result<Option<&FeatureVector>> {
        let loaded = self.loaded()?;
        Ok(loaded.records.get(track_id).map(|r| &r.features))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.loaded()?.records.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    pub fn records(&self) -> Result<impl Iterator<Item = &FeatureRecord>> {
        Ok(self.loaded()?.records.values())
    }

    pub fn standardization(&self) -> Result<&Standardization> {
        Ok(&self.loaded()?.standardization)
    }

    fn loaded(&self) -> Result<&LoadedFeatures> {
        self.loaded.get().ok_or(Error::NotInitialized)
    }
}

async fn load(path: &Path) -> Result<LoadedFeatures> {
    let bytes = async_fs::read(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::DatasetNotFound(path.to_path_buf()),
        _ => Error::Io(e),
    })?;

    let dataset = clean_and_standardize(bytes.as_slice())?;
    let records = dataset
        .records
        .into_iter()
        .map(|r| (r.track_id.clone(), r))
        .collect();

    Ok(LoadedFeatures {
        records,
        standardization: dataset.standardization,
        dropped_incomplete: dataset.dropped_incomplete,
        dropped_duplicates: dataset.dropped_duplicates,
    })
}
