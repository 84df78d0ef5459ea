//! Sentiment classification capability.
//!
//! The recommendation pipeline only needs "a label and a confidence for this
//! text". [`SentimentClassifier`] is that contract; [`HttpSentimentClassifier`]
//! fulfils it with a hosted text-classification model (for example the
//! Hugging Face inference API serving an SST-2 model).

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    config,
    error::{Error, Result},
    types::Sentiment,
};

#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Sentiment>;
}

// Text-classification endpoints answer either flat or nested per input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ClassifierResponse {
    Nested(Vec<Vec<Sentiment>>),
    Flat(Vec<Sentiment>),
}

impl ClassifierResponse {
    fn best(self) -> Option<Sentiment> {
        let candidates = match self {
            ClassifierResponse::Nested(outer) => outer.into_iter().flatten().collect::<Vec<_>>(),
            ClassifierResponse::Flat(flat) => flat,
        };
        candidates
            .into_iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

pub struct HttpSentimentClassifier {
    http: Client,
    url: String,
    token: Option<String>,
}

impl HttpSentimentClassifier {
    pub fn new(url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            http: Client::new(),
            url: url.into(),
            token,
        }
    }

    pub fn from_config() -> Self {
        Self::new(config::sentiment_api_url(), config::sentiment_api_token())
    }
}

#[async_trait]
impl SentimentClassifier for HttpSentimentClassifier {
    /// Classifies `text` with a single request.
    ///
    /// Every failure, including a reply with no labels, is reported as
    /// [`Error::ClassificationUnavailable`].
    async fn classify(&self, text: &str) -> Result<Sentiment> {
        let mut request = self
            .http
            .post(&self.url)
            .json(&serde_json::json!({ "inputs": text }));
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::ClassificationUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ClassificationUnavailable(format!(
                "classifier returned {}: {}",
                status, body
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::ClassificationUnavailable(e.to_string()))?;

        best_sentiment(&body)
    }
}

/// Picks the highest-scoring label from a classifier response body.
///
/// Accepts both the flat `[{label, score}]` and the nested
/// `[[{label, score}]]` shape.
pub fn best_sentiment(body: &[u8]) -> Result<Sentiment> {
    let parsed: ClassifierResponse = serde_json::from_slice(body)
        .map_err(|e| Error::ClassificationUnavailable(e.to_string()))?;

    parsed
        .best()
        .ok_or_else(|| Error::ClassificationUnavailable("classifier returned no labels".into()))
}
