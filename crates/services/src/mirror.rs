//! Fire-and-forget submission of finished results to a remote sink.

use chrono::SecondsFormat;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use quiz_core::model::{Category, Locale, QuizResult, join_categories};

use crate::error::MirrorError;

/// Flattened result as posted to the sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteSummary {
    pub timestamp: String,
    pub personality: Category,
    pub age: u32,
    pub jolly_percentage: u32,
    pub slick_percentage: u32,
    pub buck_percentage: u32,
    pub snip_percentage: u32,
    pub language: Locale,
    pub answers: String,
}

impl RemoteSummary {
    #[must_use]
    pub fn from_result(result: &QuizResult, locale: Locale) -> Self {
        Self {
            timestamp: result
                .timestamp
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            personality: result.personality,
            age: result.age.years(),
            jolly_percentage: result.percentages.jolly,
            slick_percentage: result.percentages.slick,
            buck_percentage: result.percentages.buck,
            snip_percentage: result.percentages.snip,
            language: locale,
            answers: join_categories(&result.answers),
        }
    }
}

#[derive(Clone, Debug)]
pub struct RemoteMirror {
    client: Client,
    endpoint: Option<String>,
}

impl RemoteMirror {
    #[must_use]
    pub fn new(endpoint: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.endpoint.is_some()
    }

    /// POST `summary` once. The response status and body are ignored.
    ///
    /// # Errors
    ///
    /// Returns `MirrorError::Disabled` without an endpoint and
    /// `MirrorError::Http` when the request cannot be sent.
    pub async fn submit(&self, summary: &RemoteSummary) -> Result<(), MirrorError> {
        let endpoint = self.endpoint.as_deref().ok_or(MirrorError::Disabled)?;
        let response = self.client.post(endpoint).json(summary).send().await?;
        debug!(status = %response.status(), "remote mirror responded");
        Ok(())
    }

    /// Submit on a detached task and return at once.
    ///
    /// Returns `false` when the mirror is disabled. Failures are logged and
    /// never retried.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn forward(&self, result: &QuizResult, locale: Locale) -> bool {
        if !self.enabled() {
            return false;
        }
        let summary = RemoteSummary::from_result(result, locale);
        let mirror = self.clone();
        tokio::spawn(async move {
            if let Err(err) = mirror.submit(&summary).await {
                warn!(error = %err, "remote mirror submission failed");
            }
        });
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Age, Answer, Percentages, QuestionOrdinal};
    use quiz_core::time::fixed_now;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn result() -> QuizResult {
        QuizResult {
            personality: Category::Snip,
            percentages: Percentages {
                jolly: 9,
                slick: 0,
                buck: 18,
                snip: 73,
            },
            age: Age::new(27).unwrap(),
            answers: vec![
                Answer::new(QuestionOrdinal::FIRST, Category::Jolly),
                Answer::new(QuestionOrdinal::new(2).unwrap(), Category::Snip),
            ],
            timestamp: fixed_now(),
            name: None,
        }
    }

    #[test]
    fn summary_serializes_flat_camel_case() {
        let json = serde_json::to_value(RemoteSummary::from_result(&result(), Locale::Id)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "timestamp": "2023-11-14T22:13:20.000Z",
                "personality": "snip",
                "age": 27,
                "jollyPercentage": 9,
                "slickPercentage": 0,
                "buckPercentage": 18,
                "snipPercentage": 73,
                "language": "id",
                "answers": "jolly, snip"
            })
        );
    }

    #[tokio::test]
    async fn submit_posts_summary_and_ignores_status() {
        let server = MockServer::start().await;
        let summary = RemoteSummary::from_result(&result(), Locale::En);
        Mock::given(method("POST"))
            .and(path("/submit"))
            .and(body_json(&summary))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mirror = RemoteMirror::new(Some(format!("{}/submit", server.uri())));
        mirror.submit(&summary).await.unwrap();
    }

    #[tokio::test]
    async fn disabled_mirror_does_nothing() {
        let mirror = RemoteMirror::disabled();
        assert!(!mirror.forward(&result(), Locale::En));
        let summary = RemoteSummary::from_result(&result(), Locale::En);
        assert!(matches!(
            mirror.submit(&summary).await,
            Err(MirrorError::Disabled)
        ));
    }

    #[tokio::test]
    async fn unreachable_sink_surfaces_only_from_submit() {
        let mirror = RemoteMirror::new(Some("http://127.0.0.1:9/submit".into()));
        let summary = RemoteSummary::from_result(&result(), Locale::En);
        assert!(matches!(mirror.submit(&summary).await, Err(MirrorError::Http(_))));
        assert!(mirror.forward(&result(), Locale::En));
    }
}
