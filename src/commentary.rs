use crate::errors::CommentaryError;
use crate::models::{CLUB_NAME, CommentaryResponse, PlayerName, Round};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const LOADING_TEXT: &str = "Analyzing performance data...";

pub const DEFAULT_COMMENTARY: &str = "Good day from the commentary booth of the legendary \
CLUB F4. GREGORY continues to reign as the emperor of the fairways with shot-making that \
leaves the rest of the field in awe. BIRCHAN keeps shaving strokes round after round, and \
PETER is poised to return to the seventies at any moment, so the pressure at the top has \
never been higher. SEVEN has lately found the cup politely pushing the ball away and has \
spent long hours in deep conversation with the grass, surely preparing a grand comeback. \
With all four members raising their game, we await the next round with great anticipation.";

/// Produces a short summary of the most recent rounds.
#[async_trait]
pub trait CommentarySource: Send + Sync {
    async fn summarize(&self, rounds: &[Round]) -> Result<String, CommentaryError>;
}

/// Used when no API key is configured; always falls back to the default text.
pub struct DisabledSource;

#[async_trait]
impl CommentarySource for DisabledSource {
    async fn summarize(&self, _rounds: &[Round]) -> Result<String, CommentaryError> {
        Err(CommentaryError::Disabled)
    }
}

pub struct GeminiSource {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiSource {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl CommentarySource for GeminiSource {
    async fn summarize(&self, rounds: &[Round]) -> Result<String, CommentaryError> {
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": build_prompt(rounds) }] }]
        });
        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(CommentaryError::Status(response.status()));
        }
        let payload: GenerateResponse = response.json().await?;
        extract_text(payload).ok_or(CommentaryError::EmptyResponse)
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

fn extract_text(payload: GenerateResponse) -> Option<String> {
    let content = payload.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|part| part.text).collect();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

pub fn build_prompt(rounds: &[Round]) -> String {
    let members: Vec<&str> = PlayerName::MEMBERS.iter().map(|p| p.as_str()).collect();
    let summary: Vec<String> = rounds
        .iter()
        .map(|round| {
            let scores: Vec<String> = round
                .scores
                .iter()
                .map(|entry| format!("{}: {}", entry.player_name.as_str(), entry.score))
                .collect();
            format!(
                "Date: {}, Course: {}, Scores: {}",
                round.date,
                round.course,
                scores.join(", ")
            )
        })
        .collect();

    format!(
        "You are the resident commentator of \"{CLUB_NAME}\", a legendary amateur golf club.\n\
         The members are {members}.\n\n\
         Write commentary on the latest rounds following these guidelines:\n\
         1. Hail the member with the lowest scores as the 'emperor' of the course.\n\
         2. Tease the member with the highest scores with a light-hearted, witty joke.\n\
         3. Mention who is on the rise or chasing the leaders to build anticipation.\n\
         4. Keep the tone refined and encouraging.\n\
         5. Write four to five sentences.\n\n\
         Latest rounds:\n{rounds}\n",
        members = members.join(", "),
        rounds = summary.join("\n"),
    )
}

/// Latest commentary plus the generation of the request that produced it.
///
/// Each refresh bumps the generation; a finished request only writes its text
/// back when no newer refresh has started since.
pub struct Commentator {
    source: Arc<dyn CommentarySource>,
    state: Mutex<CommentaryResponse>,
}

impl Commentator {
    pub fn new(source: Arc<dyn CommentarySource>) -> Arc<Self> {
        Arc::new(Self {
            source,
            state: Mutex::new(CommentaryResponse {
                text: LOADING_TEXT.to_string(),
                loading: false,
                generation: 0,
            }),
        })
    }

    pub async fn snapshot(&self) -> CommentaryResponse {
        self.state.lock().await.clone()
    }

    /// Starts a background summary of `rounds`. Nothing happens for an empty slice.
    pub async fn refresh(self: &Arc<Self>, rounds: Vec<Round>) -> Option<JoinHandle<()>> {
        if rounds.is_empty() {
            return None;
        }

        let generation = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.loading = true;
            state.generation
        };

        let this = Arc::clone(self);
        Some(tokio::spawn(async move {
            let text = match this.source.summarize(&rounds).await {
                Ok(text) => text,
                Err(CommentaryError::Disabled) => DEFAULT_COMMENTARY.to_string(),
                Err(err) => {
                    warn!("commentary unavailable, using default text: {err}");
                    DEFAULT_COMMENTARY.to_string()
                }
            };

            let mut state = this.state.lock().await;
            if state.generation != generation {
                debug!(
                    generation,
                    latest = state.generation,
                    "dropping stale commentary"
                );
                return;
            }
            state.text = text;
            state.loading = false;
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::seed_rounds;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    /// Holds each request open until the test releases it, keyed by the first round id.
    #[derive(Default)]
    struct GatedSource {
        gates: std::sync::Mutex<HashMap<String, oneshot::Receiver<Option<String>>>>,
    }

    impl GatedSource {
        fn gate(&self, id: &str) -> oneshot::Sender<Option<String>> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(id.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl CommentarySource for GatedSource {
        async fn summarize(&self, rounds: &[Round]) -> Result<String, CommentaryError> {
            let rx = self.gates.lock().unwrap().remove(&rounds[0].id);
            match rx {
                Some(rx) => rx
                    .await
                    .ok()
                    .flatten()
                    .ok_or(CommentaryError::EmptyResponse),
                None => Err(CommentaryError::EmptyResponse),
            }
        }
    }

    fn rounds_with_id(id: &str) -> Vec<Round> {
        let mut rounds = seed_rounds();
        rounds[0].id = id.to_string();
        rounds
    }

    #[tokio::test]
    async fn stale_response_does_not_overwrite_newer_one() {
        let source = Arc::new(GatedSource::default());
        let older = source.gate("older");
        let newer = source.gate("newer");
        let commentator = Commentator::new(source.clone());

        let first = commentator.refresh(rounds_with_id("older")).await.unwrap();
        let second = commentator.refresh(rounds_with_id("newer")).await.unwrap();

        newer.send(Some("fresh".to_string())).unwrap();
        second.await.unwrap();
        older.send(Some("stale".to_string())).unwrap();
        first.await.unwrap();

        let state = commentator.snapshot().await;
        assert_eq!(state.text, "fresh");
        assert!(!state.loading);
        assert_eq!(state.generation, 2);
    }

    #[tokio::test]
    async fn older_result_is_ignored_while_newer_is_pending() {
        let source = Arc::new(GatedSource::default());
        let older = source.gate("older");
        let _newer = source.gate("newer");
        let commentator = Commentator::new(source.clone());

        let first = commentator.refresh(rounds_with_id("older")).await.unwrap();
        let _second = commentator.refresh(rounds_with_id("newer")).await.unwrap();

        older.send(Some("stale".to_string())).unwrap();
        first.await.unwrap();

        let state = commentator.snapshot().await;
        assert_eq!(state.text, LOADING_TEXT);
        assert!(state.loading);
    }

    #[tokio::test]
    async fn failures_fall_back_to_default_text() {
        let commentator = Commentator::new(Arc::new(DisabledSource));
        commentator.refresh(seed_rounds()).await.unwrap().await.unwrap();
        let state = commentator.snapshot().await;
        assert_eq!(state.text, DEFAULT_COMMENTARY);
        assert!(!state.loading);

        let gated = Arc::new(GatedSource::default());
        let failing = gated.gate("1");
        let commentator = Commentator::new(gated.clone());
        let handle = commentator.refresh(seed_rounds()).await.unwrap();
        failing.send(None).unwrap();
        handle.await.unwrap();
        assert_eq!(commentator.snapshot().await.text, DEFAULT_COMMENTARY);
    }

    #[tokio::test]
    async fn empty_collection_starts_no_request() {
        let commentator = Commentator::new(Arc::new(DisabledSource));
        assert!(commentator.refresh(Vec::new()).await.is_none());
        let state = commentator.snapshot().await;
        assert_eq!(state.generation, 0);
        assert!(!state.loading);
    }

    #[test]
    fn prompt_lists_each_round() {
        let prompt = build_prompt(&seed_rounds());
        assert!(prompt.contains("CLUB F4"));
        assert!(prompt.contains("Date: 2024-05-15, Course: Green Valley Country Club"));
        assert!(prompt.contains("GREGORY: 80, BIRCHAN: 82, PETER: 81, SEVEN: 84"));
    }

    #[test]
    fn response_text_is_joined_and_trimmed() {
        let payload: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":" Hello "},{"text":"there. "}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(payload).as_deref(), Some("Hello there."));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(empty), None);
    }
}
