use crate::commentary::{CommentarySource, DisabledSource, GeminiSource};
use std::{env, path::PathBuf, sync::Arc};
use tracing::info;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/rounds.json";
const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_endpoint: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            port: get("PORT")
                .and_then(|value| value.parse::<u16>().ok())
                .unwrap_or(DEFAULT_PORT),
            data_path: get("APP_DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH)),
            gemini_api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
            gemini_model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_endpoint: get("GEMINI_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.to_string()),
        }
    }

    pub fn commentary_source(&self) -> Arc<dyn CommentarySource> {
        match &self.gemini_api_key {
            Some(key) => {
                info!(model = %self.gemini_model, "commentary enabled");
                Arc::new(GeminiSource::new(
                    self.gemini_endpoint.clone(),
                    self.gemini_model.clone(),
                    key.clone(),
                ))
            }
            None => {
                info!("no GEMINI_API_KEY set, commentary uses the default text");
                Arc::new(DisabledSource)
            }
        }
    }
}
