use crate::errors::StoreError;
use crate::models::{PlayerName, Round, RoundForm, ScoreEntry};
use crate::storage::{load_rounds, persist_rounds};
use crate::validation::validate_form;
use chrono::{NaiveDate, Utc};
use std::path::PathBuf;
use tracing::info;

/// Number of trailing rounds handed to the commentary source.
pub const COMMENTARY_WINDOW: usize = 3;

/// Owns the round collection and rewrites the backing file after every change.
#[derive(Debug)]
pub struct RecordStore {
    path: PathBuf,
    rounds: Vec<Round>,
}

impl RecordStore {
    pub async fn load(path: PathBuf) -> Self {
        let rounds = load_rounds(&path).await;
        info!("loaded {} rounds from {}", rounds.len(), path.display());
        Self { path, rounds }
    }

    pub fn with_rounds(path: PathBuf, rounds: Vec<Round>) -> Self {
        Self { path, rounds }
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    pub fn get(&self, id: &str) -> Option<&Round> {
        self.rounds.iter().find(|round| round.id == id)
    }

    /// The last rounds in storage order, as summarized by the commentary.
    pub fn latest(&self, count: usize) -> &[Round] {
        let start = self.rounds.len().saturating_sub(count);
        &self.rounds[start..]
    }

    /// Newest-first history, optionally capped at `limit` rounds.
    pub fn history(&self, limit: Option<usize>) -> Vec<Round> {
        let newest_first = self.rounds.iter().rev().cloned();
        match limit {
            Some(limit) => newest_first.take(limit).collect(),
            None => newest_first.collect(),
        }
    }

    pub async fn save(&self) -> Result<(), StoreError> {
        persist_rounds(&self.path, &self.rounds).await
    }

    pub async fn add(&mut self, form: RoundForm) -> Result<Round, StoreError> {
        let scores = validate_form(&form)?;
        let round = Round {
            id: self.next_id(Utc::now().timestamp_millis()),
            date: form.date,
            course: form.course.trim().to_string(),
            scores,
        };
        self.rounds.push(round.clone());
        self.sort_by_date();
        self.save().await?;
        info!(id = %round.id, date = %round.date, "round added");
        Ok(round)
    }

    pub async fn update(&mut self, id: &str, form: RoundForm) -> Result<Round, StoreError> {
        let scores = validate_form(&form)?;
        let round = self
            .rounds
            .iter_mut()
            .find(|round| round.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        round.date = form.date;
        round.course = form.course.trim().to_string();
        round.scores = scores;
        let updated = round.clone();

        self.sort_by_date();
        self.save().await?;
        info!(id = %updated.id, date = %updated.date, "round updated");
        Ok(updated)
    }

    pub async fn remove(&mut self, id: &str) -> Result<Round, StoreError> {
        let index = self
            .rounds
            .iter()
            .position(|round| round.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let removed = self.rounds.remove(index);
        self.save().await?;
        info!(id = %removed.id, "round removed");
        Ok(removed)
    }

    /// Full overwrite used by backup restore. Imported order is kept as is.
    pub async fn replace_all(&mut self, rounds: Vec<Round>) -> Result<(), StoreError> {
        self.rounds = rounds;
        self.save().await?;
        info!(count = self.rounds.len(), "rounds replaced from backup");
        Ok(())
    }

    fn sort_by_date(&mut self) {
        self.rounds.sort_by_key(|round| round.date);
    }

    /// Creation-time id in epoch milliseconds, bumped until unused.
    fn next_id(&self, now_millis: i64) -> String {
        let mut candidate = now_millis;
        loop {
            let id = candidate.to_string();
            if self.get(&id).is_none() {
                return id;
            }
            candidate += 1;
        }
    }
}

/// Built-in dataset used when nothing has been persisted yet.
pub fn seed_rounds() -> Vec<Round> {
    vec![
        seed_round(
            "1",
            (2024, 5, 15),
            "Green Valley Country Club",
            [82, 85, 79, 88],
        ),
        seed_round(
            "2",
            (2024, 6, 10),
            "Sunset Ridge Golf Resort",
            [80, 82, 81, 84],
        ),
    ]
}

fn seed_round(id: &str, (y, m, d): (i32, u32, u32), course: &str, scores: [i32; 4]) -> Round {
    Round {
        id: id.to_string(),
        date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        course: course.to_string(),
        scores: PlayerName::MEMBERS
            .iter()
            .zip(scores)
            .map(|(&player_name, score)| ScoreEntry { player_name, score })
            .collect(),
    }
}
