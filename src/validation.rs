use crate::errors::ValidationError;
use crate::models::{PlayerName, Round, RoundForm, ScoreEntry};
use std::collections::HashSet;

/// Checks an add/edit submission and returns its scores in member order.
///
/// Every member needs a positive score and the course must not be blank.
pub fn validate_form(form: &RoundForm) -> Result<Vec<ScoreEntry>, ValidationError> {
    if form.course.trim().is_empty() {
        return Err(ValidationError::MissingCourse);
    }
    check_scores(&form.scores)?;

    PlayerName::MEMBERS
        .iter()
        .map(|&player| {
            form.scores
                .iter()
                .find(|entry| entry.player_name == player)
                .copied()
                .ok_or(ValidationError::MissingScore(player.as_str()))
        })
        .collect()
}

/// The one rule a whole collection must meet, both when loaded from disk and
/// when restored from a backup: every id is non-empty and unique. Round
/// contents (course, scores) are kept as they are.
///
/// On failure returns the index of the first offending round.
pub fn validate_collection(rounds: &[Round]) -> Result<(), (usize, ValidationError)> {
    let mut seen = HashSet::with_capacity(rounds.len());
    for (index, round) in rounds.iter().enumerate() {
        if round.id.trim().is_empty() {
            return Err((index, ValidationError::EmptyId));
        }
        if !seen.insert(round.id.as_str()) {
            return Err((index, ValidationError::DuplicateId(round.id.clone())));
        }
    }
    Ok(())
}

fn check_scores(scores: &[ScoreEntry]) -> Result<(), ValidationError> {
    for (index, entry) in scores.iter().enumerate() {
        if entry.score <= 0 {
            return Err(ValidationError::NonPositiveScore {
                player: entry.player_name.as_str(),
                score: entry.score,
            });
        }
        if scores[..index]
            .iter()
            .any(|earlier| earlier.player_name == entry.player_name)
        {
            return Err(ValidationError::DuplicatePlayer(entry.player_name.as_str()));
        }
    }
    Ok(())
}
