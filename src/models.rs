use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const CLUB_NAME: &str = "CLUB F4";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerName {
    Gregory,
    Birchan,
    Peter,
    Seven,
}

impl PlayerName {
    /// Every tracked member, in display order.
    pub const MEMBERS: [PlayerName; 4] = [
        PlayerName::Gregory,
        PlayerName::Birchan,
        PlayerName::Peter,
        PlayerName::Seven,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PlayerName::Gregory => "GREGORY",
            PlayerName::Birchan => "BIRCHAN",
            PlayerName::Peter => "PETER",
            PlayerName::Seven => "SEVEN",
        }
    }

    pub fn member_code(self) -> &'static str {
        match self {
            PlayerName::Gregory => "B59",
            PlayerName::Birchan => "K341",
            PlayerName::Peter => "J71",
            PlayerName::Seven => "K396",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreEntry {
    pub player_name: PlayerName,
    pub score: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub id: String,
    pub date: NaiveDate,
    pub course: String,
    pub scores: Vec<ScoreEntry>,
}

impl Round {
    /// Score recorded for `player`, if they took part in this round.
    pub fn score_for(&self, player: PlayerName) -> Option<i32> {
        self.scores
            .iter()
            .find(|entry| entry.player_name == player)
            .map(|entry| entry.score)
    }
}

/// Fields of a round that the add/edit form may set. The id is owned by the store.
#[derive(Debug, Clone, Deserialize)]
pub struct RoundForm {
    pub date: NaiveDate,
    pub course: String,
    pub scores: Vec<ScoreEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RankingPeriod {
    #[default]
    AllTime,
    Weekly,
    Monthly,
    Quarterly,
    SemiAnnually,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_name: PlayerName,
    pub member_code: String,
    pub average_score: f64,
    pub best_score: i32,
    pub recent_score: i32,
    pub games_played: u32,
    pub total_score: i64,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub scores: BTreeMap<PlayerName, i32>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub period: RankingPeriod,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default)]
    pub all: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub period: RankingPeriod,
    pub as_of: NaiveDate,
    pub stats: Vec<PlayerStats>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub total: usize,
    pub rounds: Vec<Round>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResponse {
    pub rounds: usize,
    pub applied: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentaryResponse {
    pub text: String,
    pub loading: bool,
    pub generation: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_uses_original_wire_names() {
        let raw = r#"{
            "id": "1",
            "date": "2024-05-15",
            "course": "Green Valley Country Club",
            "scores": [{ "playerName": "GREGORY", "score": 82 }]
        }"#;
        let round: Round = serde_json::from_str(raw).expect("round should parse");
        assert_eq!(round.score_for(PlayerName::Gregory), Some(82));
        assert_eq!(round.score_for(PlayerName::Seven), None);

        let json = serde_json::to_value(&round).unwrap();
        assert_eq!(json["scores"][0]["playerName"], "GREGORY");
        assert_eq!(json["date"], "2024-05-15");
    }

    #[test]
    fn period_names_are_screaming_snake_case() {
        let period: RankingPeriod = serde_json::from_str("\"SEMI_ANNUALLY\"").unwrap();
        assert_eq!(period, RankingPeriod::SemiAnnually);
        assert_eq!(serde_json::to_string(&RankingPeriod::AllTime).unwrap(), "\"ALL_TIME\"");
    }

    #[test]
    fn trend_point_flattens_player_scores() {
        let mut scores = BTreeMap::new();
        scores.insert(PlayerName::Peter, 79);
        let point = TrendPoint {
            date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            scores,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert_eq!(json, serde_json::json!({ "date": "2024-05-15", "PETER": 79 }));
    }
}
