use crate::models::{RankingPeriod, Round, TrendPoint};
use crate::period::filter_rounds;
use chrono::{Local, NaiveDate};

pub fn build_trend(rounds: &[Round], period: RankingPeriod) -> Vec<TrendPoint> {
    build_trend_at(Local::now().date_naive(), rounds, period)
}

pub fn build_trend_at(today: NaiveDate, rounds: &[Round], period: RankingPeriod) -> Vec<TrendPoint> {
    trend_series(&filter_rounds(rounds, period, today))
}

/// One point per round, oldest first. Rounds on the same date keep their
/// collection order; players absent from a round get no entry for that point.
pub fn trend_series(rounds: &[&Round]) -> Vec<TrendPoint> {
    let mut ordered = rounds.to_vec();
    ordered.sort_by_key(|round| round.date);

    ordered
        .into_iter()
        .map(|round| TrendPoint {
            date: round.date,
            scores: round
                .scores
                .iter()
                .map(|entry| (entry.player_name, entry.score))
                .collect(),
        })
        .collect()
}
