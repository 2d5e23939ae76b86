use crate::models::{LeaderboardResponse, PlayerName, PlayerStats, RankingPeriod, Round};
use crate::period::filter_rounds;
use chrono::{Local, NaiveDate};
use std::cmp::Ordering;

pub fn build_leaderboard(rounds: &[Round], period: RankingPeriod) -> LeaderboardResponse {
    build_leaderboard_at(Local::now().date_naive(), rounds, period)
}

pub fn build_leaderboard_at(
    today: NaiveDate,
    rounds: &[Round],
    period: RankingPeriod,
) -> LeaderboardResponse {
    let filtered = filter_rounds(rounds, period, today);
    LeaderboardResponse {
        period,
        as_of: today,
        stats: build_player_stats(&filtered, rounds),
    }
}

/// Per-member statistics over `filtered`, sorted and ranked by average score.
///
/// `recent_score` always comes from `history`, the unfiltered collection.
/// Members without games in `filtered` have an average of zero and are
/// ranked after everyone else; equal averages keep member order.
pub fn build_player_stats(filtered: &[&Round], history: &[Round]) -> Vec<PlayerStats> {
    let mut stats: Vec<PlayerStats> = PlayerName::MEMBERS
        .iter()
        .map(|&player| player_stats(player, filtered, history))
        .collect();

    stats.sort_by(compare_average);
    for (index, entry) in stats.iter_mut().enumerate() {
        entry.rank = index as u32 + 1;
    }
    stats
}

fn player_stats(player: PlayerName, filtered: &[&Round], history: &[Round]) -> PlayerStats {
    // A zero score counts as "not played".
    let scores: Vec<i32> = filtered
        .iter()
        .filter_map(|round| round.score_for(player))
        .filter(|&score| score != 0)
        .collect();

    let games_played = scores.len() as u32;
    let total_score: i64 = scores.iter().map(|&score| i64::from(score)).sum();
    let average_score = if games_played == 0 {
        0.0
    } else {
        total_score as f64 / f64::from(games_played)
    };
    let best_score = scores.iter().copied().min().unwrap_or(0);

    PlayerStats {
        player_name: player,
        member_code: player.member_code().to_string(),
        average_score,
        best_score,
        recent_score: recent_score(player, history),
        games_played,
        total_score,
        rank: 0,
    }
}

/// Score from the latest-dated round the player appears in. On a date tie the
/// round that comes first in the collection wins.
fn recent_score(player: PlayerName, history: &[Round]) -> i32 {
    let mut latest: Option<(NaiveDate, i32)> = None;
    for round in history {
        let Some(score) = round.score_for(player) else {
            continue;
        };
        match latest {
            Some((date, _)) if round.date <= date => {}
            _ => latest = Some((round.date, score)),
        }
    }
    latest.map(|(_, score)| score).unwrap_or(0)
}

fn compare_average(a: &PlayerStats, b: &PlayerStats) -> Ordering {
    match (a.average_score == 0.0, b.average_score == 0.0) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a
            .average_score
            .partial_cmp(&b.average_score)
            .unwrap_or(Ordering::Equal),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScoreEntry;
    use crate::store::seed_rounds;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn round(id: &str, date: NaiveDate, scores: &[(PlayerName, i32)]) -> Round {
        Round {
            id: id.to_string(),
            date,
            course: "Course".to_string(),
            scores: scores
                .iter()
                .map(|&(player_name, score)| ScoreEntry { player_name, score })
                .collect(),
        }
    }

    fn find(stats: &[PlayerStats], player: PlayerName) -> &PlayerStats {
        stats
            .iter()
            .find(|s| s.player_name == player)
            .expect("missing player")
    }

    #[test]
    fn seed_rounds_rank_by_ascending_average() {
        let rounds = seed_rounds();
        let board = build_leaderboard_at(day(2024, 6, 17), &rounds, RankingPeriod::AllTime);
        let stats = board.stats;

        let order: Vec<PlayerName> = stats.iter().map(|s| s.player_name).collect();
        assert_eq!(
            order,
            vec![
                PlayerName::Peter,
                PlayerName::Gregory,
                PlayerName::Birchan,
                PlayerName::Seven
            ]
        );
        assert_eq!(find(&stats, PlayerName::Gregory).average_score, 81.0);
        assert_eq!(find(&stats, PlayerName::Birchan).average_score, 83.5);
        assert_eq!(find(&stats, PlayerName::Peter).average_score, 80.0);
        assert_eq!(find(&stats, PlayerName::Seven).average_score, 86.0);
        assert_eq!(find(&stats, PlayerName::Peter).rank, 1);
        assert_eq!(find(&stats, PlayerName::Seven).rank, 4);

        let gregory = find(&stats, PlayerName::Gregory);
        assert_eq!(gregory.best_score, 80);
        assert_eq!(gregory.total_score, 162);
        assert_eq!(gregory.games_played, 2);
        assert_eq!(gregory.recent_score, 80);
        assert_eq!(gregory.member_code, "B59");
    }

    #[test]
    fn players_without_games_sink_to_the_bottom() {
        let rounds = vec![round(
            "1",
            day(2024, 6, 1),
            &[(PlayerName::Seven, 110), (PlayerName::Birchan, 70)],
        )];
        let filtered: Vec<&Round> = rounds.iter().collect();
        let stats = build_player_stats(&filtered, &rounds);

        assert_eq!(stats[0].player_name, PlayerName::Birchan);
        assert_eq!(stats[1].player_name, PlayerName::Seven);
        for idle in &stats[2..] {
            assert_eq!(idle.average_score, 0.0);
            assert_eq!(idle.best_score, 0);
            assert_eq!(idle.games_played, 0);
        }
        // Idle players keep member order among themselves.
        assert_eq!(stats[2].player_name, PlayerName::Gregory);
        assert_eq!(stats[3].player_name, PlayerName::Peter);
    }

    #[test]
    fn recent_score_ignores_the_period_filter() {
        let rounds = vec![
            round("old", day(2023, 1, 10), &[(PlayerName::Peter, 90)]),
            round("new", day(2024, 6, 15), &[(PlayerName::Gregory, 77)]),
        ];
        let board = build_leaderboard_at(day(2024, 6, 17), &rounds, RankingPeriod::Weekly);

        let peter = find(&board.stats, PlayerName::Peter);
        assert_eq!(peter.games_played, 0);
        assert_eq!(peter.recent_score, 90);
        assert_eq!(find(&board.stats, PlayerName::Seven).recent_score, 0);
    }

    #[test]
    fn recent_score_uses_latest_date_not_storage_order() {
        let rounds = vec![
            round("late", day(2024, 6, 10), &[(PlayerName::Gregory, 75)]),
            round("early", day(2024, 5, 1), &[(PlayerName::Gregory, 99)]),
        ];
        let filtered: Vec<&Round> = rounds.iter().collect();
        let stats = build_player_stats(&filtered, &rounds);
        assert_eq!(find(&stats, PlayerName::Gregory).recent_score, 75);
    }

    #[test]
    fn tied_averages_get_consecutive_ranks() {
        let rounds = vec![round(
            "1",
            day(2024, 6, 1),
            &[
                (PlayerName::Gregory, 80),
                (PlayerName::Birchan, 80),
                (PlayerName::Peter, 80),
                (PlayerName::Seven, 80),
            ],
        )];
        let filtered: Vec<&Round> = rounds.iter().collect();
        let stats = build_player_stats(&filtered, &rounds);
        let ranks: Vec<u32> = stats.iter().map(|s| s.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
        assert_eq!(stats[0].player_name, PlayerName::Gregory);
    }

    #[test]
    fn empty_collection_still_ranks_every_member() {
        let stats = build_player_stats(&[], &[]);
        let mut ranks: Vec<u32> = stats.iter().map(|s| s.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, vec![1, 2, 3, 4]);
    }
}
