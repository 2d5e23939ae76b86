use crate::models::{RankingPeriod, Round};
use chrono::{Datelike, NaiveDate};

const WEEK_WINDOW_DAYS: i64 = 7;

/// Rounds whose date falls inside `period` as seen from `today`, in collection order.
///
/// `Weekly` is a rolling window `[today - 7 days, today]`. The other periods
/// compare calendar buckets, so a future-dated round in the current
/// month/quarter/half/year still counts for them.
pub fn filter_rounds<'a>(rounds: &'a [Round], period: RankingPeriod, today: NaiveDate) -> Vec<&'a Round> {
    rounds
        .iter()
        .filter(|round| in_period(round.date, period, today))
        .collect()
}

pub fn in_period(date: NaiveDate, period: RankingPeriod, today: NaiveDate) -> bool {
    match period {
        RankingPeriod::AllTime => true,
        RankingPeriod::Weekly => {
            let diff = (today - date).num_days();
            (0..=WEEK_WINDOW_DAYS).contains(&diff)
        }
        RankingPeriod::Monthly => date.year() == today.year() && date.month0() == today.month0(),
        RankingPeriod::Quarterly => {
            date.year() == today.year() && date.month0() / 3 == today.month0() / 3
        }
        RankingPeriod::SemiAnnually => {
            date.year() == today.year() && date.month0() / 6 == today.month0() / 6
        }
        RankingPeriod::Yearly => date.year() == today.year(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PlayerName, ScoreEntry};

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn round(id: &str, date: NaiveDate) -> Round {
        Round {
            id: id.to_string(),
            date,
            course: "Course".to_string(),
            scores: vec![ScoreEntry {
                player_name: PlayerName::Gregory,
                score: 80,
            }],
        }
    }

    fn ids(rounds: &[&Round]) -> Vec<String> {
        rounds.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn weekly_boundary_is_inclusive_at_seven_days() {
        let today = day(2024, 6, 17);
        let rounds = vec![
            round("seven", day(2024, 6, 10)),
            round("eight", day(2024, 6, 9)),
            round("today", today),
        ];
        let filtered = filter_rounds(&rounds, RankingPeriod::Weekly, today);
        assert_eq!(ids(&filtered), vec!["seven", "today"]);
    }

    #[test]
    fn weekly_excludes_future_rounds_but_calendar_periods_keep_them() {
        let today = day(2024, 6, 17);
        let rounds = vec![round("tomorrow", day(2024, 6, 18))];

        assert!(filter_rounds(&rounds, RankingPeriod::Weekly, today).is_empty());
        for period in [
            RankingPeriod::Monthly,
            RankingPeriod::Quarterly,
            RankingPeriod::SemiAnnually,
            RankingPeriod::Yearly,
            RankingPeriod::AllTime,
        ] {
            assert_eq!(filter_rounds(&rounds, period, today).len(), 1, "{period:?}");
        }
    }

    #[test]
    fn calendar_buckets_use_zero_based_months() {
        let today = day(2024, 6, 17);
        let rounds = vec![
            round("apr", day(2024, 4, 1)),
            round("mar", day(2024, 3, 31)),
            round("jan", day(2024, 1, 2)),
            round("jul", day(2024, 7, 1)),
            round("last-june", day(2023, 6, 17)),
        ];

        assert!(ids(&filter_rounds(&rounds, RankingPeriod::Monthly, today)).is_empty());
        assert_eq!(ids(&filter_rounds(&rounds, RankingPeriod::Quarterly, today)), vec!["apr"]);
        assert_eq!(
            ids(&filter_rounds(&rounds, RankingPeriod::SemiAnnually, today)),
            vec!["apr", "mar", "jan"]
        );
        assert_eq!(
            ids(&filter_rounds(&rounds, RankingPeriod::Yearly, today)),
            vec!["apr", "mar", "jan", "jul"]
        );
    }

    #[test]
    fn all_time_returns_everything_in_order() {
        let today = day(2024, 6, 17);
        let rounds = vec![round("b", day(2024, 6, 1)), round("a", day(2020, 1, 1))];
        let filtered = filter_rounds(&rounds, RankingPeriod::AllTime, today);
        assert_eq!(ids(&filtered), vec!["b", "a"]);
    }
}
