//! Cross-season roll-ups over a set of stats artifacts: one rate row per
//! season, or running cumulative rows where every rate is re-derived from
//! the pooled raw counts rather than averaged.

use serde::Serialize;

use crate::aggregate::{rate, round2};
use crate::models::SeasonStats;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonRow {
    pub season: u32,
    pub total_matches: u32,
    pub wins: u32,
    pub coin_wins: u32,
    pub first_moves: u32,
    pub first_move_wins: u32,
    pub second_move_wins: u32,
    pub win_coin_wins: u32,
    pub lose_coin_wins: u32,
    pub win_rate: f64,
    pub coin_win_rate: f64,
    pub first_move_rate: f64,
    pub first_move_win_rate: f64,
    pub second_move_win_rate: f64,
    pub win_coin_win_rate: f64,
    pub lose_coin_win_rate: f64,
}

/// One row per season, counts and rates taken from the artifact as-is.
pub fn season_rows(seasons: &[(u32, SeasonStats)]) -> Vec<SeasonRow> {
    seasons
        .iter()
        .map(|(season, s)| SeasonRow {
            season: *season,
            total_matches: s.total_matches,
            wins: s.wins,
            coin_wins: s.coin_wins,
            first_moves: s.first_moves,
            first_move_wins: s.first_move_wins,
            second_move_wins: s.second_move_wins,
            win_coin_wins: s.win_coin_wins,
            lose_coin_wins: s.lose_coin_wins,
            win_rate: s.win_rate,
            coin_win_rate: s.coin_win_rate,
            first_move_rate: s.first_move_rate,
            first_move_win_rate: s.first_move_win_rate,
            second_move_win_rate: s.second_move_win_rate,
            win_coin_win_rate: s.win_coin_win_rate,
            lose_coin_win_rate: s.lose_coin_win_rate,
        })
        .collect()
}

/// Running totals: row i covers every season up to and including i, with all
/// rates recomputed from the accumulated counts.
pub fn cumulative_rows(seasons: &[(u32, SeasonStats)]) -> Vec<SeasonRow> {
    let mut total_matches = 0u32;
    let mut wins = 0u32;
    let mut coin_wins = 0u32;
    let mut first_moves = 0u32;
    let mut first_move_wins = 0u32;
    let mut second_move_wins = 0u32;
    let mut win_coin_wins = 0u32;
    let mut lose_coin_wins = 0u32;

    let mut rows = Vec::with_capacity(seasons.len());
    for (season, s) in seasons {
        total_matches += s.total_matches;
        wins += s.wins;
        coin_wins += s.coin_wins;
        first_moves += s.first_moves;
        first_move_wins += s.first_move_wins;
        second_move_wins += s.second_move_wins;
        win_coin_wins += s.win_coin_wins;
        lose_coin_wins += s.lose_coin_wins;

        rows.push(SeasonRow {
            season: *season,
            total_matches,
            wins,
            coin_wins,
            first_moves,
            first_move_wins,
            second_move_wins,
            win_coin_wins,
            lose_coin_wins,
            win_rate: round2(rate(wins, total_matches)),
            coin_win_rate: round2(rate(coin_wins, total_matches)),
            first_move_rate: round2(rate(first_moves, total_matches)),
            first_move_win_rate: round2(rate(first_move_wins, first_moves)),
            second_move_win_rate: round2(rate(second_move_wins, total_matches - first_moves)),
            win_coin_win_rate: round2(rate(win_coin_wins, coin_wins)),
            lose_coin_win_rate: round2(rate(lose_coin_wins, total_matches - coin_wins)),
        });
    }
    rows
}

/// Streak lengths pooled across seasons, for the all-time streak summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PooledStreaks {
    pub win: Vec<u32>,
    pub lose: Vec<u32>,
}

pub fn pooled_streaks(seasons: &[(u32, SeasonStats)]) -> PooledStreaks {
    let mut pooled = PooledStreaks::default();
    for (_, s) in seasons {
        pooled.win.extend(&s.coin_streaks.streak_list.win);
        pooled.lose.extend(&s.coin_streaks.streak_list.lose);
    }
    pooled
}
