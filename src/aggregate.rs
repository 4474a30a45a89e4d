//! Season statistics aggregation: one forward pass over a season's matches
//! producing the full [`SeasonStats`] artifact.

use std::collections::{BTreeMap, HashMap};

use crate::fairness;
use crate::models::{
    CoinStreaks, DeckStats, FirstMove, IntervalSnapshot, MatchRecord, MidSeasonSnapshot, Outcome,
    SeasonStats, TopDecks,
};

/// Runs of identical coin results shorter than this are not recorded.
const STREAK_THRESHOLD: u32 = 3;

/// Interval snapshots are taken every this many matches.
const SNAPSHOT_INTERVAL: u32 = 20;

pub(crate) fn rate(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    f64::from(numerator) / f64::from(denominator) * 100.0
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Default)]
struct RunningCounts {
    total: u32,
    wins: u32,
    coin_wins: u32,
    first_moves: u32,
    first_move_wins: u32,
    second_move_wins: u32,
    win_coin_wins: u32,
    lose_coin_wins: u32,
}

impl RunningCounts {
    fn observe(&mut self, record: &MatchRecord) {
        self.total += 1;
        let won = record.match_res == Outcome::Win;
        if won {
            self.wins += 1;
        }

        if record.coin_res == Outcome::Win {
            self.coin_wins += 1;
            if won {
                self.win_coin_wins += 1;
            }
        } else if won {
            self.lose_coin_wins += 1;
        }

        if record.first_move == FirstMove::First {
            self.first_moves += 1;
            if won {
                self.first_move_wins += 1;
            }
        } else if won {
            self.second_move_wins += 1;
        }
    }

    fn interval_snapshot(&self) -> IntervalSnapshot {
        IntervalSnapshot {
            total_matches: self.total,
            coin_win_rate: round2(rate(self.coin_wins, self.total)),
            win_rate: round2(rate(self.wins, self.total)),
            first_move_rate: round2(rate(self.first_moves, self.total)),
            first_move_win_rate: round2(rate(self.first_move_wins, self.first_moves)),
            second_move_win_rate: round2(rate(self.second_move_wins, self.total - self.first_moves)),
            win_coin_win_rate: round2(rate(self.win_coin_wins, self.coin_wins)),
            lose_coin_win_rate: round2(rate(self.lose_coin_wins, self.total - self.coin_wins)),
        }
    }

    // Caller ensures total > 0, so the fairness tests are defined.
    fn mid_snapshot(&self) -> MidSeasonSnapshot {
        let rates = self.interval_snapshot();
        MidSeasonSnapshot {
            total_matches: self.total,
            wins: self.wins,
            coin_wins: self.coin_wins,
            first_moves: self.first_moves,
            first_move_wins: self.first_move_wins,
            second_move_wins: self.second_move_wins,
            win_coin_wins: self.win_coin_wins,
            lose_coin_wins: self.lose_coin_wins,
            win_rate: rates.win_rate,
            coin_win_rate: rates.coin_win_rate,
            first_move_rate: rates.first_move_rate,
            first_move_win_rate: rates.first_move_win_rate,
            second_move_win_rate: rates.second_move_win_rate,
            win_coin_win_rate: rates.win_coin_win_rate,
            lose_coin_win_rate: rates.lose_coin_win_rate,
            coin_fairness_test: fairness::chi_square_test(self.coin_wins, self.total),
            binom_test: fairness::binom_test(self.coin_wins, self.total),
        }
    }
}

/// Tracks maximal runs of identical coin results. Runs shorter than
/// [`STREAK_THRESHOLD`] are dropped but still break the previous run.
#[derive(Debug, Default)]
struct StreakTracker {
    current_len: u32,
    current_type: Option<Outcome>,
    summary: CoinStreaks,
}

impl StreakTracker {
    fn observe(&mut self, coin: Outcome) {
        match self.current_type {
            Some(t) if t == coin => self.current_len += 1,
            _ => {
                self.close();
                self.current_len = 1;
                self.current_type = Some(coin);
            }
        }
    }

    fn close(&mut self) {
        if self.current_len < STREAK_THRESHOLD {
            return;
        }
        match self.current_type {
            Some(Outcome::Win) => {
                self.summary.win_occurrences += 1;
                self.summary.streak_list.win.push(self.current_len);
                self.summary.max_win_streak = self.summary.max_win_streak.max(self.current_len);
            }
            Some(Outcome::Lose) => {
                self.summary.lose_occurrences += 1;
                self.summary.streak_list.lose.push(self.current_len);
                self.summary.max_lose_streak = self.summary.max_lose_streak.max(self.current_len);
            }
            None => {}
        }
    }

    /// Flush the still-open run at end of season.
    fn finish(mut self) -> CoinStreaks {
        self.close();
        self.summary
    }
}

#[derive(Debug, Default)]
struct DeckCounter {
    total: u32,
    wins: u32,
    coin_wins: u32,
}

/// Aggregate one season. Pure and deterministic: the output depends only on
/// the record sequence, in order.
pub fn analyze_season(records: &[MatchRecord]) -> SeasonStats {
    let total_matches = records.len() as u32;
    let midpoint = total_matches / 2;

    let mut counts = RunningCounts::default();
    let mut streaks = StreakTracker::default();
    let mut my_decks: BTreeMap<String, DeckCounter> = BTreeMap::new();
    let mut op_counts: Vec<(String, u32)> = Vec::new();
    let mut op_index: HashMap<String, usize> = HashMap::new();
    let mut interval_stats = Vec::new();
    let mut middle_stats = Vec::new();

    for record in records {
        counts.observe(record);
        streaks.observe(record.coin_res);

        let deck = my_decks.entry(record.my_deck.clone()).or_default();
        deck.total += 1;
        if record.match_res == Outcome::Win {
            deck.wins += 1;
        }
        if record.coin_res == Outcome::Win {
            deck.coin_wins += 1;
        }

        match op_index.get(&record.op_deck) {
            Some(&i) => op_counts[i].1 += 1,
            None => {
                op_index.insert(record.op_deck.clone(), op_counts.len());
                op_counts.push((record.op_deck.clone(), 1));
            }
        }

        if counts.total % SNAPSHOT_INTERVAL == 0 {
            interval_stats.push(counts.interval_snapshot());
        }
        if midpoint > 0 && counts.total == midpoint {
            middle_stats.push(counts.mid_snapshot());
        }
    }

    let coin_streaks = streaks.finish();

    // stable sort: opponents tied on count keep first-seen order
    op_counts.sort_by(|a, b| b.1.cmp(&a.1));
    op_counts.truncate(10);

    let my_decks = my_decks
        .into_iter()
        .map(|(deck, c)| {
            let stats = DeckStats {
                total: c.total,
                wins: c.wins,
                win_rate: round2(rate(c.wins, c.total)),
                coin_wins: c.coin_wins,
                coin_win_rate: round2(rate(c.coin_wins, c.total)),
            };
            (deck, stats)
        })
        .collect();

    // The season-level tests run against the final total, never a running
    // count; with zero matches they are undefined and stay unset.
    let (coin_fairness_test, binom_test) = if total_matches > 0 {
        (
            Some(fairness::chi_square_test(counts.coin_wins, total_matches)),
            Some(fairness::binom_test(counts.coin_wins, total_matches)),
        )
    } else {
        (None, None)
    };

    let rates = counts.interval_snapshot();
    SeasonStats {
        total_matches,
        wins: counts.wins,
        coin_wins: counts.coin_wins,
        first_moves: counts.first_moves,
        first_move_wins: counts.first_move_wins,
        second_move_wins: counts.second_move_wins,
        win_coin_wins: counts.win_coin_wins,
        lose_coin_wins: counts.lose_coin_wins,
        win_rate: rates.win_rate,
        coin_win_rate: rates.coin_win_rate,
        first_move_rate: rates.first_move_rate,
        first_move_win_rate: rates.first_move_win_rate,
        second_move_win_rate: rates.second_move_win_rate,
        win_coin_win_rate: rates.win_coin_win_rate,
        lose_coin_win_rate: rates.lose_coin_win_rate,
        coin_fairness_test,
        binom_test,
        top_10_decks: TopDecks(op_counts),
        my_decks,
        coin_streaks,
        middle_stats,
        interval_stats,
    }
}
