use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

use crate::fairness::FairnessTest;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("record {index}: missing field `{field}`")]
    MissingField { index: usize, field: &'static str },

    #[error("record {index}: invalid value `{value}` for field `{field}`")]
    InvalidValue {
        index: usize,
        field: &'static str,
        value: String,
    },
}

/// Binary outcome for both the match itself and the pre-game coin flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "win" => Some(Outcome::Win),
            "lose" => Some(Outcome::Lose),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstMove {
    First,
    Second,
}

impl FirstMove {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "first" => Some(FirstMove::First),
            "second" => Some(FirstMove::Second),
            _ => None,
        }
    }
}

/// Wire form of one match as found in a season file. Everything is optional
/// so a broken record can be reported with its index and field instead of a
/// bare serde error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawMatchRecord {
    #[serde(default)]
    pub my_deck: Option<String>,
    #[serde(default)]
    pub op_deck: Option<String>,
    #[serde(default)]
    pub first_move: Option<String>,
    #[serde(default)]
    pub match_res: Option<String>,
    #[serde(default)]
    pub coin_res: Option<String>,
    /// Free-text remark column carried over by the spreadsheet ingestion.
    #[serde(default)]
    pub notes: Option<String>,
}

/// One validated match. Insertion order in the season file is chronological
/// order, which streak detection and snapshots rely on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub my_deck: String,
    pub op_deck: String,
    pub first_move: FirstMove,
    pub match_res: Outcome,
    pub coin_res: Outcome,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl RawMatchRecord {
    pub fn validate(self, index: usize) -> Result<MatchRecord, RecordError> {
        let my_deck = require(self.my_deck, index, "my_deck")?;
        let op_deck = require(self.op_deck, index, "op_deck")?;
        let first_move = parse_field(self.first_move, index, "first_move", FirstMove::parse)?;
        let match_res = parse_field(self.match_res, index, "match_res", Outcome::parse)?;
        let coin_res = parse_field(self.coin_res, index, "coin_res", Outcome::parse)?;
        Ok(MatchRecord {
            my_deck,
            op_deck,
            first_move,
            match_res,
            coin_res,
            notes: self.notes,
        })
    }
}

/// Validate a whole season. Fails on the first bad record; silently skipping
/// one would skew every downstream rate.
pub fn validate_records(raw: Vec<RawMatchRecord>) -> Result<Vec<MatchRecord>, RecordError> {
    raw.into_iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect()
}

fn require(
    value: Option<String>,
    index: usize,
    field: &'static str,
) -> Result<String, RecordError> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(RecordError::MissingField { index, field }),
    }
}

fn parse_field<T>(
    value: Option<String>,
    index: usize,
    field: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Result<T, RecordError> {
    let raw = require(value, index, field)?;
    match parse(raw.trim()) {
        Some(v) => Ok(v),
        None => Err(RecordError::InvalidValue {
            index,
            field,
            value: raw,
        }),
    }
}

// ============ Season statistics artifact ============

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckStats {
    pub total: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub coin_wins: u32,
    pub coin_win_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StreakLists {
    pub win: Vec<u32>,
    pub lose: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoinStreaks {
    pub win_occurrences: u32,
    pub lose_occurrences: u32,
    pub max_win_streak: u32,
    pub max_lose_streak: u32,
    pub streak_list: StreakLists,
}

/// Running rates captured every 20 matches for trend charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSnapshot {
    pub total_matches: u32,
    pub coin_win_rate: f64,
    pub win_rate: f64,
    pub first_move_rate: f64,
    pub first_move_win_rate: f64,
    pub second_move_win_rate: f64,
    pub win_coin_win_rate: f64,
    pub lose_coin_win_rate: f64,
}

/// Counts, rates and fairness tests captured at match `total_matches / 2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MidSeasonSnapshot {
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
    pub coin_fairness_test: FairnessTest,
    pub binom_test: f64,
}

/// Opponent decks ranked by frequency. Serialized as a JSON object whose key
/// order is the rank order, which a plain map type would not preserve.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TopDecks(pub Vec<(String, u32)>);

impl Serialize for TopDecks {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (deck, count) in &self.0 {
            map.serialize_entry(deck, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TopDecks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TopDecksVisitor;

        impl<'de> Visitor<'de> for TopDecksVisitor {
            type Value = TopDecks;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of deck name to match count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<TopDecks, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, u32>()? {
                    entries.push(entry);
                }
                Ok(TopDecks(entries))
            }
        }

        deserializer.deserialize_map(TopDecksVisitor)
    }
}

/// The per-season artifact; written once, then read-only input for every
/// downstream consumer. Rates are percentages rounded to two decimals; any
/// rate with a zero denominator is 0. The fairness fields are `None` only
/// for a season with zero matches, where the tests are undefined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStats {
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
    pub coin_fairness_test: Option<FairnessTest>,
    pub binom_test: Option<f64>,
    pub top_10_decks: TopDecks,
    pub my_decks: BTreeMap<String, DeckStats>,
    pub coin_streaks: CoinStreaks,
    pub middle_stats: Vec<MidSeasonSnapshot>,
    pub interval_stats: Vec<IntervalSnapshot>,
}
