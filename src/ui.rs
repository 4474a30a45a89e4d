use comfy_table::{presets::UTF8_FULL, Table};

use crate::models::SeasonStats;
use crate::totals::{PooledStreaks, SeasonRow};

pub fn print_season_summary(season: u32, stats: &SeasonStats) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Stat", "Value"]);

    table.add_row(vec!["Total Matches", &stats.total_matches.to_string()]);
    table.add_row(vec!["Wins", &stats.wins.to_string()]);
    table.add_row(vec!["Win Rate", &fmt_rate(stats.win_rate)]);
    table.add_row(vec!["Coin Wins", &stats.coin_wins.to_string()]);
    table.add_row(vec!["Coin Win Rate", &fmt_rate(stats.coin_win_rate)]);
    table.add_row(vec!["First Moves", &stats.first_moves.to_string()]);
    table.add_row(vec!["First Move Rate", &fmt_rate(stats.first_move_rate)]);
    table.add_row(vec!["First Move Win Rate", &fmt_rate(stats.first_move_win_rate)]);
    table.add_row(vec!["Second Move Win Rate", &fmt_rate(stats.second_move_win_rate)]);
    table.add_row(vec!["Win Rate After Coin Win", &fmt_rate(stats.win_coin_win_rate)]);
    table.add_row(vec!["Win Rate After Coin Loss", &fmt_rate(stats.lose_coin_win_rate)]);

    match (&stats.coin_fairness_test, stats.binom_test) {
        (Some(chi), Some(binom)) => {
            table.add_row(vec!["Chi-Square", &format!("{:.4}", chi.chi2_statistic)]);
            table.add_row(vec!["Chi-Square p-value", &format!("{:.4}", chi.p_value)]);
            table.add_row(vec![
                "Coin Verdict",
                if chi.is_fair { "fair" } else { "suspicious" },
            ]);
            table.add_row(vec!["Binomial p-value", &format!("{:.4}", binom)]);
        }
        _ => {
            table.add_row(vec!["Coin Fairness", "not applicable (no matches)"]);
        }
    }

    println!("\n== Season {} ==\n{}", season, table);
}

pub fn print_my_decks(stats: &SeasonStats) {
    if stats.my_decks.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["My Deck", "Matches", "Wins", "Win Rate", "Coin Wins", "Coin Win Rate"]);

    for (deck, d) in &stats.my_decks {
        table.add_row(vec![
            deck.clone(),
            d.total.to_string(),
            d.wins.to_string(),
            fmt_rate(d.win_rate),
            d.coin_wins.to_string(),
            fmt_rate(d.coin_win_rate),
        ]);
    }
    println!("\n== My Decks ==\n{}", table);
}

pub fn print_top_decks(stats: &SeasonStats) {
    if stats.top_10_decks.0.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Rank", "Opponent Deck", "Matches"]);

    for (rank, (deck, count)) in stats.top_10_decks.0.iter().enumerate() {
        table.add_row(vec![(rank + 1).to_string(), deck.clone(), count.to_string()]);
    }
    println!("\n== Most Frequent Opponents ==\n{}", table);
}

pub fn print_streaks(stats: &SeasonStats) {
    let s = &stats.coin_streaks;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Streak Type", "Occurrences", "Max Length", "Lengths"]);
    table.add_row(vec![
        "coin win".to_string(),
        s.win_occurrences.to_string(),
        s.max_win_streak.to_string(),
        fmt_lengths(&s.streak_list.win),
    ]);
    table.add_row(vec![
        "coin loss".to_string(),
        s.lose_occurrences.to_string(),
        s.max_lose_streak.to_string(),
        fmt_lengths(&s.streak_list.lose),
    ]);
    println!("\n== Coin Streaks (3+) ==\n{}", table);
}

pub fn print_season_rows(title: &str, rows: &[SeasonRow]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec![
        "Season", "Matches", "Win%", "Coin Win%", "First%", "First Win%", "Second Win%",
        "Coin-Won Win%", "Coin-Lost Win%",
    ]);

    for r in rows {
        table.add_row(vec![
            r.season.to_string(),
            r.total_matches.to_string(),
            format!("{:.2}", r.win_rate),
            format!("{:.2}", r.coin_win_rate),
            format!("{:.2}", r.first_move_rate),
            format!("{:.2}", r.first_move_win_rate),
            format!("{:.2}", r.second_move_win_rate),
            format!("{:.2}", r.win_coin_win_rate),
            format!("{:.2}", r.lose_coin_win_rate),
        ]);
    }
    println!("\n== {} ==\n{}", title, table);
}

pub fn print_pooled_streaks(pooled: &PooledStreaks) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Streak Type", "Occurrences", "Max Length"]);
    table.add_row(vec![
        "coin win".to_string(),
        pooled.win.len().to_string(),
        pooled.win.iter().max().copied().unwrap_or(0).to_string(),
    ]);
    table.add_row(vec![
        "coin loss".to_string(),
        pooled.lose.len().to_string(),
        pooled.lose.iter().max().copied().unwrap_or(0).to_string(),
    ]);
    println!("\n== All-Time Coin Streaks (3+) ==\n{}", table);
}

fn fmt_rate(v: f64) -> String {
    format!("{:.2}%", v)
}

fn fmt_lengths(lengths: &[u32]) -> String {
    if lengths.is_empty() {
        return "-".into();
    }
    lengths.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(", ")
}
