mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};

use duelstats_cli::{aggregate, store, totals, ui};

fn main() {
    let _ = dotenvy::dotenv();

    if let Err(err) = run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    use cli::{Args, Command};

    let args = Args::parse();
    let data_dir = resolve_data_dir(args.data_dir.clone());

    match args.command {
        Command::Analyze { from, to, season } => {
            let (from, to) = match season {
                Some(n) => (n, n),
                None => (from, to),
            };
            anyhow::ensure!(from <= to, "--from ({from}) must not exceed --to ({to})");
            run_analyze(&data_dir, from, to)
        }
        Command::Show { season } => run_show(&data_dir, season, args.json),
        Command::Totals { cumulative } => run_totals(&data_dir, cumulative, args.json),
    }
}

fn resolve_data_dir(flag: Option<PathBuf>) -> PathBuf {
    flag.unwrap_or_else(|| {
        std::env::var("DUELSTATS_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data"))
    })
}

fn run_analyze(data_dir: &Path, from: u32, to: u32) -> Result<()> {
    let mut processed = 0u32;
    let mut failed = 0u32;

    for season in from..=to {
        let input = store::season_path(data_dir, season);
        let records = match store::load_season(&input) {
            Ok(records) => records,
            Err(store::StoreError::Missing(path)) => {
                eprintln!("Warning: {} does not exist, skipping.", path.display());
                continue;
            }
            // bad data is reported, not recovered; the rest of the batch goes on
            Err(err @ (store::StoreError::Invalid { .. } | store::StoreError::Json { .. })) => {
                eprintln!("Warning: season {season} failed: {err}");
                failed += 1;
                continue;
            }
            Err(err) => {
                return Err(err).with_context(|| format!("season {season}"));
            }
        };

        if records.is_empty() {
            eprintln!("Warning: season {season} has no matches; fairness tests not applicable.");
        }

        let stats = aggregate::analyze_season(&records);
        let output = store::stats_path(data_dir, season);
        store::save_stats(&output, &stats)
            .with_context(|| format!("failed to write stats for season {season}"))?;

        println!(
            "season {season}: {} matches, win rate {:.2}%, coin win rate {:.2}% -> {}",
            stats.total_matches,
            stats.win_rate,
            stats.coin_win_rate,
            output.display()
        );
        processed += 1;
    }

    println!("Done. {processed} season(s) processed, {failed} failed.");
    Ok(())
}

fn run_show(data_dir: &Path, season: u32, want_json: bool) -> Result<()> {
    let path = store::stats_path(data_dir, season);
    let stats = store::load_stats(&path)
        .with_context(|| format!("no stats artifact for season {season}; run `analyze` first"))?;

    if want_json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    ui::print_season_summary(season, &stats);
    ui::print_my_decks(&stats);
    ui::print_top_decks(&stats);
    ui::print_streaks(&stats);
    Ok(())
}

fn run_totals(data_dir: &Path, cumulative: bool, want_json: bool) -> Result<()> {
    let stats_dir = data_dir.join("stats");
    let artifacts = store::discover_stats(&stats_dir)
        .with_context(|| format!("failed to scan {}", stats_dir.display()))?;
    anyhow::ensure!(
        !artifacts.is_empty(),
        "no stats artifacts in {}; run `analyze` first",
        stats_dir.display()
    );

    let mut seasons = Vec::with_capacity(artifacts.len());
    for (season, path) in artifacts {
        let stats =
            store::load_stats(&path).with_context(|| format!("season {season} artifact"))?;
        seasons.push((season, stats));
    }

    let rows = if cumulative {
        totals::cumulative_rows(&seasons)
    } else {
        totals::season_rows(&seasons)
    };

    if want_json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let title = if cumulative {
        "Cumulative Season Totals"
    } else {
        "Season Overview"
    };
    ui::print_season_rows(title, &rows);

    if cumulative {
        ui::print_pooled_streaks(&totals::pooled_streaks(&seasons));
    }
    Ok(())
}
