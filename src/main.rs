use minimal_pairs_app::*;

use catalog::{builtin_categories, find_category, load_categories};
use clap::{Parser, Subcommand};
use constants::{DEFAULT_DB_PATH, VISIBLE_PAIRS_LIMIT};
use database::{KeyValueStore, SqliteStore, preferences, session_history};
use export::json::{export_json_to_path, restore_from_path};
use i18n::{Locale, TranslationKey, translate};
use log::{info, warn};
use models::contrast::{pairs_at_difficulty, playback_rate, visible_pairs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "minimal-pairs", about = "Minimal-pairs listening trainer")]
struct Cli {
    /// SQLite file holding progress.
    #[arg(long, global = true, default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Optional JSON config overriding the defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra pair categories as a JSON array; replaces the built-in set.
    #[arg(long, global = true)]
    categories: Option<PathBuf>,

    /// Interface language label, e.g. "日本語". Saved for later runs.
    #[arg(long, global = true)]
    locale: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Lists the pairs currently offered per contrast group.
    Pairs {
        #[arg(long)]
        category: Option<String>,
        /// List every pair at this lexical tier instead of one per group.
        #[arg(long)]
        difficulty: Option<u8>,
    },
    /// Records one answer for a pair ID.
    Record {
        pair_id: String,
        #[arg(long)]
        wrong: bool,
        #[arg(long, default_value_t = 0.0)]
        duration_min: f64,
        /// Response time; drives the speed tier when the pair is in the catalog.
        #[arg(long)]
        response_ms: Option<i64>,
    },
    /// Prints accuracy and practice time per pair.
    Report {
        #[arg(long)]
        category: Option<String>,
    },
    /// Archives and lists practice sessions for a pair ID.
    Sessions {
        pair_id: String,
    },
    Export {
        path: PathBuf,
    },
    Import {
        path: PathBuf,
    },
    /// Deletes all recorded progress.
    Reset,
}

/// Named category, or the one selected last time. Naming one remembers it.
fn select_category<'a>(
    categories: &'a [Category],
    store: &impl KeyValueStore,
    name: Option<&str>,
) -> Option<&'a Category> {
    match name {
        Some(name) => {
            if let Some(index) = categories.iter().position(|c| c.category == name) {
                preferences::save_category_index(store, index);
            }
            find_category(categories, name)
        }
        None => categories.get(preferences::load_category_index(store)),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TrainerConfig::load(path)?,
        None => TrainerConfig::default(),
    };
    let categories = match &cli.categories {
        Some(path) => load_categories(path)?,
        None => builtin_categories(),
    };

    let store = SqliteStore::open(&cli.db)?;
    let locale = match cli.locale.as_deref() {
        Some(label) => match Locale::from_label(label) {
            Some(locale) => {
                preferences::save_language(&store, locale);
                locale
            }
            None => {
                warn!("Unknown locale '{}', keeping the saved one", label);
                preferences::load_language(&store)
            }
        },
        None => preferences::load_language(&store),
    };

    match cli.command {
        Command::Pairs {
            category,
            difficulty,
        } => {
            let Some(category) = select_category(&categories, &store, category.as_deref()) else {
                println!("No pairs found");
                return Ok(());
            };
            let tracker = ProgressTracker::load(&store, config);
            println!("{} ({})", translate(locale, TranslationKey::PracticePairs), category.category);
            let pairs = match difficulty {
                Some(tier) => pairs_at_difficulty(&category.pairs, tier, VISIBLE_PAIRS_LIMIT),
                None => visible_pairs(&category.pairs, &category.category, tracker.controller()),
            };
            for pair in pairs {
                println!(
                    "  {} / {}  [{} {}]  tier {}  x{:.1}  {}",
                    pair.word1,
                    pair.word2,
                    pair.ipa1,
                    pair.ipa2,
                    pair.difficulty,
                    playback_rate(pair, &category.category, tracker.controller(), tracker.config()),
                    pair.id(&category.category)
                );
            }
        }
        Command::Record {
            pair_id,
            wrong,
            duration_min,
            response_ms,
        } => {
            let mut tracker = ProgressTracker::load(&store, config);
            let known = categories.iter().find_map(|c| {
                c.pairs
                    .iter()
                    .find(|p| p.id(&c.category) == pair_id)
                    .map(|p| (c.category.clone(), p.clone()))
            });
            match (known, response_ms) {
                (Some((category, pair)), Some(rt)) => {
                    let change = tracker.submit_answer(&category, &pair, !wrong, rt, duration_min);
                    info!("Recorded answer for {}: {:?}", pair_id, change);
                }
                _ => {
                    tracker.record_attempt(&pair_id, !wrong, duration_min);
                    info!("Recorded attempt for {}", pair_id);
                }
            }
        }
        Command::Report { category } => {
            let Some(category) = select_category(&categories, &store, category.as_deref()) else {
                println!("No pairs found");
                return Ok(());
            };
            let tracker = ProgressTracker::load(&store, config);
            println!("{} ({})", translate(locale, TranslationKey::AccuracyTrend), category.category);
            for pair in &category.pairs {
                let id = pair.id(&category.category);
                let summary = tracker.summary(&id);
                if summary.total == 0 {
                    continue;
                }
                println!("{} / {}", pair.word1, pair.word2);
                println!(
                    "  {}: {}  {}: {:.0}%  {}: {:.0} / {:.0} {}",
                    translate(locale, TranslationKey::Total),
                    summary.total,
                    translate(locale, TranslationKey::WeightedAverage),
                    summary.weighted_accuracy * 100.0,
                    translate(locale, TranslationKey::TimePracticed),
                    summary.active_minutes,
                    tracker.config().practice_goal_minutes,
                    translate(locale, TranslationKey::Min),
                );
                for point in &summary.series {
                    println!(
                        "    {}  {:>5.1}%  {:.1} {}",
                        point.time_label,
                        point.accuracy * 100.0,
                        point.cumulative_time_min,
                        translate(locale, TranslationKey::Min)
                    );
                }
            }
        }
        Command::Sessions { pair_id } => {
            let tracker = ProgressTracker::load(&store, config);
            let added = tracker.archive_sessions(&pair_id);
            info!("Archived {} new sessions", added);
            for session in session_history::get_pair_sessions(&store, &pair_id) {
                let end = session.end_time.unwrap_or(session.start_time);
                let minutes = end.saturating_sub(session.start_time) as f64 / constants::MS_PER_MINUTE;
                println!(
                    "{}  {}/{}  {:.1} {}",
                    session.session_id,
                    session.correct,
                    session.attempts,
                    minutes,
                    translate(locale, TranslationKey::Min)
                );
            }
        }
        Command::Export { path } => {
            let tracker = ProgressTracker::load(&store, config);
            export_json_to_path(tracker.progress(), &path)?;
        }
        Command::Import { path } => {
            let log = database::AttemptLog::new(&store, config.max_attempts_per_id);
            let count = restore_from_path(&log, &path)?;
            println!("Imported {} pairs", count);
        }
        Command::Reset => {
            let mut tracker = ProgressTracker::load(&store, config);
            tracker.reset_all();
            println!("Progress cleared");
        }
    }

    Ok(())
}
