use clap::{Parser, Subcommand};
use sage_core::database::SqliteStorage;
use sage_core::export::json::{export_json_to_path, import_json, restore};
use sage_core::metadata::{LeetCodeExtractor, MetadataExtractor, SlugExtractor};
use sage_core::models::{ProblemId, dates, roadmap};
use sage_core::{Config, NewProblem, PracticeTracker, ProblemRecord};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sage", about = "Practice problem tracker with spaced review", version)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "SAGE_DB")]
    db: Option<PathBuf>,

    /// User whose problems are tracked
    #[arg(long, global = true, env = "SAGE_USER")]
    user: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Log a solved problem
    Add {
        /// Problem URL
        url: String,
        /// Title (looked up from the URL when omitted)
        #[arg(long)]
        title: Option<String>,
        /// Pattern label, e.g. "Two Pointers"
        #[arg(long, default_value = "")]
        pattern: String,
        #[arg(long, default_value = "")]
        notes: String,
        /// Solve date as YYYY-MM-DD (defaults to today)
        #[arg(long)]
        solved: Option<String>,
        /// Mark as mastered; no reviews are scheduled
        #[arg(long)]
        mastered: bool,
        /// Skip the online metadata lookup
        #[arg(long)]
        offline: bool,
    },

    /// List all problems, most recently solved first
    List,

    /// Mark a problem as reviewed
    Review { id: ProblemId },

    /// Delete a problem
    Delete { id: ProblemId },

    /// Problems due for review today
    Due,

    /// Solve activity over the last 52 weeks
    Heatmap,

    /// Unmastered problems grouped by pattern
    Patterns,

    /// Summary counts
    Stats,

    /// Curriculum roadmap
    Roadmap,

    /// Look up metadata for a problem URL
    Extract {
        url: String,
        #[arg(long)]
        offline: bool,
    },

    /// Write all problems to a JSON file
    Export { path: PathBuf },

    /// Add problems from a JSON backup
    Import { path: PathBuf },
}

fn extractor(offline: bool) -> anyhow::Result<Box<dyn MetadataExtractor>> {
    if offline {
        Ok(Box::new(SlugExtractor))
    } else {
        Ok(Box::new(LeetCodeExtractor::new()?))
    }
}

fn print_problem(problem: &ProblemRecord) {
    let status = if problem.mastery_achieved {
        "mastered".to_string()
    } else {
        match problem.next_review() {
            Some(next) => format!("review {} on {}", problem.review_count + 1, next),
            None => "no review scheduled".to_string(),
        }
    };
    let pattern = if problem.pattern.is_empty() {
        String::new()
    } else {
        format!(" [{}]", problem.pattern)
    };
    println!(
        "{:>5}  {}  {}{}  ({})",
        problem.id, problem.solved_date, problem.title, pattern, status
    );
}

fn heat_char(count: usize) -> char {
    match count {
        0 => '.',
        1 => '░',
        2 => '▒',
        3 => '▓',
        _ => '█',
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::new(cli.db, cli.user);
    let today = dates::today();

    let storage = SqliteStorage::open(&config.database_path)?;
    let mut tracker = PracticeTracker::new(storage, config.user_id.clone());
    tracker.load()?;

    match cli.command {
        Command::Add {
            url,
            title,
            pattern,
            notes,
            solved,
            mastered,
            offline,
        } => {
            let mut new_problem = NewProblem {
                url,
                title: title.unwrap_or_default(),
                notes,
                solved_date: solved,
                mastery_achieved: mastered,
                pattern,
                ..Default::default()
            };
            if new_problem.needs_metadata() {
                match extractor(offline).and_then(|e| Ok(e.extract(&new_problem.url)?)) {
                    Ok(metadata) => metadata.fill(&mut new_problem),
                    Err(err) => log::warn!("Metadata lookup failed: {}", err),
                }
            }
            let record = tracker.add(new_problem, today)?;
            print_problem(&record);
        }
        Command::List => {
            for problem in tracker.snapshot().iter() {
                print_problem(problem);
            }
        }
        Command::Review { id } => {
            let update = tracker.mark_reviewed(id, today)?;
            match update.next_review_date {
                Some(next) => println!("Review {} done, next review on {}", update.review_count, next),
                None => println!("Mastered after {} reviews", update.review_count),
            }
        }
        Command::Delete { id } => {
            tracker.delete(id)?;
            println!("Deleted problem {}", id);
        }
        Command::Due => {
            let overview = tracker.overview(today);
            if overview.needs_review.is_empty() {
                println!("Nothing due for review");
            }
            for problem in &overview.needs_review {
                print_problem(problem);
            }
        }
        Command::Heatmap => {
            let overview = tracker.overview(today);
            // One output row per weekday position, one column per week
            for day in 0..7 {
                let row: String = overview.weeks.iter().map(|w| heat_char(w[day].count)).collect();
                println!("{}", row);
            }
            println!(
                "{} to {}",
                overview.weeks[0][0].date, overview.weeks[overview.weeks.len() - 1][6].date
            );
        }
        Command::Patterns => {
            let overview = tracker.overview(today);
            for (pattern, problems) in &overview.problems_by_pattern {
                println!("{} ({})", pattern, problems.len());
                for problem in problems {
                    println!("    {}", problem.title);
                }
            }
        }
        Command::Stats => {
            let stats = tracker.overview(today).stats;
            println!("Solved this year: {}", stats.total_this_year);
            println!("Solved today:     {}", stats.solved_today);
            println!("Active days:      {}", stats.active_days);
        }
        Command::Roadmap => {
            for row in roadmap::rows() {
                let height = row.iter().map(|p| p.items.len()).max().unwrap_or(0);
                let header: String = row.iter().map(|p| format!("{:<60}", p.title)).collect();
                println!("{}", header.trim_end());
                for i in 0..height {
                    let line: String = row
                        .iter()
                        .map(|p| match p.items.get(i) {
                            Some(step) => format!("{:<60}", format!("  - {}", step.title)),
                            None => format!("{:<60}", ""),
                        })
                        .collect();
                    println!("{}", line.trim_end());
                }
                println!();
            }
        }
        Command::Extract { url, offline } => {
            let metadata = extractor(offline)?.extract(&url)?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Command::Export { path } => {
            export_json_to_path(&tracker.snapshot(), &path)?;
            println!("Exported to {}", path.display());
        }
        Command::Import { path } => {
            let problems = import_json(&path)?;
            let stored = restore(tracker.storage(), &config.user_id, &problems)?;
            println!("Imported {} problems", stored);
        }
    }

    Ok(())
}
