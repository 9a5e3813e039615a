//! eagle - Main Entry Point
//!
//! Parses the command line, applies the requested operations to one session
//! and prints the listing. The actual implementation is in the `eagle` library.

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, FromArgMatches, Parser, ValueEnum};
use eagle::{Batch, Config, Filter, LinePrompter, NewTask, Session, TemporalState};
use log::info;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SortBy {
    Groups,
}

/// Simple TODO tool for CLI
#[derive(Parser, Debug)]
#[command(name = "eagle", author, about, long_about = None, disable_version_flag = true)]
struct Args {
    /// Creates a task like: -a "do the right thing" or -a "make yo bed" 1d or -a "make yo sis bed" @20/1/2050.
    /// Frequency can be @D/M[/Y], today, tomorrow, +N, Nd, Nw, Nm, Ny or "-".
    #[arg(
        short,
        long,
        num_args = 1..=3,
        action = ArgAction::Append,
        value_names = ["TASK", "FREQUENCY", "GROUP"]
    )]
    add: Vec<String>,

    /// Removes a task from the list by its number. Cannot be undone.
    #[arg(short, long, value_name = "TASK", action = ArgAction::Append)]
    delete: Vec<usize>,

    /// Edits a task interactively. Empty answer keeps a value, a single space clears it.
    #[arg(short, long, value_name = "TASK")]
    edit: Option<usize>,

    /// Clears the list - removes all tasks and groups. No undo.
    #[arg(short, long)]
    clear: bool,

    /// Removes tasks whose date has already passed.
    #[arg(short, long)]
    prune: bool,

    /// Creates a group which can be used for managing tasks.
    #[arg(short = 'A', long, value_name = "GROUP", action = ArgAction::Append)]
    add_group: Vec<String>,

    /// Removes a group and the tasks attached to it.
    #[arg(short = 'D', long, value_name = "GROUP", action = ArgAction::Append)]
    delete_group: Vec<String>,

    /// Removes a group; its tasks are kept without a group.
    #[arg(short = 'S', long, value_name = "GROUP", action = ArgAction::Append)]
    soft_delete_group: Vec<String>,

    /// Filters tasks by group.
    #[arg(short, long, value_name = "GROUP", action = ArgAction::Append)]
    group: Vec<String>,

    /// Filters overdue tasks.
    #[arg(short = 'O', long)]
    overdue: bool,

    /// Filters today's tasks.
    #[arg(short, long)]
    today: bool,

    /// Filters tasks due in the next few days.
    #[arg(short, long)]
    upcoming: bool,

    /// Filters other tasks.
    #[arg(short, long)]
    others: bool,

    /// Filters tasks whose title contains the text.
    #[arg(short, long, value_name = "TEXT", action = ArgAction::Append)]
    search: Vec<String>,

    /// Sorts tasks by the given key.
    #[arg(long, value_enum)]
    sort: Option<SortBy>,

    /// Shows version and other useful information.
    #[arg(long)]
    version: bool,

    /// Path to the task storage file
    #[arg(short, long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

impl Args {
    fn filter(&self) -> Filter {
        let flags = [
            (self.overdue, TemporalState::Overdue),
            (self.today, TemporalState::DueToday),
            (self.upcoming, TemporalState::Upcoming),
            (self.others, TemporalState::Other),
        ];
        Filter {
            groups: self.group.clone(),
            states: flags
                .into_iter()
                .filter_map(|(set, state)| set.then_some(state))
                .collect(),
            search: self.search.clone(),
        }
    }

    fn batch(&self, tasks: Vec<NewTask>) -> Batch {
        Batch {
            tasks,
            delete: self.delete.clone(),
            edit: self.edit,
            clear: self.clear,
            prune: self.prune,
            add_groups: self.add_group.clone(),
            delete_groups: self.delete_group.clone(),
            soft_delete_groups: self.soft_delete_group.clone(),
        }
    }
}

fn setup_logging() -> Result<()> {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    // -a takes up to three values per occurrence; keep them grouped
    let new_tasks: Vec<NewTask> = matches
        .get_occurrences::<String>("add")
        .map(|occurrences| {
            occurrences
                .filter_map(|values| NewTask::from_values(&values.cloned().collect::<Vec<_>>()))
                .collect()
        })
        .unwrap_or_default();

    if args.version {
        println!("{}", eagle::about());
        return Ok(());
    }

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let storage_path = args
        .file
        .clone()
        .unwrap_or_else(|| config.storage_path.clone());
    info!("using storage {}", storage_path.display());

    let mut session = Session::open(&storage_path)
        .with_context(|| format!("Failed to open {}", storage_path.display()))?;

    let batch = args.batch(new_tasks);
    let mutates = !batch.is_empty();
    let mut prompter = LinePrompter::stdio();
    session.handle_batch(batch, &mut prompter, |message| println!("{}", message))?;

    let filter = args.filter();
    let no_flags = std::env::args_os().len() == 1;
    if no_flags || mutates || !filter.is_empty() || args.sort.is_some() {
        let by_group = config.sort_by_group || args.sort == Some(SortBy::Groups);
        print!("{}", session.handle_list(&filter, by_group));
    }

    Ok(())
}
