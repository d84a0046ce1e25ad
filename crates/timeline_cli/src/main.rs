//! `timeline` command-line front end.
//!
//! # Responsibility
//! - Map subcommands onto `EventEditor` operations.
//! - Print the grouped timeline after every write.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use timeline_core::db::open_db;
use timeline_core::model::event::normalize_label;
use timeline_core::{
    core_version, export_png, format_year, init_logging, layout_timeline, render_timeline,
    AppConfig, EventEditor, EventId, EventOrder, EventRepository, EventService,
    SqliteEventRepository, TimelineView, YearNumber, ROOT_ELEMENT_ID,
};

/// Record and browse events measured in years before present.
#[derive(Parser, Debug)]
#[command(name = "timeline", version, about)]
struct Cli {
    /// Config file (defaults to the platform config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Event store file, overriding the config.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Record a new event.
    Add {
        /// Years before present.
        #[arg(long)]
        years: YearNumber,
        #[arg(long)]
        label: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// Print the grouped timeline.
    List {
        /// Newest-created events first inside each group.
        #[arg(long)]
        newest_first: bool,
    },
    /// Replace the label and note of an event.
    Edit {
        id: EventId,
        #[arg(long)]
        label: String,
        /// Omit to keep the current note; pass "" to clear it.
        #[arg(long)]
        note: Option<String>,
    },
    /// Remove an event.
    Delete { id: EventId },
    /// Render the timeline to PNG.
    Export {
        /// Directory receiving timeline.png (defaults to the current dir).
        #[arg(long)]
        out: Option<PathBuf>,
        /// Print a data URL instead of writing a file.
        #[arg(long)]
        data_url: bool,
    },
    /// Show how a year count is displayed.
    Format { years: YearNumber },
    /// Print the core version.
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Format { years } => {
            println!("{}", format_year(*years));
            return Ok(());
        }
        Commands::Version => {
            println!("timeline_core version={}", core_version());
            return Ok(());
        }
        _ => {}
    }

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    let mut config = AppConfig::load_or_create(&config_path);
    if let Some(db) = cli.db.clone() {
        config.db_path = db;
    }
    if let Err(err) = init_logging(&config.log_level, &config.log_dir) {
        eprintln!("warning: file logging disabled: {err}");
    }

    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating data dir {}", parent.display()))?;
    }
    let conn = open_db(&config.db_path)
        .with_context(|| format!("opening event store {}", config.db_path.display()))?;
    let repo = SqliteEventRepository::try_new(&conn)?;
    let mut editor = EventEditor::new(EventService::new(repo));

    let order = match &cli.command {
        Commands::List { newest_first } if *newest_first => EventOrder::CreatedDesc,
        _ if config.newest_first => EventOrder::CreatedDesc,
        _ => EventOrder::CreatedAsc,
    };
    let mut view = TimelineView::attach(editor.service_mut(), order);
    view.refresh(editor.service())?;

    match cli.command {
        Commands::Add { years, label, note } => {
            let id = add(&mut editor, years, &label, note.as_deref())?;
            println!("added {id}");
        }
        Commands::List { .. } => {}
        Commands::Edit { id, label, note } => edit(&mut editor, id, &label, note)?,
        Commands::Delete { id } => {
            if !editor.delete(id) {
                bail!("event {id} was not deleted");
            }
            println!("deleted {id}");
        }
        Commands::Export { out, data_url } => {
            let layout = layout_timeline(view.groups());
            let Some(image) = export_png(&layout, ROOT_ELEMENT_ID, &config.export_options())?
            else {
                println!("nothing to export");
                return Ok(());
            };
            if data_url {
                println!("{}", image.to_data_url());
            } else {
                let dir = match out {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                let path = image.save_to_dir(&dir)?;
                println!("wrote {}", path.display());
            }
            return Ok(());
        }
        Commands::Format { .. } | Commands::Version => {}
    }

    view.refresh_if_changed(editor.service())?;
    print!("{}", render_timeline(view.groups(), editor.state()));
    Ok(())
}

fn add<R: EventRepository>(
    editor: &mut EventEditor<R>,
    years: YearNumber,
    label: &str,
    note: Option<&str>,
) -> Result<EventId> {
    ensure_label(label)?;
    editor
        .add(Some(years), label, note)
        .ok_or_else(|| anyhow!("event was not added; see the log for the store error"))
}

fn edit<R: EventRepository>(
    editor: &mut EventEditor<R>,
    id: EventId,
    label: &str,
    note: Option<String>,
) -> Result<()> {
    ensure_label(label)?;
    let event = editor
        .service()
        .get_event(id)?
        .ok_or_else(|| anyhow!("event {id} not found"))?;
    if !editor.begin_edit(&event) {
        bail!("event {id} cannot be edited");
    }
    let note = note.unwrap_or_else(|| event.note.clone().unwrap_or_default());
    editor.update_edit_draft(label, &note);
    if !editor.submit_edit() {
        editor.cancel_edit();
        bail!("event {id} was not updated; see the log for the store error");
    }
    println!("updated {id}");
    Ok(())
}

fn ensure_label(label: &str) -> Result<()> {
    if normalize_label(label).is_none() {
        bail!("the label must not be blank");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{add, edit};
    use timeline_core::db::open_db_in_memory;
    use timeline_core::{EventEditor, EventService, SqliteEventRepository};

    #[test]
    fn blank_label_and_store_failure_report_different_errors() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteEventRepository::try_new(&conn).unwrap();
        let mut editor = EventEditor::new(EventService::new(repo));

        let blank = add(&mut editor, 10, "  ", None).unwrap_err();
        assert_eq!(blank.to_string(), "the label must not be blank");

        let too_old = add(&mut editor, u64::MAX, "A", None).unwrap_err();
        assert!(too_old.to_string().contains("see the log"));
        assert_eq!(editor.service().count_events().unwrap(), 0);

        let id = add(&mut editor, 10, "A", None).unwrap();
        let blank_edit = edit(&mut editor, id, " ", None).unwrap_err();
        assert_eq!(blank_edit.to_string(), "the label must not be blank");
        assert_eq!(editor.state().editing_id(), None);
    }
}
