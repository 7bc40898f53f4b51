//! Note CLI commands

use clap::Subcommand;

use crate::backend::Backend;
use crate::config::paths::LedgerPaths;
use crate::display::format_note_list;
use crate::error::LedgerResult;
use crate::models::NoteId;
use crate::services::{NoteService, SettingsService};

/// Note subcommands
#[derive(Subcommand)]
pub enum NoteCommands {
    /// Add a note
    Add {
        /// Note text
        content: String,
    },
    /// List all notes
    List,
    /// Replace the text of a note
    Edit {
        /// Note ID
        id: NoteId,
        /// New text
        content: String,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: NoteId,
    },
}

/// Handle a note command
pub fn handle_note_command(
    backend: &dyn Backend,
    paths: &LedgerPaths,
    cmd: NoteCommands,
) -> LedgerResult<()> {
    let mut service = NoteService::load(backend)?;

    match cmd {
        NoteCommands::Add { content } => {
            service.add(&content)?;
            println!("Added note");
        }
        NoteCommands::List => {
            let translator = SettingsService::load(backend, paths)?.translator();
            println!("{}", translator.t("notes_modal.title"));
            print!("{}", format_note_list(service.notes(), &translator));
        }
        NoteCommands::Edit { id, content } => {
            service.update(id, &content)?;
            println!("Updated note: {}", id);
        }
        NoteCommands::Delete { id } => {
            service.delete(id)?;
            println!("Deleted note: {}", id);
        }
    }

    Ok(())
}
