//! Note display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::i18n::Translator;
use crate::models::Note;

#[derive(Tabled)]
struct NoteRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Note")]
    content: String,
}

pub fn format_note_list(notes: &[Note], translator: &Translator) -> String {
    if notes.is_empty() {
        return format!("{}\n", translator.t("notes_modal.no_notes"));
    }

    let rows: Vec<_> = notes
        .iter()
        .map(|n| NoteRow {
            id: n.id.get(),
            content: n.content.clone(),
        })
        .collect();
    format!("{}\n", Table::new(rows).with(Style::psql()))
}
