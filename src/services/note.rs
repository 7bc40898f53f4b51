//! Note service

use tracing::debug;

use crate::backend::Backend;
use crate::error::{LedgerError, LedgerResult};
use crate::models::{NewNote, Note, NoteId};

/// Service for notes, holding the last loaded list
pub struct NoteService<'a> {
    backend: &'a dyn Backend,
    notes: Vec<Note>,
}

impl<'a> NoteService<'a> {
    pub fn load(backend: &'a dyn Backend) -> LedgerResult<Self> {
        let mut service = Self {
            backend,
            notes: Vec::new(),
        };
        service.refresh()?;
        Ok(service)
    }

    pub fn refresh(&mut self) -> LedgerResult<()> {
        let notes = self.backend.get_notes()?;
        debug!(count = notes.len(), "loaded notes");
        self.notes = notes;
        Ok(())
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn add(&mut self, content: &str) -> LedgerResult<()> {
        let content = non_empty(content)?;
        self.backend.add_note(NewNote::new(content))?;
        self.refresh()
    }

    pub fn update(&mut self, id: NoteId, content: &str) -> LedgerResult<()> {
        let content = non_empty(content)?;
        self.backend.update_note(Note {
            id,
            content: content.to_string(),
        })?;
        self.refresh()
    }

    pub fn delete(&mut self, id: NoteId) -> LedgerResult<()> {
        self.backend.delete_note(id)?;
        self.refresh()
    }
}

fn non_empty(content: &str) -> LedgerResult<&str> {
    if content.trim().is_empty() {
        return Err(LedgerError::Validation("Note content cannot be empty".into()));
    }
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::LocalBackend;
    use crate::config::paths::LedgerPaths;
    use tempfile::TempDir;

    #[test]
    fn test_note_lifecycle() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let backend = LocalBackend::open(paths).unwrap();
        let mut service = NoteService::load(&backend).unwrap();

        service.add("Call the bank").unwrap();
        service.add("Renew insurance").unwrap();
        assert_eq!(service.notes().len(), 2);

        let id = service.notes()[0].id;
        service.update(id, "Called the bank").unwrap();
        assert_eq!(service.notes()[0].content, "Called the bank");

        service.delete(id).unwrap();
        assert_eq!(service.notes().len(), 1);
        assert_eq!(service.notes()[0].content, "Renew insurance");
    }

    #[test]
    fn test_blank_content_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_base_dir(temp_dir.path().to_path_buf());
        let backend = LocalBackend::open(paths).unwrap();
        let mut service = NoteService::load(&backend).unwrap();

        assert!(service.add("   ").unwrap_err().is_validation());
        assert!(service.notes().is_empty());
        assert!(service.delete(NoteId::new(9)).unwrap_err().is_not_found());
    }
}
