//! Note repository for JSON storage

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::LedgerError;
use crate::models::{Note, NoteId};

use super::file_io::{read_json, write_json_atomic};

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct NoteData {
    #[serde(default)]
    notes: Vec<Note>,
}

/// Repository for note persistence
pub struct NoteRepository {
    path: PathBuf,
    data: RwLock<BTreeMap<NoteId, Note>>,
}

impl NoteRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(BTreeMap::new()),
        }
    }

    /// Load notes from disk
    pub fn load(&self) -> Result<(), LedgerError> {
        let file_data: NoteData = read_json(&self.path)?;

        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.clear();
        for note in file_data.notes {
            data.insert(note.id, note);
        }
        Ok(())
    }

    /// Save notes to disk
    pub fn save(&self) -> Result<(), LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;

        let file_data = NoteData {
            notes: data.values().cloned().collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// All notes in id order
    pub fn get_all(&self) -> Result<Vec<Note>, LedgerError> {
        let data = self.data.read().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire read lock: {}", e))
        })?;
        Ok(data.values().cloned().collect())
    }

    /// Store a new note under the next free id
    pub fn insert(&self, content: String) -> Result<NoteId, LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        let id = data
            .keys()
            .next_back()
            .map(|id| id.next())
            .unwrap_or(NoteId::new(1));
        data.insert(id, Note { id, content });
        Ok(id)
    }

    /// Replace the content of an existing note
    pub fn update(&self, note: Note) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        match data.get_mut(&note.id) {
            Some(existing) => {
                existing.content = note.content;
                Ok(())
            }
            None => Err(LedgerError::note_not_found(note.id.to_string())),
        }
    }

    pub fn delete(&self, id: NoteId) -> Result<(), LedgerError> {
        let mut data = self.data.write().map_err(|e| {
            LedgerError::Storage(format!("Failed to acquire write lock: {}", e))
        })?;

        data.remove(&id)
            .map(|_| ())
            .ok_or_else(|| LedgerError::note_not_found(id.to_string()))
    }
}
