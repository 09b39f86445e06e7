//! Saved roster templates, keyed by name, with a fixed capacity.

use crate::models::{MatchError, RosterTemplate};
use std::fs;
use std::path::PathBuf;

/// Maximum number of saved templates.
pub const TEMPLATE_CAPACITY: usize = 20;

/// Where templates are persisted. `persist` receives the complete list to store.
pub trait TemplateBackend: Send {
    fn load(&self) -> Result<Vec<RosterTemplate>, String>;
    fn persist(&self, templates: &[RosterTemplate]) -> Result<(), String>;
}

/// Templates kept as a JSON array in a single file.
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TemplateBackend for JsonFileBackend {
    fn load(&self) -> Result<Vec<RosterTemplate>, String> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let raw = fs::read_to_string(&self.path).map_err(|e| e.to_string())?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| e.to_string())
    }

    fn persist(&self, templates: &[RosterTemplate]) -> Result<(), String> {
        let json = serde_json::to_string_pretty(templates).map_err(|e| e.to_string())?;
        fs::write(&self.path, json).map_err(|e| e.to_string())
    }
}

/// Nothing is written anywhere; templates live as long as the process.
#[derive(Clone, Copy, Debug, Default)]
pub struct MemoryBackend;

impl TemplateBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<RosterTemplate>, String> {
        Ok(Vec::new())
    }

    fn persist(&self, _templates: &[RosterTemplate]) -> Result<(), String> {
        Ok(())
    }
}

/// Result of a save that did not fail.
#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveOutcome {
    Saved,
    Overwritten,
    /// The name is taken and `overwrite` was not set; nothing was written.
    ConfirmOverwrite,
}

/// In-memory list of templates, written through to a backend on every save.
pub struct RosterStore {
    templates: Vec<RosterTemplate>,
    backend: Box<dyn TemplateBackend>,
}

impl RosterStore {
    /// Load existing templates from `backend`.
    ///
    /// A backend already past capacity is kept whole: existing names can still be overwritten
    /// and nothing is dropped on the next write, but new names are refused.
    pub fn open(backend: Box<dyn TemplateBackend>) -> Result<Self, MatchError> {
        let templates = backend.load().map_err(MatchError::Storage)?;
        if templates.len() > TEMPLATE_CAPACITY {
            log::warn!(
                "Roster store holds {} templates, over the capacity of {}; new names are refused",
                templates.len(),
                TEMPLATE_CAPACITY
            );
        }
        Ok(Self { templates, backend })
    }

    pub fn in_memory() -> Self {
        Self {
            templates: Vec::new(),
            backend: Box::new(MemoryBackend),
        }
    }

    pub fn list(&self) -> &[RosterTemplate] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn load(&self, name: &str) -> Result<&RosterTemplate, MatchError> {
        let name = name.trim();
        self.templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| MatchError::TemplateNotFound(name.to_string()))
    }

    /// Save `template` under its (trimmed) name.
    ///
    /// An existing name needs `overwrite`, otherwise `ConfirmOverwrite` is returned and nothing
    /// changes. A new name past capacity is rejected. The in-memory list only changes once the
    /// backend has accepted the new list.
    pub fn save(&mut self, mut template: RosterTemplate, overwrite: bool) -> Result<SaveOutcome, MatchError> {
        template.name = template.name.trim().to_string();
        if template.name.is_empty() {
            return Err(MatchError::EmptyName);
        }

        let existing = self.templates.iter().position(|t| t.name == template.name);
        let mut candidate = self.templates.clone();
        let outcome = match existing {
            Some(_) if !overwrite => return Ok(SaveOutcome::ConfirmOverwrite),
            Some(idx) => {
                candidate[idx] = template;
                SaveOutcome::Overwritten
            }
            None if self.templates.len() >= TEMPLATE_CAPACITY => {
                return Err(MatchError::CapacityExceeded {
                    capacity: TEMPLATE_CAPACITY,
                });
            }
            None => {
                candidate.push(template);
                SaveOutcome::Saved
            }
        };

        self.backend.persist(&candidate).map_err(|e| {
            log::warn!("Failed to persist roster templates: {}", e);
            MatchError::Storage(e)
        })?;
        self.templates = candidate;
        Ok(outcome)
    }
}
