use crate::Control;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::warn;

/// Character-key bindings, persisted as JSON.
///
/// Only letter keys are rebindable; space, shift, and the arrow keys are
/// fixed by physical key code (see [`crate::map_key`]). Keys are stored
/// lowercase, lookups fold case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bindings {
    characters: HashMap<String, Control>,
}

/// Errors from saving or loading a bindings file.
#[derive(Debug, thiserror::Error)]
pub enum BindingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Default for Bindings {
    fn default() -> Self {
        let mut characters = HashMap::new();
        characters.insert("w".to_string(), Control::Forward);
        characters.insert("s".to_string(), Control::Backward);
        characters.insert("a".to_string(), Control::StrafeLeft);
        characters.insert("d".to_string(), Control::StrafeRight);
        characters.insert("c".to_string(), Control::Descend);
        characters.insert("v".to_string(), Control::ToggleView);
        Self { characters }
    }
}

impl Bindings {
    /// Look up the control bound to a typed character. Case-insensitive;
    /// unbound characters yield `None`.
    pub fn control_for(&self, character: &str) -> Option<Control> {
        self.characters.get(&character.to_lowercase()).copied()
    }

    /// Bind a character to a control, replacing any previous binding for it.
    pub fn bind(&mut self, character: &str, control: Control) {
        self.characters.insert(character.to_lowercase(), control);
    }

    /// Number of character bindings.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }

    /// Save the bindings to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BindingsError> {
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }

    /// Load bindings from a JSON file.
    ///
    /// Falls back to [`Bindings::default`] if the file is missing or
    /// malformed, logging a warning.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(bindings) => bindings,
                Err(e) => {
                    warn!("malformed bindings file {}: {e}; using defaults", path.display());
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_walker_letters() {
        let b = Bindings::default();
        assert_eq!(b.control_for("w"), Some(Control::Forward));
        assert_eq!(b.control_for("a"), Some(Control::StrafeLeft));
        assert_eq!(b.control_for("s"), Some(Control::Backward));
        assert_eq!(b.control_for("d"), Some(Control::StrafeRight));
        assert_eq!(b.control_for("c"), Some(Control::Descend));
        assert_eq!(b.control_for("v"), Some(Control::ToggleView));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let b = Bindings::default();
        assert_eq!(b.control_for("W"), Some(Control::Forward));
        assert_eq!(b.control_for("V"), Some(Control::ToggleView));
    }

    #[test]
    fn unbound_character_is_none() {
        let b = Bindings::default();
        assert_eq!(b.control_for("q"), None);
        assert_eq!(b.control_for("7"), None);
    }

    #[test]
    fn rebind_replaces() {
        let mut b = Bindings::default();
        b.bind("Q", Control::Ascend);
        assert_eq!(b.control_for("q"), Some(Control::Ascend));
    }

    #[test]
    fn save_and_load_round_trip() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let mut b = Bindings::default();
        b.bind("e", Control::Ascend);
        b.save(tmp.path()).unwrap();

        let loaded = Bindings::load_or_default(tmp.path());
        assert_eq!(loaded, b);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "not json {").unwrap();
        let loaded = Bindings::load_or_default(tmp.path());
        assert_eq!(loaded, Bindings::default());
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let loaded = Bindings::load_or_default("/nonexistent/bindings.json");
        assert_eq!(loaded, Bindings::default());
    }
}
