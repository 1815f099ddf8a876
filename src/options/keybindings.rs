use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::RigError;
use crate::input::KeyAction;

const DEFAULT_BINDINGS: [(KeyAction, &str); 6] = [
    (KeyAction::MoveForward, "KeyW"),
    (KeyAction::MoveBackward, "KeyS"),
    (KeyAction::MoveLeft, "KeyA"),
    (KeyAction::MoveRight, "KeyD"),
    (KeyAction::Recenter, "KeyQ"),
    (KeyAction::ToggleGyro, "KeyG"),
];

/// Which action each key code drives.
///
/// A key drives at most one action; an empty key string leaves the action
/// unbound. Loaded tables are checked by [`reindex`](Self::reindex), and
/// [`bind`](Self::bind) moves a key between actions instead of sharing it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct KeybindingOptions {
    /// Maps action → key code (e.g. `MoveForward` → `"KeyW"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Key code → action. Rebuilt by `reindex`.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        Self {
            bindings: DEFAULT_BINDINGS
                .iter()
                .map(|&(action, key)| (action, key.to_owned()))
                .collect(),
            key_to_action: DEFAULT_BINDINGS
                .iter()
                .map(|&(action, key)| (key.to_owned(), action))
                .collect(),
        }
    }
}

impl KeybindingOptions {
    /// Rebuild the key → action index from `bindings`.
    ///
    /// # Errors
    ///
    /// [`RigError::OptionsParse`] naming the key if two actions share it.
    /// The index is left untouched in that case.
    pub fn reindex(&mut self) -> Result<(), RigError> {
        let mut index = HashMap::with_capacity(self.bindings.len());
        for (&action, key) in &self.bindings {
            if key.is_empty() {
                continue;
            }
            if let Some(other) = index.insert(key.clone(), action) {
                let (a, b) = ordered(action, other);
                return Err(RigError::OptionsParse(format!(
                    "key {key:?} is bound to both {a:?} and {b:?}"
                )));
            }
        }
        self.key_to_action = index;
        Ok(())
    }

    /// Bind `action` to `key`, replacing its previous key. An action that
    /// held `key` before becomes unbound and is returned. An empty `key`
    /// unbinds `action`.
    pub fn bind(
        &mut self,
        action: KeyAction,
        key: impl Into<String>,
    ) -> Option<KeyAction> {
        let key = key.into();
        if let Some(old) = self.bindings.remove(&action) {
            let _ = self.key_to_action.remove(&old);
        }
        if key.is_empty() {
            return None;
        }
        let displaced = self.key_to_action.insert(key.clone(), action);
        if let Some(other) = displaced {
            let _ = self.bindings.remove(&other);
            log::debug!("{key} moved from {other:?} to {action:?}");
        }
        let _ = self.bindings.insert(action, key);
        displaced
    }

    /// Look up the action for a key code.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(key).copied()
    }
}

/// Stable order for error messages (`HashMap` iteration is not).
fn ordered(a: KeyAction, b: KeyAction) -> (KeyAction, KeyAction) {
    if format!("{a:?}") <= format!("{b:?}") {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_key_is_rejected() {
        let mut keys = KeybindingOptions::default();
        keys.bindings = HashMap::from([
            (KeyAction::MoveForward, "KeyW".to_owned()),
            (KeyAction::Recenter, "KeyW".to_owned()),
        ]);
        let err = keys.reindex().unwrap_err().to_string();
        assert!(err.contains("\"KeyW\""), "{err}");
        assert!(err.contains("MoveForward and Recenter"), "{err}");
        // Previous index survives.
        assert_eq!(keys.lookup("KeyQ"), Some(KeyAction::Recenter));
    }

    #[test]
    fn bind_moves_key_between_actions() {
        let mut keys = KeybindingOptions::default();
        assert_eq!(
            keys.bind(KeyAction::Recenter, "KeyW"),
            Some(KeyAction::MoveForward)
        );
        assert_eq!(keys.lookup("KeyW"), Some(KeyAction::Recenter));
        assert_eq!(keys.lookup("KeyQ"), None);
        assert!(!keys.bindings.contains_key(&KeyAction::MoveForward));
        assert!(keys.reindex().is_ok());
    }

    #[test]
    fn empty_key_unbinds() {
        let mut keys = KeybindingOptions::default();
        assert_eq!(keys.bind(KeyAction::ToggleGyro, ""), None);
        assert_eq!(keys.lookup("KeyG"), None);

        keys.bindings = HashMap::from([
            (KeyAction::MoveLeft, String::new()),
            (KeyAction::MoveRight, String::new()),
        ]);
        assert!(keys.reindex().is_ok());
        assert_eq!(keys.lookup(""), None);
    }
}
