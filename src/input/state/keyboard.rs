use crate::input::{events::Key, modifiers::Modifiers};

/// Set of keys currently held down.
///
/// Keys keep the order in which they were pressed; pressing a key that is
/// already held does nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyboardState {
    keys: Vec<Key>,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from `keys`, dropping duplicates but keeping first-seen order.
    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        let mut state = Self::new();
        for key in keys {
            state.press(key);
        }
        state
    }

    /// Held keys in press order.
    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Adds `key`. Returns false if it was already held.
    pub fn press(&mut self, key: Key) -> bool {
        if self.is_pressed(key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Removes `key`. Returns false if it was not held.
    pub fn release(&mut self, key: Key) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| *k != key);
        self.keys.len() != before
    }

    /// Keys held here but not in `other`, in this state's order.
    pub fn keys_not_in<'a>(&'a self, other: &'a KeyboardState) -> impl Iterator<Item = Key> + 'a {
        self.keys.iter().copied().filter(|k| !other.is_pressed(*k))
    }

    pub fn modifiers(&self) -> Modifiers {
        Modifiers::from_keys(&self.keys)
    }
}
