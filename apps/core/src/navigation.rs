use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
}

impl NavKey {
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowDown" | "Down" => Some(Self::Down),
            "ArrowUp" | "Up" => Some(Self::Up),
            "Enter" => Some(Self::Enter),
            "Escape" | "Esc" => Some(Self::Escape),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    Moved(usize),
    Select(usize),
    Cancel,
    Ignored,
}

/// How the host should bring the active entry into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBlock {
    Nearest,
}

/// Cursor over a flat list of `len` entries with wraparound at both ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationIndex {
    cursor: usize,
    len: usize,
}

impl NavigationIndex {
    pub fn new(len: usize) -> Self {
        Self { cursor: 0, len }
    }

    pub fn active(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true when the cursor value changed.
    pub fn reset(&mut self, len: usize) -> bool {
        let changed = self.cursor != 0;
        self.len = len;
        self.cursor = 0;
        changed
    }

    pub fn move_next(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.len;
        Some(self.cursor)
    }

    pub fn move_prev(&mut self) -> Option<usize> {
        if self.len == 0 {
            return None;
        }
        self.cursor = (self.cursor + self.len - 1) % self.len;
        Some(self.cursor)
    }

    /// Pointer-driven highlight. Indices outside the list are ignored.
    pub fn set_active(&mut self, index: usize) -> bool {
        if index >= self.len || index == self.cursor {
            return false;
        }
        self.cursor = index;
        true
    }

    pub fn activate(&self) -> Option<usize> {
        (self.cursor < self.len).then_some(self.cursor)
    }

    pub fn handle_key(&mut self, key: NavKey) -> NavigationOutcome {
        match key {
            NavKey::Escape => NavigationOutcome::Cancel,
            NavKey::Down => self
                .move_next()
                .map_or(NavigationOutcome::Ignored, NavigationOutcome::Moved),
            NavKey::Up => self
                .move_prev()
                .map_or(NavigationOutcome::Ignored, NavigationOutcome::Moved),
            NavKey::Enter => self
                .activate()
                .map_or(NavigationOutcome::Ignored, NavigationOutcome::Select),
        }
    }
}

/// Smallest change to `offset` that keeps `index` inside a viewport of
/// `viewport` rows. Never centers.
///
/// The controller only emits [`ScrollBlock::Nearest`]; hosts that draw a
/// windowed list themselves use this to apply that effect.
pub fn nearest_scroll_offset(offset: usize, viewport: usize, index: usize) -> usize {
    if viewport == 0 {
        return index;
    }
    if index < offset {
        return index;
    }
    if index >= offset + viewport {
        return index + 1 - viewport;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::{NavKey, NavigationIndex, NavigationOutcome};

    #[test]
    fn arrow_keys_wrap_at_both_ends() {
        let mut nav = NavigationIndex::new(3);
        assert_eq!(nav.handle_key(NavKey::Up), NavigationOutcome::Moved(2));
        assert_eq!(nav.handle_key(NavKey::Down), NavigationOutcome::Moved(0));
    }

    #[test]
    fn enter_selects_active_index() {
        let mut nav = NavigationIndex::new(4);
        nav.set_active(2);
        assert_eq!(nav.handle_key(NavKey::Enter), NavigationOutcome::Select(2));
    }

    #[test]
    fn escape_cancels_even_when_empty() {
        let mut nav = NavigationIndex::new(0);
        assert_eq!(nav.handle_key(NavKey::Escape), NavigationOutcome::Cancel);
        assert_eq!(nav.handle_key(NavKey::Enter), NavigationOutcome::Ignored);
    }

    #[test]
    fn set_active_ignores_out_of_range() {
        let mut nav = NavigationIndex::new(2);
        assert!(!nav.set_active(5));
        assert_eq!(nav.active(), 0);
    }

    #[test]
    fn key_names_map_to_nav_keys() {
        assert_eq!(NavKey::from_key("ArrowDown"), Some(NavKey::Down));
        assert_eq!(NavKey::from_key("Escape"), Some(NavKey::Escape));
        assert_eq!(NavKey::from_key("k"), None);
    }
}
