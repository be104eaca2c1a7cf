/// Queries shorter than this (after trimming) produce no suggestions.
pub const MIN_QUERY_CHARS: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Enter,
    Escape,
}

/// Normalized query, or `None` when too short to search.
pub fn active_query(query: &str) -> Option<String> {
    let trimmed = query.trim();
    if trimmed.chars().count() < MIN_QUERY_CHARS {
        return None;
    }
    Some(trimmed.to_lowercase())
}

/// Case-insensitive substring test; `needle` is already lowercase.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// A dropdown of matches with a keyboard highlight.
#[derive(Clone, Debug, PartialEq)]
pub struct SuggestionList<T> {
    items: Vec<T>,
    highlighted: Option<usize>,
}

impl<T> Default for SuggestionList<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            highlighted: None,
        }
    }
}

impl<T: Clone> SuggestionList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the matches; the highlight is reset.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.highlighted = None;
    }

    pub fn clear(&mut self) {
        self.set_items(Vec::new());
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn highlighted_item(&self) -> Option<&T> {
        self.highlighted.and_then(|i| self.items.get(i))
    }

    /// Applies one key press. `Enter` on a highlighted row returns it.
    ///
    /// Keys do nothing while the list is empty.
    pub fn handle_key(&mut self, key: Key) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        match key {
            Key::Down => {
                self.highlighted = match self.highlighted {
                    None => Some(0),
                    Some(i) if i + 1 < self.items.len() => Some(i + 1),
                    last => last,
                };
                None
            }
            Key::Up => {
                self.highlighted = match self.highlighted {
                    Some(i) if i > 0 => Some(i - 1),
                    _ => None,
                };
                None
            }
            Key::Enter => self.highlighted_item().cloned(),
            Key::Escape => {
                self.clear();
                None
            }
        }
    }
}
