use serde::Serialize;

/// Keyboard input the suggestion list reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Next,
    Previous,
    Confirm,
    Dismiss,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` name
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowDown" | "Down" => Key::Next,
            "ArrowUp" | "Up" => Key::Previous,
            "Enter" => Key::Confirm,
            "Escape" | "Esc" => Key::Dismiss,
            _ => Key::Other,
        }
    }
}

/// What the page has to do after a key press
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum NavEvent<T> {
    /// Key not handled; let the browser have it
    Ignored,
    /// Highlight moved; scroll this row into view
    Highlight { index: usize },
    /// Suggestion chosen
    Select { index: usize, item: T },
    /// List closed
    Dismissed,
}

impl<T> NavEvent<T> {
    /// Whether the page should call preventDefault()
    pub fn handled(&self) -> bool {
        !matches!(self, NavEvent::Ignored)
    }
}

/// Tracks which suggestion is highlighted.
///
/// The navigator owns the current list, so a highlight index can never
/// point into a list that has since been replaced.
#[derive(Debug, Clone)]
pub struct SuggestionNavigator<T> {
    items: Vec<T>,
    highlighted: Option<usize>,
}

impl<T> Default for SuggestionNavigator<T> {
    fn default() -> Self {
        SuggestionNavigator {
            items: Vec::new(),
            highlighted: None,
        }
    }
}

impl<T: Clone> SuggestionNavigator<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a new suggestion list; the highlight resets
    pub fn replace(&mut self, items: Vec<T>) {
        self.items = items;
        self.highlighted = None;
    }

    /// Close the list (click outside, cleared query)
    pub fn dismiss(&mut self) {
        self.replace(Vec::new());
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// Highlight as the -1 sentinel the DOM layer uses
    pub fn highlight_index(&self) -> isize {
        self.highlighted.map_or(-1, |i| i as isize)
    }

    /// Wraps from last to first; from nothing to the first row
    pub fn move_next(&mut self) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let next = self.highlighted.map_or(0, |i| (i + 1) % len);
        self.highlighted = Some(next);
        Some(next)
    }

    /// Wraps from first to last; from nothing to the last row
    pub fn move_previous(&mut self) -> Option<usize> {
        let len = self.items.len();
        if len == 0 {
            return None;
        }
        let prev = self.highlighted.map_or(len - 1, |i| (i + len - 1) % len);
        self.highlighted = Some(prev);
        Some(prev)
    }

    /// The highlighted suggestion, if any
    pub fn confirm(&self) -> Option<(usize, &T)> {
        let index = self.highlighted?;
        self.items.get(index).map(|item| (index, item))
    }

    pub fn handle_key(&mut self, key: Key) -> NavEvent<T> {
        match key {
            Key::Next => self
                .move_next()
                .map_or(NavEvent::Ignored, |index| NavEvent::Highlight { index }),
            Key::Previous => self
                .move_previous()
                .map_or(NavEvent::Ignored, |index| NavEvent::Highlight { index }),
            Key::Confirm => match self.confirm() {
                Some((index, item)) => NavEvent::Select {
                    index,
                    item: item.clone(),
                },
                None => NavEvent::Ignored,
            },
            Key::Dismiss if !self.items.is_empty() => {
                self.dismiss();
                NavEvent::Dismissed
            }
            Key::Dismiss | Key::Other => NavEvent::Ignored,
        }
    }
}
