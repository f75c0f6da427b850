use engine_logging::engine_debug;

use crate::directory::EmployeeDirectory;

/// Upper bound on rendered suggestions. This is a display cap, not a ranking.
pub const SUGGESTION_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

/// Employee search box with a bounded suggestion dropdown.
///
/// A pointer press on a suggestion marks the selection as in progress, so a
/// blur that lands between press and release does not close the dropdown
/// under the pointer. The release on the same name commits the selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AutocompleteSelector {
    query: String,
    dropdown: DropdownState,
    focused: bool,
    highlighted: Option<usize>,
    pressed: Option<String>,
    selected: Option<String>,
}

impl AutocompleteSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn dropdown(&self) -> DropdownState {
        self.dropdown
    }

    pub fn is_open(&self) -> bool {
        self.dropdown == DropdownState::Open
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    pub fn selection_in_progress(&self) -> bool {
        self.pressed.is_some()
    }

    /// Matches for the current query, regardless of the dropdown state.
    pub fn suggestions<'a>(&self, directory: &'a EmployeeDirectory) -> Vec<&'a str> {
        directory.matching(&self.query, SUGGESTION_LIMIT)
    }

    /// What the dropdown shows: nothing while closed or when nothing matches.
    pub fn visible_suggestions<'a>(&self, directory: &'a EmployeeDirectory) -> Vec<&'a str> {
        if self.is_open() {
            self.suggestions(directory)
        } else {
            Vec::new()
        }
    }

    pub fn type_query(&mut self, query: String) {
        self.query = query;
        self.highlighted = None;
        self.dropdown = DropdownState::Open;
    }

    pub fn focus(&mut self) {
        self.focused = true;
        self.dropdown = DropdownState::Open;
    }

    pub fn blur(&mut self) {
        self.focused = false;
        if self.pressed.is_some() {
            engine_debug!("blur deferred: suggestion press in progress");
            return;
        }
        self.close();
    }

    /// Pointer-down on a suggestion. Returns false if the name is unknown.
    pub fn press(&mut self, name: &str, directory: &EmployeeDirectory) -> bool {
        if !self.is_open() || !directory.contains(name) {
            return false;
        }
        self.pressed = Some(name.to_string());
        true
    }

    /// Pointer-up on a suggestion. Commits the selection when it matches the
    /// pending press, otherwise abandons the press.
    pub fn release(&mut self, name: &str, directory: &EmployeeDirectory) -> Option<String> {
        match self.pressed.take() {
            Some(pressed) if pressed == name => {
                if self.select(name, directory) {
                    Some(pressed)
                } else {
                    None
                }
            }
            _ => {
                if !self.focused {
                    self.close();
                }
                None
            }
        }
    }

    /// Commits `name` as the selected employee and closes the dropdown.
    /// Names outside the directory are ignored.
    pub fn select(&mut self, name: &str, directory: &EmployeeDirectory) -> bool {
        if !directory.contains(name) {
            engine_debug!("ignoring selection of unknown employee {name:?}");
            return false;
        }
        self.query = name.to_string();
        self.selected = Some(name.to_string());
        self.close();
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.query.clear();
        self.close();
    }

    pub fn highlight_next(&mut self, directory: &EmployeeDirectory) {
        let len = self.open_for_keyboard(directory);
        if len == 0 {
            return;
        }
        let next = self.highlighted.map_or(0, |i| if i + 1 >= len { 0 } else { i + 1 });
        self.highlighted = Some(next);
    }

    pub fn highlight_prev(&mut self, directory: &EmployeeDirectory) {
        let len = self.open_for_keyboard(directory);
        if len == 0 {
            return;
        }
        let prev = self
            .highlighted
            .map_or(len - 1, |i| if i == 0 { len - 1 } else { i - 1 });
        self.highlighted = Some(prev);
    }

    /// Enter key: selects the highlighted suggestion, if any.
    pub fn confirm_highlight(&mut self, directory: &EmployeeDirectory) -> Option<String> {
        if !self.is_open() {
            return None;
        }
        let index = self.highlighted?;
        let name = self.suggestions(directory).get(index)?.to_string();
        if self.select(&name, directory) {
            Some(name)
        } else {
            None
        }
    }

    pub fn escape(&mut self) {
        self.pressed = None;
        self.close();
    }

    /// The directory was replaced; suggestion indices are no longer valid.
    pub fn directory_changed(&mut self, directory: &EmployeeDirectory) {
        self.highlighted = None;
        if let Some(pressed) = &self.pressed {
            if !directory.contains(pressed) {
                self.pressed = None;
            }
        }
    }

    fn open_for_keyboard(&mut self, directory: &EmployeeDirectory) -> usize {
        self.dropdown = DropdownState::Open;
        let len = self.suggestions(directory).len();
        if self.highlighted.is_some_and(|i| i >= len) {
            self.highlighted = None;
        }
        len
    }

    fn close(&mut self) {
        self.dropdown = DropdownState::Closed;
        self.highlighted = None;
        self.pressed = None;
    }
}
