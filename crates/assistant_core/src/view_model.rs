use crate::Notice;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub employee_count: usize,
    pub search: SearchView,
    pub selected_employee: Option<String>,
    pub question: String,
    pub ask_enabled: bool,
    pub response: ResponseView,
    pub roster: FileSlotView,
    pub policy: FileSlotView,
    /// Upload control state. Stays enabled with missing files so the user
    /// gets the validation notice.
    pub upload_enabled: bool,
    pub is_uploading: bool,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchView {
    pub query: String,
    pub open: bool,
    /// Empty when closed or when nothing matches.
    pub suggestions: Vec<SuggestionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionView {
    pub name: String,
    pub highlighted: bool,
}

/// Response area. `text` may be a stale answer while `loading` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResponseView {
    pub text: Option<String>,
    pub loading: bool,
    pub failed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileSlotView {
    pub label: &'static str,
    pub accepted: &'static [&'static str],
    pub pending: Option<String>,
    pub last_confirmed: Option<String>,
}
