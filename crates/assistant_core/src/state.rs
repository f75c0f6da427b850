use crate::view_model::{AppViewModel, FileSlotView, ResponseView, SearchView, SuggestionView};
use crate::{
    AutocompleteSelector, EmployeeDirectory, FileSlot, Notice, QuestionController, RequestStatus,
    SlotKind, UploadCoordinator,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    directory: EmployeeDirectory,
    selector: AutocompleteSelector,
    uploads: UploadCoordinator,
    question: QuestionController,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let selected = self.selector.selected();
        let highlighted = self.selector.highlighted();
        let suggestions = self
            .selector
            .visible_suggestions(&self.directory)
            .into_iter()
            .enumerate()
            .map(|(index, name)| SuggestionView {
                name: name.to_string(),
                highlighted: highlighted == Some(index),
            })
            .collect();

        let status = self.question.status();
        AppViewModel {
            employee_count: self.directory.len(),
            search: SearchView {
                query: self.selector.query().to_string(),
                open: self.selector.is_open(),
                suggestions,
            },
            selected_employee: selected.map(ToOwned::to_owned),
            question: self.question.draft().to_string(),
            ask_enabled: self.question.can_ask(selected),
            response: ResponseView {
                text: status.display_text().map(ToOwned::to_owned),
                loading: status.is_pending(),
                failed: matches!(status, RequestStatus::Failed(_)),
            },
            roster: slot_view(self.uploads.slot(SlotKind::Roster)),
            policy: slot_view(self.uploads.slot(SlotKind::Policy)),
            upload_enabled: !self.uploads.is_uploading(),
            is_uploading: self.uploads.is_uploading(),
            notice: self.notice.clone(),
            dirty: self.dirty,
        }
    }

    pub fn directory(&self) -> &EmployeeDirectory {
        &self.directory
    }

    pub fn selector(&self) -> &AutocompleteSelector {
        &self.selector
    }

    pub fn uploads(&self) -> &UploadCoordinator {
        &self.uploads
    }

    pub fn question(&self) -> &QuestionController {
        &self.question
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Returns whether a render is due and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn show_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_directory(&mut self, names: Vec<String>) {
        self.directory.replace(names);
        self.selector.directory_changed(&self.directory);
        self.mark_dirty();
    }

    pub(crate) fn reset_directory(&mut self) {
        self.directory.reset();
        self.selector.directory_changed(&self.directory);
        self.mark_dirty();
    }

    /// Selector and directory are borrowed together by most search messages.
    pub(crate) fn search_parts(&mut self) -> (&mut AutocompleteSelector, &EmployeeDirectory) {
        (&mut self.selector, &self.directory)
    }

    pub(crate) fn uploads_mut(&mut self) -> &mut UploadCoordinator {
        &mut self.uploads
    }

    pub(crate) fn question_mut(&mut self) -> &mut QuestionController {
        &mut self.question
    }
}

fn slot_view(slot: &FileSlot) -> FileSlotView {
    let kind = slot.kind();
    FileSlotView {
        label: kind.label(),
        accepted: kind.accepted_extensions(),
        pending: slot.pending().map(|file| file.file_name().to_string()),
        last_confirmed: slot.last_confirmed().map(ToOwned::to_owned),
    }
}
