//! Assistant core: pure state machine and view-model helpers for the
//! employee assistant client.
mod autocomplete;
mod directory;
mod effect;
mod msg;
mod notice;
mod question;
mod state;
mod update;
mod upload;
mod view_model;

pub use autocomplete::{AutocompleteSelector, DropdownState, SUGGESTION_LIMIT};
pub use directory::EmployeeDirectory;
pub use effect::Effect;
pub use msg::Msg;
pub use notice::{
    Notice, NoticeSeverity, ASK_MISSING_INPUT_TEXT, UPLOAD_ERROR_TEXT, UPLOAD_MISSING_FILES_TEXT,
    UPLOAD_SUCCESS_TEXT,
};
pub use question::{
    AskBlocked, AskRequest, QuestionController, RequestStatus, ASK_FAILED_TEXT, NO_RESPONSE_TEXT,
};
pub use state::AppState;
pub use update::update;
pub use upload::{FileHandle, FileSlot, SlotKind, UploadBatch, UploadBlocked, UploadCoordinator};
pub use view_model::{AppViewModel, FileSlotView, ResponseView, SearchView, SuggestionView};
