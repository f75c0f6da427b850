use crate::{FileHandle, SlotKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Shell is up; triggers the first directory fetch.
    Started,
    /// `GET /employees` returned a list (unsorted).
    DirectoryLoaded(Vec<String>),
    /// `GET /employees` failed for any reason.
    DirectoryFailed(String),
    /// User edited the employee search box.
    SearchChanged(String),
    SearchFocused,
    SearchBlurred,
    /// Pointer went down on a suggestion.
    SuggestionPressed(String),
    /// Pointer came up on a suggestion.
    SuggestionReleased(String),
    HighlightNext,
    HighlightPrev,
    /// Enter in the search box.
    HighlightConfirmed,
    SearchEscaped,
    /// User explicitly cleared the selected employee.
    SelectionCleared,
    QuestionChanged(String),
    AskClicked,
    AnswerReceived { answer: Option<String> },
    AskFailed { reason: String },
    FileChosen { slot: SlotKind, file: FileHandle },
    UploadClicked,
    /// Upload response carried a non-empty `message` field.
    UploadSucceeded { message: String },
    /// Upload response was JSON without a usable `message` field.
    UploadRejected { body: String },
    /// Upload never produced a usable response.
    UploadFailed { reason: String },
    NoticeDismissed,
    NoOp,
}
