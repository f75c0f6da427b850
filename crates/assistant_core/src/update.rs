use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::notice::{
    unexpected_file_type_text, upload_rejected_text, ASK_MISSING_INPUT_TEXT, UPLOAD_ERROR_TEXT,
    UPLOAD_MISSING_FILES_TEXT, UPLOAD_SUCCESS_TEXT,
};
use crate::{AppState, AskBlocked, Effect, Msg, Notice, UploadBlocked};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => vec![Effect::FetchEmployees],
        Msg::DirectoryLoaded(names) => {
            state.replace_directory(names);
            engine_debug!("directory replaced with {} names", state.directory().len());
            Vec::new()
        }
        Msg::DirectoryFailed(reason) => {
            engine_warn!("employee directory refresh failed: {reason}");
            state.reset_directory();
            Vec::new()
        }
        Msg::SearchChanged(query) => {
            let (selector, _) = state.search_parts();
            selector.type_query(query);
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchFocused => {
            let (selector, _) = state.search_parts();
            selector.focus();
            state.mark_dirty();
            Vec::new()
        }
        Msg::SearchBlurred => {
            let (selector, _) = state.search_parts();
            selector.blur();
            state.mark_dirty();
            Vec::new()
        }
        Msg::SuggestionPressed(name) => {
            let (selector, directory) = state.search_parts();
            if selector.press(&name, directory) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SuggestionReleased(name) => {
            let (selector, directory) = state.search_parts();
            if let Some(selected) = selector.release(&name, directory) {
                engine_debug!("employee selected: {selected}");
            }
            state.mark_dirty();
            Vec::new()
        }
        Msg::HighlightNext => {
            let (selector, directory) = state.search_parts();
            selector.highlight_next(directory);
            state.mark_dirty();
            Vec::new()
        }
        Msg::HighlightPrev => {
            let (selector, directory) = state.search_parts();
            selector.highlight_prev(directory);
            state.mark_dirty();
            Vec::new()
        }
        Msg::HighlightConfirmed => {
            let (selector, directory) = state.search_parts();
            if let Some(selected) = selector.confirm_highlight(directory) {
                engine_debug!("employee selected: {selected}");
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::SearchEscaped => {
            let (selector, _) = state.search_parts();
            selector.escape();
            state.mark_dirty();
            Vec::new()
        }
        Msg::SelectionCleared => {
            let (selector, _) = state.search_parts();
            selector.clear_selection();
            state.mark_dirty();
            Vec::new()
        }
        Msg::QuestionChanged(text) => {
            state.question_mut().set_draft(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::AskClicked => ask(&mut state),
        Msg::AnswerReceived { answer } => {
            if state.question_mut().answer_received(answer) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::AskFailed { reason } => {
            engine_warn!("ask failed: {reason}");
            if state.question_mut().failed() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FileChosen { slot, file } => {
            if !slot.accepts(file.file_name()) {
                engine_info!(
                    "{} file {:?} does not match {:?}",
                    slot.label(),
                    file.file_name(),
                    slot.accepted_extensions()
                );
                state.show_notice(Notice::info(unexpected_file_type_text(
                    file.file_name(),
                    slot.accepted_extensions(),
                )));
            }
            state.uploads_mut().choose(slot, file);
            state.mark_dirty();
            Vec::new()
        }
        Msg::UploadClicked => match state.uploads_mut().submit() {
            Ok(batch) => {
                state.mark_dirty();
                vec![Effect::UploadFiles(batch)]
            }
            Err(UploadBlocked::MissingFiles) => {
                state.show_notice(Notice::error(UPLOAD_MISSING_FILES_TEXT));
                Vec::new()
            }
            Err(UploadBlocked::InFlight) => Vec::new(),
        },
        Msg::UploadSucceeded { message } => {
            if state.uploads_mut().complete() {
                engine_info!("upload accepted: {message}");
                state.show_notice(Notice::info(UPLOAD_SUCCESS_TEXT));
                vec![Effect::FetchEmployees]
            } else {
                engine_debug!("upload success with nothing in flight");
                Vec::new()
            }
        }
        Msg::UploadRejected { body } => {
            if state.uploads_mut().abort() {
                state.show_notice(Notice::error(upload_rejected_text(&body)));
            }
            Vec::new()
        }
        Msg::UploadFailed { reason } => {
            engine_warn!("upload failed: {reason}");
            if state.uploads_mut().abort() {
                state.show_notice(Notice::error(UPLOAD_ERROR_TEXT));
            }
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn ask(state: &mut AppState) -> Vec<Effect> {
    let selected = state.selector().selected().map(ToOwned::to_owned);
    match state.question_mut().ask(selected.as_deref()) {
        Ok(request) => {
            state.mark_dirty();
            vec![Effect::Ask(request)]
        }
        Err(AskBlocked::Pending) => {
            engine_debug!("ask ignored: previous ask still pending");
            Vec::new()
        }
        Err(blocked) => {
            engine_debug!("ask rejected: {blocked:?}");
            state.show_notice(Notice::error(ASK_MISSING_INPUT_TEXT));
            Vec::new()
        }
    }
}
