pub const UPLOAD_MISSING_FILES_TEXT: &str = "Please select both employee and policy files.";
pub const UPLOAD_SUCCESS_TEXT: &str = "Files uploaded successfully!";
pub const UPLOAD_ERROR_TEXT: &str = "Upload error occurred.";
pub const ASK_MISSING_INPUT_TEXT: &str = "Select an employee and enter a question.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeSeverity {
    Info,
    Error,
}

/// Blocking notification, shown until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: NoticeSeverity,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Info,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            severity: NoticeSeverity::Error,
            text: text.into(),
        }
    }
}

pub(crate) fn upload_rejected_text(body: &str) -> String {
    format!("Upload failed: {body}")
}

pub(crate) fn unexpected_file_type_text(file_name: &str, accepted: &[&str]) -> String {
    let accepted = accepted
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{file_name} is not one of the expected types ({accepted}); it will be uploaded as is.")
}
