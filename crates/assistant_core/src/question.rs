use engine_logging::engine_debug;

/// Shown when the backend answered without an `answer` field.
pub const NO_RESPONSE_TEXT: &str = "No response received";
/// Shown for any transport or parse failure; never the server's own text.
pub const ASK_FAILED_TEXT: &str = "Server error or connection failed.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    /// `stale` is whatever the response area showed before this ask started.
    Pending { stale: Option<String> },
    Completed(String),
    Failed(String),
}

impl RequestStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestStatus::Pending { .. })
    }

    /// Text for the response area. While pending this is the stale text.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            RequestStatus::Idle => None,
            RequestStatus::Pending { stale } => stale.as_deref(),
            RequestStatus::Completed(text) | RequestStatus::Failed(text) => Some(text),
        }
    }

    fn into_display_text(self) -> Option<String> {
        match self {
            RequestStatus::Idle => None,
            RequestStatus::Pending { stale } => stale,
            RequestStatus::Completed(text) | RequestStatus::Failed(text) => Some(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskRequest {
    pub employee_name: String,
    pub question: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AskBlocked {
    MissingEmployee,
    EmptyQuestion,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionController {
    draft: String,
    status: RequestStatus,
}

impl QuestionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn set_draft(&mut self, text: String) {
        self.draft = text;
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn can_ask(&self, selected: Option<&str>) -> bool {
        self.check(selected).is_ok()
    }

    fn check<'a>(&self, selected: Option<&'a str>) -> Result<&'a str, AskBlocked> {
        if self.status.is_pending() {
            return Err(AskBlocked::Pending);
        }
        let employee = selected.ok_or(AskBlocked::MissingEmployee)?;
        if self.draft.trim().is_empty() {
            return Err(AskBlocked::EmptyQuestion);
        }
        Ok(employee)
    }

    /// Moves to `Pending` and returns the request to send.
    pub fn ask(&mut self, selected: Option<&str>) -> Result<AskRequest, AskBlocked> {
        let employee = self.check(selected)?;
        let request = AskRequest {
            employee_name: employee.to_string(),
            question: self.draft.trim().to_string(),
        };
        let stale = std::mem::take(&mut self.status).into_display_text();
        self.status = RequestStatus::Pending { stale };
        Ok(request)
    }

    /// Returns false when no ask was pending; the late reply is dropped.
    pub fn answer_received(&mut self, answer: Option<String>) -> bool {
        if !self.status.is_pending() {
            engine_debug!("dropping answer with no pending ask");
            return false;
        }
        let text = answer.unwrap_or_else(|| NO_RESPONSE_TEXT.to_string());
        self.status = RequestStatus::Completed(text);
        true
    }

    pub fn failed(&mut self) -> bool {
        if !self.status.is_pending() {
            engine_debug!("dropping failure with no pending ask");
            return false;
        }
        self.status = RequestStatus::Failed(ASK_FAILED_TEXT.to_string());
        true
    }
}
