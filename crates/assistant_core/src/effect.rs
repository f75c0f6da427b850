use crate::{AskRequest, UploadBatch};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchEmployees,
    UploadFiles(UploadBatch),
    Ask(AskRequest),
}
