//! Assistant engine: backend HTTP client and effect execution.
mod backend;
mod engine;
mod settings;
mod types;

pub use backend::{Backend, ReqwestBackend};
pub use engine::EngineHandle;
pub use settings::BackendSettings;
pub use types::{
    AskQuery, BackendError, EngineError, EngineEvent, FailureKind, UploadOutcome, UploadPart,
};
