use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use assistant_core::{Effect, FileHandle, Msg, SlotKind};
use assistant_engine::{
    AskQuery, Backend, EngineError, EngineEvent, EngineHandle, UploadOutcome, UploadPart,
};
use engine_logging::{engine_debug, engine_info, engine_warn};

use super::app::AppInput;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        backend: Arc<dyn Backend>,
        input_tx: mpsc::Sender<AppInput>,
    ) -> Result<Self, EngineError> {
        let engine = EngineHandle::new(backend)?;
        let runner = Self { engine };
        runner.spawn_event_loop(input_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchEmployees => {
                    engine_debug!("FetchEmployees");
                    self.engine.fetch_employees();
                }
                Effect::UploadFiles(batch) => {
                    engine_info!(
                        "UploadFiles roster={} policy={}",
                        batch.roster.file_name(),
                        batch.policy.file_name()
                    );
                    self.engine.upload(
                        upload_part(SlotKind::Roster, &batch.roster),
                        upload_part(SlotKind::Policy, &batch.policy),
                    );
                }
                Effect::Ask(request) => {
                    engine_info!(
                        "Ask employee={:?} question_len={}",
                        request.employee_name,
                        request.question.len()
                    );
                    self.engine.ask(AskQuery {
                        employee_name: request.employee_name,
                        question: request.question,
                    });
                }
            }
        }
    }

    fn spawn_event_loop(&self, input_tx: mpsc::Sender<AppInput>) {
        let engine = self.engine.clone();
        thread::spawn(move || {
            forward_events(|| engine.recv_timeout(Duration::from_millis(200)), &input_tx);
        });
    }
}

/// Pumps engine events into the dispatcher until either side goes away.
fn forward_events(
    mut next: impl FnMut() -> Result<EngineEvent, RecvTimeoutError>,
    input_tx: &mpsc::Sender<AppInput>,
) {
    loop {
        let event = match next() {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => {
                engine_warn!("engine event channel closed");
                return;
            }
        };
        if input_tx.send(AppInput::Msg(map_event(event))).is_err() {
            return;
        }
    }
}

fn upload_part(slot: SlotKind, file: &FileHandle) -> UploadPart {
    UploadPart {
        field: slot.form_field().to_string(),
        path: file.path().to_path_buf(),
        file_name: file.file_name().to_string(),
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::EmployeesFetched(Ok(names)) => Msg::DirectoryLoaded(names),
        EngineEvent::EmployeesFetched(Err(err)) => Msg::DirectoryFailed(err.to_string()),
        EngineEvent::UploadFinished(Ok(UploadOutcome::Accepted { message })) => {
            Msg::UploadSucceeded { message }
        }
        EngineEvent::UploadFinished(Ok(UploadOutcome::Rejected { body })) => {
            Msg::UploadRejected { body }
        }
        EngineEvent::UploadFinished(Err(err)) => Msg::UploadFailed {
            reason: err.to_string(),
        },
        EngineEvent::AskFinished(Ok(answer)) => Msg::AnswerReceived { answer },
        EngineEvent::AskFinished(Err(err)) => Msg::AskFailed {
            reason: err.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use assistant_engine::{BackendError, FailureKind};

    use super::*;

    #[test]
    fn engine_failures_become_failure_messages() {
        let err = BackendError {
            kind: FailureKind::Timeout,
            message: "deadline elapsed".to_string(),
        };

        assert_eq!(
            map_event(EngineEvent::AskFinished(Err(err.clone()))),
            Msg::AskFailed {
                reason: "timeout: deadline elapsed".to_string()
            }
        );
        assert_eq!(
            map_event(EngineEvent::EmployeesFetched(Err(err.clone()))),
            Msg::DirectoryFailed("timeout: deadline elapsed".to_string())
        );
        assert!(matches!(
            map_event(EngineEvent::UploadFinished(Err(err))),
            Msg::UploadFailed { .. }
        ));
    }

    #[test]
    fn upload_outcomes_keep_their_shape() {
        assert_eq!(
            map_event(EngineEvent::UploadFinished(Ok(UploadOutcome::Accepted {
                message: "ok".to_string()
            }))),
            Msg::UploadSucceeded {
                message: "ok".to_string()
            }
        );
        assert_eq!(
            map_event(EngineEvent::UploadFinished(Ok(UploadOutcome::Rejected {
                body: "{}".to_string()
            }))),
            Msg::UploadRejected {
                body: "{}".to_string()
            }
        );
    }

    #[test]
    fn forwarding_stops_when_engine_disconnects() {
        let (input_tx, input_rx) = mpsc::channel();
        let mut replies = vec![
            Err(RecvTimeoutError::Disconnected),
            Ok(EngineEvent::AskFinished(Ok(None))),
            Err(RecvTimeoutError::Timeout),
        ];

        forward_events(|| replies.pop().unwrap_or(Err(RecvTimeoutError::Timeout)), &input_tx);

        assert!(replies.is_empty());
        let forwarded: Vec<Msg> = input_rx
            .try_iter()
            .map(|input| match input {
                AppInput::Msg(msg) => msg,
                _ => panic!("only engine messages are forwarded"),
            })
            .collect();
        assert_eq!(forwarded, vec![Msg::AnswerReceived { answer: None }]);
    }

    #[test]
    fn upload_parts_carry_their_slot_field_names() {
        let roster = FileHandle::from_path("/data/roster.csv").expect("roster handle");
        let policy = FileHandle::from_path("/data/policy.pdf").expect("policy handle");

        let roster_part = upload_part(SlotKind::Roster, &roster);
        let policy_part = upload_part(SlotKind::Policy, &policy);

        assert_eq!(roster_part.field, "emp_file");
        assert_eq!(roster_part.file_name, "roster.csv");
        assert_eq!(policy_part.field, "policy_file");
        assert_eq!(policy_part.path, std::path::PathBuf::from("/data/policy.pdf"));
    }

    #[test]
    fn missing_answer_passes_through() {
        assert_eq!(
            map_event(EngineEvent::AskFinished(Ok(None))),
            Msg::AnswerReceived { answer: None }
        );
    }
}
