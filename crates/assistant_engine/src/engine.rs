use std::sync::{mpsc, Arc, Mutex};
use std::thread;
use std::time::Duration;

use engine_logging::{engine_debug, engine_warn};

use crate::{AskQuery, Backend, EngineError, EngineEvent, UploadPart};

enum EngineCommand {
    FetchEmployees,
    Upload {
        roster: UploadPart,
        policy: UploadPart,
    },
    Ask(AskQuery),
}

/// Runs backend calls on a tokio runtime owned by a background thread.
///
/// Each command is one request; results come back as [`EngineEvent`]s in
/// completion order.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<EngineEvent>>>,
}

impl EngineHandle {
    pub fn new(backend: Arc<dyn Backend>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("assistant-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let backend = backend.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(backend.as_ref(), command, event_tx).await;
                    });
                }
                engine_debug!("engine command channel closed");
            })?;

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn fetch_employees(&self) {
        self.send(EngineCommand::FetchEmployees);
    }

    pub fn upload(&self, roster: UploadPart, policy: UploadPart) {
        self.send(EngineCommand::Upload { roster, policy });
    }

    pub fn ask(&self, query: AskQuery) {
        self.send(EngineCommand::Ask(query));
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.lock().ok()?.try_recv().ok()
    }

    /// `Disconnected` means no further events can arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        let Ok(event_rx) = self.event_rx.lock() else {
            return Err(mpsc::RecvTimeoutError::Disconnected);
        };
        event_rx.recv_timeout(timeout)
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_warn!("engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    backend: &dyn Backend,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchEmployees => {
            EngineEvent::EmployeesFetched(backend.list_employees().await)
        }
        EngineCommand::Upload { roster, policy } => {
            EngineEvent::UploadFinished(backend.upload(&roster, &policy).await)
        }
        EngineCommand::Ask(query) => EngineEvent::AskFinished(backend.ask(&query).await),
    };
    let _ = event_tx.send(event);
}
