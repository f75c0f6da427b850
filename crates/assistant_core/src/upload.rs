use std::path::{Path, PathBuf};

use engine_logging::engine_debug;

/// The two files the backend needs before it can answer questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Roster,
    Policy,
}

impl SlotKind {
    /// Multipart part name expected by `POST /upload`.
    pub fn form_field(self) -> &'static str {
        match self {
            SlotKind::Roster => "emp_file",
            SlotKind::Policy => "policy_file",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlotKind::Roster => "Employee data",
            SlotKind::Policy => "Policy document",
        }
    }

    /// Picker hint only; contents are never inspected.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            SlotKind::Roster => &["csv", "xlsx", "xls"],
            SlotKind::Policy => &["pdf"],
        }
    }

    pub fn accepts(self, file_name: &str) -> bool {
        let Some((_, ext)) = file_name.rsplit_once('.') else {
            return false;
        };
        self.accepted_extensions()
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(ext))
    }
}

/// A user-chosen file, owned by exactly one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHandle {
    path: PathBuf,
    file_name: String,
}

impl FileHandle {
    /// Returns `None` for paths without a final file name component.
    pub fn from_path(path: impl Into<PathBuf>) -> Option<Self> {
        let path = path.into();
        let file_name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self { path, file_name })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSlot {
    kind: SlotKind,
    pending: Option<FileHandle>,
    last_confirmed: Option<String>,
}

impl FileSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            pending: None,
            last_confirmed: None,
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn pending(&self) -> Option<&FileHandle> {
        self.pending.as_ref()
    }

    pub fn last_confirmed(&self) -> Option<&str> {
        self.last_confirmed.as_deref()
    }

    /// Overwrites the pending file; the confirmed label is left alone.
    pub fn choose(&mut self, handle: FileHandle) {
        self.pending = Some(handle);
    }

    /// Clears the picker so the same file name can be chosen again.
    pub fn reset_picker(&mut self) {
        self.pending = None;
    }

    /// Records `uploaded` as confirmed. The picker is reset only if it still
    /// holds the uploaded file; a newer choice made mid-upload survives.
    fn confirm(&mut self, uploaded: &FileHandle) {
        self.last_confirmed = Some(uploaded.file_name().to_string());
        if self.pending.as_ref() == Some(uploaded) {
            self.reset_picker();
        }
    }
}

/// Both files of one upload request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadBatch {
    pub roster: FileHandle,
    pub policy: FileHandle,
}

/// Why `submit` did not produce a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadBlocked {
    MissingFiles,
    InFlight,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadCoordinator {
    roster: FileSlot,
    policy: FileSlot,
    in_flight: Option<UploadBatch>,
}

impl Default for UploadCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadCoordinator {
    pub fn new() -> Self {
        Self {
            roster: FileSlot::new(SlotKind::Roster),
            policy: FileSlot::new(SlotKind::Policy),
            in_flight: None,
        }
    }

    pub fn slot(&self, kind: SlotKind) -> &FileSlot {
        match kind {
            SlotKind::Roster => &self.roster,
            SlotKind::Policy => &self.policy,
        }
    }

    fn slot_mut(&mut self, kind: SlotKind) -> &mut FileSlot {
        match kind {
            SlotKind::Roster => &mut self.roster,
            SlotKind::Policy => &mut self.policy,
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn choose(&mut self, kind: SlotKind, handle: FileHandle) {
        self.slot_mut(kind).choose(handle);
    }

    /// Starts an upload when both slots hold a pending file and nothing is
    /// in flight.
    pub fn submit(&mut self) -> Result<UploadBatch, UploadBlocked> {
        if self.in_flight.is_some() {
            engine_debug!("upload submit ignored: already uploading");
            return Err(UploadBlocked::InFlight);
        }
        let (Some(roster), Some(policy)) = (self.roster.pending(), self.policy.pending()) else {
            return Err(UploadBlocked::MissingFiles);
        };
        let batch = UploadBatch {
            roster: roster.clone(),
            policy: policy.clone(),
        };
        self.in_flight = Some(batch.clone());
        Ok(batch)
    }

    /// Applies a confirmed upload. Returns false when nothing was in flight.
    pub fn complete(&mut self) -> bool {
        let Some(batch) = self.in_flight.take() else {
            return false;
        };
        self.roster.confirm(&batch.roster);
        self.policy.confirm(&batch.policy);
        true
    }

    /// Ends the in-flight upload without touching either slot.
    pub fn abort(&mut self) -> bool {
        self.in_flight.take().is_some()
    }
}
