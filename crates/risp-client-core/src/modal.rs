//! Open/submit/close state machine shared by the create-context and
//! index-URI dialogs.
//!
//! ```text
//! Closed ──open──▶ Open ──begin_submit──▶ Submitting ──finish_submit(Ok)──▶ Closed
//!   ▲               │  ▲                      │
//!   └────close──────┘  └──finish_submit(Err)──┘
//! ```
//!
//! Validation runs inside [`begin_submit`](ModalWorkflow::begin_submit)
//! before any RPC is issued. A failed validation leaves the dialog `Open`
//! with the error in [`last_error`](ModalWorkflow::last_error).
//!
//! The two dialogs differ only in their fields type and validator, so each
//! is a [`ModalWorkflow`] built by [`create_context_workflow`] or
//! [`index_uri_workflow`].

use thiserror::Error;

use crate::api::RpcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Open,
    Submitting,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateContextFields {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexUriFields {
    pub uri: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("URI must start with file://, http:// or https:// (got {0:?})")]
    UnsupportedUri(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("dialog is not open")]
    NotOpen,
    #[error("dialog is not submitting")]
    NotSubmitting,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

pub type Validator<F> = fn(&F) -> Result<(), ValidationError>;

pub struct ModalWorkflow<F> {
    phase: ModalPhase,
    fields: F,
    last_error: Option<ModalError>,
    validate: Validator<F>,
}

impl<F: Clone + Default> ModalWorkflow<F> {
    pub fn new(validate: Validator<F>) -> Self {
        Self {
            phase: ModalPhase::Closed,
            fields: F::default(),
            last_error: None,
            validate,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Editable only while `Open`.
    pub fn fields_mut(&mut self) -> Option<&mut F> {
        (self.phase == ModalPhase::Open).then_some(&mut self.fields)
    }

    pub fn last_error(&self) -> Option<&ModalError> {
        self.last_error.as_ref()
    }

    /// Opens with `initial` fields. Returns `false` (and changes nothing)
    /// unless currently `Closed`.
    pub fn open(&mut self, initial: F) -> bool {
        if self.phase != ModalPhase::Closed {
            return false;
        }
        self.fields = initial;
        self.last_error = None;
        self.phase = ModalPhase::Open;
        true
    }

    /// Dismisses an `Open` dialog. Ignored while a submit is in flight.
    pub fn close(&mut self) -> bool {
        if self.phase != ModalPhase::Open {
            return false;
        }
        self.reset();
        true
    }

    /// Validates the current fields and moves to `Submitting`, returning the
    /// fields to send.
    pub fn begin_submit(&mut self) -> Result<F, ModalError> {
        if self.phase != ModalPhase::Open {
            return Err(ModalError::NotOpen);
        }
        if let Err(err) = (self.validate)(&self.fields) {
            let err = ModalError::Validation(err);
            self.last_error = Some(err.clone());
            return Err(err);
        }
        self.last_error = None;
        self.phase = ModalPhase::Submitting;
        Ok(self.fields.clone())
    }

    /// Settles a submit. Success closes and returns the saved value;
    /// failure reopens with the error recorded.
    pub fn finish_submit<T>(&mut self, result: Result<T, RpcError>) -> Result<T, ModalError> {
        if self.phase != ModalPhase::Submitting {
            return Err(ModalError::NotSubmitting);
        }
        match result {
            Ok(saved) => {
                self.reset();
                Ok(saved)
            }
            Err(err) => {
                let err = ModalError::Rpc(err);
                self.last_error = Some(err.clone());
                self.phase = ModalPhase::Open;
                Err(err)
            }
        }
    }

    fn reset(&mut self) {
        self.fields = F::default();
        self.last_error = None;
        self.phase = ModalPhase::Closed;
    }
}

pub fn create_context_workflow() -> ModalWorkflow<CreateContextFields> {
    ModalWorkflow::new(validate_context_name)
}

pub fn index_uri_workflow() -> ModalWorkflow<IndexUriFields> {
    ModalWorkflow::new(validate_index_uri)
}

pub fn validate_context_name(fields: &CreateContextFields) -> Result<(), ValidationError> {
    if fields.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(())
}

const INDEXABLE_SCHEMES: &[&str] = &["file://", "http://", "https://"];

pub fn validate_index_uri(fields: &IndexUriFields) -> Result<(), ValidationError> {
    let uri = fields.uri.as_bytes();
    let supported = INDEXABLE_SCHEMES.iter().any(|scheme| {
        uri.len() >= scheme.len() && uri[..scheme.len()].eq_ignore_ascii_case(scheme.as_bytes())
    });
    if !supported {
        return Err(ValidationError::UnsupportedUri(fields.uri.clone()));
    }
    Ok(())
}
