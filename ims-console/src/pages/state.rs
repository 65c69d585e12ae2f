//! Page and modal state machines
//!
//! Page: `Idle -> Loading -> {Loaded | Error}`.
//! Modal: `Closed -> Open(mode) -> Submitting -> {Closed | Open with error}`.

use crate::error::{ConsoleError, ConsoleResult};
use crate::forms::FieldErrors;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error(String),
}

impl PageState {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalMode {
    Create,
    Edit,
    View,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open {
        mode: ModalMode,
        /// Last submission failure, shown at the top of the form
        error: Option<String>,
        field_errors: FieldErrors,
    },
    Submitting {
        mode: ModalMode,
    },
}

impl ModalState {
    pub fn open(mode: ModalMode) -> Self {
        ModalState::Open {
            mode,
            error: None,
            field_errors: FieldErrors::new(),
        }
    }

    pub fn mode(&self) -> Option<ModalMode> {
        match self {
            ModalState::Closed => None,
            ModalState::Open { mode, .. } | ModalState::Submitting { mode } => Some(*mode),
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, ModalState::Closed)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, ModalState::Submitting { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModalState::Open { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ModalState::Open { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    /// `Open(mode) -> Submitting(mode)`.
    ///
    /// Rejects a second submission while one is in flight and submissions
    /// from a view-only or mismatched modal.
    pub fn begin_submit(&mut self, mode: ModalMode) -> ConsoleResult<()> {
        match self {
            ModalState::Open { mode: current, .. }
                if *current == mode && mode != ModalMode::View =>
            {
                *self = ModalState::Submitting { mode };
                Ok(())
            }
            ModalState::Submitting { .. } => {
                Err(ConsoleError::invalid_state("a submission is already in progress"))
            }
            _ => Err(ConsoleError::invalid_state(format!(
                "no {:?} form is open",
                mode
            ))),
        }
    }

    /// Local validation failed; stay open and show the field messages.
    pub fn reject_fields(&mut self, errors: FieldErrors) {
        if let Some(mode) = self.mode() {
            *self = ModalState::Open {
                mode,
                error: None,
                field_errors: errors,
            };
        }
    }

    /// `Submitting -> Open with error`
    pub fn fail(&mut self, message: impl Into<String>) {
        if let Some(mode) = self.mode() {
            *self = ModalState::Open {
                mode,
                error: Some(message.into()),
                field_errors: FieldErrors::new(),
            };
        }
    }

    /// `Submitting -> Closed`
    pub fn succeed(&mut self) {
        *self = ModalState::Closed;
    }

    pub fn close(&mut self) {
        *self = ModalState::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_cycle() {
        let mut modal = ModalState::open(ModalMode::Create);
        modal.begin_submit(ModalMode::Create).unwrap();
        assert!(modal.is_submitting());
        assert!(modal.begin_submit(ModalMode::Create).is_err());

        modal.fail("Serial number already exists");
        assert_eq!(modal.mode(), Some(ModalMode::Create));
        assert_eq!(modal.error(), Some("Serial number already exists"));

        modal.begin_submit(ModalMode::Create).unwrap();
        modal.succeed();
        assert_eq!(modal, ModalState::Closed);
    }

    #[test]
    fn test_view_modal_cannot_submit() {
        let mut modal = ModalState::open(ModalMode::View);
        assert!(modal.begin_submit(ModalMode::View).is_err());
        assert!(ModalState::Closed.begin_submit(ModalMode::Edit).is_err());
    }

    #[test]
    fn test_reject_fields_keeps_mode() {
        let mut modal = ModalState::open(ModalMode::Edit);
        let mut errors = FieldErrors::new();
        errors.insert("email", "Email address is invalid");
        modal.reject_fields(errors);
        assert_eq!(
            modal.field_errors().and_then(|e| e.get("email")),
            Some("Email address is invalid")
        );
    }
}
