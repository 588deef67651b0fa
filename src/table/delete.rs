//! Delete confirmation dialog.
//!
//! ```text
//!  Closed --request--> Confirming --confirm--> InFlight --ok--> Closed
//!    ^                  |    ^                    |
//!    +------cancel------+    +------retry------ Failed <--err--+
//! ```

/// Dialog state for a pending row deletion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DeleteDialog {
    #[default]
    Closed,
    /// Waiting for the user to confirm.
    Confirming { id: String, name: String },
    /// Confirmed; the caller is deleting. Further confirms are ignored.
    InFlight { id: String, name: String },
    /// The caller reported a failure. Confirm retries, cancel closes.
    Failed {
        id: String,
        name: String,
        error: String,
    },
}

/// Single-use token handed out on confirm. Its id is what the caller deletes.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a confirmed delete must be finished with finish_delete"]
pub struct PendingDelete {
    id: String,
}

impl PendingDelete {
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl DeleteDialog {
    pub fn open(id: String, name: String) -> Self {
        DeleteDialog::Confirming { id, name }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, DeleteDialog::Closed)
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, DeleteDialog::InFlight { .. })
    }

    /// Display name of the row being deleted.
    pub fn name(&self) -> Option<&str> {
        match self {
            DeleteDialog::Closed => None,
            DeleteDialog::Confirming { name, .. }
            | DeleteDialog::InFlight { name, .. }
            | DeleteDialog::Failed { name, .. } => Some(name),
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DeleteDialog::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Moves to `InFlight` and returns the token, or `None` if there is nothing
    /// to confirm (closed) or a delete is already running.
    pub fn confirm(&mut self) -> Option<PendingDelete> {
        match std::mem::take(self) {
            DeleteDialog::Confirming { id, name } | DeleteDialog::Failed { id, name, .. } => {
                *self = DeleteDialog::InFlight {
                    id: id.clone(),
                    name,
                };
                Some(PendingDelete { id })
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Records the caller's outcome. Returns true when the row was deleted.
    ///
    /// A token for a different row than the one in flight is ignored.
    pub fn finish(&mut self, pending: PendingDelete, result: Result<(), String>) -> bool {
        let DeleteDialog::InFlight { id, name } = std::mem::take(self) else {
            return false;
        };
        if id != pending.id {
            *self = DeleteDialog::InFlight { id, name };
            return false;
        }
        match result {
            Ok(()) => true,
            Err(error) => {
                *self = DeleteDialog::Failed { id, name, error };
                false
            }
        }
    }

    /// Closes the dialog unless a delete is in flight. Returns true if closed.
    pub fn cancel(&mut self) -> bool {
        if self.is_in_flight() {
            return false;
        }
        *self = DeleteDialog::Closed;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opened() -> DeleteDialog {
        DeleteDialog::open("4".into(), "Harina".into())
    }

    #[test]
    fn confirm_hands_out_one_token() {
        let mut dialog = opened();
        let token = dialog.confirm().expect("token");
        assert_eq!(token.id(), "4");
        assert!(dialog.is_in_flight());
        // Double submit while in flight.
        assert!(dialog.confirm().is_none());
        assert!(dialog.finish(token, Ok(())));
        assert_eq!(dialog, DeleteDialog::Closed);
    }

    #[test]
    fn failure_keeps_dialog_open_with_error() {
        let mut dialog = opened();
        let token = dialog.confirm().unwrap();
        assert!(!dialog.finish(token, Err("500".into())));
        assert_eq!(dialog.error(), Some("500"));
        assert_eq!(dialog.name(), Some("Harina"));

        // Retry from the failed state.
        let token = dialog.confirm().unwrap();
        assert!(dialog.finish(token, Ok(())));
        assert!(!dialog.is_open());
    }

    #[test]
    fn cancel_is_refused_while_in_flight() {
        let mut dialog = opened();
        let token = dialog.confirm().unwrap();
        assert!(!dialog.cancel());
        assert!(dialog.is_open());
        assert!(dialog.finish(token, Ok(())));

        let mut dialog = opened();
        assert!(dialog.cancel());
        assert!(!dialog.is_open());
    }

    #[test]
    fn closed_dialog_has_nothing_to_confirm() {
        let mut dialog = DeleteDialog::Closed;
        assert!(dialog.confirm().is_none());
        assert_eq!(dialog.name(), None);
    }
}
