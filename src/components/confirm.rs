use std::time::{Duration, Instant};

/// Two-step delete confirmation for one table.
///
/// The first activation on a row arms it; a second activation on the same
/// row fires. Activating another row moves the armed state there instead.
#[derive(Debug, Clone)]
pub struct DeleteConfirm {
    state: ConfirmState,
    timeout: Option<Duration>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmState {
    Idle,
    Armed { row_id: i64, armed_at: Instant },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Row is now waiting for a second activation
    Armed(i64),
    /// Second activation on the armed row: perform the delete
    Fire(i64),
}

impl DeleteConfirm {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            state: ConfirmState::Idle,
            timeout,
        }
    }

    pub fn activate(&mut self, row_id: i64) -> ConfirmOutcome {
        self.activate_at(row_id, Instant::now())
    }

    pub fn activate_at(&mut self, row_id: i64, now: Instant) -> ConfirmOutcome {
        if self.armed_row_at(now) == Some(row_id) {
            self.state = ConfirmState::Idle;
            return ConfirmOutcome::Fire(row_id);
        }

        self.state = ConfirmState::Armed {
            row_id,
            armed_at: now,
        };
        ConfirmOutcome::Armed(row_id)
    }

    pub fn disarm(&mut self) {
        self.state = ConfirmState::Idle;
    }

    pub fn armed_row(&self) -> Option<i64> {
        self.armed_row_at(Instant::now())
    }

    /// The armed row, unless the timeout (if any) has elapsed.
    pub fn armed_row_at(&self, now: Instant) -> Option<i64> {
        match self.state {
            ConfirmState::Idle => None,
            ConfirmState::Armed { row_id, armed_at } => match self.timeout {
                Some(timeout) if now.saturating_duration_since(armed_at) >= timeout => None,
                _ => Some(row_id),
            },
        }
    }
}

impl Default for DeleteConfirm {
    fn default() -> Self {
        Self::new(None)
    }
}
