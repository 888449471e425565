//! Submit lifecycle: snapshot, serialize, transmit, then reset or report.
//!
//! # Design
//! The controller is a two-state machine (`Idle`, `Submitting`) with the
//! outcome of the last attempt kept alongside. `submit` takes `&self` so a
//! UI can fire it from several event handlers; the first call flips the
//! state to `Submitting` and every call arriving before it settles returns
//! `SubmitOutcome::Ignored` without touching the network.
//!
//! The only await point is the transport call. Everything after it (reset,
//! notification, return to `Idle`) runs without yielding, so field edits made
//! while the request was in flight are either wholly before the reset or
//! wholly after it. Reset always installs the canonical default draft.
//!
//! If the `submit` future is dropped mid-flight, `InFlight` still returns
//! the controller to `Idle`.

use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use uuid::Uuid;

use crate::client::SubmitClient;
use crate::error::FormError;
use crate::notify::{Messages, NotificationSink};
use crate::store::FormHandle;
use crate::transport::Transport;
use crate::types::ProfileDraft;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastOutcome {
    Succeeded,
    Failed,
}

/// Result of a single `submit` call.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The acceptor took the payload and the draft was reset.
    Sent,
    /// Nothing was accepted; the draft is unchanged.
    Failed(FormError),
    /// Another submission was already in flight.
    Ignored,
}

impl SubmitOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored)
    }
}

#[derive(Debug)]
struct Status {
    state: SubmitState,
    last: Option<LastOutcome>,
}

pub struct SubmissionController<T, N> {
    form: FormHandle,
    client: SubmitClient,
    transport: T,
    sink: N,
    messages: Messages,
    strict: bool,
    timeout: Duration,
    status: Mutex<Status>,
}

impl<T: Transport, N: NotificationSink> SubmissionController<T, N> {
    pub fn new(form: FormHandle, client: SubmitClient, transport: T, sink: N) -> Self {
        Self {
            form,
            client,
            transport,
            sink,
            messages: Messages::default(),
            strict: false,
            timeout: DEFAULT_TIMEOUT,
            status: Mutex::new(Status {
                state: SubmitState::Idle,
                last: None,
            }),
        }
    }

    pub fn with_messages(mut self, messages: Messages) -> Self {
        self.messages = messages;
        self
    }

    /// Enforce required fields and the age range before transmitting.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn form(&self) -> &FormHandle {
        &self.form
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn state(&self) -> SubmitState {
        self.status().state
    }

    pub fn last_outcome(&self) -> Option<LastOutcome> {
        self.status().last
    }

    /// Whether the submit and clear triggers should be enabled.
    pub fn can_submit(&self) -> bool {
        self.state() == SubmitState::Idle
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let Some(mut flight) = self.begin() else {
            tracing::debug!("submit ignored: a submission is already in flight");
            return SubmitOutcome::Ignored;
        };

        let attempt = Uuid::new_v4();
        let snapshot = self.form.snapshot();
        tracing::info!(%attempt, endpoint = %self.client.endpoint(), "submitting profile");

        match self.transmit(&snapshot).await {
            Ok(()) => {
                self.form.reset();
                self.sink.notify(self.messages.success());
                flight.settle(LastOutcome::Succeeded);
                tracing::info!(%attempt, "profile accepted, draft reset");
                SubmitOutcome::Sent
            }
            Err(err) => {
                let notification = match &err {
                    FormError::Validation(issues) => self.messages.invalid(issues),
                    _ => self.messages.failure(),
                };
                self.sink.notify(notification);
                flight.settle(LastOutcome::Failed);
                if err.is_rejection() {
                    tracing::warn!(%attempt, error = %err, "acceptor rejected profile, draft kept");
                } else {
                    tracing::warn!(%attempt, error = %err, "profile submission failed, draft kept");
                }
                SubmitOutcome::Failed(err)
            }
        }
    }

    /// Reset the draft on user request. Ignored while a submission is in
    /// flight; returns whether the form was cleared.
    pub fn clear(&self) -> bool {
        if !self.can_submit() {
            tracing::debug!("clear ignored: a submission is in flight");
            return false;
        }
        self.form.reset();
        self.sink.notify(self.messages.cleared());
        true
    }

    async fn transmit(&self, snapshot: &ProfileDraft) -> Result<(), FormError> {
        if self.strict {
            snapshot.validate()?;
        }
        let request = self.client.build_submit(snapshot)?;
        let response = tokio::time::timeout(self.timeout, self.transport.send(request))
            .await
            .map_err(|_| FormError::Transport(format!("no response within {:?}", self.timeout)))??;
        self.client.parse_submit(response)
    }

    fn begin(&self) -> Option<InFlight<'_>> {
        let mut status = self.status();
        if status.state == SubmitState::Submitting {
            return None;
        }
        status.state = SubmitState::Submitting;
        Some(InFlight {
            status: &self.status,
            outcome: None,
        })
    }

    fn status(&self) -> MutexGuard<'_, Status> {
        self.status.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Returns the controller to `Idle` when dropped.
struct InFlight<'a> {
    status: &'a Mutex<Status>,
    outcome: Option<LastOutcome>,
}

impl InFlight<'_> {
    fn settle(&mut self, outcome: LastOutcome) {
        self.outcome = Some(outcome);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut status = self.status.lock().unwrap_or_else(|e| e.into_inner());
        status.state = SubmitState::Idle;
        if let Some(outcome) = self.outcome {
            status.last = Some(outcome);
        }
    }
}
