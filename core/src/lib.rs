//! Form state and submission core for the personal-profile form.
//!
//! # Overview
//! `FieldStore` owns the single `ProfileDraft` of a form session and hands
//! out immutable snapshots. `SubmissionController` captures a snapshot,
//! serializes it with `SubmitClient`, sends it through a `Transport`, and
//! either resets the store (2xx) or leaves it untouched for a retry. Outcomes
//! go to a `NotificationSink`.
//!
//! # Design
//! - Request building and response parsing stay pure (host-does-IO); only
//!   `Transport` touches the network.
//! - `seasons` is a set type, so toggling is an involution by construction.
//! - At most one submission is in flight; extra `submit` calls are dropped.
//! - The password is sent to the acceptor in plaintext because the payload
//!   format demands it. Do not reuse this form for real credentials.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod notify;
pub mod seasons;
pub mod store;
pub mod transport;
pub mod types;
mod validate;

pub use client::{ProfileSubmission, SubmitClient};
pub use config::FormConfig;
pub use controller::{LastOutcome, SubmissionController, SubmitOutcome, SubmitState};
pub use error::FormError;
pub use http::{HttpRequest, HttpResponse};
pub use notify::{ChannelSink, LogSink, MemorySink, Messages, Notification, NotificationKind, NotificationSink};
pub use seasons::{toggle, SeasonSet};
pub use store::{FieldStore, FormHandle};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Animal, DraftSeed, FieldName, FieldValue, Gender, HexColor, Password, ProfileDraft, Season};
pub use validate::AGE_RANGE;
