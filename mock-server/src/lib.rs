//! In-memory stand-in for the remote profile acceptor.
//!
//! `POST /profile` records the submission and answers 200, `GET /profile`
//! lists what was received. `/status/{code}` and `/delay/{ms}` simulate a
//! rejecting or slow acceptor.

use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSubmission {
    pub first_name: String,
    pub last_name: String,
    pub middle_name: String,
    pub age: String,
    pub gender: String,
    pub birth_date: String,
    pub favorite_color: String,
    pub seasons: Vec<String>,
    pub favorite_animal: String,
    pub password: String,
    pub about_me: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Received {
    pub id: Uuid,
    pub submission: ProfileSubmission,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Receipt {
    pub id: Uuid,
}

pub type Inbox = Arc<RwLock<Vec<Received>>>;

pub fn app() -> Router {
    app_with_inbox(Inbox::default())
}

/// Router sharing `inbox` with the caller, so tests can inspect deliveries.
pub fn app_with_inbox(inbox: Inbox) -> Router {
    Router::new()
        .route("/profile", get(list_received).post(accept_profile))
        .route("/status/{code}", post(respond_with_status))
        .route("/delay/{ms}", post(accept_after_delay))
        .with_state(inbox)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

pub async fn run_with_inbox(listener: TcpListener, inbox: Inbox) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_inbox(inbox)).await
}

async fn list_received(State(inbox): State<Inbox>) -> Json<Vec<Received>> {
    Json(inbox.read().await.clone())
}

async fn accept_profile(
    State(inbox): State<Inbox>,
    Json(submission): Json<ProfileSubmission>,
) -> (StatusCode, Json<Receipt>) {
    let id = Uuid::new_v4();
    tracing::info!(%id, email = %submission.email, "profile received");
    inbox.write().await.push(Received { id, submission });
    (StatusCode::OK, Json(Receipt { id }))
}

async fn respond_with_status(Path(code): Path<u16>) -> (StatusCode, &'static str) {
    match StatusCode::from_u16(code) {
        Ok(status) => {
            tracing::info!(status = code, "simulated response");
            (status, "simulated")
        }
        Err(_) => (StatusCode::BAD_REQUEST, "invalid status code"),
    }
}

async fn accept_after_delay(Path(ms): Path<u64>) -> StatusCode {
    tokio::time::sleep(Duration::from_millis(ms)).await;
    StatusCode::OK
}
