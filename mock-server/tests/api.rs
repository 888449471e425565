use axum::http::{self, Request, StatusCode};
use http_body_util::BodyExt;
use mock_server::{app, app_with_inbox, Inbox, Receipt, Received};
use tower::ServiceExt;

const PROFILE: &str = r##"{
    "firstName": "Anna",
    "lastName": "Doe",
    "middleName": "",
    "age": "",
    "gender": "",
    "birthDate": "",
    "favoriteColor": "#0EA5E9",
    "seasons": ["winter", "summer"],
    "favoriteAnimal": "",
    "password": "",
    "aboutMe": "",
    "email": "inbox@example.com"
}"##;

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn json_request(uri: &str, body: &str) -> Request<String> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(http::header::CONTENT_TYPE, "application/json")
        .body(body.to_string())
        .unwrap()
}

fn get(uri: &str) -> Request<String> {
    Request::builder().uri(uri).body(String::new()).unwrap()
}

// --- list ---

#[tokio::test]
async fn inbox_starts_empty() {
    let resp = app().oneshot(get("/profile")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let received: Vec<Received> = body_json(resp).await;
    assert!(received.is_empty());
}

// --- accept ---

#[tokio::test]
async fn accept_profile_returns_200_and_records() {
    let inbox = Inbox::default();
    let resp = app_with_inbox(inbox.clone())
        .oneshot(json_request("/profile", PROFILE))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let receipt: Receipt = body_json(resp).await;

    let received = inbox.read().await;
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].id, receipt.id);
    assert_eq!(received[0].submission.first_name, "Anna");
    assert_eq!(received[0].submission.seasons, vec!["winter", "summer"]);
}

#[tokio::test]
async fn accept_profile_missing_email_returns_422() {
    let mut body: serde_json::Value = serde_json::from_str(PROFILE).unwrap();
    body.as_object_mut().unwrap().remove("email");
    let resp = app()
        .oneshot(json_request("/profile", &body.to_string()))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn accept_profile_without_json_content_type_returns_415() {
    let req = Request::builder()
        .method("POST")
        .uri("/profile")
        .body(PROFILE.to_string())
        .unwrap();
    let resp = app().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

// --- simulated acceptor behavior ---

#[tokio::test]
async fn status_route_answers_with_requested_code() {
    let resp = app().oneshot(json_request("/status/500", PROFILE)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_bytes(resp).await;
    assert_eq!(&body[..], b"simulated");
}

#[tokio::test]
async fn status_route_rejects_invalid_code() {
    let resp = app().oneshot(json_request("/status/42", PROFILE)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delay_route_eventually_accepts() {
    let resp = app().oneshot(json_request("/delay/10", PROFILE)).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
}

// --- accept then list ---

#[tokio::test]
async fn accepted_profiles_are_listed() {
    use tower::Service;

    let mut app = app().into_service();

    for _ in 0..2 {
        let resp = ServiceExt::ready(&mut app)
            .await
            .unwrap()
            .call(json_request("/profile", PROFILE))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    let resp = ServiceExt::ready(&mut app)
        .await
        .unwrap()
        .call(get("/profile"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let received: Vec<Received> = body_json(resp).await;
    assert_eq!(received.len(), 2);
    assert_ne!(received[0].id, received[1].id);
    assert!(received.iter().all(|r| r.submission.email == "inbox@example.com"));
}
