//! Stateless request builder and response parser for the profile acceptor.
//!
//! # Design
//! `SubmitClient` holds only the endpoint URL and the operational contact
//! address that is appended to every payload. `build_submit` produces an
//! `HttpRequest`, `parse_submit` interprets an `HttpResponse`; the caller (a
//! `Transport`) performs the round trip in between.

use serde::Serialize;

use crate::error::FormError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::ProfileDraft;

/// The wire payload: every draft field verbatim plus the fixed `email`.
#[derive(Debug, Serialize)]
pub struct ProfileSubmission<'a> {
    #[serde(flatten)]
    pub draft: &'a ProfileDraft,
    pub email: &'a str,
}

#[derive(Debug, Clone)]
pub struct SubmitClient {
    endpoint: String,
    contact_email: String,
}

impl SubmitClient {
    pub fn new(endpoint: &str, contact_email: &str) -> Self {
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            contact_email: contact_email.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    pub fn build_submit(&self, draft: &ProfileDraft) -> Result<HttpRequest, FormError> {
        let payload = ProfileSubmission {
            draft,
            email: &self.contact_email,
        };
        let body = serde_json::to_string(&payload).map_err(|e| FormError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            url: self.endpoint.clone(),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body,
        })
    }

    /// Any 2xx is acceptance; the body is not inspected.
    pub fn parse_submit(&self, response: HttpResponse) -> Result<(), FormError> {
        if response.is_success() {
            return Ok(());
        }
        Err(FormError::Rejected {
            status: response.status,
            body: response.body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seasons::SeasonSet;
    use crate::types::{DraftSeed, FieldValue, Password, Season};

    fn client() -> SubmitClient {
        SubmitClient::new("http://localhost:3000/profile", "inbox@example.com")
    }

    fn draft() -> ProfileDraft {
        ProfileDraft::seeded(&DraftSeed::default())
    }

    #[test]
    fn build_submit_produces_json_post() {
        let req = client().build_submit(&draft()).unwrap();
        assert_eq!(req.url, "http://localhost:3000/profile");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body["firstName"], "Jane");
        assert_eq!(body["email"], "inbox@example.com");
        assert_eq!(body.as_object().unwrap().len(), 12);
    }

    #[test]
    fn build_submit_sends_age_and_password_as_strings() {
        let d = draft()
            .with(FieldValue::Age("42".into()))
            .with(FieldValue::Password(Password::new("plain")));
        let req = client().build_submit(&d).unwrap();
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body["age"], "42");
        assert_eq!(body["password"], "plain");
    }

    #[test]
    fn build_submit_sends_seasons_as_array() {
        let seasons: SeasonSet = [Season::Autumn, Season::Spring].into_iter().collect();
        let req = client().build_submit(&draft().with(FieldValue::Seasons(seasons))).unwrap();
        let body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(body["seasons"], serde_json::json!(["spring", "autumn"]));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = SubmitClient::new("http://localhost:3000/profile/", "inbox@example.com");
        assert_eq!(client.build_submit(&draft()).unwrap().url, "http://localhost:3000/profile");
    }

    #[test]
    fn parse_submit_accepts_any_2xx() {
        for status in [200, 201, 202, 204] {
            let response = HttpResponse {
                status,
                body: String::new(),
            };
            assert!(client().parse_submit(response).is_ok(), "{status}");
        }
    }

    #[test]
    fn parse_submit_rejects_other_statuses() {
        let response = HttpResponse {
            status: 500,
            body: "internal error".to_string(),
        };
        let err = client().parse_submit(response).unwrap_err();
        assert!(matches!(err, FormError::Rejected { status: 500, ref body } if body == "internal error"));

        let redirect = HttpResponse {
            status: 302,
            body: String::new(),
        };
        assert!(client().parse_submit(redirect).unwrap_err().is_rejection());
    }
}
