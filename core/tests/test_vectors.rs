//! Verify request building and response parsing against JSON test vectors
//! stored in `test-vectors/`.
//!
//! Each case lists raw field edits and season toggles, the request the
//! resulting draft must produce, a simulated acceptor response and the
//! expected interpretation. Bodies are compared as parsed JSON so key order
//! does not matter.

use profile_core::{FieldStore, FormError, HttpResponse, Season, SubmitClient};

#[test]
fn submit_test_vectors() {
    let raw = include_str!("../../test-vectors/submit.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = SubmitClient::new(
        vectors["endpoint"].as_str().unwrap(),
        vectors["contact_email"].as_str().unwrap(),
    );

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        // Fill the draft
        let mut store = FieldStore::default();
        for edit in case["edits"].as_array().unwrap() {
            let field = edit[0].as_str().unwrap();
            let value = edit[1].as_str().unwrap();
            store.set_raw(field, value).unwrap_or_else(|e| panic!("{name}: {e}"));
        }
        for toggle in case["toggles"].as_array().unwrap() {
            let season: Season = toggle.as_str().unwrap().parse().unwrap();
            store.toggle_season(season);
        }

        // Verify build
        let expected_req = &case["expected_request"];
        let req = c.build_submit(&store.snapshot()).unwrap();
        assert_eq!(req.url, expected_req["url"].as_str().unwrap(), "{name}: url");

        let expected_headers: Vec<(String, String)> = expected_req["headers"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| {
                let arr = h.as_array().unwrap();
                (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
            })
            .collect();
        assert_eq!(req.headers, expected_headers, "{name}: headers");

        let req_body: serde_json::Value = serde_json::from_str(&req.body).unwrap();
        assert_eq!(req_body, expected_req["body"], "{name}: body");

        // Verify parse
        let sim = &case["simulated_response"];
        let response = HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            body: sim["body"].as_str().unwrap().to_string(),
        };
        let result = c.parse_submit(response);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            match expected_error.as_str().unwrap() {
                "Rejected" => assert!(matches!(err, FormError::Rejected { .. }), "{name}: expected Rejected"),
                other => panic!("{name}: unknown expected_error: {other}"),
            }
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
