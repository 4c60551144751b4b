use axum::{Json, extract::State};
use dc_api_types::{LedgerCall, LedgerSubmitRequest, SubmitReceipt};
use tracing::info;

use std::sync::Arc;

use crate::{AppState, ApiResult, bad_request, ledger_error};

pub(crate) async fn ledger_submit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LedgerSubmitRequest>,
) -> ApiResult<SubmitReceipt> {
    if request.from.0.trim().is_empty() {
        return Err(bad_request("from is required"));
    }
    if request.call.domain().trim().is_empty() {
        return Err(bad_request("domain is required"));
    }
    if let LedgerCall::CreateWidget { widget, .. } = &request.call {
        if widget.value.trim().is_empty() {
            return Err(bad_request("widget value is required"));
        }
    }

    let label = request.call.label();
    let domain = request.call.domain().to_owned();
    let receipt = state
        .ledger
        .apply(&request.from, request.call)
        .await
        .map_err(ledger_error)?;

    info!(
        call = label,
        domain = %domain,
        from = %request.from,
        tx_hash = %receipt.tx_hash,
        "ledger submit accepted"
    );

    Ok(Json(receipt))
}

#[cfg(test)]
mod tests {
    use crate::test_support::{app, call};
    use axum::Router;
    use axum::http::StatusCode;
    use serde_json::{Value, json};

    const OWNER: &str = "0xA11CE00000000000000000000000000000000001";
    const STRANGER: &str = "0xB0B0000000000000000000000000000000000002";

    async fn submit(app: &Router, from: &str, call_body: Value) -> (StatusCode, Value) {
        call(app, "POST", "/ledger/submit", Some(json!({ "from": from, "call": call_body }))).await
    }

    async fn registered() -> Router {
        let app = app();
        let (status, _) = submit(&app, OWNER, json!({ "kind": "register", "domain": "alice" })).await;
        assert_eq!(status, StatusCode::OK);
        app
    }

    #[tokio::test]
    async fn owner_creates_and_deletes_widgets() {
        let app = registered().await;

        let (status, receipt) = submit(
            &app,
            &OWNER.to_lowercase(),
            json!({
                "kind": "create_widget",
                "domain": "alice",
                "widget": { "type": "twitter", "value": "123", "embed": "post" }
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(receipt["accepted"], true);

        let (_, body) = call(&app, "GET", "/domain/alice/widgets", None).await;
        assert_eq!(
            body,
            json!({ "widgets": [{ "id": 1, "type": "twitter", "value": "123", "embed": "post" }] })
        );

        let (_, tx) = call(&app, "GET", "/domain/alice/tx", None).await;
        assert_eq!(tx["tx_hash"], receipt["tx_hash"]);

        let (status, _) = submit(
            &app,
            OWNER,
            json!({ "kind": "delete_widget", "domain": "alice", "widget_id": 1 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = call(&app, "GET", "/domain/alice/widgets", None).await;
        assert_eq!(body, json!({ "widgets": [] }));
    }

    #[tokio::test]
    async fn non_owner_is_forbidden() {
        let app = registered().await;
        let (status, body) = submit(
            &app,
            STRANGER,
            json!({ "kind": "update_url", "domain": "alice", "url": "" }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(body["error"].as_str().is_some_and(|error| error.contains("not the owner")));
    }

    #[tokio::test]
    async fn missing_widget_is_not_found() {
        let app = registered().await;
        let (status, _) = submit(
            &app,
            OWNER,
            json!({ "kind": "delete_widget", "domain": "alice", "widget_id": 42 }),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_blank_fields() {
        let app = registered().await;

        let (status, body) = submit(&app, " ", json!({ "kind": "register", "domain": "bob" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "from is required");

        let (status, body) = submit(
            &app,
            OWNER,
            json!({ "kind": "create_widget", "domain": "alice", "widget": { "type": "twitter", "value": "" } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "widget value is required");
    }

    #[tokio::test]
    async fn second_registration_is_rejected() {
        let app = registered().await;
        let (status, _) = submit(&app, STRANGER, json!({ "kind": "register", "domain": "alice" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
