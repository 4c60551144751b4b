use axum::{
    Json,
    extract::{Path, State},
};
use dc_api_types::{
    DomainRecord, DomainTxResponse, ExplorerLinkResponse, ParsedWidgetValue, TxHash, WidgetListResponse,
    WidgetParseRequest,
};
use dc_chain_client::explorer_tx_uri;

use std::sync::Arc;

use crate::{AppState, ApiResult, bad_request, ledger_error, not_found};

pub(crate) async fn widget_parse(Json(request): Json<WidgetParseRequest>) -> Json<ParsedWidgetValue> {
    Json(dc_widget_parser::parse(&request.raw))
}

pub(crate) async fn domain_record(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<DomainRecord> {
    let record = state
        .ledger
        .domain_record(&name)
        .await
        .map_err(ledger_error)?
        .ok_or_else(|| not_found("domain not found"))?;

    Ok(Json(record))
}

pub(crate) async fn domain_widgets(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<WidgetListResponse> {
    let widgets = state.ledger.widget_list(&name).await.map_err(ledger_error)?;
    Ok(Json(WidgetListResponse { widgets }))
}

pub(crate) async fn domain_tx(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<DomainTxResponse> {
    let tx_hash = state.ledger.domain_tx(&name).await.map_err(ledger_error)?;
    Ok(Json(DomainTxResponse { tx_hash }))
}

pub(crate) async fn explorer_link(
    State(state): State<Arc<AppState>>,
    Path(hash): Path<String>,
) -> ApiResult<ExplorerLinkResponse> {
    let hash = hash.trim();
    if hash.is_empty() {
        return Err(bad_request("tx hash is required"));
    }

    let tx_hash = TxHash(hash.to_owned());
    let explorer_uri = explorer_tx_uri(&state.explorer_url, &tx_hash);
    Ok(Json(ExplorerLinkResponse { tx_hash, explorer_uri }))
}
