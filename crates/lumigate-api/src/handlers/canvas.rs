//! Canvas handlers: device segments treated as addressable pixels.

use axum::extract::State;
use serde_json::Value;

use super::{
    ServerState,
    common::{HandlerResult, ok},
};
use crate::models::{CanvasClearCommand, CanvasDrawCommand, CanvasFillCommand};
use crate::validator::ValidatedJson;

/// Paint pixels, one vendor call per distinct color.
///
/// POST /canvas/draw
pub async fn draw_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<CanvasDrawCommand>,
) -> HandlerResult<Value> {
    let pixels = req.pixels();
    ok(state.client.draw_canvas(&req.target.id(), &pixels).await?)
}

/// POST /canvas/fill
pub async fn fill_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<CanvasFillCommand>,
) -> HandlerResult<Value> {
    let rgb = req.rgb();
    ok(state
        .client
        .fill_canvas(&req.target.id(), req.segments, rgb)
        .await?)
}

/// POST /canvas/clear
pub async fn clear_handler(
    State(state): State<ServerState>,
    ValidatedJson(req): ValidatedJson<CanvasClearCommand>,
) -> HandlerResult<Value> {
    let count = req.segment_count();
    ok(state.client.clear_canvas(&req.target.id(), count).await?)
}
