//! Route table.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;

use super::types::{MAX_REQUEST_BODY_SIZE, ServerState};
use crate::handlers::{basic, canvas, control, devices};

/// Build the full router over the given state.
pub fn create_router(state: ServerState) -> Router {
    let read_routes = Router::new()
        .route("/health", get(basic::health_handler))
        .route("/devices", get(devices::list_devices_handler))
        .route("/devices/:device_id", get(devices::get_device_handler))
        .route("/devices/:device_id/state", get(devices::get_device_state_handler))
        .route(
            "/devices/:device_id/capabilities",
            get(devices::get_capabilities_handler),
        )
        .route("/devices/:device_id/segments", get(devices::get_segments_handler))
        .route("/devices/:device_id/scenes", get(devices::get_scenes_handler))
        .route(
            "/devices/:device_id/music-modes",
            get(devices::get_music_modes_handler),
        )
        .route(
            "/devices/:device_id/current-color",
            get(devices::get_current_color_handler),
        )
        .route(
            "/devices/:device_id/full-state",
            get(devices::get_full_state_handler),
        );

    let control_routes = Router::new()
        .route("/devices/state", post(devices::query_device_state_handler))
        .route("/devices/power", post(control::power_handler))
        .route("/devices/power/on", post(control::power_on_handler))
        .route("/devices/power/off", post(control::power_off_handler))
        .route("/devices/brightness", post(control::brightness_handler))
        .route("/devices/color", post(control::color_handler))
        .route("/devices/color-temp", post(control::color_temp_handler))
        .route("/devices/toggle", post(control::toggle_handler))
        .route("/devices/gradient", post(control::gradient_handler))
        .route("/devices/segment/color", post(control::segment_color_handler))
        .route(
            "/devices/segment/brightness",
            post(control::segment_brightness_handler),
        )
        .route("/devices/scene", post(control::scene_handler))
        .route("/devices/diy-scene", post(control::diy_scene_handler))
        .route("/devices/snapshot", post(control::snapshot_handler))
        .route("/devices/music-mode", post(control::music_mode_handler))
        .route("/devices/work-mode", post(control::work_mode_handler))
        .route("/devices/range", post(control::range_handler))
        .route("/devices/mode", post(control::mode_handler))
        .route("/devices/control", post(control::generic_control_handler));

    let canvas_routes = Router::new()
        .route("/canvas/draw", post(canvas::draw_handler))
        .route("/canvas/fill", post(canvas::fill_handler))
        .route("/canvas/clear", post(canvas::clear_handler));

    read_routes
        .merge(control_routes)
        .merge(canvas_routes)
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_SIZE))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
