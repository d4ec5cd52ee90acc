use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/entries", post(handlers::form_entry))
        .route("/entries/:id/delete", post(handlers::form_delete))
        .route("/calendar/next", post(handlers::form_calendar_next))
        .route("/calendar/prev", post(handlers::form_calendar_prev))
        .route("/calendar/select", post(handlers::form_calendar_select))
        .route("/theme/toggle", post(handlers::form_theme_toggle))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::post_entry),
        )
        .route(
            "/api/entries/:id",
            get(handlers::get_entry).delete(handlers::remove_entry),
        )
        .route("/api/dates", get(handlers::get_dates))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/calendar/next", post(handlers::calendar_next))
        .route("/api/calendar/prev", post(handlers::calendar_prev))
        .route("/api/calendar/select", post(handlers::calendar_select))
        .route("/api/theme", get(handlers::get_theme))
        .route("/api/theme/toggle", post(handlers::theme_toggle))
        .with_state(state)
}
