use crate::calendar::{build_month_view, parse_date_key, parse_month_key};
use crate::errors::AppError;
use crate::heatmap::ThemeMode;
use crate::index::{entries_for_date, index_by_date};
use crate::models::{
    DateAggregate, DateQuery, Entry, EntryDraft, MonthQuery, MonthView, SelectRequest,
    ThemeResponse,
};
use crate::state::AppState;
use crate::ui::render_index;
use axum::{
    Form, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, Redirect},
};
use chrono::NaiveDate;
use std::collections::BTreeMap;

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let entries = state.refresh().await;
    let calendar = state.calendar().await;
    let theme = state.theme().await;

    let view = build_month_view(&entries, calendar.anchor, calendar.selected, theme);
    let day_entries = entries_for_date(&entries, &view.selected_date);
    Html(render_index(&view, &day_entries, theme))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<DateQuery>,
) -> Result<Json<Vec<Entry>>, AppError> {
    let entries = state.entries().await;
    match query.date {
        Some(date) => {
            parse_date(&date)?;
            Ok(Json(entries_for_date(&entries, &date)))
        }
        None => Ok(Json(entries)),
    }
}

pub async fn get_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Entry>, AppError> {
    state
        .entry(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("no entry with id {id}")))
}

pub async fn post_entry(
    State(state): State<AppState>,
    Json(draft): Json<EntryDraft>,
) -> Result<(StatusCode, Json<Entry>), AppError> {
    let entry = state.create(draft).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn remove_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_dates(State(state): State<AppState>) -> Json<BTreeMap<String, DateAggregate>> {
    Json(index_by_date(&state.entries().await))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthView>, AppError> {
    let month = match query.month {
        Some(value) => Some(
            parse_month_key(&value)
                .ok_or_else(|| AppError::bad_request("month must be formatted as YYYY-MM"))?,
        ),
        None => None,
    };
    Ok(Json(state.month_view(month).await))
}

pub async fn calendar_next(State(state): State<AppState>) -> Json<MonthView> {
    Json(state.shift_calendar(1).await)
}

pub async fn calendar_prev(State(state): State<AppState>) -> Json<MonthView> {
    Json(state.shift_calendar(-1).await)
}

pub async fn calendar_select(
    State(state): State<AppState>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<MonthView>, AppError> {
    let date = parse_date(&payload.date)?;
    Ok(Json(state.select_date(date).await))
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(theme_response(state.theme().await))
}

pub async fn theme_toggle(State(state): State<AppState>) -> Json<ThemeResponse> {
    Json(theme_response(state.toggle_theme().await))
}

pub async fn form_entry(
    State(state): State<AppState>,
    Form(draft): Form<EntryDraft>,
) -> Result<Redirect, AppError> {
    state.create(draft).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Redirect, AppError> {
    state.delete(&id).await?;
    Ok(Redirect::to("/"))
}

pub async fn form_calendar_next(State(state): State<AppState>) -> Redirect {
    state.shift_calendar(1).await;
    Redirect::to("/")
}

pub async fn form_calendar_prev(State(state): State<AppState>) -> Redirect {
    state.shift_calendar(-1).await;
    Redirect::to("/")
}

pub async fn form_calendar_select(
    State(state): State<AppState>,
    Form(payload): Form<SelectRequest>,
) -> Result<Redirect, AppError> {
    let date = parse_date(&payload.date)?;
    state.select_date(date).await;
    Ok(Redirect::to("/"))
}

pub async fn form_theme_toggle(State(state): State<AppState>) -> Redirect {
    state.toggle_theme().await;
    Redirect::to("/")
}

fn parse_date(value: &str) -> Result<NaiveDate, AppError> {
    parse_date_key(value)
        .ok_or_else(|| AppError::bad_request("date must be formatted as YYYY-MM-DD"))
}

fn theme_response(mode: ThemeMode) -> ThemeResponse {
    ThemeResponse {
        mode,
        palette: *mode.palette(),
    }
}
