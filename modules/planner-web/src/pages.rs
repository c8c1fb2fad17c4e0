use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Form, Router,
};
use chrono::{NaiveDate, NaiveTime, Timelike};
use serde::Deserialize;
use tracing::{info, warn};

use planner_store::{EventRow, EventRowStore, NewEventRow};

use crate::templates::render_events_page;

// --- App State ---

#[derive(Clone)]
pub struct AppState {
    pub rows: Arc<dyn EventRowStore>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(events_page))
        .route("/events", post(create_event))
        .route("/events/{id}", post(update_event))
        .route("/events/{id}/delete", post(delete_event))
        .route("/health", get(|| async { "ok" }))
        .with_state(state)
        // Logging layer: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

// --- Request types ---

/// Both parameters are optional and a malformed `edit` value is ignored,
/// so hand-edited URLs still render the page.
#[derive(Deserialize, Default)]
pub struct PageQuery {
    edit: Option<String>,
    status: Option<String>,
}

/// Raw form fields, kept as strings so a rejected submission can be shown
/// back to the user unchanged.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EventForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
}

impl EventForm {
    pub fn from_row(row: &EventRow) -> Self {
        Self {
            title: row.title.clone(),
            date: row.date.format("%Y-%m-%d").to_string(),
            time: form_time(row.time),
            location: row.location.clone(),
            description: row.description.clone().unwrap_or_default(),
        }
    }

    /// Checks done here only; the store takes whatever it is given.
    pub fn parse(&self) -> Result<NewEventRow, String> {
        let title = self.title.trim();
        let location = self.location.trim();
        if title.is_empty() || location.is_empty() {
            return Err("Title and location are required.".to_string());
        }

        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| format!("Invalid date \"{}\". Use YYYY-MM-DD.", self.date.trim()))?;
        let time = parse_time(self.time.trim())
            .ok_or_else(|| format!("Invalid time \"{}\". Use HH:MM.", self.time.trim()))?;

        let description = Some(self.description.trim())
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(NewEventRow {
            title: title.to_string(),
            date,
            time,
            location: location.to_string(),
            description,
        })
    }
}

/// `HH:MM`, with seconds only when the stored time has them.
fn form_time(time: NaiveTime) -> String {
    if time.second() == 0 {
        time.format("%H:%M").to_string()
    } else {
        time.format("%H:%M:%S").to_string()
    }
}

fn parse_time(raw: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}

// --- View Models ---

pub enum Flash {
    Success(String),
    Error(String),
}

pub struct RowView {
    pub id: i32,
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
}

pub struct EventsPageView {
    pub rows: Vec<RowView>,
    pub flash: Option<Flash>,
    pub new_draft: EventForm,
    /// Row currently shown as an inline edit form, with its field values.
    pub editing: Option<(i32, EventForm)>,
}

fn row_to_view(row: &EventRow) -> RowView {
    RowView {
        id: row.id,
        title: row.title.clone(),
        date: row.date.format("%a %d %b %Y").to_string(),
        time: row.time.format("%H:%M").to_string(),
        location: row.location.clone(),
        description: row.description.clone().unwrap_or_default(),
    }
}

fn status_message(status: &str) -> Option<&'static str> {
    match status {
        "created" => Some("Event added."),
        "updated" => Some("Event updated."),
        "deleted" => Some("Event deleted."),
        _ => None,
    }
}

// --- Handlers ---

async fn events_page(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    let flash = query
        .status
        .as_deref()
        .and_then(status_message)
        .map(|m| Flash::Success(m.to_string()));
    let editing = query
        .edit
        .as_deref()
        .and_then(|raw| raw.trim().parse::<i32>().ok())
        .map(|id| (id, None));

    render_page(&state, flash, EventForm::default(), editing).await
}

async fn create_event(State(state): State<AppState>, Form(form): Form<EventForm>) -> Response {
    let row = match form.parse() {
        Ok(row) => row,
        Err(message) => {
            return render_page(&state, Some(Flash::Error(message)), form, None)
                .await
                .into_response();
        }
    };

    match state.rows.create(&row).await {
        Ok(created) => {
            info!(id = created.id, "Event created");
            Redirect::to("/?status=created").into_response()
        }
        Err(e) => {
            warn!(error = %e, "Failed to create event");
            let flash = Flash::Error(format!("Could not save the event: {e}"));
            render_page(&state, Some(flash), form, None).await.into_response()
        }
    }
}

async fn update_event(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<EventForm>,
) -> Response {
    let row = match form.parse() {
        Ok(row) => row,
        Err(message) => {
            let flash = Some(Flash::Error(message));
            return render_page(&state, flash, EventForm::default(), Some((id, Some(form))))
                .await
                .into_response();
        }
    };

    match state.rows.update(id, &row).await {
        Ok(true) => {
            info!(id, "Event updated");
            Redirect::to("/?status=updated").into_response()
        }
        Ok(false) => Redirect::to("/").into_response(),
        Err(e) => {
            warn!(error = %e, id, "Failed to update event");
            let flash = Some(Flash::Error(format!("Could not update the event: {e}")));
            render_page(&state, flash, EventForm::default(), Some((id, Some(form))))
                .await
                .into_response()
        }
    }
}

async fn delete_event(State(state): State<AppState>, Path(id): Path<i32>) -> Response {
    match state.rows.delete(id).await {
        Ok(true) => {
            info!(id, "Event deleted");
            Redirect::to("/?status=deleted").into_response()
        }
        Ok(false) => Redirect::to("/").into_response(),
        Err(e) => {
            warn!(error = %e, id, "Failed to delete event");
            let flash = Some(Flash::Error(format!("Could not delete the event: {e}")));
            render_page(&state, flash, EventForm::default(), None)
                .await
                .into_response()
        }
    }
}

/// Load the rows and render the page. `editing` carries the submitted
/// values when an edit was rejected; otherwise the stored row fills the form.
async fn render_page(
    state: &AppState,
    flash: Option<Flash>,
    new_draft: EventForm,
    editing: Option<(i32, Option<EventForm>)>,
) -> Html<String> {
    let (rows, flash) = match state.rows.list().await {
        Ok(rows) => (rows, flash),
        Err(e) => {
            warn!(error = %e, "Failed to load events");
            let message = format!("Could not load events: {e}");
            (Vec::new(), flash.or(Some(Flash::Error(message))))
        }
    };

    let editing = editing.and_then(|(id, draft)| {
        let row = rows.iter().find(|r| r.id == id)?;
        Some((id, draft.unwrap_or_else(|| EventForm::from_row(row))))
    });

    let view = EventsPageView {
        rows: rows.iter().map(row_to_view).collect(),
        flash,
        new_draft,
        editing,
    };

    Html(render_events_page(&view))
}
