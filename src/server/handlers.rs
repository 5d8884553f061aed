//! Route handlers for the summarization form.

use axum::body::Body;
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE, LOCATION, SET_COOKIE};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use uuid::Uuid;

use crate::models::lookup_label;
use crate::pipeline::{resolve_input, LengthBounds, PipelineError, SummaryRequest};
use crate::ui::form::{FormIntent, FormState};
use crate::ui::render::render_page;

use super::error::AppError;
use super::session::{session_id, Session};
use super::AppState;

/// `Content-Disposition` of the summary download.
pub const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"summary.txt\"";

/// `GET /`
pub async fn index(State(app): State<AppState>, headers: HeaderMap) -> Response {
    let session = Session::resolve(&headers);
    let state = app.sessions.get(&session.id).unwrap_or_default();
    page_response(session, &state)
}

/// `POST /summarize`
///
/// Applies the submitted model, bounds and input as events, then presses
/// the trigger and runs the model if the form accepted it.
pub async fn summarize(
    State(app): State<AppState>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let session = Session::resolve(&headers);
    let submission = FormSubmission::from_multipart(multipart).await?;

    let mut intents = Vec::with_capacity(4);

    if let Some(label) = submission.model.as_deref() {
        let model = lookup_label(label).ok_or_else(|| AppError::InvalidField {
            field: "model",
            message: format!("unknown model '{}'", label),
        })?;
        intents.push(FormIntent::ModelChanged { model });
    }

    if submission.max_length.is_some() || submission.min_length.is_some() {
        let current = app
            .sessions
            .get(&session.id)
            .map(|s| s.bounds)
            .unwrap_or_default();
        let bounds = LengthBounds::new(
            submission.max_length.unwrap_or(current.max_length),
            submission.min_length.unwrap_or(current.min_length),
        )
        .map_err(|e| AppError::InvalidField {
            field: "length",
            message: e.to_string(),
        })?;
        intents.push(FormIntent::BoundsChanged { bounds });
    }

    let typed = submission.text.unwrap_or_default();
    match resolve_input(submission.upload.as_deref(), &typed) {
        Ok(text) => {
            intents.push(FormIntent::InputChanged {
                text,
                from_upload: submission.upload.is_some(),
            });
            intents.push(FormIntent::TriggerPressed);
        }
        Err(e) => {
            tracing::warn!(session = %session.id, error = %e, "Upload rejected");
            intents.push(FormIntent::UploadRejected {
                message: e.to_string(),
            });
        }
    }

    let mut state = app.sessions.dispatch(session.id, intents);

    if let Some(generation) = state.pending_generation() {
        state = summarize_detached(&app, session.id, generation, state).await;
    }

    Ok(page_response(session, &state))
}

/// `POST /theme`
pub async fn toggle_theme(State(app): State<AppState>, headers: HeaderMap) -> Response {
    let session = Session::resolve(&headers);
    app.sessions.dispatch(session.id, [FormIntent::ThemeToggled]);

    let mut builder = Response::builder()
        .status(StatusCode::SEE_OTHER)
        .header(LOCATION, "/");
    if session.is_new {
        builder = builder.header(SET_COOKIE, session.cookie());
    }
    builder.body(Body::empty()).unwrap_or_default()
}

/// `GET /download`
///
/// Serves the displayed summary verbatim as `summary.txt`.
pub async fn download(
    State(app): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let summary = session_id(&headers)
        .and_then(|id| app.sessions.get(&id))
        .and_then(|state| state.summary().map(str::to_string))
        .ok_or(AppError::NoSummary)?;

    let mut response = Response::new(Body::from(summary));
    let headers = response.headers_mut();
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_static(DOWNLOAD_DISPOSITION),
    );
    Ok(response)
}

/// Run the model on its own task and record the outcome in the session.
///
/// The outcome lands even if the client disconnects mid-call, so the
/// session never stays in `Summarizing`.
async fn summarize_detached(
    app: &AppState,
    id: Uuid,
    generation: u64,
    state: FormState,
) -> FormState {
    let task_app = app.clone();
    let task = tokio::spawn(async move {
        let outcome = run_summary(&task_app, &state, generation).await;
        task_app.sessions.dispatch(id, [outcome])
    });

    match task.await {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(session = %id, error = %e, "Summarization task failed");
            app.sessions.dispatch(
                id,
                [FormIntent::SummaryFailed {
                    generation,
                    kind: "summarization_error",
                    message: "Summarization was interrupted".to_string(),
                }],
            )
        }
    }
}

/// Call the model for `state` and turn the outcome into an event.
async fn run_summary(app: &AppState, state: &FormState, generation: u64) -> FormIntent {
    let outcome = match SummaryRequest::new(state.input.clone(), state.model.identifier, state.bounds)
    {
        Ok(request) => app
            .summarizer
            .summarize(&request)
            .await
            .map_err(PipelineError::from),
        Err(e) => Err(e),
    };

    match outcome {
        Ok(result) => FormIntent::SummaryCompleted {
            generation,
            summary: result.summary_text,
        },
        Err(e) => {
            tracing::warn!(
                model = %state.model.identifier,
                kind = e.kind(),
                error = %e,
                "Summarization failed"
            );
            FormIntent::SummaryFailed {
                generation,
                kind: e.kind(),
                message: e.to_string(),
            }
        }
    }
}

fn page_response(session: Session, state: &FormState) -> Response {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/html; charset=utf-8");
    if session.is_new {
        builder = builder.header(SET_COOKIE, session.cookie());
    }
    builder
        .body(Body::from(render_page(state)))
        .unwrap_or_default()
}

/// Fields of a `POST /summarize` multipart body. Absent fields keep the
/// session's current values.
#[derive(Debug, Default)]
struct FormSubmission {
    model: Option<String>,
    text: Option<String>,
    max_length: Option<u32>,
    min_length: Option<u32>,
    /// File content, when a file was actually chosen.
    upload: Option<Vec<u8>>,
}

impl FormSubmission {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut submission = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "model" => submission.model = Some(field.text().await?),
                "text" => submission.text = Some(field.text().await?),
                "max_length" => {
                    submission.max_length = Some(parse_length("max_length", &field.text().await?)?)
                }
                "min_length" => {
                    submission.min_length = Some(parse_length("min_length", &field.text().await?)?)
                }
                "file" => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?;
                    // Browsers send an empty, unnamed part when no file is chosen.
                    if !file_name.is_empty() || !bytes.is_empty() {
                        tracing::debug!(file = %file_name, size = bytes.len(), "File uploaded");
                        submission.upload = Some(bytes.to_vec());
                    }
                }
                other => tracing::debug!(field = %other, "Ignoring unknown form field"),
            }
        }

        Ok(submission)
    }
}

fn parse_length(field: &'static str, value: &str) -> Result<u32, AppError> {
    value.trim().parse().map_err(|_| AppError::InvalidField {
        field,
        message: format!("'{}' is not a whole number", value),
    })
}
