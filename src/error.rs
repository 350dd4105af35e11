use crate::routes::api::MessageResponse;
use axum::{
    Json,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::html;
use snafu::Snafu;
use std::num::ParseIntError;
use uuid::Uuid;

pub type RosterResult<T> = Result<T, RosterError>;
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum RosterError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    Migrate { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse IP port"))]
    ParsePort { source: ParseIntError },
    #[snafu(display("Unable to parse uuid {:?}", original))]
    ParseUuid {
        source: uuid::Error,
        original: String,
    },
    #[snafu(display("Unknown store kind {:?}, expected `postgres` or `memory`", kind))]
    UnknownStoreKind { kind: String },
    #[snafu(display("Unable to find student with UUID: {}", id))]
    MissingStudent { id: Uuid },
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        let basic_error = |desc| {
            html! {
                div class="bg-red-100 border border-red-400 text-red-700 px-4 py-3 rounded relative mb-4" role="alert" {
                    strong class="font-bold" {"Roster Error"}
                    span {(desc)}
                }
            }
        };

        let status_code = match &self {
            Self::MissingStudent { .. } => StatusCode::NOT_FOUND,
            Self::ParseUuid { .. } => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        error!(?self, "Error!");
        (status_code, Html(basic_error(self.to_string()))).into_response()
    }
}

/// Errors surfaced by the JSON API.
///
/// The display strings are what clients see, so they stay static: the
/// underlying fault (store errors, unparseable ids) only ever reaches the logs.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ApiError {
    #[snafu(display("Error adding student"))]
    AddStudent { source: RosterError },
    #[snafu(display("Error fetching students"))]
    FetchStudents { source: RosterError },
    #[snafu(display("Error updating student"))]
    UpdateStudent { source: RosterError },
    #[snafu(display("Error deleting student"))]
    DeleteStudent { source: RosterError },
    #[snafu(display("Student not found"))]
    StudentNotFound { id: String },
    #[snafu(display("Invalid request body"))]
    InvalidBody { source: serde_json::Error },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::AddStudent { .. }
            | Self::FetchStudents { .. }
            | Self::UpdateStudent { .. }
            | Self::DeleteStudent { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::StudentNotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidBody { .. } => StatusCode::BAD_REQUEST,
        };

        if status_code.is_server_error() {
            error!(?self, "Error!");
        } else {
            warn!(?self, "Rejected request");
        }

        (status_code, Json(MessageResponse::new(self.to_string()))).into_response()
    }
}
