use crate::{
    data::{
        StudentStore,
        student::{StudentFields, StudentRecord},
    },
    error::{
        AddStudentSnafu, ApiResult, DeleteStudentSnafu, FetchStudentsSnafu, InvalidBodySnafu,
        ParseUuidSnafu, StudentNotFoundSnafu, UpdateStudentSnafu,
    },
    routes::sse::SseEvent,
    state::RosterState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, header::CONTENT_TYPE},
};
use serde::{Deserialize, Serialize};
use snafu::{OptionExt, ResultExt};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UpdatedStudentResponse {
    pub message: String,
    pub student: StudentRecord,
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
}

///only a non-empty json body is parsed, anything else carries no fields at all
///
///broken json is still rejected
fn fields_from_body(headers: &HeaderMap, body: &Bytes) -> ApiResult<StudentFields> {
    if !is_json(headers) || body.iter().all(u8::is_ascii_whitespace) {
        return Ok(StudentFields::default());
    }

    serde_json::from_slice(body).context(InvalidBodySnafu)
}

pub async fn post_add_student(
    State(state): State<RosterState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<MessageResponse>> {
    let to_be_added = fields_from_body(&headers, &body)?;

    let id = state
        .insert_into_database(to_be_added)
        .await
        .context(AddStudentSnafu)?;
    info!(%id, "Added student");
    state.send_sse_event(SseEvent::CrudStudent);

    Ok(Json(MessageResponse::new("Student added successfully!")))
}

pub async fn get_students(State(state): State<RosterState>) -> ApiResult<Json<Vec<StudentRecord>>> {
    state.get_all().await.context(FetchStudentsSnafu).map(Json)
}

pub async fn put_update_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<UpdatedStudentResponse>> {
    let replacement = fields_from_body(&headers, &body)?;
    let uuid = Uuid::try_parse(&id)
        .context(ParseUuidSnafu { original: &id })
        .context(UpdateStudentSnafu)?;

    let student = state
        .replace_in_database(uuid, replacement)
        .await
        .context(UpdateStudentSnafu)?
        .context(StudentNotFoundSnafu { id: &id })?;
    info!(%uuid, "Updated student");
    state.send_sse_event(SseEvent::CrudStudent);

    Ok(Json(UpdatedStudentResponse {
        message: "Student updated successfully!".to_string(),
        student,
    }))
}

pub async fn delete_student(
    State(state): State<RosterState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    let uuid = Uuid::try_parse(&id)
        .context(ParseUuidSnafu { original: &id })
        .context(DeleteStudentSnafu)?;

    state
        .remove_from_database(uuid)
        .await
        .context(DeleteStudentSnafu)?
        .context(StudentNotFoundSnafu { id: &id })?;
    info!(%uuid, "Deleted student");
    state.send_sse_event(SseEvent::CrudStudent);

    Ok(Json(MessageResponse::new("Student deleted successfully!")))
}
