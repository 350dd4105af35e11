use crate::{
    data::{
        IdForm, OptionalIdForm, StudentStore,
        student::{StudentFields, StudentRecord},
    },
    error::{MissingStudentSnafu, RosterResult},
    maud_conveniences::{form_submit_button, simple_form_element, subtitle},
    routes::sse::SseEvent,
    state::RosterState,
};
use axum::{
    Form,
    extract::{Query, State},
    response::IntoResponse,
};
use maud::{Markup, html};
use serde::Deserialize;
use snafu::OptionExt;
use std::sync::Arc;
use uuid::Uuid;

const HX_TRIGGER: &str = "HX-Trigger";
const ROSTER_MESSAGE_EVENT: &str = "roster_message";

///refreshes the list and pops up `message`
fn crud_trigger(message: &'static str) -> [(&'static str, String); 1] {
    let events = serde_json::json!({
        (SseEvent::CrudStudent.name()): "",
        (ROSTER_MESSAGE_EVENT): message,
    });

    [(HX_TRIGGER, events.to_string())]
}

/// Everything the page shows, taken from a single `get_all`.
///
/// Never patched after the fact: every mutation throws the old view away and
/// the next request builds a new one.
#[derive(Debug, Clone)]
pub struct RosterView {
    students: Arc<[StudentRecord]>,
    editing: Option<StudentRecord>,
}

impl RosterView {
    pub async fn fetch(store: &dyn StudentStore, editing: Option<Uuid>) -> RosterResult<Self> {
        let students: Arc<[StudentRecord]> = store.get_all().await?.into();

        let editing = match editing {
            Some(id) => Some(
                students
                    .iter()
                    .find(|student| student.id == id)
                    .cloned()
                    .context(MissingStudentSnafu { id })?,
            ),
            None => None,
        };

        Ok(Self { students, editing })
    }

    pub fn students(&self) -> &[StudentRecord] {
        &self.students
    }

    pub const fn editing(&self) -> Option<&StudentRecord> {
        self.editing.as_ref()
    }

    pub fn render_list(&self) -> Markup {
        html! {
            (subtitle("All Students"))
            @if self.students().is_empty() {
                p class="italic text-gray-400" {"No students found."}
            } @else {
                ul class="flex flex-col space-y-2" {
                    @for student in self.students() {
                        li class="flex flex-row items-center space-x-2" {
                            span {
                                strong {(student.name_or_blank())}
                                " (" (student.email_or_blank()) ") - Roll No: " (student.roll_no_or_blank())
                            }
                            button class="bg-slate-600 hover:bg-slate-800 font-bold py-1 px-2 rounded" hx-get="/internal/student_form" hx-vals={"{\"id\": \"" (student.id) "\"}"} hx-target="#in_focus" data-error-message="Error fetching student" {
                                "Edit"
                            }
                            button class="bg-red-600 hover:bg-red-800 font-bold py-1 px-2 rounded" hx-delete="/internal/students" hx-vals={"{\"id\": \"" (student.id) "\"}"} hx-target="#in_focus" data-error-message="Error deleting student" {
                                "Delete"
                            }
                        }
                    }
                }
            }
        }
    }

    pub fn render_form(&self) -> Markup {
        student_form(self.editing())
    }
}

fn student_form(editing: Option<&StudentRecord>) -> Markup {
    let (button_text, error_message) = if editing.is_some() {
        ("Update Student", "Error updating student")
    } else {
        ("Submit", "Error adding student")
    };

    html! {
        form hx-post="/internal/student_form" hx-trigger="submit" hx-target="#in_focus" data-error-message=(error_message) class="p-4" {
            @if let Some(student) = editing {
                input type="hidden" name="id" value=(student.id);
            }
            (simple_form_element("name", "Name", None, editing.map(StudentRecord::name_or_blank)))
            (simple_form_element("email", "Email", Some("email"), editing.map(StudentRecord::email_or_blank)))
            (simple_form_element("roll_no", "Roll Number", None, editing.map(StudentRecord::roll_no_or_blank)))
            (form_submit_button(button_text))
        }
    }
}

#[derive(Deserialize)]
pub struct StudentForm {
    id: Option<Uuid>,
    name: String,
    email: String,
    roll_no: String,
}

pub async fn internal_get_students(State(state): State<RosterState>) -> RosterResult<Markup> {
    Ok(RosterView::fetch(&*state, None).await?.render_list())
}

pub async fn internal_get_student_form(
    State(state): State<RosterState>,
    Query(OptionalIdForm { id }): Query<OptionalIdForm>,
) -> RosterResult<Markup> {
    if id.is_none() {
        return Ok(student_form(None));
    }

    Ok(RosterView::fetch(&*state, id).await?.render_form())
}

pub async fn internal_post_student_form(
    State(state): State<RosterState>,
    Form(StudentForm {
        id,
        name,
        email,
        roll_no,
    }): Form<StudentForm>,
) -> RosterResult<impl IntoResponse> {
    let fields = StudentFields {
        name: Some(name),
        email: Some(email),
        roll_no: Some(roll_no),
    };

    let message = match id {
        Some(id) => {
            state
                .replace_in_database(id, fields)
                .await?
                .context(MissingStudentSnafu { id })?;
            info!(%id, "Updated student from form");
            "Student updated successfully!"
        }
        None => {
            let id = state.insert_into_database(fields).await?;
            info!(%id, "Added student from form");
            "Student added successfully!"
        }
    };
    state.send_sse_event(SseEvent::CrudStudent);

    Ok((crud_trigger(message), student_form(None)))
}

pub async fn internal_delete_student(
    State(state): State<RosterState>,
    Query(IdForm { id }): Query<IdForm>,
) -> RosterResult<impl IntoResponse> {
    state
        .remove_from_database(id)
        .await?
        .context(MissingStudentSnafu { id })?;
    info!(%id, "Deleted student from list");
    state.send_sse_event(SseEvent::CrudStudent);

    Ok((
        crud_trigger("Student deleted successfully!"),
        student_form(None),
    ))
}
