use crate::{maud_conveniences::title, state::RosterState};
use axum::extract::State;
use maud::{Markup, html};

pub async fn get_index_route(State(state): State<RosterState>) -> Markup {
    state.render(html! {
        div class="mx-auto bg-gray-800 p-8 rounded shadow-md max-w-4xl w-full flex flex-col space-y-4" {
            (title("Student Registration"))
            div sse-connect="/sse_feed" class="container flex flex-row justify-center space-x-4" {
                div id="in_focus" class="w-1/2" hx-get="/internal/student_form" hx-trigger="load" {}
                div id="all_students" class="w-1/2" hx-get="/internal/students" hx-trigger="load, sse:crud_student, crud_student from:body" {}
            }
        }
    })
}
