use crate::{
    routes::{
        api::{delete_student, get_students, post_add_student, put_update_student},
        index::get_index_route,
        roster_view::{
            internal_delete_student, internal_get_student_form, internal_get_students,
            internal_post_student_form,
        },
        sse::sse_feed,
    },
    state::RosterState,
};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

pub mod api;
pub mod index;
pub mod roster_view;
pub mod sse;

const MAX_BODY_BYTES: usize = 64 * 1024;

pub fn router(state: RosterState) -> Router {
    //clients may be hosted on any origin
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(get_index_route))
        .route("/add-student", post(post_add_student))
        .route("/students", get(get_students))
        .route("/update-student/{id}", put(put_update_student))
        .route("/delete-student/{id}", delete(delete_student))
        .route(
            "/internal/students",
            get(internal_get_students).delete(internal_delete_student),
        )
        .route(
            "/internal/student_form",
            get(internal_get_student_form).post(internal_post_student_form),
        )
        .route("/sse_feed", get(sse_feed))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
