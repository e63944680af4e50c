use crate::{
    config::ServerConfig,
    routes::students::{
        delete_student, get_student, get_students, patch_student, post_student, put_student,
    },
    state::EstudiantesState,
};
use axum::{Router, routing::get};
use tower_http::{limit::RequestBodyLimitLayer, trace::TraceLayer};

pub mod students;

pub fn router(state: EstudiantesState, server_config: &ServerConfig) -> Router {
    let trace_layer = TraceLayer::new_for_http();

    Router::new()
        .route("/estudiantes", get(get_students).post(post_student))
        .route(
            "/estudiantes/{no_control}",
            get(get_student)
                .put(put_student)
                .patch(patch_student)
                .delete(delete_student),
        )
        .layer(RequestBodyLimitLayer::new(server_config.body_limit()))
        .layer(trace_layer)
        .with_state(state)
}
