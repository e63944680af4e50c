use crate::{
    data::{
        Message,
        student::{Student, StudentDetails, StudentFieldUpdate},
    },
    error::{EstudiantesError, EstudiantesResult, InvalidBodySnafu, MissingStudentSnafu},
    state::EstudiantesState,
};
use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::{Map, Value};
use snafu::ResultExt;

/// For `PUT`/`PATCH`, an unknown student takes precedence over a bad body.
async fn missing_or(
    state: &EstudiantesState,
    no_control: String,
    body_error: EstudiantesError,
) -> EstudiantesError {
    match state.get(&no_control).await {
        Ok(Some(_)) => body_error,
        Ok(None) => EstudiantesError::MissingStudent { no_control },
        Err(store_error) => store_error,
    }
}

#[axum::debug_handler]
pub async fn get_students(
    State(state): State<EstudiantesState>,
) -> EstudiantesResult<Json<Vec<Student>>> {
    let students = state.get_all().await?;
    debug!(count = students.len(), "Listed students");
    Ok(Json(students))
}

pub async fn post_student(
    State(state): State<EstudiantesState>,
    body: Result<Json<Student>, JsonRejection>,
) -> EstudiantesResult<(StatusCode, Json<Message>)> {
    let Json(student) = body.context(InvalidBodySnafu)?;
    let no_control = student.control_number.clone();

    state.insert(student).await?;
    info!(%no_control, "Added student");

    Ok((
        StatusCode::CREATED,
        Json(Message::new("Estudiante agregado exitosamente")),
    ))
}

pub async fn get_student(
    State(state): State<EstudiantesState>,
    Path(no_control): Path<String>,
) -> EstudiantesResult<Json<Student>> {
    let Some(student) = state.get(&no_control).await? else {
        return MissingStudentSnafu { no_control }.fail();
    };

    Ok(Json(student))
}

pub async fn put_student(
    State(state): State<EstudiantesState>,
    Path(no_control): Path<String>,
    body: Result<Json<StudentDetails>, JsonRejection>,
) -> EstudiantesResult<Json<Message>> {
    let details = match body.context(InvalidBodySnafu) {
        Ok(Json(details)) => details,
        Err(body_error) => return Err(missing_or(&state, no_control, body_error).await),
    };

    if !state.replace_details(&no_control, details).await? {
        return MissingStudentSnafu { no_control }.fail();
    }
    info!(%no_control, "Replaced student details");

    Ok(Json(Message::new("Estudiante actualizado exitosamente")))
}

#[axum::debug_handler]
pub async fn patch_student(
    State(state): State<EstudiantesState>,
    Path(no_control): Path<String>,
    body: Result<Json<Map<String, Value>>, JsonRejection>,
) -> EstudiantesResult<Json<Message>> {
    let update = match body
        .context(InvalidBodySnafu)
        .and_then(|Json(body)| StudentFieldUpdate::from_body(&body))
    {
        Ok(update) => update,
        Err(body_error) => return Err(missing_or(&state, no_control, body_error).await),
    };

    let column = update.column();
    if !state.update_field(&no_control, update).await? {
        return MissingStudentSnafu { no_control }.fail();
    }
    info!(%no_control, column, "Updated student field");

    Ok(Json(Message::new("Estudiante actualizado correctamente")))
}

pub async fn delete_student(
    State(state): State<EstudiantesState>,
    Path(no_control): Path<String>,
) -> EstudiantesResult<Json<Message>> {
    if !state.remove(&no_control).await? {
        return MissingStudentSnafu { no_control }.fail();
    }
    info!(%no_control, "Removed student");

    Ok(Json(Message::new("Estudiante eliminado exitosamente")))
}
