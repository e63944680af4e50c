use crate::data::Message;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::num::ParseIntError;
use std::str::ParseBoolError;

pub type EstudiantesResult<T> = Result<T, EstudiantesError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum EstudiantesError {
    #[snafu(display("Error opening database"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error commiting SQL transaction"))]
    CommitTransaction { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a number", name))]
    ParseNumberVar {
        source: ParseIntError,
        name: &'static str,
    },
    #[snafu(display("Unable to parse env var `{}` as a boolean", name))]
    ParseBoolVar {
        source: ParseBoolError,
        name: &'static str,
    },
    #[snafu(display("Unknown store kind {:?}, expected `postgres` or `memory`", kind))]
    UnknownStoreKind { kind: String },
    #[snafu(display("Estudiante no encontrado"))]
    MissingStudent { no_control: String },
    #[snafu(display("El estudiante ya existe"))]
    DuplicateStudent { no_control: String },
    #[snafu(display("Campo no válido para actualizar"))]
    InvalidField,
    #[snafu(display("Valor no válido para el campo {}", field))]
    InvalidFieldValue {
        source: serde_json::Error,
        field: &'static str,
    },
    #[snafu(display("Cuerpo de la petición no válido: {}", source.body_text()))]
    InvalidBody { source: JsonRejection },
}

impl EstudiantesError {
    pub const fn status_code(&self) -> StatusCode {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found
        const BI: StatusCode = StatusCode::BAD_REQUEST; //bad input
        const CF: StatusCode = StatusCode::CONFLICT; //already exists

        match self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MakeQuery { .. } | Self::CommitTransaction { .. } => ISE,
            Self::MigrateError { .. } => ISE,
            Self::BadEnvVar { .. } | Self::ParseNumberVar { .. } | Self::ParseBoolVar { .. } => {
                ISE
            }
            Self::UnknownStoreKind { .. } => ISE,
            Self::MissingStudent { .. } => NF,
            Self::DuplicateStudent { .. } => CF,
            Self::InvalidField | Self::InvalidFieldValue { .. } | Self::InvalidBody { .. } => BI,
        }
    }
}

impl IntoResponse for EstudiantesError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        let mensaje = if status_code.is_server_error() {
            error!(?self, "Error!");
            "Error interno del servidor".to_string()
        } else {
            debug!(?self, %status_code, "Rejected request");
            self.to_string()
        };

        (status_code, Json(Message::new(mensaje))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(error: EstudiantesError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body collects")
            .to_bytes();
        (status, serde_json::from_slice(&bytes).expect("body is json"))
    }

    #[tokio::test]
    async fn missing_student_is_not_found_with_message() {
        let (status, body) = render(EstudiantesError::MissingStudent {
            no_control: "19170001".into(),
        })
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["mensaje"], "Estudiante no encontrado");
    }

    #[tokio::test]
    async fn invalid_field_is_bad_request() {
        let (status, body) = render(EstudiantesError::InvalidField).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["mensaje"], "Campo no válido para actualizar");
    }

    #[tokio::test]
    async fn store_faults_hide_their_details() {
        let (status, body) = render(EstudiantesError::MakeQuery {
            source: sqlx::Error::PoolTimedOut,
        })
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["mensaje"], "Error interno del servidor");
    }

    #[test]
    fn duplicates_conflict() {
        let error = EstudiantesError::DuplicateStudent {
            no_control: "19170001".into(),
        };
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }
}
