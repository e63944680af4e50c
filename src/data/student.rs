use crate::{
    data::present,
    error::{EstudiantesError, EstudiantesResult, InvalidFieldValueSnafu},
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use snafu::ResultExt;

#[derive(Serialize, Deserialize, sqlx::FromRow, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    #[serde(rename = "no_control")]
    #[sqlx(rename = "no_control")]
    pub control_number: String,
    #[serde(rename = "nombre", deserialize_with = "present")]
    #[sqlx(rename = "nombre")]
    pub first_name: Option<String>,
    #[serde(rename = "ap_paterno", deserialize_with = "present")]
    #[sqlx(rename = "ap_paterno")]
    pub paternal_surname: Option<String>,
    #[serde(rename = "ap_materno", deserialize_with = "present")]
    #[sqlx(rename = "ap_materno")]
    pub maternal_surname: Option<String>,
    #[serde(rename = "semestre", deserialize_with = "present")]
    #[sqlx(rename = "semestre")]
    pub semester: Option<i32>,
}

/// Everything about a student apart from the control number, as sent to `PUT`.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StudentDetails {
    #[serde(rename = "nombre", deserialize_with = "present")]
    pub first_name: Option<String>,
    #[serde(rename = "ap_paterno", deserialize_with = "present")]
    pub paternal_surname: Option<String>,
    #[serde(rename = "ap_materno", deserialize_with = "present")]
    pub maternal_surname: Option<String>,
    #[serde(rename = "semestre", deserialize_with = "present")]
    pub semester: Option<i32>,
}

impl Student {
    pub fn replace_details(&mut self, details: StudentDetails) {
        let StudentDetails {
            first_name,
            paternal_surname,
            maternal_surname,
            semester,
        } = details;

        self.first_name = first_name;
        self.paternal_surname = paternal_surname;
        self.maternal_surname = maternal_surname;
        self.semester = semester;
    }

    pub fn apply(&mut self, update: StudentFieldUpdate) {
        match update {
            StudentFieldUpdate::FirstName(first_name) => self.first_name = first_name,
            StudentFieldUpdate::PaternalSurname(surname) => self.paternal_surname = surname,
            StudentFieldUpdate::MaternalSurname(surname) => self.maternal_surname = surname,
            StudentFieldUpdate::Semester(semester) => self.semester = semester,
        }
    }
}

/// The single field a `PATCH` changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentFieldUpdate {
    FirstName(Option<String>),
    PaternalSurname(Option<String>),
    MaternalSurname(Option<String>),
    Semester(Option<i32>),
}

impl StudentFieldUpdate {
    /// Picks the first recognised key in the order `nombre`, `ap_paterno`, `ap_materno`, `semestre`.
    ///
    /// Only that one key is used, any later recognised keys in the same body are ignored.
    pub fn from_body(body: &Map<String, Value>) -> EstudiantesResult<Self> {
        fn value_of<T: DeserializeOwned>(
            value: &Value,
            field: &'static str,
        ) -> EstudiantesResult<Option<T>> {
            Option::<T>::deserialize(value).context(InvalidFieldValueSnafu { field })
        }

        if let Some(value) = body.get("nombre") {
            Ok(Self::FirstName(value_of(value, "nombre")?))
        } else if let Some(value) = body.get("ap_paterno") {
            Ok(Self::PaternalSurname(value_of(value, "ap_paterno")?))
        } else if let Some(value) = body.get("ap_materno") {
            Ok(Self::MaternalSurname(value_of(value, "ap_materno")?))
        } else if let Some(value) = body.get("semestre") {
            Ok(Self::Semester(value_of(value, "semestre")?))
        } else {
            Err(EstudiantesError::InvalidField)
        }
    }

    pub const fn column(&self) -> &'static str {
        match self {
            Self::FirstName(_) => "nombre",
            Self::PaternalSurname(_) => "ap_paterno",
            Self::MaternalSurname(_) => "ap_materno",
            Self::Semester(_) => "semestre",
        }
    }
}
