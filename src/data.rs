use serde::{Deserialize, Deserializer, Serialize};

pub mod student;

/// The `{"mensaje": ...}` body every non-record response carries.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub mensaje: String,
}

impl Message {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
        }
    }
}

/// Deserializes a nullable field that must still be present in the body.
///
/// `Option` fields are otherwise treated as `None` when the key is missing.
pub fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::deserialize(deserializer)
}
