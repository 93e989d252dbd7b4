use thiserror::Error;

/// Why an input could not be turned into a canonical profile.
///
/// Bad individual values never end up here; they are coerced to 0 or left
/// out of the converted profile.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvertError {
    #[error("input is empty or invalid")]
    EmptyInput,

    #[error("malformed Tcl at byte {offset}: {message}")]
    Syntax { message: String, offset: usize },

    #[error("could not find 'advanced_shot' block in Tcl input")]
    MissingAdvancedBlock,

    #[error("conversion resulted in zero valid phases")]
    NoPhases,

    #[error("invalid profile JSON: {0}")]
    Json(String),
}
