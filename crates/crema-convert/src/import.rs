use serde_json::Value;
use tracing::debug;

use crema_model::Profile;

use crate::error::ConvertError;
use crate::legacy::convert_json;
use crate::tcl::convert_tcl;

/// Read profiles from any supported text: a JSON array of profiles, a single
/// JSON profile in either schema, or a Tcl settings file.
pub fn import(input: &str) -> Result<Vec<Profile>, ConvertError> {
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Array(docs)) => {
            debug!(count = docs.len(), "importing JSON profile list");
            docs.iter().map(convert_json).collect()
        }
        Ok(doc @ Value::Object(_)) => Ok(vec![convert_json(&doc)?]),
        Ok(_) => Err(ConvertError::Json(
            "expected a profile object or a list of profiles".to_string(),
        )),
        Err(e) => {
            debug!(error = %e, "input is not JSON, trying Tcl");
            Ok(vec![convert_tcl(input)?])
        }
    }
}
