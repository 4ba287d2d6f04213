use serde::Deserialize;
use serde_json::Value;

use crate::errors::ServiceError;

/// Marker emitted by the visualization-query endpoint. Error pages from the
/// upstream service are HTML and never contain it.
pub const RESPONSE_MARKER: &str = "google.visualization.Query.setResponse";

#[derive(Debug, Default, Deserialize)]
pub struct GvizEnvelope {
    #[serde(default)]
    pub table: Option<GvizTable>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GvizTable {
    #[serde(default)]
    pub rows: Vec<GvizRow>,
}

/// One source row: a sparse ordered list of optional cells.
#[derive(Debug, Default, Deserialize)]
pub struct GvizRow {
    #[serde(default)]
    pub c: Option<Vec<Option<GvizCell>>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GvizCell {
    #[serde(default)]
    pub v: Option<Value>,
}

/// Strip the callback wrapper and decode the embedded JSON payload.
///
/// The payload sits between the first `(` and the last `)` of the response
/// body. A missing `table` (or `table.rows`) is a legitimate zero-row result;
/// a missing marker or undecodable payload is a [`ServiceError::FormatError`].
pub fn decode_envelope(body: &str) -> Result<Vec<GvizRow>, ServiceError> {
    if !body.contains(RESPONSE_MARKER) {
        return Err(ServiceError::FormatError(
            "response is not a visualization query payload; check that the sheet name is correct and the sheet is public".to_string(),
        ));
    }

    let start = body.find('(');
    let end = body.rfind(')');
    let payload = match (start, end) {
        (Some(start), Some(end)) if start + 1 < end => &body[start + 1..end],
        _ => {
            return Err(ServiceError::FormatError(
                "malformed callback wrapper in sheet response".to_string(),
            ))
        }
    };

    let envelope: GvizEnvelope = serde_json::from_str(payload)?;
    Ok(envelope.table.map(|table| table.rows).unwrap_or_default())
}
