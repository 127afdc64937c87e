use serde::Serialize;

/// Response for a successful document replacement.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReceipt {
    pub ok: bool,
    pub saved_at: String,
}
