use serde::{Deserialize, Serialize};

/// Body of a successful `GET /digest` response. `raw` echoes the query
/// value as the server decoded it; `digest` is opaque to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigestReport {
    pub raw: String,
    pub digest: String,
}
