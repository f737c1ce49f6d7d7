//! Wire types for the tracker REST API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One bug as returned by the tracker, plus its browser link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bug {
    /// Tracker-assigned bug number.
    pub id: u64,
    /// `{server}/show_bug.cgi?id={id}`, filled in by the client.
    #[serde(default)]
    pub link: String,
    /// One-line summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Workflow status (`NEW`, `ASSIGNED`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Any other fields the tracker sent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// `GET /bugs` response body.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct BugList {
    #[serde(default)]
    pub bugs: Vec<Bug>,
}
