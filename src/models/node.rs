//! Cluster node descriptor returned by `GET /nodes`.

use serde::{Deserialize, Serialize};

/// One member of the cache cluster.
///
/// Carried through untouched; the client never acts on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Node identity, e.g. `oblivion@cache-1`
    pub node: String,
    /// Whether the cluster currently sees the node
    #[serde(default = "default_online")]
    pub online: bool,
    /// Host name or address of the node
    pub server: String,
    /// Cluster protocol port
    #[serde(default)]
    pub port: u16,
    /// Discovery broadcast port
    #[serde(default)]
    pub broadcast: u16,
    /// HTTP API port
    #[serde(default)]
    pub http: u16,
}

fn default_online() -> bool {
    true
}
