use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque label of a node in a flow network ("A", "T", ...).
#[derive(Clone, Debug, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeId {
    fn from(item: &str) -> Self {
        NodeId(item.to_string())
    }
}

impl From<String> for NodeId {
    fn from(item: String) -> Self {
        NodeId(item)
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
