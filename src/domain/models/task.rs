use serde::Serialize;

/// A to-do entry. Ids come from a per-process counter and are never reused.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Task {
    pub id: u64,
    pub text: String,
}
