use std::collections::HashMap;

use super::value::Value;

/// Side-channel key set by the skip protocol's return phase.
pub const SKIP_KEY: &str = "skip";

/// Per-request key/value coordination state.
///
/// Created fresh for each file-processing invocation and discarded afterwards;
/// never shared across requests.
#[derive(Debug, Clone, Default)]
pub struct SideChannel {
    data: HashMap<String, Value>,
}

impl SideChannel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.data.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Read a boolean flag; absent or non-boolean entries read as `false`.
    #[must_use]
    pub fn flag(&self, key: &str) -> bool {
        self.data
            .get(key)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

/// One file-processing invocation flowing through a composed stage chain.
///
/// `chain` lists the composed stage identifiers in request order. `data` is
/// the side-channel bag; a missing bag is tolerated and reads as "no skip".
#[derive(Debug, Clone)]
pub struct StageRequest {
    pub content: String,
    pub source_map: Option<String>,
    pub resource_path: String,
    pub resource_query: String,
    pub chain: Vec<String>,
    pub data: Option<SideChannel>,
}

impl StageRequest {
    #[must_use]
    pub fn new(resource_path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            source_map: None,
            resource_path: resource_path.into(),
            resource_query: String::new(),
            chain: Vec::new(),
            data: Some(SideChannel::new()),
        }
    }

    /// Set the resource query (including the leading `?`).
    #[must_use]
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.resource_query = query.into();
        self
    }

    /// Whether the skip flag is set. Treats an absent bag as `false` so that
    /// a protocol inconsistency degrades to a normal transform, not a crash.
    #[must_use]
    pub fn skip_requested(&self) -> bool {
        self.data.as_ref().is_some_and(|d| d.flag(SKIP_KEY))
    }
}
