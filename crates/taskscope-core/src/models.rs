// Task records as returned by the control plane for one workflow attempt.
// Values are decoded once and never mutated afterwards.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::TaskError;

/// State name that counts towards `totalSuccessTasks`.
pub const SUCCESS_STATE: &str = "success";

/// Opaque task identifier. Always travels as a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(String);

impl TaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Opaque structured parameters (`config`, `exportParams`, ...).
///
/// Keys keep their wire order. A JSON `null` decodes to the empty object.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Config(Map<String, Value>);

impl Config {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Compact JSON rendering; `{}` when empty.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.0)
    }
}

impl<'de> Deserialize<'de> for Config {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Option::<Map<String, Value>>::deserialize(deserializer)?;
        Ok(Self(map.unwrap_or_default()))
    }
}

impl From<Map<String, Value>> for Config {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub full_name: String,
    pub parent_id: Option<TaskId>,
    #[serde(default)]
    pub config: Config,
    #[serde(default)]
    pub upstreams: Vec<TaskId>,
    pub state: String,
    #[serde(default)]
    pub export_params: Config,
    #[serde(default)]
    pub store_params: Config,
    #[serde(default)]
    pub state_params: Config,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub retry_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub error: Config,
    pub is_group: bool,
}

impl Task {
    /// Minimal record: no parent, no upstreams, empty params, not started.
    pub fn new(
        id: impl Into<TaskId>,
        full_name: impl Into<String>,
        state: impl Into<String>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
            parent_id: None,
            config: Config::empty(),
            upstreams: Vec::new(),
            state: state.into(),
            export_params: Config::empty(),
            store_params: Config::empty(),
            state_params: Config::empty(),
            updated_at,
            retry_at: None,
            started_at: None,
            error: Config::empty(),
            is_group: false,
        }
    }

    pub fn with_started_at(mut self, started_at: DateTime<Utc>) -> Self {
        self.started_at = Some(started_at);
        self
    }

    pub fn with_parent(mut self, parent_id: impl Into<TaskId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    pub fn with_upstreams<I, T>(mut self, upstreams: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TaskId>,
    {
        self.upstreams = upstreams.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    pub fn group(mut self) -> Self {
        self.is_group = true;
        self
    }

    pub fn is_invoked(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_success(&self) -> bool {
        self.state == SUCCESS_STATE
    }

    /// Checks the invariants that decoding alone does not enforce.
    pub fn validate(&self) -> Result<(), TaskError> {
        if self.full_name.is_empty() {
            return Err(TaskError::Malformed {
                id: self.id.to_string(),
                reason: "fullName cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Response envelope of the attempt task listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskCollection {
    pub tasks: Vec<Task>,
}
