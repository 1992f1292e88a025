//! In-memory task store with time-based expiry.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::observability::metrics;

/// Milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// Lifecycle state of a proxied call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Pending,
    Completed,
    Failed,
}

/// One in-flight or completed proxied call.
///
/// Exactly one of `result` and `error` is set once the task is terminal;
/// both are absent while the task is pending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRecord {
    pub status: TaskStatus,
    pub result: Option<Value>,
    pub error: Option<String>,
    /// Last mutation time, milliseconds since the Unix epoch.
    pub timestamp: u64,
}

/// A thread-safe store of task records, keyed by opaque task id.
///
/// Cloning is cheap; all clones share the same backing map.
#[derive(Clone)]
pub struct TaskStore {
    inner: Arc<DashMap<String, TaskRecord>>,
    expiry_ms: u64,
}

impl TaskStore {
    /// Create an empty store with the given expiry window.
    pub fn new(expiry_ms: u64) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            expiry_ms,
        }
    }

    /// Insert a fresh pending task and return its id.
    pub fn create(&self) -> String {
        let task_id = Uuid::new_v4().to_string();
        self.inner.insert(
            task_id.clone(),
            TaskRecord {
                status: TaskStatus::Pending,
                result: None,
                error: None,
                timestamp: now_ms(),
            },
        );
        metrics::record_store_size(self.inner.len());
        task_id
    }

    /// Overwrite a task's state and refresh its timestamp.
    ///
    /// Unknown ids are ignored: the forwarder may resolve after the sweep
    /// already removed its task, and that race must stay silent.
    pub fn update(
        &self,
        task_id: &str,
        status: TaskStatus,
        result: Option<Value>,
        error: Option<String>,
    ) {
        if let Some(mut record) = self.inner.get_mut(task_id) {
            *record = TaskRecord {
                status,
                result,
                error,
                timestamp: now_ms(),
            };
        }
    }

    /// Snapshot of a task record, if it is still live.
    pub fn get(&self, task_id: &str) -> Option<TaskRecord> {
        self.inner.get(task_id).map(|r| r.value().clone())
    }

    /// Remove every record older than the expiry window relative to `now`.
    pub fn sweep(&self, now: u64) {
        self.inner
            .retain(|_, record| now.saturating_sub(record.timestamp) <= self.expiry_ms);
        metrics::record_store_size(self.inner.len());
    }

    /// Number of live tasks.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
