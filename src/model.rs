//! Data model for control plane entities.
//!
//! State fields are parsed once, at deserialization time, into closed
//! enumerations. Values the client does not know about land in an
//! `Unknown` variant and are treated as "still in progress" by the waiters.

use crate::format::TabularRecord;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use strum::EnumString;

/// Lifecycle state of a server-side task.
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum TaskState {
    Queued,
    Started,
    Completed,
    Error,
    #[strum(default)]
    Unknown(String),
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Queued => write!(f, "QUEUED"),
            TaskState::Started => write!(f, "STARTED"),
            TaskState::Completed => write!(f, "COMPLETED"),
            TaskState::Error => write!(f, "ERROR"),
            TaskState::Unknown(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for TaskState {
    fn from(value: String) -> Self {
        TaskState::from_str(&value).unwrap_or(TaskState::Unknown(value))
    }
}

impl Serialize for TaskState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TaskState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(TaskState::from)
    }
}

/// Observable state of a resource (tenant, VM, disk, cluster...).
#[derive(Debug, Clone, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum EntityState {
    Creating,
    Ready,
    Resizing,
    Started,
    Stopped,
    Attached,
    Detached,
    PendingDelete,
    Error,
    #[strum(default)]
    Unknown(String),
}

impl EntityState {
    pub fn is_ready(&self) -> bool {
        matches!(self, EntityState::Ready)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, EntityState::Error)
    }
}

impl Default for EntityState {
    fn default() -> Self {
        EntityState::Unknown(String::new())
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntityState::Creating => "CREATING",
            EntityState::Ready => "READY",
            EntityState::Resizing => "RESIZING",
            EntityState::Started => "STARTED",
            EntityState::Stopped => "STOPPED",
            EntityState::Attached => "ATTACHED",
            EntityState::Detached => "DETACHED",
            EntityState::PendingDelete => "PENDING_DELETE",
            EntityState::Error => "ERROR",
            EntityState::Unknown(value) => value.as_str(),
        };
        f.write_str(label)
    }
}

impl From<String> for EntityState {
    fn from(value: String) -> Self {
        EntityState::from_str(&value).unwrap_or(EntityState::Unknown(value))
    }
}

impl Serialize for EntityState {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for EntityState {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(EntityState::from)
    }
}

/// Reference to the resource a task acted upon.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityRef {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub kind: String,
}

/// Error detail attached by the server to a failed task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for TaskErrorDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.code.is_empty(), self.message.is_empty()) {
            (false, false) => write!(f, "{}: {}", self.code, self.message),
            (true, _) => write!(f, "{}", self.message),
            (false, true) => write!(f, "{}", self.code),
        }
    }
}

/// Snapshot of a server-side asynchronous operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub operation: String,
    pub state: TaskState,
    #[serde(default)]
    pub entity: EntityRef,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<TaskErrorDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<i64>,
}

impl Task {
    /// Server supplied error details joined into a single line, if any.
    pub fn error_detail(&self) -> Option<String> {
        let details: Vec<String> = self
            .errors
            .iter()
            .map(|e| e.to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if details.is_empty() {
            None
        } else {
            Some(details.join("; "))
        }
    }
}

impl TabularRecord for Task {
    fn header() -> Vec<&'static str> {
        vec!["ID", "OPERATION", "STATE", "ENTITY_KIND", "ENTITY_ID"]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.operation.clone(),
            self.state.to_string(),
            self.entity.kind.clone(),
            self.entity.id.clone(),
        ]
    }
}

/// Collection envelope returned by list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceList<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// A server resource addressable as `/{COLLECTION}/{id}` with an observable state.
pub trait Resource: DeserializeOwned + Serialize + Send + Sync + 'static {
    /// URL path segment of the top-level collection
    const COLLECTION: &'static str;
    /// Human readable kind, used in messages
    const KIND: &'static str;

    fn state(&self) -> &EntityState;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: EntityState,
}

impl Resource for Tenant {
    const COLLECTION: &'static str = "tenants";
    const KIND: &'static str = "tenant";

    fn state(&self) -> &EntityState {
        &self.state
    }
}

impl TabularRecord for Tenant {
    fn header() -> Vec<&'static str> {
        vec!["ID", "NAME", "STATE"]
    }

    fn record(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.state.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: EntityState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

impl Resource for Project {
    const COLLECTION: &'static str = "projects";
    const KIND: &'static str = "project";

    fn state(&self) -> &EntityState {
        &self.state
    }
}

impl TabularRecord for Project {
    fn header() -> Vec<&'static str> {
        vec!["ID", "NAME", "STATE"]
    }

    fn record(&self) -> Vec<String> {
        vec![self.id.clone(), self.name.clone(), self.state.to_string()]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vm {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: EntityState,
    #[serde(default)]
    pub flavor: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_image_id: Option<String>,
}

impl Resource for Vm {
    const COLLECTION: &'static str = "vms";
    const KIND: &'static str = "vm";

    fn state(&self) -> &EntityState {
        &self.state
    }
}

impl TabularRecord for Vm {
    fn header() -> Vec<&'static str> {
        vec!["ID", "NAME", "STATE", "FLAVOR"]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.state.to_string(),
            self.flavor.clone(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Disk {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: EntityState,
    #[serde(default)]
    pub flavor: String,
    #[serde(default)]
    pub capacity_gb: u32,
}

impl Resource for Disk {
    const COLLECTION: &'static str = "disks";
    const KIND: &'static str = "disk";

    fn state(&self) -> &EntityState {
        &self.state
    }
}

impl TabularRecord for Disk {
    fn header() -> Vec<&'static str> {
        vec!["ID", "NAME", "STATE", "FLAVOR", "CAPACITY_GB"]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.state.to_string(),
            self.flavor.clone(),
            self.capacity_gb.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cluster {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub state: EntityState,
    #[serde(default, rename = "type")]
    pub cluster_type: String,
    #[serde(default)]
    pub worker_count: u32,
}

impl Resource for Cluster {
    const COLLECTION: &'static str = "clusters";
    const KIND: &'static str = "cluster";

    fn state(&self) -> &EntityState {
        &self.state
    }
}

impl TabularRecord for Cluster {
    fn header() -> Vec<&'static str> {
        vec!["ID", "NAME", "STATE", "TYPE", "WORKERS"]
    }

    fn record(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.state.to_string(),
            self.cluster_type.clone(),
            self.worker_count.to_string(),
        ]
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NameSpec {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachedDiskSpec {
    pub name: String,
    pub flavor: String,
    pub boot_disk: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity_gb: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VmCreateSpec {
    pub name: String,
    pub flavor: String,
    pub source_image_id: String,
    pub attached_disks: Vec<AttachedDiskSpec>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskCreateSpec {
    pub name: String,
    pub flavor: String,
    pub capacity_gb: u32,
    pub kind: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterCreateSpec {
    pub name: String,
    #[serde(rename = "type")]
    pub cluster_type: String,
    pub worker_count: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vm_flavor: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterResizeSpec {
    pub new_worker_count: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_state_is_case_insensitive() {
        assert_eq!(TaskState::from("completed".to_string()), TaskState::Completed);
        assert_eq!(TaskState::from("Error".to_string()), TaskState::Error);
        assert_eq!(TaskState::from("QUEUED".to_string()), TaskState::Queued);
    }

    #[test]
    fn test_unknown_task_state_keeps_raw_value() {
        let state = TaskState::from("PAUSED".to_string());
        assert_eq!(state, TaskState::Unknown("PAUSED".to_string()));
        assert_eq!(state.to_string(), "PAUSED");
    }

    #[test]
    fn test_entity_state_classification() {
        assert!(EntityState::from("ready".to_string()).is_ready());
        assert!(EntityState::from("ERROR".to_string()).is_failed());
        assert_eq!(
            EntityState::from("pending_delete".to_string()),
            EntityState::PendingDelete
        );

        let creating = EntityState::from("CREATING".to_string());
        assert!(!creating.is_ready());
        assert!(!creating.is_failed());
    }

    #[test]
    fn test_task_deserialization() {
        let json = r#"{
            "id": "t1",
            "operation": "CREATE_CLUSTER",
            "state": "error",
            "entity": {"id": "c1", "kind": "cluster"},
            "errors": [{"code": "InternalError", "message": "no capacity"}]
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.state, TaskState::Error);
        assert_eq!(task.entity.id, "c1");
        assert_eq!(
            task.error_detail().as_deref(),
            Some("InternalError: no capacity")
        );
    }

    #[test]
    fn test_task_without_errors_has_no_detail() {
        let json = r#"{"id": "t2", "operation": "DELETE_VM", "state": "STARTED"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.error_detail(), None);
        assert_eq!(task.entity, EntityRef::default());
    }

    #[test]
    fn test_cluster_state_serializes_as_upper_case() {
        let cluster = Cluster {
            id: "c1".to_string(),
            name: "kube".to_string(),
            state: EntityState::Ready,
            cluster_type: "KUBERNETES".to_string(),
            worker_count: 3,
        };

        let json = serde_json::to_string(&cluster).unwrap();
        assert!(json.contains("\"state\":\"READY\""));
        assert!(json.contains("\"type\":\"KUBERNETES\""));
        assert!(json.contains("\"workerCount\":3"));
    }
}
