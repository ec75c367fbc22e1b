use crate::{
    configuration::{Configuration, ConfigurationError},
    http_utils::{HttpClient, HttpRequestConfig},
    model::{
        Cluster, ClusterCreateSpec, ClusterResizeSpec, Disk, DiskCreateSpec, NameSpec, Project,
        Resource, ResourceList, Task, Tenant, Vm, VmCreateSpec,
    },
    waiter::{EntitySource, TaskSource},
};
use async_trait::async_trait;
use serde::Serialize;
use tracing::trace;

/// Error emitted by the control plane API client
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("server returned {status} ({code}): {message}")]
    Server {
        status: u16,
        code: String,
        message: String,
    },
    #[error("server returned status {status}")]
    Status { status: u16 },
    #[error("configuration error: {0}")]
    ConfigurationError(#[from] ConfigurationError),
}

impl ApiError {
    /// True when the control plane could not be reached at all.
    pub fn is_network(&self) -> bool {
        match self {
            ApiError::HttpError(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }

    /// HTTP status reported by the server, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } | ApiError::Status { status } => Some(*status),
            ApiError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskQuery<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
}

/// Typed client for the control plane REST API.
///
/// Every mutating call returns the `Task` the server accepted; completion is
/// observed separately through the waiters.
#[derive(Clone)]
pub struct ControlPlaneClient {
    http: HttpClient,
}

impl ControlPlaneClient {
    pub fn new(config: HttpRequestConfig) -> Result<Self, ApiError> {
        Ok(Self {
            http: HttpClient::new(config)?,
        })
    }

    pub fn from_configuration(configuration: &Configuration) -> Result<Self, ApiError> {
        Self::new(HttpRequestConfig::from_configuration(configuration)?)
    }

    pub fn base_url(&self) -> &str {
        &self.http.config().base_url
    }

    // Tasks

    pub async fn get_task(&self, task_id: &str) -> Result<Task, ApiError> {
        trace!("Fetching task {}...", task_id);
        self.http.get(&format!("/tasks/{}", task_id)).await
    }

    pub async fn list_tasks(
        &self,
        entity_id: Option<&str>,
        state: Option<&str>,
    ) -> Result<Vec<Task>, ApiError> {
        let query = TaskQuery { entity_id, state };
        let list: ResourceList<Task> = self.http.get_with_query("/tasks", &query).await?;
        Ok(list.items)
    }

    // Generic resource access

    pub async fn get_entity<E: Resource>(&self, id: &str) -> Result<E, ApiError> {
        trace!("Fetching {} {}...", E::KIND, id);
        self.http.get(&format!("/{}/{}", E::COLLECTION, id)).await
    }

    pub async fn delete_entity<E: Resource>(&self, id: &str) -> Result<Task, ApiError> {
        trace!("Deleting {} {}...", E::KIND, id);
        self.http.delete(&format!("/{}/{}", E::COLLECTION, id)).await
    }

    async fn list_nested<E: Resource>(&self, parent_path: &str) -> Result<Vec<E>, ApiError> {
        let list: ResourceList<E> = self
            .http
            .get(&format!("{}/{}", parent_path, E::COLLECTION))
            .await?;
        Ok(list.items)
    }

    async fn create_nested<E: Resource, B: Serialize>(
        &self,
        parent_path: &str,
        spec: &B,
    ) -> Result<Task, ApiError> {
        trace!("Creating {} under {}...", E::KIND, parent_path);
        self.http
            .post(&format!("{}/{}", parent_path, E::COLLECTION), spec)
            .await
    }

    // Tenants

    pub async fn create_tenant(&self, name: &str) -> Result<Task, ApiError> {
        let spec = NameSpec {
            name: name.to_string(),
        };
        self.create_nested::<Tenant, _>("", &spec).await
    }

    pub async fn list_tenants(&self) -> Result<Vec<Tenant>, ApiError> {
        self.list_nested::<Tenant>("").await
    }

    // Projects

    pub async fn create_project(&self, tenant_id: &str, name: &str) -> Result<Task, ApiError> {
        let spec = NameSpec {
            name: name.to_string(),
        };
        self.create_nested::<Project, _>(&format!("/tenants/{}", tenant_id), &spec)
            .await
    }

    pub async fn list_projects(&self, tenant_id: &str) -> Result<Vec<Project>, ApiError> {
        self.list_nested(&format!("/tenants/{}", tenant_id)).await
    }

    // VMs

    pub async fn create_vm(&self, project_id: &str, spec: &VmCreateSpec) -> Result<Task, ApiError> {
        self.create_nested::<Vm, _>(&format!("/projects/{}", project_id), spec)
            .await
    }

    pub async fn list_vms(&self, project_id: &str) -> Result<Vec<Vm>, ApiError> {
        self.list_nested(&format!("/projects/{}", project_id)).await
    }

    pub async fn start_vm(&self, vm_id: &str) -> Result<Task, ApiError> {
        self.http.post_action(&format!("/vms/{}/start", vm_id)).await
    }

    pub async fn stop_vm(&self, vm_id: &str) -> Result<Task, ApiError> {
        self.http.post_action(&format!("/vms/{}/stop", vm_id)).await
    }

    // Disks

    pub async fn create_disk(
        &self,
        project_id: &str,
        spec: &DiskCreateSpec,
    ) -> Result<Task, ApiError> {
        self.create_nested::<Disk, _>(&format!("/projects/{}", project_id), spec)
            .await
    }

    pub async fn list_disks(&self, project_id: &str) -> Result<Vec<Disk>, ApiError> {
        self.list_nested(&format!("/projects/{}", project_id)).await
    }

    // Clusters

    pub async fn create_cluster(
        &self,
        project_id: &str,
        spec: &ClusterCreateSpec,
    ) -> Result<Task, ApiError> {
        self.create_nested::<Cluster, _>(&format!("/projects/{}", project_id), spec)
            .await
    }

    pub async fn resize_cluster(
        &self,
        cluster_id: &str,
        new_worker_count: u32,
    ) -> Result<Task, ApiError> {
        let spec = ClusterResizeSpec { new_worker_count };
        self.http
            .post(&format!("/clusters/{}/resize", cluster_id), &spec)
            .await
    }

    pub async fn list_clusters(&self, project_id: &str) -> Result<Vec<Cluster>, ApiError> {
        self.list_nested(&format!("/projects/{}", project_id)).await
    }
}

#[async_trait]
impl TaskSource for ControlPlaneClient {
    async fn fetch_task_status(&self, task_id: &str) -> Result<Task, ApiError> {
        self.get_task(task_id).await
    }
}

#[async_trait]
impl<E: Resource> EntitySource<E> for ControlPlaneClient {
    async fn fetch_entity(&self, entity_id: &str) -> Result<E, ApiError> {
        self.get_entity::<E>(entity_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_uses_configured_endpoint() {
        let configuration = Configuration::default()
            .with_overrides(Some("http://10.1.2.3:9000"), None, None)
            .unwrap();
        let client = ControlPlaneClient::from_configuration(&configuration).unwrap();
        assert_eq!(client.base_url(), "http://10.1.2.3:9000");
    }

    #[test]
    fn test_api_error_status() {
        let error = ApiError::Server {
            status: 404,
            code: "NotFound".to_string(),
            message: "cluster c1 not found".to_string(),
        };
        assert_eq!(error.status(), Some(404));
        assert!(!error.is_network());
        assert_eq!(
            error.to_string(),
            "server returned 404 (NotFound): cluster c1 not found"
        );
    }

    #[test]
    fn test_task_query_skips_missing_filters() {
        let query = TaskQuery {
            entity_id: Some("c1"),
            state: None,
        };
        assert_eq!(serde_json::to_string(&query).unwrap(), r#"{"entityId":"c1"}"#);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_network_error() {
        // port 9 (discard) is closed on test machines
        let configuration = Configuration::default()
            .with_overrides(Some("http://127.0.0.1:9"), None, None)
            .unwrap();
        let client = ControlPlaneClient::from_configuration(&configuration).unwrap();

        let error = client.get_task("t1").await.unwrap_err();
        assert!(error.is_network());
    }
}
