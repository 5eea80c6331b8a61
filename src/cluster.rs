use kube::Client;
use std::time::Duration;
use thiserror::Error;

/// Upper bound for any single control-plane query.
pub const QUERY_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a control-plane query produced no usable body. Every variant is
/// treated as the same unreachable signal by the checks; the cause only
/// shows up in logs.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query timed out after {}s", QUERY_TIMEOUT.as_secs())]
    Timeout,
    #[error(transparent)]
    Client(#[from] kube::Error),
    #[error("invalid request: {0}")]
    Request(#[from] http::Error),
}

/// Read-only query surface over the cluster control plane. Each query issues
/// one raw GET and returns the response body as text; parsing is left to the
/// check that owns the listing.
pub struct ClusterCollector {
    client: Client,
}

impl ClusterCollector {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a collector from the locally inferred kubeconfig/in-cluster
    /// environment.
    pub async fn connect() -> Result<Self, QueryError> {
        let client = Client::try_default().await?;
        Ok(Self::new(client))
    }

    async fn get(&self, path: &str) -> Result<String, QueryError> {
        let req = http::Request::builder()
            .method("GET")
            .uri(path)
            .body(Vec::new())?;

        match tokio::time::timeout(QUERY_TIMEOUT, self.client.request_text(req)).await {
            Ok(Ok(body)) => Ok(body),
            Ok(Err(err)) => Err(QueryError::Client(err)),
            Err(_) => Err(QueryError::Timeout),
        }
    }

    /// Cheap API-server reachability probe.
    pub async fn cluster_version(&self) -> Result<String, QueryError> {
        self.get("/version").await
    }

    pub async fn nodes(&self) -> Result<String, QueryError> {
        self.get("/api/v1/nodes").await
    }

    pub async fn pods(&self, namespace: &str) -> Result<String, QueryError> {
        self.get(&format!("/api/v1/namespaces/{}/pods", namespace)).await
    }

    pub async fn deployments(&self, namespace: &str) -> Result<String, QueryError> {
        self.get(&format!("/apis/apps/v1/namespaces/{}/deployments", namespace))
            .await
    }

    pub async fn storage_claims(&self, namespace: &str) -> Result<String, QueryError> {
        self.get(&format!(
            "/api/v1/namespaces/{}/persistentvolumeclaims",
            namespace
        ))
        .await
    }
}
