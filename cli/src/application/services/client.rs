//! Client facade — typed create/get/list/delete over a [`MicrovmService`].
//!
//! Every call is bounded by the request timeout, sent as the gRPC deadline and
//! enforced locally. Service errors are mapped once, here; nothing is retried.

use std::future::Future;
use std::time::Duration;

use hammertime_common::{
    CreateMicroVmRequest, DeleteMicroVmRequest, GetMicroVmRequest, ListMicroVmsRequest, MicroVm,
    MicroVmSpec,
};
use tonic::{Code, Request, Status};

use crate::application::ports::MicrovmService;
use crate::domain::{ListFilter, ServiceError};

/// One connection's worth of microvm operations.
pub struct MicrovmClient<S> {
    service: S,
    request_timeout: Duration,
}

impl<S: MicrovmService> MicrovmClient<S> {
    pub fn new(service: S, request_timeout: Duration) -> Self {
        Self {
            service,
            request_timeout,
        }
    }

    /// Create a microvm from `spec`, sent as-is.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails, times out, or the service answers
    /// without a microvm.
    pub async fn create(&mut self, spec: MicroVmSpec) -> Result<MicroVm, ServiceError> {
        tracing::debug!(id = %spec.id, namespace = %spec.namespace, "CreateMicroVM");
        let request = self.request(CreateMicroVmRequest {
            microvm: Some(spec),
        });
        let response = bounded("create", self.request_timeout, self.service.create_microvm(request))
            .await?
            .map_err(|status| status_error("create", None, status))?;
        response
            .microvm
            .ok_or(ServiceError::EmptyResponse { operation: "create" })
    }

    /// Fetch the microvm with `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the service does not know `uid`,
    /// or another [`ServiceError`] if the call fails.
    pub async fn get(&mut self, uid: &str) -> Result<MicroVm, ServiceError> {
        tracing::debug!(uid, "GetMicroVM");
        let request = self.request(GetMicroVmRequest {
            uid: uid.to_string(),
        });
        let response = bounded("get", self.request_timeout, self.service.get_microvm(request))
            .await?
            .map_err(|status| status_error("get", Some(uid), status))?;
        response
            .microvm
            .ok_or(ServiceError::EmptyResponse { operation: "get" })
    }

    /// List microvms matching `filter`. An absent name matches every name.
    ///
    /// # Errors
    ///
    /// Returns an error if the call fails or times out.
    pub async fn list(&mut self, filter: &ListFilter) -> Result<Vec<MicroVm>, ServiceError> {
        tracing::debug!(name = ?filter.name, namespace = %filter.namespace, "ListMicroVMs");
        let request = self.request(ListMicroVmsRequest {
            namespace: filter.namespace.clone(),
            name: filter.name.clone(),
        });
        let response = bounded("list", self.request_timeout, self.service.list_microvms(request))
            .await?
            .map_err(|status| status_error("list", None, status))?;
        Ok(response.microvm)
    }

    /// Delete the microvm with `uid`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::NotFound`] if the service does not know `uid`,
    /// or another [`ServiceError`] if the call fails.
    pub async fn delete(&mut self, uid: &str) -> Result<(), ServiceError> {
        tracing::debug!(uid, "DeleteMicroVM");
        let request = self.request(DeleteMicroVmRequest {
            uid: uid.to_string(),
        });
        bounded("delete", self.request_timeout, self.service.delete_microvm(request))
            .await?
            .map_err(|status| status_error("delete", Some(uid), status))
    }

    /// Release the connection.
    pub fn close(self) {
        tracing::debug!("closing connection");
        drop(self.service);
    }

    fn request<T>(&self, message: T) -> Request<T> {
        let mut request = Request::new(message);
        request.set_timeout(self.request_timeout);
        request
    }
}

async fn bounded<T>(
    operation: &'static str,
    after: Duration,
    call: impl Future<Output = Result<T, Status>>,
) -> Result<Result<T, Status>, ServiceError> {
    tokio::time::timeout(after, call)
        .await
        .map_err(|_| ServiceError::Timeout { operation, after })
}

fn status_error(operation: &'static str, uid: Option<&str>, status: Status) -> ServiceError {
    match (status.code(), uid) {
        (Code::NotFound, Some(uid)) => ServiceError::NotFound {
            uid: uid.to_string(),
            message: status.message().to_string(),
        },
        (code, _) => ServiceError::Rpc {
            operation,
            code: format!("{code:?}"),
            message: status.message().to_string(),
        },
    }
}
