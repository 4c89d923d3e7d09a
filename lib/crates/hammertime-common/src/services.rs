//! Request/response messages and the client stub for
//! `microvm.services.api.v1alpha1.MicroVM`.

use serde::{Deserialize, Serialize};
use tonic::codegen::{Body, Bytes, StdError, http};

use crate::types::{MicroVm, MicroVmSpec};

/// Fully-qualified gRPC service name.
pub const SERVICE_NAME: &str = "microvm.services.api.v1alpha1.MicroVM";

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct CreateMicroVmRequest {
    #[prost(message, optional, tag = "1")]
    pub microvm: Option<MicroVmSpec>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct CreateMicroVmResponse {
    #[prost(message, optional, tag = "1")]
    pub microvm: Option<MicroVm>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct GetMicroVmRequest {
    #[prost(string, tag = "1")]
    pub uid: String,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct GetMicroVmResponse {
    #[prost(message, optional, tag = "1")]
    pub microvm: Option<MicroVm>,
}

/// List filter. `name` absent means no name filtering; `namespace` is
/// forwarded as given and interpreted by the service.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct ListMicroVmsRequest {
    #[prost(string, tag = "1")]
    pub namespace: String,
    #[prost(string, optional, tag = "2")]
    pub name: Option<String>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct ListMicroVmsResponse {
    #[prost(message, repeated, tag = "1")]
    pub microvm: Vec<MicroVm>,
}

#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
pub struct DeleteMicroVmRequest {
    #[prost(string, tag = "1")]
    pub uid: String,
}

/// Unary client for the flintlock MicroVM service.
///
/// `DeleteMicroVM` answers with `google.protobuf.Empty`, decoded as `()`.
#[derive(Debug, Clone)]
pub struct MicroVmClient<T> {
    inner: tonic::client::Grpc<T>,
}

impl<T> MicroVmClient<T>
where
    T: tonic::client::GrpcService<tonic::body::BoxBody>,
    T::Error: Into<StdError>,
    T::ResponseBody: Body<Data = Bytes> + Send + 'static,
    <T::ResponseBody as Body>::Error: Into<StdError> + Send,
{
    pub fn new(inner: T) -> Self {
        Self {
            inner: tonic::client::Grpc::new(inner),
        }
    }

    pub async fn create_micro_vm(
        &mut self,
        request: impl tonic::IntoRequest<CreateMicroVmRequest>,
    ) -> Result<tonic::Response<CreateMicroVmResponse>, tonic::Status> {
        self.unary(request.into_request(), "CreateMicroVM").await
    }

    pub async fn get_micro_vm(
        &mut self,
        request: impl tonic::IntoRequest<GetMicroVmRequest>,
    ) -> Result<tonic::Response<GetMicroVmResponse>, tonic::Status> {
        self.unary(request.into_request(), "GetMicroVM").await
    }

    pub async fn list_micro_vms(
        &mut self,
        request: impl tonic::IntoRequest<ListMicroVmsRequest>,
    ) -> Result<tonic::Response<ListMicroVmsResponse>, tonic::Status> {
        self.unary(request.into_request(), "ListMicroVMs").await
    }

    pub async fn delete_micro_vm(
        &mut self,
        request: impl tonic::IntoRequest<DeleteMicroVmRequest>,
    ) -> Result<tonic::Response<()>, tonic::Status> {
        self.unary(request.into_request(), "DeleteMicroVM").await
    }

    async fn unary<M1, M2>(
        &mut self,
        mut request: tonic::Request<M1>,
        method: &'static str,
    ) -> Result<tonic::Response<M2>, tonic::Status>
    where
        M1: ::prost::Message + Send + Sync + 'static,
        M2: ::prost::Message + Default + Send + Sync + 'static,
    {
        self.inner.ready().await.map_err(|e| {
            tonic::Status::unknown(format!("Service was not ready: {}", e.into()))
        })?;
        let path = http::uri::PathAndQuery::try_from(format!("/{SERVICE_NAME}/{method}"))
            .map_err(|e| tonic::Status::internal(format!("invalid method path: {e}")))?;
        request
            .extensions_mut()
            .insert(tonic::GrpcMethod::new(SERVICE_NAME, method));
        let codec = tonic::codec::ProstCodec::<M1, M2>::default();
        self.inner.unary(request, path, codec).await
    }
}
