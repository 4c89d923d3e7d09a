//! gRPC implementation of the `MicrovmService` and `ClientFactory` ports.

use hammertime_common::{
    CreateMicroVmRequest, CreateMicroVmResponse, DeleteMicroVmRequest, GetMicroVmRequest,
    GetMicroVmResponse, ListMicroVmsRequest, ListMicroVmsResponse, MicroVmClient,
};
use tonic::service::interceptor::InterceptedService;
use tonic::transport::Channel;
use tonic::{Request, Status};

use crate::application::ports::{ClientFactory, MicrovmService};
use crate::domain::{ClientConfig, TransportError};
use crate::infra::auth::AuthInterceptor;
use crate::infra::dialer;

/// Client stub over an authenticated channel.
pub type GrpcMicrovmClient = MicroVmClient<InterceptedService<Channel, AuthInterceptor>>;

impl MicrovmService for GrpcMicrovmClient {
    async fn create_microvm(
        &mut self,
        request: Request<CreateMicroVmRequest>,
    ) -> Result<CreateMicroVmResponse, Status> {
        Ok(self.create_micro_vm(request).await?.into_inner())
    }

    async fn get_microvm(
        &mut self,
        request: Request<GetMicroVmRequest>,
    ) -> Result<GetMicroVmResponse, Status> {
        Ok(self.get_micro_vm(request).await?.into_inner())
    }

    async fn list_microvms(
        &mut self,
        request: Request<ListMicroVmsRequest>,
    ) -> Result<ListMicroVmsResponse, Status> {
        Ok(self.list_micro_vms(request).await?.into_inner())
    }

    async fn delete_microvm(&mut self, request: Request<DeleteMicroVmRequest>) -> Result<(), Status> {
        self.delete_micro_vm(request).await.map(tonic::Response::into_inner)
    }
}

/// Dials flintlock and wraps the channel with basic-auth credentials.
pub struct GrpcClientFactory;

impl ClientFactory for GrpcClientFactory {
    type Service = GrpcMicrovmClient;

    async fn connect(&self, config: &ClientConfig) -> Result<Self::Service, TransportError> {
        let interceptor = AuthInterceptor::new(config.auth_token.as_deref())?;
        let channel = dialer::dial(config).await?;
        Ok(MicroVmClient::new(InterceptedService::new(channel, interceptor)))
    }
}
