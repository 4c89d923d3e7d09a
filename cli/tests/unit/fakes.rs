//! In-memory flintlock fake.
//!
//! One store behind one mutex, shared by the factory and every service it
//! hands out. Records every call, connect and close so tests can assert on
//! ordering and on what never happened.

#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use hammertime_cli::application::ports::{ClientFactory, MicrovmService};
use hammertime_cli::domain::{ClientConfig, TransportError};
use hammertime_common::{
    CreateMicroVmRequest, CreateMicroVmResponse, DeleteMicroVmRequest, GetMicroVmRequest,
    GetMicroVmResponse, ListMicroVmsRequest, ListMicroVmsResponse, MicroVm, MicroVmSpec,
    MicroVmState, MicroVmStatus,
};
use tonic::{Request, Status};

/// One RPC as the fake received it.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Create(MicroVmSpec),
    Get(String),
    List {
        name: Option<String>,
        namespace: String,
    },
    Delete(String),
}

#[derive(Default)]
pub struct FakeState {
    pub microvms: Vec<MicroVm>,
    pub calls: Vec<Call>,
    /// Whether each call carried a `grpc-timeout` deadline, in call order.
    pub deadlines: Vec<bool>,
    pub connects: usize,
    pub closes: usize,
    pub next_uid: usize,
    pub refuse_connect: bool,
    pub fail_delete_uid: Option<String>,
    pub delay: Option<Duration>,
}

#[derive(Clone, Default)]
pub struct FakeServer {
    state: Arc<Mutex<FakeState>>,
}

impl FakeServer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A server already holding microvms `(name, namespace)`, with uids
    /// `uid-1`, `uid-2`, ... in the given order.
    pub fn with_microvms(microvms: &[(&str, &str)]) -> Self {
        let server = Self::new();
        for (name, namespace) in microvms {
            server.seed(name, namespace);
        }
        server
    }

    /// Insert a created microvm without recording a call; returns its uid.
    pub fn seed(&self, name: &str, namespace: &str) -> String {
        let mut state = self.state();
        let spec = MicroVmSpec {
            id: name.to_string(),
            namespace: namespace.to_string(),
            ..MicroVmSpec::default()
        };
        let microvm = state.store(spec);
        microvm.uid().expect("uid").to_string()
    }

    /// Insert a microvm whose spec carries no uid, as a misbehaving server
    /// might return it from `list`.
    pub fn seed_without_uid(&self, name: &str, namespace: &str) {
        self.state().microvms.push(MicroVm {
            version: 1,
            spec: Some(MicroVmSpec {
                id: name.to_string(),
                namespace: namespace.to_string(),
                ..MicroVmSpec::default()
            }),
            status: None,
        });
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("lock")
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state().calls.clone()
    }

    pub fn connects(&self) -> usize {
        self.state().connects
    }

    pub fn closes(&self) -> usize {
        self.state().closes
    }

    pub fn uids(&self) -> Vec<String> {
        self.state()
            .microvms
            .iter()
            .filter_map(|m| m.uid().map(ToString::to_string))
            .collect()
    }

    pub fn refuse_connect(&self) {
        self.state().refuse_connect = true;
    }

    pub fn fail_delete(&self, uid: &str) {
        self.state().fail_delete_uid = Some(uid.to_string());
    }

    pub fn delay(&self, delay: Duration) {
        self.state().delay = Some(delay);
    }

    pub fn factory(&self) -> FakeFactory {
        FakeFactory {
            server: self.clone(),
        }
    }

    async fn receive<T>(&self, call: Call, request: &Request<T>) {
        let delay = {
            let mut state = self.state();
            state.calls.push(call);
            state
                .deadlines
                .push(request.metadata().get("grpc-timeout").is_some());
            state.delay
        };
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

impl FakeState {
    fn store(&mut self, mut spec: MicroVmSpec) -> MicroVm {
        if spec.uid.as_deref().is_none_or(str::is_empty) {
            self.next_uid += 1;
            spec.uid = Some(format!("uid-{}", self.next_uid));
        }
        let microvm = MicroVm {
            version: 1,
            spec: Some(spec),
            status: Some(MicroVmStatus {
                state: MicroVmState::Created as i32,
            }),
        };
        self.microvms.push(microvm.clone());
        microvm
    }

    fn find(&self, uid: &str) -> Option<&MicroVm> {
        self.microvms.iter().find(|m| m.uid() == Some(uid))
    }
}

/// A connection handed out by [`FakeFactory`]; dropping it counts as a close.
pub struct FakeService {
    server: FakeServer,
}

impl Drop for FakeService {
    fn drop(&mut self) {
        if let Ok(mut state) = self.server.state.lock() {
            state.closes += 1;
        }
    }
}

impl MicrovmService for FakeService {
    async fn create_microvm(
        &mut self,
        request: Request<CreateMicroVmRequest>,
    ) -> Result<CreateMicroVmResponse, Status> {
        let spec = request
            .get_ref()
            .microvm
            .clone()
            .ok_or_else(|| Status::invalid_argument("microvm spec required"))?;
        self.server.receive(Call::Create(spec.clone()), &request).await;
        let microvm = self.server.state().store(spec);
        Ok(CreateMicroVmResponse {
            microvm: Some(microvm),
        })
    }

    async fn get_microvm(
        &mut self,
        request: Request<GetMicroVmRequest>,
    ) -> Result<GetMicroVmResponse, Status> {
        let uid = request.get_ref().uid.clone();
        self.server.receive(Call::Get(uid.clone()), &request).await;
        let state = self.server.state();
        let microvm = state
            .find(&uid)
            .cloned()
            .ok_or_else(|| Status::not_found(format!("microvm {uid} not found")))?;
        Ok(GetMicroVmResponse {
            microvm: Some(microvm),
        })
    }

    async fn list_microvms(
        &mut self,
        request: Request<ListMicroVmsRequest>,
    ) -> Result<ListMicroVmsResponse, Status> {
        let ListMicroVmsRequest { namespace, name } = request.get_ref().clone();
        let call = Call::List {
            name: name.clone(),
            namespace: namespace.clone(),
        };
        self.server.receive(call, &request).await;
        let state = self.server.state();
        let microvm = state
            .microvms
            .iter()
            .filter(|m| {
                let spec = m.spec.clone().unwrap_or_default();
                (namespace.is_empty() || spec.namespace == namespace)
                    && name.as_ref().is_none_or(|n| spec.id == *n)
            })
            .cloned()
            .collect();
        Ok(ListMicroVmsResponse { microvm })
    }

    async fn delete_microvm(&mut self, request: Request<DeleteMicroVmRequest>) -> Result<(), Status> {
        let uid = request.get_ref().uid.clone();
        self.server.receive(Call::Delete(uid.clone()), &request).await;
        let mut state = self.server.state();
        if state.fail_delete_uid.as_deref() == Some(uid.as_str()) {
            return Err(Status::internal(format!("failed to delete {uid}")));
        }
        if state.find(&uid).is_none() {
            return Err(Status::not_found(format!("microvm {uid} not found")));
        }
        state.microvms.retain(|m| m.uid() != Some(uid.as_str()));
        Ok(())
    }
}

pub struct FakeFactory {
    server: FakeServer,
}

impl ClientFactory for FakeFactory {
    type Service = FakeService;

    async fn connect(&self, config: &ClientConfig) -> Result<FakeService, TransportError> {
        let mut state = self.server.state();
        if state.refuse_connect {
            return Err(TransportError::Connect {
                address: config.address.clone(),
                reason: "connection refused".to_string(),
            });
        }
        state.connects += 1;
        Ok(FakeService {
            server: self.server.clone(),
        })
    }
}
