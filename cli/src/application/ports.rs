//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the wire types, never from
//! `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};

use anyhow::Result;
use hammertime_common::{
    CreateMicroVmRequest, CreateMicroVmResponse, DeleteMicroVmRequest, GetMicroVmRequest,
    GetMicroVmResponse, ListMicroVmsRequest, ListMicroVmsResponse,
};
use tonic::{Request, Status};

use crate::domain::{ClientConfig, HammertimeConfig, TransportError};

// ── RPC Port ──────────────────────────────────────────────────────────────────

/// Raw unary calls of the flintlock MicroVM service over one connection.
///
/// Dropping the implementor releases the connection.
#[allow(async_fn_in_trait)]
pub trait MicrovmService {
    async fn create_microvm(
        &mut self,
        request: Request<CreateMicroVmRequest>,
    ) -> Result<CreateMicroVmResponse, Status>;
    async fn get_microvm(
        &mut self,
        request: Request<GetMicroVmRequest>,
    ) -> Result<GetMicroVmResponse, Status>;
    async fn list_microvms(
        &mut self,
        request: Request<ListMicroVmsRequest>,
    ) -> Result<ListMicroVmsResponse, Status>;
    async fn delete_microvm(&mut self, request: Request<DeleteMicroVmRequest>)
    -> Result<(), Status>;
}

/// Opens a [`MicrovmService`] connection for one command invocation.
#[allow(async_fn_in_trait)]
pub trait ClientFactory {
    type Service: MicrovmService;

    /// Dial the server and attach credentials. Blocks until the connection
    /// is up or fails.
    async fn connect(&self, config: &ClientConfig) -> Result<Self::Service, TransportError>;
}

// ── Local I/O Ports ───────────────────────────────────────────────────────────

/// Abstracts local file reads so spec/key loading can be tested.
pub trait LocalFs {
    /// Read a UTF-8 file.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the file cannot be read.
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Loads the persisted connection defaults.
pub trait ConfigStore {
    /// Load the config file, or defaults when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    fn load(&self) -> Result<HammertimeConfig>;

    /// Location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn path(&self) -> Result<PathBuf>;
}
