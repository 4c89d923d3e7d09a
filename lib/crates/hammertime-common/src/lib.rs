pub mod services;
pub mod types;

pub use services::{
    CreateMicroVmRequest, CreateMicroVmResponse, DeleteMicroVmRequest, GetMicroVmRequest,
    GetMicroVmResponse, ListMicroVmsRequest, ListMicroVmsResponse, MicroVmClient,
};
pub use types::*;
