use std::collections::HashMap;

use serde::{Deserialize, Serialize, Serializer};

/// Metadata key holding the base64-encoded cloud-init `meta-data` document.
pub const META_DATA_KEY: &str = "meta-data";

/// Metadata key holding the base64-encoded cloud-init `user-data` document.
pub const USER_DATA_KEY: &str = "user-data";

/// Declarative description of a microvm, submitted on creation.
///
/// Field tags follow `microvm.types.MicroVMSpec`. The JSON form uses the
/// proto field names, so spec files written for other flintlock clients
/// load unchanged; unknown JSON fields are ignored.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroVmSpec {
    /// Name of the microvm, unique within its namespace.
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub namespace: String,
    #[prost(map = "string, string", tag = "3")]
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, String>,
    #[prost(int32, tag = "4")]
    pub vcpu: i32,
    #[prost(int32, tag = "5")]
    pub memory_in_mb: i32,
    #[prost(message, optional, tag = "6")]
    pub kernel: Option<Kernel>,
    #[prost(message, optional, tag = "7")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initrd: Option<Initrd>,
    #[prost(message, optional, tag = "8")]
    pub root_volume: Option<Volume>,
    #[prost(message, repeated, tag = "9")]
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_volumes: Vec<Volume>,
    #[prost(message, repeated, tag = "10")]
    pub interfaces: Vec<NetworkInterface>,
    /// Boot metadata; carries the `meta-data` and `user-data` documents.
    #[prost(map = "string, string", tag = "11")]
    pub metadata: HashMap<String, String>,
    /// Service-assigned identifier. Absent until the microvm is created.
    #[prost(string, optional, tag = "15")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[prost(string, optional, tag = "16")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Kernel image and command line for a microvm.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Kernel {
    /// Container image holding the kernel binary.
    #[prost(string, tag = "1")]
    pub image: String,
    #[prost(map = "string, string", tag = "2")]
    pub cmdline: HashMap<String, String>,
    /// Path of the kernel binary inside the image.
    #[prost(string, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[prost(bool, tag = "4")]
    pub add_network_config: bool,
}

/// Optional initial ramdisk.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Initrd {
    #[prost(string, tag = "1")]
    pub image: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

/// A volume attached to a microvm.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, optional, tag = "2")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_point: Option<String>,
    #[prost(bool, tag = "3")]
    pub is_read_only: bool,
    #[prost(message, optional, tag = "4")]
    pub source: Option<VolumeSource>,
    #[prost(int32, optional, tag = "5")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size_in_mb: Option<i32>,
}

/// Where a volume's contents come from.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct VolumeSource {
    /// Container image whose filesystem becomes the volume.
    #[prost(string, optional, tag = "1")]
    pub container_source: Option<String>,
}

/// A network interface attached to a microvm.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkInterface {
    #[prost(string, tag = "1")]
    pub device_id: String,
    #[prost(enumeration = "IfaceType", tag = "2")]
    #[serde(rename = "type")]
    pub r#type: i32,
    #[prost(string, optional, tag = "3")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guest_mac: Option<String>,
}

/// Network interface kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum IfaceType {
    Macvtap = 0,
    Tap = 1,
}

/// A microvm as reported by the service: the spec plus its observed status.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroVm {
    #[prost(int32, tag = "1")]
    pub version: i32,
    #[prost(message, optional, tag = "2")]
    pub spec: Option<MicroVmSpec>,
    #[prost(message, optional, tag = "3")]
    pub status: Option<MicroVmStatus>,
}

impl MicroVm {
    /// The service-assigned uid, if the spec carries one.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.spec.as_ref().and_then(|spec| spec.uid.as_deref())
    }

    /// Name of the reported state, e.g. `CREATED`.
    ///
    /// Returns `UNKNOWN` when the service sent no status or a state this
    /// client does not recognise.
    #[must_use]
    pub fn state_name(&self) -> &'static str {
        self.status
            .as_ref()
            .and_then(|status| MicroVmState::try_from(status.state).ok())
            .map_or("UNKNOWN", MicroVmState::as_str_name)
    }
}

/// Observed status of a microvm.
#[derive(Clone, PartialEq, ::prost::Message, Serialize, Deserialize)]
#[serde(default)]
pub struct MicroVmStatus {
    #[prost(enumeration = "MicroVmState", tag = "1")]
    #[serde(serialize_with = "serialize_state")]
    pub state: i32,
}

/// Lifecycle state of a microvm.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum MicroVmState {
    Pending = 0,
    Created = 1,
    Failed = 2,
    Deleting = 3,
}

impl MicroVmState {
    /// Name of the state as it appears in the proto definition.
    #[must_use]
    pub fn as_str_name(self) -> &'static str {
        match self {
            MicroVmState::Pending => "PENDING",
            MicroVmState::Created => "CREATED",
            MicroVmState::Failed => "FAILED",
            MicroVmState::Deleting => "DELETING",
        }
    }
}

fn serialize_state<S: Serializer>(state: &i32, serializer: S) -> Result<S::Ok, S::Error> {
    match MicroVmState::try_from(*state) {
        Ok(known) => serializer.serialize_str(known.as_str_name()),
        Err(_) => serializer.serialize_i32(*state),
    }
}
