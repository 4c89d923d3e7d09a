//! Microvm spec construction.
//!
//! Pure functions only: callers read files and pass the contents in.

use std::collections::HashMap;
use std::path::Path;

use hammertime_common::{
    IfaceType, Kernel, META_DATA_KEY, MicroVmSpec, NetworkInterface, USER_DATA_KEY, Volume,
    VolumeSource,
};

use crate::domain::cloudinit::{Metadata, UserData};
use crate::domain::error::SpecError;

pub const DEFAULT_MICROVM_NAME: &str = "mvm0";
pub const DEFAULT_MICROVM_NAMESPACE: &str = "ns0";

const BASE_VCPU: i32 = 2;
const BASE_MEMORY_MB: i32 = 2048;
const KERNEL_IMAGE: &str = "ghcr.io/weaveworks-liquidmetal/flintlock-kernel:5.10.77";
const KERNEL_FILENAME: &str = "boot/vmlinux";
const ROOT_VOLUME_IMAGE: &str = "ghcr.io/weaveworks-liquidmetal/capmvm-k8s-os:1.23.5";
const ROOT_VOLUME_ID: &str = "root";
const INTERFACE_DEVICE_ID: &str = "eth1";

/// Kernel command line; flags without a value map to the empty string.
const KERNEL_CMDLINE: &[(&str, &str)] = &[
    ("console", "ttyS0"),
    ("reboot", "k"),
    ("panic", "1"),
    ("pci", "off"),
    ("i8042.noaux", ""),
    ("i8042.nomux", ""),
    ("i8042.nopnp", ""),
    ("i8042.dumbkbd", ""),
    ("ds", "nocloud-net;s=http://169.254.169.254/latest/"),
];

/// The base every flag-built microvm starts from: kernel, root volume, one
/// macvtap interface. Identity and boot metadata are filled in by
/// [`new_microvm`].
#[must_use]
pub fn base_microvm() -> MicroVmSpec {
    MicroVmSpec {
        vcpu: BASE_VCPU,
        memory_in_mb: BASE_MEMORY_MB,
        kernel: Some(Kernel {
            image: KERNEL_IMAGE.to_string(),
            cmdline: KERNEL_CMDLINE
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
            filename: Some(KERNEL_FILENAME.to_string()),
            add_network_config: true,
        }),
        root_volume: Some(Volume {
            id: ROOT_VOLUME_ID.to_string(),
            is_read_only: false,
            source: Some(VolumeSource {
                container_source: Some(ROOT_VOLUME_IMAGE.to_string()),
            }),
            ..Volume::default()
        }),
        interfaces: vec![NetworkInterface {
            device_id: INTERFACE_DEVICE_ID.to_string(),
            r#type: IfaceType::Macvtap as i32,
            guest_mac: None,
        }],
        ..MicroVmSpec::default()
    }
}

/// Build a spec for microvm `name` in `namespace` with embedded cloud-init
/// `meta-data` and `user-data`.
///
/// # Errors
///
/// Returns an error if either boot document cannot be encoded.
pub fn new_microvm(
    name: &str,
    namespace: &str,
    authorized_key: Option<String>,
) -> Result<MicroVmSpec, SpecError> {
    let meta_data = Metadata::new(name, namespace).encode()?;
    let user_data = UserData::new(name, authorized_key).encode()?;

    Ok(MicroVmSpec {
        id: name.to_string(),
        namespace: namespace.to_string(),
        metadata: HashMap::from([
            (META_DATA_KEY.to_string(), meta_data),
            (USER_DATA_KEY.to_string(), user_data),
        ]),
        ..base_microvm()
    })
}

/// Parse a JSON spec read from `path`.
///
/// # Errors
///
/// Returns an error if `contents` is not a valid spec.
pub fn parse_spec(path: &Path, contents: &str) -> Result<MicroVmSpec, SpecError> {
    serde_json::from_str(contents).map_err(|source| SpecError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The uid carried by a spec loaded from `path`.
///
/// # Errors
///
/// Returns an error if the spec has no uid (it was never created).
pub fn spec_uid(path: &Path, spec: MicroVmSpec) -> Result<String, SpecError> {
    spec.uid
        .filter(|uid| !uid.is_empty())
        .ok_or_else(|| SpecError::MissingUid {
            path: path.to_path_buf(),
        })
}
