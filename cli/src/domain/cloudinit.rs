//! cloud-init boot documents embedded in a microvm spec.
//!
//! Both documents are YAML, base64-encoded (standard alphabet, padded) before
//! they are placed in the spec's metadata map. `user-data` carries the
//! `#cloud-config` header line.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::domain::error::SpecError;

/// Deployment target reported to cloud-init.
pub const PLATFORM: &str = "liquid_metal";
/// The only user configured in `user-data`.
pub const ROOT_USER: &str = "root";
pub const USER_DATA_HEADER: &str = "#cloud-config\n";
pub const FINAL_MESSAGE: &str =
    "The Liquid Metal booted system is good to go after $UPTIME seconds";
pub const BOOT_COMMANDS: &[&str] =
    &["ln -sf /run/systemd/resolve/stub-resolv.conf /etc/resolv.conf"];

/// The `meta-data` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(rename = "instance-id")]
    pub instance_id: String,
    #[serde(rename = "local-hostname")]
    pub local_hostname: String,
    pub platform: String,
}

impl Metadata {
    /// Metadata for microvm `name` in `namespace`; the instance id is
    /// `namespace/name`.
    #[must_use]
    pub fn new(name: &str, namespace: &str) -> Self {
        Self {
            instance_id: format!("{namespace}/{name}"),
            local_hostname: name.to_string(),
            platform: PLATFORM.to_string(),
        }
    }

    /// Serialize to YAML and base64-encode.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn encode(&self) -> Result<String, SpecError> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(STANDARD.encode(yaml))
    }
}

/// The `user-data` document. Empty fields are omitted from the YAML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub hostname: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub users: Vec<User>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub final_message: String,
    #[serde(default, rename = "bootcmd", skip_serializing_if = "Vec::is_empty")]
    pub boot_commands: Vec<String>,
}

/// A user account created at boot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ssh_authorized_keys: Vec<String>,
}

impl UserData {
    /// User data with a single `root` user. `authorized_key` is used verbatim
    /// as that user's only key.
    #[must_use]
    pub fn new(hostname: &str, authorized_key: Option<String>) -> Self {
        Self {
            hostname: hostname.to_string(),
            users: vec![User {
                name: ROOT_USER.to_string(),
                ssh_authorized_keys: authorized_key.into_iter().collect(),
            }],
            final_message: FINAL_MESSAGE.to_string(),
            boot_commands: BOOT_COMMANDS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Serialize to YAML behind the `#cloud-config` header and base64-encode.
    ///
    /// # Errors
    ///
    /// Returns an error if YAML serialization fails.
    pub fn encode(&self) -> Result<String, SpecError> {
        let yaml = serde_yaml::to_string(self)?;
        Ok(STANDARD.encode(format!("{USER_DATA_HEADER}{yaml}")))
    }
}
