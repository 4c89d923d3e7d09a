//! Application service — resolve the microvm spec or uid a command acts on.
//!
//! All file reads go through [`LocalFs`] and happen before any connection is
//! opened.

use std::path::Path;

use hammertime_common::MicroVmSpec;

use crate::application::ports::LocalFs;
use crate::domain::microvm::{CreateOptions, Target};
use crate::domain::spec;
use crate::domain::SpecError;

/// Load a complete JSON spec, `uid` included.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_spec_from_file(fs: &impl LocalFs, path: &Path) -> Result<MicroVmSpec, SpecError> {
    let contents = read(fs, path)?;
    spec::parse_spec(path, &contents)
}

/// Build a spec from name, namespace and an optional public key file.
///
/// # Errors
///
/// Returns an error if the key file cannot be read or a boot document cannot
/// be encoded.
pub fn new_microvm(
    fs: &impl LocalFs,
    name: &str,
    namespace: &str,
    public_key_path: Option<&Path>,
) -> Result<MicroVmSpec, SpecError> {
    let authorized_key = match public_key_path {
        Some(path) if !path.as_os_str().is_empty() => Some(read(fs, path)?),
        _ => None,
    };
    spec::new_microvm(name, namespace, authorized_key)
}

/// The spec `create` sends: the file if given, otherwise one built from the
/// discrete options as given.
///
/// # Errors
///
/// Returns an error if any file involved cannot be read or parsed.
pub fn resolve_spec(fs: &impl LocalFs, opts: &CreateOptions) -> Result<MicroVmSpec, SpecError> {
    if let Some(file) = &opts.file {
        tracing::debug!(path = %file.display(), "loading spec from file");
        return load_spec_from_file(fs, file);
    }
    new_microvm(
        fs,
        &opts.name,
        &opts.namespace,
        opts.public_key_path.as_deref(),
    )
}

/// The uid a [`Target`] points at, reading the spec file if needed.
///
/// # Errors
///
/// Returns an error if the spec file cannot be read, parsed, or has no uid.
pub fn resolve_uid(fs: &impl LocalFs, target: &Target) -> Result<String, SpecError> {
    match target {
        Target::Uid(uid) => Ok(uid.clone()),
        Target::SpecFile(path) => {
            let spec = load_spec_from_file(fs, path)?;
            spec::spec_uid(path, spec)
        }
    }
}

fn read(fs: &impl LocalFs, path: &Path) -> Result<String, SpecError> {
    fs.read_to_string(path).map_err(|source| SpecError::Read {
        path: path.to_path_buf(),
        source,
    })
}
