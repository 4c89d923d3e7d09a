//! Application service — the create/get/list/delete use-cases.
//!
//! Each use-case resolves its inputs first, then connects through the injected
//! [`ClientFactory`], runs its calls sequentially, and closes the client on
//! every path before returning.

use anyhow::Result;
use hammertime_common::MicroVm;

use crate::application::ports::{ClientFactory, LocalFs, MicrovmService};
use crate::application::services::client::MicrovmClient;
use crate::application::services::spec_builder;
use crate::domain::microvm::{CreateOptions, DeleteOptions, DeleteTarget, GetOptions, ListFilter};
use crate::domain::{BulkDeleteError, ClientConfig, ServiceError};

/// What a successful `delete` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Single { uid: String },
    /// Uids in the order they were deleted.
    Bulk { deleted: Vec<String> },
}

/// Create a microvm from a spec file or from discrete options.
///
/// # Errors
///
/// Returns an error if the spec cannot be resolved, the connection fails, or
/// the service rejects the request.
pub async fn create(
    factory: &impl ClientFactory,
    fs: &impl LocalFs,
    config: &ClientConfig,
    opts: &CreateOptions,
) -> Result<MicroVm> {
    let spec = spec_builder::resolve_spec(fs, opts)?;
    let mut client = connect(factory, config).await?;
    let result = client.create(spec).await;
    client.close();
    Ok(result?)
}

/// Fetch one microvm by uid or by the uid in a spec file.
///
/// # Errors
///
/// Returns an error if no target is given, the spec file has no uid, the
/// connection fails, or the service call fails.
pub async fn get(
    factory: &impl ClientFactory,
    fs: &impl LocalFs,
    config: &ClientConfig,
    opts: &GetOptions,
) -> Result<MicroVm> {
    let target = opts.resolve()?;
    let uid = spec_builder::resolve_uid(fs, &target)?;
    let mut client = connect(factory, config).await?;
    let result = client.get(&uid).await;
    client.close();
    Ok(result?)
}

/// List microvms matching `filter`.
///
/// # Errors
///
/// Returns an error if the connection fails or the service call fails.
pub async fn list(
    factory: &impl ClientFactory,
    config: &ClientConfig,
    filter: &ListFilter,
) -> Result<Vec<MicroVm>> {
    let mut client = connect(factory, config).await?;
    let result = client.list(filter).await;
    client.close();
    Ok(result?)
}

/// Delete one microvm, or every microvm matching a filter with `--all`.
///
/// Bulk deletes run sequentially in list order and stop at the first failure;
/// earlier deletions are kept.
///
/// # Errors
///
/// Returns a `ConfigError` for invalid targeting before anything else runs,
/// a `SpecError` for spec file problems, a `TransportError` if the
/// connection fails, a `ServiceError` for single deletes and list failures, or
/// a [`BulkDeleteError`] when a bulk delete stops part-way.
pub async fn delete(
    factory: &impl ClientFactory,
    fs: &impl LocalFs,
    config: &ClientConfig,
    opts: &DeleteOptions,
) -> Result<DeleteOutcome> {
    match opts.resolve()? {
        DeleteTarget::Single(target) => {
            let uid = spec_builder::resolve_uid(fs, &target)?;
            let mut client = connect(factory, config).await?;
            let result = client.delete(&uid).await;
            client.close();
            result?;
            Ok(DeleteOutcome::Single { uid })
        }
        DeleteTarget::Bulk(filter) => {
            let mut client = connect(factory, config).await?;
            let result = delete_matching(&mut client, &filter).await;
            client.close();
            Ok(DeleteOutcome::Bulk { deleted: result? })
        }
    }
}

async fn delete_matching<S: MicrovmService>(
    client: &mut MicrovmClient<S>,
    filter: &ListFilter,
) -> Result<Vec<String>> {
    let microvms = client.list(filter).await?;
    let total = microvms.len();
    tracing::debug!(total, "bulk delete");

    let mut deleted = Vec::with_capacity(total);
    for microvm in &microvms {
        let Some(uid) = microvm.uid().filter(|uid| !uid.is_empty()) else {
            return Err(BulkDeleteError {
                deleted: deleted.len(),
                total,
                uid: microvm.spec.as_ref().map(|spec| spec.id.clone()).unwrap_or_default(),
                source: ServiceError::MissingUid,
            }
            .into());
        };
        let uid = uid.to_string();
        if let Err(source) = client.delete(&uid).await {
            return Err(BulkDeleteError {
                deleted: deleted.len(),
                total,
                uid,
                source,
            }
            .into());
        }
        tracing::debug!(uid = %uid, done = deleted.len() + 1, total, "deleted");
        deleted.push(uid);
    }
    Ok(deleted)
}

async fn connect<F: ClientFactory>(
    factory: &F,
    config: &ClientConfig,
) -> Result<MicrovmClient<F::Service>> {
    tracing::debug!(address = %config.address, "connecting");
    let service = factory.connect(config).await?;
    Ok(MicrovmClient::new(service, config.request_timeout))
}
