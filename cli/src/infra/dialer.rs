//! Dialer — opens a plaintext gRPC channel to the flintlock server.

use std::error::Error as StdError;

use tonic::transport::{Channel, Endpoint};

use crate::domain::{ClientConfig, TransportError};

/// Connect to `config.address`, waiting until the channel is established.
///
/// # Errors
///
/// Returns an error if the address is not a valid authority, the connection
/// is refused, or it is not up within the connect timeout. Nothing is retried.
pub async fn dial(config: &ClientConfig) -> Result<Channel, TransportError> {
    let address = config.address.clone();
    let endpoint = Endpoint::from_shared(format!("http://{address}"))
        .map_err(|e| TransportError::InvalidAddress {
            address: address.clone(),
            reason: error_chain(&e),
        })?
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout);

    tracing::debug!(%address, "dialing");
    match tokio::time::timeout(config.connect_timeout, endpoint.connect()).await {
        Ok(Ok(channel)) => Ok(channel),
        Ok(Err(e)) => Err(TransportError::Connect {
            address,
            reason: error_chain(&e),
        }),
        Err(_) => Err(TransportError::ConnectTimeout {
            address,
            after: config.connect_timeout,
        }),
    }
}

/// `err: cause: cause...`; tonic's top-level transport error says little on
/// its own.
fn error_chain(err: &dyn StdError) -> String {
    let mut reason = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        reason.push_str(": ");
        reason.push_str(&cause.to_string());
        source = cause.source();
    }
    reason
}
