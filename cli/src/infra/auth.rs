//! Basic-auth credentials attached to every outgoing call.

use std::collections::HashMap;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tonic::metadata::AsciiMetadataValue;
use tonic::service::Interceptor;
use tonic::{Request, Status};

use crate::domain::TransportError;

pub const AUTHORIZATION: &str = "authorization";

/// A static token presented as `Basic base64(token)`.
///
/// The header is encoded once; every call gets the same bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicAuth {
    header: String,
}

impl BasicAuth {
    #[must_use]
    pub fn new(token: &str) -> Self {
        Self {
            header: format!("Basic {}", STANDARD.encode(token)),
        }
    }

    #[must_use]
    pub fn header(&self) -> &str {
        &self.header
    }

    /// Per-call metadata carrying the authorization header.
    #[must_use]
    pub fn request_metadata(&self) -> HashMap<&'static str, String> {
        HashMap::from([(AUTHORIZATION, self.header.clone())])
    }

    /// Plaintext channels are accepted.
    #[must_use]
    pub fn require_transport_security(&self) -> bool {
        false
    }
}

/// Interceptor that adds the basic-auth metadata when a token is configured.
#[derive(Debug, Clone, Default)]
pub struct AuthInterceptor {
    metadata: Vec<(&'static str, AsciiMetadataValue)>,
}

impl AuthInterceptor {
    /// No metadata is attached when `token` is absent or empty. Channels are
    /// plaintext, so credentials that demand transport security are refused.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials need a secure channel or their
    /// metadata is not valid gRPC metadata.
    pub fn new(token: Option<&str>) -> Result<Self, TransportError> {
        let Some(auth) = token.filter(|t| !t.is_empty()).map(BasicAuth::new) else {
            return Ok(Self::default());
        };
        if auth.require_transport_security() {
            return Err(TransportError::InvalidToken {
                reason: "credentials require transport security".to_string(),
            });
        }
        let metadata = auth
            .request_metadata()
            .into_iter()
            .map(|(key, value)| {
                value
                    .parse::<AsciiMetadataValue>()
                    .map(|value| (key, value))
                    .map_err(|e| TransportError::InvalidToken {
                        reason: e.to_string(),
                    })
            })
            .collect::<Result<_, _>>()?;
        Ok(Self { metadata })
    }
}

impl Interceptor for AuthInterceptor {
    fn call(&mut self, mut request: Request<()>) -> Result<Request<()>, Status> {
        for (key, value) in &self.metadata {
            request.metadata_mut().insert(*key, value.clone());
        }
        Ok(request)
    }
}
