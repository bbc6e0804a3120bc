use std::error::Error;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

/// Produces DPoP proofs for requests made with a DPoP-bound access token.
///
/// A proof is a signed JWT that binds the token to a single `method` and `url`, so a new proof is
/// requested for every fetch.
pub trait DpopProofProvider: Send + Sync {
    fn proof(&self, method: &str, url: &str)
        -> Result<String, Box<dyn Error + Send + Sync + 'static>>;
}

/// The credentials of a [SessionContext].
#[derive(Clone)]
pub enum Credentials {
    /// A bearer access token, sent as `Authorization: Bearer <token>`.
    Bearer { access_token: String },
    /// A DPoP-bound access token, sent as `Authorization: DPoP <token>` together with a fresh
    /// `DPoP` proof header.
    Dpop {
        access_token: String,
        proofs: Arc<dyn DpopProofProvider>,
    },
}

/// The headers that authorize a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorizationHeaders {
    /// The value of the `Authorization` header.
    pub authorization: String,
    /// The value of the `DPoP` header, if the token is DPoP-bound.
    pub dpop: Option<String>,
}

/// The session used to authenticate network fetches.
///
/// A session without credentials performs anonymous requests. The session of a
/// [NetworkLoader](crate::NetworkLoader) can be replaced at any time, e.g., after a login.
#[derive(Clone, Default)]
pub struct SessionContext {
    credentials: Option<Credentials>,
}

impl SessionContext {
    /// Creates a session without credentials.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Creates a session that authenticates with a bearer token.
    pub fn with_bearer_token(access_token: impl Into<String>) -> Self {
        Self {
            credentials: Some(Credentials::Bearer {
                access_token: access_token.into(),
            }),
        }
    }

    /// Creates a session that authenticates with a DPoP-bound token.
    pub fn with_dpop_token(
        access_token: impl Into<String>,
        proofs: Arc<dyn DpopProofProvider>,
    ) -> Self {
        Self {
            credentials: Some(Credentials::Dpop {
                access_token: access_token.into(),
                proofs,
            }),
        }
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Returns the headers that authorize a `method` request to `url`, or `None` for anonymous
    /// sessions.
    pub fn authorization_headers(
        &self,
        method: &str,
        url: &str,
    ) -> Result<Option<AuthorizationHeaders>, Box<dyn Error + Send + Sync + 'static>> {
        let Some(credentials) = &self.credentials else {
            return Ok(None);
        };
        let headers = match credentials {
            Credentials::Bearer { access_token } => AuthorizationHeaders {
                authorization: format!("Bearer {access_token}"),
                dpop: None,
            },
            Credentials::Dpop {
                access_token,
                proofs,
            } => AuthorizationHeaders {
                authorization: format!("DPoP {access_token}"),
                dpop: Some(proofs.proof(method, url)?),
            },
        };
        Ok(Some(headers))
    }
}

// Tokens are never printed.
impl Debug for SessionContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let credentials = match &self.credentials {
            None => "none",
            Some(Credentials::Bearer { .. }) => "bearer",
            Some(Credentials::Dpop { .. }) => "dpop",
        };
        f.debug_struct("SessionContext")
            .field("credentials", &credentials)
            .finish()
    }
}
