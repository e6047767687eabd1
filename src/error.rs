//! Unified SDK error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Page worker failed: {0}")]
    Task(String),
}

impl SdkError {
    /// Whether the failure came from the network or the server.
    ///
    /// These are worth retrying as a whole; everything else needs different input.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_) | Self::Task(_))
    }

    /// Whether the failure is a business-rule rejection raised before submission.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Transfer(_) | Self::Validation(_))
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request ({status}): {body}")]
    BadRequest { status: u16, body: String },
}

impl HttpError {
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        match status {
            401 => Self::Unauthorized,
            404 => Self::NotFound(body),
            400..=499 => Self::BadRequest { status, body },
            _ => Self::ServerError { status, body },
        }
    }
}

/// Authentication errors.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    LoginFailed(String),

    #[error("Re-authentication rejected with status {0}")]
    ReauthFailed(u16),
}

/// Currency transfer rejections.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferError {
    #[error("No exchange rate found for {source_currency} to {target_currency}")]
    NoRateFound {
        source_currency: String,
        target_currency: String,
    },

    #[error("Target amount {target_amount} is below the 0.01 minimum of the target currency")]
    AmountTooSmall { target_amount: Decimal },

    #[error("Amount {source_amount} at rate {rate} is outside the representable range")]
    AmountOutOfRange { source_amount: Decimal, rate: Decimal },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(matches!(HttpError::from_status(401, String::new()), HttpError::Unauthorized));
        assert!(matches!(HttpError::from_status(404, "x".into()), HttpError::NotFound(b) if b == "x"));
        assert!(matches!(
            HttpError::from_status(422, String::new()),
            HttpError::BadRequest { status: 422, .. }
        ));
        assert!(matches!(
            HttpError::from_status(503, String::new()),
            HttpError::ServerError { status: 503, .. }
        ));
    }

    #[test]
    fn test_error_kinds_are_distinguishable() {
        let transport = SdkError::from(HttpError::from_status(502, String::new()));
        assert!(transport.is_transport());
        assert!(!transport.is_domain());

        let domain = SdkError::from(TransferError::NoRateFound {
            source_currency: "nzd".into(),
            target_currency: "usd".into(),
        });
        assert!(domain.is_domain());
        assert!(!domain.is_transport());

        let auth = SdkError::from(AuthError::NotAuthenticated);
        assert!(!auth.is_domain());
        assert!(!auth.is_transport());
    }
}
