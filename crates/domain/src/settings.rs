use crate::DomainError;
use async_trait::async_trait;

/// Key under which the company logo path is stored.
pub const LOGO_KEY: &str = "company_logo";

/// Logo path served when nothing was uploaded yet.
pub const DEFAULT_LOGO: &str = "/static/images/logo-placeholder.png";

/// Flat key-value application configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppConfigRepository: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;
}
