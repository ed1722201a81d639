use domain::DomainError;
use domain::settings::{AppConfigRepository, DEFAULT_LOGO, LOGO_KEY};
use infrastructure::PostgresAppConfigRepository;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Read-through cache for the company logo path, owned by the settings
/// component. The persisted `app_config` row stays the source of truth;
/// the cache is populated lazily on first read and overwritten on update.
#[derive(Clone)]
pub struct LogoService {
    repo: PostgresAppConfigRepository,
    cached: Arc<RwLock<Option<String>>>,
}

impl LogoService {
    pub fn new(repo: PostgresAppConfigRepository) -> Self {
        Self {
            repo,
            cached: Arc::new(RwLock::new(None)),
        }
    }

    pub async fn current(&self) -> String {
        if let Some(path) = self.cached.read().await.clone() {
            return path;
        }

        // Config read failures fall back to the placeholder; the logo is
        // cosmetic and must not fail a page
        let path = match self.repo.get(LOGO_KEY).await {
            Ok(Some(value)) if !value.is_empty() => value,
            Ok(_) => DEFAULT_LOGO.to_string(),
            Err(e) => {
                tracing::warn!("Failed to read logo config: {e}");
                return DEFAULT_LOGO.to_string();
            }
        };

        *self.cached.write().await = Some(path.clone());
        path
    }

    pub async fn update(&self, path: &str) -> Result<(), DomainError> {
        self.repo.set(LOGO_KEY, path).await?;
        *self.cached.write().await = Some(path.to_string());
        Ok(())
    }
}
