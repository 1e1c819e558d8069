//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::warn;
use uuid::Uuid;

use crate::{
    auth::{
        ApiTokenMetadata, ApiTokenSecret, ApiTokenVersion, AuthServiceError, IssuedApiToken,
        format_api_token, models::NewApiToken, parse_api_token, repository::PgAuthRepository,
        token_verifier,
    },
    database::{Db, StoreFailure},
    domain::tenants::records::TenantId,
};

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
        }
    }

    /// Issue a new operator token for the given tenant.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] for an unknown tenant, or a
    /// storage error if the insert fails.
    pub async fn issue_api_token(
        &self,
        tenant: TenantId,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedApiToken, AuthServiceError> {
        let token_uuid = Uuid::now_v7();
        let version = ApiTokenVersion::V1;
        let secret = ApiTokenSecret::generate();

        let token = format_api_token(token_uuid, version, &secret);
        let token_hash = token_verifier(token_uuid, version, tenant, &secret);

        let mut tx = self.db.begin().await?;

        let metadata = self
            .repository
            .create_api_token(
                &mut tx,
                &NewApiToken {
                    uuid: token_uuid,
                    tenant_id: tenant,
                    version,
                    token_hash,
                    expires_at,
                },
            )
            .await
            .map_err(|error| match StoreFailure::classify(&error) {
                StoreFailure::ForeignKeyViolation => AuthServiceError::NotFound,
                _ => AuthServiceError::from(error),
            })?;

        tx.commit().await?;

        Ok(IssuedApiToken { token, metadata })
    }

    /// List every token issued for the given tenant.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_api_tokens(
        &self,
        tenant: TenantId,
    ) -> Result<Vec<ApiTokenMetadata>, AuthServiceError> {
        let mut tx = self.db.begin_read_only().await?;

        let tokens = self.repository.list_api_tokens(&mut tx, tenant).await?;

        tx.commit().await?;

        Ok(tokens)
    }

    /// Revoke a token by UUID. Returns `true` if the token was active.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn revoke_api_token(&self, token_uuid: Uuid) -> Result<bool, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let revoked = self.repository.revoke_api_token(&mut tx, token_uuid).await?;

        tx.commit().await?;

        Ok(revoked.is_some())
    }

    async fn touch(&self, token_uuid: Uuid) -> Result<(), AuthServiceError> {
        let mut tx = self.db.begin().await?;

        self.repository.touch_api_token(&mut tx, token_uuid).await?;

        tx.commit().await?;

        Ok(())
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<TenantId, AuthServiceError> {
        let parsed = parse_api_token(bearer_token).map_err(|_error| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin_read_only().await?;

        let token = self
            .repository
            .find_active_api_token(&mut tx, parsed.token_uuid, parsed.version)
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        if token.version != parsed.version || parsed.verifier(token.tenant_id) != token.token_hash {
            return Err(AuthServiceError::NotFound);
        }

        // Authentication does not depend on this write.
        if let Err(error) = self.touch(parsed.token_uuid).await {
            warn!(token_uuid = %parsed.token_uuid, "failed to record token use: {error}");
        }

        Ok(token.tenant_id)
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Resolve a raw bearer token to the tenant it was issued for.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<TenantId, AuthServiceError>;
}
