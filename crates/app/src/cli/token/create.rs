use clap::Args;
use jiff::Timestamp;
use queuedesk_app::{auth::PgAuthService, domain::tenants::records::TenantId};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// Tenant that should own the token
    #[arg(long)]
    tenant_id: TenantId,

    /// Optional expiry (RFC 3339)
    #[arg(long)]
    token_expires_at: Option<Timestamp>,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    if let Some(expires_at) = args.token_expires_at
        && expires_at <= Timestamp::now()
    {
        return Err("token-expires-at must be in the future".to_string());
    }

    let db = args.database.connect().await?;

    let issued = PgAuthService::new(db)
        .issue_api_token(args.tenant_id, args.token_expires_at)
        .await
        .map_err(|error| format!("failed to create token: {error}"))?;

    println!("token_uuid: {}", issued.metadata.uuid);
    println!("tenant_id: {}", issued.metadata.tenant_id);
    println!("token_created_at: {}", issued.metadata.created_at);

    if let Some(expires_at) = issued.metadata.expires_at {
        println!("token_expires_at: {expires_at}");
    }

    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
