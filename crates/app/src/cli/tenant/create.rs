use clap::Args;
use queuedesk_app::{
    auth::PgAuthService,
    domain::tenants::{PgTenantsService, TenantsService, data::NewTenant},
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateTenantArgs {
    /// Tenant display name
    #[arg(long)]
    name: String,

    /// Create the tenant without accepting tickets yet
    #[arg(long)]
    inactive: bool,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: CreateTenantArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let tenant = PgTenantsService::new(db.clone())
        .create_tenant(NewTenant {
            name: args.name,
            active: !args.inactive,
        })
        .await
        .map_err(|error| format!("failed to create tenant: {error}"))?;

    let issued = PgAuthService::new(db)
        .issue_api_token(tenant.id, None)
        .await
        .map_err(|error| format!("tenant {} created but token issue failed: {error}", tenant.id))?;

    println!("tenant_id: {}", tenant.id);
    println!("tenant_name: {}", tenant.name);
    println!("tenant_active: {}", tenant.active);
    println!("token_uuid: {}", issued.metadata.uuid);
    println!("api_token: {}", issued.token);
    println!("store this token now; it is only shown once");

    Ok(())
}
