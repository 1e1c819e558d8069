use clap::Args;
use queuedesk_app::domain::tenants::{
    PgTenantsService, TenantsService, data::TenantUpdate, records::TenantId,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct UpdateTenantArgs {
    /// Tenant to change
    #[arg(long)]
    tenant_id: TenantId,

    /// New display name
    #[arg(long)]
    name: Option<String>,

    /// Whether the tenant accepts new tickets
    #[arg(long)]
    active: Option<bool>,

    #[command(flatten)]
    database: DatabaseArgs,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: UpdateTenantArgs) -> Result<(), String> {
    let update = TenantUpdate {
        name: args.name,
        active: args.active,
    };

    if update.is_empty() {
        return Err("nothing to update; pass --name and/or --active".to_string());
    }

    let db = args.database.connect().await?;

    let tenant = PgTenantsService::new(db)
        .update_tenant(args.tenant_id, update)
        .await
        .map_err(|error| format!("failed to update tenant {}: {error}", args.tenant_id))?;

    println!("tenant_id: {}", tenant.id);
    println!("tenant_name: {}", tenant.name);
    println!("tenant_active: {}", tenant.active);

    Ok(())
}
