use clap::Args;
use queuedesk_app::domain::tenants::{PgTenantsService, TenantsService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListTenantsArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

#[expect(clippy::print_stdout, reason = "CLI output")]
pub(crate) async fn run(args: ListTenantsArgs) -> Result<(), String> {
    let db = args.database.connect().await?;

    let tenants = PgTenantsService::new(db)
        .list_tenants()
        .await
        .map_err(|error| format!("failed to list tenants: {error}"))?;

    if tenants.is_empty() {
        println!("no tenants found");

        return Ok(());
    }

    for tenant in tenants {
        println!(
            "{}\t{}\tactive={}\tcounters={}",
            tenant.id, tenant.name, tenant.active, tenant.active_counters
        );
    }

    Ok(())
}
