use clap::{Args, Subcommand};

mod create;
mod list;
mod update;

#[derive(Debug, Args)]
pub(crate) struct TenantCommand {
    #[command(subcommand)]
    command: TenantSubcommand,
}

#[derive(Debug, Subcommand)]
enum TenantSubcommand {
    /// Create a tenant and its first operator token
    Create(create::CreateTenantArgs),

    /// List every tenant
    List(list::ListTenantsArgs),

    /// Rename a tenant or toggle whether it accepts tickets
    Update(update::UpdateTenantArgs),
}

pub(crate) async fn run(command: TenantCommand) -> Result<(), String> {
    match command.command {
        TenantSubcommand::Create(args) => create::run(args).await,
        TenantSubcommand::List(args) => list::run(args).await,
        TenantSubcommand::Update(args) => update::run(args).await,
    }
}
