use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a command that needs configuration to its handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Upload(args) => commands::upload::handle(&args, ctx, flags).await,
        Commands::Publish(args) => commands::publish::handle(&args, ctx, flags).await,
        Commands::New(_)
        | Commands::AddSubImage(_)
        | Commands::RemoveSubImage(_)
        | Commands::Extract(_)
        | Commands::Validate(_)
        | Commands::Schema => {
            unreachable!("draft-only commands are pre-dispatched in main")
        }
    }
}
