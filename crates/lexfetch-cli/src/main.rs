use lexfetch_lib::cli::{
    ResolvedCommand, parse_args, resolve_command, run_object_store, run_tree_host,
};
use lexfetch_lib::error::LexFetchError;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<(), LexFetchError> {
    color_eyre::install()?;

    let args = parse_args();
    let command = resolve_command(args.command)?;

    match command {
        ResolvedCommand::TreeHost(params) => {
            run_tree_host(params).await?;
        }
        ResolvedCommand::ObjectStore(params) => {
            run_object_store(params).await?;
        }
    }

    Ok(())
}
