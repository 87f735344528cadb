//! REB CLI - browse and serve weekly real-estate price-change reports.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "reb-cli",
    version,
    about = "Weekly apartment sale and jeonse price-change dashboard"
)]
struct Cli {
    #[command(flatten)]
    store: reb_cmd::StoreOptions,

    #[command(subcommand)]
    command: reb_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    log::info!("cli: {:?}", cli.command);
    reb_cmd::run(cli.store, cli.command).await
}
