use clap::Parser;
use cli::args::Cli;
use cli::{commands, logging};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("{} {err:#}", console::style("error:").red().bold());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let cfg = commands::prepare_config(cli.config.as_deref(), cli.base_url.as_deref())?;
    let _guard = logging::init_tracing_with_config(&cfg.logging, cli.verbosity(), cli.log_json)?;
    tracing::debug!(version = cli::VERSION, "starting");
    commands::execute(cli, cfg).await
}
