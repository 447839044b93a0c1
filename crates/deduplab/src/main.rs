mod cli;

use clap::Parser;

use cli::app::{App, Commands};
use cli::run;

fn main() {
    let app = App::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let code = match run_app(app) {
        Ok(code) => code,
        Err(err) => {
            tracing::error!(error = %err, "fatal error");
            eprintln!("error: {err:#}");
            10
        }
    };

    std::process::exit(code);
}

fn run_app(app: App) -> anyhow::Result<i32> {
    let config = deduplab_config::load_config(&app.config)?;

    match &app.cmd {
        Commands::Scan(args) => run::cmd_scan(args, &config),
        Commands::Plan(args) => run::cmd_plan(args, &config),
        Commands::RenameApply(args) => run::cmd_apply(args, &config),
        Commands::Rollback(args) => run::cmd_rollback(args),
        Commands::Verify(args) => run::cmd_verify(args),
        Commands::Metrics(args) => run::cmd_metrics(args, &config),
    }
}
