mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = &cli.global;
    match cli.command {
        // Offline commands: no backend, no stored session
        Command::Config(args) => commands::config_cmd::handle(args, global),
        Command::Route(args) => commands::route::handle(&args, global),
        Command::Completions(args) => {
            use clap::CommandFactory;
            use clap_complete::generate;

            let mut cmd = Cli::command();
            generate(args.shell, &mut cmd, "hoopstat", &mut std::io::stdout());
            Ok(())
        }

        // Everything else talks to the backend
        Command::Login(args) => commands::auth::login(args, &commands::connect(global)?).await,
        Command::Signup(args) => commands::auth::signup(args, &commands::connect(global)?).await,
        Command::Logout => commands::auth::logout(&commands::connect(global)?),
        Command::Whoami => commands::auth::whoami(&commands::connect(global)?),
        Command::Players(args) => commands::players::handle(&args, &commands::connect(global)?).await,
        Command::Favorites(args) => {
            commands::favorites::handle(args, &commands::connect(global)?).await
        }
    }
}
