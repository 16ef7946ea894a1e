use clap::CommandFactory;
use clap::Parser;
use clap::error::ErrorKind;
use clap_complete::generate;

use txcheck::commands::Cli;
use txcheck::commands::Commands;
use txcheck::create_presenter;
use txcheck::handlers;
use txcheck_common::color_init;
use txcheck_common::error_codes::EX_USAGE;
use txcheck_common::init_tracing;

fn main() {
    let code = {
        let _telemetry = init_tracing("warn");
        run()
    };
    std::process::exit(code);
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
                _ => EX_USAGE,
            };
        }
    };

    color_init(cli.no_color);
    let presenter = create_presenter(cli.effective_format());

    match &cli.command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "txcheck", &mut std::io::stdout());
            0
        }
        Commands::CheckFixture { fixture } => {
            handlers::handle_check_fixture(fixture, presenter.as_ref())
        }
        Commands::Verify { fixture } => {
            handlers::handle_verify_blocking(cli.rpc_config(), fixture, presenter.as_ref())
        }
    }
}
