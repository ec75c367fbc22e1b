use infractl::{
    cli::{execute_command, leaf_matches},
    commands::{create_cli_commands, params::PARAMETER_VERBOSE},
    configuration::Configuration,
    error::CliError,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Main entry point for the program
#[tokio::main]
async fn main() {
    let matches = create_cli_commands().get_matches();
    let verbose = leaf_matches(&matches).get_flag(PARAMETER_VERBOSE);

    // Intialize the logging subsystem; stdout is reserved for results
    let filter = if verbose {
        EnvFilter::new("infractl=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match Configuration::load_or_default() {
        Ok(configuration) => execute_command(configuration, &matches).await,
        Err(e) => Err(CliError::from(e)),
    };

    if let Err(e) = result {
        let exit_code = e.exit_code();
        debug!("Exiting with code {} ({})", exit_code.code(), exit_code.message());
        eprintln!("ERROR: {}", e);
        ::std::process::exit(exit_code.code());
    }
}
