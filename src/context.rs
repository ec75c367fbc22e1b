//! Per-invocation execution context.
//!
//! Everything an action needs besides its own arguments: the effective
//! configuration, the API client, the output format and how to wait.

use crate::{
    actions::CliActionError,
    client::ControlPlaneClient,
    commands::params::{
        PARAMETER_ENDPOINT, PARAMETER_FORMAT, PARAMETER_HEADERS, PARAMETER_NON_INTERACTIVE,
        PARAMETER_PRETTY, PARAMETER_PROJECT, PARAMETER_TENANT,
    },
    configuration::Configuration,
    format::{OutputFormat, OutputFormatOptions, TSV},
    waiter::{PollContext, WaitPolicy},
};
use clap::ArgMatches;
use std::io::IsTerminal;
use tracing::debug;

pub struct ExecutionContext {
    configuration: Configuration,
    api: ControlPlaneClient,
    format: OutputFormat,
    poll_context: PollContext,
    can_prompt: bool,
    policy: WaitPolicy,
}

impl ExecutionContext {
    /// Build the context from the loaded configuration and the matches of the
    /// leaf subcommand, where all global options are visible.
    pub fn from_matches(
        configuration: Configuration,
        matches: &ArgMatches,
    ) -> Result<ExecutionContext, CliActionError> {
        let configuration = configuration.with_overrides(
            string_option(matches, PARAMETER_ENDPOINT),
            string_option(matches, PARAMETER_TENANT),
            string_option(matches, PARAMETER_PROJECT),
        )?;

        let format = output_format(matches)?;
        let non_interactive = flag(matches, PARAMETER_NON_INTERACTIVE);
        let poll_context = PollContext {
            interactive: !non_interactive
                && !format.is_structured()
                && std::io::stdout().is_terminal(),
        };
        let can_prompt = prompting_allowed(non_interactive, std::io::stdin().is_terminal());
        let policy = WaitPolicy::from(configuration.wait());
        let api = ControlPlaneClient::from_configuration(&configuration)?;

        debug!(
            "Using endpoint {} (format {}, interactive {})",
            api.base_url(),
            format,
            poll_context.interactive
        );

        Ok(ExecutionContext {
            configuration,
            api,
            format,
            poll_context,
            can_prompt,
            policy,
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    pub fn api(&self) -> &ControlPlaneClient {
        &self.api
    }

    pub fn format(&self) -> &OutputFormat {
        &self.format
    }

    pub fn poll_context(&self) -> &PollContext {
        &self.poll_context
    }

    /// Whether a question may be asked on the terminal. Independent of the
    /// output format: prompts are not written to stdout.
    pub fn can_prompt(&self) -> bool {
        self.can_prompt
    }

    pub fn policy(&self) -> &WaitPolicy {
        &self.policy
    }
}

/// Prompts need someone at the keyboard and must not be disabled with `-n`.
pub fn prompting_allowed(non_interactive: bool, stdin_is_terminal: bool) -> bool {
    !non_interactive && stdin_is_terminal
}

/// Read the output format and its options from the global parameters.
pub fn output_format(matches: &ArgMatches) -> Result<OutputFormat, CliActionError> {
    let options = OutputFormatOptions {
        with_headers: flag(matches, PARAMETER_HEADERS),
        pretty: flag(matches, PARAMETER_PRETTY),
    };
    let name = string_option(matches, PARAMETER_FORMAT).unwrap_or(TSV);
    Ok(OutputFormat::from_string_with_options(name, options)?)
}

// Globals are not defined on commands built in isolation, hence try_get.
fn string_option<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches
        .try_get_one::<String>(name)
        .ok()
        .flatten()
        .map(String::as_str)
}

fn flag(matches: &ArgMatches, name: &str) -> bool {
    matches.try_get_one::<bool>(name).ok().flatten().copied().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::leaf_matches;
    use crate::commands::create_cli_commands;

    fn leaf(args: &[&str]) -> ArgMatches {
        let matches = create_cli_commands().try_get_matches_from(args).unwrap();
        leaf_matches(&matches).clone()
    }

    #[test]
    fn test_structured_format_is_never_interactive() {
        let matches = leaf(&["infractl", "cluster", "list", "-f", "json", "--pretty"]);
        let context = ExecutionContext::from_matches(Configuration::default(), &matches).unwrap();

        assert_eq!(
            context.format(),
            &OutputFormat::Json(OutputFormatOptions { with_headers: false, pretty: true })
        );
        assert!(!context.poll_context().interactive);
    }

    #[test]
    fn test_non_interactive_flag() {
        let matches = leaf(&["infractl", "-n", "tenant", "list"]);
        let context = ExecutionContext::from_matches(Configuration::default(), &matches).unwrap();
        assert!(!context.poll_context().interactive);
        assert!(!context.can_prompt());
    }

    #[test]
    fn test_prompting_depends_on_stdin_and_flag_only() {
        assert!(prompting_allowed(false, true));
        assert!(!prompting_allowed(true, true));
        assert!(!prompting_allowed(false, false));
    }

    #[test]
    fn test_structured_output_does_not_disable_prompts() {
        let matches = leaf(&["infractl", "-f", "json", "cluster", "delete", "c1"]);
        let context = ExecutionContext::from_matches(Configuration::default(), &matches).unwrap();

        assert!(!context.poll_context().interactive);
        assert_eq!(
            context.can_prompt(),
            prompting_allowed(false, std::io::stdin().is_terminal())
        );
    }

    #[test]
    fn test_command_line_overrides_configuration() {
        let matches = leaf(&[
            "infractl",
            "vm",
            "list",
            "--endpoint",
            "http://10.0.0.1:9000",
            "--project",
            "p1",
        ]);
        let context = ExecutionContext::from_matches(Configuration::default(), &matches).unwrap();

        assert_eq!(context.api().base_url(), "http://10.0.0.1:9000");
        assert_eq!(context.configuration().project(), Some("p1"));
    }

    #[test]
    fn test_invalid_endpoint_is_a_configuration_error() {
        let matches = leaf(&["infractl", "tenant", "list", "--endpoint", "not a url"]);
        let result = ExecutionContext::from_matches(Configuration::default(), &matches);
        assert!(matches!(result, Err(CliActionError::ConfigurationError(_))));
    }
}
