//! CLI command definitions and argument parsing.
//!
//! This module defines all the CLI commands and their arguments using the clap crate.
//! Each resource family lives in its own file; options shared between them are
//! built in [`params`].

use clap::Command;

pub mod cluster;
pub mod disk;
pub mod params;
pub mod project;
pub mod task;
pub mod tenant;
pub mod vm;

use params::{
    endpoint_parameter, format_parameter, format_pretty_parameter, format_with_headers_parameter,
    non_interactive_parameter, project_parameter, tenant_parameter, verbose_parameter,
};

/// Create and configure all CLI commands and their arguments.
///
/// Global options are declared once here and propagate to every subcommand.
pub fn create_cli_commands() -> Command {
    Command::new(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .about(env!("CARGO_PKG_DESCRIPTION"))
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(endpoint_parameter())
        .arg(tenant_parameter())
        .arg(project_parameter())
        .arg(format_parameter())
        .arg(format_with_headers_parameter())
        .arg(format_pretty_parameter())
        .arg(non_interactive_parameter())
        .arg(verbose_parameter())
        .subcommand(task::task_command())
        .subcommand(tenant::tenant_command())
        .subcommand(project::project_command())
        .subcommand(vm::vm_command())
        .subcommand(disk::disk_command())
        .subcommand(cluster::cluster_command())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::params::*;

    #[test]
    fn test_command_tree_is_consistent() {
        create_cli_commands().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let matches = create_cli_commands()
            .try_get_matches_from(["infractl", "cluster", "list", "-p", "p1", "-f", "json", "-n"])
            .unwrap();

        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, COMMAND_CLUSTER);
        let (_, list) = sub.subcommand().unwrap();
        assert_eq!(list.get_one::<String>(PARAMETER_PROJECT).map(String::as_str), Some("p1"));
        assert_eq!(list.get_one::<String>(PARAMETER_FORMAT).map(String::as_str), Some("json"));
        assert!(list.get_flag(PARAMETER_NON_INTERACTIVE));
    }

    #[test]
    fn test_cluster_create_requires_workers() {
        let result = create_cli_commands().try_get_matches_from([
            "infractl", "cluster", "create", "kube", "--type", "KUBERNETES",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(create_cli_commands().try_get_matches_from(["infractl"]).is_err());
    }
}
