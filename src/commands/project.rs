//! Project command definitions.
//!
//! Projects live under a tenant, selected with the global `--tenant` option
//! or the `tenant` configuration value.

use crate::commands::params::{
    id_parameter, name_parameter, yes_parameter, COMMAND_CREATE, COMMAND_DELETE, COMMAND_GET,
    COMMAND_LIST, COMMAND_PROJECT,
};
use clap::Command;

/// Create the project command with all its subcommands.
pub fn project_command() -> Command {
    Command::new(COMMAND_PROJECT)
        .about("Manage projects of a tenant")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a project in the current tenant")
                .arg(name_parameter("Project name")),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a project")
                .arg(id_parameter("Project ID"))
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List the projects of the current tenant")
                .visible_alias("ls"),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get project details")
                .arg(id_parameter("Project ID")),
        )
}
