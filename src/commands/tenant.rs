//! Tenant command definitions.

use crate::commands::params::{
    id_parameter, name_parameter, yes_parameter, COMMAND_CREATE, COMMAND_DELETE, COMMAND_GET,
    COMMAND_LIST, COMMAND_TENANT,
};
use clap::Command;

/// Create the tenant command with all its subcommands.
pub fn tenant_command() -> Command {
    Command::new(COMMAND_TENANT)
        .about("Manage tenants")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a tenant and wait for the operation to finish")
                .arg(name_parameter("Tenant name")),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a tenant")
                .arg(id_parameter("Tenant ID"))
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List all tenants")
                .visible_alias("ls"),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get tenant details")
                .arg(id_parameter("Tenant ID")),
        )
}
