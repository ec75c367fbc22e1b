//! Disk command definitions.

use crate::commands::params::{
    flavor_parameter, id_parameter, name_parameter, yes_parameter, COMMAND_CREATE, COMMAND_DELETE,
    COMMAND_DISK, COMMAND_GET, COMMAND_LIST, PARAMETER_CAPACITY_GB,
};
use clap::{value_parser, Arg, Command};

/// Create the disk command with all its subcommands.
pub fn disk_command() -> Command {
    Command::new(COMMAND_DISK)
        .about("Manage persistent disks of a project")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a persistent disk in the current project")
                .arg(name_parameter("Disk name"))
                .arg(flavor_parameter())
                .arg(
                    Arg::new(PARAMETER_CAPACITY_GB)
                        .long(PARAMETER_CAPACITY_GB)
                        .num_args(1)
                        .required(true)
                        .value_parser(value_parser!(u32).range(1..))
                        .help("Disk capacity in GB"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a disk")
                .arg(id_parameter("Disk ID"))
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List the disks of the current project")
                .visible_alias("ls"),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get disk details")
                .arg(id_parameter("Disk ID")),
        )
}
