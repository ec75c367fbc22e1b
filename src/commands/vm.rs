//! VM command definitions.

use crate::commands::params::{
    flavor_parameter, id_parameter, name_parameter, yes_parameter, COMMAND_CREATE, COMMAND_DELETE,
    COMMAND_GET, COMMAND_LIST, COMMAND_START, COMMAND_STOP, COMMAND_VM, PARAMETER_DISK,
    PARAMETER_IMAGE,
};
use clap::{Arg, ArgAction, Command};

/// Create the vm command with all its subcommands.
pub fn vm_command() -> Command {
    Command::new(COMMAND_VM)
        .about("Manage virtual machines of a project")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a VM in the current project")
                .arg(name_parameter("VM name"))
                .arg(flavor_parameter())
                .arg(
                    Arg::new(PARAMETER_IMAGE)
                        .long(PARAMETER_IMAGE)
                        .num_args(1)
                        .required(true)
                        .help("Source image ID"),
                )
                .arg(
                    Arg::new(PARAMETER_DISK)
                        .long(PARAMETER_DISK)
                        .num_args(1)
                        .action(ArgAction::Append)
                        .value_name("NAME:FLAVOR[:GB]")
                        .help("Attach a disk; the first one is the boot disk (repeatable)"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_START)
                .about("Start a VM")
                .arg(id_parameter("VM ID")),
        )
        .subcommand(
            Command::new(COMMAND_STOP)
                .about("Stop a VM")
                .arg(id_parameter("VM ID")),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a VM")
                .arg(id_parameter("VM ID"))
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List the VMs of the current project")
                .visible_alias("ls"),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get VM details")
                .arg(id_parameter("VM ID")),
        )
}
