//! Task command definitions.

use crate::commands::params::{
    id_parameter, COMMAND_GET, COMMAND_LIST, COMMAND_TASK, COMMAND_WAIT, PARAMETER_ENTITY_ID,
    PARAMETER_STATE,
};
use clap::{Arg, Command};

/// Create the task command with all its subcommands.
pub fn task_command() -> Command {
    Command::new(COMMAND_TASK)
        .about("Inspect and wait for asynchronous operations")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get the current status of a task")
                .arg(id_parameter("Task ID")),
        )
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List tasks")
                .visible_alias("ls")
                .arg(
                    Arg::new(PARAMETER_ENTITY_ID)
                        .long(PARAMETER_ENTITY_ID)
                        .num_args(1)
                        .required(false)
                        .help("Only list tasks affecting this entity"),
                )
                .arg(
                    Arg::new(PARAMETER_STATE)
                        .long(PARAMETER_STATE)
                        .num_args(1)
                        .required(false)
                        .help("Only list tasks in this state (QUEUED, STARTED, COMPLETED, ERROR)"),
                ),
        )
        .subcommand(
            Command::new(COMMAND_WAIT)
                .about("Wait for a task to finish and print the affected entity ID")
                .arg(id_parameter("Task ID")),
        )
}
