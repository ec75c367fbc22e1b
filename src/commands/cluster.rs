//! Cluster command definitions.
//!
//! `create` and `resize` finish when the task completes. With
//! `--wait-for-ready` they keep polling the cluster itself until it is READY.

use crate::commands::params::{
    id_parameter, name_parameter, wait_for_ready_parameter, workers_parameter, yes_parameter,
    COMMAND_CLUSTER, COMMAND_CREATE, COMMAND_DELETE, COMMAND_GET, COMMAND_LIST, COMMAND_RESIZE,
    PARAMETER_CLUSTER_TYPE, PARAMETER_VM_FLAVOR,
};
use clap::{Arg, Command};

/// Create the cluster command with all its subcommands.
pub fn cluster_command() -> Command {
    Command::new(COMMAND_CLUSTER)
        .about("Manage clusters of a project")
        .subcommand_required(true)
        .subcommand(
            Command::new(COMMAND_CREATE)
                .about("Create a cluster in the current project")
                .arg(name_parameter("Cluster name"))
                .arg(
                    Arg::new(PARAMETER_CLUSTER_TYPE)
                        .long(PARAMETER_CLUSTER_TYPE)
                        .num_args(1)
                        .required(true)
                        .help("Cluster type, e.g. KUBERNETES"),
                )
                .arg(workers_parameter())
                .arg(
                    Arg::new(PARAMETER_VM_FLAVOR)
                        .long(PARAMETER_VM_FLAVOR)
                        .num_args(1)
                        .required(false)
                        .help("Flavor of the cluster node VMs"),
                )
                .arg(wait_for_ready_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_RESIZE)
                .about("Change the number of worker nodes of a cluster")
                .arg(id_parameter("Cluster ID"))
                .arg(workers_parameter())
                .arg(wait_for_ready_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_DELETE)
                .about("Delete a cluster")
                .arg(id_parameter("Cluster ID"))
                .arg(yes_parameter()),
        )
        .subcommand(
            Command::new(COMMAND_LIST)
                .about("List the clusters of the current project")
                .visible_alias("ls"),
        )
        .subcommand(
            Command::new(COMMAND_GET)
                .about("Get cluster details")
                .arg(id_parameter("Cluster ID")),
        )
}
