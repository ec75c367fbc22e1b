//! Shared command parameters for all CLI commands.
//!
//! This module defines common parameters that are used across multiple command modules.
//! It provides a centralized place to define parameter names and common argument configurations.

use crate::format::OutputFormat;
use clap::{Arg, ArgAction};

// Resource commands
pub const COMMAND_TASK: &str = "task";
pub const COMMAND_TENANT: &str = "tenant";
pub const COMMAND_PROJECT: &str = "project";
pub const COMMAND_VM: &str = "vm";
pub const COMMAND_DISK: &str = "disk";
pub const COMMAND_CLUSTER: &str = "cluster";

// Operations
pub const COMMAND_CREATE: &str = "create";
pub const COMMAND_GET: &str = "get";
pub const COMMAND_LIST: &str = "list";
pub const COMMAND_DELETE: &str = "delete";
pub const COMMAND_WAIT: &str = "wait";
pub const COMMAND_START: &str = "start";
pub const COMMAND_STOP: &str = "stop";
pub const COMMAND_RESIZE: &str = "resize";

// Global parameter names
pub const PARAMETER_ENDPOINT: &str = "endpoint";
pub const PARAMETER_TENANT: &str = "tenant";
pub const PARAMETER_PROJECT: &str = "project";
pub const PARAMETER_FORMAT: &str = "format";
pub const PARAMETER_HEADERS: &str = "headers";
pub const PARAMETER_PRETTY: &str = "pretty";
pub const PARAMETER_NON_INTERACTIVE: &str = "non-interactive";
pub const PARAMETER_VERBOSE: &str = "verbose";

// Command parameter names
pub const PARAMETER_ID: &str = "id";
pub const PARAMETER_NAME: &str = "name";
pub const PARAMETER_YES: &str = "yes";
pub const PARAMETER_ENTITY_ID: &str = "entity-id";
pub const PARAMETER_STATE: &str = "state";
pub const PARAMETER_FLAVOR: &str = "flavor";
pub const PARAMETER_IMAGE: &str = "image";
pub const PARAMETER_DISK: &str = "disk";
pub const PARAMETER_CAPACITY_GB: &str = "capacity-gb";
pub const PARAMETER_CLUSTER_TYPE: &str = "type";
pub const PARAMETER_WORKERS: &str = "workers";
pub const PARAMETER_VM_FLAVOR: &str = "vm-flavor";
pub const PARAMETER_WAIT_FOR_READY: &str = "wait-for-ready";

/// Create the global endpoint parameter.
pub fn endpoint_parameter() -> Arg {
    Arg::new(PARAMETER_ENDPOINT)
        .long(PARAMETER_ENDPOINT)
        .num_args(1)
        .required(false)
        .env("INFRACTL_ENDPOINT")
        .global(true)
        .help("Control plane endpoint URL (overrides the configuration file)")
}

/// Create the global tenant parameter.
pub fn tenant_parameter() -> Arg {
    Arg::new(PARAMETER_TENANT)
        .short('t')
        .long(PARAMETER_TENANT)
        .num_args(1)
        .required(false)
        .env("INFRACTL_TENANT")
        .global(true)
        .help("Tenant ID (overrides the configuration file)")
}

/// Create the global project parameter.
pub fn project_parameter() -> Arg {
    Arg::new(PARAMETER_PROJECT)
        .short('p')
        .long(PARAMETER_PROJECT)
        .num_args(1)
        .required(false)
        .env("INFRACTL_PROJECT")
        .global(true)
        .help("Project ID (overrides the configuration file)")
}

/// Create the global format parameter.
pub fn format_parameter() -> Arg {
    Arg::new(PARAMETER_FORMAT)
        .short('f')
        .long(PARAMETER_FORMAT)
        .num_args(1)
        .required(false)
        .env("INFRACTL_FORMAT")
        .default_value("tsv")
        .global(true)
        .help("Output data format")
        .value_parser(OutputFormat::names())
}

pub fn format_with_headers_parameter() -> Arg {
    Arg::new(PARAMETER_HEADERS)
        .long(PARAMETER_HEADERS)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Print column headers in tsv output")
}

pub fn format_pretty_parameter() -> Arg {
    Arg::new(PARAMETER_PRETTY)
        .long(PARAMETER_PRETTY)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Pretty-print JSON output")
}

pub fn non_interactive_parameter() -> Arg {
    Arg::new(PARAMETER_NON_INTERACTIVE)
        .short('n')
        .long(PARAMETER_NON_INTERACTIVE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Never prompt and never print progress")
}

pub fn verbose_parameter() -> Arg {
    Arg::new(PARAMETER_VERBOSE)
        .short('v')
        .long(PARAMETER_VERBOSE)
        .action(ArgAction::SetTrue)
        .global(true)
        .help("Enable verbose output for debugging")
}

/// Positional resource ID.
pub fn id_parameter(help: &'static str) -> Arg {
    Arg::new(PARAMETER_ID).required(true).help(help)
}

/// Positional resource name.
pub fn name_parameter(help: &'static str) -> Arg {
    Arg::new(PARAMETER_NAME).required(true).help(help)
}

/// Skip the confirmation prompt of destructive commands.
pub fn yes_parameter() -> Arg {
    Arg::new(PARAMETER_YES)
        .short('y')
        .long(PARAMETER_YES)
        .action(ArgAction::SetTrue)
        .help("Do not ask for confirmation")
}

pub fn flavor_parameter() -> Arg {
    Arg::new(PARAMETER_FLAVOR)
        .long(PARAMETER_FLAVOR)
        .num_args(1)
        .required(true)
        .help("Flavor name")
}

/// Number of worker nodes of a cluster.
pub fn workers_parameter() -> Arg {
    Arg::new(PARAMETER_WORKERS)
        .short('w')
        .long(PARAMETER_WORKERS)
        .num_args(1)
        .required(true)
        .value_parser(clap::value_parser!(u32).range(1..))
        .help("Number of worker nodes")
}

pub fn wait_for_ready_parameter() -> Arg {
    Arg::new(PARAMETER_WAIT_FOR_READY)
        .long(PARAMETER_WAIT_FOR_READY)
        .action(ArgAction::SetTrue)
        .help("Wait until the cluster reports READY, not just until the task completes")
}
