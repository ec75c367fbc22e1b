use crate::{
    actions::{clusters, disks, projects, tasks, tenants, utils, vms},
    commands::params::{
        COMMAND_CLUSTER, COMMAND_CREATE, COMMAND_DELETE, COMMAND_DISK, COMMAND_GET, COMMAND_LIST,
        COMMAND_PROJECT, COMMAND_RESIZE, COMMAND_START, COMMAND_STOP, COMMAND_TASK,
        COMMAND_TENANT, COMMAND_VM, COMMAND_WAIT,
    },
    configuration::Configuration,
    context::ExecutionContext,
    error::CliError,
    model::{Cluster, Disk, Project, Tenant, Vm},
};
use clap::ArgMatches;

fn extract_subcommand_name(sub_matches: &ArgMatches) -> String {
    let message = match sub_matches.subcommand() {
        Some(m) => m.0,
        None => "unknown",
    };

    message.to_string()
}

/// The matches of the innermost subcommand, where every global option is visible.
pub fn leaf_matches(matches: &ArgMatches) -> &ArgMatches {
    let mut current = matches;
    while let Some((_, sub_matches)) = current.subcommand() {
        current = sub_matches;
    }
    current
}

pub async fn execute_command(
    configuration: Configuration,
    matches: &ArgMatches,
) -> Result<(), CliError> {
    let context = ExecutionContext::from_matches(configuration, leaf_matches(matches))?;

    match matches.subcommand() {
        Some((COMMAND_TASK, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_GET, sub_matches)) => tasks::get_task(&context, sub_matches).await?,
            Some((COMMAND_LIST, sub_matches)) => tasks::list_tasks(&context, sub_matches).await?,
            Some((COMMAND_WAIT, sub_matches)) => tasks::wait_task(&context, sub_matches).await?,
            _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))),
        },
        Some((COMMAND_TENANT, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_CREATE, sub_matches)) => {
                tenants::create_tenant(&context, sub_matches).await?
            }
            Some((COMMAND_DELETE, sub_matches)) => {
                utils::delete_resource::<Tenant>(&context, sub_matches).await?
            }
            Some((COMMAND_LIST, _)) => tenants::list_tenants(&context).await?,
            Some((COMMAND_GET, sub_matches)) => {
                utils::get_resource::<Tenant>(&context, sub_matches).await?
            }
            _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))),
        },
        Some((COMMAND_PROJECT, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_CREATE, sub_matches)) => {
                projects::create_project(&context, sub_matches).await?
            }
            Some((COMMAND_DELETE, sub_matches)) => {
                utils::delete_resource::<Project>(&context, sub_matches).await?
            }
            Some((COMMAND_LIST, _)) => projects::list_projects(&context).await?,
            Some((COMMAND_GET, sub_matches)) => {
                utils::get_resource::<Project>(&context, sub_matches).await?
            }
            _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))),
        },
        Some((COMMAND_VM, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_CREATE, sub_matches)) => vms::create_vm(&context, sub_matches).await?,
            Some((COMMAND_START, sub_matches)) => vms::start_vm(&context, sub_matches).await?,
            Some((COMMAND_STOP, sub_matches)) => vms::stop_vm(&context, sub_matches).await?,
            Some((COMMAND_DELETE, sub_matches)) => {
                utils::delete_resource::<Vm>(&context, sub_matches).await?
            }
            Some((COMMAND_LIST, _)) => vms::list_vms(&context).await?,
            Some((COMMAND_GET, sub_matches)) => {
                utils::get_resource::<Vm>(&context, sub_matches).await?
            }
            _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))),
        },
        Some((COMMAND_DISK, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_CREATE, sub_matches)) => disks::create_disk(&context, sub_matches).await?,
            Some((COMMAND_DELETE, sub_matches)) => {
                utils::delete_resource::<Disk>(&context, sub_matches).await?
            }
            Some((COMMAND_LIST, _)) => disks::list_disks(&context).await?,
            Some((COMMAND_GET, sub_matches)) => {
                utils::get_resource::<Disk>(&context, sub_matches).await?
            }
            _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))),
        },
        Some((COMMAND_CLUSTER, sub_matches)) => match sub_matches.subcommand() {
            Some((COMMAND_CREATE, sub_matches)) => {
                clusters::create_cluster(&context, sub_matches).await?
            }
            Some((COMMAND_RESIZE, sub_matches)) => {
                clusters::resize_cluster(&context, sub_matches).await?
            }
            Some((COMMAND_DELETE, sub_matches)) => {
                utils::delete_resource::<Cluster>(&context, sub_matches).await?
            }
            Some((COMMAND_LIST, _)) => clusters::list_clusters(&context).await?,
            Some((COMMAND_GET, sub_matches)) => {
                utils::get_resource::<Cluster>(&context, sub_matches).await?
            }
            _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(sub_matches))),
        },
        _ => return Err(CliError::UnsupportedSubcommand(extract_subcommand_name(matches))),
    }

    Ok(())
}
