use crate::{
    actions::{
        utils::{print_list, required_string, run_mutation},
        CliActionError,
    },
    commands::params::{PARAMETER_CAPACITY_GB, PARAMETER_FLAVOR, PARAMETER_NAME},
    context::ExecutionContext,
    model::{Disk, DiskCreateSpec},
};
use clap::ArgMatches;

const PERSISTENT_DISK: &str = "persistent-disk";

pub async fn create_disk(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let project_id = context.configuration().require_project()?;
    let capacity_gb = sub_matches
        .get_one::<u32>(PARAMETER_CAPACITY_GB)
        .copied()
        .ok_or_else(|| CliActionError::MissingRequiredArgument(PARAMETER_CAPACITY_GB.to_string()))?;

    let spec = DiskCreateSpec {
        name: required_string(sub_matches, PARAMETER_NAME)?.to_string(),
        flavor: required_string(sub_matches, PARAMETER_FLAVOR)?.to_string(),
        capacity_gb,
        kind: PERSISTENT_DISK.to_string(),
    };

    let task = context.api().create_disk(project_id, &spec).await?;
    run_mutation::<Disk>(context, task).await
}

pub async fn list_disks(context: &ExecutionContext) -> Result<(), CliActionError> {
    let project_id = context.configuration().require_project()?;
    let disks = context.api().list_disks(project_id).await?;
    print_list(context, &disks)
}
