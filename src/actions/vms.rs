use crate::{
    actions::{
        utils::{print_list, required_string, run_mutation},
        CliActionError,
    },
    commands::params::{PARAMETER_DISK, PARAMETER_FLAVOR, PARAMETER_ID, PARAMETER_IMAGE, PARAMETER_NAME},
    context::ExecutionContext,
    model::{AttachedDiskSpec, Vm, VmCreateSpec},
};
use clap::ArgMatches;

pub async fn create_vm(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let project_id = context.configuration().require_project()?;

    let attached_disks = sub_matches
        .get_many::<String>(PARAMETER_DISK)
        .into_iter()
        .flatten()
        .enumerate()
        .map(|(index, value)| parse_disk(value, index == 0))
        .collect::<Result<Vec<_>, _>>()?;

    let spec = VmCreateSpec {
        name: required_string(sub_matches, PARAMETER_NAME)?.to_string(),
        flavor: required_string(sub_matches, PARAMETER_FLAVOR)?.to_string(),
        source_image_id: required_string(sub_matches, PARAMETER_IMAGE)?.to_string(),
        attached_disks,
    };

    let task = context.api().create_vm(project_id, &spec).await?;
    run_mutation::<Vm>(context, task).await
}

pub async fn start_vm(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let id = required_string(sub_matches, PARAMETER_ID)?;
    let task = context.api().start_vm(id).await?;
    run_mutation::<Vm>(context, task).await
}

pub async fn stop_vm(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let id = required_string(sub_matches, PARAMETER_ID)?;
    let task = context.api().stop_vm(id).await?;
    run_mutation::<Vm>(context, task).await
}

pub async fn list_vms(context: &ExecutionContext) -> Result<(), CliActionError> {
    let project_id = context.configuration().require_project()?;
    let vms = context.api().list_vms(project_id).await?;
    print_list(context, &vms)
}

/// Parse a `NAME:FLAVOR[:GB]` disk description.
fn parse_disk(value: &str, boot_disk: bool) -> Result<AttachedDiskSpec, CliActionError> {
    let invalid = |reason: &str| CliActionError::InvalidArgument {
        name: PARAMETER_DISK.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    };

    let parts: Vec<&str> = value.split(':').collect();
    let (name, flavor, capacity) = match parts.as_slice() {
        [name, flavor] => (*name, *flavor, None),
        [name, flavor, capacity] => (*name, *flavor, Some(*capacity)),
        _ => return Err(invalid("expected NAME:FLAVOR[:GB]")),
    };
    if name.is_empty() || flavor.is_empty() {
        return Err(invalid("name and flavor must not be empty"));
    }

    let capacity_gb = capacity
        .map(|c| c.parse::<u32>())
        .transpose()
        .map_err(|_| invalid("capacity must be a whole number of GB"))?;

    Ok(AttachedDiskSpec {
        name: name.to_string(),
        flavor: flavor.to_string(),
        boot_disk,
        capacity_gb,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_disk() {
        let disk = parse_disk("boot:ssd:20", true).unwrap();
        assert_eq!(disk.name, "boot");
        assert_eq!(disk.flavor, "ssd");
        assert!(disk.boot_disk);
        assert_eq!(disk.capacity_gb, Some(20));

        let disk = parse_disk("data:hdd", false).unwrap();
        assert!(!disk.boot_disk);
        assert_eq!(disk.capacity_gb, None);
    }

    #[test]
    fn test_parse_disk_rejects_malformed_values() {
        assert!(parse_disk("boot", true).is_err());
        assert!(parse_disk(":ssd", true).is_err());
        assert!(parse_disk("boot:ssd:big", true).is_err());
        assert!(parse_disk("a:b:1:2", true).is_err());
    }
}
