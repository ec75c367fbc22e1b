use crate::{
    actions::{
        utils::{complete_task, print_list, report_entity, required_string},
        CliActionError,
    },
    commands::params::{
        PARAMETER_CLUSTER_TYPE, PARAMETER_ID, PARAMETER_NAME, PARAMETER_VM_FLAVOR,
        PARAMETER_WAIT_FOR_READY, PARAMETER_WORKERS,
    },
    context::ExecutionContext,
    model::{Cluster, ClusterCreateSpec, Task},
    waiter::wait_for_entity_ready,
};
use clap::ArgMatches;

fn worker_count(sub_matches: &ArgMatches) -> Result<u32, CliActionError> {
    sub_matches
        .get_one::<u32>(PARAMETER_WORKERS)
        .copied()
        .ok_or_else(|| CliActionError::MissingRequiredArgument(PARAMETER_WORKERS.to_string()))
}

/// Wait for the task and, if asked to, for the cluster to become READY.
async fn finish_cluster_task(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
    task: Task,
) -> Result<(), CliActionError> {
    let cluster_id = complete_task(context, task).await?;

    let snapshot = if sub_matches.get_flag(PARAMETER_WAIT_FOR_READY) {
        let cluster: Cluster = wait_for_entity_ready(
            context.api(),
            &cluster_id,
            context.policy(),
            context.poll_context(),
        )
        .await?;
        Some(cluster)
    } else {
        None
    };

    report_entity::<Cluster>(context, &cluster_id, snapshot).await
}

pub async fn create_cluster(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let project_id = context.configuration().require_project()?;

    let spec = ClusterCreateSpec {
        name: required_string(sub_matches, PARAMETER_NAME)?.to_string(),
        cluster_type: required_string(sub_matches, PARAMETER_CLUSTER_TYPE)?.to_uppercase(),
        worker_count: worker_count(sub_matches)?,
        vm_flavor: sub_matches.get_one::<String>(PARAMETER_VM_FLAVOR).cloned(),
    };

    let task = context.api().create_cluster(project_id, &spec).await?;
    finish_cluster_task(context, sub_matches, task).await
}

pub async fn resize_cluster(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let id = required_string(sub_matches, PARAMETER_ID)?;
    let workers = worker_count(sub_matches)?;

    let task = context.api().resize_cluster(id, workers).await?;
    finish_cluster_task(context, sub_matches, task).await
}

pub async fn list_clusters(context: &ExecutionContext) -> Result<(), CliActionError> {
    let project_id = context.configuration().require_project()?;
    let clusters = context.api().list_clusters(project_id).await?;
    print_list(context, &clusters)
}
