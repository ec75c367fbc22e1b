use crate::{
    actions::{
        utils::{print_list, required_string, run_mutation},
        CliActionError,
    },
    commands::params::PARAMETER_NAME,
    context::ExecutionContext,
    model::Project,
};
use clap::ArgMatches;

pub async fn create_project(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let tenant_id = context.configuration().require_tenant()?;
    let name = required_string(sub_matches, PARAMETER_NAME)?;

    let task = context.api().create_project(tenant_id, name).await?;
    run_mutation::<Project>(context, task).await
}

pub async fn list_projects(context: &ExecutionContext) -> Result<(), CliActionError> {
    let tenant_id = context.configuration().require_tenant()?;
    let projects = context.api().list_projects(tenant_id).await?;
    print_list(context, &projects)
}
