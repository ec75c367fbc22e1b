use crate::{
    actions::{
        utils::{print_list, required_string, run_mutation},
        CliActionError,
    },
    commands::params::PARAMETER_NAME,
    context::ExecutionContext,
    model::Tenant,
};
use clap::ArgMatches;

pub async fn create_tenant(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let name = required_string(sub_matches, PARAMETER_NAME)?;
    let task = context.api().create_tenant(name).await?;
    run_mutation::<Tenant>(context, task).await
}

pub async fn list_tenants(context: &ExecutionContext) -> Result<(), CliActionError> {
    let tenants = context.api().list_tenants().await?;
    print_list(context, &tenants)
}
