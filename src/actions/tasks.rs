use crate::{
    actions::{
        utils::{print_list, print_one, required_string},
        CliActionError,
    },
    commands::params::{PARAMETER_ENTITY_ID, PARAMETER_ID, PARAMETER_STATE},
    context::ExecutionContext,
    waiter::wait_for_task_completion,
};
use clap::ArgMatches;
use tracing::trace;

pub async fn get_task(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let id = required_string(sub_matches, PARAMETER_ID)?;
    let task = context.api().get_task(id).await?;
    print_one(context, &task)
}

pub async fn list_tasks(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let entity_id = sub_matches.get_one::<String>(PARAMETER_ENTITY_ID).map(String::as_str);
    let state = sub_matches.get_one::<String>(PARAMETER_STATE).map(String::as_str);
    trace!("Listing tasks (entity {:?}, state {:?})", entity_id, state);

    let tasks = context.api().list_tasks(entity_id, state).await?;
    print_list(context, &tasks)
}

/// Wait for an already submitted task and print the ID of the entity it affected.
pub async fn wait_task(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError> {
    let id = required_string(sub_matches, PARAMETER_ID)?;
    let entity_id =
        wait_for_task_completion(context.api(), id, context.policy(), context.poll_context())
            .await?;
    println!("{}", entity_id);
    Ok(())
}
