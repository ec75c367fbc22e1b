//! Helpers shared by all actions.

use crate::{
    actions::CliActionError,
    commands::params::{PARAMETER_ID, PARAMETER_YES},
    context::ExecutionContext,
    format::{format_list, format_one, TabularRecord},
    model::{Resource, Task},
    waiter::{wait_for_task, wait_for_task_completion},
};
use clap::ArgMatches;
use inquire::Confirm;
use tracing::{debug, trace};

/// Get a mandatory string argument.
pub fn required_string<'a>(
    sub_matches: &'a ArgMatches,
    name: &str,
) -> Result<&'a str, CliActionError> {
    sub_matches
        .get_one::<String>(name)
        .map(String::as_str)
        .ok_or_else(|| CliActionError::MissingRequiredArgument(name.to_string()))
}

pub fn print_output(output: &str) {
    let output = output.trim_end();
    if !output.is_empty() {
        println!("{}", output);
    }
}

pub fn print_one<T>(context: &ExecutionContext, item: &T) -> Result<(), CliActionError>
where
    T: TabularRecord + serde::Serialize,
{
    print_output(&format_one(item, context.format())?);
    Ok(())
}

pub fn print_list<T>(context: &ExecutionContext, items: &[T]) -> Result<(), CliActionError>
where
    T: TabularRecord + serde::Serialize,
{
    print_output(&format_list(items, context.format())?);
    Ok(())
}

/// Wait for a freshly submitted task and return the ID of the entity it affected.
pub async fn complete_task(context: &ExecutionContext, task: Task) -> Result<String, CliActionError> {
    debug!(
        "Submitted {} task {} for {} {}",
        task.operation, task.id, task.entity.kind, task.entity.id
    );
    let entity_id = wait_for_task_completion(
        context.api(),
        &task.id,
        context.policy(),
        context.poll_context(),
    )
    .await?;
    Ok(entity_id)
}

/// Print the outcome of a create or update.
///
/// Plain output is just the entity ID. Structured output is the entity
/// itself, fetched now unless the caller already holds a fresh snapshot.
pub async fn report_entity<E>(
    context: &ExecutionContext,
    entity_id: &str,
    snapshot: Option<E>,
) -> Result<(), CliActionError>
where
    E: Resource + TabularRecord,
{
    if !context.format().is_structured() {
        println!("{}", entity_id);
        return Ok(());
    }

    let entity = match snapshot {
        Some(entity) => entity,
        None => context.api().get_entity::<E>(entity_id).await?,
    };
    print_one(context, &entity)
}

/// Submit-and-wait for an operation that returns an entity.
pub async fn run_mutation<E>(context: &ExecutionContext, task: Task) -> Result<(), CliActionError>
where
    E: Resource + TabularRecord,
{
    let entity_id = complete_task(context, task).await?;
    report_entity::<E>(context, &entity_id, None).await
}

/// Ask before deleting, unless `--yes` or `-n` was given or stdin is not a terminal.
pub fn confirm_deletion(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
    kind: &str,
    id: &str,
) -> Result<bool, CliActionError> {
    if sub_matches.get_flag(PARAMETER_YES) || !context.can_prompt() {
        return Ok(true);
    }

    let confirmed = Confirm::new(&format!("Delete {} {}?", kind, id))
        .with_default(false)
        .prompt()?;
    Ok(confirmed)
}

pub async fn get_resource<E>(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError>
where
    E: Resource + TabularRecord,
{
    let id = required_string(sub_matches, PARAMETER_ID)?;
    trace!("Getting {} {}", E::KIND, id);
    let entity = context.api().get_entity::<E>(id).await?;
    print_one(context, &entity)
}

/// Delete a resource and wait for the server to finish removing it.
///
/// Prints the deleted ID, or the final task in structured formats.
pub async fn delete_resource<E>(
    context: &ExecutionContext,
    sub_matches: &ArgMatches,
) -> Result<(), CliActionError>
where
    E: Resource,
{
    let id = required_string(sub_matches, PARAMETER_ID)?;
    if !confirm_deletion(context, sub_matches, E::KIND, id)? {
        eprintln!("Aborted");
        return Ok(());
    }

    let task = context.api().delete_entity::<E>(id).await?;
    let task = wait_for_task(
        context.api(),
        &task.id,
        context.policy(),
        context.poll_context(),
    )
    .await?;

    if context.format().is_structured() {
        print_one(context, &task)
    } else {
        println!("{}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, Command};

    #[test]
    fn test_required_string() {
        let matches = Command::new("test")
            .arg(Arg::new(PARAMETER_ID).required(false))
            .try_get_matches_from(["test", "abc"])
            .unwrap();
        assert_eq!(required_string(&matches, PARAMETER_ID).unwrap(), "abc");

        let matches = Command::new("test")
            .arg(Arg::new(PARAMETER_ID).required(false))
            .try_get_matches_from(["test"])
            .unwrap();
        assert!(matches!(
            required_string(&matches, PARAMETER_ID),
            Err(CliActionError::MissingRequiredArgument(_))
        ));
    }
}
