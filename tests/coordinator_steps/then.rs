//! Then steps for coordinator BDD scenarios.

use super::world::{CoordinatorWorld, run_async};
use mcp_coordinator::adapter_registry::{
    domain::{AdapterId, AdapterStatus},
    services::AdapterRegistryError,
};
use mcp_coordinator::packet::domain::{DataType, Projection, ProjectionKind};
use mcp_coordinator::server::ApiError;
use rstest_bdd_macros::then;

#[then("the status view lists {count:usize} adapter")]
fn status_lists_count(world: &CoordinatorWorld, count: usize) -> Result<(), eyre::Report> {
    let status = world
        .registry
        .status()
        .map_err(|err| eyre::eyre!("status failed: {err}"))?;
    if status.len() != count {
        return Err(eyre::eyre!(
            "expected {count} adapters, found {}",
            status.len()
        ));
    }
    Ok(())
}

#[then(r#"adapter "{id}" reports status "{expected}""#)]
fn adapter_reports_status(
    world: &CoordinatorWorld,
    id: String,
    expected: String,
) -> Result<(), eyre::Report> {
    let adapter_id = AdapterId::new(id).map_err(|err| eyre::eyre!("invalid id: {err}"))?;
    let expected_status = AdapterStatus::try_from(expected.as_str())
        .map_err(|err| eyre::eyre!("scenario status must be known: {err}"))?;
    let status = world
        .registry
        .status()
        .map_err(|err| eyre::eyre!("status failed: {err}"))?;
    let view = status
        .get(&adapter_id)
        .ok_or_else(|| eyre::eyre!("adapter '{adapter_id}' is not listed"))?;
    if view.status != expected_status {
        return Err(eyre::eyre!(
            "expected status {expected_status}, found {}",
            view.status
        ));
    }
    Ok(())
}

#[then("registration fails because the registry is closed")]
fn registration_fails_closed(world: &CoordinatorWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_register_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing registration result in scenario world"))?;
    if !matches!(result, Err(AdapterRegistryError::Closed)) {
        return Err(eyre::eyre!("expected closed registry error, got {result:?}"));
    }
    Ok(())
}

#[then(r#"the packet count for "{tag}" is {count:u64}"#)]
fn packet_count_is(world: &CoordinatorWorld, tag: String, count: u64) -> Result<(), eyre::Report> {
    let data_type = DataType::try_from(tag.as_str())
        .map_err(|err| eyre::eyre!("scenario tag must be known: {err}"))?;
    let counts = run_async(world.statistics.counts_by_tag())
        .map_err(|err| eyre::eyre!("counts failed: {err}"))?;
    let actual = counts.get(data_type);
    if actual != count {
        return Err(eyre::eyre!("expected {count} '{tag}' packets, found {actual}"));
    }
    Ok(())
}

#[then("no packets are counted")]
fn no_packets_counted(world: &CoordinatorWorld) -> Result<(), eyre::Report> {
    let counts = run_async(world.statistics.counts_by_tag())
        .map_err(|err| eyre::eyre!("counts failed: {err}"))?;
    if counts.total() != 0 {
        return Err(eyre::eyre!("expected no packets, found {}", counts.total()));
    }
    Ok(())
}

#[then(r#"the conversation projection holds conversation "{conversation}""#)]
fn conversation_projected(
    world: &CoordinatorWorld,
    conversation: String,
) -> Result<(), eyre::Report> {
    let rows = run_async(world.projections.recent(ProjectionKind::Conversation, None))
        .map_err(|err| eyre::eyre!("projection read failed: {err}"))?;
    let found = rows.iter().any(|row| match row {
        Projection::Conversation(record) => {
            record.conversation_id.as_deref() == Some(conversation.as_str())
        }
        Projection::CodeInteraction(_) => false,
    });
    if !found {
        return Err(eyre::eyre!(
            "conversation '{conversation}' missing from {rows:?}"
        ));
    }
    Ok(())
}

#[then("no rows are projected")]
fn no_rows_projected(world: &CoordinatorWorld) -> Result<(), eyre::Report> {
    for kind in [ProjectionKind::Conversation, ProjectionKind::CodeInteraction] {
        let rows = run_async(world.projections.recent(kind, None))
            .map_err(|err| eyre::eyre!("projection read failed: {err}"))?;
        if !rows.is_empty() {
            return Err(eyre::eyre!("expected no {kind:?} rows, found {rows:?}"));
        }
    }
    Ok(())
}

#[then(r#"the submission is rejected for field "{field}""#)]
fn submission_rejected(world: &CoordinatorWorld, field: String) -> Result<(), eyre::Report> {
    let result = world
        .last_submit_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission result in scenario world"))?;
    match result {
        Err(ApiError::Validation { field: actual, .. }) if *actual == field => Ok(()),
        other => Err(eyre::eyre!(
            "expected validation failure on '{field}', got {other:?}"
        )),
    }
}
