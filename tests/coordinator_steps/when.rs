//! When steps for coordinator BDD scenarios.

use super::world::{CoordinatorWorld, run_async};
use mcp_coordinator::adapter_registry::{
    domain::AdapterStatus, services::RegisterAdapterRequest,
};
use mcp_coordinator::packet::domain::DataPacket;
use mcp_coordinator::server::ApiError;
use rstest_bdd_macros::when;

#[when("the adapter is registered")]
fn register_pending_adapter(world: &mut CoordinatorWorld) -> Result<(), eyre::Report> {
    let request = world
        .pending_registration
        .take()
        .ok_or_else(|| eyre::eyre!("no pending registration in scenario world"))?;
    world.last_register_result = Some(run_async(world.registry.register(request)));
    Ok(())
}

#[when(r#"adapter "{id}" re-registers as "{name}" with status "{status}""#)]
fn reregister_adapter(
    world: &mut CoordinatorWorld,
    id: String,
    name: String,
    status: String,
) -> Result<(), eyre::Report> {
    let parsed_status = AdapterStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("scenario status must be known: {err}"))?;
    let request =
        RegisterAdapterRequest::new(id, name, "http://localhost:9001").with_status(parsed_status);
    world.last_register_result = Some(run_async(world.registry.register(request)));
    Ok(())
}

#[when("the packet is submitted")]
fn submit_pending_packet(world: &mut CoordinatorWorld) -> Result<(), eyre::Report> {
    let payload = world
        .pending_packet
        .take()
        .ok_or_else(|| eyre::eyre!("no pending packet in scenario world"))?;
    let result = match DataPacket::try_from(payload) {
        Ok(packet) => run_async(world.dispatcher.submit(packet)).map_err(ApiError::from),
        Err(err) => Err(err),
    };
    world.last_submit_result = Some(result);
    Ok(())
}
