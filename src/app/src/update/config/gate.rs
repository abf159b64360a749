use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::types::{ChangeRequest, PendingChange};
use crate::update::device::stop_operation;
use crate::{update_field, Effect};

use super::submit::submit;

/// Hold `request` until the operator confirms it. An earlier unconfirmed change is
/// discarded.
pub fn propose(request: ChangeRequest, model: &mut Model) -> Command<Effect, Event> {
    if let Some(previous) = model.pending_change.take() {
        log::info!(
            "discarding unconfirmed change to {}",
            previous.request.target_label()
        );
    }
    log::debug!("awaiting confirmation for {}", request.target_label());
    model.pending_change = Some(PendingChange::new(request));
    render()
}

/// Send the pending change. Anything left of a previous reboot is stopped first.
pub fn confirm(model: &mut Model) -> Command<Effect, Event> {
    let Some(pending) = model.pending_change.take() else {
        log::debug!("confirm without a pending change");
        return Command::done();
    };
    let stop = stop_operation(model);
    Command::all([stop, submit(pending.request, model)])
}

pub fn cancel(model: &mut Model) -> Command<Effect, Event> {
    update_field!(model.pending_change, None)
}
