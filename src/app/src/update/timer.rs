use crux_core::Command;

use crate::commands::timer::{TimerId, TimerOutput};
use crate::events::{DeviceEvent, Event};
use crate::model::Model;
use crate::{Effect, TimerCmd};

/// Start a one-shot timer and return its handle together with the command.
///
/// `on_elapsed` builds the event delivered when the timer fires; a cancelled timer
/// reports back as `TimerCleared`.
pub fn arm(
    model: &mut Model,
    millis: u64,
    on_elapsed: fn(TimerId) -> Event,
) -> (TimerId, Command<Effect, Event>) {
    let id = model.next_timer_id();
    let cmd = TimerCmd::start(id, millis)
        .build()
        .then_send(move |output| match output {
            TimerOutput::Elapsed { id } => on_elapsed(id),
            TimerOutput::Cancelled { id } => Event::Device(DeviceEvent::TimerCleared { timer: id }),
        });
    (id, cmd)
}

pub fn arm_secs(
    model: &mut Model,
    secs: u32,
    on_elapsed: fn(TimerId) -> Event,
) -> (TimerId, Command<Effect, Event>) {
    arm(model, u64::from(secs) * 1000, on_elapsed)
}

/// Clear every given handle
pub fn cancel_all(ids: impl IntoIterator<Item = TimerId>) -> Command<Effect, Event> {
    Command::all(ids.into_iter().map(|id| {
        log::debug!("cancelling timer {id:?}");
        TimerCmd::cancel(id)
            .build()
            .then_send(|output| Event::Device(DeviceEvent::TimerCleared { timer: output.id() }))
    }))
}
