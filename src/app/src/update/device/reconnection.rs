//! Reconnection polling after a reboot.
//!
//! A session starts in `Settling`, where only the one-second clock runs. Once
//! `settle_secs` have passed it switches to `Probing` and the device is polled every
//! `probe_interval_secs`, the first poll going out one interval after settling ends. The
//! first healthy probe ends the session successfully; reaching
//! `settle_secs + probing_secs` without one fails it. Every callback carries the handle
//! or session id it was started with, so anything belonging to an earlier session is
//! dropped on arrival.

use crux_core::{render::render, Command};

use crate::commands::timer::TimerId;
use crate::events::{DeviceEvent, Event};
use crate::http_helpers::{build_url, is_healthy_probe};
use crate::model::Model;
use crate::types::{
    DeviceOperationState, OverlaySpinnerState, ReconnectionPhase, ReconnectionSession,
    Severity,
};
use crate::update::{config, timer};
use crate::{Effect, HttpCmd};

use super::stop_operation;

pub const PROBE_ENDPOINT: &str = "/api/config/device";

/// Request header carrying the probe timeout in milliseconds. The shell aborts the
/// request once it expires.
pub const TIMEOUT_HEADER: &str = "X-Timeout-Ms";

const CLOCK_MILLIS: u64 = 1000;

fn clock_tick(timer: TimerId) -> Event {
    Event::Device(DeviceEvent::ClockTick { timer })
}

fn probe_tick(timer: TimerId) -> Event {
    Event::Device(DeviceEvent::ProbeTick { timer })
}

/// Begin waiting for the device to come back after an accepted reboot
pub fn start_session(model: &mut Model) -> Command<Effect, Event> {
    let stop = stop_operation(model);
    let id = model.next_session_id();
    let (clock, start_clock) = timer::arm(model, CLOCK_MILLIS, clock_tick);
    let timings = model.timings;

    log::info!(
        "reconnection session {id} started, settling for {}s",
        timings.settle_secs
    );
    model.device_operation_state = DeviceOperationState::Reconnecting(ReconnectionSession {
        id,
        elapsed_secs: 0,
        phase: ReconnectionPhase::Settling { clock },
        timings,
    });
    model.config_view_open = false;
    model.overlay_spinner = OverlaySpinnerState::new("Device Rebooting")
        .with_text("Device is rebooting...")
        .with_detail("Waiting for device to come back online...")
        .with_countdown(timings.settle_secs);

    Command::all([stop, start_clock, render()])
}

pub fn handle_clock_tick(timer: TimerId, model: &mut Model) -> Command<Effect, Event> {
    let Some(mut session) = model.device_operation_state.session().copied() else {
        log::debug!("clock tick {timer:?} outside a session");
        return Command::done();
    };
    if session.phase.clock() != Some(timer) {
        log::debug!("ignoring stale clock tick {timer:?}");
        return Command::done();
    }

    session.elapsed_secs += 1;
    let elapsed = session.elapsed_secs;
    let settle = session.timings.settle_secs;
    let deadline = session.timings.deadline_secs();

    if elapsed >= deadline {
        return fail_session(session, model);
    }

    let (clock, rearm) = timer::arm(model, CLOCK_MILLIS, clock_tick);
    let mut commands = vec![rearm];

    session.phase = match session.phase {
        ReconnectionPhase::Settling { .. } if elapsed >= settle => {
            let interval = session.timings.probe_interval_secs;
            let (cadence, start_cadence) = timer::arm_secs(model, interval, probe_tick);
            log::info!("session {} probing every {interval}s", session.id);
            model.overlay_spinner.set_text("Checking connection...");
            commands.push(start_cadence);
            ReconnectionPhase::Probing { clock, cadence }
        }
        ReconnectionPhase::Settling { .. } => ReconnectionPhase::Settling { clock },
        ReconnectionPhase::Probing { cadence, .. } => ReconnectionPhase::Probing { clock, cadence },
        terminal => terminal,
    };

    match session.phase {
        ReconnectionPhase::Settling { .. } => {
            let remaining = settle.saturating_sub(elapsed);
            model
                .overlay_spinner
                .set_detail(format!("Rebooting... ({remaining}s)"));
            model.overlay_spinner.set_countdown(Some(remaining));
        }
        _ => {
            model.overlay_spinner.set_detail(format!(
                "Waiting for reconnection... ({}s)",
                elapsed.saturating_sub(settle)
            ));
            model
                .overlay_spinner
                .set_countdown(Some(deadline.saturating_sub(elapsed)));
        }
    }

    model.device_operation_state = DeviceOperationState::Reconnecting(session);
    commands.push(render());
    Command::all(commands)
}

pub fn handle_probe_tick(timer: TimerId, model: &mut Model) -> Command<Effect, Event> {
    let Some(mut session) = model.device_operation_state.session().copied() else {
        return Command::done();
    };
    let ReconnectionPhase::Probing { clock, cadence } = session.phase else {
        log::debug!("probe tick {timer:?} outside probing");
        return Command::done();
    };
    if cadence != timer {
        log::debug!("ignoring stale probe tick {timer:?}");
        return Command::done();
    }

    let (cadence, rearm) = timer::arm_secs(model, session.timings.probe_interval_secs, probe_tick);
    session.phase = ReconnectionPhase::Probing { clock, cadence };
    model.device_operation_state = DeviceOperationState::Reconnecting(session);

    Command::all([rearm, send_probe(&session)])
}

fn send_probe(session: &ReconnectionSession) -> Command<Effect, Event> {
    let id = session.id;
    let sent_at = session.elapsed_secs;
    let timeout_ms = u64::from(session.timings.probe_timeout_secs) * 1000;
    log::trace!("session {id} probing at {sent_at}s");
    HttpCmd::get(build_url(PROBE_ENDPOINT))
        .header(TIMEOUT_HEADER, timeout_ms.to_string())
        .build()
        .then_send(move |result| {
            Event::Device(DeviceEvent::ProbeResponse {
                session: id,
                sent_at,
                healthy: is_healthy_probe(result),
            })
        })
}

pub fn handle_probe_response(
    session_id: u64,
    sent_at: u32,
    healthy: bool,
    model: &mut Model,
) -> Command<Effect, Event> {
    let Some(mut session) = model.device_operation_state.session().copied() else {
        return Command::done();
    };
    if session.id != session_id {
        log::debug!("dropping probe of session {session_id}");
        return Command::done();
    }
    let ReconnectionPhase::Probing { clock, cadence } = session.phase else {
        return Command::done();
    };
    // the shell aborts at the timeout, this catches answers it let through anyway
    let age = session.elapsed_secs.saturating_sub(sent_at);
    if age > session.timings.probe_timeout_secs {
        log::debug!("probe sent at {sent_at}s answered after {age}s, treated as failed");
        return Command::done();
    }
    if !healthy {
        log::trace!("device not reachable yet");
        return Command::done();
    }

    let elapsed = session.elapsed_secs;
    log::info!("device reconnected after {elapsed}s");

    let cancel = timer::cancel_all([clock, cadence]);
    let (dismiss, start_dismiss) =
        timer::arm_secs(model, session.timings.success_display_secs, |timer| {
            Event::Device(DeviceEvent::SuccessDisplayElapsed { timer })
        });
    session.phase = ReconnectionPhase::Succeeded { dismiss };
    model.device_operation_state = DeviceOperationState::Reconnecting(session);

    model.overlay_spinner.set_text("Device reconnected!");
    model
        .overlay_spinner
        .set_detail(format!("Reconnected after {elapsed}s"));
    model.overlay_spinner.set_severity(Severity::Success);
    model.overlay_spinner.set_countdown(None);
    model.notify("Device reconnected successfully!", Severity::Success);

    Command::all([cancel, start_dismiss, render()])
}

fn fail_session(mut session: ReconnectionSession, model: &mut Model) -> Command<Effect, Event> {
    log::warn!(
        "session {} gave up after {}s",
        session.id,
        session.elapsed_secs
    );
    let cancel = timer::cancel_all(session.phase.cadence());
    session.phase = ReconnectionPhase::Failed;
    model.device_operation_state = DeviceOperationState::Reconnecting(session);

    model.overlay_spinner.set_title("Connection Timeout");
    model.overlay_spinner.set_text("Device not responding");
    model
        .overlay_spinner
        .set_detail("Please check your connection and try again.");
    model.overlay_spinner.set_timed_out();
    model.notify(
        "Device did not reconnect. Please check connection.",
        Severity::Danger,
    );

    Command::all([cancel, render()])
}

/// The success indicator has been shown long enough; reload the configuration
pub fn handle_success_display_elapsed(
    timer: TimerId,
    model: &mut Model,
) -> Command<Effect, Event> {
    let expected = model
        .device_operation_state
        .session()
        .map(|session| session.phase);
    if expected != Some(ReconnectionPhase::Succeeded { dismiss: timer }) {
        log::debug!("ignoring stale success display {timer:?}");
        return Command::done();
    }

    model.device_operation_state = DeviceOperationState::Idle;
    model.overlay_spinner.clear();
    model.notify("Refreshing configuration...", Severity::Info);
    model.config_view_open = true;
    Command::all([render(), config::load_config()])
}

/// Close the overlay of a failed session
pub fn handle_dismiss(model: &mut Model) -> Command<Effect, Event> {
    let failed = model
        .device_operation_state
        .session()
        .is_some_and(|session| session.phase == ReconnectionPhase::Failed);
    if !failed {
        return Command::done();
    }
    model.device_operation_state = DeviceOperationState::Idle;
    model.overlay_spinner.clear();
    render()
}
