mod reconnection;

use reconnection::{
    handle_clock_tick, handle_dismiss, handle_probe_response, handle_probe_tick,
    handle_success_display_elapsed, start_session,
};

use crux_core::{render::render, Command};

use crate::events::{DeviceEvent, Event};
use crate::model::Model;
use crate::types::{DeviceOperationState, RebootResponse, Severity};
use crate::update::timer;
use crate::{http_post, Effect};

pub const REBOOT_ENDPOINT: &str = "/api/config/reboot";

/// Handle reboot and reconnection events
pub fn handle(event: DeviceEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        DeviceEvent::Reboot => request_reboot(model),

        DeviceEvent::RebootDelayElapsed { timer } => {
            if model.device_operation_state != (DeviceOperationState::RebootScheduled { timer }) {
                log::debug!("ignoring stale reboot delay {timer:?}");
                return Command::done();
            }
            model.device_operation_state = DeviceOperationState::Idle;
            request_reboot(model)
        }

        DeviceEvent::RebootResponse(result) => handle_reboot_response(result, model),

        DeviceEvent::ClockTick { timer } => handle_clock_tick(timer, model),
        DeviceEvent::ProbeTick { timer } => handle_probe_tick(timer, model),
        DeviceEvent::ProbeResponse {
            session,
            sent_at,
            healthy,
        } => handle_probe_response(session, sent_at, healthy, model),
        DeviceEvent::SuccessDisplayElapsed { timer } => {
            handle_success_display_elapsed(timer, model)
        }
        DeviceEvent::DismissReconnection => handle_dismiss(model),

        DeviceEvent::TimerCleared { timer } => {
            log::debug!("timer {timer:?} cleared");
            Command::done()
        }
    }
}

/// Queue a reboot once the save has had time to settle on the device
pub fn schedule_reboot(model: &mut Model) -> Command<Effect, Event> {
    let stop = stop_operation(model);
    let delay = model.timings.reboot_delay_ms;
    let (id, start) = timer::arm(model, u64::from(delay), |timer| {
        Event::Device(DeviceEvent::RebootDelayElapsed { timer })
    });
    log::info!("reboot scheduled in {delay}ms");
    model.device_operation_state = DeviceOperationState::RebootScheduled { timer: id };
    Command::all([stop, start])
}

fn request_reboot(model: &mut Model) -> Command<Effect, Event> {
    let stop = stop_operation(model);
    model.device_operation_state = DeviceOperationState::Rebooting;
    model.notify("Rebooting device...", Severity::Info);
    Command::all([
        stop,
        http_post!(
            Device,
            DeviceEvent,
            model,
            REBOOT_ENDPOINT,
            RebootResponse,
            "Reboot",
            expect_json: RebootResponse
        ),
    ])
}

fn handle_reboot_response(
    result: Result<RebootResponse, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if model.device_operation_state != DeviceOperationState::Rebooting {
        log::debug!("ignoring reboot response, flow already moved on");
        return Command::done();
    }
    model.stop_loading();

    let failure = match result {
        Ok(response) if response.success => {
            if let Some(message) = &response.message {
                log::info!("reboot accepted: {message}");
            }
            return start_session(model);
        }
        Ok(response) => response
            .error
            .unwrap_or_else(|| "Unknown error".to_string()),
        Err(e) => e,
    };

    log::error!("reboot failed: {failure}");
    model.device_operation_state = DeviceOperationState::Idle;
    model.notify(format!("Error rebooting device: {failure}"), Severity::Danger);
    render()
}

/// Abandon whatever the reboot flow is doing and clear every timer it owns
pub fn stop_operation(model: &mut Model) -> Command<Effect, Event> {
    let state = std::mem::take(&mut model.device_operation_state);
    if state == DeviceOperationState::Idle {
        return Command::done();
    }
    log::debug!("stopping {state:?}");
    if state.session().is_some() {
        model.overlay_spinner.clear();
    }
    timer::cancel_all(state.live_timers())
}
