mod config;
mod device;
mod timer;
mod ui;

use crux_core::{render::render, Command};
use serde_valid::Validate;

use crate::events::Event;
use crate::model::Model;
use crate::types::Severity;
use crate::Effect;

/// Main update dispatcher - routes events to domain-specific handlers
pub fn update(event: Event, model: &mut Model) -> Command<Effect, Event> {
    match event {
        Event::Initialize => render(),

        Event::ConfigureTimings(timings) => match timings.validate() {
            Ok(()) => {
                log::info!("reconnection timings set to {timings:?}");
                model.timings = timings;
                render()
            }
            Err(e) => {
                model.notify(format!("Invalid reconnection timings: {e}"), Severity::Danger);
                render()
            }
        },

        Event::Shutdown => {
            model.pending_change = None;
            Command::all([device::stop_operation(model), render()])
        }

        Event::Config(config_event) => config::handle(config_event, model),
        Event::Device(device_event) => device::handle(device_event, model),
        Event::Ui(ui_event) => ui::handle(ui_event, model),
    }
}
