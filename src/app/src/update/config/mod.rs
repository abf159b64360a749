mod gate;
mod submit;

use gate::{cancel, confirm, propose};
use submit::handle_save_response;

use crux_core::{render::render, Command};

use crate::events::{ConfigEvent, Event};
use crate::model::Model;
use crate::normalize::normalize;
use crate::{handle_response, http_get, update_field, Effect};

pub const CONFIG_ENDPOINT: &str = "/api/config";

/// Handle configuration view and change submission events
pub fn handle(event: ConfigEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        ConfigEvent::OpenView => {
            model.config_view_open = true;
            Command::all([render(), load_config()])
        }

        ConfigEvent::CloseView => update_field!(
            model.config_view_open, false;
            model.pending_change, None
        ),

        ConfigEvent::Load => load_config(),

        ConfigEvent::LoadResponse(result) => handle_response!(model, result, {
            on_success: |model, document| {
                model.device_config = Some(document);
                model.config_revision += 1;
            },
            error_prefix: "Error loading configuration",
        }),

        ConfigEvent::SubmitForm { form } => match normalize(&form) {
            Ok(request) => propose(request, model),
            Err(e) => {
                log::warn!("rejected {} form: {e}", form.section);
                model.set_error_and_render(format!("Invalid configuration: {e}"))
            }
        },

        ConfigEvent::Confirm => confirm(model),
        ConfigEvent::Cancel => cancel(model),
        ConfigEvent::SaveResponse(result) => handle_save_response(result, model),
    }
}

/// Fetch every configuration section for the view
pub fn load_config() -> Command<Effect, Event> {
    http_get!(
        Config,
        ConfigEvent,
        CONFIG_ENDPOINT,
        LoadResponse,
        "Load configuration"
    )
}
