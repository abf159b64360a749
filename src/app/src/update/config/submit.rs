use crux_core::{render::render, Command};

use crate::events::Event;
use crate::model::Model;
use crate::types::{ChangeRequest, SaveResponse, Severity};
use crate::update::device::schedule_reboot;
use crate::{http_post, Effect};

/// Send a confirmed change to the device service
pub fn submit(request: ChangeRequest, model: &mut Model) -> Command<Effect, Event> {
    // field names only, values may hold secrets
    let keys: Vec<&str> = request.fields.keys().map(String::as_str).collect();
    log::info!("saving {} fields {keys:?}", request.target_label());

    model.notify("Saving configuration...", Severity::Info);
    http_post!(
        Config,
        ConfigEvent,
        model,
        &request.endpoint(),
        SaveResponse,
        "Save configuration",
        body_json: &request.to_json_body(),
        expect_json: SaveResponse
    )
}

pub fn handle_save_response(
    result: Result<SaveResponse, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    model.stop_loading();

    match result {
        Ok(response) if response.success => {
            model.notify("Configuration saved successfully", Severity::Success);
            if let Some(note) = &response.note {
                log::info!("save note: {note}");
            }
            if response.reboot_required {
                Command::all([render(), schedule_reboot(model)])
            } else {
                render()
            }
        }
        Ok(response) => {
            let reason = response
                .error
                .unwrap_or_else(|| "Unknown error".to_string());
            log::warn!("device rejected configuration: {reason}");
            model.notify(
                format!("Error saving configuration: {reason}"),
                Severity::Danger,
            );
            render()
        }
        Err(e) => {
            log::error!("{e}");
            model.notify(e, Severity::Danger);
            render()
        }
    }
}
