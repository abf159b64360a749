pub mod commands;
pub mod events;
pub mod http_helpers;
pub mod macros;
pub mod model;
pub mod normalize;
pub mod types;
pub mod update;

#[cfg(test)]
mod tests;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

use crux_core::Command;

// Re-export core types
pub use crate::{
    commands::timer::{TimerId, TimerOperation, TimerOutput},
    events::{ConfigEvent, DeviceEvent, Event, UiEvent},
    http_helpers::{
        build_url, extract_error_message, extract_string_response, handle_request_error,
        is_healthy_probe, is_response_success, parse_json_response, process_document_response,
        process_json_response, BASE_URL,
    },
    model::Model,
    normalize::{normalize, NormalizeError},
    types::*,
};
pub use crux_http::Result as HttpResult;

#[crux_macros::effect(typegen)]
pub enum Effect {
    Render(crux_core::render::RenderOperation),
    Http(crux_http::protocol::HttpRequest),
    Timer(TimerOperation),
}

pub type HttpCmd = crux_http::command::Http<Effect, Event>;
pub type TimerCmd = crate::commands::timer::Timer<Effect, Event>;

/// The Core application
#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = Model;
    type Effect = Effect;

    fn update(&self, event: Self::Event, model: &mut Self::Model) -> Command<Effect, Event> {
        update::update(event, model)
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        model.clone()
    }
}
