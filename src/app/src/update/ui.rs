use crux_core::Command;

use crate::events::{Event, UiEvent};
use crate::model::Model;
use crate::update_field;
use crate::Effect;

/// Handle UI-related events (toast dismissal)
pub fn handle(event: UiEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        UiEvent::DismissToast { id } => {
            let remaining: Vec<_> = model
                .toasts
                .iter()
                .filter(|toast| toast.id != id)
                .cloned()
                .collect();
            update_field!(model.toasts, remaining)
        }
        UiEvent::ClearToasts => update_field!(model.toasts, Vec::new()),
    }
}
