/// Macro for model field updates with automatic rendering.
/// Supports both single and multiple field updates.
///
/// # Examples
///
/// Single field update:
/// ```ignore
/// update_field!(model.toasts, vec![])
/// ```
///
/// Multiple field updates:
/// ```ignore
/// update_field!(
///     model.config_view_open, false;
///     model.pending_change, None
/// )
/// ```
#[macro_export]
macro_rules! update_field {
    // Multiple field updates (must come first to match the pattern)
    ($($model_field:expr, $value:expr);+ $(;)?) => {{
        let mut changed = false;
        $(
            let value = $value;
            if $model_field != value {
                $model_field = value;
                changed = true;
            }
        )+
        if changed {
            crux_core::render::render()
        } else {
            crux_core::Command::done()
        }
    }};

    // Single field update
    ($model_field:expr, $value:expr) => {{
        update_field!($model_field, $value;)
    }};
}

// Re-export http_helpers functions for macro use
pub use crate::http_helpers::{
    build_url, extract_error_message, extract_string_response, handle_request_error,
    is_response_success, parse_json_response, process_document_response, process_json_response,
    BASE_URL,
};

/// Macro for POST requests to the device service expecting a JSON reply.
/// Sets the loading state and wraps the reply into a domain event.
///
/// NOTE: URLs are prefixed with `https://relative`.
/// `crux_http` requires absolute URLs and rejects relative paths.
/// The shell strips this prefix before sending requests.
///
/// # Patterns
///
/// Pattern 1: POST without body
/// ```ignore
/// http_post!(Device, DeviceEvent, model, "/api/config/reboot", RebootResponse, "Reboot",
///     expect_json: RebootResponse
/// )
/// ```
///
/// Pattern 2: POST with JSON body
/// ```ignore
/// http_post!(Config, ConfigEvent, model, &request.endpoint(), SaveResponse, "Save configuration",
///     body_json: &request.to_json_body(),
///     expect_json: SaveResponse
/// )
/// ```
#[macro_export]
macro_rules! http_post {
    // Pattern 1: POST without body expecting JSON response
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, expect_json: $response_type:ty) => {{
        $model.start_loading();
        crux_core::Command::all([
            crux_core::render::render(),
            $crate::HttpCmd::post($crate::build_url($endpoint))
                .header("Content-Type", "application/json")
                .build()
                .then_send(|result| {
                    let event_result: Result<$response_type, String> =
                        $crate::process_json_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
        ])
    }};

    // Pattern 2: POST with JSON body expecting JSON response
    ($domain:ident, $domain_event:ident, $model:expr, $endpoint:expr, $response_event:ident, $action:expr, body_json: $body:expr, expect_json: $response_type:ty) => {{
        $model.start_loading();
        match $crate::HttpCmd::post($crate::build_url($endpoint))
            .header("Content-Type", "application/json")
            .body_json($body)
        {
            Ok(builder) => crux_core::Command::all([
                crux_core::render::render(),
                builder.build().then_send(|result| {
                    let event_result: Result<$response_type, String> =
                        $crate::process_json_response($action, result);
                    $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                        event_result,
                    ))
                }),
            ]),
            Err(e) => $crate::handle_request_error($model, $action, e),
        }
    }};
}

/// Macro for HTTP GET requests returning a JSON document kept as text.
/// Does not set loading state.
///
/// # Example
/// ```ignore
/// http_get!(Config, ConfigEvent, "/api/config", LoadResponse, "Load configuration")
/// ```
#[macro_export]
macro_rules! http_get {
    ($domain:ident, $domain_event:ident, $endpoint:expr, $response_event:ident, $action:expr) => {
        $crate::HttpCmd::get($crate::build_url($endpoint))
            .build()
            .then_send(|result| {
                let event_result = $crate::process_document_response($action, result);
                $crate::events::Event::$domain($crate::events::$domain_event::$response_event(
                    event_result,
                ))
            })
    };
}

/// Macro for handling replies of requests that do not set the loading state.
/// Failures become a danger toast prefixed with `error_prefix`.
///
/// # Example
/// ```ignore
/// handle_response!(model, result, {
///     on_success: |m, document| {
///         m.device_config = Some(document);
///     },
///     error_prefix: "Error loading configuration",
/// })
/// ```
#[macro_export]
macro_rules! handle_response {
    ($model:expr, $result:expr, {
        on_success: |$success_model:ident, $value:tt| $success_body:block,
        error_prefix: $prefix:expr $(,)?
    }) => {{
        match $result {
            Ok($value) => {
                #[allow(clippy::redundant_locals)]
                let $success_model = $model;
                $success_body
            }
            Err(e) => {
                log::warn!("{}: {e}", $prefix);
                $model.notify(format!("{}: {e}", $prefix), $crate::types::Severity::Danger);
            }
        }
        crux_core::render::render()
    }};
}
