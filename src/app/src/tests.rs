use super::*;
use crux_core::testing::AppTester;

fn effects_of(mut command: Command<Effect, Event>) -> Vec<Effect> {
    command.effects().collect()
}

fn timer_starts(effects: &[Effect]) -> Vec<(TimerId, u64)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Timer(request) => match request.operation {
                TimerOperation::Start { id, millis } => Some((id, millis)),
                TimerOperation::Cancel { .. } => None,
            },
            _ => None,
        })
        .collect()
}

fn timer_cancels(effects: &[Effect]) -> Vec<TimerId> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Timer(request) => match request.operation {
                TimerOperation::Cancel { id } => Some(id),
                TimerOperation::Start { .. } => None,
            },
            _ => None,
        })
        .collect()
}

fn http_requests(effects: &[Effect]) -> Vec<(String, String)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Http(request) => Some((
                request.operation.method.clone(),
                request.operation.url.clone(),
            )),
            _ => None,
        })
        .collect()
}

fn lora_form() -> ConfigForm {
    ConfigForm {
        section: "lora".to_string(),
        channel_index: None,
        inputs: vec![
            FormInput::new("region", InputKind::Select, Some("3")),
            FormInput::new("hop_limit", InputKind::Number, Some("3")),
            FormInput::new("tx_enabled", InputKind::Checkbox, Some("on")),
        ],
    }
}

fn fast_timings() -> ReconnectionTimings {
    ReconnectionTimings {
        settle_secs: 1,
        probing_secs: 2,
        probe_interval_secs: 1,
        probe_timeout_secs: 1,
        success_display_secs: 1,
        reboot_delay_ms: 100,
    }
}

#[test]
fn test_submit_waits_for_confirmation() {
    let app = AppTester::<App>::default();
    let mut model = Model::default();

    let _command = app.update(
        Event::Config(ConfigEvent::SubmitForm { form: lora_form() }),
        &mut model,
    );

    let pending = model.pending_change.as_ref().expect("pending change");
    assert_eq!(pending.request.endpoint(), "/api/config/lora");
    assert_eq!(pending.prompt.title, "Confirm Configuration Change");
    assert!(pending.prompt.warning.is_some());
    assert!(!model.is_loading);
}

#[test]
fn test_confirm_posts_normalized_change() {
    let mut model = Model::default();
    let _ = update::update(
        Event::Config(ConfigEvent::SubmitForm { form: lora_form() }),
        &mut model,
    );

    let effects = effects_of(update::update(
        Event::Config(ConfigEvent::Confirm),
        &mut model,
    ));

    assert!(model.pending_change.is_none());
    assert!(model.is_loading);
    assert_eq!(
        http_requests(&effects),
        vec![(
            "POST".to_string(),
            "https://relative/api/config/lora".to_string()
        )]
    );

    let body = effects
        .iter()
        .find_map(|effect| match effect {
            Effect::Http(request) => Some(request.operation.body.clone()),
            _ => None,
        })
        .expect("request body");
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(
        body,
        serde_json::json!({"region": 3, "hop_limit": 3, "tx_enabled": true})
    );
}

#[test]
fn test_cancel_sends_nothing() {
    let mut model = Model::default();
    let _ = update::update(
        Event::Config(ConfigEvent::SubmitForm { form: lora_form() }),
        &mut model,
    );

    let effects = effects_of(update::update(
        Event::Config(ConfigEvent::Cancel),
        &mut model,
    ));

    assert!(model.pending_change.is_none());
    assert!(http_requests(&effects).is_empty());
}

#[test]
fn test_reboot_flow_until_reconnected() {
    let mut model = Model::default();
    let _ = update::update(Event::ConfigureTimings(fast_timings()), &mut model);

    // save reports a pending reboot
    let effects = effects_of(update::update(
        Event::Config(ConfigEvent::SaveResponse(Ok(SaveResponse {
            success: true,
            reboot_required: true,
            ..Default::default()
        }))),
        &mut model,
    ));
    let [(delay, millis)] = timer_starts(&effects)[..] else {
        panic!("expected one reboot delay timer");
    };
    assert_eq!(millis, 100);

    // delay elapses, reboot goes out
    let effects = effects_of(update::update(
        Event::Device(DeviceEvent::RebootDelayElapsed { timer: delay }),
        &mut model,
    ));
    assert_eq!(
        http_requests(&effects),
        vec![(
            "POST".to_string(),
            "https://relative/api/config/reboot".to_string()
        )]
    );

    // reboot accepted, session settles
    let effects = effects_of(update::update(
        Event::Device(DeviceEvent::RebootResponse(Ok(RebootResponse {
            success: true,
            ..Default::default()
        }))),
        &mut model,
    ));
    let [(clock, 1000)] = timer_starts(&effects)[..] else {
        panic!("expected the session clock");
    };
    assert!(model.overlay_spinner.is_visible());

    // first tick ends settling; polling starts one interval later
    let effects = effects_of(update::update(
        Event::Device(DeviceEvent::ClockTick { timer: clock }),
        &mut model,
    ));
    assert!(http_requests(&effects).is_empty());
    let ReconnectionPhase::Probing { cadence, .. } = model
        .device_operation_state
        .session()
        .expect("session")
        .phase
    else {
        panic!("session is not probing");
    };

    let effects = effects_of(update::update(
        Event::Device(DeviceEvent::ProbeTick { timer: cadence }),
        &mut model,
    ));
    assert_eq!(
        http_requests(&effects),
        vec![(
            "GET".to_string(),
            "https://relative/api/config/device".to_string()
        )]
    );
    let session = *model.device_operation_state.session().expect("session");

    // healthy probe ends the session and stops both timers
    let effects = effects_of(update::update(
        Event::Device(DeviceEvent::ProbeResponse {
            session: session.id,
            sent_at: 1,
            healthy: true,
        }),
        &mut model,
    ));
    let mut cancelled = timer_cancels(&effects);
    cancelled.sort();
    let mut expected = session.phase.live_timers();
    expected.sort();
    assert_eq!(cancelled, expected);

    let ReconnectionPhase::Succeeded { dismiss } = model
        .device_operation_state
        .session()
        .expect("session")
        .phase
    else {
        panic!("session did not succeed");
    };

    // indicator shown, configuration reloaded
    let effects = effects_of(update::update(
        Event::Device(DeviceEvent::SuccessDisplayElapsed { timer: dismiss }),
        &mut model,
    ));
    assert_eq!(
        http_requests(&effects),
        vec![("GET".to_string(), "https://relative/api/config".to_string())]
    );
    assert_eq!(model.device_operation_state, DeviceOperationState::Idle);
    assert!(!model.overlay_spinner.is_visible());
}

#[test]
fn test_new_change_supersedes_running_session() {
    let mut model = Model::default();
    let _ = update::update(Event::ConfigureTimings(fast_timings()), &mut model);
    model.device_operation_state = DeviceOperationState::Rebooting;
    let _ = update::update(
        Event::Device(DeviceEvent::RebootResponse(Ok(RebootResponse {
            success: true,
            ..Default::default()
        }))),
        &mut model,
    );
    let old = *model.device_operation_state.session().expect("session");
    let old_clock = old.phase.clock().expect("clock");

    let _ = update::update(
        Event::Config(ConfigEvent::SubmitForm { form: lora_form() }),
        &mut model,
    );
    let effects = effects_of(update::update(
        Event::Config(ConfigEvent::Confirm),
        &mut model,
    ));

    assert_eq!(timer_cancels(&effects), vec![old_clock]);
    assert_eq!(model.device_operation_state, DeviceOperationState::Idle);

    // the old session's tick arrives late and changes nothing
    let _ = update::update(
        Event::Device(DeviceEvent::ClockTick { timer: old_clock }),
        &mut model,
    );
    assert_eq!(model.device_operation_state, DeviceOperationState::Idle);
}

#[test]
fn test_shutdown_clears_timers() {
    let mut model = Model::default();
    let _ = update::update(
        Event::Config(ConfigEvent::SaveResponse(Ok(SaveResponse {
            success: true,
            reboot_required: true,
            ..Default::default()
        }))),
        &mut model,
    );
    let DeviceOperationState::RebootScheduled { timer } = model.device_operation_state else {
        panic!("reboot not scheduled");
    };

    let effects = effects_of(update::update(Event::Shutdown, &mut model));

    assert_eq!(timer_cancels(&effects), vec![timer]);
    assert_eq!(model.device_operation_state, DeviceOperationState::Idle);
}

#[test]
fn test_invalid_timings_are_rejected() {
    let app = AppTester::<App>::default();
    let mut model = Model::default();

    let _command = app.update(
        Event::ConfigureTimings(ReconnectionTimings {
            probe_interval_secs: 0,
            ..Default::default()
        }),
        &mut model,
    );

    assert_eq!(model.timings, ReconnectionTimings::default());
    assert_eq!(model.toasts.len(), 1);
    assert_eq!(model.toasts[0].severity, Severity::Danger);
}

#[test]
fn test_open_view_loads_configuration() {
    let mut model = Model::default();

    let effects = effects_of(update::update(
        Event::Config(ConfigEvent::OpenView),
        &mut model,
    ));

    assert!(model.config_view_open);
    assert_eq!(
        http_requests(&effects),
        vec![("GET".to_string(), "https://relative/api/config".to_string())]
    );
}

/// Drives the app the way the shell would: timers fire in due order, reboot calls
/// succeed, and the device answers polls once `device_up_at_ms` has passed.
struct ShellSim {
    model: Model,
    now_ms: u64,
    device_up_at_ms: Option<u64>,
    timers: std::collections::BTreeMap<TimerId, u64>,
    requests: Vec<(String, String)>,
}

impl ShellSim {
    fn new(device_up_at_ms: Option<u64>) -> Self {
        Self {
            model: Model::default(),
            now_ms: 0,
            device_up_at_ms,
            timers: Default::default(),
            requests: Vec::new(),
        }
    }

    fn send(&mut self, event: Event) {
        let mut queue = std::collections::VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            let effects = effects_of(update::update(event, &mut self.model));
            for (id, millis) in timer_starts(&effects) {
                self.timers.insert(id, self.now_ms + millis);
            }
            for id in timer_cancels(&effects) {
                self.timers.remove(&id);
            }
            for (method, url) in http_requests(&effects) {
                match url.as_str() {
                    "https://relative/api/config/reboot" => {
                        queue.push_back(Event::Device(DeviceEvent::RebootResponse(Ok(
                            RebootResponse {
                                success: true,
                                ..Default::default()
                            },
                        ))))
                    }
                    "https://relative/api/config/device" => {
                        let session = self.model.device_operation_state.session().expect("session");
                        let healthy = self.device_up_at_ms.is_some_and(|up| self.now_ms >= up);
                        queue.push_back(Event::Device(DeviceEvent::ProbeResponse {
                            session: session.id,
                            sent_at: session.elapsed_secs,
                            healthy,
                        }));
                    }
                    _ => {}
                }
                self.requests.push((method, url));
            }
            self.assert_timers_owned();
        }
    }

    /// Every running timer belongs to the current state: one clock, one cadence at most
    fn assert_timers_owned(&self) {
        let mut owned = self.model.device_operation_state.live_timers();
        owned.sort();
        let running: Vec<TimerId> = self.timers.keys().copied().collect();
        assert_eq!(running, owned, "at {}ms", self.now_ms);
        assert!(running.len() <= 2);
    }

    /// Fire the next due timer; false once none is left
    fn advance(&mut self) -> bool {
        let Some((&id, &due)) = self.timers.iter().min_by_key(|(_, due)| **due) else {
            return false;
        };
        self.timers.remove(&id);
        self.now_ms = due;

        let event = match self.model.device_operation_state {
            DeviceOperationState::RebootScheduled { timer } if timer == id => {
                DeviceEvent::RebootDelayElapsed { timer }
            }
            DeviceOperationState::Reconnecting(session) => match session.phase {
                phase if phase.clock() == Some(id) => DeviceEvent::ClockTick { timer: id },
                phase if phase.cadence() == Some(id) => DeviceEvent::ProbeTick { timer: id },
                ReconnectionPhase::Succeeded { dismiss } if dismiss == id => {
                    DeviceEvent::SuccessDisplayElapsed { timer: id }
                }
                _ => panic!("timer {id:?} has no owner"),
            },
            _ => panic!("timer {id:?} has no owner"),
        };
        self.send(Event::Device(event));
        true
    }

    fn run(&mut self) {
        let mut fired = 0;
        while self.advance() {
            fired += 1;
            assert!(fired < 1000, "timers never settle");
        }
    }

    fn count(&self, method: &str, url: &str) -> usize {
        self.requests
            .iter()
            .filter(|(m, u)| m == method && u == url)
            .count()
    }
}

fn saved_with_reboot() -> Event {
    Event::Config(ConfigEvent::SaveResponse(Ok(SaveResponse {
        success: true,
        reboot_required: true,
        ..Default::default()
    })))
}

#[test]
fn test_only_latest_submission_is_posted() {
    let mut model = Model::default();
    let mut second = lora_form();
    second.inputs[1] = FormInput::new("hop_limit", InputKind::Number, Some("5"));

    let _ = update::update(
        Event::Config(ConfigEvent::SubmitForm { form: lora_form() }),
        &mut model,
    );
    let _ = update::update(
        Event::Config(ConfigEvent::SubmitForm { form: second }),
        &mut model,
    );
    let effects = effects_of(update::update(
        Event::Config(ConfigEvent::Confirm),
        &mut model,
    ));

    let bodies: Vec<serde_json::Value> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Http(request) => serde_json::from_slice(&request.operation.body).ok(),
            _ => None,
        })
        .collect();
    assert_eq!(
        bodies,
        vec![serde_json::json!({"region": 3, "hop_limit": 5, "tx_enabled": true})]
    );

    // a second confirm has nothing left to send
    let effects = effects_of(update::update(
        Event::Config(ConfigEvent::Confirm),
        &mut model,
    ));
    assert!(http_requests(&effects).is_empty());
}

#[test]
fn test_device_back_after_thirty_seconds() {
    let mut sim = ShellSim::new(Some(31_500));

    sim.send(saved_with_reboot());
    sim.run();

    // 1.5s reboot delay, 15s settling, then a poll every 2s from 17s on
    assert_eq!(sim.count("GET", "https://relative/api/config/device"), 8);
    assert_eq!(sim.count("POST", "https://relative/api/config/reboot"), 1);
    assert_eq!(sim.count("GET", "https://relative/api/config"), 1);
    assert_eq!(sim.model.device_operation_state, DeviceOperationState::Idle);
    assert!(!sim.model.overlay_spinner.is_visible());
    assert!(sim.model.config_view_open);
    assert!(sim
        .model
        .toasts
        .iter()
        .any(|toast| toast.message == "Device reconnected successfully!"));
}

#[test]
fn test_device_never_back_gives_up_without_reload() {
    let mut sim = ShellSim::new(None);

    sim.send(saved_with_reboot());
    sim.run();

    let session = *sim.model.device_operation_state.session().expect("session");
    assert_eq!(session.phase, ReconnectionPhase::Failed);
    assert_eq!(session.elapsed_secs, 75);
    assert!(sim.model.overlay_spinner.timed_out());
    assert_eq!(sim.count("GET", "https://relative/api/config"), 0);

    sim.send(Event::Device(DeviceEvent::DismissReconnection));

    assert_eq!(sim.model.device_operation_state, DeviceOperationState::Idle);
    assert!(!sim.model.overlay_spinner.is_visible());
    assert!(!sim.advance());
    assert_eq!(sim.count("GET", "https://relative/api/config"), 0);
}
