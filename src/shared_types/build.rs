use anyhow::Result;
use crux_core::typegen::TypeGen;
use meshdash_core::{
    events::{ConfigEvent, DeviceEvent, UiEvent},
    types::{
        ConfigSection, DeviceOperationState, FieldValue, InputKind, ReconnectionPhase, Severity,
    },
    App, TimerOperation, TimerOutput,
};
use std::path::PathBuf;

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=../app");

    let mut gen = TypeGen::new();

    gen.register_app::<App>()?;

    // Explicitly register domain event enums to ensure all variants are traced
    gen.register_type::<ConfigEvent>()?;
    gen.register_type::<DeviceEvent>()?;
    gen.register_type::<UiEvent>()?;

    // Explicitly register other enums to ensure all variants are traced
    gen.register_type::<ConfigSection>()?;
    gen.register_type::<DeviceOperationState>()?;
    gen.register_type::<FieldValue>()?;
    gen.register_type::<InputKind>()?;
    gen.register_type::<ReconnectionPhase>()?;
    gen.register_type::<Severity>()?;

    // The timer capability is local to this app, so its protocol is registered by hand
    gen.register_type::<TimerOperation>()?;
    gen.register_type::<TimerOutput>()?;

    let output_root = PathBuf::from("./generated");

    gen.typescript("shared_types", output_root.join("typescript"))?;

    Ok(())
}
