//! Foreign type definitions for the meshdash core.
//!
//! The build script writes them to `generated/`; this crate has no Rust API.
