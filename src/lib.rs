//=========================================================================
// Endless Runner: Library Root
//
// A side-scrolling endless runner on a two-thread engine: the platform
// thread owns the window and input, the logic thread runs the game at a
// fixed rate.
//
// Typical usage:
// ```no_run
// use endless_runner::config::RunnerConfig;
// use endless_runner::game::Runner;
// use endless_runner::services::{ChannelReporter, HeadlessTrack, LogDisplay, MemoryStore};
// use endless_runner::EngineBuilder;
//
// let config = RunnerConfig::default();
// let runner = Runner::new(
//     &config,
//     LogDisplay::new(),
//     MemoryStore::new(),
//     ChannelReporter::logging(),
//     HeadlessTrack::default(),
// );
// EngineBuilder::new().build(runner).run().unwrap();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the engine systems (input, message bus, orchestrator).
// `game` holds the runner rules and the capability traits it needs.
// `services` holds concrete implementations of those traits.
//
pub mod config;
pub mod core;
pub mod game;
pub mod prelude;
pub mod services;

//--- Internal Modules ----------------------------------------------------
//
// `platform` is the winit integration; `engine` wires it to the logic
// thread. Neither is part of the public surface beyond the re-exports.
//
mod engine;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use crate::config::{ConfigError, RunnerConfig};
pub use crate::core::platform_bridge::PlatformError;
pub use crate::engine::{Engine, EngineBuilder};
