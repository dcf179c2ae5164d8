//=========================================================================
// Engine
//
// Entry point that wires the platform thread to the logic thread.
//
// Architecture:
// ```text
//     EngineBuilder  ──build(sim)──>  Engine  ──run()──>  [Runtime]
//         │                             │
//         ├─ with_tps()                 ├─ init(|systems| ..)
//         └─ with_channel_capacity()    └─ spawns logic thread,
//                                          runs platform, joins
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender};
use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use crate::core::{CoreSystemsOrchestrator, GlobalSystems, Simulation};
use crate::platform::Platform;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// - **TPS**: 60.0 (logic updates per second)
/// - **Channel capacity**: 128 platform events
///
/// # Examples
///
/// ```no_run
/// use endless_runner::prelude::*;
///
/// struct Idle;
///
/// impl Simulation for Idle {
///     fn update(&mut self, _ctx: &mut GlobalContext) {}
/// }
///
/// EngineBuilder::new()
///     .with_tps(120.0)
///     .with_channel_capacity(256)
///     .build(Idle)
///     .init(|systems| {
///         systems.input.bind_key(KeyCode::KeyS, RunnerAction::Start, InputContext::Menu);
///     })
///     .run()
///     .expect("platform failed");
/// ```
pub struct EngineBuilder {
    tps: f64,
    channel_capacity: usize,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            tps: 60.0,
            channel_capacity: 128,
        }
    }

    /// Sets the target ticks per second for the logic thread.
    ///
    /// # Panics
    ///
    /// Panics if `tps` is not a positive finite number.
    pub fn with_tps(mut self, tps: f64) -> Self {
        assert!(tps > 0.0 && tps.is_finite(), "TPS must be positive, got {}", tps);
        self.tps = tps;
        self
    }

    /// Sets the capacity of the platform → core channel.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Builds an engine that will drive `simulation`.
    pub fn build<G: Simulation>(self, simulation: G) -> Engine<G> {
        info!("Building engine (TPS: {}, channel: {})", self.tps, self.channel_capacity);

        Engine {
            orchestrator: CoreSystemsOrchestrator::new(simulation),
            tps: self.tps,
            channel_capacity: self.channel_capacity,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// Runtime that drives a [`Simulation`] at a fixed tick rate.
///
/// ```text
/// Engine (Main Thread)
///   ├─► CoreSystemsOrchestrator (Logic Thread @ TPS)
///   │     └─► InputSystem → Simulation
///   │
///   └─► Platform (Event Loop)
///         └─► Window, Input Polling
/// ```
pub struct Engine<G: Simulation> {
    orchestrator: CoreSystemsOrchestrator<G>,
    tps: f64,
    channel_capacity: usize,
}

impl<G: Simulation> Engine<G> {
    //--- Initialization ---------------------------------------------------

    /// Configures engine systems (input bindings) before running.
    pub fn init<F>(mut self, init_fn: F) -> Self
    where
        F: FnOnce(&mut GlobalSystems),
    {
        info!("Initializing engine systems");
        self.orchestrator.init_systems(init_fn);
        self
    }

    //--- Execution --------------------------------------------------------

    /// Runs until the window closes or the simulation requests exit.
    ///
    /// # Lifecycle
    ///
    /// 1. Creates the platform → core channel and the liveness channel
    /// 2. Spawns the logic thread at the configured TPS
    /// 3. Runs the platform event loop on this thread (blocks)
    /// 4. Joins the logic thread
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError`] if the event loop could not be created or
    /// failed. The logic thread is still joined first.
    pub fn run(self) -> Result<(), PlatformError> {
        info!("Starting engine runtime (TPS: {})", self.tps);

        let (tx, rx): (Sender<PlatformEvent>, Receiver<PlatformEvent>) =
            bounded(self.channel_capacity);
        let (liveness_tx, liveness_rx) = bounded::<()>(0);

        let core_handle = self.orchestrator.spawn_core_thread(rx, liveness_tx, self.tps);
        info!("Core logic thread spawned");

        let platform = Platform::new(tx, liveness_rx);
        let result = platform.run();

        // The platform (and its sender) is gone; the core thread sees the
        // disconnect on its next tick.
        info!("Platform event loop exited");

        match core_handle.join() {
            Ok(_) => info!("Core thread terminated cleanly"),
            Err(e) => error!("Core thread panicked: {:?}", e),
        }

        if let Err(e) = &result {
            error!("Platform error: {}", e);
        }
        info!("Engine shutdown complete");
        result
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
