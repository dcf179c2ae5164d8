//=========================================================================
// Core Systems Orchestrator
//
// Runs the game on the logic (non-platform) thread.
//
// Responsibilities:
// - Own the engine systems, the shared context and the simulation
// - Receive platform input batches via a bounded crossbeam channel
// - Pace ticks at a fixed rate (TPS) and measure the real frame delta
// - Stop when the window closes, the platform disconnects, or the
//   simulation asks to exit
//
// Notes:
// Nothing on this thread is shared: the platform only sends input, so
// the simulation never needs locking.
//
//=========================================================================

//=== Submodules ==========================================================

pub mod globals;
pub mod input;
pub mod message_bus;
pub(crate) mod platform_bridge;

//=== Public API ==========================================================

pub use globals::{GlobalContext, GlobalSystems};

//=== External Dependencies ===============================================

use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use log::{debug, info};

//=== Internal Dependencies ===============================================

use platform_bridge::{EventCollector, PlatformEvent, TickControl};

//=== Constants ===========================================================

/// Longest frame delta handed to the simulation, in seconds.
///
/// A stalled thread (debugger, window drag) must not turn into one huge
/// score or physics step.
pub const MAX_FRAME_DELTA: f32 = 0.25;

//=== Simulation ==========================================================

/// Game logic driven once per tick by the orchestrator.
pub trait Simulation: Send + 'static {
    /// Called once on the logic thread before the first tick.
    fn start(&mut self, _ctx: &mut GlobalContext) {}

    /// Called every tick after input has been published on the bus.
    fn update(&mut self, ctx: &mut GlobalContext);
}

//=== CoreSystemsOrchestrator =============================================

pub(crate) struct CoreSystemsOrchestrator<G: Simulation> {
    systems: GlobalSystems,
    context: GlobalContext,
    simulation: G,
    started: bool,
}

impl<G: Simulation> CoreSystemsOrchestrator<G> {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(simulation: G) -> Self {
        Self {
            systems: GlobalSystems::new(),
            context: GlobalContext::new(),
            simulation,
            started: false,
        }
    }

    /// Gives the caller mutable access to the engine systems.
    pub(crate) fn init_systems<F>(&mut self, init_fn: F)
    where
        F: FnOnce(&mut GlobalSystems),
    {
        init_fn(&mut self.systems);
    }

    //--- Tick -------------------------------------------------------------

    /// Runs one tick with the given raw frame delta.
    ///
    /// `dt` is clamped to `[0, MAX_FRAME_DELTA]`; non-finite values become 0.
    pub(crate) fn step(&mut self, dt: f32) -> TickControl {
        if !self.started {
            self.simulation.start(&mut self.context);
            self.started = true;
        }

        self.context.delta_seconds = clamp_delta(dt);
        self.context.tick += 1;

        self.systems.update(&mut self.context);
        self.simulation.update(&mut self.context);

        if self.context.exit_requested() {
            TickControl::Exit
        } else {
            TickControl::Continue
        }
    }

    //--- Logic Thread -----------------------------------------------------

    /// Spawns the fixed-rate logic thread.
    ///
    /// Each tick:
    ///  1. Drains platform events (exit on close/disconnect)
    ///  2. Measures the real delta since the previous tick
    ///  3. Updates systems, then the simulation
    ///  4. Sleeps the remainder of the frame budget
    ///
    /// `liveness` is held for the lifetime of the thread; its receiver sees
    /// a disconnect once the thread is gone. The thread returns the
    /// simulation so the caller can inspect it.
    pub(crate) fn spawn_core_thread(
        mut self,
        receiver: Receiver<PlatformEvent>,
        liveness: Sender<()>,
        tps: f64,
    ) -> thread::JoinHandle<G> {
        let frame_duration = Duration::from_secs_f64(1.0 / tps);

        thread::spawn(move || {
            let _liveness = liveness;
            let mut collector = EventCollector::new(receiver);
            let mut last_tick = Instant::now();

            loop {
                let frame_start = Instant::now();

                if collector.collect_frame() == TickControl::Exit {
                    info!("Platform closed, core thread exiting");
                    break;
                }
                self.context
                    .frame_input_events
                    .append(&mut collector.take_batches());

                let dt = frame_start.duration_since(last_tick).as_secs_f32();
                last_tick = frame_start;

                if self.step(dt) == TickControl::Exit {
                    info!("Exit requested at tick {}, core thread exiting", self.context.tick);
                    break;
                }

                let elapsed = frame_start.elapsed();
                if elapsed < frame_duration {
                    thread::sleep(frame_duration - elapsed);
                } else {
                    debug!("Tick {} overran budget ({:?})", self.context.tick, elapsed);
                }
            }

            self.simulation
        })
    }

    #[cfg(test)]
    pub(crate) fn context(&self) -> &GlobalContext {
        &self.context
    }

    #[cfg(test)]
    pub(crate) fn simulation(&self) -> &G {
        &self.simulation
    }

    /// Queues a batch as if the platform had sent it before the next tick.
    #[cfg(test)]
    pub(crate) fn push_input(&mut self, batch: Vec<input::InputEvent>) {
        self.context.frame_input_events.push(batch);
    }
}

fn clamp_delta(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.clamp(0.0, MAX_FRAME_DELTA)
    } else {
        0.0
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::{InputEvent, KeyCode, RunnerAction};
    use crossbeam_channel::bounded;

    /// Records what it saw each tick; quits on the first `Quit` action.
    #[derive(Default)]
    struct Recorder {
        starts: u32,
        deltas: Vec<f32>,
        actions: Vec<RunnerAction>,
    }

    impl Simulation for Recorder {
        fn start(&mut self, _ctx: &mut GlobalContext) {
            self.starts += 1;
        }

        fn update(&mut self, ctx: &mut GlobalContext) {
            self.deltas.push(ctx.delta_seconds);
            let actions = ctx.message_bus.read::<RunnerAction>().to_vec();
            for action in actions {
                self.actions.push(action);
                if action == RunnerAction::Quit {
                    ctx.request_exit();
                }
            }
        }
    }

    //=====================================================================
    // Delta Clamping
    //=====================================================================

    #[test]
    fn delta_is_clamped() {
        assert_eq!(clamp_delta(0.016), 0.016);
        assert_eq!(clamp_delta(3.0), MAX_FRAME_DELTA);
        assert_eq!(clamp_delta(-1.0), 0.0);
        assert_eq!(clamp_delta(f32::NAN), 0.0);
        assert_eq!(clamp_delta(f32::INFINITY), 0.0);
    }

    //=====================================================================
    // Stepping
    //=====================================================================

    #[test]
    fn start_runs_once_before_first_update() {
        let mut orchestrator = CoreSystemsOrchestrator::new(Recorder::default());

        orchestrator.step(0.01);
        orchestrator.step(0.01);

        assert_eq!(orchestrator.simulation.starts, 1);
        assert_eq!(orchestrator.simulation.deltas.len(), 2);
        assert_eq!(orchestrator.context().tick, 2);
    }

    #[test]
    fn step_feeds_clamped_delta() {
        let mut orchestrator = CoreSystemsOrchestrator::new(Recorder::default());

        orchestrator.step(10.0);

        assert_eq!(orchestrator.simulation.deltas, vec![MAX_FRAME_DELTA]);
        assert_eq!(orchestrator.context().delta_seconds, MAX_FRAME_DELTA);
    }

    #[test]
    fn simulation_sees_published_actions() {
        let mut orchestrator = CoreSystemsOrchestrator::new(Recorder::default());
        orchestrator
            .context
            .frame_input_events
            .push(vec![InputEvent::KeyDown(KeyCode::Enter)]);

        assert_eq!(orchestrator.step(0.016), TickControl::Continue);
        assert_eq!(orchestrator.simulation.actions, vec![RunnerAction::Start]);
    }

    #[test]
    fn exit_request_stops_stepping() {
        let mut orchestrator = CoreSystemsOrchestrator::new(Recorder::default());
        orchestrator
            .context
            .frame_input_events
            .push(vec![InputEvent::KeyDown(KeyCode::Escape)]);

        assert_eq!(orchestrator.step(0.016), TickControl::Exit);
    }

    #[test]
    fn init_systems_can_rebind() {
        let mut orchestrator = CoreSystemsOrchestrator::new(Recorder::default());
        orchestrator.init_systems(|systems| {
            systems.input.bind_key(
                KeyCode::KeyS,
                RunnerAction::Quit,
                crate::core::input::InputContext::Menu,
            );
        });
        orchestrator
            .context
            .frame_input_events
            .push(vec![InputEvent::KeyDown(KeyCode::KeyS)]);

        assert_eq!(orchestrator.step(0.016), TickControl::Exit);
    }

    //=====================================================================
    // Logic Thread
    //=====================================================================

    #[test]
    fn thread_exits_on_window_closed() {
        let (tx, rx) = bounded(8);
        let orchestrator = CoreSystemsOrchestrator::new(Recorder::default());
        tx.send(PlatformEvent::WindowClosed).unwrap();

        let (alive_tx, _alive_rx) = bounded(0);

        let handle = orchestrator.spawn_core_thread(rx, alive_tx, 240.0);
        let recorder = handle.join().unwrap();

        assert!(recorder.deltas.is_empty());
    }

    #[test]
    fn thread_exits_when_simulation_quits() {
        let (tx, rx) = bounded(8);
        let orchestrator = CoreSystemsOrchestrator::new(Recorder::default());
        tx.send(PlatformEvent::Inputs(vec![InputEvent::KeyDown(KeyCode::Escape)]))
            .unwrap();

        let (alive_tx, _alive_rx) = bounded(0);

        let handle = orchestrator.spawn_core_thread(rx, alive_tx, 240.0);
        let recorder = handle.join().unwrap();

        assert_eq!(recorder.actions, vec![RunnerAction::Quit]);
        assert_eq!(recorder.starts, 1);
        drop(tx);
    }

    #[test]
    fn thread_exits_on_disconnect() {
        let (tx, rx) = bounded::<PlatformEvent>(8);
        let orchestrator = CoreSystemsOrchestrator::new(Recorder::default());
        drop(tx);
        let (alive_tx, alive_rx) = bounded::<()>(0);

        let handle = orchestrator.spawn_core_thread(rx, alive_tx, 240.0);

        assert!(handle.join().is_ok());
        assert_eq!(alive_rx.try_recv(), Err(crossbeam_channel::TryRecvError::Disconnected));
    }
}
