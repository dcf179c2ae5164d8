//=========================================================================
// Platform Subsystem
//
// Bridges winit (OS-level events) with the logic thread over a bounded
// crossbeam channel.
//
// Architecture:
// ```text
//  Main Thread:                     Logic Thread:
//  ┌──────────────────────────┐    ┌──────────────────┐
//  │  Winit Event Loop        │    │  InputSystem     │
//  │   ↓                      │    │   ↓              │
//  │  InputProcessor          │    │  ActionMapper    │
//  │   ↓                      │    │   ↓              │
//  │  InputBuffer             │    │  Runner          │
//  │   ↓                      │    └──────────────────┘
//  │  RedrawRequested (flush) │             ↑
//  │   ↓                      │             │
//  │  Channel ────────────────┼─────────────┘
//  └──────────────────────────┘    PlatformEvent
// ```
//
// Frame boundary is `RedrawRequested`: everything buffered since the last
// redraw is sent as one batch. Empty batches are not sent.
//
// Shutdown:
// - Window closed → `WindowClosed` sent, event loop exits
// - Logic thread gone (game quit) → liveness channel disconnects, event
//   loop exits on the next redraw
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Crates =====================================================

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::platform_bridge::{PlatformError, PlatformEvent};
use input_buffer::InputBuffer;
use input_processor::InputProcessor;

const WINDOW_TITLE: &str = "Endless Runner";

//=== Platform ============================================================

/// Window owner and input aggregator.
///
/// Runs on the main thread (winit requirement on macOS/iOS). Not `Send`.
pub(crate) struct Platform {
    /// Created lazily in `resumed()`.
    window: Option<Window>,
    buffer: InputBuffer,
    event_sender: Sender<PlatformEvent>,
    core_liveness: Receiver<()>,
    input_processor: InputProcessor,
}

impl Platform {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new(event_sender: Sender<PlatformEvent>, core_liveness: Receiver<()>) -> Self {
        info!(target: "platform", "Platform subsystem initialized");
        Self {
            window: None,
            buffer: InputBuffer::new(),
            event_sender,
            core_liveness,
            input_processor: InputProcessor::new(),
        }
    }

    //--- Execution --------------------------------------------------------

    /// Runs the winit event loop until the window closes or the logic
    /// thread stops.
    ///
    /// # Errors
    ///
    /// [`PlatformError`] if the event loop cannot be created or fails.
    pub(crate) fn run(mut self) -> Result<(), PlatformError> {
        debug!(target: "platform", "Starting winit event loop");

        let event_loop = EventLoop::new().map_err(PlatformError::EventLoopCreation)?;

        event_loop
            .run_app(&mut self)
            .map_err(PlatformError::EventLoopExecution)
    }

    //--- Internal Helpers -------------------------------------------------

    /// Sends buffered input to the logic thread.
    ///
    /// Returns `false` when the logic thread has hung up.
    fn flush_input_buffer(&mut self) -> bool {
        let Some(events) = self.buffer.drain() else {
            return true;
        };

        trace!(target: "platform::input", "Flushing {} events", events.len());

        let count = events.len();
        if self.event_sender.send(PlatformEvent::Inputs(events)).is_err() {
            warn!(
                target: "platform::input",
                "Channel disconnected, dropping {} events",
                count
            );
            return false;
        }
        true
    }

    fn core_finished(&self) -> bool {
        matches!(self.core_liveness.try_recv(), Err(TryRecvError::Disconnected))
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> Option<&Window> {
        self.window.as_ref()
    }
}

//=== Winit Integration ===================================================

impl ApplicationHandler for Platform {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        let attrs = WindowAttributes::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(960, 540));

        match event_loop.create_window(attrs) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match &event {
            WindowEvent::CloseRequested => {
                info!(target: "platform", "Window close requested");
                let _ = self.event_sender.send(PlatformEvent::WindowClosed);
                event_loop.exit();
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                match self.input_processor.process_key_event(key_event) {
                    Some(event) => self.buffer.push(event),
                    None => trace!(target: "platform::input", "Unbound key ignored"),
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                let event = self.input_processor.process_mouse_button(*button, *state);
                self.buffer.push(event);
            }

            WindowEvent::RedrawRequested => {
                if !self.flush_input_buffer() || self.core_finished() {
                    info!(target: "platform", "Logic thread stopped, closing window");
                    event_loop.exit();
                    return;
                }

                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }

            _ => {}
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
