//! The frame driver.
//!
//! The core never assumes an event loop: external drivers — an OS timer,
//! a GUI message loop, a test harness — advance the simulation by calling
//! [`FrameLoop::advance`]. [`FrameLoop::run`] is the blocking
//! fixed-timestep variant for headless use.
//!
//! Each frame drains the manager's queued entity events and fans them out
//! to registered handlers, so handlers always observe post-transition
//! state.

// Parts of the public surface are not called from main() — they exist for
// GUI embedders driving advance() from their own timer, and are exercised
// by tests.
#![allow(dead_code)]

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use stage_entity::{EntityEvent, EntityManager};

use crate::config::FrameConfig;

/// Receives entity events drained at the start of a frame.
pub trait EventHandler {
    /// Handle one event. The manager reflects all transitions up to and
    /// including this event.
    fn handle(&mut self, event: &EntityEvent, manager: &mut EntityManager);
}

/// The frame loop: owns the entity manager and pumps simulation steps.
pub struct FrameLoop {
    frame_id: u64,
    config: FrameConfig,
    manager: EntityManager,
    handlers: Vec<Box<dyn EventHandler>>,
}

impl FrameLoop {
    /// Create a frame loop with a fresh manager.
    #[must_use]
    pub fn new(config: FrameConfig) -> Self {
        Self::with_manager(config, EntityManager::new())
    }

    /// Create a frame loop driving an already-populated manager.
    #[must_use]
    pub fn with_manager(config: FrameConfig, manager: EntityManager) -> Self {
        Self {
            frame_id: 0,
            config,
            manager,
            handlers: Vec::new(),
        }
    }

    /// Returns the current frame counter.
    #[must_use]
    pub fn frame_id(&self) -> u64 {
        self.frame_id
    }

    /// Returns a reference to the entity manager.
    #[must_use]
    pub fn manager(&self) -> &EntityManager {
        &self.manager
    }

    /// Returns a mutable reference to the entity manager.
    pub fn manager_mut(&mut self) -> &mut EntityManager {
        &mut self.manager
    }

    /// Register an event handler. Handlers run in registration order.
    pub fn add_handler(&mut self, handler: Box<dyn EventHandler>) {
        self.handlers.push(handler);
    }

    /// Advance the simulation by one frame.
    ///
    /// Synchronous and non-blocking: increments the frame counter, then
    /// delivers all events queued since the previous frame.
    pub fn advance(&mut self, dt: f64) {
        self.frame_id += 1;

        let events = self.manager.drain_events();
        debug!(
            frame_id = self.frame_id,
            dt,
            events = events.len(),
            "frame start"
        );

        for event in &events {
            for handler in &mut self.handlers {
                handler.handle(event, &mut self.manager);
            }
        }
    }

    /// Run the frame loop for the configured number of frames, or
    /// indefinitely.
    ///
    /// Blocking; intended for headless drivers. GUI embedders call
    /// [`FrameLoop::advance`] from their own timer instead.
    pub fn run(&mut self) {
        let frame_duration = Duration::from_secs_f64(1.0 / self.config.frame_rate);
        let mut frame_count = 0u64;

        info!(
            frame_rate = self.config.frame_rate,
            max_frames = self.config.max_frames,
            "starting frame loop"
        );

        loop {
            let start = Instant::now();

            self.advance(frame_duration.as_secs_f64());

            frame_count += 1;
            if self.config.max_frames > 0 && frame_count >= self.config.max_frames {
                info!(frames = frame_count, "frame loop complete");
                break;
            }

            let elapsed = start.elapsed();
            if elapsed < frame_duration {
                std::thread::sleep(frame_duration - elapsed);
            } else {
                warn!(
                    frame_id = self.frame_id,
                    elapsed_ms = elapsed.as_millis() as u64,
                    budget_ms = frame_duration.as_millis() as u64,
                    "frame exceeded time budget"
                );
            }
        }
    }
}
