//! Conductor Client
//!
//! Thin wrapper around the Conductor for TUI integration.
//! This client embeds the Conductor directly and provides a convenient
//! interface for sending events and receiving messages.
//!
//! # Architecture
//!
//! The TUI is a "thin client" - it doesn't contain any business logic.
//! All orchestration happens in the Conductor. The TUI's job is:
//! 1. Convert terminal events to SurfaceEvents
//! 2. Send SurfaceEvents to Conductor
//! 3. Receive GalleryMessages
//! 4. Render display state based on messages
//!
//! Each event runs on its own tokio task so the render loop never waits on
//! the network.

use tokio::sync::mpsc;

use whiskers_core::{CatApiClient, Conductor, FlowConfig, GalleryMessage, SurfaceEvent};

/// Message buffer between Conductor and TUI
const CHANNEL_CAPACITY: usize = 256;

/// Client for communicating with the embedded Conductor
pub struct ConductorClient {
    /// The embedded Conductor instance
    conductor: Conductor<CatApiClient>,
    /// Receiver for messages from Conductor
    rx: mpsc::Receiver<GalleryMessage>,
}

impl ConductorClient {
    /// Create a new ConductorClient with embedded Conductor
    pub fn new(api: CatApiClient, config: FlowConfig) -> Self {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let conductor = Conductor::new(api, config, tx);
        Self { conductor, rx }
    }

    /// Begin the initial breed load in the background
    pub fn start(&self) {
        let conductor = self.conductor.clone();
        tokio::spawn(async move { conductor.start().await });
    }

    /// Send a surface event to the Conductor in the background
    pub fn send_event(&self, event: SurfaceEvent) {
        let conductor = self.conductor.clone();
        tokio::spawn(async move { conductor.handle_event(event).await });
    }

    /// Receive all pending messages from the Conductor (non-blocking)
    pub fn recv_all(&mut self) -> Vec<GalleryMessage> {
        let mut messages = Vec::new();
        while let Ok(msg) = self.rx.try_recv() {
            messages.push(msg);
        }
        messages
    }
}
