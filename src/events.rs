//! Game event queue for decoupled communication.
//!
//! The simulation emits events; the app shell drains them each frame into
//! the logger and whatever chrome cares. Keeps the simulation free of any
//! logging or UI knowledge.

use glam::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    PlayerDied,
    TimeUp,
}

#[derive(Debug, Clone)]
pub enum GameEvent {
    EnemySpawned {
        pos: Vec2,
    },
    /// An enemy died and its point value was credited.
    EnemySlain {
        pos: Vec2,
        points: u32,
    },
    WeaponSpawned {
        name: &'static str,
        pos: Vec2,
    },
    WeaponPickedUp {
        name: &'static str,
        /// True if a previously held weapon was dropped in exchange.
        swapped: bool,
    },
    PlayerDamaged {
        amount: i32,
        health_after: i32,
    },
    SessionEnded {
        reason: EndReason,
    },
}

/// Simple event queue - events are pushed during update, drained at end of frame
#[derive(Default)]
pub struct EventQueue {
    events: Vec<GameEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Push an event to be processed later
    pub fn push(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain all events for processing
    pub fn drain(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    /// Check if there are pending events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
