//! Game state and core simulation types

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::consts::*;

/// The player's circle
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub radius: f32,
    /// Movement speed in pixels/s
    pub speed: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(WINDOW_W / 2.0, WINDOW_H - PLAYER_START_OFFSET_Y),
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
        }
    }
}

/// A falling entity
#[derive(Debug, Clone)]
pub struct Faller {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

/// Events emitted by a tick, consumed by the shell (audio, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// A faller scrolled off the bottom edge; one point awarded
    Dodged,
    /// The player collided with a faller; score reset, field cleared
    Hit,
}

/// Complete game state (deterministic)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Score: one point per dodged faller, reset on collision
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Seconds since the last spawn
    pub spawn_timer: f32,
    /// Player circle
    pub player: Player,
    /// Active fallers (sorted by id for determinism)
    pub fallers: Vec<Faller>,
    /// Events emitted by the most recent tick
    pub events: Vec<GameEvent>,
    rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            score: 0,
            time_ticks: 0,
            spawn_timer: 0.0,
            player: Player::default(),
            fallers: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn rng(&mut self) -> &mut Pcg32 {
        &mut self.rng
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_empty() {
        let state = GameState::new(7);
        assert_eq!(state.score, 0);
        assert!(state.fallers.is_empty());
        assert!(state.events.is_empty());
        assert_eq!(state.player.pos.x, WINDOW_W / 2.0);
    }

    #[test]
    fn test_entity_ids_are_monotonic() {
        let mut state = GameState::new(7);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }
}
