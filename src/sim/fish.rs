//! Live fish in the water column

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::catalog::{FishSpecies, SpeciesId, species};
use crate::consts::*;

/// A fish swimming in the active round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FishInstance {
    pub id: u32,
    pub species: SpeciesId,
    /// Center of the hitbox (playfield px)
    pub pos: Vec2,
    /// Drift per second
    pub vel: Vec2,
    /// Hitbox extents
    pub size: Vec2,
}

impl FishInstance {
    pub fn new(id: u32, species: SpeciesId, pos: Vec2, vel: Vec2) -> Self {
        Self {
            id,
            species,
            pos,
            vel,
            size: Vec2::new(FISH_WIDTH, FISH_HEIGHT),
        }
    }

    pub fn species(&self) -> Option<&'static FishSpecies> {
        species(self.species)
    }

    /// Whether a point lies inside the hitbox
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.size / 2.0;
        let d = (point - self.pos).abs();
        d.x <= half.x && d.y <= half.y
    }

    /// Advance the fish along its drift
    pub fn swim(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }

    /// True once the fish has left the playfield in its direction of travel
    pub fn out_of_bounds(&self) -> bool {
        let half = self.size / 2.0;
        let gone_left = self.vel.x < 0.0 && self.pos.x + half.x < 0.0;
        let gone_right = self.vel.x > 0.0 && self.pos.x - half.x > PLAYFIELD_WIDTH;
        let gone_vertical =
            self.pos.y < -CULL_MARGIN || self.pos.y > PLAYFIELD_HEIGHT + CULL_MARGIN;
        gone_left || gone_right || gone_vertical
    }
}
