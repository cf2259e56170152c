//! Level loading and management.
//!
//! Levels are authored as JSON ([`LevelDesc`]) and built into a
//! [`CollisionWorld`] of walls and zones.

use std::path::Path;

use boxslide_physics::{CollisionLayers, CollisionWorld, Matrix2x2, PhysicsError};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading a level.
#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid zone {index}: {source}")]
    Zone {
        index: usize,
        #[source]
        source: PhysicsError,
    },
}

/// Serialized form of a level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelDesc {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub walls: Vec<WallDesc>,

    #[serde(default)]
    pub zones: Vec<ZoneDesc>,

    #[serde(default)]
    pub spawn_points: Vec<SpawnPoint>,
}

/// An axis-aligned blocking box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallDesc {
    pub center: Vec2,
    pub half_extents: Vec2,
}

/// An axis-aligned zone box carrying a movement matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneDesc {
    pub center: Vec2,
    pub half_extents: Vec2,

    #[serde(default)]
    pub matrix: Matrix2x2,

    /// Sorting depth for point sampling.
    #[serde(default)]
    pub depth: f32,
}

/// A spawn point for bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    /// Position in world space.
    pub position: Vec2,
}

/// A game level containing collision geometry and spawn points.
#[derive(Debug)]
pub struct Level {
    /// Level identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Collision world for physics.
    pub collision: CollisionWorld,

    /// Body spawn points.
    pub spawn_points: Vec<SpawnPoint>,
}

impl Level {
    /// Create an empty level.
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            collision: CollisionWorld::new(),
            spawn_points: Vec::new(),
        }
    }

    /// Build a level from its description.
    ///
    /// Zones whose matrix cannot be inverted are rejected: bodies could enter
    /// them but never map their movement back out.
    pub fn from_desc(desc: &LevelDesc) -> Result<Self, LevelError> {
        let mut level = Self::new(&desc.id, &desc.name);

        for wall in &desc.walls {
            level
                .collision
                .add_box(wall.center, wall.half_extents, CollisionLayers::WALL);
        }

        for (index, zone) in desc.zones.iter().enumerate() {
            if !zone.matrix.is_invertible() {
                return Err(LevelError::Zone {
                    index,
                    source: PhysicsError::SingularMatrix {
                        determinant: zone.matrix.determinant(),
                    },
                });
            }
            level.add_zone(zone);
        }

        level.spawn_points = desc.spawn_points.clone();

        log::debug!(
            "built level '{}': {} walls, {} zones, {} spawns",
            level.id,
            desc.walls.len(),
            desc.zones.len(),
            level.spawn_points.len()
        );

        Ok(level)
    }

    /// Parse and build a level from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, LevelError> {
        let desc: LevelDesc = serde_json::from_str(json)?;
        Self::from_desc(&desc)
    }

    /// Load a level from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LevelError> {
        let path = path.as_ref();
        log::info!("loading level from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Create a simple test level for development.
    ///
    /// A walled room with a ramp zone on the left and a fast lane on the right.
    pub fn test_room() -> Self {
        let mut level = Self::new("test_room", "Test Room");

        let room_size = 20.0;
        let wall_thickness = 0.5;

        // North and south walls
        for y in [room_size, -room_size] {
            level.collision.add_box(
                Vec2::new(0.0, y),
                Vec2::new(room_size, wall_thickness),
                CollisionLayers::WALL,
            );
        }

        // East and west walls
        for x in [room_size, -room_size] {
            level.collision.add_box(
                Vec2::new(x, 0.0),
                Vec2::new(wall_thickness, room_size),
                CollisionLayers::WALL,
            );
        }

        // Central pillar
        level
            .collision
            .add_box(Vec2::ZERO, Vec2::splat(1.5), CollisionLayers::WALL);

        // Ramp: horizontal movement also climbs
        level.add_zone(&ZoneDesc {
            center: Vec2::new(-10.0, 0.0),
            half_extents: Vec2::new(4.0, 6.0),
            matrix: Matrix2x2::shear_y(0.5),
            depth: 0.0,
        });

        // Fast lane
        level.add_zone(&ZoneDesc {
            center: Vec2::new(10.0, -10.0),
            half_extents: Vec2::new(6.0, 2.0),
            matrix: Matrix2x2::scale(2.0),
            depth: 0.0,
        });

        level.spawn_points.push(SpawnPoint {
            position: Vec2::new(-17.0, -15.0),
        });
        level.spawn_points.push(SpawnPoint {
            position: Vec2::new(5.0, -10.0),
        });

        level
    }

    /// Get a spawn point.
    pub fn get_spawn(&self, index: usize) -> Option<&SpawnPoint> {
        self.spawn_points.get(index)
    }

    fn add_zone(&mut self, zone: &ZoneDesc) {
        self.collision
            .add_zone_at_depth(zone.center, zone.half_extents, zone.matrix, zone.depth);
    }
}
