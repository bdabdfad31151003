use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    /// Order label, starting at 1.
    pub label: u32,
    pub position: Vec2,
}

impl Waypoint {
    pub fn new(label: u32, x: f32, y: f32) -> Self {
        Self {
            label,
            position: Vec2::new(x, y),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    pub name: String,
    /// Awarded once every consecutive pair of waypoints is connected.
    pub points: u32,
    pub waypoints: Vec<Waypoint>,
}

impl Puzzle {
    /// Number of connections needed to solve the puzzle.
    pub fn connections(&self) -> usize {
        self.waypoints.len().saturating_sub(1)
    }

    /// Labels must read 1..N in listed order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.waypoints.len() < 2 {
            return Err(ConfigError::TooFewWaypoints {
                puzzle: self.name.clone(),
                found: self.waypoints.len(),
            });
        }

        for (index, waypoint) in self.waypoints.iter().enumerate() {
            let expected = index as u32 + 1;
            if waypoint.label != expected {
                return Err(ConfigError::NonContiguousLabels {
                    puzzle: self.name.clone(),
                    index,
                    expected,
                    found: waypoint.label,
                });
            }
        }
        Ok(())
    }

    /// The waypoint nearest to `point`, if it lies within `radius`.
    pub fn snap(&self, point: Vec2, radius: f32) -> Option<&Waypoint> {
        self.waypoints
            .iter()
            .map(|waypoint| (waypoint, waypoint.position.distance(point)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(waypoint, _)| waypoint)
    }

    pub fn waypoint(&self, label: u32) -> Option<&Waypoint> {
        self.waypoints.iter().find(|waypoint| waypoint.label == label)
    }
}
