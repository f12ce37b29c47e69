use super::collect::{CollectedMatches, VoteTally};
use crate::geom::Axis;

/// The resolved start-anchored coordinate per axis. An unset axis is not snapped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Target {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl Target {
    pub fn get(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

impl VoteTally {
    /// The value with the most votes; among ties, the one that received its first vote earliest.
    pub fn winner(&self) -> Option<f64> {
        let mut best: Option<(f64, usize)> = None;
        for (value, count) in self.iter() {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }
}

pub fn resolve_target(collected: &CollectedMatches) -> Target {
    Target {
        x: collected.tally(Axis::X).winner(),
        y: collected.tally(Axis::Y).winner(),
    }
}
