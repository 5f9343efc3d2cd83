//! Lane table
//!
//! Lanes are indexed left to right from 0 and laid out symmetrically about
//! the track centre.

use serde::{Deserialize, Serialize};

/// Lane index in `0..lane_count`
pub type Lane = usize;

/// A one-lane steering request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaneShift {
    Left,
    Right,
}

impl LaneShift {
    #[inline]
    pub fn direction(self) -> isize {
        match self {
            LaneShift::Left => -1,
            LaneShift::Right => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lanes {
    count: usize,
    width: f32,
}

impl Lanes {
    pub fn new(count: usize, width: f32) -> Self {
        Self {
            count: count.max(1),
            width,
        }
    }

    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    /// Starting lane (left of centre on even-width tracks)
    #[inline]
    pub fn center(&self) -> Lane {
        (self.count - 1) / 2
    }

    #[inline]
    pub fn contains(&self, lane: Lane) -> bool {
        lane < self.count
    }

    /// Lateral offset of a lane's centreline from the track centre
    #[inline]
    pub fn offset(&self, lane: Lane) -> f32 {
        (lane as f32 - (self.count - 1) as f32 / 2.0) * self.width
    }

    /// Shift one lane, staying put at the track edges
    pub fn try_shift(&self, lane: Lane, shift: LaneShift) -> Lane {
        match lane.checked_add_signed(shift.direction()) {
            Some(next) if self.contains(next) => next,
            _ => lane,
        }
    }
}
