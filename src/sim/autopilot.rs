//! Demo-mode driver
//!
//! Steers away from obstacles that would hit a grounded player. It never
//! jumps; aerial obstacles only threaten a player in the air.

use super::collision::player_hitbox;
use super::lane::Lane;
use super::state::{GameState, Intent};

/// How far up the track the autopilot looks (world units)
const LOOKAHEAD: f32 = 24.0;
/// Gap needed to slide through a threatened lane on the way to a safe one
const PASS_MARGIN: f32 = 6.0;

/// Per lane, the gap to the closest obstacle that would strike a grounded
/// player within the lookahead window
fn lane_threats(state: &GameState) -> Vec<Option<f32>> {
    let settings = &state.settings;
    let lanes = settings.lanes();
    let mut grounded = state.player.clone();
    grounded.height = settings.ground_height;
    let hitbox = player_hitbox(&grounded, settings);

    let mut threats: Vec<Option<f32>> = vec![None; lanes.count()];
    for obstacle in state.obstacles.iter() {
        if !lanes.contains(obstacle.lane) {
            continue;
        }
        let bounds = obstacle.bounds(&lanes, settings);
        let vertical_overlap = bounds.min.y <= hitbox.max.y && bounds.max.y >= hitbox.min.y;
        let gap = hitbox.min.z - bounds.max.z;
        let ahead = gap <= LOOKAHEAD && bounds.min.z <= hitbox.max.z;
        if vertical_overlap && ahead {
            let gap = gap.max(0.0);
            let slot = &mut threats[obstacle.lane];
            *slot = Some(slot.map_or(gap, |g| g.min(gap)));
        }
    }
    threats
}

/// Intent that moves the player toward the nearest safe lane, if needed
pub fn steer(state: &GameState) -> Option<Intent> {
    let threats = lane_threats(state);
    let current: Lane = state.player.lane;
    let current_gap = (*threats.get(current)?)?;

    let passable = |from: Lane, to: Lane| {
        let (low, high) = if from < to { (from, to) } else { (to, from) };
        (low + 1..high).all(|lane| threats[lane].is_none_or(|gap| gap > PASS_MARGIN))
    };

    let safe = (0..threats.len())
        .filter(|&lane| threats[lane].is_none() && passable(current, lane))
        .min_by_key(|&lane| (lane.abs_diff(current), lane));

    // Boxed in: buy time in whichever neighbour is furthest from trouble
    let target = safe.or_else(|| {
        [current.checked_sub(1), Some(current + 1)]
            .into_iter()
            .flatten()
            .filter(|&lane| lane < threats.len())
            .filter_map(|lane| threats[lane].map(|gap| (lane, gap)))
            .filter(|&(_, gap)| gap > current_gap + PASS_MARGIN)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(lane, _)| lane)
    })?;

    Some(if target < current {
        Intent::LaneLeft
    } else {
        Intent::LaneRight
    })
}
