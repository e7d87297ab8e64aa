//! Collision queries against the tile grid and between actors
//!
//! Everything here is axis-aligned: an actor is the rectangle
//! `[pos, pos + size)` in grid units.

use glam::DVec2;

use super::actor::Actor;
use super::level::{Level, Tile};

impl Level {
    /// Check whether a rectangle covers any grid cell of the given tile kind
    ///
    /// Covered cells run from `floor(pos)` up to, but excluding,
    /// `ceil(pos + size)` on each axis. Cells outside the grid count as
    /// walls, so the level boundary is solid and never lava.
    pub fn touches(&self, pos: DVec2, size: DVec2, tile: Tile) -> bool {
        assert!(
            pos.is_finite() && size.is_finite(),
            "rectangle must be finite: pos={pos}, size={size}"
        );

        let x_start = pos.x.floor() as i64;
        let x_end = (pos.x + size.x).ceil() as i64;
        let y_start = pos.y.floor() as i64;
        let y_end = (pos.y + size.y).ceil() as i64;

        for y in y_start..y_end {
            for x in x_start..x_end {
                let here = self.tile(x, y).unwrap_or(Tile::Wall);
                if here == tile {
                    return true;
                }
            }
        }
        false
    }
}

/// Check whether two rectangles overlap
///
/// Rectangles that only share an edge do not overlap.
#[inline]
pub fn overlap(a_pos: DVec2, a_size: DVec2, b_pos: DVec2, b_size: DVec2) -> bool {
    a_pos.x + a_size.x > b_pos.x
        && a_pos.x < b_pos.x + b_size.x
        && a_pos.y + a_size.y > b_pos.y
        && a_pos.y < b_pos.y + b_size.y
}

/// Check whether two actors overlap
#[inline]
pub fn actors_overlap(a: &Actor, b: &Actor) -> bool {
    overlap(a.pos(), a.size(), b.pos(), b.size())
}
