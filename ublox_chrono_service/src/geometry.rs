//! Gate crossing detection.
//!
//! Exact integer orientation tests; no floating point, no tolerance.
//!
//! ## Tie-break
//!
//! Crossings are endpoint-exclusive: if any of the four orientation tests
//! is zero (a position lying exactly on the gate line, a gate endpoint
//! lying exactly on the movement, or collinear segments) the movement does
//! **not** cross. A sample landing exactly on the gate line therefore
//! counts for neither adjacent movement; the rule is symmetric in both
//! segments and in their direction.

use chrono_common::coord::Coordinate;
use std::cmp::Ordering;

/// Orientation of `r` relative to the directed line `p → q`.
///
/// `Greater` is counter-clockwise, `Less` clockwise, `Equal` collinear.
/// Differences of two `i32` need 33 bits and their products 66, hence `i128`.
#[inline]
pub fn orientation(p: Coordinate, q: Coordinate, r: Coordinate) -> Ordering {
    let qx = i128::from(q.lon) - i128::from(p.lon);
    let qy = i128::from(q.lat) - i128::from(p.lat);
    let rx = i128::from(r.lon) - i128::from(p.lon);
    let ry = i128::from(r.lat) - i128::from(p.lat);

    (qx * ry - qy * rx).cmp(&0)
}

#[inline]
fn strictly_opposite(a: Ordering, b: Ordering) -> bool {
    matches!(
        (a, b),
        (Ordering::Less, Ordering::Greater) | (Ordering::Greater, Ordering::Less)
    )
}

/// Does the movement `prev → curr` properly cross the gate `gate_a`-`gate_b`?
pub fn crosses(prev: Coordinate, curr: Coordinate, gate_a: Coordinate, gate_b: Coordinate) -> bool {
    strictly_opposite(
        orientation(prev, curr, gate_a),
        orientation(prev, curr, gate_b),
    ) && strictly_opposite(
        orientation(gate_a, gate_b, prev),
        orientation(gate_a, gate_b, curr),
    )
}
