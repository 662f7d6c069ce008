//! Binary space partitioning
//!
//! Recursively cuts a rectangle into non-overlapping leaves that are no
//! smaller than the given minimums.

use std::collections::VecDeque;

use rand::Rng;

use crate::world::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Z,
}

/// Split a region in two along a randomly chosen axis
///
/// The axis coin is always flipped; when the chosen axis is too short the
/// other one is used. Returns `None` when neither axis can be cut with both
/// halves at least the minimum size on that axis.
pub fn split<R: Rng + ?Sized>(
    rng: &mut R,
    region: Rect,
    min_width: i32,
    min_height: i32,
) -> Option<(Rect, Rect)> {
    let min_width = min_width.max(1);
    let min_height = min_height.max(1);

    let can_split_x = region.width >= min_width.saturating_mul(2);
    let can_split_z = region.height >= min_height.saturating_mul(2);

    if !can_split_x && !can_split_z {
        return None;
    }

    let wanted = if rng.gen_bool(0.5) { Axis::X } else { Axis::Z };
    let axis = match wanted {
        Axis::X if !can_split_x => Axis::Z,
        Axis::Z if !can_split_z => Axis::X,
        axis => axis,
    };

    Some(match axis {
        Axis::X => {
            let offset = draw_offset(rng, min_width, region.width);
            (
                Rect::new(region.x, region.z, offset, region.height),
                Rect::new(region.x + offset, region.z, region.width - offset, region.height),
            )
        }
        Axis::Z => {
            let offset = draw_offset(rng, min_height, region.height);
            (
                Rect::new(region.x, region.z, region.width, offset),
                Rect::new(region.x, region.z + offset, region.width, region.height - offset),
            )
        }
    })
}

/// Uniform offset in `[min, dimension - min)`, or `min` when that range is empty
fn draw_offset<R: Rng + ?Sized>(rng: &mut R, min: i32, dimension: i32) -> i32 {
    let upper = dimension - min;
    if upper > min {
        rng.gen_range(min..upper)
    } else {
        min
    }
}

/// Split breadth-first until no region can be split any further
///
/// Leaves come back in queue order.
pub fn partition_all<R: Rng + ?Sized>(
    rng: &mut R,
    region: Rect,
    min_width: i32,
    min_height: i32,
) -> Vec<Rect> {
    let mut queue = VecDeque::from([region]);
    let mut leaves = Vec::new();

    while let Some(current) = queue.pop_front() {
        match split(rng, current, min_width, min_height) {
            Some((a, b)) => {
                queue.push_back(a);
                queue.push_back(b);
            }
            None => leaves.push(current),
        }
    }

    log::debug!(
        "Partitioned {}x{} into {} leaves (min {}x{})",
        region.width,
        region.height,
        leaves.len(),
        min_width,
        min_height
    );
    leaves
}
