//! Wall and corner classification of room borders

use crate::world::{CellGrid, CellTag, Rect};

/// Tag the border of every room
pub fn carve_walls(grid: &mut CellGrid, rooms: &[Rect]) {
    for room in rooms {
        carve_room_walls(grid, room);
    }
}

/// Tag one room's border: four corners, then the directional walls between them
///
/// Corners go first and walls never overwrite a corner or corridor, so a
/// neighbouring room carved later cannot clobber them.
pub fn carve_room_walls(grid: &mut CellGrid, room: &Rect) {
    let (min_x, max_x) = (room.x, room.max_x());
    let (min_z, max_z) = (room.z, room.max_z());

    for (x, z, corner) in [
        (min_x, min_z, CellTag::BottomLeftCorner),
        (max_x, min_z, CellTag::BottomRightCorner),
        (min_x, max_z, CellTag::TopLeftCorner),
        (max_x, max_z, CellTag::TopRightCorner),
    ] {
        if !grid.get(x, z).is_some_and(|t| t.is_corridor()) {
            grid.set(x, z, corner);
        }
    }

    for x in min_x + 1..max_x {
        grid.set_if_not_corner(x, min_z, CellTag::SouthWall);
        grid.set_if_not_corner(x, max_z, CellTag::NorthWall);
    }

    for z in min_z + 1..max_z {
        grid.set_if_not_corner(min_x, z, CellTag::WestWall);
        grid.set_if_not_corner(max_x, z, CellTag::EastWall);
    }
}
