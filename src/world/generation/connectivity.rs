//! Room connectivity
//!
//! Grows a tree of connections outward from the first room, always attaching
//! the unconnected room nearest to the part that is already connected.

use serde::{Deserialize, Serialize};

use crate::world::Rect;

/// Two rooms to be joined by a corridor, as indices into the room list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
}

/// Nearest-neighbour growth from room 0
///
/// Each step joins the unconnected room whose center is closest to any
/// connected room. Exact ties go to the first pair found (connected index,
/// then candidate index).
pub fn connect_rooms(rooms: &[Rect]) -> Vec<Connection> {
    if rooms.len() < 2 {
        return Vec::new();
    }

    let mut connected = vec![false; rooms.len()];
    connected[0] = true;
    let mut connections = Vec::with_capacity(rooms.len() - 1);

    for _ in 1..rooms.len() {
        // (squared distance, from, to)
        let mut best: Option<(i64, usize, usize)> = None;

        for from in (0..rooms.len()).filter(|&i| connected[i]) {
            for to in (0..rooms.len()).filter(|&j| !connected[j]) {
                let dist = center_distance_sq(&rooms[from], &rooms[to]);
                if best.map_or(true, |(closest, _, _)| dist < closest) {
                    best = Some((dist, from, to));
                }
            }
        }

        let Some((_, from, to)) = best else {
            break;
        };
        connected[to] = true;
        connections.push(Connection { from, to });
    }

    connections
}

/// Squared distance between centers, in half cells to stay in integers
fn center_distance_sq(a: &Rect, b: &Rect) -> i64 {
    let dx = (2 * a.x + a.width) as i64 - (2 * b.x + b.width) as i64;
    let dz = (2 * a.z + a.height) as i64 - (2 * b.z + b.height) as i64;
    dx * dx + dz * dz
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_connections_for_single_room() {
        assert!(connect_rooms(&[]).is_empty());
        assert!(connect_rooms(&[Rect::new(0, 0, 10, 10)]).is_empty());
    }

    #[test]
    fn test_every_room_joined_once() {
        let rooms = [
            Rect::new(0, 0, 10, 10),
            Rect::new(10, 0, 10, 10),
            Rect::new(0, 10, 10, 10),
            Rect::new(10, 10, 10, 10),
        ];
        let connections = connect_rooms(&rooms);
        assert_eq!(connections.len(), 3);

        let mut reached = vec![false; rooms.len()];
        reached[0] = true;
        for c in &connections {
            assert!(reached[c.from], "connection from an unreached room");
            assert!(!reached[c.to], "room {} connected twice", c.to);
            reached[c.to] = true;
        }
        assert!(reached.iter().all(|r| *r));
    }

    #[test]
    fn test_nearest_first_with_tie_break() {
        // Rooms 1 and 2 are equally close to room 0; room 1 comes first
        let rooms = [
            Rect::new(10, 10, 10, 10),
            Rect::new(20, 10, 10, 10),
            Rect::new(10, 20, 10, 10),
            Rect::new(40, 10, 10, 10),
        ];
        let connections = connect_rooms(&rooms);
        assert_eq!(connections[0], Connection { from: 0, to: 1 });
        assert_eq!(connections[1], Connection { from: 0, to: 2 });
    }

    #[test]
    fn test_closer_room_wins_over_wall_neighbour() {
        // Room 1 shares a wall with room 0, but room 2's center is nearer
        let rooms = [
            Rect::new(0, 0, 4, 20),
            Rect::new(4, 0, 40, 20),
            Rect::new(0, 21, 4, 4),
        ];
        let connections = connect_rooms(&rooms);
        assert_eq!(connections[0], Connection { from: 0, to: 2 });
        assert_eq!(connections[1], Connection { from: 0, to: 1 });
    }
}
