//! Line-of-supply checks between units and sources
//!
//! A source supplies a unit when the unit is within the source's Manhattan
//! range and no enemy stands on the stepped path between them. The path moves
//! one axis-aligned tile per step, closing the x gap before the y gap, so its
//! length always equals the Manhattan distance.

use ahash::AHashSet;

use super::source::SupplySource;
use crate::core::types::{MapBounds, Position};

/// Enemy-occupied tiles, built once per query batch
#[derive(Debug, Clone, Default)]
pub struct EnemyOccupancy {
    tiles: AHashSet<Position>,
}

impl EnemyOccupancy {
    pub fn new(enemy_positions: &[Position]) -> Self {
        Self {
            tiles: enemy_positions.iter().copied().collect(),
        }
    }

    pub fn is_occupied(&self, pos: Position) -> bool {
        self.tiles.contains(&pos)
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}

/// Tiles traversed walking from `from` to `to`, excluding `from`, including `to`
///
/// The start tile is the unit's own and is never checked for enemies.
pub fn supply_path(from: Position, to: Position) -> Vec<Position> {
    let mut path = Vec::with_capacity(from.manhattan_distance(&to) as usize);
    let mut current = from;

    while current != to {
        if current.x != to.x {
            current.x += (to.x - current.x).signum();
        } else {
            current.y += (to.y - current.y).signum();
        }
        path.push(current);
    }

    path
}

/// True if any traversed tile between `from` and `to` holds an enemy
pub fn is_path_blocked(from: Position, to: Position, enemies: &EnemyOccupancy) -> bool {
    if enemies.is_empty() {
        return false;
    }
    supply_path(from, to)
        .into_iter()
        .any(|tile| enemies.is_occupied(tile))
}

/// Nearest in-range source with an unblocked path.
///
/// Ties go to the source that appears first in `supply_sources`. The map
/// bounds are accepted for callers that pass them but do not affect the
/// result.
pub fn find_nearest_supply_source<'a>(
    unit_position: Position,
    supply_sources: &'a [SupplySource],
    enemy_positions: &[Position],
    bounds: MapBounds,
) -> Option<&'a SupplySource> {
    let enemies = EnemyOccupancy::new(enemy_positions);
    find_nearest_with_occupancy(unit_position, supply_sources, &enemies, bounds)
}

/// Same as [`find_nearest_supply_source`] with a prebuilt occupancy set
pub fn find_nearest_with_occupancy<'a>(
    unit_position: Position,
    supply_sources: &'a [SupplySource],
    enemies: &EnemyOccupancy,
    _bounds: MapBounds,
) -> Option<&'a SupplySource> {
    let mut nearest: Option<(&SupplySource, u32)> = None;

    for source in supply_sources {
        let distance = unit_position.manhattan_distance(&source.position);
        if distance > source.range {
            continue;
        }

        // Strictly closer only, so the earlier source keeps a tie
        if nearest.is_some_and(|(_, best)| distance >= best) {
            continue;
        }

        if is_path_blocked(unit_position, source.position, enemies) {
            tracing::trace!(
                "Supply path from {} to {} {} blocked",
                unit_position,
                source.kind,
                source.position
            );
            continue;
        }

        nearest = Some((source, distance));
    }

    nearest.map(|(source, _)| source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::TeamId;
    use crate::supply::source::SupplySourceType;

    fn source(kind: SupplySourceType, x: i32, y: i32) -> SupplySource {
        SupplySource::new(kind, Position::new(x, y), TeamId::new("allies"))
    }

    fn bounds() -> MapBounds {
        MapBounds::new(20, 20)
    }

    #[test]
    fn test_path_closes_x_then_y() {
        let path = supply_path(Position::new(0, 0), Position::new(2, -2));
        assert_eq!(
            path,
            vec![
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, -1),
                Position::new(2, -2),
            ]
        );
    }

    #[test]
    fn test_path_length_is_manhattan() {
        let from = Position::new(3, 7);
        let to = Position::new(-2, 1);
        assert_eq!(supply_path(from, to).len() as u32, from.manhattan_distance(&to));
    }

    #[test]
    fn test_colocated_path_is_empty() {
        let p = Position::new(4, 4);
        assert!(supply_path(p, p).is_empty());
    }

    #[test]
    fn test_enemy_on_source_tile_blocks() {
        let enemies = EnemyOccupancy::new(&[Position::new(3, 0)]);
        assert!(is_path_blocked(Position::new(0, 0), Position::new(3, 0), &enemies));
    }

    #[test]
    fn test_enemy_off_path_does_not_block() {
        // Path goes along y = 0 first, so (0, 1) is never traversed
        let enemies = EnemyOccupancy::new(&[Position::new(0, 1)]);
        assert!(!is_path_blocked(Position::new(0, 0), Position::new(2, 2), &enemies));
    }

    #[test]
    fn test_empty_sources_returns_none() {
        assert!(find_nearest_supply_source(Position::new(0, 0), &[], &[], bounds()).is_none());
    }

    #[test]
    fn test_out_of_range_source_ignored() {
        let sources = vec![source(SupplySourceType::Trench, 3, 0)];
        assert!(find_nearest_supply_source(Position::new(0, 0), &sources, &[], bounds()).is_none());
    }

    #[test]
    fn test_range_is_inclusive() {
        let sources = vec![source(SupplySourceType::Trench, 1, 1)];
        assert!(find_nearest_supply_source(Position::new(0, 0), &sources, &[], bounds()).is_some());
    }

    #[test]
    fn test_range_read_from_source_record() {
        let mut extended = source(SupplySourceType::Trench, 4, 0);
        extended.range = 5;
        let mut shortened = source(SupplySourceType::Hq, 0, 3);
        shortened.range = 1;
        let sources = vec![shortened, extended];

        let found = find_nearest_supply_source(Position::new(0, 0), &sources, &[], bounds());
        assert_eq!(found.map(|s| s.id), Some(sources[1].id));
    }

    #[test]
    fn test_start_tile_not_checked() {
        let enemies = EnemyOccupancy::new(&[Position::new(0, 0)]);
        assert!(!is_path_blocked(Position::new(0, 0), Position::new(2, 0), &enemies));
    }

    #[test]
    fn test_colocated_source_ignores_enemies() {
        let sources = vec![source(SupplySourceType::Airdrop, 5, 5)];
        let enemies = [Position::new(5, 6), Position::new(4, 5)];
        let found = find_nearest_supply_source(Position::new(5, 5), &sources, &enemies, bounds());
        assert_eq!(found.map(|s| s.id), Some(sources[0].id));
    }

    #[test]
    fn test_blocked_nearest_falls_back_to_farther() {
        let sources = vec![
            source(SupplySourceType::Depot, 2, 0),
            source(SupplySourceType::Hq, 0, 5),
        ];
        let enemies = [Position::new(1, 0)];
        let found = find_nearest_supply_source(Position::new(0, 0), &sources, &enemies, bounds());
        assert_eq!(found.map(|s| s.id), Some(sources[1].id));
    }

    #[test]
    fn test_tie_goes_to_first_listed() {
        let sources = vec![
            source(SupplySourceType::Depot, 3, 0),
            source(SupplySourceType::Depot, 0, 3),
        ];
        let found = find_nearest_supply_source(Position::new(0, 0), &sources, &[], bounds());
        assert_eq!(found.map(|s| s.id), Some(sources[0].id));

        let reversed: Vec<_> = sources.iter().rev().cloned().collect();
        let found = find_nearest_supply_source(Position::new(0, 0), &reversed, &[], bounds());
        assert_eq!(found.map(|s| s.id), Some(sources[1].id));
    }

    #[test]
    fn test_map_bounds_do_not_filter() {
        let sources = vec![source(SupplySourceType::Hq, -3, 0)];
        let tiny = MapBounds::new(1, 1);
        assert!(find_nearest_supply_source(Position::new(0, 0), &sources, &[], tiny).is_some());
    }
}
