/*
 *  Per-player line-of-sight, ray cast against the base terrain.
 */

use crate::nuggets::prelude::*;

/// Recomputes a player's visible set from their position and folds
/// the result into their discovered set. The visible set is rebuilt
/// from scratch; the discovered set only ever grows. Spectators are
/// left untouched.
///
/// Runs in O(H·W·max(H,W)); must be called after every successful
/// move and at join.
pub fn recompute(base: &Grid, player: &mut Player) {
    if player.is_spectator {
        return;
    }

    player.visible.clear();
    for row in 0..base.height() {
        for col in 0..base.width() {
            let target = Coord::new(row, col);
            if target == player.pos {
                // the player's own cell carries no visibility flag;
                // the renderer draws it as '@' regardless
                continue;
            }
            if sightline(base, player.pos, target) {
                player.visible.set(target, true);
                player.discovered.set(target, true);
            }
        }
    }
}

/// Traces one ray from `from` to `to`, exclusive of both endpoints.
///
/// Vertical rays check every cell in the column. Otherwise the ray is
/// walked along its major axis; at each step the continuous minor
/// coordinate falls between two cells, and only if *both* bracketing
/// cells block is the ray stopped. A diagonal that clips exactly
/// through a wall corner therefore passes.
fn sightline(base: &Grid, from: Coord, to: Coord) -> bool {
    let (py, px) = (from.row as isize, from.col as isize);
    let (y, x) = (to.row as isize, to.col as isize);

    if px == x {
        let dy = if py < y { 1 } else { -1 };
        let mut iy = py + dy;
        while iy != y {
            if blocks(base, iy as usize, from.col) {
                return false;
            }
            iy += dy;
        }
        return true;
    }

    let slope = (py - y) as f64 / (px - x) as f64;
    if slope.abs() <= 1.0 {
        let dx = if px < x { 1 } else { -1 };
        let mut ix = px + dx;
        while ix != x {
            let iy = slope * (ix - px) as f64 + py as f64;
            if blocks(base, iy.ceil() as usize, ix as usize)
                && blocks(base, iy.floor() as usize, ix as usize)
            {
                return false;
            }
            ix += dx;
        }
    } else {
        let dy = if py < y { 1 } else { -1 };
        let mut iy = py + dy;
        while iy != y {
            let ix = (iy - py) as f64 / slope + px as f64;
            if blocks(base, iy as usize, ix.ceil() as usize)
                && blocks(base, iy as usize, ix.floor() as usize)
            {
                return false;
            }
            iy += dy;
        }
    }

    true
}

fn blocks(base: &Grid, row: usize, col: usize) -> bool {
    base.blocks_sight(Coord::new(row, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sighted(map: &str, pos: Coord) -> Player {
        let base = map.parse::<Grid>().unwrap();
        let mut player =
            Player::new("test".into(), 'A', pos, "127.0.0.1:4000".parse().unwrap(), base.height(), base.width());
        recompute(&base, &mut player);
        player
    }

    #[test]
    fn open_room_is_fully_visible() {
        let map = "+---+\n|...|\n|...|\n|...|\n+---+\n";
        let player = sighted(map, Coord::new(1, 1));
        for row in 0..5 {
            for col in 0..5 {
                let target = Coord::new(row, col);
                if target == player.pos {
                    assert!(!player.visible.get(target));
                } else {
                    assert!(player.visible.get(target), "({row},{col}) should be visible");
                }
            }
        }
    }

    #[test]
    fn passages_stop_sight_but_not_travel() {
        let map = "+---------+\n|...#.....|\n+---------+\n";
        let player = sighted(map, Coord::new(1, 1));
        assert!(player.visible.get(Coord::new(1, 3)));
        assert!(player.visible.get(Coord::new(1, 4)), "the passage cell itself is in view");
        assert!(!player.visible.get(Coord::new(1, 5)), "nothing beyond the passage is");
        assert!(!player.visible.get(Coord::new(1, 8)));
    }

    #[test]
    fn interior_wall_blocks_direct_diagonal() {
        let map = "+---+\n|...|\n|.-.|\n|...|\n+---+\n";
        let player = sighted(map, Coord::new(1, 1));
        // the ray to (3,3) passes exactly through the wall at (2,2)
        assert!(!player.visible.get(Coord::new(3, 3)));
        assert!(player.visible.get(Coord::new(1, 3)));
        assert!(player.visible.get(Coord::new(3, 1)));
    }

    #[test]
    fn corner_clip_is_permissive() {
        let map = "+---+\n|...|\n|.-.|\n|...|\n+---+\n";
        // from (1,2) the steep ray to (3,3) brackets the wall at
        // (2,2) with the floor at (2,3): one blocker is not enough
        let player = sighted(map, Coord::new(1, 2));
        assert!(player.visible.get(Coord::new(3, 3)));
    }

    #[test]
    fn vertical_rays_check_the_column() {
        let map = "+---+\n|...|\n|---|\n|...|\n+---+\n";
        let player = sighted(map, Coord::new(1, 2));
        assert!(!player.visible.get(Coord::new(3, 2)));
        assert!(player.visible.get(Coord::new(2, 2)), "the blocking wall itself is seen");
    }

    #[test]
    fn visible_implies_discovered() {
        let map = "+---------+\n|...#.....|\n+---------+\n";
        let player = sighted(map, Coord::new(1, 1));
        for row in 0..3 {
            for col in 0..11 {
                let at = Coord::new(row, col);
                if player.visible.get(at) {
                    assert!(player.discovered.get(at));
                }
            }
        }
    }

    #[test]
    fn discovery_outlives_line_of_sight() {
        let base = "+---------+\n|...#.....|\n+---------+\n".parse::<Grid>().unwrap();
        let mut player =
            Player::new("test".into(), 'A', Coord::new(1, 1), "127.0.0.1:4000".parse().unwrap(), base.height(), base.width());
        recompute(&base, &mut player);
        assert!(player.visible.get(Coord::new(1, 2)));

        // walk to the far side of the passage
        player.pos = Coord::new(1, 6);
        recompute(&base, &mut player);
        assert!(!player.visible.get(Coord::new(1, 2)));
        assert!(player.discovered.get(Coord::new(1, 2)));
    }

    #[test]
    fn spectators_skip_the_engine() {
        let base = "+---+\n|...|\n+---+\n".parse::<Grid>().unwrap();
        let mut spectator = Player::spectator("127.0.0.1:4000".parse().unwrap(), 3, 5);
        recompute(&base, &mut spectator);
        assert!(spectator.visible.get(Coord::new(0, 0)));
    }
}
