//! Cross-entity resolution, run once per tick after every entity has moved

use super::collectible::Collectible;
use super::enemy::Enemy;
use super::events::GameEvent;
use super::player::Player;
use super::tile::TileGrid;
use crate::Rect;
use crate::consts::{JUMP_FORCE, STOMP_BOUNCE, STOMP_SCORE, STOMP_TOLERANCE, TILE};

/// What the rest of the tick should do after interactions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionOutcome {
    Continue,
    /// The player walked through the exit with the key
    ExitReached,
}

/// Narrowed door hitbox: the middle 8 units of the tile
pub fn door_rect(col: i32, row: i32) -> Rect {
    Rect::new(col as f32 * TILE + 4.0, row as f32 * TILE, 8.0, TILE)
}

/// Descending with feet above the enemy's midpoint (with a little slack)
pub fn is_stomp(player: &Rect, player_vy: f32, enemy: &Rect) -> bool {
    player_vy > 0.0 && player.bottom() - STOMP_TOLERANCE < enemy.center_y()
}

/// Resolve player vs enemies, collectibles and the exit door
pub fn interact(
    player: &mut Player,
    enemies: &mut [Enemy],
    collectibles: &mut [Collectible],
    grid: &TileGrid,
    events: &mut Vec<GameEvent>,
) -> InteractionOutcome {
    for enemy in enemies.iter_mut().filter(|e| e.alive) {
        let player_rect = player.body.rect();
        let enemy_rect = enemy.body.rect();
        if !player_rect.intersects(&enemy_rect) {
            continue;
        }
        if is_stomp(&player_rect, player.body.vel.y, &enemy_rect) {
            enemy.hit(events);
            player.body.vel.y = JUMP_FORCE * STOMP_BOUNCE;
            player.score += STOMP_SCORE;
        } else {
            player.hurt(events);
        }
    }

    let player_rect = player.body.rect();
    for item in collectibles.iter_mut().filter(|c| !c.collected) {
        if player_rect.intersects(&item.rect()) {
            item.collect(player, events);
        }
    }

    if player.has_key {
        let player_rect = player.body.rect();
        if grid
            .doors()
            .any(|(col, row)| player_rect.intersects(&door_rect(col, row)))
        {
            return InteractionOutcome::ExitReached;
        }
    }

    InteractionOutcome::Continue
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::collectible::CollectibleKind;
    use glam::Vec2;

    fn open_grid() -> TileGrid {
        TileGrid::from_rows(&["0000000000"; 8]).0
    }

    /// Player whose feet sit `above_mid` units above the slime's midpoint
    fn setup(above_mid: f32, vy: f32) -> (Player, Enemy) {
        let slime = Enemy::slime(Vec2::new(40.0, 60.0));
        let mid = slime.body.rect().center_y();
        let mut player = Player::new(Vec2::new(40.0, mid - above_mid - PLAYER_H));
        player.body.vel.y = vy;
        (player, slime)
    }

    #[test]
    fn test_stomp_damages_enemy_and_bounces() {
        let (mut player, slime) = setup(2.0, 3.0);
        let mut enemies = vec![slime];
        let mut events = Vec::new();
        let outcome = interact(&mut player, &mut enemies, &mut [], &open_grid(), &mut events);
        assert_eq!(outcome, InteractionOutcome::Continue);
        assert!(!enemies[0].alive);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
        assert_eq!(player.body.vel.y, JUMP_FORCE * STOMP_BOUNCE);
        assert_eq!(player.score, STOMP_SCORE);
    }

    #[test]
    fn test_rising_contact_hurts_player() {
        let (mut player, slime) = setup(2.0, -3.0);
        let mut enemies = vec![slime];
        let mut events = Vec::new();
        interact(&mut player, &mut enemies, &mut [], &open_grid(), &mut events);
        assert!(enemies[0].alive);
        assert_eq!(player.health, PLAYER_MAX_HEALTH - 1);
    }

    #[test]
    fn test_side_contact_hurts_player() {
        let mut slime = Enemy::slime(Vec2::new(40.0, 60.0));
        slime.body.pos.x = 50.0;
        let mut player = Player::new(Vec2::new(40.0, 72.0 - PLAYER_H));
        player.body.vel.y = 0.0;
        let mut enemies = vec![slime];
        let mut events = Vec::new();
        interact(&mut player, &mut enemies, &mut [], &open_grid(), &mut events);
        assert!(enemies[0].alive);
        assert_eq!(player.health, PLAYER_MAX_HEALTH - 1);
        assert!(events.iter().any(|e| matches!(e, GameEvent::PlayerHurt { .. })));
    }

    #[test]
    fn test_invincible_player_ignores_side_contact() {
        let mut slime = Enemy::slime(Vec2::new(50.0, 60.0));
        slime.body.vel.x = 0.0;
        let mut player = Player::new(Vec2::new(40.0, 72.0 - PLAYER_H));
        player.invincible_ticks = 10;
        let mut enemies = vec![slime];
        let mut events = Vec::new();
        interact(&mut player, &mut enemies, &mut [], &open_grid(), &mut events);
        assert!(enemies[0].alive);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_boss_needs_five_stomps_then_stops_interacting() {
        let grid = open_grid();
        let mut enemies = vec![Enemy::boss(Vec2::new(40.0, 60.0))];
        let mid = enemies[0].body.rect().center_y();
        let mut events = Vec::new();
        let mut player = Player::new(Vec2::new(40.0, mid - 2.0 - PLAYER_H));

        for stomp in 1..=BOSS_HEALTH {
            player.body.vel.y = 2.0;
            interact(&mut player, &mut enemies, &mut [], &grid, &mut events);
            assert_eq!(enemies[0].health, BOSS_HEALTH - stomp);
        }
        assert!(!enemies[0].alive);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);

        // Overlapping a dead boss from the side does nothing
        let pos = enemies[0].body.pos;
        player.body.vel.y = -1.0;
        interact(&mut player, &mut enemies, &mut [], &grid, &mut events);
        assert_eq!(player.health, PLAYER_MAX_HEALTH);

        let target = Player::new(Vec2::new(200.0, 0.0));
        enemies[0].update(&grid, &target, &mut events);
        assert_eq!(enemies[0].body.pos, pos);
    }

    #[test]
    fn test_collectibles_collected_once() {
        let mut player = Player::new(Vec2::new(10.0, 10.0));
        let mut items = vec![
            Collectible::new(CollectibleKind::Coin, Vec2::new(12.0, 12.0), 0.0),
            Collectible::new(CollectibleKind::Coin, Vec2::new(100.0, 12.0), 0.0),
        ];
        let mut events = Vec::new();
        let grid = open_grid();
        interact(&mut player, &mut [], &mut items, &grid, &mut events);
        interact(&mut player, &mut [], &mut items, &grid, &mut events);
        assert_eq!(player.coins, 1);
        assert!(items[0].collected);
        assert!(!items[1].collected);
    }

    #[test]
    fn test_exit_requires_key_and_narrow_hitbox() {
        let (grid, _) = TileGrid::from_rows(&["0000", "0060", "0070"]);
        // Door column spans x 32..48; hitbox is 36..44
        let mut player = Player::new(Vec2::new(20.0, 16.0));
        let mut events = Vec::new();
        assert_eq!(
            interact(&mut player, &mut [], &mut [], &grid, &mut events),
            InteractionOutcome::Continue
        );

        player.has_key = true;
        // Right edge at 34: inside the tile but short of the hitbox
        assert_eq!(
            interact(&mut player, &mut [], &mut [], &grid, &mut events),
            InteractionOutcome::Continue
        );

        player.body.pos.x = 24.0;
        assert_eq!(
            interact(&mut player, &mut [], &mut [], &grid, &mut events),
            InteractionOutcome::ExitReached
        );
    }
}
