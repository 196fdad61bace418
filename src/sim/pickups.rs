//! Power-up spawning, collection and effects

use glam::Vec3;
use rand::Rng;

use super::scenery::colors;
use super::state::{GameEvent, GameState, Pickup, PickupKind};
use super::timers::DeferredAction;
use crate::consts::*;

/// Where a pickup appears when there is no pipe to align with
pub const DEFAULT_PICKUP_POS: Vec3 = Vec3::new(SPAWN_X, 0.0, 0.0);

/// Roll for a pickup after an obstacle spawn
pub fn maybe_spawn(state: &mut GameState) -> bool {
    if !state.rng.random_bool(PICKUP_CHANCE) {
        return false;
    }
    let kind = PickupKind::ALL[state.rng.random_range(0..PickupKind::ALL.len())];
    spawn(state, kind);
    true
}

/// Place a pickup of `kind` in the newest gap
pub fn spawn(state: &mut GameState, kind: PickupKind) {
    let pos = state
        .pipes
        .last()
        .map(|p| Vec3::new(p.x, p.gap_center, 0.0))
        .unwrap_or(DEFAULT_PICKUP_POS);
    let id = state.next_entity_id();
    log::debug!("Spawned {:?} pickup {} at y={:.2}", kind, id, pos.y);
    state.pickups.push(Pickup {
        id,
        kind,
        pos,
        spin: 0.0,
        active: true,
    });
}

/// Scroll, spin, collect and recycle pickups
pub fn advance(state: &mut GameState) {
    let speed = state.settings.speed;
    let bird_box = state.bird.aabb();

    let mut collected = Vec::new();
    for pickup in state.pickups.iter_mut() {
        pickup.pos.x -= speed;
        pickup.spin += PICKUP_SPIN;
        if pickup.active && pickup.aabb().intersects(&bird_box) {
            pickup.active = false;
            collected.push((pickup.kind, pickup.pos));
        }
    }
    state
        .pickups
        .retain(|p| p.active && p.pos.x >= DESPAWN_X);

    for (kind, pos) in collected {
        apply(state, kind);
        let color = colors::pickup(kind);
        state.scenery.burst(&mut state.rng, pos, color, 12);
    }
}

/// Apply a pickup's effect to the session
pub fn apply(state: &mut GameState, kind: PickupKind) {
    log::info!("Collected {:?}", kind);
    match kind {
        PickupKind::Shield => {
            // Visual only; collisions still end the run
            state.bird.shielded = true;
            let pending = state
                .scheduler
                .extend(SHIELD_DURATION, |a| *a == DeferredAction::EndShield);
            if pending.is_none() {
                state
                    .scheduler
                    .schedule(SHIELD_DURATION, DeferredAction::EndShield);
            }
        }
        PickupKind::SlowTime => {
            // At most one restore is queued; it keeps the pre-effect speed
            let pending = state.scheduler.extend(SLOW_TIME_DURATION, |a| {
                matches!(a, DeferredAction::RestoreSpeed(_))
            });
            let original = match pending {
                Some(DeferredAction::RestoreSpeed(speed)) => speed,
                _ => {
                    let speed = state.settings.speed;
                    state
                        .scheduler
                        .schedule(SLOW_TIME_DURATION, DeferredAction::RestoreSpeed(speed));
                    speed
                }
            };
            state.settings.speed = original * SLOW_TIME_FACTOR;
        }
        PickupKind::ExtraLife => {
            state.score += EXTRA_LIFE_BONUS;
            state.events.push(GameEvent::Score);
        }
    }
    state.events.push(GameEvent::PickupCollected(kind));
}

/// Run an expired deferred effect
pub fn expire(state: &mut GameState, action: DeferredAction) {
    match action {
        DeferredAction::EndShield => state.bird.shielded = false,
        DeferredAction::RestoreSpeed(speed) => state.settings.speed = speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::obstacles;
    use crate::sim::state::GamePhase;

    #[test]
    fn test_spawn_aligns_with_newest_gap() {
        let mut state = GameState::new(3);
        obstacles::spawn_pair_at(&mut state, -1.0);
        obstacles::spawn_pair_at(&mut state, 0.75);
        spawn(&mut state, PickupKind::Shield);
        let pickup = &state.pickups[0];
        assert_eq!(pickup.pos, Vec3::new(SPAWN_X, 0.75, 0.0));
    }

    #[test]
    fn test_spawn_without_pipes_uses_default() {
        let mut state = GameState::new(3);
        spawn(&mut state, PickupKind::SlowTime);
        assert_eq!(state.pickups[0].pos, DEFAULT_PICKUP_POS);
    }

    #[test]
    fn test_spawn_rate_is_small() {
        let mut state = GameState::new(11);
        let spawned = (0..2000).filter(|_| maybe_spawn(&mut state)).count();
        assert!((100..=300).contains(&spawned), "spawned {}", spawned);
    }

    #[test]
    fn test_extra_life_adds_bonus_only() {
        let mut state = GameState::new(3);
        state.phase = GamePhase::Running;
        state.score = 3;
        let bird_before = state.bird.clone();
        let settings_before = state.settings;
        apply(&mut state, PickupKind::ExtraLife);
        assert_eq!(state.score, 8);
        assert_eq!(state.settings, settings_before);
        assert_eq!(state.bird.pos, bird_before.pos);
        assert!(!state.bird.shielded);
        assert!(state.scheduler.deferred.is_empty());
        assert_eq!(
            state.drain_events(),
            vec![GameEvent::Score, GameEvent::PickupCollected(PickupKind::ExtraLife)]
        );
    }

    #[test]
    fn test_slow_time_restores_captured_speed() {
        let mut state = GameState::new(3);
        state.settings.speed = 0.06;
        apply(&mut state, PickupKind::SlowTime);
        assert!((state.settings.speed - 0.03).abs() < 1e-7);

        // A slider change mid-effect is overwritten by the captured value
        state.settings.speed = 0.09;
        for action in state.scheduler.advance_deferred(SLOW_TIME_DURATION) {
            expire(&mut state, action);
        }
        assert_eq!(state.settings.speed, 0.06);
    }

    #[test]
    fn test_overlapping_slow_time_restores_original() {
        let mut state = GameState::new(3);
        state.settings.speed = 0.05;
        apply(&mut state, PickupKind::SlowTime);
        for action in state.scheduler.advance_deferred(1.0) {
            expire(&mut state, action);
        }
        apply(&mut state, PickupKind::SlowTime);
        // Not halved twice, and only one restore pending
        assert!((state.settings.speed - 0.025).abs() < 1e-7);
        assert_eq!(state.scheduler.deferred.len(), 1);

        // The second pickup pushed the deadline back
        for action in state.scheduler.advance_deferred(SLOW_TIME_DURATION - 0.5) {
            expire(&mut state, action);
        }
        assert!((state.settings.speed - 0.025).abs() < 1e-7);

        for action in state.scheduler.advance_deferred(20.0) {
            expire(&mut state, action);
        }
        assert_eq!(state.settings.speed, 0.05);
        assert!(state.scheduler.deferred.is_empty());
    }

    #[test]
    fn test_second_shield_extends_first() {
        let mut state = GameState::new(3);
        apply(&mut state, PickupKind::Shield);
        for action in state.scheduler.advance_deferred(4.0) {
            expire(&mut state, action);
        }
        apply(&mut state, PickupKind::Shield);
        for action in state.scheduler.advance_deferred(2.0) {
            expire(&mut state, action);
        }
        assert!(state.bird.shielded);
        assert_eq!(state.scheduler.deferred.len(), 1);
    }

    #[test]
    fn test_shield_is_temporary() {
        let mut state = GameState::new(3);
        apply(&mut state, PickupKind::Shield);
        assert!(state.bird.shielded);
        for action in state.scheduler.advance_deferred(SHIELD_DURATION + 0.01) {
            expire(&mut state, action);
        }
        assert!(!state.bird.shielded);
    }

    #[test]
    fn test_collection_happens_once() {
        let mut state = GameState::new(3);
        state.score = 0;
        spawn(&mut state, PickupKind::ExtraLife);
        // Park the pickup on the bird
        state.pickups[0].pos = state.bird.pos + Vec3::new(state.settings.speed, 0.0, 0.0);
        advance(&mut state);
        assert_eq!(state.score, EXTRA_LIFE_BONUS);
        assert!(state.pickups.is_empty());
        advance(&mut state);
        assert_eq!(state.score, EXTRA_LIFE_BONUS);
        assert!(!state.scenery.particles.is_empty());
    }

    #[test]
    fn test_pickups_recycle_past_cutoff() {
        let mut state = GameState::new(3);
        spawn(&mut state, PickupKind::Shield);
        state.pickups[0].pos.x = DESPAWN_X;
        advance(&mut state);
        assert!(state.pickups.is_empty());
        assert!(!state.bird.shielded);
    }
}
