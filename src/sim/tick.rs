//! Fixed timestep simulation tick
//!
//! One call advances a world by one 60 Hz tick. Drawing is not involved.

use glam::Vec2;
use rand::Rng;

use super::collision::wrap_position;
use super::state::{Background, Ember, OrbField, OrbPhase, ShootingStar, sample};
use crate::wrap_coord;

/// Advance the orb field by one tick.
///
/// Idle orbs are pulled toward the pointer, integrated, damped, pulsed and
/// wrapped. Collecting orbs grow and fade, and are reseeded once faded out.
pub fn tick_orbs(field: &mut OrbField) {
    let bounds = field.bounds;
    let pointer = field.pointer;
    let t = field.tuning.clone();
    let mut faded = Vec::new();

    for (slot, orb) in field.orbs.iter_mut().enumerate() {
        if orb.phase == OrbPhase::Collecting {
            orb.radius *= t.collect_growth;
            orb.alpha *= t.collect_fade;
            if orb.alpha < t.collect_reset_alpha {
                faded.push(slot);
            }
            continue;
        }

        if let Some(pointer) = pointer {
            let delta = pointer - orb.pos;
            let dist = delta.length();
            if dist < t.attraction_radius && dist > t.attraction_min_dist {
                orb.vel += delta / dist * t.attraction_strength;
            }
        }

        orb.pos += orb.vel;
        orb.vel *= t.damping;

        // Pulse before wrapping so the margin matches the radius drawn this frame
        orb.pulse += t.pulse_rate;
        orb.radius = orb.base_radius + orb.pulse.sin() * t.pulse_amplitude;

        orb.pos = wrap_position(orb.pos, bounds, orb.radius);
    }

    for slot in faded {
        log::debug!("Orb {} faded out, reseeding", field.orbs[slot].id);
        field.reseed(slot);
    }
}

/// Advance the background by one tick, in draw order.
pub fn tick_background(bg: &mut Background) {
    let bounds = bg.bounds;
    let t = bg.tuning.clone();

    for n in bg.nebulae.iter_mut() {
        n.pos.x = wrap_coord(n.pos.x + n.drift, bounds.x, n.radius);
    }

    for i in 0..bg.stars.len() {
        let reroll = {
            let star = &mut bg.stars[i];
            star.pos.y += star.speed;
            star.twinkle += t.star_twinkle_rate;
            star.pos.y > bounds.y
        };
        if reroll {
            let x = bg.rng().random::<f32>() * bounds.x;
            let star = &mut bg.stars[i];
            star.pos = Vec2::new(x, 0.0);
        }
    }

    for i in 0..bg.asteroids.len() {
        let reroll = {
            let a = &mut bg.asteroids[i];
            a.pos.y += a.speed;
            a.pos.x += a.speed * t.asteroid_drift_ratio;
            a.rotation += a.rotation_speed;
            a.pos.y > bounds.y + a.size
        };
        let x = if reroll {
            Some(bg.rng().random::<f32>() * bounds.x)
        } else {
            None
        };
        let a = &mut bg.asteroids[i];
        if let Some(x) = x {
            a.pos = Vec2::new(x, -a.size);
        }
        a.pos.x = wrap_coord(a.pos.x, bounds.x, a.size);
    }

    spawn_shooting_star(bg);
    for s in bg.shooting_stars.iter_mut() {
        s.pos += s.direction() * s.speed;
        s.opacity -= t.shooting_star_fade;
    }
    bg.shooting_stars
        .retain(|s| s.opacity > 0.0 && s.pos.y <= bounds.y && s.pos.x <= bounds.x);

    if bg.embers_enabled {
        spawn_ember(bg);
    }
    for e in bg.embers.iter_mut() {
        e.pos.y -= e.speed;
        e.pos.x += (e.pos.y * t.ember_sway_freq).sin() * t.ember_sway;
        e.opacity -= t.ember_fade;
    }
    let top = -t.ember_margin;
    bg.embers.retain(|e| e.opacity > 0.0 && e.pos.y >= top);
}

fn spawn_shooting_star(bg: &mut Background) {
    let t = &bg.tuning;
    if bg.shooting_stars.len() >= t.shooting_star_max {
        return;
    }
    let (chance, length, speed, angle, jitter) = (
        t.shooting_star_chance,
        t.shooting_star_length,
        t.shooting_star_speed,
        t.shooting_star_angle,
        t.shooting_star_angle_jitter,
    );
    let width = bg.bounds.x;

    let rng = bg.rng();
    if rng.random::<f32>() >= chance {
        return;
    }
    let star = ShootingStar {
        pos: Vec2::new(rng.random::<f32>() * width, 0.0),
        length: sample(rng, length),
        speed: sample(rng, speed),
        angle: angle + (rng.random::<f32>() - 0.5) * 2.0 * jitter,
        opacity: 1.0,
    };
    bg.shooting_stars.push(star);
}

fn spawn_ember(bg: &mut Background) {
    let t = bg.tuning.clone();
    if bg.embers.len() >= t.ember_max {
        return;
    }
    let bounds = bg.bounds;

    let rng = bg.rng();
    if rng.random::<f32>() >= t.ember_chance {
        return;
    }
    let ember = Ember {
        pos: Vec2::new(rng.random::<f32>() * bounds.x, bounds.y + t.ember_margin),
        speed: sample(rng, t.ember_speed),
        size: sample(rng, t.ember_size),
        hue: sample(rng, t.ember_hue),
        opacity: sample(rng, t.ember_opacity),
    };
    bg.embers.push(ember);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::QualityPreset;
    use crate::sim::collision::click;
    use crate::settings::HitPolicy;
    use crate::tuning::{BackgroundTuning, OrbTuning};
    use crate::within_bounds;

    fn single_orb(pos: Vec2, vel: Vec2) -> OrbField {
        let tuning = OrbTuning {
            count: 1,
            ..OrbTuning::default()
        };
        let mut field = OrbField::new(11, 200.0, 200.0, tuning);
        let orb = &mut field.orbs[0];
        orb.pos = pos;
        orb.vel = vel;
        orb.radius = 10.0;
        orb.base_radius = 10.0;
        field
    }

    #[test]
    fn test_orb_drifts_one_tick() {
        let mut field = single_orb(Vec2::new(100.0, 100.0), Vec2::new(-5.0, 0.0));
        tick_orbs(&mut field);
        let orb = &field.orbs[0];
        assert!((orb.pos.x - 95.0).abs() < 1e-4);
        assert!((orb.pos.y - 100.0).abs() < 1e-4);
        // Damping applied after integration
        assert!((orb.vel.x - (-4.95)).abs() < 1e-4);
    }

    #[test]
    fn test_orb_wraps_left_edge_keeping_overshoot() {
        let mut field = single_orb(Vec2::new(-8.0, 100.0), Vec2::new(-5.0, 0.0));
        tick_orbs(&mut field);
        let orb = &field.orbs[0];
        // -13 with the pulsed radius r re-enters at 200 + r - (13 - r)
        let r = orb.radius;
        let expected = 200.0 + r - (13.0 - r);
        assert!((orb.pos.x - expected).abs() < 1e-3, "x = {}", orb.pos.x);
        assert!(within_bounds(orb.pos, field.bounds, r));
    }

    #[test]
    fn test_pointer_attraction_band() {
        // Inside the band: pulled toward the pointer
        let mut field = single_orb(Vec2::new(100.0, 100.0), Vec2::ZERO);
        field.pointer = Some(Vec2::new(200.0, 100.0));
        tick_orbs(&mut field);
        assert!(field.orbs[0].vel.x > 0.0);

        // Too close: no pull
        let mut field = single_orb(Vec2::new(100.0, 100.0), Vec2::ZERO);
        field.pointer = Some(Vec2::new(110.0, 100.0));
        tick_orbs(&mut field);
        assert_eq!(field.orbs[0].vel, Vec2::ZERO);

        // Too far: no pull
        let mut field = single_orb(Vec2::new(10.0, 10.0), Vec2::ZERO);
        field.pointer = Some(Vec2::new(190.0, 190.0));
        tick_orbs(&mut field);
        assert_eq!(field.orbs[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_pulse_oscillates_radius() {
        let mut field = single_orb(Vec2::new(100.0, 100.0), Vec2::ZERO);
        let mut min: f32 = f32::MAX;
        let mut max: f32 = f32::MIN;
        for _ in 0..200 {
            tick_orbs(&mut field);
            min = min.min(field.orbs[0].radius);
            max = max.max(field.orbs[0].radius);
        }
        assert!(min < 8.5 && min >= 8.0 - 1e-3);
        assert!(max > 11.5 && max <= 12.0 + 1e-3);
    }

    #[test]
    fn test_collecting_orb_fades_then_reseeds() {
        let mut field = single_orb(Vec2::new(100.0, 100.0), Vec2::ZERO);
        let old_id = field.orbs[0].id;
        let hits = click(&mut field, Vec2::new(100.0, 100.0), HitPolicy::All);
        assert_eq!(hits.len(), 1);

        let mut ticks = 0;
        while field.orbs[0].id == old_id {
            let before = field.orbs[0].alpha;
            tick_orbs(&mut field);
            if field.orbs[0].id == old_id {
                assert!(field.orbs[0].alpha < before);
                assert_eq!(field.orbs[0].pos, Vec2::new(100.0, 100.0));
            }
            ticks += 1;
            assert!(ticks < 200, "orb never reseeded");
        }

        let orb = &field.orbs[0];
        assert_eq!(orb.phase, OrbPhase::Idle);
        assert_eq!(field.orbs.len(), 1);
    }

    #[test]
    fn test_star_wraps_to_top() {
        let pools = QualityPreset::Medium.pool_sizes();
        let mut bg = Background::new(5, 300.0, 200.0, pools, BackgroundTuning::default());
        bg.stars[0].pos = Vec2::new(50.0, 199.9);
        bg.stars[0].speed = 0.5;
        tick_background(&mut bg);
        assert_eq!(bg.stars[0].pos.y, 0.0);
        assert!((0.0..300.0).contains(&bg.stars[0].pos.x));
    }

    #[test]
    fn test_asteroid_wraps_to_top() {
        let pools = QualityPreset::Medium.pool_sizes();
        let mut bg = Background::new(5, 300.0, 200.0, pools, BackgroundTuning::default());
        let a = &mut bg.asteroids[0];
        a.size = 5.0;
        a.speed = 0.5;
        a.pos = Vec2::new(100.0, 204.8);
        tick_background(&mut bg);
        assert_eq!(bg.asteroids[0].pos.y, -5.0);
    }

    #[test]
    fn test_transient_pools_are_capped_and_expire() {
        let tuning = BackgroundTuning {
            shooting_star_chance: 1.0,
            ember_chance: 1.0,
            ..BackgroundTuning::default()
        };
        let pools = QualityPreset::Medium.pool_sizes();
        let mut bg = Background::new(9, 800.0, 600.0, pools, tuning);
        for _ in 0..50 {
            tick_background(&mut bg);
            assert!(bg.shooting_stars.len() <= 3);
            assert!(bg.embers.len() <= 15);
        }
        assert!(!bg.embers.is_empty());
        for s in &bg.shooting_stars {
            assert!(s.opacity > 0.0);
        }
    }

    fn quiet_background() -> Background {
        let tuning = BackgroundTuning {
            shooting_star_chance: 0.0,
            ember_chance: 0.0,
            ..BackgroundTuning::default()
        };
        Background::new(9, 300.0, 200.0, QualityPreset::Medium.pool_sizes(), tuning)
    }

    fn streak(pos: Vec2, angle: f32) -> ShootingStar {
        ShootingStar {
            pos,
            length: 100.0,
            speed: 10.0,
            angle,
            opacity: 1.0,
        }
    }

    fn ember(y: f32) -> Ember {
        Ember {
            pos: Vec2::new(150.0, y),
            speed: 1.0,
            size: 3.0,
            hue: 200.0,
            opacity: 0.5,
        }
    }

    #[test]
    fn test_shooting_star_removed_past_right_edge() {
        let mut bg = quiet_background();
        bg.shooting_stars.push(streak(Vec2::new(295.0, 50.0), 0.0));
        bg.shooting_stars.push(streak(Vec2::new(100.0, 50.0), 0.0));
        tick_background(&mut bg);
        assert_eq!(bg.shooting_stars.len(), 1);
        assert!((bg.shooting_stars[0].pos.x - 110.0).abs() < 1e-3);
    }

    #[test]
    fn test_shooting_star_removed_past_bottom_edge() {
        let mut bg = quiet_background();
        let down = std::f32::consts::FRAC_PI_2;
        bg.shooting_stars.push(streak(Vec2::new(100.0, 195.0), down));
        tick_background(&mut bg);
        assert!(bg.shooting_stars.is_empty());
    }

    #[test]
    fn test_ember_removed_above_top_margin() {
        let mut bg = quiet_background();
        bg.embers.push(ember(-9.5));
        bg.embers.push(ember(5.0));
        tick_background(&mut bg);
        // -10.5 is past the margin, 4.0 is still on screen
        assert_eq!(bg.embers.len(), 1);
        assert!((bg.embers[0].pos.y - 4.0).abs() < 1e-3);
    }

    #[test]
    fn test_embers_disabled_on_low() {
        let tuning = BackgroundTuning {
            ember_chance: 1.0,
            ..BackgroundTuning::default()
        };
        let mut bg = Background::new(9, 800.0, 600.0, QualityPreset::Low.pool_sizes(), tuning);
        for _ in 0..20 {
            tick_background(&mut bg);
        }
        assert!(bg.embers.is_empty());
    }

    #[test]
    fn test_resize_keeps_entities() {
        let mut field = OrbField::new(1, 400.0, 300.0, OrbTuning::default());
        let before: Vec<_> = field.orbs.iter().map(|o| (o.id, o.pos)).collect();
        field.resize(800.0, 600.0);
        let after: Vec<_> = field.orbs.iter().map(|o| (o.id, o.pos)).collect();
        assert_eq!(before, after);
        assert_eq!(field.bounds, Vec2::new(800.0, 600.0));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;
        use std::collections::HashSet;

        proptest! {
            #[test]
            fn orbs_stay_in_bounds(
                seed in any::<u64>(),
                ticks in 1usize..400,
                px in -50.0f32..450.0,
                py in -50.0f32..350.0,
            ) {
                let mut field = OrbField::new(seed, 400.0, 300.0, OrbTuning::default());
                field.pointer = Some(Vec2::new(px, py));
                for _ in 0..ticks {
                    tick_orbs(&mut field);
                    for orb in field.orbs.iter().filter(|o| !o.is_collecting()) {
                        prop_assert!(within_bounds(orb.pos, field.bounds, orb.radius + 1e-3));
                    }
                }
            }

            #[test]
            fn background_pools_stay_in_bounds(seed in any::<u64>(), ticks in 1usize..600) {
                let pools = QualityPreset::Medium.pool_sizes();
                let mut bg = Background::new(seed, 320.0, 240.0, pools, BackgroundTuning::default());
                for _ in 0..ticks {
                    tick_background(&mut bg);
                }
                for s in &bg.stars {
                    prop_assert!(within_bounds(s.pos, bg.bounds, s.size));
                }
                for a in &bg.asteroids {
                    prop_assert!(within_bounds(a.pos, bg.bounds, a.size + 1e-3));
                }
                for n in &bg.nebulae {
                    prop_assert!(within_bounds(n.pos, bg.bounds, n.radius + 1e-3));
                }
                prop_assert_eq!(bg.stars.len(), 150);
                prop_assert_eq!(bg.asteroids.len(), 8);
            }

            #[test]
            fn a_click_never_double_credits(seed in any::<u64>(), x in 0.0f32..400.0, y in 0.0f32..300.0) {
                let mut field = OrbField::new(seed, 400.0, 300.0, OrbTuning::default());
                let first = click(&mut field, Vec2::new(x, y), HitPolicy::All);
                let second = click(&mut field, Vec2::new(x, y), HitPolicy::All);
                prop_assert!(second.is_empty());
                let ids: HashSet<_> = first.iter().map(|h| h.id).collect();
                prop_assert_eq!(ids.len(), first.len());
            }
        }
    }
}
