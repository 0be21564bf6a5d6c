//! Canvas 2D drawing for both simulations.
//!
//! Draw order for the background follows the update order in `sim::tick`:
//! 1. Overwash (trail effect instead of a hard clear)
//! 2. Nebulae, stars, asteroids
//! 3. Shooting stars, embers

use std::f64::consts::TAU;

use web_sys::CanvasRenderingContext2d;

use super::color::{ASTEROID_FILL, TRANSPARENT, hsla, rgba};
use super::shapes::asteroid_outline;
use crate::sim::{Background, Orb, OrbField};

/// Draw one background frame
pub fn draw_background(ctx: &CanvasRenderingContext2d, bg: &Background) {
    let (w, h) = (bg.bounds.x as f64, bg.bounds.y as f64);
    let (r, g, b) = bg.tuning.overwash_rgb;
    ctx.set_fill_style_str(&rgba(r, g, b, bg.tuning.overwash_alpha));
    ctx.fill_rect(0.0, 0.0, w, h);

    draw_nebulae(ctx, bg);
    draw_stars(ctx, bg);
    draw_asteroids(ctx, bg);
    draw_shooting_stars(ctx, bg);
    draw_embers(ctx, bg);
}

fn draw_nebulae(ctx: &CanvasRenderingContext2d, bg: &Background) {
    for n in &bg.nebulae {
        let (x, y, r) = (n.pos.x as f64, n.pos.y as f64, n.radius as f64);
        let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
            continue;
        };
        let _ = gradient.add_color_stop(0.0, &hsla(n.hue, 80.0, 50.0, n.opacity));
        let _ = gradient.add_color_stop(0.5, &hsla(n.hue, 60.0, 30.0, n.opacity * 0.5));
        let _ = gradient.add_color_stop(1.0, TRANSPARENT);
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(x - r, y - r, r * 2.0, r * 2.0);
    }
}

fn draw_stars(ctx: &CanvasRenderingContext2d, bg: &Background) {
    for star in &bg.stars {
        ctx.begin_path();
        let _ = ctx.arc(star.pos.x as f64, star.pos.y as f64, star.size as f64, 0.0, TAU);
        ctx.set_fill_style_str(&rgba(255, 255, 255, star.brightness()));
        ctx.fill();
    }
}

fn draw_asteroids(ctx: &CanvasRenderingContext2d, bg: &Background) {
    for a in &bg.asteroids {
        ctx.save();
        let _ = ctx.translate(a.pos.x as f64, a.pos.y as f64);
        let _ = ctx.rotate(a.rotation as f64);
        ctx.set_global_alpha(a.opacity as f64);

        ctx.begin_path();
        for (i, p) in asteroid_outline(a.size, bg.tuning.asteroid_vertices).iter().enumerate() {
            if i == 0 {
                ctx.move_to(p.x as f64, p.y as f64);
            } else {
                ctx.line_to(p.x as f64, p.y as f64);
            }
        }
        ctx.close_path();
        ctx.set_fill_style_str(ASTEROID_FILL);
        ctx.fill();

        ctx.restore();
    }
}

fn draw_shooting_stars(ctx: &CanvasRenderingContext2d, bg: &Background) {
    for s in &bg.shooting_stars {
        let (x, y) = (s.pos.x as f64, s.pos.y as f64);
        let tail = s.tail();
        let (tx, ty) = (tail.x as f64, tail.y as f64);

        let gradient = ctx.create_linear_gradient(x, y, tx, ty);
        let _ = gradient.add_color_stop(0.0, &rgba(255, 255, 255, s.opacity));
        let _ = gradient.add_color_stop(1.0, TRANSPARENT);

        ctx.begin_path();
        ctx.move_to(x, y);
        ctx.line_to(tx, ty);
        ctx.set_stroke_style_canvas_gradient(&gradient);
        ctx.set_line_width(2.0);
        ctx.stroke();

        // Head glow
        ctx.begin_path();
        let _ = ctx.arc(x, y, 3.0, 0.0, TAU);
        ctx.set_fill_style_str(&rgba(255, 255, 255, s.opacity));
        ctx.fill();
    }
}

fn draw_embers(ctx: &CanvasRenderingContext2d, bg: &Background) {
    for e in &bg.embers {
        let (x, y, size) = (e.pos.x as f64, e.pos.y as f64, e.size as f64);
        let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, size * 2.0) else {
            continue;
        };
        let _ = gradient.add_color_stop(0.0, &hsla(e.hue, 100.0, 70.0, e.opacity));
        let _ = gradient.add_color_stop(1.0, TRANSPARENT);

        ctx.begin_path();
        let _ = ctx.arc(x, y, size, 0.0, TAU);
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();
    }
}

/// Draw one orb frame (hard clear, the orb canvas is transparent)
pub fn draw_orbs(ctx: &CanvasRenderingContext2d, field: &OrbField) {
    ctx.clear_rect(0.0, 0.0, field.bounds.x as f64, field.bounds.y as f64);
    for orb in field.orbs.iter().filter(|o| !o.is_collecting()) {
        draw_orb(ctx, orb);
    }
}

fn draw_orb(ctx: &CanvasRenderingContext2d, orb: &Orb) {
    let (x, y, r) = (orb.pos.x as f64, orb.pos.y as f64, orb.radius.max(0.0) as f64);

    if let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, r) {
        let _ = gradient.add_color_stop(0.0, &hsla(orb.hue, 100.0, 70.0, orb.alpha));
        let _ = gradient.add_color_stop(0.5, &hsla(orb.hue, 80.0, 50.0, orb.alpha * 0.5));
        let _ = gradient.add_color_stop(1.0, &hsla(orb.hue, 60.0, 30.0, 0.0));
        ctx.begin_path();
        let _ = ctx.arc(x, y, r, 0.0, TAU);
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();
    }

    // Inner glow
    ctx.begin_path();
    let _ = ctx.arc(x, y, r * 0.3, 0.0, TAU);
    ctx.set_fill_style_str(&hsla(orb.hue, 100.0, 90.0, orb.alpha * 0.8));
    ctx.fill();
}
