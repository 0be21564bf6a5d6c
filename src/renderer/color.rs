//! CSS color strings for canvas fill/stroke styles

/// `hsla(h, s%, l%, a)`
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> String {
    format!(
        "hsla({:.1}, {:.0}%, {:.0}%, {:.3})",
        hue,
        saturation,
        lightness,
        alpha.clamp(0.0, 1.0)
    )
}

/// `rgba(r, g, b, a)`
pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> String {
    format!("rgba({}, {}, {}, {:.3})", r, g, b, alpha.clamp(0.0, 1.0))
}

pub const TRANSPARENT: &str = "rgba(0, 0, 0, 0)";
/// Asteroid body color
pub const ASTEROID_FILL: &str = "#4a4a6a";
