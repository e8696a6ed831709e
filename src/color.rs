//! Color helpers: hex decoding, HSL conversion and the site palette.

use glam::Vec3;

/// Site palette as `0xRRGGBB` values.
pub mod palette {
    pub const TEAL: u32 = 0x4db6ac;
    pub const BLUE: u32 = 0x5c9bd5;
    pub const GREEN: u32 = 0x7cb342;
    pub const PURPLE: u32 = 0x9575cd;
    pub const AMBER: u32 = 0xffca28;
    pub const CYAN: u32 = 0x00ffff;
    pub const WHITE: u32 = 0xffffff;
    /// Page background behind the rain overlay.
    pub const NIGHT: u32 = 0x000814;
}

/// Decode `0xRRGGBB` into linear 0-1 channels.
pub fn rgb(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

/// Convert HSL to RGB.
///
/// * `h` - hue, 0.0 to 1.0 (wraps)
/// * `s` - saturation, clamped to 0-1
/// * `l` - lightness, clamped to 0-1
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Vec3::splat(l);
    }

    let p = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let q = 2.0 * l - p;

    Vec3::new(
        hue_to_channel(q, p, h + 1.0 / 3.0),
        hue_to_channel(q, p, h),
        hue_to_channel(q, p, h - 1.0 / 3.0),
    )
    .clamp(Vec3::ZERO, Vec3::ONE)
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Hue of an RGB color, 0.0 to 1.0.
pub fn hue_of(color: Vec3) -> f32 {
    let max = color.max_element();
    let min = color.min_element();
    let d = max - min;
    if d == 0.0 {
        return 0.0;
    }
    let h = if max == color.x {
        (color.y - color.z) / d + if color.y < color.z { 6.0 } else { 0.0 }
    } else if max == color.y {
        (color.z - color.x) / d + 2.0
    } else {
        (color.x - color.y) / d + 4.0
    };
    h / 6.0
}

/// Clamp every channel into the displayable range.
#[inline]
pub fn saturate(color: Vec3) -> Vec3 {
    color.clamp(Vec3::ZERO, Vec3::ONE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-3
    }

    #[test]
    fn test_rgb_decodes_hex() {
        let teal = rgb(palette::TEAL);
        assert!(close(teal, Vec3::new(77.0 / 255.0, 182.0 / 255.0, 172.0 / 255.0)));
        assert_eq!(rgb(palette::WHITE), Vec3::ONE);
    }

    #[test]
    fn test_hsl_primaries() {
        assert!(close(hsl_to_rgb(0.0, 1.0, 0.5), Vec3::new(1.0, 0.0, 0.0)));
        assert!(close(hsl_to_rgb(1.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 1.0, 0.0)));
        assert!(close(hsl_to_rgb(2.0 / 3.0, 1.0, 0.5), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_hsl_gray_and_wrap() {
        assert!(close(hsl_to_rgb(0.3, 0.0, 0.25), Vec3::splat(0.25)));
        assert!(close(hsl_to_rgb(1.25, 1.0, 0.5), hsl_to_rgb(0.25, 1.0, 0.5)));
    }

    #[test]
    fn test_hue_of_cyan() {
        assert!((hue_of(rgb(palette::CYAN)) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_hsl_channels_in_range() {
        for i in 0..100 {
            let c = hsl_to_rgb(i as f32 / 37.0, 1.3, i as f32 / 99.0);
            assert!(c.min_element() >= 0.0 && c.max_element() <= 1.0);
        }
    }
}
