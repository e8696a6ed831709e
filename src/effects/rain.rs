//! Falling-glyph overlay rasterized on the CPU.
//!
//! The rain runs on a fixed step clock. Each step fades the whole surface a
//! little toward the night background, then stamps one glyph per column at
//! that column's drop position and moves the drop down.

use crate::color::{palette, rgb};
use crate::error::SnapshotError;
use crate::scene::Animated;
use crate::shaders::{MatrixRainUniforms, ShaderMaterial};
use crate::spawn::make_rng;
use image::{Rgba, RgbaImage};
use rand::rngs::SmallRng;
use rand::Rng;
use std::path::Path;

/// Symbols the rain draws from: math and Greek, binary, then alphanumerics.
pub const GLYPHS: &str = concat!(
    "ΑΒΓΔΕΖΗΘΙΚΛΜΝΞΟΠΡΣΤΥΦΧΨΩ←↑→↓∞∂∇∈∉∋∌∝∫∮∑∏∆{}[]()<>=+-*/\\|&^%$#@!?~`.,:;",
    "01101001011010100110",
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
);

const GLYPH_COLS: u32 = 5;
const GLYPH_ROWS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatrixRainConfig {
    /// Cell size in pixels; one column per cell.
    pub font_size: u32,
    /// Seconds between steps.
    pub step_interval: f32,
    /// Most steps run by one `advance`; any backlog beyond is dropped.
    pub max_catch_up: u32,
    pub fade_color: u32,
    pub fade_alpha: f32,
    pub glyph_color: u32,
    /// Chance per step that a drop past the bottom restarts at the top.
    pub reset_chance: f32,
    /// Chance per step of an extra random advance.
    pub jitter_chance: f32,
    pub jitter_max: f32,
    /// Drops start up to this many cells above the top edge.
    pub start_depth: f32,
    /// Initial surface size. Zero waits for the first resize.
    pub width: u32,
    pub height: u32,
    pub seed: Option<u64>,
}

impl Default for MatrixRainConfig {
    fn default() -> Self {
        Self {
            font_size: 12,
            step_interval: 0.05,
            max_catch_up: 4,
            fade_color: palette::NIGHT,
            fade_alpha: 0.08,
            glyph_color: palette::TEAL,
            reset_chance: 0.025,
            jitter_chance: 0.05,
            jitter_max: 2.0,
            start_depth: 100.0,
            width: 0,
            height: 0,
            seed: None,
        }
    }
}

pub struct MatrixRain {
    config: MatrixRainConfig,
    surface: RgbaImage,
    /// Drop position per column, in cells from the top.
    drops: Vec<f32>,
    glyphs: Vec<char>,
    rng: SmallRng,
    accumulator: f32,
    steps: u64,
    material: ShaderMaterial,
}

impl MatrixRain {
    pub fn new(config: MatrixRainConfig) -> Self {
        let mut rain = Self {
            surface: RgbaImage::new(0, 0),
            drops: Vec::new(),
            glyphs: GLYPHS.chars().collect(),
            rng: make_rng(config.seed),
            accumulator: 0.0,
            steps: 0,
            material: MatrixRainUniforms {
                time: 0.0,
                color: rgb(config.glyph_color),
            }
            .into(),
            config,
        };
        rain.resize(config.width, config.height);
        rain
    }

    pub fn surface(&self) -> &RgbaImage {
        &self.surface
    }

    pub fn drops(&self) -> &[f32] {
        &self.drops
    }

    /// Steps run since creation.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn material(&self) -> &ShaderMaterial {
        &self.material
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Resizing clears the surface, like a canvas does.
        self.surface = RgbaImage::new(width, height);

        let columns = if self.config.font_size == 0 {
            0
        } else {
            (width / self.config.font_size) as usize
        };
        let depth = self.config.start_depth;
        let rng = &mut self.rng;
        self.drops
            .resize_with(columns, || rng.gen::<f32>() * -depth);
    }

    fn is_empty(&self) -> bool {
        self.surface.width() == 0 || self.surface.height() == 0
    }

    /// Run one fade-draw-move step.
    pub fn step(&mut self) {
        if self.is_empty() {
            return;
        }

        let fade = channels(self.config.fade_color);
        let alpha = self.config.fade_alpha;
        for pixel in self.surface.pixels_mut() {
            blend_over(pixel, fade, alpha);
        }

        let size = self.config.font_size as f32;
        let height = self.surface.height() as f32;
        let glyph_color = channels(self.config.glyph_color);
        for i in 0..self.drops.len() {
            let glyph = self.glyphs[self.rng.gen_range(0..self.glyphs.len())];
            let x = i as u32 * self.config.font_size;
            let baseline = self.drops[i] * size;
            stamp_glyph(&mut self.surface, glyph, x, baseline, self.config.font_size, glyph_color);

            let drop = &mut self.drops[i];
            if *drop * size > height && self.rng.gen::<f32>() < self.config.reset_chance {
                *drop = 0.0;
            }
            *drop += 1.0;
            if self.rng.gen::<f32>() < self.config.jitter_chance {
                *drop += self.rng.gen::<f32>() * self.config.jitter_max;
            }
        }

        self.steps += 1;
    }

    /// Write the current surface as an image file; the format follows the
    /// extension.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<(), SnapshotError> {
        if self.is_empty() {
            return Err(SnapshotError::EmptySurface);
        }
        self.surface.save(path.as_ref())?;
        log::info!("Saved rain snapshot to {}", path.as_ref().display());
        Ok(())
    }
}

impl Animated for MatrixRain {
    fn name(&self) -> &str {
        "matrix-rain"
    }

    fn advance(&mut self, elapsed: f64, delta: f32) {
        self.material.set_time(elapsed);
        if self.is_empty() || self.config.step_interval <= 0.0 {
            return;
        }

        self.accumulator += delta;
        let mut ran = 0;
        while self.accumulator >= self.config.step_interval && ran < self.config.max_catch_up {
            self.step();
            self.accumulator -= self.config.step_interval;
            ran += 1;
        }
        if self.accumulator >= self.config.step_interval {
            log::trace!("Rain dropped {:.3}s of backlog", self.accumulator);
            self.accumulator %= self.config.step_interval;
        }
    }

    fn on_resize(&mut self, width: u32, height: u32) {
        log::debug!("Rain surface resized to {}x{}", width, height);
        self.resize(width, height);
    }

    fn listens_for_resize(&self) -> bool {
        true
    }
}

fn channels(hex: u32) -> [u8; 3] {
    [(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]
}

/// Source-over composite of a flat color onto one pixel.
fn blend_over(pixel: &mut Rgba<u8>, color: [u8; 3], alpha: f32) {
    let alpha = alpha.clamp(0.0, 1.0);
    let dst_alpha = pixel[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        *pixel = Rgba([0, 0, 0, 0]);
        return;
    }

    for c in 0..3 {
        let value =
            (color[c] as f32 * alpha + pixel[c] as f32 * dst_alpha * (1.0 - alpha)) / out_alpha;
        pixel[c] = value.round().clamp(0.0, 255.0) as u8;
    }
    pixel[3] = (out_alpha * 255.0).round() as u8;
}

/// 5x7 bit pattern for a glyph, row-major from the top-left bit.
///
/// Shapes are hashed from the code point rather than taken from a font, so
/// every symbol gets a stable but abstract pattern.
fn glyph_bits(glyph: char) -> u64 {
    let mut x = glyph as u64 ^ 0x9e37_79b9_7f4a_7c15;
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^= x >> 31;
    let mask = (1u64 << (GLYPH_COLS * GLYPH_ROWS)) - 1;
    // Keep the center column so no glyph is blank.
    (x & mask) | 0b00100_00100_00100_00100_00100_00100_00100
}

/// Draw `glyph` in the cell whose bottom edge sits at `baseline`.
fn stamp_glyph(surface: &mut RgbaImage, glyph: char, x: u32, baseline: f32, size: u32, color: [u8; 3]) {
    let block = (size / (GLYPH_ROWS + 1)).max(1);
    let left = x as i64 + ((size.saturating_sub(GLYPH_COLS * block)) / 2) as i64;
    let top = baseline.floor() as i64 - (GLYPH_ROWS * block) as i64;
    let bits = glyph_bits(glyph);

    for row in 0..GLYPH_ROWS {
        for col in 0..GLYPH_COLS {
            if bits >> (row * GLYPH_COLS + col) & 1 == 0 {
                continue;
            }
            for dy in 0..block {
                for dx in 0..block {
                    let px = left + (col * block + dx) as i64;
                    let py = top + (row * block + dy) as i64;
                    if px < 0 || py < 0 || px >= surface.width() as i64 || py >= surface.height() as i64 {
                        continue;
                    }
                    surface.put_pixel(px as u32, py as u32, Rgba([color[0], color[1], color[2], 255]));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rain(width: u32, height: u32) -> MatrixRain {
        MatrixRain::new(MatrixRainConfig {
            width,
            height,
            seed: Some(21),
            ..Default::default()
        })
    }

    #[test]
    fn test_zero_size_is_a_no_op() {
        let mut rain = rain(0, 0);
        rain.advance(1.0, 1.0);
        assert_eq!(rain.steps(), 0);
        assert!(rain.drops().is_empty());
        assert!(matches!(
            rain.save_snapshot(std::env::temp_dir().join("never.png")),
            Err(SnapshotError::EmptySurface)
        ));
    }

    #[test]
    fn test_columns_follow_width() {
        let mut rain = rain(100, 60);
        assert_eq!(rain.drops().len(), 8);
        assert!(rain.drops().iter().all(|&d| (-100.0..=0.0).contains(&d)));

        rain.on_resize(240, 60);
        assert_eq!(rain.drops().len(), 20);
        assert_eq!(rain.surface().dimensions(), (240, 60));
        assert!(rain.listens_for_resize());
    }

    #[test]
    fn test_fixed_step_clock() {
        let mut rain = rain(48, 48);
        rain.advance(0.03, 0.03);
        assert_eq!(rain.steps(), 0);
        rain.advance(0.06, 0.03);
        assert_eq!(rain.steps(), 1);

        // A long hitch runs a bounded number of steps.
        rain.advance(5.0, 5.0);
        assert_eq!(rain.steps(), 5);
    }

    #[test]
    fn test_drops_move_down() {
        let mut rain = rain(120, 24);
        let before = rain.drops().to_vec();
        rain.step();
        for (a, b) in before.iter().zip(rain.drops()) {
            // Drops above the bottom never reset.
            assert!(*b >= a + 1.0 && *b <= a + 3.0);
        }
    }

    #[test]
    fn test_fade_blends_toward_night() {
        let mut rain = MatrixRain::new(MatrixRainConfig {
            width: 24,
            height: 24,
            start_depth: 100.0,
            seed: Some(5),
            ..Default::default()
        });
        // Every drop starts above the top, so only the fade lands.
        rain.drops.iter_mut().for_each(|d| *d = -10.0);
        rain.step();
        let pixel = rain.surface().get_pixel(5, 5);
        assert_eq!(pixel.0, [0, 8, 20, 20]);
    }

    #[test]
    fn test_glyphs_land_in_view() {
        let mut rain = MatrixRain::new(MatrixRainConfig {
            width: 36,
            height: 36,
            seed: Some(2),
            ..Default::default()
        });
        rain.drops.iter_mut().for_each(|d| *d = 1.0);
        rain.step();
        let teal = rgb(palette::TEAL);
        let expected = [
            (teal.x * 255.0).round() as u8,
            (teal.y * 255.0).round() as u8,
            (teal.z * 255.0).round() as u8,
            255,
        ];
        assert!(rain.surface().pixels().any(|p| p.0 == expected));
    }

    #[test]
    fn test_glyph_bits_are_stable() {
        assert_eq!(glyph_bits('A'), glyph_bits('A'));
        assert_ne!(glyph_bits('A'), glyph_bits('B'));
        assert!(glyph_bits('.') < 1 << 35);
    }

    #[test]
    fn test_snapshot_writes_png() {
        let mut rain = rain(24, 24);
        rain.step();
        let path = std::env::temp_dir().join(format!("folio-rain-{}.png", std::process::id()));
        rain.save_snapshot(&path).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (24, 24));
        std::fs::remove_file(&path).unwrap();
    }
}
