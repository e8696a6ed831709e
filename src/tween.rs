//! Time-based tweens for page-level motion.
//!
//! A [`Tween`] maps a time in seconds to a value between `from` and `to`
//! through an easing curve, with optional delay, repeats and yoyo. Tweens are
//! pure: evaluate them at any time, in any order.
//!
//! ```ignore
//! use folio_fx::tween::{self, Ease};
//!
//! let bob = tween::float_bob();
//! let y = bob.value_at(elapsed);
//!
//! for i in 0..cards.len() {
//!     let reveal = tween::card_reveal(i);
//!     cards[i].offset_y = reveal.value_at(t);
//!     cards[i].opacity = reveal.with_values(0.0, 1.0).value_at(t);
//! }
//! ```

/// Easing curve. `PowerN` follows the usual `power1` (quadratic) and
/// `power2` (cubic) family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ease {
    Linear,
    Power1In,
    #[default]
    Power1Out,
    Power1InOut,
    Power2In,
    Power2Out,
    Power2InOut,
}

impl Ease {
    /// Eased progress for linear progress `t` in `[0, 1]`.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power1In => t.powi(2),
            Ease::Power1Out => 1.0 - (1.0 - t).powi(2),
            Ease::Power1InOut => in_out(t, 2),
            Ease::Power2In => t.powi(3),
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power2InOut => in_out(t, 3),
        }
    }
}

fn in_out(t: f32, power: i32) -> f32 {
    if t < 0.5 {
        2f32.powi(power - 1) * t.powi(power)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(power) / 2.0
    }
}

/// How many times a tween plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Repeat {
    #[default]
    Once,
    /// Play once, then repeat `n` more times.
    Times(u32),
    Forever,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    /// Seconds per play.
    pub duration: f32,
    /// Seconds before the first play starts.
    pub delay: f32,
    pub ease: Ease,
    pub repeat: Repeat,
    /// Alternate direction on every repeat.
    pub yoyo: bool,
}

impl Tween {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            from,
            to,
            duration,
            delay: 0.0,
            ease: Ease::default(),
            repeat: Repeat::Once,
            yoyo: false,
        }
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn yoyo(mut self) -> Self {
        self.yoyo = true;
        self
    }

    /// Same timing, different endpoints. Used to drive a second property
    /// (usually opacity) in lockstep.
    pub fn with_values(mut self, from: f32, to: f32) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    fn plays(&self) -> Option<u32> {
        match self.repeat {
            Repeat::Once => Some(1),
            Repeat::Times(n) => Some(n.saturating_add(1)),
            Repeat::Forever => None,
        }
    }

    /// Value at `t` seconds after the tween was started.
    pub fn value_at(&self, t: f32) -> f32 {
        let local = t - self.delay;
        if local <= 0.0 {
            return self.from;
        }
        if self.duration <= 0.0 {
            return self.end_value();
        }

        let play = (local / self.duration).floor();
        if let Some(plays) = self.plays() {
            if play >= plays as f32 {
                return self.end_value();
            }
        }

        let mut progress = (local - play * self.duration) / self.duration;
        if self.yoyo && (play as u64) % 2 == 1 {
            progress = 1.0 - progress;
        }
        self.lerp(self.ease.apply(progress))
    }

    /// Whether every play has finished by `t`. Never true for [`Repeat::Forever`].
    pub fn is_complete(&self, t: f32) -> bool {
        match self.plays() {
            Some(plays) => t - self.delay >= self.duration.max(0.0) * plays as f32,
            None => false,
        }
    }

    /// Seconds from start to completion, delay included.
    pub fn total_duration(&self) -> Option<f32> {
        self.plays()
            .map(|plays| self.delay + self.duration.max(0.0) * plays as f32)
    }

    fn end_value(&self) -> f32 {
        match self.plays() {
            Some(plays) if self.yoyo && plays % 2 == 0 => self.from,
            _ => self.to,
        }
    }

    fn lerp(&self, eased: f32) -> f32 {
        self.from + (self.to - self.from) * eased
    }
}

/// Start offset of item `index` in a staggered group.
#[inline]
pub fn stagger(index: usize, each: f32) -> f32 {
    index as f32 * each
}

/// Reveals text one character at a time.
///
/// Character `k` fades in over `[k, k + 1] * duration / chars`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Typewriter {
    pub chars: usize,
    pub duration: f32,
}

impl Typewriter {
    pub fn new(text: &str, duration: f32) -> Self {
        Self {
            chars: text.chars().count(),
            duration,
        }
    }

    fn per_char(&self) -> f32 {
        if self.chars == 0 {
            0.0
        } else {
            self.duration / self.chars as f32
        }
    }

    /// Opacity of character `index` at `t`.
    pub fn opacity(&self, index: usize, t: f32) -> f32 {
        let each = self.per_char();
        Tween::new(0.0, 1.0, each)
            .with_ease(Ease::Linear)
            .with_delay(stagger(index, each))
            .value_at(t)
    }

    /// Number of fully visible characters at `t`.
    pub fn visible_chars(&self, t: f32) -> usize {
        let each = self.per_char();
        if each <= 0.0 {
            return self.chars;
        }
        ((t / each).floor().max(0.0) as usize).min(self.chars)
    }
}

/// Endless 20 px lift and settle, 2 s each way.
pub fn float_bob() -> Tween {
    Tween::new(0.0, -20.0, 2.0)
        .with_ease(Ease::Power1InOut)
        .with_repeat(Repeat::Forever)
        .yoyo()
}

/// Endless glow strength pulse between 0 and 1, 1.5 s each way.
pub fn glow_pulse() -> Tween {
    Tween::new(0.0, 1.0, 1.5)
        .with_ease(Ease::Power1InOut)
        .with_repeat(Repeat::Forever)
        .yoyo()
}

/// Project card slide-up, 100 px to rest, staggered 0.2 s per card.
pub fn card_reveal(index: usize) -> Tween {
    Tween::new(100.0, 0.0, 0.8).with_delay(stagger(index, 0.2))
}

/// Skill bar horizontal scale from 0 to 1, staggered 0.1 s per bar.
pub fn skill_bar(index: usize) -> Tween {
    Tween::new(0.0, 1.0, 1.5)
        .with_ease(Ease::Power2Out)
        .with_delay(stagger(index, 0.1))
}

/// Timeline entry slide-in from alternating sides, staggered 0.3 s.
pub fn timeline_slide(index: usize) -> Tween {
    let from = if index % 2 == 0 { -100.0 } else { 100.0 };
    Tween::new(from, 0.0, 0.8).with_delay(stagger(index, 0.3))
}

/// Hero background shift in percent, driven by scroll progress 0-1.
pub fn parallax() -> Tween {
    Tween::new(0.0, -50.0, 1.0).with_ease(Ease::Linear)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_eases_hit_endpoints() {
        for ease in [
            Ease::Linear,
            Ease::Power1In,
            Ease::Power1Out,
            Ease::Power1InOut,
            Ease::Power2In,
            Ease::Power2Out,
            Ease::Power2InOut,
        ] {
            assert!(close(ease.apply(0.0), 0.0), "{:?}", ease);
            assert!(close(ease.apply(1.0), 1.0), "{:?}", ease);
        }
        assert!(close(Ease::Power1InOut.apply(0.5), 0.5));
        assert!(close(Ease::Power2InOut.apply(0.25), 0.0625));
        assert!(Ease::Power2Out.apply(0.2) > Ease::Power1Out.apply(0.2));
    }

    #[test]
    fn test_delay_holds_start_value() {
        let tween = card_reveal(2);
        assert_eq!(tween.value_at(0.3), 100.0);
        assert!(tween.value_at(0.8) < 100.0);
        assert_eq!(tween.value_at(5.0), 0.0);
        assert!(tween.is_complete(1.25));
        assert!(!tween.is_complete(1.1));
    }

    #[test]
    fn test_yoyo_forever() {
        let bob = float_bob();
        assert!(close(bob.value_at(1.0), -10.0));
        assert!(close(bob.value_at(3.0), -10.0));
        assert!(close(bob.value_at(4.0 + 1e-3), bob.value_at(1e-3)));
        assert!(!bob.is_complete(1e6));
        assert_eq!(bob.total_duration(), None);
    }

    #[test]
    fn test_finite_yoyo_ends_at_start() {
        let tween = Tween::new(0.0, 1.0, 1.0).with_repeat(Repeat::Times(1)).yoyo();
        assert_eq!(tween.value_at(10.0), 0.0);
        assert_eq!(tween.total_duration(), Some(2.0));

        let twice = Tween::new(0.0, 1.0, 1.0).with_repeat(Repeat::Times(2)).yoyo();
        assert_eq!(twice.value_at(10.0), 1.0);
    }

    #[test]
    fn test_zero_duration_jumps() {
        let tween = Tween::new(3.0, 7.0, 0.0);
        assert_eq!(tween.value_at(0.0), 3.0);
        assert_eq!(tween.value_at(0.1), 7.0);
    }

    #[test]
    fn test_timeline_alternates_sides() {
        assert_eq!(timeline_slide(0).value_at(0.0), -100.0);
        assert_eq!(timeline_slide(1).value_at(0.0), 100.0);
        assert_eq!(timeline_slide(1).delay, 0.3);
    }

    #[test]
    fn test_typewriter() {
        let typer = Typewriter::new("hello", 2.0);
        assert_eq!(typer.visible_chars(0.0), 0);
        assert_eq!(typer.visible_chars(0.85), 2);
        assert_eq!(typer.visible_chars(9.0), 5);
        assert!(close(typer.opacity(1, 0.6), 0.5));
        assert_eq!(typer.opacity(4, 0.1), 0.0);

        let empty = Typewriter::new("", 2.0);
        assert_eq!(empty.visible_chars(1.0), 0);
    }

    #[test]
    fn test_with_values_shares_timing() {
        let offset = card_reveal(0);
        let opacity = offset.with_values(0.0, 1.0);
        assert_eq!(opacity.delay, offset.delay);
        assert_eq!(opacity.value_at(0.8), 1.0);
    }
}
