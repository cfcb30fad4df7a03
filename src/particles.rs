/*
Stagelight - by David Petnick
*/
use bevy::prelude::*;
use rand::{Rng, RngExt};
use std::ops::Range;

// Landing
pub const STAR_POS: Range<f32> = 0.0..100.0;
pub const STAR_DELAY: Range<f32> = 0.0..3.0;
pub const STAR_TWINKLE: Range<f32> = 2.0..4.0;
pub const STAR_SIZES: [f32; 2] = [2.0, 3.0];

pub const BUBBLE_X: Range<f32> = 0.0..100.0;
pub const BUBBLE_Y_OFFSET: Range<f32> = 20.0..120.0;
pub const BUBBLE_SCALE: Range<f32> = 1.0..5.0;
pub const BUBBLE_DURATION: Range<f32> = 10.0..20.0;
pub const BUBBLE_DELAY: Range<f32> = 0.0..5.0;
const BUBBLE_PX_PER_SCALE: f32 = 10.0;
const BUBBLE_SWAY_PX: f32 = 30.0;

// Gallery
pub const CONFETTI_X: Range<f32> = 0.0..100.0;
pub const CONFETTI_DELAY: Range<f32> = 0.0..8.0;
pub const CONFETTI_DURATION: Range<f32> = 6.0..12.0;
pub const CONFETTI_WIDTH: Range<f32> = 4.0..12.0;
pub const CONFETTI_HEIGHT: Range<f32> = 8.0..22.0;
pub const CONFETTI_DRIFT: Range<f32> = -40.0..40.0;

/// 70% Gold; the Rest Splits Evenly Between Red and Purple
const GOLD_CHANCE: f64 = 0.70;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParticleKind {
    Star,
    Bubble,
    Confetti,
}

/// sRGB Byte Color + Linear Alpha
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tint {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Tint {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Tint> for Color {
    fn from(t: Tint) -> Self {
        Color::srgba_u8(t.r, t.g, t.b, (t.a.clamp(0.0, 1.0) * 255.0).round() as u8)
    }
}

const GOLD_SWATCHES: [Tint; 4] = [
    Tint::rgb(0xfe, 0xf0, 0x8a),
    Tint::rgb(0xfd, 0xe0, 0x47),
    Tint::rgb(0xfa, 0xcc, 0x15),
    Tint::rgb(0xfb, 0xbf, 0x24),
];
const RED_SWATCHES: [Tint; 3] = [
    Tint::rgb(0xfc, 0xa5, 0xa5),
    Tint::rgb(0xf8, 0x71, 0x71),
    Tint::rgb(0xef, 0x44, 0x44),
];
const PURPLE_SWATCHES: [Tint; 3] = [
    Tint::rgb(0xd8, 0xb4, 0xfe),
    Tint::rgb(0xc0, 0x84, 0xfc),
    Tint::rgb(0xa8, 0x55, 0xf7),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Palette {
    Gold,
    Red,
    Purple,
}

impl Palette {
    pub fn swatches(self) -> &'static [Tint] {
        match self {
            Palette::Gold => &GOLD_SWATCHES,
            Palette::Red => &RED_SWATCHES,
            Palette::Purple => &PURPLE_SWATCHES,
        }
    }

    /// Shared Glow for Every Swatch in the Palette
    pub fn glow(self) -> Tint {
        match self {
            Palette::Gold => Tint::rgba(253, 224, 71, 0.6),
            Palette::Red => Tint::rgba(239, 68, 68, 0.6),
            Palette::Purple => Tint::rgba(168, 85, 247, 0.6),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.random_bool(GOLD_CHANCE) {
            Palette::Gold
        } else if rng.random_bool(0.5) {
            Palette::Red
        } else {
            Palette::Purple
        }
    }

    pub fn random_swatch<R: Rng + ?Sized>(self, rng: &mut R) -> Tint {
        let swatches = self.swatches();
        swatches[rng.random_range(0..swatches.len())]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub index: usize,
    /// Percent of Viewport
    pub x: f32,
    pub y: f32,
    pub delay: f32,
    pub size_px: f32,
    pub twinkle_secs: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Bubble {
    pub index: usize,
    pub x: f32,
    pub y_offset: f32,
    pub scale: f32,
    pub duration: f32,
    pub delay: f32,
}

impl Bubble {
    pub fn diameter_px(&self) -> f32 {
        self.scale * BUBBLE_PX_PER_SCALE
    }

    /// Peak Sideways Sway; Fixed per Index so Neighbours Alternate
    pub fn sway_px(&self) -> f32 {
        (self.index as f32).sin() * BUBBLE_SWAY_PX
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub index: usize,
    pub x: f32,
    pub delay: f32,
    pub duration: f32,
    pub width: f32,
    pub height: f32,
    pub drift: f32,
    pub palette: Palette,
    pub color: Tint,
    pub glow: Tint,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Particle {
    Star(Star),
    Bubble(Bubble),
    Confetti(ConfettiPiece),
}

impl Particle {
    pub fn kind(&self) -> ParticleKind {
        match self {
            Particle::Star(_) => ParticleKind::Star,
            Particle::Bubble(_) => ParticleKind::Bubble,
            Particle::Confetti(_) => ParticleKind::Confetti,
        }
    }
}

pub fn generate_stars<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Star> {
    (0..count)
        .map(|index| Star {
            index,
            x: rng.random_range(STAR_POS),
            y: rng.random_range(STAR_POS),
            delay: rng.random_range(STAR_DELAY),
            size_px: STAR_SIZES[rng.random_range(0..STAR_SIZES.len())],
            twinkle_secs: rng.random_range(STAR_TWINKLE),
        })
        .collect()
}

pub fn generate_bubbles<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<Bubble> {
    (0..count)
        .map(|index| Bubble {
            index,
            x: rng.random_range(BUBBLE_X),
            y_offset: rng.random_range(BUBBLE_Y_OFFSET),
            scale: rng.random_range(BUBBLE_SCALE),
            duration: rng.random_range(BUBBLE_DURATION),
            delay: rng.random_range(BUBBLE_DELAY),
        })
        .collect()
}

pub fn generate_confetti<R: Rng + ?Sized>(rng: &mut R, count: usize) -> Vec<ConfettiPiece> {
    (0..count)
        .map(|index| {
            let palette = Palette::random(rng);
            let color = palette.random_swatch(rng);
            ConfettiPiece {
                index,
                x: rng.random_range(CONFETTI_X),
                delay: rng.random_range(CONFETTI_DELAY),
                duration: rng.random_range(CONFETTI_DURATION),
                width: rng.random_range(CONFETTI_WIDTH),
                height: rng.random_range(CONFETTI_HEIGHT),
                drift: rng.random_range(CONFETTI_DRIFT),
                palette,
                color,
                glow: palette.glow(),
            }
        })
        .collect()
}

/// Kind-Erased Entry Point
pub fn generate<R: Rng + ?Sized>(rng: &mut R, kind: ParticleKind, count: usize) -> Vec<Particle> {
    match kind {
        ParticleKind::Star => generate_stars(rng, count)
            .into_iter()
            .map(Particle::Star)
            .collect(),
        ParticleKind::Bubble => generate_bubbles(rng, count)
            .into_iter()
            .map(Particle::Bubble)
            .collect(),
        ParticleKind::Confetti => generate_confetti(rng, count)
            .into_iter()
            .map(Particle::Confetti)
            .collect(),
    }
}
