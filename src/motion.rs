/*
Stagelight - by David Petnick
*/
//! Looping Keyframe Curves for the Decorative Layers.
//! All Inputs are Scene-Local Seconds; Outputs are Plain Numbers the
//! Screens Write into Node Styles

use crate::particles::{Bubble, ConfettiPiece, Star};

/// Where a Repeating Animation is in its Cycle, in 0..1
/// None Until its Start Delay Has Passed
pub fn cycle_phase(t: f32, delay: f32, duration: f32) -> Option<f32> {
    if t < delay || duration <= 0.0 {
        return None;
    }
    Some(((t - delay) % duration) / duration)
}

/// Evenly Spaced Stops, Linear Between Them
pub fn keyframes(stops: &[f32], p: f32) -> f32 {
    match stops {
        [] => 0.0,
        [only] => *only,
        _ => {
            let p = p.clamp(0.0, 1.0);
            let segments = (stops.len() - 1) as f32;
            let pos = p * segments;
            let i = (pos.floor() as usize).min(stops.len() - 2);
            let local = pos - i as f32;
            stops[i] + (stops[i + 1] - stops[i]) * local
        }
    }
}

pub fn ease_in_out(p: f32) -> f32 {
    let p = p.clamp(0.0, 1.0);
    p * p * (3.0 - 2.0 * p)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarFrame {
    pub opacity: f32,
    pub scale: f32,
}

pub fn star_frame(star: &Star, t: f32) -> StarFrame {
    let Some(p) = cycle_phase(t, star.delay, star.twinkle_secs) else {
        return StarFrame { opacity: 0.2, scale: 0.8 };
    };
    let e = ease_in_out(p);
    StarFrame {
        opacity: keyframes(&[0.2, 1.0, 0.2], e),
        scale: keyframes(&[0.8, 1.2, 0.8], e),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BubbleFrame {
    /// Percent of Viewport Height From the Bottom Edge
    pub bottom: f32,
    pub sway_px: f32,
    pub opacity: f32,
}

const BUBBLE_START_BOTTOM: f32 = -10.0;

/// Rises Linearly From Below the Fold up to its 'y_offset' Height
pub fn bubble_frame(bubble: &Bubble, t: f32) -> BubbleFrame {
    let Some(p) = cycle_phase(t, bubble.delay, bubble.duration) else {
        return BubbleFrame {
            bottom: BUBBLE_START_BOTTOM,
            sway_px: 0.0,
            opacity: 0.0,
        };
    };
    BubbleFrame {
        bottom: BUBBLE_START_BOTTOM + (bubble.y_offset - BUBBLE_START_BOTTOM) * p,
        sway_px: keyframes(&[0.0, bubble.sway_px(), 0.0], p),
        opacity: keyframes(&[0.0, 0.8, 0.0], p),
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiFrame {
    /// Fall Progress 0..1; Screens Map it From Above the Top to Past the Bottom
    pub fall: f32,
    pub drift_px: f32,
    pub opacity: f32,
}

pub fn confetti_frame(piece: &ConfettiPiece, t: f32) -> ConfettiFrame {
    let Some(p) = cycle_phase(t, piece.delay, piece.duration) else {
        return ConfettiFrame { fall: 0.0, drift_px: 0.0, opacity: 0.0 };
    };
    let e = ease_in_out(p);
    ConfettiFrame {
        fall: e,
        drift_px: keyframes(&[0.0, piece.drift, -piece.drift / 2.0, 0.0], e),
        opacity: keyframes(&[0.0, 1.0, 1.0, 0.0], e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{Palette, Tint};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn phase_waits_for_delay_then_wraps() {
        assert_eq!(cycle_phase(0.5, 1.0, 4.0), None);
        assert_eq!(cycle_phase(1.0, 1.0, 4.0), Some(0.0));
        assert!(close(cycle_phase(3.0, 1.0, 4.0).unwrap_or(-1.0), 0.5));
        assert!(close(cycle_phase(6.0, 1.0, 4.0).unwrap_or(-1.0), 0.25));
        assert_eq!(cycle_phase(1.0, 0.0, 0.0), None);
    }

    #[test]
    fn keyframes_hit_their_stops() {
        let stops = [0.0, 10.0, -5.0, 0.0];
        assert!(close(keyframes(&stops, 0.0), 0.0));
        assert!(close(keyframes(&stops, 1.0 / 3.0), 10.0));
        assert!(close(keyframes(&stops, 2.0 / 3.0), -5.0));
        assert!(close(keyframes(&stops, 1.0), 0.0));
        assert!(close(keyframes(&stops, 1.0 / 6.0), 5.0));
        assert_eq!(keyframes(&[], 0.3), 0.0);
        assert_eq!(keyframes(&[7.0], 0.3), 7.0);
    }

    #[test]
    fn ease_is_monotone_and_pinned() {
        assert_eq!(ease_in_out(0.0), 0.0);
        assert_eq!(ease_in_out(1.0), 1.0);
        assert!(close(ease_in_out(0.5), 0.5));
        let mut last = 0.0;
        for i in 1..=100 {
            let v = ease_in_out(i as f32 / 100.0);
            assert!(v >= last);
            last = v;
        }
    }

    #[test]
    fn star_peaks_mid_cycle() {
        let star = Star { index: 0, x: 0.0, y: 0.0, delay: 1.0, size_px: 2.0, twinkle_secs: 2.0 };
        assert_eq!(star_frame(&star, 0.0).opacity, 0.2);
        let peak = star_frame(&star, 2.0);
        assert!(close(peak.opacity, 1.0));
        assert!(close(peak.scale, 1.2));
    }

    #[test]
    fn bubble_rises_to_its_offset() {
        let bubble = Bubble { index: 1, x: 50.0, y_offset: 90.0, scale: 2.0, duration: 10.0, delay: 0.0 };
        assert!(close(bubble_frame(&bubble, 0.0).bottom, -10.0));
        assert!(close(bubble_frame(&bubble, 5.0).bottom, 40.0));
        assert!(close(bubble_frame(&bubble, 5.0).opacity, 0.8));
        assert!(close(bubble_frame(&bubble, 5.0).sway_px, bubble.sway_px()));
        assert!(bubble_frame(&bubble, 9.999).bottom < 90.0);
    }

    #[test]
    fn confetti_hidden_before_delay_and_fades_at_ends() {
        let piece = ConfettiPiece {
            index: 0,
            x: 10.0,
            delay: 2.0,
            duration: 6.0,
            width: 5.0,
            height: 10.0,
            drift: 20.0,
            palette: Palette::Gold,
            color: Tint::rgb(0xfe, 0xf0, 0x8a),
            glow: Palette::Gold.glow(),
        };
        assert_eq!(confetti_frame(&piece, 1.0).opacity, 0.0);
        assert_eq!(confetti_frame(&piece, 2.0).opacity, 0.0);
        let mid = confetti_frame(&piece, 5.0);
        assert!(close(mid.opacity, 1.0));
        assert!(close(mid.fall, 0.5));
    }
}
