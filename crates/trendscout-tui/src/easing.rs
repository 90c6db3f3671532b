// Easing for the loading bar

/// Frame counter wraps back to zero past this
pub const MAX_FRAMES: u32 = 80;

/// Animation never claims completion on its own
const ANIMATION_CEILING: f64 = 0.99;

/// Classic bounce-out curve over `t` in [0, 1]
pub fn out_bounce(t: f64) -> f64 {
    const N: f64 = 7.5625;
    const D: f64 = 2.75;

    let t = t.clamp(0.0, 1.0);

    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

/// Next frame counter value, cycling through 0..=MAX_FRAMES
pub fn advance_frame(frames: u32) -> u32 {
    if frames >= MAX_FRAMES {
        0
    } else {
        frames + 1
    }
}

/// Progress for a still-loading scrape: follows the curve, but never goes
/// backwards and never reaches 1.0
pub fn loading_progress(current: f64, frames: u32) -> f64 {
    let animated = out_bounce(frames as f64 / 100.0).min(ANIMATION_CEILING);
    current.max(animated)
}
