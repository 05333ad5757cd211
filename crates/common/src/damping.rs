//! Frame-rate independent smoothing helpers.

use glam::Vec3;

/// Critically damped spring step toward `target`.
///
/// `velocity` is the caller-owned accumulator carried between calls;
/// `smooth_time` is roughly the time to reach the target. Never overshoots.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        return current;
    }
    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;
    // Clamp on overshoot.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = (output - target) / dt;
    }
    output
}

/// [`smooth_damp`] applied per axis with a vector accumulator.
pub fn smooth_damp_vec3(current: Vec3, target: Vec3, velocity: &mut Vec3, smooth_time: f32, dt: f32) -> Vec3 {
    Vec3::new(
        smooth_damp(current.x, target.x, &mut velocity.x, smooth_time, dt),
        smooth_damp(current.y, target.y, &mut velocity.y, smooth_time, dt),
        smooth_damp(current.z, target.z, &mut velocity.z, smooth_time, dt),
    )
}

/// Exponential approach: closes `1 - e^(-dt/damp_time)` of the gap per call.
///
/// A non-positive `damp_time` snaps straight to the target.
pub fn exp_damp(current: f32, target: f32, damp_time: f32, dt: f32) -> f32 {
    if damp_time <= 0.0 {
        return target;
    }
    target + (current - target) * (-dt / damp_time).exp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smooth_damp_converges_without_overshoot() {
        let mut v = 0.0;
        let mut x = 0.0;
        for _ in 0..120 {
            x = smooth_damp(x, 10.0, &mut v, 0.1, 1.0 / 60.0);
            assert!(x <= 10.0);
        }
        assert!((x - 10.0).abs() < 1e-3);
    }

    #[test]
    fn smooth_damp_zero_dt_is_noop() {
        let mut v = 3.0;
        assert_eq!(smooth_damp(1.0, 5.0, &mut v, 0.1, 0.0), 1.0);
    }

    #[test]
    fn smooth_damp_vec3_reaches_target() {
        let mut vel = Vec3::ZERO;
        let mut p = Vec3::ZERO;
        let target = Vec3::new(2.0, -1.0, 4.0);
        for _ in 0..200 {
            p = smooth_damp_vec3(p, target, &mut vel, 0.1, 1.0 / 60.0);
        }
        assert!((p - target).length() < 1e-3);
    }

    #[test]
    fn exp_damp_moves_partway() {
        let v = exp_damp(0.0, 1.0, 0.1, 0.1);
        assert!((v - (1.0 - (-1.0f32).exp())).abs() < 1e-6);
        assert_eq!(exp_damp(0.0, 1.0, 0.0, 0.016), 1.0);
    }

    #[test]
    fn exp_damp_is_frame_rate_independent() {
        let one = exp_damp(0.0, 1.0, 0.1, 0.04);
        let two = exp_damp(exp_damp(0.0, 1.0, 0.1, 0.02), 1.0, 0.1, 0.02);
        assert!((one - two).abs() < 1e-6);
    }
}
