use crate::foundation::core::{Fps, FrameIndex};

/// Physical parameters of a damped spring animating from 0 to 1.
///
/// Defaults follow the common motion-graphics preset: unit mass, stiffness 100, damping 10.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    /// Mass of the moving body.
    pub mass: f64,
    /// Spring constant.
    pub stiffness: f64,
    /// Viscous damping coefficient.
    pub damping: f64,
    /// Clamp the response at the target instead of overshooting.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Default preset with a custom damping coefficient.
    pub fn with_damping(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    /// Damping ratio `zeta`; `< 1` overshoots, `1` is critical, `> 1` creeps.
    pub fn damping_ratio(&self) -> f64 {
        let k = self.stiffness.max(0.0);
        let m = self.mass.max(1e-9);
        self.damping.max(0.0) / (2.0 * (k * m).sqrt()).max(1e-9)
    }
}

/// Spring physics sampled at a timeline frame.
///
/// Implementations must be pure: the same `(frame, fps, config)` always yields the same value.
pub trait SpringFunction: Send + Sync {
    /// Spring displacement (0 at rest, approaching 1) at `frame`.
    fn sample(&self, frame: FrameIndex, fps: Fps, config: &SpringConfig) -> f64;
}

/// Closed-form damped harmonic oscillator step response.
#[derive(Clone, Copy, Debug, Default)]
pub struct DampedSpring;

impl SpringFunction for DampedSpring {
    fn sample(&self, frame: FrameIndex, fps: Fps, config: &SpringConfig) -> f64 {
        let v = spring_step(fps.frames_to_secs(frame.0), config);
        if config.overshoot_clamping {
            v.min(1.0)
        } else {
            v
        }
    }
}

/// Step response from 0 to 1 with x(0)=0, v(0)=0, evaluated at `t` seconds.
pub fn spring_step(t: f64, config: &SpringConfig) -> f64 {
    if t <= 0.0 {
        return 0.0;
    }
    let k = config.stiffness.max(0.0);
    let m = config.mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return 0.0;
    }
    let zeta = config.damping_ratio();

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
    } else {
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
