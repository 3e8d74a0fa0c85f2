use super::*;

fn sample(frame: u64, config: &SpringConfig) -> f64 {
    DampedSpring.sample(FrameIndex(frame), Fps::whole(30), config)
}

#[test]
fn starts_at_rest() {
    assert_eq!(sample(0, &SpringConfig::default()), 0.0);
    assert_eq!(spring_step(-1.0, &SpringConfig::default()), 0.0);
}

#[test]
fn settles_to_one() {
    let cfg = SpringConfig::with_damping(10.0);
    for f in 90..600 {
        let v = sample(f, &cfg);
        assert!((v - 1.0).abs() < 1e-3, "frame {f}: {v}");
    }
}

#[test]
fn underdamped_overshoots_once_noticeably() {
    let cfg = SpringConfig::with_damping(10.0);
    assert!(cfg.damping_ratio() < 1.0);
    let peak = (0..90).map(|f| sample(f, &cfg)).fold(0.0_f64, f64::max);
    assert!(peak > 1.05, "peak {peak}");
    assert!(peak < 1.25, "peak {peak}");
}

#[test]
fn overshoot_clamping_caps_at_target() {
    let cfg = SpringConfig {
        overshoot_clamping: true,
        ..SpringConfig::with_damping(10.0)
    };
    for f in 0..120 {
        assert!(sample(f, &cfg) <= 1.0);
    }
}

#[test]
fn critical_and_overdamped_do_not_overshoot() {
    for damping in [20.0, 60.0] {
        let cfg = SpringConfig::with_damping(damping);
        let mut prev = 0.0;
        for f in 0..300 {
            let v = sample(f, &cfg);
            assert!(v <= 1.0 + 1e-9, "damping {damping} frame {f}: {v}");
            assert!(v + 1e-12 >= prev, "damping {damping} frame {f}");
            prev = v;
        }
    }
}

#[test]
fn sampling_is_pure() {
    let cfg = SpringConfig::default();
    for f in [0, 3, 17, 150] {
        assert_eq!(sample(f, &cfg).to_bits(), sample(f, &cfg).to_bits());
    }
}
