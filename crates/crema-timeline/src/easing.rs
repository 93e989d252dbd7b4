use crema_model::TransitionKind;

/// Map linear progress `t` onto the curve for `kind`.
///
/// `t` is clamped before dispatch, so every curve starts at 0 and ends at 1.
/// `Instant` is a step: any progress past the start is already 1.
pub fn apply_easing(t: f64, kind: TransitionKind) -> f64 {
    // also catches NaN from a zero-length span
    if !(t > 0.0) {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }
    match kind {
        TransitionKind::Linear => t,
        TransitionKind::EaseIn => t * t,
        TransitionKind::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        TransitionKind::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                1.0 - 2.0 * (1.0 - t) * (1.0 - t)
            }
        }
        TransitionKind::Instant => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [TransitionKind; 5] = [
        TransitionKind::Instant,
        TransitionKind::Linear,
        TransitionKind::EaseIn,
        TransitionKind::EaseOut,
        TransitionKind::EaseInOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for kind in ALL {
            assert_eq!(apply_easing(0.0, kind), 0.0, "{kind:?} at 0");
            assert_eq!(apply_easing(1.0, kind), 1.0, "{kind:?} at 1");
            assert_eq!(apply_easing(-3.0, kind), 0.0, "{kind:?} below 0");
            assert_eq!(apply_easing(7.5, kind), 1.0, "{kind:?} above 1");
        }
    }

    #[test]
    fn curve_shapes() {
        assert_eq!(apply_easing(0.25, TransitionKind::Linear), 0.25);
        assert_eq!(apply_easing(0.5, TransitionKind::EaseIn), 0.25);
        assert_eq!(apply_easing(0.5, TransitionKind::EaseOut), 0.75);
        assert_eq!(apply_easing(0.25, TransitionKind::EaseInOut), 0.125);
        assert_eq!(apply_easing(0.75, TransitionKind::EaseInOut), 0.875);
        assert_eq!(apply_easing(0.5, TransitionKind::EaseInOut), 0.5);
    }

    #[test]
    fn nan_progress_is_treated_as_not_started() {
        assert_eq!(apply_easing(f64::NAN, TransitionKind::Linear), 0.0);
    }

    proptest! {
        #[test]
        fn instant_is_one_after_start(t in 1e-9f64..10.0) {
            prop_assert_eq!(apply_easing(t, TransitionKind::Instant), 1.0);
        }

        #[test]
        fn curves_stay_in_unit_range(t in -2.0f64..3.0, i in 0usize..5) {
            let v = apply_easing(t, ALL[i]);
            prop_assert!((0.0..=1.0).contains(&v));
        }

        #[test]
        fn curves_are_monotonic(a in 0.0f64..1.0, b in 0.0f64..1.0, i in 0usize..5) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(apply_easing(lo, ALL[i]) <= apply_easing(hi, ALL[i]) + 1e-12);
        }
    }
}
