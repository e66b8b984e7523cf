//! Twist animation preferences.

use serde::{Deserialize, Serialize};
use tinycube_core::TwistSpeed;

pub use interpolation::InterpolateFn;

/// Twist animation preferences.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnimationPreferences {
    /// Duration of one quarter turn, in seconds.
    pub twist_duration: f32,
    /// Whether to twist faster when many twists are queued.
    pub dynamic_twist_speed: bool,
    /// Easing applied to the visual angle of a twist.
    pub twist_interpolation: InterpolateFn,
}
impl Default for AnimationPreferences {
    fn default() -> Self {
        crate::DEFAULT_PREFS.animation.clone()
    }
}
impl AnimationPreferences {
    /// Returns the speed to pass to the rotation animator.
    pub fn twist_speed(&self) -> TwistSpeed {
        TwistSpeed {
            twist_duration: self.twist_duration,
            dynamic: self.dynamic_twist_speed,
        }
    }
}

pub mod interpolation {
    //! Interpolation functions.

    use std::f32::consts::PI;

    use serde::{Deserialize, Serialize};

    /// Function that maps a float from the range 0.0 to 1.0 to another float
    /// from 0.0 to 1.0.
    ///
    /// Easing only changes how a twist looks. It does not change when the
    /// twist is committed.
    #[derive(
        Serialize,
        Deserialize,
        Debug,
        Default,
        Copy,
        Clone,
        PartialEq,
        Eq,
        Hash,
        strum::Display,
        strum::VariantArray,
    )]
    #[serde(rename_all = "snake_case")]
    #[strum(serialize_all = "snake_case")]
    pub enum InterpolateFn {
        /// Constant speed.
        #[default]
        Lerp,
        /// Eases in and out.
        Cosine,
    }

    impl InterpolateFn {
        /// Returns the interpolation value for `t` in the range [0, 1]. The
        /// result is 0 at `t = 0` and 1 at `t = 1`.
        pub fn interpolate(self, t: f32) -> f32 {
            match self {
                Self::Lerp => t,
                Self::Cosine => (1.0 - (t * PI).cos()) / 2.0,
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_interpolation_endpoints() {
            for &f in <InterpolateFn as strum::VariantArray>::VARIANTS {
                assert!(f.interpolate(0.0).abs() < 1e-3, "{f} at 0");
                assert!((f.interpolate(1.0) - 1.0).abs() < 1e-3, "{f} at 1");
            }
            assert_eq!(0.25, InterpolateFn::Lerp.interpolate(0.25));
            assert!((InterpolateFn::Cosine.interpolate(0.5) - 0.5).abs() < 1e-6);
            assert!(InterpolateFn::Cosine.interpolate(0.25) < 0.25);
        }
    }
}
