//! Level ↔ experience conversion formulas.
//!
//! A [`Formula`] is a pair of pure integer functions:
//!
//! - **Linear** — `experience = level × 100`, `level = experience / 100`
//! - **Power(c)** — `level = ⌊c · √experience⌋`, `experience = ⌊(level / c)²⌋`
//!
//! Neither pair is an exact inverse. Linear truncates experience that is not a
//! multiple of 100; Power truncates on both sides and is subject to
//! floating-point rounding. `level → experience → level` holds for every
//! non-negative level under Linear, but callers must not assume it in general.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Experience granted per level by [`Formula::Linear`].
pub const LINEAR_EXPERIENCE_PER_LEVEL: i64 = 100;

/// A level/experience conversion strategy.
///
/// Formulas are immutable `Copy` values; any number of entities may hold the
/// same one. The serialised form carries an explicit `kind` tag so a loaded
/// entity gets its formula back.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Formula {
    /// One level per 100 experience.
    #[default]
    Linear,
    /// Square-root curve scaled by `constant`.
    ///
    /// A zero, negative or non-finite constant is not rejected. Float to
    /// integer conversion saturates (NaN becomes 0, infinities clamp to the
    /// `i64` bounds), so such formulas stay deterministic but meaningless.
    /// JSON has no literal for NaN or infinity, so a non-finite constant is
    /// saved as the string `"NaN"`, `"inf"` or `"-inf"` and read back as the
    /// same value.
    Power {
        /// Scale factor `c`; higher means faster levelling.
        #[serde(with = "constant_repr")]
        constant: f64,
    },
}

impl Formula {
    /// Scale used by [`Formula::power_default`].
    pub const DEFAULT_POWER_CONSTANT: f64 = 0.1;

    /// Power formula with the given scale constant.
    #[must_use]
    pub fn power(constant: f64) -> Self {
        Self::Power { constant }
    }

    /// Power formula with [`Self::DEFAULT_POWER_CONSTANT`].
    #[must_use]
    pub fn power_default() -> Self {
        Self::power(Self::DEFAULT_POWER_CONSTANT)
    }

    /// Total experience an entity holds at exactly `level`.
    #[must_use]
    pub fn experience_for_level(self, level: i64) -> i64 {
        match self {
            Self::Linear => level.saturating_mul(LINEAR_EXPERIENCE_PER_LEVEL),
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            Self::Power { constant } => (level as f64 / constant).powi(2).floor() as i64,
        }
    }

    /// Level reached with `experience` in total.
    ///
    /// Under [`Formula::Power`] negative experience has no real square root and
    /// maps to level 0.
    #[must_use]
    pub fn level_for_experience(self, experience: i64) -> i64 {
        match self {
            Self::Linear => experience / LINEAR_EXPERIENCE_PER_LEVEL,
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            Self::Power { constant } => (constant * (experience as f64).sqrt()).floor() as i64,
        }
    }
}

/// Encodes finite constants as JSON numbers and the rest as strings.
mod constant_repr {
    use serde::de::{self, Visitor};
    use serde::{Deserializer, Serializer};
    use std::fmt;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else {
            serializer.serialize_str(&value.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        deserializer.deserialize_any(ConstantVisitor)
    }

    struct ConstantVisitor;

    impl Visitor<'_> for ConstantVisitor {
        type Value = f64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a number or one of \"NaN\", \"inf\", \"-inf\"")
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<f64, E> {
            Ok(v)
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_i64<E: de::Error>(self, v: i64) -> Result<f64, E> {
            Ok(v as f64)
        }

        #[allow(clippy::cast_precision_loss)]
        fn visit_u64<E: de::Error>(self, v: u64) -> Result<f64, E> {
            Ok(v as f64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
            v.parse::<f64>()
                .ok()
                .filter(|c| !c.is_finite())
                .ok_or_else(|| E::invalid_value(de::Unexpected::Str(v), &self))
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linear => write!(f, "linear"),
            Self::Power { constant } => write!(f, "power({constant})"),
        }
    }
}
