use std::{fmt, ops::RangeInclusive};

use rand::Rng;

pub const OTP_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// A six-digit numeric code used to gate password reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneTimeCode(String);

impl OneTimeCode {
    /// Returns `None` when `value` is outside the six-digit range.
    pub fn from_number(value: u32) -> Option<Self> {
        OTP_RANGE
            .contains(&value)
            .then(|| Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact string comparison; no trimming or numeric coercion.
    pub fn matches(&self, entered: &str) -> bool {
        self.0 == entered
    }
}

impl fmt::Display for OneTimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait OtpGenerator: Send + Sync {
    fn generate(&self) -> OneTimeCode;
}

/// Uniform draw over [`OTP_RANGE`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomOtpGenerator;

impl OtpGenerator for RandomOtpGenerator {
    fn generate(&self) -> OneTimeCode {
        let value = rand::thread_rng().gen_range(OTP_RANGE);
        OneTimeCode(value.to_string())
    }
}
