//! Complex numbers over `f64`.

use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A complex number `re + im·i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Complex {
    re: f64,
    im: f64,
}

/// Error returned when text cannot be parsed as a complex number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot parse {0:?} as a complex number")]
pub struct ParseComplexError(String);

impl Complex {
    /// Create `re + im·i`.
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Real part.
    pub fn re(&self) -> f64 {
        self.re
    }

    /// Imaginary part.
    pub fn im(&self) -> f64 {
        self.im
    }

    /// Modulus `|z|`.
    pub fn norm(&self) -> f64 {
        self.re.hypot(self.im)
    }

    /// `z * z`.
    pub fn sqr(self) -> Self {
        self * self
    }

    /// Division that returns `None` instead of panicking on a zero divisor.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        let den = rhs.re * rhs.re + rhs.im * rhs.im;
        if den == 0.0 {
            return None;
        }
        Some(Self::new(
            (self.re * rhs.re + self.im * rhs.im) / den,
            (self.im * rhs.re - self.re * rhs.im) / den,
        ))
    }

    /// Integer power by repeated squaring.
    ///
    /// # Panics
    /// Panics if `n < 0` and `self` is zero.
    pub fn powi(self, n: i64) -> Self {
        if n < 0 {
            let recip = Self::from(1.0)
                .checked_div(self)
                .unwrap_or_else(|| panic!("negative power of complex zero"));
            return recip.powi(-n);
        }
        match n {
            0 => Self::new(1.0, 0.0),
            1 => self,
            _ => {
                let half = self.powi(n / 2);
                let answer = half * half;
                if n % 2 == 1 {
                    answer * self
                } else {
                    answer
                }
            }
        }
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::new(re, 0.0)
    }
}

impl From<i32> for Complex {
    fn from(n: i32) -> Self {
        Self::new(n as f64, 0.0)
    }
}

impl From<i64> for Complex {
    fn from(n: i64) -> Self {
        Self::new(n as f64, 0.0)
    }
}

impl Add for Complex {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Complex {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Div for Complex {
    type Output = Self;

    /// # Panics
    /// Panics when dividing by zero; use [`Complex::checked_div`] to recover.
    fn div(self, rhs: Self) -> Self {
        self.checked_div(rhs)
            .unwrap_or_else(|| panic!("attempt to divide complex number by zero"))
    }
}

impl Neg for Complex {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.re, -self.im)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Complex {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl MulAssign for Complex {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl DivAssign for Complex {
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im < 0.0 || (self.im == 0.0 && self.im.is_sign_negative()) {
            write!(f, "{}-{}i", self.re, -self.im)
        } else {
            write!(f, "{}+{}i", self.re, self.im)
        }
    }
}

impl FromStr for Complex {
    type Err = ParseComplexError;

    /// Parses `a+bi`, `a-bi`, `bi` or a bare real `a`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseComplexError(s.to_string());
        let text = s.trim();
        if text.is_empty() {
            return Err(err());
        }

        let Some(body) = text.strip_suffix('i') else {
            return text.parse::<f64>().map(Self::from).map_err(|_| err());
        };

        // Split at the last sign that is not the leading sign or part of an exponent.
        let bytes = body.as_bytes();
        let split = (1..bytes.len())
            .rev()
            .find(|&k| (bytes[k] == b'+' || bytes[k] == b'-') && !matches!(bytes[k - 1], b'e' | b'E'));

        match split {
            Some(k) => {
                let re = body[..k].parse::<f64>().map_err(|_| err())?;
                let im = match &body[k..] {
                    "+" => 1.0,
                    "-" => -1.0,
                    imag => imag.parse::<f64>().map_err(|_| err())?,
                };
                Ok(Self::new(re, im))
            }
            None => {
                let im = match body {
                    "" | "+" => 1.0,
                    "-" => -1.0,
                    imag => imag.parse::<f64>().map_err(|_| err())?,
                };
                Ok(Self::new(0.0, im))
            }
        }
    }
}
