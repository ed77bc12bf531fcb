//! Amounts of money as they travel through the mock API.
//!
//! The backend stores balances and transaction amounts as plain JSON numbers, so [`Money`] wraps
//! an `f64` and serializes transparently.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(pub f64);

impl Money {
    pub const ZERO: Money = Money(0.0);

    pub fn is_positive(&self) -> bool {
        self.0 > 0.0
    }

    /// True for amounts a form would treat as "not filled in": zero or not a number.
    pub fn is_blank(&self) -> bool {
        self.0 == 0.0 || self.0.is_nan()
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}", self.0)
    }
}
