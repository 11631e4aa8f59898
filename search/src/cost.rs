//! Step and path cost abstraction.
//!
//! The engine is generic over the numeric type a world uses for costs. It
//! only ever adds costs and compares them, so any type with a zero, a
//! checked addition and a total order qualifies. Integer addition that
//! overflows is reported instead of wrapping. Floating-point costs are ordered
//! with [`f64::total_cmp`] so frontier ordering stays total even in the
//! presence of signed zeros.

use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Add;

/// A non-negative cost value usable as `g`, `h` and step cost.
pub trait Cost: Copy + Debug + Add<Output = Self> {
    /// The additive identity (cost of the root node).
    const ZERO: Self;

    /// Total ordering used by the frontier.
    fn total_cmp(&self, other: &Self) -> Ordering;

    /// Whether this value is a legal step cost or estimate: non-negative and
    /// comparable (not NaN).
    fn is_valid(&self) -> bool;

    /// `self + rhs`, or `None` if the sum is not representable.
    fn checked_add(self, rhs: Self) -> Option<Self>;

    /// JSON representation for reports.
    fn to_json(&self) -> serde_json::Value;
}

macro_rules! unsigned_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                const ZERO: Self = 0;

                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                fn is_valid(&self) -> bool {
                    true
                }

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                fn to_json(&self) -> serde_json::Value {
                    serde_json::json!(*self)
                }
            }
        )*
    };
}

macro_rules! signed_cost {
    ($($t:ty),*) => {
        $(
            impl Cost for $t {
                const ZERO: Self = 0;

                fn total_cmp(&self, other: &Self) -> Ordering {
                    self.cmp(other)
                }

                fn is_valid(&self) -> bool {
                    *self >= 0
                }

                fn checked_add(self, rhs: Self) -> Option<Self> {
                    <$t>::checked_add(self, rhs)
                }

                fn to_json(&self) -> serde_json::Value {
                    serde_json::json!(*self)
                }
            }
        )*
    };
}

unsigned_cost!(u32, u64, usize);
signed_cost!(i32, i64);

impl Cost for f64 {
    const ZERO: Self = 0.0;

    fn total_cmp(&self, other: &Self) -> Ordering {
        // -0.0 and 0.0 compare equal here; total_cmp alone would split them.
        if self == other {
            Ordering::Equal
        } else {
            f64::total_cmp(self, other)
        }
    }

    fn is_valid(&self) -> bool {
        !self.is_nan() && *self >= 0.0
    }

    // Saturates to infinity, which still orders correctly.
    fn checked_add(self, rhs: Self) -> Option<Self> {
        Some(self + rhs)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Number::from_f64(*self).map_or(serde_json::Value::Null, serde_json::Value::Number)
    }
}
