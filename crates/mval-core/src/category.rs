//! # Rule Category
//!
//! The severity tier of a validation rule. The three tiers are independent
//! bit flags, so a combination such as `REQUIRED | SUGGESTED` is a valid
//! value and membership is tested with [`Category::contains`].
//!
//! In practice every rule is registered under exactly one tier; results
//! carry the tier the rule was registered under.
//!
//! The string form is the lowercase tier name, with combinations joined
//! by `|` (`"required|suggested"`). It is also the serde representation.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MvalError;

/// A set of rule severities.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Category(u8);

const NAMES: [(Category, &str); 3] = [
    (Category::REQUIRED, "required"),
    (Category::RECOMMENDED, "recommended"),
    (Category::SUGGESTED, "suggested"),
];

impl Category {
    /// The element must satisfy the rule.
    pub const REQUIRED: Self = Self(1 << 0);
    /// The element should satisfy the rule.
    pub const RECOMMENDED: Self = Self(1 << 1);
    /// Satisfying the rule is good practice.
    pub const SUGGESTED: Self = Self(1 << 2);

    const KNOWN_BITS: u8 = 0b111;

    /// The empty set.
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The three single tiers in severity order.
    pub fn all() -> &'static [Category] {
        &[Self::REQUIRED, Self::RECOMMENDED, Self::SUGGESTED]
    }

    /// Raw flag bits.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Build a category from raw bits, rejecting bits that name no tier.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        if bits & !Self::KNOWN_BITS == 0 {
            Some(Self(bits))
        } else {
            None
        }
    }

    /// Whether every tier in `other` is also in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether `self` and `other` share at least one tier.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Whether no tier is set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether exactly one tier is set.
    pub const fn is_single(self) -> bool {
        self.0.count_ones() == 1
    }

    /// Iterate over the single tiers contained in this set, most severe first.
    pub fn iter(self) -> impl Iterator<Item = Category> {
        Self::all().iter().copied().filter(move |c| self.contains(*c))
    }

    /// Lowercase name of a single tier; `None` for empty or combined sets.
    pub fn as_str(self) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(c, _)| *c == self)
            .map(|(_, name)| *name)
    }
}

impl BitOr for Category {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Category {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Category {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (category, name) in NAMES {
            if self.contains(category) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Category({self})")
    }
}

impl FromStr for Category {
    type Err = MvalError;

    /// Parse `required`, `recommended`, `suggested`, or a `|`-joined
    /// combination. Names are case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut category = Self::empty();
        for part in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            let lowered = part.to_ascii_lowercase();
            let flag = NAMES
                .iter()
                .find(|(_, name)| *name == lowered)
                .map(|(c, _)| *c)
                .ok_or_else(|| MvalError::UnknownCategory(part.to_string()))?;
            category |= flag;
        }
        if category.is_empty() {
            return Err(MvalError::EmptyCategory);
        }
        Ok(category)
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
