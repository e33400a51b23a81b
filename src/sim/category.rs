//! Physics category registry
//!
//! Every body carries a category mask (what it is) and a contact-test mask
//! (what it wants to hear about). Each category owns one bit of a `u32`.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};

use serde::{Deserialize, Serialize};

/// Domain tags that can be placed on a physics body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    None,
    Monster,
    Projectile,
    Player,
}

impl Category {
    /// The single-bit mask for this tag (zero for `None`)
    pub const fn mask(self) -> CategoryMask {
        match self {
            Category::None => CategoryMask::NONE,
            Category::Monster => CategoryMask::MONSTER,
            Category::Projectile => CategoryMask::PROJECTILE,
            Category::Player => CategoryMask::PLAYER,
        }
    }
}

/// A 32-bit set of categories
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct CategoryMask(pub u32);

impl CategoryMask {
    pub const NONE: Self = Self(0);
    pub const MONSTER: Self = Self(0b1);
    pub const PROJECTILE: Self = Self(0b10);
    pub const PLAYER: Self = Self(0b100);
    pub const ALL: Self = Self(u32::MAX);

    /// Raw bit value
    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if any bit of `other` is also set here
    #[inline]
    pub const fn intersects(self, other: CategoryMask) -> bool {
        self.0 & other.0 != 0
    }

    /// True if this mask includes the given category
    #[inline]
    pub const fn contains(self, category: Category) -> bool {
        self.intersects(category.mask())
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<Category> for CategoryMask {
    fn from(category: Category) -> Self {
        category.mask()
    }
}

impl BitOr for CategoryMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOr<Category> for CategoryMask {
    type Output = Self;
    fn bitor(self, rhs: Category) -> Self {
        self | rhs.mask()
    }
}

impl BitOr for Category {
    type Output = CategoryMask;
    fn bitor(self, rhs: Self) -> CategoryMask {
        self.mask() | rhs.mask()
    }
}

impl BitOrAssign for CategoryMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for CategoryMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl fmt::Debug for CategoryMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CategoryMask({:#b})", self.0)
    }
}
