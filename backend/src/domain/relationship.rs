//! Per-user membership relations: favorites, shopping cart and follows.

use std::fmt;

use super::recipe::RecipeId;
use super::user::UserId;

/// Which relationship set a row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationshipKind {
    Favorite,
    ShoppingCart,
    Follow,
}

impl RelationshipKind {
    /// Stable lowercase label used in logs and error details.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::ShoppingCart => "shopping_cart",
            Self::Follow => "follow",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single relationship row, typed by the entity it points at.
///
/// # Examples
/// ```
/// use foodgram::domain::{Relationship, RelationshipKind, UserId};
///
/// let user = UserId::random();
/// let follow = Relationship::Follow { follower: user, author: user };
/// assert_eq!(follow.kind(), RelationshipKind::Follow);
/// assert!(follow.is_self_follow());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relationship {
    Favorite { user: UserId, recipe: RecipeId },
    ShoppingCart { user: UserId, recipe: RecipeId },
    Follow { follower: UserId, author: UserId },
}

impl Relationship {
    /// Relationship set this row lives in.
    #[must_use]
    pub const fn kind(&self) -> RelationshipKind {
        match self {
            Self::Favorite { .. } => RelationshipKind::Favorite,
            Self::ShoppingCart { .. } => RelationshipKind::ShoppingCart,
            Self::Follow { .. } => RelationshipKind::Follow,
        }
    }

    /// User owning the row.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        match self {
            Self::Favorite { user, .. } | Self::ShoppingCart { user, .. } => *user,
            Self::Follow { follower, .. } => *follower,
        }
    }

    /// Whether this is a follow pointing back at its own follower.
    #[must_use]
    pub fn is_self_follow(&self) -> bool {
        matches!(self, Self::Follow { follower, author } if follower == author)
    }

    /// Human-readable name of the target entity, for messages.
    #[must_use]
    pub const fn target_noun(&self) -> &'static str {
        match self {
            Self::Favorite { .. } | Self::ShoppingCart { .. } => "recipe",
            Self::Follow { .. } => "author",
        }
    }

    /// Target identifier rendered as text, for logs and error details.
    #[must_use]
    pub fn target_label(&self) -> String {
        match self {
            Self::Favorite { recipe, .. } | Self::ShoppingCart { recipe, .. } => recipe.to_string(),
            Self::Follow { author, .. } => author.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn follow_between_distinct_users_is_not_self_follow() {
        let rel = Relationship::Follow {
            follower: UserId::random(),
            author: UserId::random(),
        };
        assert!(!rel.is_self_follow());
    }

    #[rstest]
    fn favorite_is_never_self_follow() {
        let rel = Relationship::Favorite {
            user: UserId::random(),
            recipe: RecipeId::new(1),
        };
        assert!(!rel.is_self_follow());
        assert_eq!(rel.target_noun(), "recipe");
        assert_eq!(rel.target_label(), "1");
    }

    #[rstest]
    #[case(RelationshipKind::Favorite, "favorite")]
    #[case(RelationshipKind::ShoppingCart, "shopping_cart")]
    #[case(RelationshipKind::Follow, "follow")]
    fn kinds_have_stable_labels(#[case] kind: RelationshipKind, #[case] label: &str) {
        assert_eq!(kind.to_string(), label);
    }
}
