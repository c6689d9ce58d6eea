//! Numeric bounds applied when validating recipe drafts.
//!
//! Loaded once at startup from configuration and handed to the recipe
//! service; nothing reads these as globals.

/// Default lower bound for amounts and cooking time.
pub const DEFAULT_MIN_VALUE: i32 = 1;
/// Default upper bound for amounts and cooking time.
pub const DEFAULT_MAX_VALUE: i32 = 32_000;
/// Width of the `recipes.name` column; no configured limit may exceed it.
pub const NAME_COLUMN_WIDTH: usize = 200;
/// Default maximum length of a recipe name, in characters.
pub const DEFAULT_NAME_MAX_LENGTH: usize = NAME_COLUMN_WIDTH;

/// Errors raised when limits are internally inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecipeLimitsError {
    /// A lower bound was below one.
    #[error("{field} lower bound must be at least 1, got {min}")]
    NonPositiveMinimum { field: &'static str, min: i32 },
    /// A lower bound exceeded its upper bound.
    #[error("{field} lower bound {min} exceeds upper bound {max}")]
    InvertedRange {
        field: &'static str,
        min: i32,
        max: i32,
    },
    /// The name length limit was zero.
    #[error("recipe name length limit must be positive")]
    ZeroNameLength,
    /// The name length limit is wider than the stored column.
    #[error("recipe name length limit {max} exceeds the stored width of {column}")]
    NameLengthAboveColumn { max: usize, column: usize },
}

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min: i32,
    max: i32,
}

impl Bounds {
    fn try_new(field: &'static str, min: i32, max: i32) -> Result<Self, RecipeLimitsError> {
        if min < 1 {
            return Err(RecipeLimitsError::NonPositiveMinimum { field, min });
        }
        if min > max {
            return Err(RecipeLimitsError::InvertedRange { field, min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    #[must_use]
    pub const fn min(self) -> i32 {
        self.min
    }

    /// Upper bound.
    #[must_use]
    pub const fn max(self) -> i32 {
        self.max
    }

    /// Whether `value` lies within the range.
    #[must_use]
    pub const fn contains(self, value: i32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Bounds for recipe fields.
///
/// # Examples
/// ```
/// use foodgram::domain::RecipeLimits;
///
/// let limits = RecipeLimits::default();
/// assert!(limits.amount().contains(1));
/// assert!(!limits.cooking_time().contains(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeLimits {
    amount: Bounds,
    cooking_time: Bounds,
    name_max_length: usize,
}

impl RecipeLimits {
    /// Build limits, rejecting empty or inverted ranges and name limits the
    /// store cannot hold.
    pub fn try_new(
        amount: (i32, i32),
        cooking_time: (i32, i32),
        name_max_length: usize,
    ) -> Result<Self, RecipeLimitsError> {
        if name_max_length == 0 {
            return Err(RecipeLimitsError::ZeroNameLength);
        }
        if name_max_length > NAME_COLUMN_WIDTH {
            return Err(RecipeLimitsError::NameLengthAboveColumn {
                max: name_max_length,
                column: NAME_COLUMN_WIDTH,
            });
        }
        Ok(Self {
            amount: Bounds::try_new("amount", amount.0, amount.1)?,
            cooking_time: Bounds::try_new("cooking_time", cooking_time.0, cooking_time.1)?,
            name_max_length,
        })
    }

    /// Bounds for ingredient amounts.
    #[must_use]
    pub const fn amount(&self) -> Bounds {
        self.amount
    }

    /// Bounds for cooking time in minutes.
    #[must_use]
    pub const fn cooking_time(&self) -> Bounds {
        self.cooking_time
    }

    /// Maximum recipe name length in characters.
    #[must_use]
    pub const fn name_max_length(&self) -> usize {
        self.name_max_length
    }
}

impl Default for RecipeLimits {
    fn default() -> Self {
        let bounds = Bounds {
            min: DEFAULT_MIN_VALUE,
            max: DEFAULT_MAX_VALUE,
        };
        Self {
            amount: bounds,
            cooking_time: bounds,
            name_max_length: DEFAULT_NAME_MAX_LENGTH,
        }
    }
}
