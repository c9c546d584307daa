//! Symmetry handling variants

use thiserror::Error;

/// Strategy for the symmetry handling inequalities added to a model.
///
/// Encoded on the command line and in file names by the integers `0..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Variant {
    /// No symmetry handling
    #[default]
    None,
    /// Sort the first row
    SortFirstRow,
    /// Sort the first row, whose entries are non-negative
    SortFirstRowNonNegative,
    /// Sort the first row (non-negative) and the first column
    SortFirstRowAndColumn,
    /// Double-lex reflection without sorting
    DoubleLex,
    /// Double-lex reflection with sorting of the first column
    DoubleLexSorted,
    /// Double-lex reflection with sorting of the first column and row
    DoubleLexSortedFirstRow,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VariantError {
    #[error("expected variant to be an integer between 0 and 6, but received {0}")]
    OutOfRange(i64),
    #[error("invalid variant '{0}': not an integer")]
    NotAnInteger(String),
}

impl Variant {
    pub const ALL: [Variant; 7] = [
        Variant::None,
        Variant::SortFirstRow,
        Variant::SortFirstRowNonNegative,
        Variant::SortFirstRowAndColumn,
        Variant::DoubleLex,
        Variant::DoubleLexSorted,
        Variant::DoubleLexSortedFirstRow,
    ];

    /// Integer code of the variant
    pub fn code(self) -> u8 {
        match self {
            Variant::None => 0,
            Variant::SortFirstRow => 1,
            Variant::SortFirstRowNonNegative => 2,
            Variant::SortFirstRowAndColumn => 3,
            Variant::DoubleLex => 4,
            Variant::DoubleLexSorted => 5,
            Variant::DoubleLexSortedFirstRow => 6,
        }
    }
}

impl TryFrom<i64> for Variant {
    type Error = VariantError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        usize::try_from(code)
            .ok()
            .and_then(|idx| Variant::ALL.get(idx).copied())
            .ok_or(VariantError::OutOfRange(code))
    }
}

impl std::str::FromStr for Variant {
    type Err = VariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s
            .trim()
            .parse::<i64>()
            .map_err(|_| VariantError::NotAnInteger(s.to_string()))?;
        Variant::try_from(code)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_roundtrip() {
        for (idx, variant) in Variant::ALL.iter().enumerate() {
            assert_eq!(variant.code() as usize, idx);
            assert_eq!(Variant::try_from(idx as i64).unwrap(), *variant);
        }
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(Variant::try_from(7), Err(VariantError::OutOfRange(7)));
        assert_eq!(Variant::try_from(-1), Err(VariantError::OutOfRange(-1)));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("5".parse::<Variant>().unwrap(), Variant::DoubleLexSorted);
        assert_eq!(" 0 ".parse::<Variant>().unwrap(), Variant::None);
        assert!(matches!(
            "six".parse::<Variant>(),
            Err(VariantError::NotAnInteger(_))
        ));
        assert!(matches!(
            "12".parse::<Variant>(),
            Err(VariantError::OutOfRange(12))
        ));
    }

    #[test]
    fn test_display_is_code() {
        assert_eq!(Variant::DoubleLexSortedFirstRow.to_string(), "6");
    }
}
