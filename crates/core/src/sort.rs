//! Lot sort modes.
//!
//! Every mode carries a deterministic tie-break so that the ordering is
//! total - pagination is only stable when equal-key rows keep a fixed
//! relative order across calls.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Sort mode for lot listings.
///
/// Wire representation is the kebab-case query value (`sort=price-asc`).
/// Unrecognized values fall back to [`LotSort::Featured`] rather than
/// failing the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LotSort {
    /// Price ascending, then name ascending.
    PriceAsc,
    /// Price descending, then name ascending.
    PriceDesc,
    /// Name ascending.
    NameAsc,
    /// Creation time descending, then name ascending.
    Newest,
    /// Featured lots first, then price ascending, then sort order.
    #[default]
    Featured,
}

impl LotSort {
    /// Parse a wire value, falling back to [`LotSort::Featured`] for
    /// anything unrecognized.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "name-asc" => Self::NameAsc,
            "newest" => Self::Newest,
            _ => Self::Featured,
        }
    }

    /// The wire value of this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::NameAsc => "name-asc",
            Self::Newest => "newest",
            Self::Featured => "featured",
        }
    }
}

impl fmt::Display for LotSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_modes() {
        assert_eq!(LotSort::parse("price-asc"), LotSort::PriceAsc);
        assert_eq!(LotSort::parse("price-desc"), LotSort::PriceDesc);
        assert_eq!(LotSort::parse("name-asc"), LotSort::NameAsc);
        assert_eq!(LotSort::parse("newest"), LotSort::Newest);
        assert_eq!(LotSort::parse("featured"), LotSort::Featured);
    }

    #[test]
    fn unrecognized_falls_back_to_featured() {
        assert_eq!(LotSort::parse(""), LotSort::Featured);
        assert_eq!(LotSort::parse("price"), LotSort::Featured);
        assert_eq!(LotSort::parse("PRICE-ASC"), LotSort::Featured);
    }

    #[test]
    fn roundtrip_through_wire_value() {
        for mode in [
            LotSort::PriceAsc,
            LotSort::PriceDesc,
            LotSort::NameAsc,
            LotSort::Newest,
            LotSort::Featured,
        ] {
            assert_eq!(LotSort::parse(mode.as_str()), mode);
        }
    }
}
