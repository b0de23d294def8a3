//! The closed catalog of selectable dimensions and the shape-per-pair rule.
//!
//! Dimensions form a compile-time-closed set: the time and country
//! meta-dimensions plus the indicator dimensions bound to World Bank codes.
//! Free-form ids only exist at the interface boundary ([`Dimension::from_id`]);
//! everything past that point works with the enum and cannot name an unknown
//! dimension.

use crate::error::WbxError;

/// A selectable axis concept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Time,
    Country,
    GdpGrowth,
    Inflation,
    Unemployment,
}

/// Whether an axis is numeric-ordered or categorical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DimensionKind {
    Continuous,
    Discrete,
}

/// The four presentation layouts, derived solely from the two axis kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartShape {
    Line,
    VerticalBar,
    HorizontalBar,
    Table,
}

impl Dimension {
    /// Registry definition order; drives matrix column order.
    pub const ALL: [Dimension; 5] = [
        Dimension::Time,
        Dimension::Country,
        Dimension::GdpGrowth,
        Dimension::Inflation,
        Dimension::Unemployment,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Dimension::Time => "time",
            Dimension::Country => "country",
            Dimension::GdpGrowth => "gdp_growth",
            Dimension::Inflation => "inflation",
            Dimension::Unemployment => "unemployment",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Dimension::Time => "Time Period",
            Dimension::Country => "Country",
            Dimension::GdpGrowth => "GDP Growth (annual %)",
            Dimension::Inflation => "Inflation Rate (%)",
            Dimension::Unemployment => "Unemployment Rate (%)",
        }
    }

    pub fn kind(self) -> DimensionKind {
        match self {
            Dimension::Country => DimensionKind::Discrete,
            _ => DimensionKind::Continuous,
        }
    }

    /// The World Bank indicator code, or `None` for the time/country
    /// meta-dimensions (those are not themselves fetched series).
    pub fn indicator_code(self) -> Option<&'static str> {
        match self {
            Dimension::Time | Dimension::Country => None,
            Dimension::GdpGrowth => Some("NY.GDP.MKTP.KD.ZG"),
            Dimension::Inflation => Some("FP.CPI.TOTL.ZG"),
            Dimension::Unemployment => Some("SL.UEM.TOTL.ZS"),
        }
    }

    /// Parse an interface-layer id. The only place an unknown dimension can
    /// surface.
    pub fn from_id(id: &str) -> Result<Self, WbxError> {
        Dimension::ALL
            .into_iter()
            .find(|d| d.id() == id)
            .ok_or_else(|| WbxError::UnknownDimension(id.to_string()))
    }
}

/// All code-bound dimensions, in registry definition order.
pub fn indicator_dimensions() -> impl Iterator<Item = Dimension> {
    Dimension::ALL
        .into_iter()
        .filter(|d| d.indicator_code().is_some())
}

/// The shape an axis pairing renders as. Pure and total.
pub fn chart_shape_for(x: Dimension, y: Dimension) -> ChartShape {
    use DimensionKind::{Continuous, Discrete};
    match (x.kind(), y.kind()) {
        (Continuous, Continuous) => ChartShape::Line,
        (Discrete, Continuous) => ChartShape::VerticalBar,
        (Continuous, Discrete) => ChartShape::HorizontalBar,
        (Discrete, Discrete) => ChartShape::Table,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_table_is_exhaustive() {
        for x in Dimension::ALL {
            for y in Dimension::ALL {
                let expected = match (x.kind(), y.kind()) {
                    (DimensionKind::Continuous, DimensionKind::Continuous) => ChartShape::Line,
                    (DimensionKind::Discrete, DimensionKind::Continuous) => ChartShape::VerticalBar,
                    (DimensionKind::Continuous, DimensionKind::Discrete) => {
                        ChartShape::HorizontalBar
                    }
                    (DimensionKind::Discrete, DimensionKind::Discrete) => ChartShape::Table,
                };
                assert_eq!(chart_shape_for(x, y), expected, "{:?} x {:?}", x, y);
            }
        }
    }

    #[test]
    fn same_kind_pairs_are_swap_symmetric() {
        for x in Dimension::ALL {
            for y in Dimension::ALL {
                if x.kind() == y.kind() {
                    assert_eq!(chart_shape_for(x, y), chart_shape_for(y, x));
                }
            }
        }
    }

    #[test]
    fn ids_round_trip_and_unknown_is_rejected() {
        for d in Dimension::ALL {
            assert_eq!(Dimension::from_id(d.id()).unwrap(), d);
        }
        assert!(matches!(
            Dimension::from_id("population"),
            Err(WbxError::UnknownDimension(id)) if id == "population"
        ));
    }

    #[test]
    fn indicator_dimensions_keep_definition_order() {
        let dims: Vec<Dimension> = indicator_dimensions().collect();
        assert_eq!(
            dims,
            vec![
                Dimension::GdpGrowth,
                Dimension::Inflation,
                Dimension::Unemployment
            ]
        );
        assert!(dims.iter().all(|d| d.indicator_code().is_some()));
    }
}
