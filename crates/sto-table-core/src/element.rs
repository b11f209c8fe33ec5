//! Element types stored in the data columns of an STO table.
//!
//! Every data cell of a table holds the same element type: a scalar `double`
//! or one of a closed family of small fixed-size vector types. This module
//! defines:
//!
//! - [`ElementType`], the discriminant used for all type resolution. Its
//!   declaration order is the writer's documented resolution order.
//! - [`Element`], implemented by anything a `TimeSeriesTable` can hold. The
//!   associated [`Element::ELEMENT_TYPE`] is how a type-erased table reports
//!   its element type without runtime probing.
//! - [`StoElement`], the subset of elements that the STO format can store,
//!   together with their cell text codec.

use std::fmt;

mod cell;
mod values;

pub use values::{
    Quaternion, SpatialVec, UnitVec3, Vec2, Vec3, Vec4, Vec5, Vec6, Vec7, Vec8, Vec9, Vec10,
    Vec11, Vec12, VecN,
};

use crate::registry;

/// Discriminant for every element type the STO format supports.
///
/// Variants are declared in the order the writer resolves them: the
/// specialised 3-vector/rotation types first, then `double`, then the plain
/// vectors by size. A table has exactly one element type, so the order never
/// decides between two candidates; it is kept as a stable, documented
/// ordering (`Ord`, [`ElementType::ALL`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ElementType {
    /// Unit-length 3-vector (`UnitVec3`).
    UnitVec3,
    /// Rotation quaternion (`Quaternion`).
    Quaternion,
    /// Angular/linear 3-vector pair (`SpatialVec`).
    SpatialVec,
    /// Scalar `f64` (`double`).
    Double,
    /// 2-vector.
    Vec2,
    /// 3-vector.
    Vec3,
    /// 4-vector.
    Vec4,
    /// 5-vector.
    Vec5,
    /// 6-vector.
    Vec6,
    /// 7-vector.
    Vec7,
    /// 8-vector.
    Vec8,
    /// 9-vector.
    Vec9,
    /// 10-vector.
    Vec10,
    /// 11-vector.
    Vec11,
    /// 12-vector.
    Vec12,
}

impl ElementType {
    /// All element types in declaration (writer resolution) order.
    pub const ALL: [ElementType; 15] = [
        ElementType::UnitVec3,
        ElementType::Quaternion,
        ElementType::SpatialVec,
        ElementType::Double,
        ElementType::Vec2,
        ElementType::Vec3,
        ElementType::Vec4,
        ElementType::Vec5,
        ElementType::Vec6,
        ElementType::Vec7,
        ElementType::Vec8,
        ElementType::Vec9,
        ElementType::Vec10,
        ElementType::Vec11,
        ElementType::Vec12,
    ];

    /// Element type assumed for files whose header declares no data type.
    ///
    /// Pre-versioning STO files only ever stored scalar columns.
    pub const LEGACY_DEFAULT: ElementType = ElementType::Double;

    /// The header name of this element type (case-sensitive wire string).
    pub const fn name(self) -> &'static str {
        match self {
            ElementType::UnitVec3 => "UnitVec3",
            ElementType::Quaternion => "Quaternion",
            ElementType::SpatialVec => "SpatialVec",
            ElementType::Double => "double",
            ElementType::Vec2 => "Vec2",
            ElementType::Vec3 => "Vec3",
            ElementType::Vec4 => "Vec4",
            ElementType::Vec5 => "Vec5",
            ElementType::Vec6 => "Vec6",
            ElementType::Vec7 => "Vec7",
            ElementType::Vec8 => "Vec8",
            ElementType::Vec9 => "Vec9",
            ElementType::Vec10 => "Vec10",
            ElementType::Vec11 => "Vec11",
            ElementType::Vec12 => "Vec12",
        }
    }

    /// Resolve a header name to its element type.
    ///
    /// Matching is exact and case-sensitive; `"vec3"` or `" Vec3"` do not
    /// resolve.
    pub fn from_name(name: &str) -> Option<ElementType> {
        registry::entry_by_name(name).map(|entry| entry.element_type())
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value that can be stored in the data columns of a `TimeSeriesTable`.
pub trait Element: Clone + fmt::Debug + PartialEq + Send + Sync + 'static {
    /// The registry element type of `Self`, or `None` when the STO format
    /// has no representation for it.
    const ELEMENT_TYPE: Option<ElementType>;
}

/// An [`Element`] the STO format can read and write.
pub trait StoElement: Element {
    /// The registry element type of `Self`.
    const STO_TYPE: ElementType;

    /// Append the cell text for `self` to `out`.
    fn format_cell(&self, out: &mut String);

    /// Parse one cell. Returns `None` for malformed text.
    fn parse_cell(text: &str) -> Option<Self>;
}

impl Element for f64 {
    const ELEMENT_TYPE: Option<ElementType> = Some(ElementType::Double);
}

impl StoElement for f64 {
    const STO_TYPE: ElementType = ElementType::Double;

    fn format_cell(&self, out: &mut String) {
        cell::push_f64(out, *self);
    }

    fn parse_cell(text: &str) -> Option<Self> {
        cell::parse_f64(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_registry() {
        for element_type in ElementType::ALL {
            assert_eq!(
                ElementType::from_name(element_type.name()),
                Some(element_type)
            );
        }
    }

    #[test]
    fn from_name_is_exact_and_case_sensitive() {
        assert_eq!(ElementType::from_name("Vec3"), Some(ElementType::Vec3));
        assert_eq!(ElementType::from_name("vec3"), None);
        assert_eq!(ElementType::from_name(" Vec3"), None);
        assert_eq!(ElementType::from_name("Double"), None);
        assert_eq!(ElementType::from_name("Vec13"), None);
        assert_eq!(ElementType::from_name(""), None);
    }

    #[test]
    fn declaration_order_is_writer_resolution_order() {
        let mut sorted = ElementType::ALL;
        sorted.sort();
        assert_eq!(sorted, ElementType::ALL);

        let names: Vec<&str> = ElementType::ALL.iter().map(|t| t.name()).collect();
        assert_eq!(
            names,
            vec![
                "UnitVec3",
                "Quaternion",
                "SpatialVec",
                "double",
                "Vec2",
                "Vec3",
                "Vec4",
                "Vec5",
                "Vec6",
                "Vec7",
                "Vec8",
                "Vec9",
                "Vec10",
                "Vec11",
                "Vec12",
            ]
        );
    }

    #[test]
    fn double_cells_accept_special_values() {
        assert_eq!(f64::parse_cell(" 1.5 "), Some(1.5));
        assert_eq!(f64::parse_cell("inf"), Some(f64::INFINITY));
        assert!(f64::parse_cell("NaN").is_some_and(f64::is_nan));
        assert_eq!(f64::parse_cell("1.5x"), None);
        assert_eq!(f64::parse_cell(""), None);
    }
}
