//! Fixed-size vector element values.
//!
//! These are storage types only: they carry components in and out of STO
//! cells. `UnitVec3` and `Quaternion` normalise when built from arbitrary
//! components; values parsed from a file are taken verbatim.

use super::{Element, ElementType, StoElement, cell};

/// A plain `N`-component vector of `f64`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VecN<const N: usize>(pub [f64; N]);

/// 2-vector.
pub type Vec2 = VecN<2>;
/// 3-vector.
pub type Vec3 = VecN<3>;
/// 4-vector.
pub type Vec4 = VecN<4>;
/// 5-vector.
pub type Vec5 = VecN<5>;
/// 6-vector.
pub type Vec6 = VecN<6>;
/// 7-vector.
pub type Vec7 = VecN<7>;
/// 8-vector.
pub type Vec8 = VecN<8>;
/// 9-vector.
pub type Vec9 = VecN<9>;
/// 10-vector.
pub type Vec10 = VecN<10>;
/// 11-vector.
pub type Vec11 = VecN<11>;
/// 12-vector.
pub type Vec12 = VecN<12>;

impl<const N: usize> VecN<N> {
    /// Build a vector from its components.
    pub const fn new(components: [f64; N]) -> Self {
        Self(components)
    }

    /// Vector with every component equal to `value`.
    pub const fn splat(value: f64) -> Self {
        Self([value; N])
    }

    /// The components, in order.
    pub const fn components(&self) -> &[f64; N] {
        &self.0
    }
}

impl<const N: usize> From<[f64; N]> for VecN<N> {
    fn from(components: [f64; N]) -> Self {
        Self(components)
    }
}

macro_rules! impl_vec_element {
    ($($n:literal => $variant:ident),+ $(,)?) => {
        $(
            impl Element for VecN<$n> {
                const ELEMENT_TYPE: Option<ElementType> = Some(ElementType::$variant);
            }

            impl StoElement for VecN<$n> {
                const STO_TYPE: ElementType = ElementType::$variant;

                fn format_cell(&self, out: &mut String) {
                    cell::push_components(out, &self.0);
                }

                fn parse_cell(text: &str) -> Option<Self> {
                    cell::parse_components::<$n>(text).map(Self)
                }
            }
        )+
    };
}

impl_vec_element!(
    2 => Vec2,
    3 => Vec3,
    4 => Vec4,
    5 => Vec5,
    6 => Vec6,
    7 => Vec7,
    8 => Vec8,
    9 => Vec9,
    10 => Vec10,
    11 => Vec11,
    12 => Vec12,
);

fn normalized<const N: usize>(components: [f64; N]) -> [f64; N] {
    let norm = components.iter().map(|c| c * c).sum::<f64>().sqrt();
    // A zero vector has no direction; it becomes all-NaN rather than a guess.
    components.map(|c| c / norm)
}

/// A 3-vector of unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitVec3([f64; 3]);

impl UnitVec3 {
    /// Normalise `(x, y, z)` to unit length.
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self(normalized([x, y, z]))
    }

    /// Wrap components that are already unit length, without normalising.
    pub const fn from_unit_components(components: [f64; 3]) -> Self {
        Self(components)
    }

    /// The components `[x, y, z]`.
    pub const fn components(&self) -> &[f64; 3] {
        &self.0
    }
}

impl Element for UnitVec3 {
    const ELEMENT_TYPE: Option<ElementType> = Some(ElementType::UnitVec3);
}

impl StoElement for UnitVec3 {
    const STO_TYPE: ElementType = ElementType::UnitVec3;

    fn format_cell(&self, out: &mut String) {
        cell::push_components(out, &self.0);
    }

    fn parse_cell(text: &str) -> Option<Self> {
        cell::parse_components::<3>(text).map(Self)
    }
}

/// A rotation quaternion stored as `[w, x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion([f64; 4]);

impl Quaternion {
    /// The identity rotation.
    pub const IDENTITY: Quaternion = Quaternion([1.0, 0.0, 0.0, 0.0]);

    /// Normalise `(w, x, y, z)` to a unit quaternion.
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self(normalized([w, x, y, z]))
    }

    /// Wrap `[w, x, y, z]` verbatim, without normalising.
    pub const fn from_unit_components(components: [f64; 4]) -> Self {
        Self(components)
    }

    /// The components `[w, x, y, z]`.
    pub const fn components(&self) -> &[f64; 4] {
        &self.0
    }
}

impl Element for Quaternion {
    const ELEMENT_TYPE: Option<ElementType> = Some(ElementType::Quaternion);
}

impl StoElement for Quaternion {
    const STO_TYPE: ElementType = ElementType::Quaternion;

    fn format_cell(&self, out: &mut String) {
        cell::push_components(out, &self.0);
    }

    fn parse_cell(text: &str) -> Option<Self> {
        cell::parse_components::<4>(text).map(Self)
    }
}

/// A pair of 3-vectors: angular part first, then linear part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialVec {
    /// Angular (rotational) component.
    pub angular: Vec3,
    /// Linear (translational) component.
    pub linear: Vec3,
}

impl SpatialVec {
    /// Build a spatial vector from its angular and linear parts.
    pub const fn new(angular: Vec3, linear: Vec3) -> Self {
        Self { angular, linear }
    }
}

impl Element for SpatialVec {
    const ELEMENT_TYPE: Option<ElementType> = Some(ElementType::SpatialVec);
}

impl StoElement for SpatialVec {
    const STO_TYPE: ElementType = ElementType::SpatialVec;

    fn format_cell(&self, out: &mut String) {
        out.push_str("~[");
        cell::push_components(out, &self.angular.0);
        out.push(',');
        cell::push_components(out, &self.linear.0);
        out.push(']');
    }

    fn parse_cell(text: &str) -> Option<Self> {
        let inner = cell::unwrap_brackets(text)?;
        let (angular, linear) = cell::split_nested_pair(inner)?;
        Some(Self {
            angular: VecN(cell::parse_components::<3>(angular)?),
            linear: VecN(cell::parse_components::<3>(linear)?),
        })
    }
}
