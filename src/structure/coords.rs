use crate::Lattice;
use fcfit_array_types::V3;

/// Wrapper type for coordinates used as input to some APIs.
///
/// This allows a function to support either cartesian coordinates,
/// or fractional coordinates with respect to some lattice.
#[derive(Debug, Clone, PartialEq)]
pub enum CoordsKind {
    Carts(Vec<V3>),
    Fracs(Vec<V3>),
}

impl CoordsKind {
    pub fn len(&self) -> usize
    { match *self {
        CoordsKind::Carts(ref c) => c.len(),
        CoordsKind::Fracs(ref c) => c.len(),
    }}

    pub fn is_empty(&self) -> bool
    { self.len() == 0 }

    pub fn to_carts(&self, lattice: &Lattice) -> Vec<V3>
    { match *self {
        CoordsKind::Carts(ref c) => c.clone(),
        CoordsKind::Fracs(ref c) => c.iter().map(|v| v * lattice.matrix()).collect(),
    }}

    pub fn to_fracs(&self, lattice: &Lattice) -> Vec<V3>
    { match *self {
        CoordsKind::Carts(ref c) => c.iter().map(|v| v * lattice.inverse_matrix()).collect(),
        CoordsKind::Fracs(ref c) => c.clone(),
    }}

    pub fn into_fracs(self, lattice: &Lattice) -> Vec<V3>
    { match self {
        CoordsKind::Carts(ref c) => c.iter().map(|v| v * lattice.inverse_matrix()).collect(),
        CoordsKind::Fracs(c) => c,
    }}
}
