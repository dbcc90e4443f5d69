//! Role rotation shared by every decomposition strategy.

use crate::topology::Triplet;

/// `(source1, source2, target)` positions within a triplet, one per rotation:
/// `(A, B -> C)`, `(A, C -> B)`, `(B, C -> A)`.
pub const ROTATIONS: [(usize, usize, usize); 3] = [(0, 1, 2), (0, 2, 1), (1, 2, 0)];

/// One assignment of channels to the source and target roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAssignment<'a> {
    pub source1: &'a str,
    pub source2: &'a str,
    pub target: &'a str,
}

impl<'a> RoleAssignment<'a> {
    pub fn new(source1: &'a str, source2: &'a str, target: &'a str) -> Self {
        Self { source1, source2, target }
    }

    /// Place the triplet's channels at the given `(source1, source2, target)` positions.
    pub fn from_indices(triplet: &'a Triplet, (s1, s2, t): (usize, usize, usize)) -> Self {
        let c = triplet.channels();
        Self::new(&c[s1], &c[s2], &c[t])
    }

    /// The three assignments every triplet is evaluated under, in output order.
    pub fn rotations(triplet: &'a Triplet) -> [Self; 3] {
        ROTATIONS.map(|idx| Self::from_indices(triplet, idx))
    }
}
