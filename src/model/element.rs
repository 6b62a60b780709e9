use std::fmt;
use std::num::NonZeroU64;

/// Feature identifier as produced by the map renderer. The entity kind lives in
/// the last decimal digit, the OpenStreetMap id in the remaining digits.
pub type CompositeIdentifier = i64;

/// Reserved composite value for merged/unioned features with no single source entity.
pub const UNRESOLVABLE_COMPOSITE: CompositeIdentifier = 0;

const KIND_DIVISOR: i64 = 10;

/// Kind of an OpenStreetMap element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Way => write!(f, "way"),
            ElementKind::Relation => write!(f, "relation"),
        }
    }
}

/// Typed reference to a single OpenStreetMap element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityReference {
    Node(NonZeroU64),
    Way(NonZeroU64),
    Relation(NonZeroU64),
}

impl EntityReference {
    pub fn node(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(EntityReference::Node)
    }

    pub fn way(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(EntityReference::Way)
    }

    pub fn relation(id: u64) -> Option<Self> {
        NonZeroU64::new(id).map(EntityReference::Relation)
    }

    /// Decode a renderer composite identifier.
    ///
    /// Remainder 0 is a node, 1 and 2 are ways, 3 and 4 are relations (original
    /// and derived geometry respectively). Any other remainder, a non-positive
    /// composite, or a zero id decodes to `None`.
    pub fn decode(composite: CompositeIdentifier) -> Option<Self> {
        if composite <= UNRESOLVABLE_COMPOSITE {
            return None;
        }

        let id = u64::try_from(composite / KIND_DIVISOR).ok()?;
        match composite % KIND_DIVISOR {
            0 => Self::node(id),
            1 | 2 => Self::way(id),
            3 | 4 => Self::relation(id),
            _ => None,
        }
    }

    /// Encode back into a composite identifier using the original-geometry tag
    /// of each kind. `None` if the id does not fit.
    pub fn encode(&self) -> Option<CompositeIdentifier> {
        let tag = match self {
            EntityReference::Node(_) => 0,
            EntityReference::Way(_) => 1,
            EntityReference::Relation(_) => 3,
        };
        i64::try_from(self.id())
            .ok()?
            .checked_mul(KIND_DIVISOR)?
            .checked_add(tag)
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            EntityReference::Node(_) => ElementKind::Node,
            EntityReference::Way(_) => ElementKind::Way,
            EntityReference::Relation(_) => ElementKind::Relation,
        }
    }

    pub fn id(&self) -> u64 {
        match self {
            EntityReference::Node(id) | EntityReference::Way(id) | EntityReference::Relation(id) => {
                id.get()
            }
        }
    }
}

/// Overpass QL element selector, e.g. `way(5)`
impl fmt::Display for EntityReference {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}({})", self.kind(), self.id())
    }
}
