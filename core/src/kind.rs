use core::fmt;

use crate::value::Value;

/// The discriminant of a [`Value`].
///
/// The set is closed: every [`Value`] has exactly one kind, and every kind
/// has exactly one human-readable name (see [`Kind::name`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Null,
    Int,
    Float,
    Text,
    Sequence,
    Mapping,
    Boxed,
    Object,
    RawRef,
    SharedRef,
    ExclusiveRef,
    WeakRef,
}

impl Kind {
    /// All kinds, in declaration order.
    pub const ALL: [Kind; 12] = [
        Kind::Null,
        Kind::Int,
        Kind::Float,
        Kind::Text,
        Kind::Sequence,
        Kind::Mapping,
        Kind::Boxed,
        Kind::Object,
        Kind::RawRef,
        Kind::SharedRef,
        Kind::ExclusiveRef,
        Kind::WeakRef,
    ];

    /// The name reported by [`Value::type_of`].
    pub const fn name(self) -> &'static str {
        match self {
            Kind::Null => "Null",
            Kind::Int => "Int",
            Kind::Float => "Float",
            Kind::Text => "Text",
            Kind::Sequence => "Sequence",
            Kind::Mapping => "Mapping",
            Kind::Boxed => "Boxed",
            Kind::Object => "Object",
            Kind::RawRef => "RawRef",
            Kind::SharedRef => "SharedRef",
            Kind::ExclusiveRef => "ExclusiveRef",
            Kind::WeakRef => "WeakRef",
        }
    }

    /// Whether values of this kind carry a pointer rather than owned data.
    pub const fn is_pointer_like(self) -> bool {
        matches!(
            self,
            Kind::Boxed | Kind::RawRef | Kind::SharedRef | Kind::ExclusiveRef | Kind::WeakRef
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a value. Same as [`Value::kind`], for callers that want a
/// single dispatch point instead of a chain of predicates.
pub fn kind_of(value: &Value) -> Kind {
    value.kind()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = Kind::ALL.iter().map(|k| k.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Kind::ALL.len());
    }

    #[test]
    fn display_matches_name() {
        for kind in Kind::ALL {
            assert_eq!(kind.to_string(), kind.name());
        }
    }

    #[test]
    fn pointer_like() {
        assert!(Kind::Boxed.is_pointer_like());
        assert!(Kind::WeakRef.is_pointer_like());
        assert!(!Kind::Object.is_pointer_like());
        assert!(!Kind::Sequence.is_pointer_like());
    }
}
