//! Declared types of injection points and their classification.

use crate::config_type::ConfigType;

/// Raw type of a parameterized declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawType {
    /// Ordered list with positional access.
    List,
    /// Generic collection.
    Collection,
    Set,
    Map,
    Option,
    Other(&'static str),
}

/// Declared type of a field, method or parameter, as reported by the host.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredType {
    /// A plain class.
    Class(ConfigType),
    /// An array of a class.
    Array(ConfigType),
    /// A generic type with its type arguments.
    Parameterized { raw: RawType, args: Vec<ConfigType> },
    /// Anything else (wildcards, type variables).
    Opaque(&'static str),
}

/// Retrieval shape selected for a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeShape {
    Single(ConfigType),
    ArrayOf(ConfigType),
    ListOf(ConfigType),
    CollectionOf(ConfigType),
    Unsupported,
}

impl DeclaredType {
    pub fn class(ty: ConfigType) -> Self {
        DeclaredType::Class(ty)
    }

    pub fn array_of(ty: ConfigType) -> Self {
        DeclaredType::Array(ty)
    }

    pub fn list_of(ty: ConfigType) -> Self {
        DeclaredType::Parameterized {
            raw: RawType::List,
            args: vec![ty],
        }
    }

    pub fn collection_of(ty: ConfigType) -> Self {
        DeclaredType::Parameterized {
            raw: RawType::Collection,
            args: vec![ty],
        }
    }

    pub fn parameterized(raw: RawType, args: Vec<ConfigType>) -> Self {
        DeclaredType::Parameterized { raw, args }
    }

    /// Classifies the declared type.
    ///
    /// Only lists and collections with exactly one type argument are
    /// accepted as collection shapes.
    ///
    /// ```rust
    /// use ferrous_caconfig::{ConfigType, DeclaredType, RawType, TypeShape};
    ///
    /// let map = ConfigType::value_map();
    /// assert_eq!(DeclaredType::list_of(map).shape(), TypeShape::ListOf(map));
    /// assert_eq!(
    ///     DeclaredType::parameterized(RawType::Set, vec![map]).shape(),
    ///     TypeShape::Unsupported
    /// );
    /// assert_eq!(
    ///     DeclaredType::parameterized(RawType::List, vec![map, map]).shape(),
    ///     TypeShape::Unsupported
    /// );
    /// ```
    pub fn shape(&self) -> TypeShape {
        match self {
            DeclaredType::Class(ty) => TypeShape::Single(*ty),
            DeclaredType::Array(ty) => TypeShape::ArrayOf(*ty),
            DeclaredType::Parameterized { raw, args } => match (raw, args.as_slice()) {
                (RawType::List, [ty]) => TypeShape::ListOf(*ty),
                (RawType::Collection, [ty]) => TypeShape::CollectionOf(*ty),
                _ => TypeShape::Unsupported,
            },
            DeclaredType::Opaque(_) => TypeShape::Unsupported,
        }
    }
}
