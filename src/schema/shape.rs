//! Value shapes and the `Inferable` visitor
//!
//! Inference never inspects values directly. Every supported type maps
//! itself onto one of five [`Shape`] variants through [`Inferable`], and the
//! inferrer walks that closed variant set.
//!
//! Records are user types, so they implement the trait by listing their
//! members:
//!
//! ```rust
//! use bqs::schema::{default_shape, Inferable, Member, Shape};
//!
//! #[derive(Default)]
//! struct User {
//!     name: String,
//!     age: Option<u32>,
//! }
//!
//! impl Inferable for User {
//!     fn shape(&self) -> Shape {
//!         Shape::record([
//!             Member::new("Name", &self.name),
//!             Member::new("age", &self.age).serde_name("age,omitempty"),
//!         ])
//!     }
//!
//!     fn zero_shape() -> Option<Shape> {
//!         default_shape::<Self>()
//!     }
//! }
//! ```

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;
use std::rc::Rc;
use std::sync::Arc;

// ============================================================================
// Shapes
// ============================================================================

/// Runtime kind of a scalar value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    Str,
    Char,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Bool,
    Timestamp,
    /// A kind with no column type (unit, handles, callables, ...)
    Unsupported(&'static str),
}

impl ScalarKind {
    /// Human-readable kind name
    pub fn name(&self) -> &'static str {
        match self {
            ScalarKind::Str => "string",
            ScalarKind::Char => "char",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::I128 => "i128",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::U128 => "u128",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::Bool => "bool",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::Unsupported(name) => name,
        }
    }
}

/// Structural view of a value
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// A leaf value
    Scalar(ScalarKind),
    /// A reference or optional value; `None` is a null with no static type
    Optional(Option<Box<Shape>>),
    /// A value with declared named members, in declaration order
    Record(Vec<Member>),
    /// A dynamic keyed collection
    Keyed(Vec<Entry>),
    /// An ordered collection
    Ordered(Sequence),
}

impl Shape {
    /// Shape of any inferable value
    pub fn of<T: Inferable + ?Sized>(value: &T) -> Self {
        value.shape()
    }

    /// Build a record shape from its members
    pub fn record(members: impl IntoIterator<Item = Member>) -> Self {
        Shape::Record(members.into_iter().collect())
    }

    /// Name of the shape's kind, for diagnostics
    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Scalar(kind) => kind.name(),
            Shape::Optional(None) => "null",
            Shape::Optional(Some(_)) => "pointer",
            Shape::Record(_) => "record",
            Shape::Keyed(_) => "map",
            Shape::Ordered(_) => "sequence",
        }
    }
}

/// A declared member of a record
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    /// Declared identifier
    pub ident: String,
    /// Explicit schema column name; `-` excludes the member
    pub schema_name: Option<String>,
    /// Serialization name, possibly followed by `,options`
    pub serde_name: Option<String>,
    /// Anonymously embedded member whose fields are promoted
    pub embedded: bool,
    /// Inaccessible members are skipped
    pub readable: bool,
    /// Shape of the member's value
    pub shape: Shape,
}

impl Member {
    /// A directly declared member
    pub fn new<T: Inferable + ?Sized>(ident: impl Into<String>, value: &T) -> Self {
        Self::from_shape(ident, value.shape())
    }

    /// An embedded member
    pub fn embedded<T: Inferable + ?Sized>(ident: impl Into<String>, value: &T) -> Self {
        Self {
            embedded: true,
            ..Self::new(ident, value)
        }
    }

    /// A member with a precomputed shape
    pub fn from_shape(ident: impl Into<String>, shape: Shape) -> Self {
        Self {
            ident: ident.into(),
            schema_name: None,
            serde_name: None,
            embedded: false,
            readable: true,
            shape,
        }
    }

    /// Set the explicit schema column name
    #[must_use]
    pub fn schema_name(mut self, name: impl Into<String>) -> Self {
        self.schema_name = Some(name.into());
        self
    }

    /// Set the serialization name
    #[must_use]
    pub fn serde_name(mut self, name: impl Into<String>) -> Self {
        self.serde_name = Some(name.into());
        self
    }

    /// Mark the member inaccessible
    #[must_use]
    pub fn unreadable(mut self) -> Self {
        self.readable = false;
        self
    }
}

/// Key of a keyed collection entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Str(String),
    /// A non string-like key, by kind name
    Other(&'static str),
}

/// One entry of a keyed collection
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub key: Key,
    pub shape: Shape,
}

/// Contents of an ordered collection
#[derive(Debug, Clone, PartialEq)]
pub enum Sequence {
    Elements(Vec<Shape>),
    /// No elements; carries the element type's zero shape when it has one
    Empty(Option<Box<Shape>>),
}

// ============================================================================
// Inferable
// ============================================================================

/// Types whose values can be mapped onto a [`Shape`]
pub trait Inferable {
    /// Shape of this value
    fn shape(&self) -> Shape;

    /// Shape of the type's zero value, used for absent optionals and empty
    /// sequences. `None` means the type cannot be determined without a
    /// value.
    ///
    /// Record types should return [`default_shape`] here (or be declared
    /// through [`inferable_record!`](crate::inferable_record)). Left at the
    /// default, a `None` of the type contributes no column, and an embedded
    /// `None` fails with [`Error::UnsupportedObject`](crate::Error::UnsupportedObject).
    fn zero_shape() -> Option<Shape>
    where
        Self: Sized,
    {
        None
    }
}

/// Zero shape of a type through its `Default` value
pub fn default_shape<T: Inferable + Default>() -> Option<Shape> {
    Some(T::default().shape())
}

/// Implement [`Inferable`] for a record type from its member list
///
/// The type must implement `Default`; its default value supplies the zero
/// shape, so an absent value of the type still yields its columns.
///
/// ```rust
/// use bqs::schema::Member;
///
/// #[derive(Default)]
/// struct Point {
///     x: i64,
///     y: i64,
/// }
///
/// bqs::inferable_record!(Point, |p| [Member::new("x", &p.x), Member::new("y", &p.y)]);
///
/// let absent: Option<Point> = None;
/// assert_eq!(bqs::infer(&absent).unwrap().len(), 2);
/// ```
#[macro_export]
macro_rules! inferable_record {
    ($ty:ty, |$s:ident| [$($member:expr),* $(,)?]) => {
        impl $crate::schema::Inferable for $ty {
            fn shape(&self) -> $crate::schema::Shape {
                let $s = self;
                $crate::schema::Shape::record([$($member),*])
            }

            fn zero_shape() -> ::core::option::Option<$crate::schema::Shape> {
                $crate::schema::default_shape::<Self>()
            }
        }
    };
}

/// Types usable as keyed collection keys
pub trait MapKey {
    fn key(&self) -> Key;
}

macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Inferable for $ty {
                fn shape(&self) -> Shape {
                    Shape::Scalar(ScalarKind::$kind)
                }

                fn zero_shape() -> Option<Shape> {
                    Some(Shape::Scalar(ScalarKind::$kind))
                }
            }
        )*
    };
}

impl_scalar!(
    String => Str,
    &str => Str,
    Cow<'_, str> => Str,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    bool => Bool,
    chrono::NaiveDateTime => Timestamp,
    std::time::SystemTime => Timestamp,
);

impl Inferable for str {
    fn shape(&self) -> Shape {
        Shape::Scalar(ScalarKind::Str)
    }
}

impl<Tz: chrono::TimeZone> Inferable for chrono::DateTime<Tz> {
    fn shape(&self) -> Shape {
        Shape::Scalar(ScalarKind::Timestamp)
    }

    fn zero_shape() -> Option<Shape> {
        Some(Shape::Scalar(ScalarKind::Timestamp))
    }
}

impl Inferable for () {
    fn shape(&self) -> Shape {
        Shape::Scalar(ScalarKind::Unsupported("unit"))
    }

    fn zero_shape() -> Option<Shape> {
        Some(Shape::Scalar(ScalarKind::Unsupported("unit")))
    }
}

// Optional and reference values

fn optional(inner: Option<Shape>) -> Shape {
    Shape::Optional(inner.map(Box::new))
}

impl<T: Inferable> Inferable for Option<T> {
    fn shape(&self) -> Shape {
        match self {
            Some(value) => optional(Some(value.shape())),
            None => optional(T::zero_shape()),
        }
    }

    fn zero_shape() -> Option<Shape> {
        Some(optional(T::zero_shape()))
    }
}

macro_rules! impl_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Inferable> Inferable for $ptr<T> {
                fn shape(&self) -> Shape {
                    optional(Some((**self).shape()))
                }

                fn zero_shape() -> Option<Shape> {
                    Some(optional(T::zero_shape()))
                }
            }
        )*
    };
}

impl_pointer!(Box, Rc, Arc);

// Ordered collections

fn sequence<'a, T: Inferable + 'a>(items: impl ExactSizeIterator<Item = &'a T>) -> Shape {
    if items.len() == 0 {
        return Shape::Ordered(Sequence::Empty(T::zero_shape().map(Box::new)));
    }
    Shape::Ordered(Sequence::Elements(items.map(|item| item.shape()).collect()))
}

fn empty_sequence<T: Inferable>() -> Option<Shape> {
    Some(Shape::Ordered(Sequence::Empty(T::zero_shape().map(Box::new))))
}

impl<T: Inferable> Inferable for [T] {
    fn shape(&self) -> Shape {
        sequence(self.iter())
    }
}

impl<T: Inferable, const N: usize> Inferable for [T; N] {
    fn shape(&self) -> Shape {
        sequence(self.iter())
    }

    fn zero_shape() -> Option<Shape> {
        empty_sequence::<T>()
    }
}

impl<T: Inferable> Inferable for Vec<T> {
    fn shape(&self) -> Shape {
        sequence(self.iter())
    }

    fn zero_shape() -> Option<Shape> {
        empty_sequence::<T>()
    }
}

impl<T: Inferable> Inferable for VecDeque<T> {
    fn shape(&self) -> Shape {
        sequence(self.iter())
    }

    fn zero_shape() -> Option<Shape> {
        empty_sequence::<T>()
    }
}

// Keyed collections

macro_rules! impl_str_key {
    ($($ty:ty),*) => {
        $(
            impl MapKey for $ty {
                fn key(&self) -> Key {
                    Key::Str(self.to_string())
                }
            }
        )*
    };
}

macro_rules! impl_other_key {
    ($($ty:ty => $name:literal),*) => {
        $(
            impl MapKey for $ty {
                fn key(&self) -> Key {
                    Key::Other($name)
                }
            }
        )*
    };
}

impl_str_key!(String, &str, Cow<'_, str>, Box<str>, Rc<str>, Arc<str>);

impl_other_key!(
    char => "char",
    bool => "bool",
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    i128 => "i128",
    isize => "isize",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    u128 => "u128",
    usize => "usize"
);

fn keyed<'a, K: MapKey + 'a, V: Inferable + 'a>(
    entries: impl Iterator<Item = (&'a K, &'a V)>,
) -> Shape {
    Shape::Keyed(
        entries
            .map(|(key, value)| Entry {
                key: key.key(),
                shape: value.shape(),
            })
            .collect(),
    )
}

impl<K: MapKey, V: Inferable, S: BuildHasher> Inferable for HashMap<K, V, S> {
    fn shape(&self) -> Shape {
        keyed(self.iter())
    }

    fn zero_shape() -> Option<Shape> {
        Some(Shape::Keyed(Vec::new()))
    }
}

impl<K: MapKey, V: Inferable> Inferable for BTreeMap<K, V> {
    fn shape(&self) -> Shape {
        keyed(self.iter())
    }

    fn zero_shape() -> Option<Shape> {
        Some(Shape::Keyed(Vec::new()))
    }
}

// Dynamic JSON values

impl Inferable for serde_json::Value {
    fn shape(&self) -> Shape {
        use serde_json::Value;

        match self {
            Value::Null => Shape::Optional(None),
            Value::Bool(_) => Shape::Scalar(ScalarKind::Bool),
            Value::Number(n) => {
                if n.is_i64() {
                    Shape::Scalar(ScalarKind::I64)
                } else if n.is_u64() {
                    Shape::Scalar(ScalarKind::U64)
                } else {
                    Shape::Scalar(ScalarKind::F64)
                }
            }
            Value::String(_) => Shape::Scalar(ScalarKind::Str),
            Value::Array(items) => sequence(items.iter()),
            Value::Object(map) => map.shape(),
        }
    }
}

impl Inferable for serde_json::Map<String, serde_json::Value> {
    fn shape(&self) -> Shape {
        keyed(self.iter())
    }

    fn zero_shape() -> Option<Shape> {
        Some(Shape::Keyed(Vec::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scalar_shapes() {
        assert_eq!(Shape::of("a"), Shape::Scalar(ScalarKind::Str));
        assert_eq!(Shape::of(&1_u16), Shape::Scalar(ScalarKind::U16));
        assert_eq!(Shape::of(&1.5_f32), Shape::Scalar(ScalarKind::F32));
        assert_eq!(
            Shape::of(&chrono::Utc::now()),
            Shape::Scalar(ScalarKind::Timestamp)
        );
        assert_eq!(Shape::of(&()).kind(), "unit");
    }

    #[test]
    fn test_none_carries_zero_shape() {
        let value: Option<i32> = None;
        assert_eq!(
            value.shape(),
            Shape::Optional(Some(Box::new(Shape::Scalar(ScalarKind::I32))))
        );
    }

    #[test]
    fn test_empty_vec_carries_element_shape() {
        let value: Vec<String> = Vec::new();
        assert_eq!(
            value.shape(),
            Shape::Ordered(Sequence::Empty(Some(Box::new(Shape::Scalar(
                ScalarKind::Str
            )))))
        );
    }

    #[test]
    fn test_json_shapes() {
        assert_eq!(json!(null).shape(), Shape::Optional(None));
        assert_eq!(json!(1).shape(), Shape::Scalar(ScalarKind::I64));
        assert_eq!(json!(u64::MAX).shape(), Shape::Scalar(ScalarKind::U64));
        assert_eq!(json!(1.5).shape(), Shape::Scalar(ScalarKind::F64));
        assert_eq!(json!([]).shape(), Shape::Ordered(Sequence::Empty(None)));

        let Shape::Keyed(entries) = json!({"a": "x"}).shape() else {
            panic!("expected keyed shape");
        };
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].key, Key::Str("a".to_string()));
    }

    #[test]
    fn test_map_keys() {
        let mut map = HashMap::new();
        map.insert(1_i32, "a");
        let Shape::Keyed(entries) = map.shape() else {
            panic!("expected keyed shape");
        };
        assert_eq!(entries[0].key, Key::Other("i32"));
    }
}
