use std::fmt::{self, Display, Write};

use indexmap::IndexMap;

use crate::{Error, Result, Tag, cold_path, kind::Kind};

/// A single value stored in the tree.
///
/// Every value has exactly one storage kind, reported by [`Value::tag`].
/// Booleans have no variant of their own: they are stored as `Byte(0)` or
/// `Byte(1)` (see [`kind::Bool`](crate::kind::Bool)).
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(List),
    Compound(Compound),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Byte(_) => Tag::Byte,
            Value::Short(_) => Tag::Short,
            Value::Int(_) => Tag::Int,
            Value::Long(_) => Tag::Long,
            Value::Float(_) => Tag::Float,
            Value::Double(_) => Tag::Double,
            Value::ByteArray(_) => Tag::ByteArray,
            Value::String(_) => Tag::String,
            Value::List(_) => Tag::List,
            Value::Compound(_) => Tag::Compound,
            Value::IntArray(_) => Tag::IntArray,
            Value::LongArray(_) => Tag::LongArray,
        }
    }

    #[inline]
    pub fn is_<K: Kind>(&self) -> bool {
        self.tag() == K::TAG
    }

    /// Returns the value as kind `K`, or `None` if it is stored as another kind.
    #[inline]
    pub fn get_<K: Kind>(&self) -> Option<K::Type> {
        K::from_value(self)
    }

    pub fn as_compound(&self) -> Option<&Compound> {
        match self {
            Value::Compound(compound) => Some(compound),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from!(
    i8 => Byte,
    i16 => Short,
    i32 => Int,
    i64 => Long,
    f32 => Float,
    f64 => Double,
    Vec<i8> => ByteArray,
    String => String,
    List => List,
    Compound => Compound,
    Vec<i32> => IntArray,
    Vec<i64> => LongArray,
);

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Byte(value as i8)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<&[i8]> for Value {
    #[inline]
    fn from(value: &[i8]) -> Self {
        Value::ByteArray(value.to_vec())
    }
}

impl From<&[i32]> for Value {
    #[inline]
    fn from(value: &[i32]) -> Self {
        Value::IntArray(value.to_vec())
    }
}

impl From<&[i64]> for Value {
    #[inline]
    fn from(value: &[i64]) -> Self {
        Value::LongArray(value.to_vec())
    }
}

/// An insertion-ordered map from key to [`Value`].
///
/// Keys are case-sensitive and unique. Re-inserting an existing key replaces
/// its value in place and keeps its position.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Compound {
    entries: IndexMap<String, Value>,
}

impl Compound {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries.get_mut(key)
    }

    /// Returns the value under `key` as kind `K`.
    ///
    /// A missing key and a key stored as another kind both give `None`.
    #[inline]
    pub fn get_<K: Kind>(&self, key: &str) -> Option<K::Type> {
        self.entries.get(key).and_then(K::from_value)
    }

    /// Inserts `value` under `key`, returning the previous value.
    ///
    /// The key is not validated; cursors check keys before writing.
    #[inline]
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes `key`, keeping the order of the remaining entries.
    #[inline]
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// The kind stored under `key`, or [`Tag::End`] if the key is absent.
    #[inline]
    pub fn tag_of(&self, key: &str) -> Tag {
        self.entries.get(key).map_or(Tag::End, Value::tag)
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Value)> + '_ {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Compound {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl IntoIterator for Compound {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// An ordered sequence of values that all share one declared element kind.
///
/// A list declared with [`Tag::End`] has not been given a kind yet; it adopts
/// the kind of the first value pushed into it.
#[derive(Clone, Debug, PartialEq)]
pub struct List {
    element: Tag,
    items: Vec<Value>,
}

impl Default for List {
    fn default() -> Self {
        Self::new(Tag::End)
    }
}

impl List {
    #[inline]
    pub fn new(element: Tag) -> Self {
        Self {
            element,
            items: Vec::new(),
        }
    }

    #[inline]
    pub fn element_tag(&self) -> Tag {
        self.element
    }

    /// Returns `true` if values of kind `tag` may be stored in this list.
    #[inline]
    pub fn accepts(&self, tag: Tag) -> bool {
        self.element == tag || (self.element == Tag::End && self.items.is_empty())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn push(&mut self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(value.tag())?;
        self.element = value.tag();
        self.items.push(value);
        Ok(())
    }

    /// Replaces the element at `index`, returning the old one.
    pub fn set(&mut self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        self.check(value.tag())?;
        let len = self.items.len();
        match self.items.get_mut(index) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => Err(Error::IndexOutOfBounds { index, len }),
        }
    }

    pub fn remove(&mut self, index: usize) -> Result<Value> {
        if index >= self.items.len() {
            cold_path();
            return Err(Error::IndexOutOfBounds {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    /// Removes every element. The declared element kind is kept.
    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    fn check(&self, tag: Tag) -> Result<()> {
        if self.accepts(tag) {
            return Ok(());
        }
        cold_path();
        Err(Error::ElementMismatch {
            key: String::new(),
            expected: self.element,
            actual: tag,
        })
    }
}

impl<'a> IntoIterator for &'a List {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl IntoIterator for List {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Formats the value in the host's textual tag notation, e.g. `{id:"stone",Count:1b}`.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Byte(v) => write!(f, "{v}b"),
            Value::Short(v) => write!(f, "{v}s"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}L"),
            Value::Float(v) => write!(f, "{v:?}f"),
            Value::Double(v) => write!(f, "{v:?}d"),
            Value::ByteArray(v) => write_array(f, "B", v.iter().map(|b| format!("{b}b"))),
            Value::String(v) => write_quoted(f, v),
            Value::List(v) => Display::fmt(v, f),
            Value::Compound(v) => Display::fmt(v, f),
            Value::IntArray(v) => write_array(f, "I", v.iter().map(i32::to_string)),
            Value::LongArray(v) => write_array(f, "L", v.iter().map(|l| format!("{l}L"))),
        }
    }
}

impl Display for List {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('[')?;
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            Display::fmt(item, f)?;
        }
        f.write_char(']')
    }
}

impl Display for Compound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('{')?;
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_char(',')?;
            }
            if is_bare_key(key) {
                f.write_str(key)?;
            } else {
                write_quoted(f, key)?;
            }
            f.write_char(':')?;
            Display::fmt(value, f)?;
        }
        f.write_char('}')
    }
}

fn is_bare_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'_' | b'-' | b'.' | b'+'))
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    f.write_char('"')?;
    for c in s.chars() {
        if matches!(c, '"' | '\\') {
            f.write_char('\\')?;
        }
        f.write_char(c)?;
    }
    f.write_char('"')
}

fn write_array(
    f: &mut fmt::Formatter<'_>,
    prefix: &str,
    items: impl Iterator<Item = String>,
) -> fmt::Result {
    write!(f, "[{prefix};")?;
    for (i, item) in items.enumerate() {
        if i > 0 {
            f.write_char(',')?;
        }
        f.write_str(&item)?;
    }
    f.write_char(']')
}

#[cfg(feature = "serde")]
mod serde_impl {
    use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

    use super::{Compound, List, Value};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Value::Byte(v) => serializer.serialize_i8(*v),
                Value::Short(v) => serializer.serialize_i16(*v),
                Value::Int(v) => serializer.serialize_i32(*v),
                Value::Long(v) => serializer.serialize_i64(*v),
                Value::Float(v) => serializer.serialize_f32(*v),
                Value::Double(v) => serializer.serialize_f64(*v),
                Value::ByteArray(v) => v.serialize(serializer),
                Value::String(v) => serializer.serialize_str(v),
                Value::List(v) => v.serialize(serializer),
                Value::Compound(v) => v.serialize(serializer),
                Value::IntArray(v) => v.serialize(serializer),
                Value::LongArray(v) => v.serialize(serializer),
            }
        }
    }

    impl Serialize for List {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut seq = serializer.serialize_seq(Some(self.items.len()))?;
            for item in &self.items {
                seq.serialize_element(item)?;
            }
            seq.end()
        }
    }

    impl Serialize for Compound {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.entries.len()))?;
            for (key, value) in &self.entries {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}
