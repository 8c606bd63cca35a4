//! Zero-sized markers naming each scalar kind a cursor can read and write.
//!
//! The markers drive the generic accessors, e.g.
//! [`CompoundNode::get_`](crate::CompoundNode::get_) and
//! [`ListNode::get_`](crate::ListNode::get_):
//!
//! ```
//! use std::sync::Arc;
//! use nbt_tree::{Anchor, MemoryAnchor, kind};
//!
//! let anchor = Arc::new(MemoryAnchor::new("item"));
//! let root = anchor.root();
//! root.set_::<kind::Short>("damage", 7).unwrap();
//! assert_eq!(root.get_::<kind::Short>("damage"), Some(7));
//! assert_eq!(root.get_::<kind::Int>("damage"), None);
//! ```

use crate::{Tag, Value};

pub trait Kind: Send + Sync + Sized + Clone + Copy + 'static {
    /// The storage kind values of this marker are written as.
    const TAG: Tag;
    type Type;

    /// Extracts the value if `value` is stored as [`Self::TAG`].
    fn from_value(value: &Value) -> Option<Self::Type>;

    fn into_value(value: Self::Type) -> Value;
}

macro_rules! define_kind {
    ($($name:ident($ty:ty)),* $(,)?) => {
        $(
            #[derive(Clone, Copy, Debug)]
            pub struct $name;

            impl Kind for $name {
                const TAG: Tag = Tag::$name;
                type Type = $ty;

                #[inline]
                fn from_value(value: &Value) -> Option<Self::Type> {
                    match value {
                        Value::$name(v) => Some(v.clone()),
                        _ => None,
                    }
                }

                #[inline]
                fn into_value(value: Self::Type) -> Value {
                    Value::$name(value)
                }
            }
        )*
    };
}

define_kind!(
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(std::string::String),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
);

/// A logical boolean stored in a `Byte` slot as `0` or `1`.
///
/// Any non-zero byte reads back as `true`.
#[derive(Clone, Copy, Debug)]
pub struct Bool;

impl Kind for Bool {
    const TAG: Tag = Tag::Byte;
    type Type = bool;

    #[inline]
    fn from_value(value: &Value) -> Option<bool> {
        match value {
            Value::Byte(v) => Some(*v != 0),
            _ => None,
        }
    }

    #[inline]
    fn into_value(value: bool) -> Value {
        Value::Byte(value as i8)
    }
}
