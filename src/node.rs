use std::{
    fmt,
    sync::{Arc, Weak},
};

use crate::{
    Anchor, Compound, Error, List, ListNode, Path, Result, Tag, Value, cold_path,
    kind::{self, Kind},
    validate_key,
};

/// A cursor naming one compound in a tree.
///
/// A node holds no tree data, only its name and a link to its parent. The
/// chain of parents ends at an [`Anchor`], which owns the root. Every read
/// resolves the node's [`Path`] against the anchor's current root, and every
/// write edits the containers along the path and commits the new root.
///
/// Nodes are not cached: two cursors to the same path are independent values
/// that observe each other's writes.
///
/// ```
/// use std::sync::Arc;
/// use nbt_tree::{Anchor, MemoryAnchor};
///
/// let anchor = Arc::new(MemoryAnchor::new("item"));
/// let root = anchor.root();
///
/// root.add_compound("display").unwrap().set_string("Name", "Excalibur").unwrap();
///
/// let display = root.get_compound("display").unwrap();
/// assert_eq!(display.get_string("Name").as_deref(), Some("Excalibur"));
/// ```
#[derive(Clone)]
pub struct CompoundNode {
    inner: Arc<NodeInner>,
}

struct NodeInner {
    name: String,
    parent: Parent,
}

enum Parent {
    Anchor(Weak<dyn Anchor>),
    Node(CompoundNode),
}

impl CompoundNode {
    /// Returns a cursor to the root compound of `anchor`.
    ///
    /// The cursor only holds a weak reference to the anchor.
    pub fn root<A: Anchor + 'static>(anchor: &Arc<A>) -> Self {
        let anchor: Weak<A> = Arc::downgrade(anchor);
        Self::from_weak(anchor)
    }

    /// Like [`root`](Self::root), for an anchor that is already a trait object.
    pub fn attach(anchor: &Arc<dyn Anchor>) -> Self {
        Self::from_weak(Arc::downgrade(anchor))
    }

    fn from_weak(anchor: Weak<dyn Anchor>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                name: String::new(),
                parent: Parent::Anchor(anchor),
            }),
        }
    }

    fn child(&self, name: &str) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                name: name.to_owned(),
                parent: Parent::Node(self.clone()),
            }),
        }
    }

    /// The key this compound is stored under in its parent. Empty for the root.
    #[inline]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    #[inline]
    pub fn parent(&self) -> Option<&CompoundNode> {
        match &self.inner.parent {
            Parent::Node(parent) => Some(parent),
            Parent::Anchor(_) => None,
        }
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent().is_none()
    }

    fn ancestors(&self) -> impl Iterator<Item = &CompoundNode> {
        std::iter::successors(Some(self), |node| node.parent())
    }

    /// Number of parent hops between this cursor and the root.
    pub fn depth(&self) -> usize {
        self.ancestors().count() - 1
    }

    /// The names from the root down to this compound.
    pub fn path(&self) -> Path {
        let mut names: Vec<&str> = self
            .ancestors()
            .filter(|node| !node.is_root())
            .map(CompoundNode::name)
            .collect();
        names.reverse();
        names.into_iter().collect()
    }

    fn anchor(&self) -> Option<Arc<dyn Anchor>> {
        let mut node = self;
        loop {
            match &node.inner.parent {
                Parent::Anchor(anchor) => return anchor.upgrade(),
                Parent::Node(parent) => node = parent,
            }
        }
    }

    /// Returns `false` once the anchor owning the tree has been dropped.
    pub fn is_attached(&self) -> bool {
        self.anchor().is_some()
    }

    pub fn anchor_name(&self) -> Option<String> {
        self.anchor().map(|anchor| anchor.root_name().to_owned())
    }

    /// Resolves this cursor against the anchor's root and hands the compound
    /// found there to `f`. A missing path segment reads as `None`.
    pub(crate) fn read<R>(&self, f: impl FnOnce(&Compound) -> Option<R>) -> Option<R> {
        let path = self.path();
        let Some(anchor) = self.anchor() else {
            cold_path();
            tracing::warn!(%path, "read through a cursor that outlived its anchor");
            return None;
        };
        tracing::trace!(anchor = anchor.root_name(), %path, "resolving");

        let mut f = Some(f);
        let mut out = None;
        anchor.visit_root(&mut |root| {
            if let Some(f) = f.take() {
                out = root.resolve(&path).and_then(f);
            }
        });
        out
    }

    /// Applies `f` to the compound at this cursor's path, creating missing
    /// compounds on the way, and commits the new root to the anchor.
    ///
    /// Nothing is committed if `f` or the path fails.
    pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Compound) -> Result<R>) -> Result<R> {
        let path = self.path();
        let Some(anchor) = self.anchor() else {
            cold_path();
            return Err(Error::Detached(path));
        };

        let mut f = Some(f);
        let mut out = None;
        anchor.update_root(&mut |root| {
            let Some(f) = f.take() else {
                return false;
            };
            let result = root.rewrite(&path, f);
            let commit = result.is_ok();
            out = Some(result);
            commit
        })?;

        match out {
            Some(Ok(r)) => {
                tracing::debug!(
                    anchor = anchor.root_name(),
                    %path,
                    depth = path.len(),
                    "committed root"
                );
                Ok(r)
            }
            Some(Err(e)) => {
                tracing::debug!(anchor = anchor.root_name(), %path, error = %e, "edit rejected");
                Err(e)
            }
            None => Err(Error::Message(format!(
                "anchor {:?} did not apply the edit at {path}",
                anchor.root_name()
            ))),
        }
    }

    /// Returns a copy of the value under `key`.
    pub fn get(&self, key: &str) -> Option<Value> {
        self.read(|compound| compound.get(key).cloned())
    }

    /// Returns the value under `key` as kind `K`.
    ///
    /// `None` if the key is missing or holds another kind. A mismatch is not
    /// an error.
    pub fn get_<K: Kind>(&self, key: &str) -> Option<K::Type> {
        self.read(|compound| compound.get_::<K>(key))
    }

    /// Stores `value` under `key`.
    ///
    /// Type-overwrite, no type-checking on set: whatever was stored under
    /// `key` before is replaced, whatever its kind.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> Result<()> {
        validate_key(key)?;
        let value = value.into();
        self.write(|compound| {
            compound.insert(key, value);
            Ok(())
        })
    }

    #[inline]
    pub fn set_<K: Kind>(&self, key: &str, value: K::Type) -> Result<()> {
        self.set(key, K::into_value(value))
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.read(|compound| Some(compound.contains_key(key)))
            .unwrap_or(false)
    }

    /// Removes `key`. Removing a missing key does nothing.
    pub fn remove_key(&self, key: &str) -> Result<()> {
        if self.is_attached() && !self.has_key(key) {
            return Ok(());
        }
        self.write(|compound| {
            compound.remove(key);
            Ok(())
        })
    }

    /// The keys of this compound in insertion order.
    pub fn keys(&self) -> Vec<String> {
        self.read(|compound| Some(compound.keys().map(str::to_owned).collect()))
            .unwrap_or_default()
    }

    /// Stores an empty compound under `key`, replacing whatever was there,
    /// and returns a cursor to it.
    pub fn add_compound(&self, key: &str) -> Result<CompoundNode> {
        validate_key(key)?;
        self.write(|compound| {
            compound.insert(key, Compound::new());
            Ok(())
        })?;
        Ok(self.child(key))
    }

    /// Returns a cursor to the compound under `key`.
    ///
    /// `None` unless the key exists and holds a compound.
    pub fn get_compound(&self, key: &str) -> Option<CompoundNode> {
        self.read(|compound| match compound.get(key) {
            Some(Value::Compound(_)) => Some(()),
            _ => None,
        })?;
        Some(self.child(key))
    }

    /// Returns a cursor to the list under `key` whose elements are of kind
    /// `element`.
    ///
    /// A missing key gets an empty list declared with `element`. An empty
    /// list without a declared kind is accepted as is.
    ///
    /// # Errors
    ///
    /// [`Error::KindMismatch`] if the key holds something other than a list,
    /// [`Error::ElementMismatch`] if the list declares another element kind.
    pub fn get_list(&self, key: &str, element: Tag) -> Result<ListNode> {
        validate_key(key)?;
        if element == Tag::End {
            cold_path();
            return Err(Error::Message(format!(
                "list {key:?} cannot be declared with element kind {element}"
            )));
        }

        let found = self.read(|compound| {
            compound.get(key).map(|value| match value {
                Value::List(list) => Ok((list.element_tag(), list.is_empty())),
                other => Err(other.tag()),
            })
        });
        match found {
            None => self.write(|compound| {
                compound.insert(key, List::new(element));
                Ok(())
            })?,
            Some(Err(actual)) => {
                return Err(Error::KindMismatch {
                    key: key.to_owned(),
                    expected: Tag::List,
                    actual,
                });
            }
            Some(Ok((declared, empty))) => {
                if declared != element && !(declared == Tag::End && empty) {
                    return Err(Error::ElementMismatch {
                        key: key.to_owned(),
                        expected: element,
                        actual: declared,
                    });
                }
            }
        }
        Ok(ListNode::new(self.clone(), key, element))
    }

    /// The kind stored under `key`, without copying the value.
    ///
    /// [`Tag::End`] if the key is missing.
    pub fn get_type(&self, key: &str) -> Tag {
        self.read(|compound| Some(compound.tag_of(key)))
            .unwrap_or(Tag::End)
    }

    /// Returns a copy of the whole compound at this cursor.
    pub fn snapshot(&self) -> Option<Compound> {
        self.read(|compound| Some(compound.clone()))
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get_::<kind::Bool>(key)
    }

    /// Stores `value` as a byte, `1` or `0`.
    pub fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set_::<kind::Bool>(key, value)
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.get_::<kind::String>(key)
    }

    pub fn set_string(&self, key: &str, value: impl Into<String>) -> Result<()> {
        self.set_::<kind::String>(key, value.into())
    }

    pub fn get_byte_array(&self, key: &str) -> Option<Vec<i8>> {
        self.get_::<kind::ByteArray>(key)
    }

    pub fn set_byte_array(&self, key: &str, value: impl Into<Vec<i8>>) -> Result<()> {
        self.set_::<kind::ByteArray>(key, value.into())
    }

    pub fn get_int_array(&self, key: &str) -> Option<Vec<i32>> {
        self.get_::<kind::IntArray>(key)
    }

    pub fn set_int_array(&self, key: &str, value: impl Into<Vec<i32>>) -> Result<()> {
        self.set_::<kind::IntArray>(key, value.into())
    }

    pub fn get_long_array(&self, key: &str) -> Option<Vec<i64>> {
        self.get_::<kind::LongArray>(key)
    }

    pub fn set_long_array(&self, key: &str, value: impl Into<Vec<i64>>) -> Result<()> {
        self.set_::<kind::LongArray>(key, value.into())
    }
}

macro_rules! scalar_accessors {
    ($($get:ident, $set:ident => $kind:ident($ty:ty)),* $(,)?) => {
        impl CompoundNode {
            $(
                #[inline]
                pub fn $get(&self, key: &str) -> Option<$ty> {
                    self.get_::<kind::$kind>(key)
                }

                #[inline]
                pub fn $set(&self, key: &str, value: $ty) -> Result<()> {
                    self.set_::<kind::$kind>(key, value)
                }
            )*
        }
    };
}

scalar_accessors!(
    get_byte, set_byte => Byte(i8),
    get_short, set_short => Short(i16),
    get_int, set_int => Int(i32),
    get_long, set_long => Long(i64),
    get_float, set_float => Float(f32),
    get_double, set_double => Double(f64),
);

impl fmt::Debug for CompoundNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompoundNode")
            .field("path", &self.path().to_string())
            .field("attached", &self.is_attached())
            .finish()
    }
}
