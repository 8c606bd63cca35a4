use crate::{CompoundNode, Error, List, Result, Tag, Value, cold_path, kind::Kind};

/// A cursor to a list stored under a key of a compound.
///
/// Like [`CompoundNode`], a list node holds no data: every call resolves the
/// list through its parent cursor, and every mutation commits a new root.
/// All elements share the element kind the node was obtained with.
///
/// ```
/// use std::sync::Arc;
/// use nbt_tree::{Anchor, MemoryAnchor, Tag, Value};
///
/// let anchor = Arc::new(MemoryAnchor::new("item"));
/// let lore = anchor.root().get_list("Lore", Tag::String).unwrap();
///
/// lore.append("forged in fire").unwrap();
/// assert!(lore.append(1i32).is_err());
/// assert_eq!(lore.get(0).unwrap(), Value::from("forged in fire"));
/// ```
#[derive(Clone, Debug)]
pub struct ListNode {
    parent: CompoundNode,
    name: String,
    element: Tag,
}

impl ListNode {
    pub(crate) fn new(parent: CompoundNode, name: &str, element: Tag) -> Self {
        Self {
            parent,
            name: name.to_owned(),
            element,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn parent(&self) -> &CompoundNode {
        &self.parent
    }

    #[inline]
    pub fn element_tag(&self) -> Tag {
        self.element
    }

    fn read<R>(&self, f: impl FnOnce(&List) -> R) -> Option<R> {
        self.parent
            .read(|compound| compound.get(&self.name).and_then(Value::as_list).map(f))
    }

    fn write<R>(&self, f: impl FnOnce(&mut List) -> Result<R>) -> Result<R> {
        let name = self.name.as_str();
        let element = self.element;
        self.parent
            .write(|compound| match compound.get_mut(name) {
                Some(Value::List(list)) => f(list),
                Some(other) => Err(Error::KindMismatch {
                    key: name.to_owned(),
                    expected: Tag::List,
                    actual: other.tag(),
                }),
                None => {
                    let mut list = List::new(element);
                    let r = f(&mut list)?;
                    compound.insert(name, list);
                    Ok(r)
                }
            })
            .map_err(|e| e.in_list(name))
    }

    fn check(&self, value: &Value) -> Result<()> {
        if value.tag() == self.element {
            return Ok(());
        }
        cold_path();
        Err(Error::ElementMismatch {
            key: self.name.clone(),
            expected: self.element,
            actual: value.tag(),
        })
    }

    fn check_index(&self, index: usize) -> Result<()> {
        let len = self.len();
        if index < len {
            return Ok(());
        }
        cold_path();
        Err(Error::IndexOutOfBounds { index, len })
    }

    /// Number of elements; `0` if the list does not exist (yet).
    pub fn len(&self) -> usize {
        self.read(List::len).unwrap_or(0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `value` to the end of the list.
    ///
    /// # Errors
    ///
    /// [`Error::ElementMismatch`] if `value` is not of the list's element kind.
    pub fn append(&self, value: impl Into<Value>) -> Result<()> {
        let value = value.into();
        self.check(&value)?;
        self.write(|list| list.push(value))
    }

    /// Returns a copy of the element at `index`.
    pub fn get(&self, index: usize) -> Result<Value> {
        self.read(|list| list.get(index).cloned())
            .flatten()
            .ok_or_else(|| Error::IndexOutOfBounds {
                index,
                len: self.len(),
            })
    }

    /// Returns the element at `index` as kind `K`, or `None` if the list holds
    /// another kind.
    pub fn get_<K: Kind>(&self, index: usize) -> Result<Option<K::Type>> {
        self.get(index).map(|value| K::from_value(&value))
    }

    /// Replaces the element at `index`, returning the previous one.
    pub fn set(&self, index: usize, value: impl Into<Value>) -> Result<Value> {
        let value = value.into();
        self.check(&value)?;
        self.check_index(index)?;
        self.write(|list| list.set(index, value))
    }

    /// Removes and returns the element at `index`, shifting later elements down.
    pub fn remove_at(&self, index: usize) -> Result<Value> {
        self.check_index(index)?;
        self.write(|list| list.remove(index))
    }

    pub fn clear(&self) -> Result<()> {
        self.write(|list| {
            list.clear();
            Ok(())
        })
    }

    /// Copies the elements out, in order.
    pub fn to_vec(&self) -> Vec<Value> {
        self.read(|list| list.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Iterates over a copy of the elements taken at the time of the call.
    pub fn iter(&self) -> std::vec::IntoIter<Value> {
        self.to_vec().into_iter()
    }
}

impl IntoIterator for &ListNode {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
