use std::{fmt, ops::Deref};

use crate::{Compound, Error, Result, Tag, Value, cold_path};

/// The names of the compounds leading from the root to a cursor, root first.
///
/// The root itself has the empty path.
#[derive(Clone, Debug, Default, Hash, PartialEq, Eq)]
pub struct Path {
    segments: Vec<String>,
}

impl Path {
    #[inline]
    pub fn root() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns a new path with `name` appended.
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        Self { segments }
    }
}

impl Deref for Path {
    type Target = [String];

    #[inline]
    fn deref(&self) -> &[String] {
        &self.segments
    }
}

impl<S: Into<String>> FromIterator<S> for Path {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

impl Compound {
    /// Follows `path` down from this compound.
    ///
    /// Returns `None` if any segment is missing or holds something other than
    /// a compound. Never creates anything.
    pub fn resolve(&self, path: &[String]) -> Option<&Compound> {
        let mut current = self;
        for name in path {
            match current.get(name) {
                Some(Value::Compound(child)) => current = child,
                _ => {
                    cold_path();
                    return None;
                }
            }
        }
        Some(current)
    }

    /// Applies `edit` to the compound at `path`, creating missing compounds
    /// on the way.
    ///
    /// Existing compounds are edited in place. Missing segments are built
    /// apart from the tree and attached only once `edit` succeeds, so a
    /// failed call leaves this compound as it was, provided `edit` itself
    /// changes nothing before failing.
    ///
    /// # Errors
    ///
    /// [`Error::KindMismatch`] if a segment exists but holds something other
    /// than a compound, or whatever `edit` returns.
    ///
    /// ```
    /// use nbt_tree::{Compound, Path, Value};
    ///
    /// let path: Path = ["a", "b", "c"].into_iter().collect();
    /// let mut root = Compound::new();
    /// root.rewrite(&path, |leaf| Ok(leaf.insert("x", 5i32))).unwrap();
    ///
    /// let leaf = root.resolve(&path).unwrap();
    /// assert_eq!(leaf.get("x"), Some(&Value::Int(5)));
    /// ```
    pub fn rewrite<R>(
        &mut self,
        path: &[String],
        edit: impl FnOnce(&mut Compound) -> Result<R>,
    ) -> Result<R> {
        let mut current = self;
        let mut rest = path;
        while let Some((name, tail)) = rest.split_first() {
            if !current.contains_key(name) {
                break;
            }
            current = match current.get_mut(name) {
                Some(Value::Compound(child)) => child,
                other => {
                    cold_path();
                    return Err(Error::KindMismatch {
                        key: name.clone(),
                        expected: Tag::Compound,
                        actual: other.map_or(Tag::End, |value| value.tag()),
                    });
                }
            };
            rest = tail;
        }

        let Some((name, tail)) = rest.split_first() else {
            return edit(current);
        };
        let mut leaf = Compound::new();
        let out = edit(&mut leaf)?;
        let detached = tail.iter().rev().fold(leaf, |child, segment| {
            let mut parent = Compound::new();
            parent.insert(segment.as_str(), child);
            parent
        });
        current.insert(name.as_str(), detached);
        Ok(out)
    }
}
