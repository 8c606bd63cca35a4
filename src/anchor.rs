//! The host-side owner of a tree.
//!
//! An [`Anchor`] holds the root compound of a tree inside whatever object the
//! tree belongs to (an item stack, an entity, a file) and persists every new
//! root handed to it. Cursors never own data; each read and write goes
//! through the anchor at the end of their parent chain.
//!
//! # Concurrency
//!
//! Cursors do no locking of their own. An implementation must make
//! [`write_root`](Anchor::write_root) and [`update_root`](Anchor::update_root)
//! safe under the host's concurrency model, which is usually single-threaded
//! access from a game loop.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use parking_lot::RwLock;

use crate::{Compound, CompoundNode, Result};

pub trait Anchor: Send + Sync {
    /// Returns the current root compound.
    fn read_root(&self) -> Compound;

    /// Replaces the root compound and persists it into the host object.
    ///
    /// Must be atomic from the caller's point of view.
    fn write_root(&self, root: Compound) -> Result<()>;

    /// Identifies the anchor in diagnostics.
    fn root_name(&self) -> &str;

    /// Calls `visit` with the current root.
    ///
    /// Implementations that keep the root in memory should override this to
    /// lend it instead of cloning it.
    fn visit_root(&self, visit: &mut dyn FnMut(&Compound)) {
        visit(&self.read_root());
    }

    /// Lets `edit` modify the current root, and persists the result if
    /// `edit` returns `true`. A root `edit` declines is not written back.
    ///
    /// The default reads and writes separately; override it to hold the
    /// host's lock across both.
    fn update_root(&self, edit: &mut dyn FnMut(&mut Compound) -> bool) -> Result<()> {
        let mut root = self.read_root();
        if edit(&mut root) {
            self.write_root(root)?;
        }
        Ok(())
    }

    /// Returns a cursor to the root compound of this anchor.
    fn root(self: &Arc<Self>) -> CompoundNode
    where
        Self: Sized + 'static,
    {
        CompoundNode::root(self)
    }
}

/// An anchor whose host object is the anchor itself: the root lives in memory
/// behind a lock.
///
/// Every committed root increments [`commits`](MemoryAnchor::commits). Edits
/// are applied in place under the write lock.
pub struct MemoryAnchor {
    name: String,
    root: RwLock<Compound>,
    commits: AtomicU64,
}

impl MemoryAnchor {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_root(name, Compound::new())
    }

    pub fn with_root(name: impl Into<String>, root: Compound) -> Self {
        Self {
            name: name.into(),
            root: RwLock::new(root),
            commits: AtomicU64::new(0),
        }
    }

    /// Returns a copy of the whole tree.
    pub fn snapshot(&self) -> Compound {
        self.root.read().clone()
    }

    /// The number of roots written so far.
    pub fn commits(&self) -> u64 {
        self.commits.load(Ordering::Relaxed)
    }

    pub fn into_root(self) -> Compound {
        self.root.into_inner()
    }
}

impl Anchor for MemoryAnchor {
    fn read_root(&self) -> Compound {
        self.snapshot()
    }

    fn write_root(&self, root: Compound) -> Result<()> {
        *self.root.write() = root;
        self.commits.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn root_name(&self) -> &str {
        &self.name
    }

    fn visit_root(&self, visit: &mut dyn FnMut(&Compound)) {
        visit(&*self.root.read());
    }

    fn update_root(&self, edit: &mut dyn FnMut(&mut Compound) -> bool) -> Result<()> {
        let mut root = self.root.write();
        if edit(&mut *root) {
            self.commits.fetch_add(1, Ordering::Relaxed);
        }
        Ok(())
    }
}
