use std::fmt::{self, Write};

use crate::{Compound, CompoundNode, Value};

/// Indentation emitted once per parent hop between a cursor and the root.
pub const INDENT: &str = "   ";

impl CompoundNode {
    /// Dumps this compound as one `-key: value` line per non-compound entry.
    ///
    /// Nested compounds are not given a line of their own; their entries are
    /// listed one [`INDENT`] deeper. The indentation of the first level is
    /// the depth of this cursor, so a dump of a nested cursor lines up with a
    /// dump of the whole tree.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use nbt_tree::{Anchor, MemoryAnchor};
    ///
    /// let anchor = Arc::new(MemoryAnchor::new("item"));
    /// let root = anchor.root();
    /// root.set_int("a", 1).unwrap();
    /// root.add_compound("b").unwrap().set_int("c", 2).unwrap();
    ///
    /// assert_eq!(root.render(), "-a: 1\n   -c: 2\n");
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(compound) = self.snapshot() {
            // Writing into a String cannot fail.
            let _ = render_compound(&mut out, &compound, self.depth());
        }
        out
    }
}

fn render_compound(out: &mut impl Write, compound: &Compound, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);
    for (key, value) in compound.iter() {
        match value {
            Value::Compound(child) => render_compound(out, child, depth + 1)?,
            value => writeln!(out, "{indent}-{key}: {value}")?,
        }
    }
    Ok(())
}

impl fmt::Display for CompoundNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.snapshot() {
            Some(compound) => render_compound(f, &compound, self.depth()),
            None => Ok(()),
        }
    }
}
