//! Mutable NBT compound trees addressed through path cursors.
//!
//! The root compound of a tree lives in an [`Anchor`], the host object the
//! tree belongs to. [`CompoundNode`] and [`ListNode`] are cursors: they name a
//! location in the tree and resolve every read and write through the anchor,
//! creating missing containers along their path on each write.
//!
//! ```
//! use std::sync::Arc;
//! use nbt_tree::{Anchor, MemoryAnchor, Tag};
//!
//! let anchor = Arc::new(MemoryAnchor::new("item"));
//! let root = anchor.root();
//!
//! let display = root.add_compound("display").unwrap();
//! display.set_string("Name", "Excalibur").unwrap();
//! display.get_list("Lore", Tag::String).unwrap().append("Sharp").unwrap();
//! root.set_bool("Unbreakable", true).unwrap();
//!
//! assert_eq!(root.get_type("display"), Tag::Compound);
//! assert_eq!(root.get_bool("Unbreakable"), Some(true));
//! assert_eq!(
//!     anchor.snapshot().to_string(),
//!     r#"{display:{Name:"Excalibur",Lore:["Sharp"]},Unbreakable:1b}"#
//! );
//! ```

pub mod adapter;
pub mod anchor;
mod error;
pub mod kind;
mod list;
mod node;
mod path;
mod render;
mod tag;
mod util;
mod value;

pub use adapter::*;
pub use anchor::*;
pub use error::*;
pub use list::*;
pub use node::*;
pub use path::*;
pub use render::*;
pub use tag::*;
pub use util::*;
pub use value::*;
