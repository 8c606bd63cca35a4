//! Tests for host anchors: default write-back and failure propagation

use std::{
    panic::{AssertUnwindSafe, catch_unwind},
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};

use nbt_tree::{Anchor, Compound, Error, MemoryAnchor, Result, Tag, Value};
use parking_lot::Mutex;

/// A host object that keeps its data as a serialized tag string, the way an
/// item keeps its metadata, and only implements the required methods.
struct ItemMeta {
    root: Mutex<Compound>,
    persisted: Mutex<Vec<String>>,
    read_only: AtomicBool,
}

impl ItemMeta {
    fn new() -> Self {
        Self {
            root: Mutex::new(Compound::new()),
            persisted: Mutex::new(Vec::new()),
            read_only: AtomicBool::new(false),
        }
    }
}

impl Anchor for ItemMeta {
    fn read_root(&self) -> Compound {
        self.root.lock().clone()
    }

    fn write_root(&self, root: Compound) -> Result<()> {
        if self.read_only.load(Ordering::Relaxed) {
            return Err(Error::Message("item meta is read-only".to_owned()));
        }
        self.persisted.lock().push(root.to_string());
        *self.root.lock() = root;
        Ok(())
    }

    fn root_name(&self) -> &str {
        "ItemMeta"
    }
}

#[test]
fn default_update_root_persists_each_write() {
    let meta = Arc::new(ItemMeta::new());
    let root = meta.root();

    let display = root.add_compound("display").unwrap();
    display.set_string("Name", "Blade").unwrap();
    root.set_int("Damage", 2).unwrap();

    let persisted = meta.persisted.lock().clone();
    assert_eq!(
        persisted,
        [
            "{display:{}}",
            r#"{display:{Name:"Blade"}}"#,
            r#"{display:{Name:"Blade"},Damage:2}"#,
        ]
    );
    assert_eq!(root.anchor_name().as_deref(), Some("ItemMeta"));
}

#[test]
fn anchor_errors_reach_the_caller() {
    let meta = Arc::new(ItemMeta::new());
    let root = meta.root();
    root.set_int("kept", 1).unwrap();

    meta.read_only.store(true, Ordering::Relaxed);
    assert!(matches!(root.set_int("lost", 2), Err(Error::Message(_))));
    assert!(matches!(root.add_compound("c"), Err(Error::Message(_))));
    let list = root.get_list("l", Tag::Int);
    assert!(matches!(list, Err(Error::Message(_))));

    assert!(!root.has_key("lost"));
    assert_eq!(root.keys(), ["kept"]);
}

#[test]
fn memory_anchor_counts_commits() {
    let anchor = Arc::new(MemoryAnchor::new("mem"));
    let root = anchor.root();
    root.set_int("a", 1).unwrap();
    root.set_int("b", 2).unwrap();
    assert_eq!(anchor.commits(), 2);
    assert_eq!(anchor.root_name(), "mem");

    let anchor = Arc::try_unwrap(anchor).ok().unwrap();
    let tree = anchor.into_root();
    assert_eq!(tree.get("b"), Some(&Value::Int(2)));
}

#[test]
fn writes_from_several_threads_are_serialized() {
    let anchor = Arc::new(MemoryAnchor::new("shared"));
    let list = anchor.root().get_list("log", Tag::Int).unwrap();

    std::thread::scope(|scope| {
        for t in 0..4i32 {
            let list = list.clone();
            scope.spawn(move || {
                for i in 0..25 {
                    list.append(t * 100 + i).unwrap();
                }
            });
        }
    });

    // MemoryAnchor holds its lock across each read-modify-write
    assert_eq!(list.len(), 100);
}

#[test]
fn declined_edit_is_not_persisted() {
    let meta = Arc::new(ItemMeta::new());
    meta.root().set_int("a", 1).unwrap();

    meta.update_root(&mut |root| {
        root.insert("b", 2i32);
        false
    })
    .unwrap();

    assert_eq!(meta.persisted.lock().len(), 1);
    assert!(!meta.read_root().contains_key("b"));
}

#[test]
fn panicking_edit_keeps_the_root() {
    let anchor = Arc::new(MemoryAnchor::new("mem"));
    anchor.root().set_int("a", 1).unwrap();

    let result = catch_unwind(AssertUnwindSafe(|| {
        anchor.update_root(&mut |_root| panic!("edit failed"))
    }));
    assert!(result.is_err());

    assert_eq!(anchor.snapshot().get("a"), Some(&Value::Int(1)));
    assert_eq!(anchor.commits(), 1);
    anchor.root().set_int("b", 2).unwrap();
    assert_eq!(anchor.commits(), 2);
}
