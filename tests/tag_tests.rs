//! Tests for the Tag enum

use nbt_tree::Tag;

#[test]
fn test_tag_ids() {
    assert_eq!(Tag::End.id(), 0);
    assert_eq!(Tag::Byte.id(), 1);
    assert_eq!(Tag::Short.id(), 2);
    assert_eq!(Tag::Int.id(), 3);
    assert_eq!(Tag::Long.id(), 4);
    assert_eq!(Tag::Float.id(), 5);
    assert_eq!(Tag::Double.id(), 6);
    assert_eq!(Tag::ByteArray.id(), 7);
    assert_eq!(Tag::String.id(), 8);
    assert_eq!(Tag::List.id(), 9);
    assert_eq!(Tag::Compound.id(), 10);
    assert_eq!(Tag::IntArray.id(), 11);
    assert_eq!(Tag::LongArray.id(), 12);
}

#[test]
fn test_tag_from_id() {
    for id in 0..=12u8 {
        assert_eq!(Tag::from_id(id).map(Tag::id), Some(id));
    }
    assert_eq!(Tag::from_id(13), None);
    assert_eq!(Tag::from_id(0xFF), None);
}

#[test]
fn test_tag_is_primitive() {
    assert!(Tag::Byte.is_primitive());
    assert!(Tag::Short.is_primitive());
    assert!(Tag::Int.is_primitive());
    assert!(Tag::Long.is_primitive());
    assert!(Tag::Float.is_primitive());
    assert!(Tag::Double.is_primitive());

    assert!(!Tag::End.is_primitive());
    assert!(!Tag::ByteArray.is_primitive());
    assert!(!Tag::String.is_primitive());
    assert!(!Tag::List.is_primitive());
    assert!(!Tag::Compound.is_primitive());
    assert!(!Tag::IntArray.is_primitive());
    assert!(!Tag::LongArray.is_primitive());
}

#[test]
fn test_tag_is_array() {
    assert!(Tag::ByteArray.is_array());
    assert!(Tag::IntArray.is_array());
    assert!(Tag::LongArray.is_array());

    assert!(!Tag::Int.is_array());
    assert!(!Tag::String.is_array());
    assert!(!Tag::List.is_array());
}

#[test]
fn test_tag_is_composite() {
    assert!(Tag::List.is_composite());
    assert!(Tag::Compound.is_composite());

    assert!(!Tag::End.is_composite());
    assert!(!Tag::Byte.is_composite());
    assert!(!Tag::ByteArray.is_composite());
    assert!(!Tag::String.is_composite());
}

#[test]
fn test_tag_display() {
    assert_eq!(Tag::Compound.to_string(), "TAG_Compound");
    assert_eq!(Tag::IntArray.to_string(), "TAG_Int_Array");
    assert_eq!(format!("{:?}", Tag::End), "End");
}

#[test]
fn test_tag_hash() {
    use std::collections::HashSet;
    let mut set = HashSet::new();
    set.insert(Tag::Byte);
    set.insert(Tag::Int);
    set.insert(Tag::Byte); // duplicate

    assert_eq!(set.len(), 2);
    assert!(set.contains(&Tag::Byte));
    assert!(!set.contains(&Tag::Long));
}
