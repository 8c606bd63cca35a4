//! Tests for the Error type

use nbt_tree::{Error, Path, Tag};

#[test]
fn test_error_display_kind_mismatch() {
    let error = Error::KindMismatch {
        key: "lore".to_owned(),
        expected: Tag::List,
        actual: Tag::Int,
    };
    assert_eq!(
        error.to_string(),
        "kind mismatch for key \"lore\": expected TAG_List, got TAG_Int"
    );
}

#[test]
fn test_error_display_element_mismatch() {
    let error = Error::ElementMismatch {
        key: "lore".to_owned(),
        expected: Tag::String,
        actual: Tag::Int,
    };
    assert_eq!(
        error.to_string(),
        "element kind mismatch in list \"lore\": expected TAG_String, got TAG_Int"
    );
}

#[test]
fn test_error_display_index_out_of_bounds() {
    let error = Error::IndexOutOfBounds { index: 3, len: 2 };
    assert_eq!(error.to_string(), "index 3 out of bounds for list of length 2");
}

#[test]
fn test_error_display_detached() {
    let path: Path = ["display", "lore"].into_iter().collect();
    assert_eq!(
        Error::Detached(path).to_string(),
        "cursor at /display/lore outlived its anchor"
    );
    assert_eq!(
        Error::Detached(Path::root()).to_string(),
        "cursor at / outlived its anchor"
    );
}

#[test]
fn test_error_display_adapters() {
    assert_eq!(
        Error::NoAdapter("my::Type").to_string(),
        "no adapter registered for type my::Type"
    );
    let error = Error::AdapterMismatch {
        key: "owner".to_owned(),
        expected: "uuid".to_owned(),
        actual: "level".to_owned(),
    };
    assert_eq!(
        error.to_string(),
        "object under key \"owner\" was stored as \"level\", not \"uuid\""
    );
}

#[test]
fn test_error_display_message_and_key() {
    assert_eq!(Error::Message("boom".to_owned()).to_string(), "boom");
    assert_eq!(
        Error::InvalidKey(String::new()).to_string(),
        "invalid compound key: \"\""
    );
}

#[test]
fn test_error_is_std_error() {
    fn assert_error<E: std::error::Error + Send + Sync + 'static>() {}
    assert_error::<Error>();
}

#[test]
fn test_result_type() {
    let ok_result: nbt_tree::Result<i32> = Ok(42);
    assert_eq!(ok_result.unwrap(), 42);

    let err_result: nbt_tree::Result<i32> = Err(Error::IndexOutOfBounds { index: 0, len: 0 });
    assert!(err_result.is_err());
}
