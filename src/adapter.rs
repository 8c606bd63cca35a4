//! Storage of arbitrary Rust values as encoded strings.
//!
//! An [`AdapterRegistry`] binds a Rust type to a type id and a pair of
//! functions turning values of that type into a string and back. Objects are
//! stored as a `String` tag of the form `<type id>:<payload>`, so a read can
//! tell whether the stored payload was written for the requested type before
//! decoding it.
//!
//! ```
//! use std::sync::Arc;
//! use nbt_tree::{AdapterRegistry, Anchor, Error, MemoryAnchor};
//!
//! #[derive(Debug, PartialEq)]
//! struct Level(u32);
//!
//! let mut adapters = AdapterRegistry::new();
//! adapters
//!     .register(
//!         "level",
//!         |level: &Level| Ok(level.0.to_string()),
//!         |s| s.parse().map(Level).map_err(|e| Error::Message(format!("{e}"))),
//!     )
//!     .unwrap();
//!
//! let anchor = Arc::new(MemoryAnchor::new("item"));
//! let root = anchor.root();
//! root.set_object(&adapters, "level", &Level(3)).unwrap();
//!
//! assert_eq!(root.get_string("level").as_deref(), Some("level:3"));
//! assert_eq!(root.get_object::<Level>(&adapters, "level").unwrap(), Some(Level(3)));
//! ```

use std::{
    any::{Any, TypeId, type_name},
    collections::HashMap,
    fmt,
};

use crate::{CompoundNode, Error, Result, cold_path};

type SerializeFn = Box<dyn Fn(&dyn Any) -> Result<String> + Send + Sync>;
type DeserializeFn = Box<dyn Fn(&str) -> Result<Box<dyn Any>> + Send + Sync>;

struct Adapter {
    type_id: String,
    serialize: SerializeFn,
    deserialize: DeserializeFn,
}

#[derive(Default)]
pub struct AdapterRegistry {
    adapters: HashMap<TypeId, Adapter>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `T` to `type_id` and its codec, replacing any earlier binding
    /// for `T`.
    ///
    /// # Errors
    ///
    /// [`Error::Message`] if `type_id` is empty, contains `:`, or is already
    /// bound to another type.
    pub fn register<T: Any>(
        &mut self,
        type_id: impl Into<String>,
        serialize: impl Fn(&T) -> Result<String> + Send + Sync + 'static,
        deserialize: impl Fn(&str) -> Result<T> + Send + Sync + 'static,
    ) -> Result<()> {
        let type_id = type_id.into();
        if type_id.is_empty() || type_id.contains(':') {
            cold_path();
            return Err(Error::Message(format!("invalid adapter type id {type_id:?}")));
        }
        if let Some((_, taken)) = self
            .adapters
            .iter()
            .find(|(id, adapter)| **id != TypeId::of::<T>() && adapter.type_id == type_id)
        {
            cold_path();
            return Err(Error::Message(format!(
                "adapter type id {:?} is already registered",
                taken.type_id
            )));
        }

        let adapter = Adapter {
            type_id,
            serialize: Box::new(move |value: &dyn Any| match value.downcast_ref::<T>() {
                Some(value) => serialize(value),
                None => Err(Error::NoAdapter(type_name::<T>())),
            }),
            deserialize: Box::new(move |payload: &str| {
                deserialize(payload).map(|value| Box::new(value) as Box<dyn Any>)
            }),
        };
        tracing::debug!(type_id = %adapter.type_id, ty = type_name::<T>(), "registered adapter");
        self.adapters.insert(TypeId::of::<T>(), adapter);
        Ok(())
    }

    /// Binds `T` to `type_id` using its serde implementation, with JSON as
    /// the payload encoding.
    #[cfg(feature = "serde")]
    pub fn register_serde<T>(&mut self, type_id: impl Into<String>) -> Result<()>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Any,
    {
        self.register::<T>(
            type_id,
            |value| serde_json::to_string(value).map_err(|e| Error::Message(e.to_string())),
            |payload| serde_json::from_str(payload).map_err(|e| Error::Message(e.to_string())),
        )
    }

    pub fn contains<T: Any>(&self) -> bool {
        self.adapters.contains_key(&TypeId::of::<T>())
    }

    /// The type id `T` was registered with.
    pub fn type_id_of<T: Any>(&self) -> Option<&str> {
        self.adapters
            .get(&TypeId::of::<T>())
            .map(|adapter| adapter.type_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    fn adapter<T: Any>(&self) -> Result<&Adapter> {
        self.adapters.get(&TypeId::of::<T>()).ok_or_else(|| {
            cold_path();
            Error::NoAdapter(type_name::<T>())
        })
    }

    /// Encodes `value` as `<type id>:<payload>`.
    pub fn encode<T: Any>(&self, value: &T) -> Result<String> {
        let adapter = self.adapter::<T>()?;
        let payload = (adapter.serialize)(value)?;
        Ok(format!("{}:{payload}", adapter.type_id))
    }

    /// Decodes a string produced by [`encode`](Self::encode) for `T`.
    ///
    /// `key` only names the entry in errors.
    pub fn decode<T: Any>(&self, key: &str, stored: &str) -> Result<T> {
        let adapter = self.adapter::<T>()?;
        let (type_id, payload) = stored.split_once(':').unwrap_or(("", stored));
        if type_id != adapter.type_id {
            cold_path();
            return Err(Error::AdapterMismatch {
                key: key.to_owned(),
                expected: adapter.type_id.clone(),
                actual: type_id.to_owned(),
            });
        }
        (adapter.deserialize)(payload)?
            .downcast::<T>()
            .map(|value| *value)
            .map_err(|_| Error::NoAdapter(type_name::<T>()))
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.adapters.values().map(|adapter| &adapter.type_id))
            .finish()
    }
}

impl CompoundNode {
    /// Encodes `value` with the adapter registered for `T` and stores it as a
    /// string under `key`.
    ///
    /// # Errors
    ///
    /// [`Error::NoAdapter`] if `T` is not registered, or whatever the
    /// adapter's serializer reports.
    pub fn set_object<T: Any>(
        &self,
        adapters: &AdapterRegistry,
        key: &str,
        value: &T,
    ) -> Result<()> {
        let encoded = adapters.encode(value)?;
        self.set_string(key, encoded)
    }

    /// Decodes the object stored under `key` as a `T`.
    ///
    /// `Ok(None)` if the key is missing or does not hold a string.
    ///
    /// # Errors
    ///
    /// [`Error::NoAdapter`] if `T` is not registered (even when the key is
    /// missing), [`Error::AdapterMismatch`] if the stored object was written
    /// for another type id.
    pub fn get_object<T: Any>(
        &self,
        adapters: &AdapterRegistry,
        key: &str,
    ) -> Result<Option<T>> {
        adapters.adapter::<T>()?;
        self.get_string(key)
            .map(|stored| adapters.decode(key, &stored))
            .transpose()
    }
}
