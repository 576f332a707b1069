//! Per-agent typed scratch storage addressed by small integer handles.
//!
//! Leaf nodes resolve a name to a [`BbHandle`] once, when the tree is
//! built, and afterwards read and write through the handle without any
//! string lookup. Entries are never removed; they live as long as the
//! blackboard's owner.

use core::marker::PhantomData;

use crate::error::BlackboardError;
use crate::types::{EntityId, Position};

/// Storage class of a blackboard entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ValueKind {
    Entity,
    Position,
    Float,
    Int,
    Bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Entity(EntityId),
    Position(Position),
    Float(f32),
    Int(i64),
    Bool(bool),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Entity(_) => ValueKind::Entity,
            Value::Position(_) => ValueKind::Position,
            Value::Float(_) => ValueKind::Float,
            Value::Int(_) => ValueKind::Int,
            Value::Bool(_) => ValueKind::Bool,
        }
    }
}

/// Rust types that can be stored on a blackboard.
pub trait BlackboardValue: Copy + 'static {
    const KIND: ValueKind;

    fn into_value(self) -> Value;
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! impl_blackboard_value {
    ($ty:ty, $variant:ident) => {
        impl BlackboardValue for $ty {
            const KIND: ValueKind = ValueKind::$variant;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }
    };
}

impl_blackboard_value!(EntityId, Entity);
impl_blackboard_value!(Position, Position);
impl_blackboard_value!(f32, Float);
impl_blackboard_value!(i64, Int);
impl_blackboard_value!(bool, Bool);

/// Typed handle to a blackboard slot.
pub struct BbHandle<T> {
    index: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> BbHandle<T> {
    pub fn index(&self) -> usize {
        self.index
    }
}

impl<T> Clone for BbHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for BbHandle<T> {}

impl<T> PartialEq for BbHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for BbHandle<T> {}

impl<T> core::fmt::Debug for BbHandle<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("BbHandle").field(&self.index).finish()
    }
}

#[derive(Clone, Debug, PartialEq)]
struct Slot {
    name: &'static str,
    kind: ValueKind,
    value: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Blackboard {
    slots: Vec<Slot>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `name`, allocating a slot on first use.
    ///
    /// Registering the same name again with the same type returns the same
    /// handle; a different type is rejected.
    pub fn register<T: BlackboardValue>(
        &mut self,
        name: &'static str,
    ) -> Result<BbHandle<T>, BlackboardError> {
        let index = match self.slots.iter().position(|slot| slot.name == name) {
            Some(index) => {
                let registered = self.slots[index].kind;
                if registered != T::KIND {
                    return Err(BlackboardError::TypeMismatch {
                        name,
                        registered: registered.name(),
                        requested: T::KIND.name(),
                    });
                }
                index
            }
            None => {
                self.slots.push(Slot {
                    name,
                    kind: T::KIND,
                    value: None,
                });
                self.slots.len() - 1
            }
        };
        Ok(BbHandle {
            index,
            _marker: PhantomData,
        })
    }

    pub fn get<T: BlackboardValue>(&self, handle: BbHandle<T>) -> Result<T, BlackboardError> {
        let slot = self.slot(handle.index)?;
        let value = slot
            .value
            .ok_or(BlackboardError::NotFound { name: slot.name })?;
        T::from_value(value).ok_or(BlackboardError::TypeMismatch {
            name: slot.name,
            registered: slot.kind.name(),
            requested: T::KIND.name(),
        })
    }

    /// Like [`get`](Self::get) but maps every error to `None`.
    pub fn try_get<T: BlackboardValue>(&self, handle: BbHandle<T>) -> Option<T> {
        self.get(handle).ok()
    }

    pub fn set<T: BlackboardValue>(
        &mut self,
        handle: BbHandle<T>,
        value: T,
    ) -> Result<(), BlackboardError> {
        let index = handle.index;
        let slot = self.slot(index)?;
        if slot.kind != T::KIND {
            return Err(BlackboardError::TypeMismatch {
                name: slot.name,
                registered: slot.kind.name(),
                requested: T::KIND.name(),
            });
        }
        self.slots[index].value = Some(value.into_value());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot(&self, index: usize) -> Result<&Slot, BlackboardError> {
        self.slots
            .get(index)
            .ok_or(BlackboardError::UnknownHandle { index })
    }
}

impl ValueKind {
    pub fn name(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent_per_name() {
        let mut bb = Blackboard::new();
        let first = bb.register::<EntityId>("enemy").unwrap();
        let again = bb.register::<EntityId>("enemy").unwrap();
        let other = bb.register::<Position>("anchor").unwrap();

        assert_eq!(first, again);
        assert_ne!(first.index(), other.index());
        assert_eq!(bb.len(), 2);
    }

    #[test]
    fn register_rejects_type_change() {
        let mut bb = Blackboard::new();
        bb.register::<EntityId>("enemy").unwrap();
        let err = bb.register::<bool>("enemy").unwrap_err();
        assert_eq!(
            err,
            BlackboardError::TypeMismatch {
                name: "enemy",
                registered: "entity",
                requested: "bool",
            }
        );
    }

    #[test]
    fn get_before_set_is_not_found() {
        let mut bb = Blackboard::new();
        let handle = bb.register::<f32>("score").unwrap();
        assert_eq!(
            bb.get(handle),
            Err(BlackboardError::NotFound { name: "score" })
        );

        bb.set(handle, 1.5).unwrap();
        bb.set(handle, 2.5).unwrap();
        assert_eq!(bb.get(handle), Ok(2.5));
        assert_eq!(bb.try_get(handle), Some(2.5));
    }

    #[test]
    fn foreign_handle_is_rejected() {
        let mut a = Blackboard::new();
        a.register::<bool>("x").unwrap();
        let handle = a.register::<i64>("y").unwrap();

        let b = Blackboard::new();
        assert_eq!(
            b.get(handle),
            Err(BlackboardError::UnknownHandle { index: 1 })
        );
    }
}
