use std::cell::Cell;
use std::rc::Rc;
use std::sync::atomic::AtomicU32;
use std::sync::atomic::Ordering;

use serde::Deserialize;
use serde::Serialize;

static NEXT_UNIT_ID: AtomicU32 = AtomicU32::new(1);

/// Byte range into the source text of a compilation unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
  pub lo: u32,
  pub hi: u32,
}

impl Span {
  pub const DUMMY: Span = Span { lo: 0, hi: 0 };

  pub fn new(lo: u32, hi: u32) -> Self {
    Span { lo, hi }
  }

  /// Smallest span covering both `self` and `other`.
  pub fn to(self, other: Span) -> Span {
    Span {
      lo: self.lo.min(other.lo),
      hi: self.hi.max(other.hi),
    }
  }
}

/// Identity of a node within one compilation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

/// Process-unique identity of a compilation unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(u32);

impl UnitId {
  pub fn fresh() -> Self {
    UnitId(NEXT_UNIT_ID.fetch_add(1, Ordering::Relaxed))
  }

  pub fn as_u32(&self) -> u32 {
    self.0
  }
}

/// Shared identity of a compilation unit.
///
/// The owning [`crate::CompilationUnit`] holds the only long-lived strong reference. Anything
/// that wants to remember per-unit data without keeping the tree alive should store a
/// `Weak<UnitHandle>` next to it.
#[derive(Debug)]
pub struct UnitHandle {
  id: UnitId,
  next_node: Cell<u32>,
}

impl UnitHandle {
  pub fn new() -> Rc<Self> {
    Rc::new(UnitHandle {
      id: UnitId::fresh(),
      next_node: Cell::new(0),
    })
  }

  pub fn id(&self) -> UnitId {
    self.id
  }

  /// Allocate a node id that has not been handed out for this unit yet.
  pub fn fresh_node_id(&self) -> NodeId {
    let id = self.next_node.get();
    self.next_node.set(id + 1);
    NodeId(id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn node_ids_are_unique_per_unit() {
    let handle = UnitHandle::new();
    let first = handle.fresh_node_id();
    let second = handle.fresh_node_id();
    assert_ne!(first, second);
  }

  #[test]
  fn unit_ids_are_unique() {
    assert_ne!(UnitHandle::new().id(), UnitHandle::new().id());
  }

  #[test]
  fn span_to_covers_both() {
    assert_eq!(Span::new(4, 6).to(Span::new(1, 3)), Span::new(1, 6));
  }
}
