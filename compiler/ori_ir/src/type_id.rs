//! Interned type identifier.
//!
//! Per design spec A-data-structuresmd:
//! - TypeId(u32) for O(1) equality comparison
//! - Pre-interned primitive types
//! - Sharded layout for type interner
//! - All Salsa-required traits

use std::fmt;
use std::hash::{Hash, Hasher};

/// Interned type identifier.
///
/// # Layout
/// 32-bit index split into shard (4 bits) + local index (28 bits):
/// - Bits 31-28: Shard index (0-15)
/// - Bits 27-0: Local index within shard
///
/// This layout supports up to 268 million types per shard (16 shards total).
///
/// # Salsa Compatibility
/// Has all required traits: Copy, Clone, Eq, `PartialEq`, Hash, Debug
///
/// # Pre-interned Types
/// Primitive types are pre-interned in shard 0 with fixed local indices:
/// - INT, FLOAT, BOOL, STR, CHAR, BYTE, VOID, NEVER
/// - INFER and `SELF_TYPE` are special markers
#[derive(Copy, Clone, Eq, PartialEq)]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // Pre-interned primitive types (all in shard 0)
    pub const INT: TypeId = TypeId(0);
    pub const FLOAT: TypeId = TypeId(1);
    pub const BOOL: TypeId = TypeId(2);
    pub const STR: TypeId = TypeId(3);
    pub const CHAR: TypeId = TypeId(4);
    pub const BYTE: TypeId = TypeId(5);
    pub const VOID: TypeId = TypeId(6);
    pub const NEVER: TypeId = TypeId(7);
    pub const INFER: TypeId = TypeId(8); // Placeholder during inference
    pub const SELF_TYPE: TypeId = TypeId(9); // Self type in trait/impl contexts

    // Duration and Size are pre-interned at same indices as INFER/SELF_TYPE.
    // This is intentional: INFER/SELF_TYPE are never stored in the type interner,
    // they're just markers for type checking. After type checking, the LLVM backend
    // only sees Duration(8) and Size(9), never INFER or SELF_TYPE.
    pub const DURATION: TypeId = TypeId(8);
    pub const SIZE: TypeId = TypeId(9);
    pub const ERROR: TypeId = TypeId(10);
    /// Ordering type (Less | Equal | Greater).
    ///
    /// Represented as i8 in LLVM: Less=0, Equal=1, Greater=2.
    pub const ORDERING: TypeId = TypeId(11);

    /// First ID for dynamically allocated compound types.
    pub const FIRST_COMPOUND: u32 = 12;

    /// Maximum local index per shard (2^28 - 1).
    pub const MAX_LOCAL: u32 = 0x0FFF_FFFF;

    /// Number of shards for type interning.
    pub const NUM_SHARDS: usize = 16;

    /// Create a new `TypeId` from a raw index (legacy API).
    #[inline]
    pub const fn new(index: u32) -> Self {
        TypeId(index)
    }

    /// Create a `TypeId` from shard and local index.
    ///
    /// # Layout
    /// The shard occupies bits 31-28 (4 bits), and the local index
    /// occupies bits 27-0 (28 bits).
    #[inline]
    pub const fn from_shard_local(shard: u32, local: u32) -> Self {
        debug_assert!(shard < 16);
        debug_assert!(local <= Self::MAX_LOCAL);
        TypeId((shard << 28) | local)
    }

    /// Extract the shard index (bits 31-28).
    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> 28) as usize
    }

    /// Extract the local index within the shard (bits 27-0).
    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }

    /// Get the raw u32 value.
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Create from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        TypeId(raw)
    }

    /// Get the raw index (legacy API, same as `raw()`).
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Check if this is a primitive type (pre-interned in shard 0).
    #[inline]
    pub const fn is_primitive(self) -> bool {
        // Pre-interned types: INT(0)..ERROR(10), compound types start at 11
        self.0 < Self::FIRST_COMPOUND
    }

    /// Check if this is the inference placeholder.
    #[inline]
    pub const fn is_infer(self) -> bool {
        self.0 == Self::INFER.0
    }

    /// Check if this is the Self type (used in trait/impl contexts).
    #[inline]
    pub const fn is_self_type(self) -> bool {
        self.0 == Self::SELF_TYPE.0
    }
}

impl Hash for TypeId {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::INT => write!(f, "TypeId::INT"),
            Self::FLOAT => write!(f, "TypeId::FLOAT"),
            Self::BOOL => write!(f, "TypeId::BOOL"),
            Self::STR => write!(f, "TypeId::STR"),
            Self::CHAR => write!(f, "TypeId::CHAR"),
            Self::BYTE => write!(f, "TypeId::BYTE"),
            Self::VOID => write!(f, "TypeId::VOID"),
            Self::NEVER => write!(f, "TypeId::NEVER"),
            Self::INFER => write!(f, "TypeId::INFER"),
            Self::SELF_TYPE => write!(f, "TypeId::SELF_TYPE"),
            Self::ORDERING => write!(f, "TypeId::ORDERING"),
            _ => write!(f, "TypeId({})", self.0),
        }
    }
}

impl Default for TypeId {
    fn default() -> Self {
        Self::INFER
    }
}
