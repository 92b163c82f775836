// src/common/resource.rs

use arrayvec::ArrayVec;
use core::fmt;
use core::sync::atomic::{AtomicU32, Ordering};

// Source of registry tags; a claim remembers the tag of the registry that issued it.
static NEXT_REGISTRY_TAG: AtomicU32 = AtomicU32::new(0);

/// A hardware resource that may have at most one owner.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ResourceId {
    /// A GPIO pin by number.
    Pin(u8),
    /// A bus peripheral by index.
    Bus(u8),
    /// One device address on a bus.
    Device { bus: u8, address: u8 },
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceId::Pin(n) => write!(f, "pin {}", n),
            ResourceId::Bus(n) => write!(f, "bus {}", n),
            ResourceId::Device { bus, address } => write!(f, "device {:#04x} on bus {}", address, bus),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum ResourceError {
    /// The resource already has an owner.
    #[error("{0} is already claimed")]
    Conflict(ResourceId),

    /// The registry has no free slots left.
    #[error("resource registry full ({capacity} claims)")]
    Exhausted { capacity: usize },

    /// The claim was issued by a different registry.
    #[error("{0} is not claimed in this registry")]
    NotClaimed(ResourceId),
}

/// Proof of exclusive ownership of one resource.
///
/// Not `Clone`/`Copy`: the only way to give up ownership is to hand the
/// claim back with [`ResourceRegistry::release`]. Only the registry that
/// issued a claim accepts it back.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "dropping a claim keeps the resource reserved until released"]
pub struct Claim {
    id: ResourceId,
    registry: u32,
}

impl Claim {
    pub fn id(&self) -> ResourceId {
        self.id
    }
}

/// Owner of the claim table. Create one per board and pass it to whatever
/// builds drivers.
#[derive(Debug)]
pub struct ResourceRegistry<const N: usize> {
    tag: u32,
    claimed: ArrayVec<ResourceId, N>,
}

impl<const N: usize> Default for ResourceRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ResourceRegistry<N> {
    pub fn new() -> Self {
        ResourceRegistry {
            tag: NEXT_REGISTRY_TAG.fetch_add(1, Ordering::Relaxed),
            claimed: ArrayVec::new(),
        }
    }

    /// Claims `id`, failing if it already has an owner.
    pub fn claim(&mut self, id: ResourceId) -> Result<Claim, ResourceError> {
        if self.is_claimed(id) {
            return Err(ResourceError::Conflict(id));
        }
        self.claimed
            .try_push(id)
            .map_err(|_| ResourceError::Exhausted { capacity: N })?;
        Ok(Claim { id, registry: self.tag })
    }

    /// Returns the resource held by `claim` to the pool.
    ///
    /// A claim issued by another registry is refused and handed back
    /// together with the error.
    pub fn release(&mut self, claim: Claim) -> Result<(), (ResourceError, Claim)> {
        if claim.registry != self.tag {
            return Err((ResourceError::NotClaimed(claim.id), claim));
        }
        match self.claimed.iter().position(|c| *c == claim.id) {
            Some(idx) => {
                self.claimed.swap_remove(idx);
                Ok(())
            }
            None => Err((ResourceError::NotClaimed(claim.id), claim)),
        }
    }

    /// True if `claim` was issued by this registry and is still held.
    pub fn holds(&self, claim: &Claim) -> bool {
        claim.registry == self.tag && self.is_claimed(claim.id)
    }

    pub fn is_claimed(&self, id: ResourceId) -> bool {
        self.claimed.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }
}
