use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};

use crate::constants::BLOCK_SAMPLES;

/// Raw block storage: interleaved signed 16-bit stereo samples, 4-byte aligned.
#[derive(Clone, PartialEq, Eq, Debug)]
#[repr(C, align(4))]
pub struct BlockData {
    pub samples: [i16; BLOCK_SAMPLES],
}

impl BlockData {
    /// Create a zeroed block.
    pub const fn zeroed() -> Self {
        BlockData {
            samples: [0i16; BLOCK_SAMPLES],
        }
    }
}

impl Default for BlockData {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Deref for BlockData {
    type Target = [i16; BLOCK_SAMPLES];

    fn deref(&self) -> &Self::Target {
        &self.samples
    }
}

impl DerefMut for BlockData {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.samples
    }
}

/// One side of a block pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Half {
    A = 0,
    B = 1,
}

impl Half {
    /// The opposite half.
    pub const fn other(self) -> Half {
        match self {
            Half::A => Half::B,
            Half::B => Half::A,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub(crate) const fn from_index(index: u8) -> Option<Half> {
        match index {
            0 => Some(Half::A),
            1 => Some(Half::B),
            _ => None,
        }
    }
}

/// Transfer direction of a block pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Codec → memory (received samples).
    Input = 0,
    /// Memory → codec (filtered samples).
    Output = 1,
}

impl Direction {
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Blocks of one half as seen by the processing stage.
pub struct Standby<'a> {
    pub input: &'a BlockData,
    pub output: &'a mut BlockData,
}

/// Blocks of one half as seen by the transfer mechanism.
pub struct Transfer<'a> {
    pub input: &'a mut BlockData,
    pub output: &'a BlockData,
}

/// Fixed arena of the four transfer blocks, indexed by direction and half.
///
/// All storage lives inline, so a `static BlockArena` places every block at
/// link time and nothing is ever allocated or freed. Each block sits in its
/// own `UnsafeCell`: the transfer mechanism and the processing stage touch
/// disjoint halves and never form references to each other's blocks.
pub struct BlockArena {
    /// `blocks[direction][half]`.
    blocks: [[UnsafeCell<BlockData>; 2]; 2],
}

// SAFETY: Blocks are only reached through `standby()` / `transfer()`, whose
// contracts require the caller to respect the double-buffer ownership rule:
// at any instant one half belongs to the transfer side and the other to the
// processing stage.
unsafe impl Sync for BlockArena {}

impl BlockArena {
    /// Create an arena with all four blocks zeroed.
    pub const fn new() -> Self {
        BlockArena {
            blocks: [
                [
                    UnsafeCell::new(BlockData::zeroed()),
                    UnsafeCell::new(BlockData::zeroed()),
                ],
                [
                    UnsafeCell::new(BlockData::zeroed()),
                    UnsafeCell::new(BlockData::zeroed()),
                ],
            ],
        }
    }

    /// Raw sample pointer for programming a transfer controller.
    ///
    /// The pointer stays valid for the lifetime of the arena.
    pub fn as_mut_ptr(&self, direction: Direction, half: Half) -> *mut i16 {
        let data = self.blocks[direction.index()][half.index()].get();
        // SAFETY: Only the address is computed; no reference is created.
        unsafe { core::ptr::addr_of_mut!((*data).samples) as *mut i16 }
    }

    /// Exclusive access to a single block.
    pub fn get_mut(&mut self, direction: Direction, half: Half) -> &mut BlockData {
        self.blocks[direction.index()][half.index()].get_mut()
    }

    /// Borrow the blocks of `half` for processing.
    ///
    /// # Safety
    ///
    /// The caller must hold the processing role for `half`: the completion
    /// handler has reported both directions of `half` done, and no other
    /// `Standby` or `Transfer` view of `half` is alive.
    pub unsafe fn standby(&self, half: Half) -> Standby<'_> {
        let h = half.index();
        unsafe {
            Standby {
                input: &*self.blocks[Direction::Input.index()][h].get(),
                output: &mut *self.blocks[Direction::Output.index()][h].get(),
            }
        }
    }

    /// Borrow the blocks of `half` for transferring.
    ///
    /// # Safety
    ///
    /// The caller must be the transfer mechanism currently working on
    /// `half`, and no other `Standby` or `Transfer` view of `half` is alive.
    pub unsafe fn transfer(&self, half: Half) -> Transfer<'_> {
        let h = half.index();
        unsafe {
            Transfer {
                input: &mut *self.blocks[Direction::Input.index()][h].get(),
                output: &*self.blocks[Direction::Output.index()][h].get(),
            }
        }
    }
}

impl Default for BlockArena {
    fn default() -> Self {
        Self::new()
    }
}
