use std::sync::OnceLock;

use mandelforge_core::PointClass;

/// `W x H` array of single-assignment slots keyed by pixel `(i, j)`.
///
/// Each slot is a [`OnceLock`]: empty until the first write, which is the
/// only write it will ever accept. This gives the single-assignment
/// contract (§4.3) for free — a slot, once filled, can never be
/// overwritten, and concurrent writers racing to fill the same slot with
/// the same value both "succeed" harmlessly (the second `set` call is
/// simply ignored).
pub struct MemoGrid {
    width: u32,
    height: u32,
    slots: Box<[OnceLock<PointClass>]>,
}

impl MemoGrid {
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize;
        let slots = (0..len).map(|_| OnceLock::new()).collect();
        Self {
            width,
            height,
            slots,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, i: u32, j: u32) -> usize {
        debug_assert!(i < self.width && j < self.height);
        j as usize * self.width as usize + i as usize
    }

    /// Acquire-load the slot at `(i, j)`.
    pub fn try_get(&self, i: u32, j: u32) -> Option<PointClass> {
        self.slots[self.index(i, j)].get().copied()
    }

    /// Publish `value` into the slot at `(i, j)` if it is empty.
    ///
    /// If the slot is already filled this is a no-op: the existing value
    /// wins. Benign races where two workers compute the same pixel and
    /// race to publish an identical value are expected and safe.
    pub fn put(&self, i: u32, j: u32, value: PointClass) {
        let _ = self.slots[self.index(i, j)].set(value);
    }

    /// Return the existing value at `(i, j)`, computing and storing it
    /// via `compute` if the slot is empty.
    pub fn get_or_compute(&self, i: u32, j: u32, compute: impl FnOnce() -> PointClass) -> PointClass {
        *self.slots[self.index(i, j)].get_or_init(compute)
    }

    /// `true` iff every slot in the grid has been filled.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|slot| slot.get().is_some())
    }
}
