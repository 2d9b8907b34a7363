//! Process-wide allocation tracking.
//!
//! Wraps the system allocator and counts bytes and calls so the CLI can
//! report how much memory the processing phase allocated.

use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicU64, Ordering};

/// Counting wrapper around [`System`].
pub struct TrackingAllocator {
    allocated: AtomicU64,
    deallocated: AtomicU64,
    allocations: AtomicU64,
}

impl TrackingAllocator {
    const fn new() -> Self {
        Self {
            allocated: AtomicU64::new(0),
            deallocated: AtomicU64::new(0),
            allocations: AtomicU64::new(0),
        }
    }

    fn snapshot(&self) -> AllocationSnapshot {
        AllocationSnapshot {
            allocated_bytes: self.allocated.load(Ordering::Relaxed),
            deallocated_bytes: self.deallocated.load(Ordering::Relaxed),
            allocations: self.allocations.load(Ordering::Relaxed),
        }
    }

    #[inline]
    fn record_alloc(&self, size: usize) {
        self.allocated.fetch_add(size as u64, Ordering::Relaxed);
        self.allocations.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn record_dealloc(&self, size: usize) {
        self.deallocated.fetch_add(size as u64, Ordering::Relaxed);
    }
}

unsafe impl GlobalAlloc for TrackingAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            self.record_alloc(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        self.record_dealloc(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            self.record_dealloc(layout.size());
            self.record_alloc(new_size);
        }
        new_ptr
    }
}

#[global_allocator]
static GLOBAL: TrackingAllocator = TrackingAllocator::new();

/// Point-in-time allocator counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationSnapshot {
    pub allocated_bytes: u64,
    pub deallocated_bytes: u64,
    pub allocations: u64,
}

impl AllocationSnapshot {
    /// Bytes currently allocated and not yet freed.
    pub fn live_bytes(&self) -> i64 {
        self.allocated_bytes as i64 - self.deallocated_bytes as i64
    }

    /// Counters accumulated between `earlier` and this snapshot.
    pub fn since(&self, earlier: &AllocationSnapshot) -> AllocationDelta {
        AllocationDelta {
            live_bytes: self.live_bytes() - earlier.live_bytes(),
            allocated_bytes: self.allocated_bytes.saturating_sub(earlier.allocated_bytes),
            allocations: self.allocations.saturating_sub(earlier.allocations),
        }
    }
}

/// Allocation activity over an interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationDelta {
    /// Growth in live heap bytes (negative if more was freed)
    pub live_bytes: i64,

    /// Total bytes requested
    pub allocated_bytes: u64,

    /// Number of allocation calls
    pub allocations: u64,
}

/// Read the global allocator counters.
pub fn snapshot() -> AllocationSnapshot {
    GLOBAL.snapshot()
}
