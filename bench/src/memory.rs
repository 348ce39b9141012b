//! Heap probe backed by dhat.
//!
//! [`DhatProbe`] reports the live heap as "allocated" and the peak heap seen
//! so far as "reserved". It only measures when the `memory_profiling`
//! feature is enabled and the binary installs dhat's allocator:
//!
//! ```ignore
//! #[global_allocator]
//! static ALLOC: dhat::Alloc = dhat::Alloc;
//! ```
//!
//! Without the feature every read fails with [`ProbeError::Unavailable`],
//! which a run treats as a transient probe failure.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p flyby --features memory_profiling -- --simulate 60
//! ```
//!
//! # Viewing Results
//!
//! Dropping the probe writes `dhat-heap.json`. View it at:
//! <https://nnethercote.github.io/dh_view/dh_view.html>

use flyby_engine::ProbeError;
use flyby_engine::sampler::{MemoryProbe, MemorySnapshot};

/// Heap figures captured from dhat at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeapFigures {
    /// Bytes live on the heap right now.
    pub current_bytes: u64,
    /// Largest live heap seen since profiling started.
    pub peak_bytes: u64,
    /// Total bytes ever allocated.
    pub total_bytes: u64,
    /// Total number of allocations.
    pub total_blocks: u64,
}

impl HeapFigures {
    pub fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            allocated_bytes: self.current_bytes,
            reserved_bytes: self.peak_bytes,
        }
    }
}

impl std::fmt::Display for HeapFigures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "current: {} bytes, peak: {} bytes, total: {} bytes ({} allocs)",
            self.current_bytes, self.peak_bytes, self.total_bytes, self.total_blocks
        )
    }
}

/// Memory probe reading dhat's heap statistics.
///
/// Owns the dhat profiler, so only one probe may exist at a time.
#[cfg(feature = "memory_profiling")]
pub struct DhatProbe {
    _profiler: dhat::Profiler,
}

#[cfg(feature = "memory_profiling")]
impl DhatProbe {
    /// Start heap profiling.
    pub fn start() -> Self {
        log::info!("Starting dhat heap profiler");
        Self {
            _profiler: dhat::Profiler::new_heap(),
        }
    }

    pub fn figures(&self) -> Result<HeapFigures, ProbeError> {
        let stats = dhat::HeapStats::get();
        Ok(HeapFigures {
            current_bytes: stats.curr_bytes as u64,
            peak_bytes: stats.max_bytes as u64,
            total_bytes: stats.total_bytes,
            total_blocks: stats.total_blocks,
        })
    }
}

#[cfg(not(feature = "memory_profiling"))]
pub struct DhatProbe;

#[cfg(not(feature = "memory_profiling"))]
impl DhatProbe {
    /// No-op when memory profiling is disabled.
    pub fn start() -> Self {
        log::debug!("dhat probe requested without the memory_profiling feature");
        Self
    }

    pub fn figures(&self) -> Result<HeapFigures, ProbeError> {
        Err(ProbeError::Unavailable(
            "built without the memory_profiling feature".into(),
        ))
    }
}

impl MemoryProbe for DhatProbe {
    fn allocated_bytes(&self) -> Result<u64, ProbeError> {
        Ok(self.figures()?.current_bytes)
    }

    fn reserved_bytes(&self) -> Result<u64, ProbeError> {
        Ok(self.figures()?.peak_bytes)
    }

    fn snapshot(&self) -> Result<MemorySnapshot, ProbeError> {
        Ok(self.figures()?.snapshot())
    }
}
