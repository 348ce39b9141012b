//! Memory probes.
//!
//! A [`MemoryProbe`] reports live process memory without forcing any
//! collection or compaction first; a probe that triggers one would undercount
//! what the benchmarked frame actually held. Probes are read-only and never
//! affect the FPS measurement taken alongside them.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::ProbeError;

pub const BYTES_PER_GIB: f64 = 1024.0 * 1024.0 * 1024.0;
pub const BYTES_PER_MIB: f64 = 1024.0 * 1024.0;

/// Source of live memory usage figures.
pub trait MemoryProbe {
    /// Bytes currently in use by the process.
    fn allocated_bytes(&self) -> Result<u64, ProbeError>;

    /// Bytes reserved from the system, in use or not.
    fn reserved_bytes(&self) -> Result<u64, ProbeError>;

    /// Read both figures in one go.
    fn snapshot(&self) -> Result<MemorySnapshot, ProbeError> {
        Ok(MemorySnapshot {
            allocated_bytes: self.allocated_bytes()?,
            reserved_bytes: self.reserved_bytes()?,
        })
    }
}

/// Memory usage read during one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MemorySnapshot {
    pub allocated_bytes: u64,
    pub reserved_bytes: u64,
}

impl MemorySnapshot {
    pub fn allocated_gib(&self) -> f64 {
        self.allocated_bytes as f64 / BYTES_PER_GIB
    }

    pub fn reserved_gib(&self) -> f64 {
        self.reserved_bytes as f64 / BYTES_PER_GIB
    }

    pub fn allocated_mib(&self) -> f64 {
        self.allocated_bytes as f64 / BYTES_PER_MIB
    }
}

impl fmt::Display for MemorySnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RAM: {:.2} GB | Reserved: {:.2} GB",
            self.allocated_gib(),
            self.reserved_gib()
        )
    }
}

/// Probe returning constant figures. Useful for deterministic hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedProbe {
    pub allocated: u64,
    pub reserved: u64,
}

impl FixedProbe {
    pub fn new(allocated: u64, reserved: u64) -> Self {
        Self {
            allocated,
            reserved,
        }
    }
}

impl MemoryProbe for FixedProbe {
    fn allocated_bytes(&self) -> Result<u64, ProbeError> {
        Ok(self.allocated)
    }

    fn reserved_bytes(&self) -> Result<u64, ProbeError> {
        Ok(self.reserved)
    }
}

/// Probe for hosts without any memory source. Every read fails as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullProbe;

impl MemoryProbe for NullProbe {
    fn allocated_bytes(&self) -> Result<u64, ProbeError> {
        Err(ProbeError::Unavailable("no memory probe configured".into()))
    }

    fn reserved_bytes(&self) -> Result<u64, ProbeError> {
        Err(ProbeError::Unavailable("no memory probe configured".into()))
    }
}

/// Reads `/proc/self/statm`: resident set as allocated, virtual size as reserved.
#[derive(Debug, Clone)]
pub struct StatmProbe {
    path: PathBuf,
    page_size: u64,
}

impl StatmProbe {
    pub const DEFAULT_PAGE_SIZE: u64 = 4096;

    pub fn new() -> Self {
        Self {
            path: PathBuf::from("/proc/self/statm"),
            page_size: Self::DEFAULT_PAGE_SIZE,
        }
    }

    /// Read from another statm-formatted file.
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    /// `(size, resident)` in pages.
    fn read_pages(&self) -> Result<(u64, u64), ProbeError> {
        let contents = std::fs::read_to_string(&self.path)?;
        parse_statm(&contents)
    }
}

impl Default for StatmProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryProbe for StatmProbe {
    fn allocated_bytes(&self) -> Result<u64, ProbeError> {
        let (_, resident) = self.read_pages()?;
        Ok(resident * self.page_size)
    }

    fn reserved_bytes(&self) -> Result<u64, ProbeError> {
        let (size, _) = self.read_pages()?;
        Ok(size * self.page_size)
    }

    fn snapshot(&self) -> Result<MemorySnapshot, ProbeError> {
        let (size, resident) = self.read_pages()?;
        Ok(MemorySnapshot {
            allocated_bytes: resident * self.page_size,
            reserved_bytes: size * self.page_size,
        })
    }
}

fn parse_statm(contents: &str) -> Result<(u64, u64), ProbeError> {
    let mut fields = contents.split_whitespace().map(|field| {
        field
            .parse::<u64>()
            .map_err(|err| ProbeError::Parse(format!("{field:?}: {err}")))
    });
    let size = fields
        .next()
        .ok_or_else(|| ProbeError::Parse("missing size field".into()))??;
    let resident = fields
        .next()
        .ok_or_else(|| ProbeError::Parse("missing resident field".into()))??;
    Ok((size, resident))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_bytes_to_gib() {
        let snapshot = MemorySnapshot {
            allocated_bytes: 512 * 1024 * 1024,
            reserved_bytes: 2 * 1024 * 1024 * 1024,
        };
        assert_eq!(snapshot.allocated_gib(), 0.5);
        assert_eq!(snapshot.reserved_gib(), 2.0);
        assert_eq!(snapshot.allocated_mib(), 512.0);
        assert_eq!(snapshot.to_string(), "RAM: 0.50 GB | Reserved: 2.00 GB");
    }

    #[test]
    fn fixed_probe_snapshot() {
        let probe = FixedProbe::new(10, 20);
        assert_eq!(
            probe.snapshot().unwrap(),
            MemorySnapshot {
                allocated_bytes: 10,
                reserved_bytes: 20
            }
        );
    }

    #[test]
    fn null_probe_is_unavailable() {
        assert!(matches!(
            NullProbe.snapshot(),
            Err(ProbeError::Unavailable(_))
        ));
    }

    #[test]
    fn parses_statm_line() {
        assert_eq!(parse_statm("2000 500 100 10 0 300 0\n").unwrap(), (2000, 500));
        assert!(matches!(parse_statm(""), Err(ProbeError::Parse(_))));
        assert!(matches!(parse_statm("12 abc"), Err(ProbeError::Parse(_))));
    }

    #[test]
    fn statm_probe_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("statm");
        std::fs::write(&file, "300 100 0 0 0 0 0").unwrap();

        let probe = StatmProbe::new().with_path(&file).with_page_size(1024);
        let snapshot = probe.snapshot().unwrap();
        assert_eq!(snapshot.allocated_bytes, 100 * 1024);
        assert_eq!(snapshot.reserved_bytes, 300 * 1024);
    }

    #[test]
    fn statm_probe_missing_file_is_io_error() {
        let probe = StatmProbe::new().with_path("/nonexistent/flyby/statm");
        assert!(matches!(probe.allocated_bytes(), Err(ProbeError::Io(_))));
    }
}
