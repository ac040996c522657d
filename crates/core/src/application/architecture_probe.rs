//! Architecture Probe - lazily cached host processor architecture
//!
//! The cache is a single `AtomicU8` accessed with relaxed ordering and no
//! lock. Two threads reading for the first time may both run the native
//! query and both store the result. That is harmless because the query is
//! deterministic for the lifetime of the process, so every writer stores the
//! same value. Do not replace this with a lock unless the query stops being
//! idempotent.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::domain::architecture::{HostArchitecture, ProcessorArchitecture};
use crate::port::ArchitectureQuery;

const STATE_UNINITIALIZED: u8 = 0;
const STATE_UNRECOGNIZED: u8 = 1;
const STATE_X86: u8 = 2;
const STATE_AMD64: u8 = 3;
const STATE_IA64: u8 = 4;
const STATE_ARM: u8 = 5;

fn encode(arch: HostArchitecture) -> u8 {
    match arch {
        HostArchitecture::Known(ProcessorArchitecture::X86) => STATE_X86,
        HostArchitecture::Known(ProcessorArchitecture::Amd64) => STATE_AMD64,
        HostArchitecture::Known(ProcessorArchitecture::Ia64) => STATE_IA64,
        HostArchitecture::Known(ProcessorArchitecture::Arm) => STATE_ARM,
        // Unsupported never reaches the cache
        HostArchitecture::Unrecognized | HostArchitecture::Unsupported => STATE_UNRECOGNIZED,
    }
}

fn decode(state: u8) -> Option<HostArchitecture> {
    match state {
        STATE_UNINITIALIZED => None,
        STATE_X86 => Some(HostArchitecture::Known(ProcessorArchitecture::X86)),
        STATE_AMD64 => Some(HostArchitecture::Known(ProcessorArchitecture::Amd64)),
        STATE_IA64 => Some(HostArchitecture::Known(ProcessorArchitecture::Ia64)),
        STATE_ARM => Some(HostArchitecture::Known(ProcessorArchitecture::Arm)),
        _ => Some(HostArchitecture::Unrecognized),
    }
}

/// Host architecture service.
///
/// Construct one per process at the composition root and share it; tests
/// build a fresh instance around a mock query.
pub struct ArchitectureProbe {
    query: Arc<dyn ArchitectureQuery>,
    state: AtomicU8,
}

impl ArchitectureProbe {
    pub fn new(query: Arc<dyn ArchitectureQuery>) -> Self {
        Self {
            query,
            state: AtomicU8::new(STATE_UNINITIALIZED),
        }
    }

    /// Architecture of the current process.
    ///
    /// Unsupported hosts get [`HostArchitecture::Unsupported`] on every call
    /// without touching the cache. Otherwise the native query runs on the
    /// first read and the mapped value is returned from the cache afterwards.
    pub fn current_process_architecture(&self) -> HostArchitecture {
        if !self.query.is_supported() {
            return HostArchitecture::Unsupported;
        }

        if let Some(cached) = decode(self.state.load(Ordering::Relaxed)) {
            return cached;
        }

        let code = self.query.native_architecture();
        let arch = HostArchitecture::from_native(code);
        self.state.store(encode(arch), Ordering::Relaxed);

        debug!(
            native_code = code,
            architecture = ?arch.name(),
            "Host architecture probed"
        );

        arch
    }

    /// Whether a value has been cached yet
    pub fn is_initialized(&self) -> bool {
        self.state.load(Ordering::Relaxed) != STATE_UNINITIALIZED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::architecture::native;
    use crate::port::architecture_query::mocks::MockArchitectureQuery;

    #[test]
    fn test_unsupported_host_returns_empty_every_time() {
        let query = Arc::new(MockArchitectureQuery::unsupported());
        let probe = ArchitectureProbe::new(query.clone());

        for _ in 0..3 {
            let arch = probe.current_process_architecture();
            assert_eq!(arch, HostArchitecture::Unsupported);
            assert_eq!(arch.name(), Some(""));
        }
        assert_eq!(query.query_count(), 0);
        assert!(!probe.is_initialized());
    }

    #[test]
    fn test_supported_host_queries_once() {
        let query = Arc::new(MockArchitectureQuery::new(
            native::PROCESSOR_ARCHITECTURE_AMD64,
        ));
        let probe = ArchitectureProbe::new(query.clone());

        let first = probe.current_process_architecture();
        let second = probe.current_process_architecture();

        assert_eq!(first, HostArchitecture::Known(ProcessorArchitecture::Amd64));
        assert_eq!(first, second);
        assert_eq!(query.query_count(), 1);
        assert!(probe.is_initialized());
    }

    #[test]
    fn test_cached_value_is_terminal() {
        let query = Arc::new(MockArchitectureQuery::new(native::PROCESSOR_ARCHITECTURE_ARM));
        let probe = ArchitectureProbe::new(query.clone());

        assert_eq!(
            probe.current_process_architecture(),
            HostArchitecture::Known(ProcessorArchitecture::Arm)
        );

        query.set_code(native::PROCESSOR_ARCHITECTURE_INTEL);
        assert_eq!(
            probe.current_process_architecture(),
            HostArchitecture::Known(ProcessorArchitecture::Arm)
        );
        assert_eq!(query.query_count(), 1);
    }

    #[test]
    fn test_unrecognized_code_is_cached_not_error() {
        let query = Arc::new(MockArchitectureQuery::new(
            native::PROCESSOR_ARCHITECTURE_ARM64,
        ));
        let probe = ArchitectureProbe::new(query.clone());

        assert_eq!(probe.current_process_architecture(), HostArchitecture::Unrecognized);
        assert_eq!(probe.current_process_architecture().name(), None);
        assert_eq!(query.query_count(), 1);
    }

    #[test]
    fn test_platform_check_bypasses_cache() {
        let query = Arc::new(MockArchitectureQuery::new(native::PROCESSOR_ARCHITECTURE_IA64));
        let probe = ArchitectureProbe::new(query.clone());

        assert_eq!(
            probe.current_process_architecture(),
            HostArchitecture::Known(ProcessorArchitecture::Ia64)
        );

        query.set_supported(false);
        assert_eq!(probe.current_process_architecture(), HostArchitecture::Unsupported);

        query.set_supported(true);
        assert_eq!(
            probe.current_process_architecture(),
            HostArchitecture::Known(ProcessorArchitecture::Ia64)
        );
        assert_eq!(query.query_count(), 1);
    }

    #[test]
    fn test_encoding_covers_every_architecture() {
        for arch in [
            ProcessorArchitecture::X86,
            ProcessorArchitecture::Amd64,
            ProcessorArchitecture::Ia64,
            ProcessorArchitecture::Arm,
        ] {
            let host = HostArchitecture::Known(arch);
            assert_eq!(decode(encode(host)), Some(host));
        }
        assert_eq!(
            decode(encode(HostArchitecture::Unrecognized)),
            Some(HostArchitecture::Unrecognized)
        );
        assert_eq!(decode(STATE_UNINITIALIZED), None);
    }
}
