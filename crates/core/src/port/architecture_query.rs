// Native Architecture Query Port
// Platform capability returning the raw processor architecture code

use crate::domain::architecture::{native, NativeArchitectureCode};

/// Native system-info query
pub trait ArchitectureQuery: Send + Sync {
    /// Whether this host supports the native query at all.
    ///
    /// Must be cheap: the probe calls it on every read.
    fn is_supported(&self) -> bool;

    /// Run the native query and return the raw architecture code
    fn native_architecture(&self) -> NativeArchitectureCode;
}

/// Default capability for hosts without a native query
pub struct UnsupportedArchitectureQuery;

impl ArchitectureQuery for UnsupportedArchitectureQuery {
    fn is_supported(&self) -> bool {
        false
    }

    fn native_architecture(&self) -> NativeArchitectureCode {
        native::PROCESSOR_ARCHITECTURE_UNKNOWN
    }
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicU16, AtomicUsize, Ordering};

    /// Mock query with a configurable code that counts native invocations
    pub struct MockArchitectureQuery {
        supported: AtomicBool,
        code: AtomicU16,
        query_count: AtomicUsize,
    }

    impl MockArchitectureQuery {
        pub fn new(code: NativeArchitectureCode) -> Self {
            Self {
                supported: AtomicBool::new(true),
                code: AtomicU16::new(code),
                query_count: AtomicUsize::new(0),
            }
        }

        pub fn unsupported() -> Self {
            let query = Self::new(native::PROCESSOR_ARCHITECTURE_UNKNOWN);
            query.supported.store(false, Ordering::SeqCst);
            query
        }

        pub fn set_code(&self, code: NativeArchitectureCode) {
            self.code.store(code, Ordering::SeqCst);
        }

        pub fn set_supported(&self, supported: bool) {
            self.supported.store(supported, Ordering::SeqCst);
        }

        pub fn query_count(&self) -> usize {
            self.query_count.load(Ordering::SeqCst)
        }
    }

    impl ArchitectureQuery for MockArchitectureQuery {
        fn is_supported(&self) -> bool {
            self.supported.load(Ordering::SeqCst)
        }

        fn native_architecture(&self) -> NativeArchitectureCode {
            self.query_count.fetch_add(1, Ordering::SeqCst);
            self.code.load(Ordering::SeqCst)
        }
    }
}
