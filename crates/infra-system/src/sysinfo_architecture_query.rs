// Native architecture query (sysinfo)
// reason: sysinfo for cross-platform system information (ADR-001)
use sysinfo::System;
use tracing::debug;

use buildtask_core::domain::architecture::{native, NativeArchitectureCode};
use buildtask_core::port::ArchitectureQuery;

/// Architecture query backed by `sysinfo::System::cpu_arch`.
///
/// By default only Windows-family hosts report the query as supported, so
/// every other host gets an empty architecture from the probe. `any_host`
/// lifts that restriction.
pub struct SysinfoArchitectureQuery {
    any_host: bool,
}

impl SysinfoArchitectureQuery {
    /// Create a query that is supported on Windows hosts only
    ///
    /// # Example
    /// ```ignore
    /// let probe = ArchitectureProbe::new(Arc::new(SysinfoArchitectureQuery::new()));
    /// ```
    pub fn new() -> Self {
        Self { any_host: false }
    }

    /// Create a query that is supported on every host
    pub fn any_host() -> Self {
        Self { any_host: true }
    }
}

impl Default for SysinfoArchitectureQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchitectureQuery for SysinfoArchitectureQuery {
    fn is_supported(&self) -> bool {
        self.any_host || cfg!(windows)
    }

    fn native_architecture(&self) -> NativeArchitectureCode {
        let arch = System::cpu_arch();
        let code = arch
            .as_deref()
            .map(native_code_for)
            .unwrap_or(native::PROCESSOR_ARCHITECTURE_UNKNOWN);

        debug!(cpu_arch = ?arch, native_code = code, "Native architecture queried");

        code
    }
}

/// Translate an architecture name (as reported by sysinfo / `uname -m`)
/// into the native processor architecture code
pub fn native_code_for(arch: &str) -> NativeArchitectureCode {
    match arch.trim().to_ascii_lowercase().as_str() {
        "x86" | "i386" | "i486" | "i586" | "i686" => native::PROCESSOR_ARCHITECTURE_INTEL,
        "x86_64" | "amd64" | "x64" => native::PROCESSOR_ARCHITECTURE_AMD64,
        "ia64" => native::PROCESSOR_ARCHITECTURE_IA64,
        "arm64" | "aarch64" => native::PROCESSOR_ARCHITECTURE_ARM64,
        other if other.starts_with("arm") => native::PROCESSOR_ARCHITECTURE_ARM,
        _ => native::PROCESSOR_ARCHITECTURE_UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildtask_core::application::ArchitectureProbe;
    use buildtask_core::domain::HostArchitecture;
    use std::sync::Arc;

    #[test]
    fn test_native_code_mapping() {
        assert_eq!(native_code_for("i686"), native::PROCESSOR_ARCHITECTURE_INTEL);
        assert_eq!(native_code_for("x86_64"), native::PROCESSOR_ARCHITECTURE_AMD64);
        assert_eq!(native_code_for("AMD64"), native::PROCESSOR_ARCHITECTURE_AMD64);
        assert_eq!(native_code_for("ia64"), native::PROCESSOR_ARCHITECTURE_IA64);
        assert_eq!(native_code_for("armv7l"), native::PROCESSOR_ARCHITECTURE_ARM);
        assert_eq!(native_code_for("aarch64"), native::PROCESSOR_ARCHITECTURE_ARM64);
        assert_eq!(native_code_for("riscv64"), native::PROCESSOR_ARCHITECTURE_UNKNOWN);
        assert_eq!(native_code_for(""), native::PROCESSOR_ARCHITECTURE_UNKNOWN);
    }

    #[test]
    fn test_support_follows_host_family() {
        assert_eq!(SysinfoArchitectureQuery::new().is_supported(), cfg!(windows));
        assert!(SysinfoArchitectureQuery::any_host().is_supported());
    }

    #[test]
    fn test_probe_on_real_host() {
        let probe = ArchitectureProbe::new(Arc::new(SysinfoArchitectureQuery::any_host()));

        let first = probe.current_process_architecture();
        let second = probe.current_process_architecture();

        // Whatever the host is, it is never reported as unsupported here
        assert_ne!(first, HostArchitecture::Unsupported);
        assert_eq!(first, second);
    }

    #[cfg(not(windows))]
    #[test]
    fn test_default_query_is_unsupported_off_windows() {
        let probe = ArchitectureProbe::new(Arc::new(SysinfoArchitectureQuery::new()));
        assert_eq!(probe.current_process_architecture().name(), Some(""));
        assert_eq!(probe.current_process_architecture().name(), Some(""));
    }
}
