// Processor Architecture Domain Model

/// Raw processor architecture code as reported by the native system-info query
pub type NativeArchitectureCode = u16;

/// Native `wProcessorArchitecture` constants
pub mod native {
    use super::NativeArchitectureCode;

    pub const PROCESSOR_ARCHITECTURE_INTEL: NativeArchitectureCode = 0;
    pub const PROCESSOR_ARCHITECTURE_ARM: NativeArchitectureCode = 5;
    pub const PROCESSOR_ARCHITECTURE_IA64: NativeArchitectureCode = 6;
    pub const PROCESSOR_ARCHITECTURE_AMD64: NativeArchitectureCode = 9;
    pub const PROCESSOR_ARCHITECTURE_ARM64: NativeArchitectureCode = 12;
    pub const PROCESSOR_ARCHITECTURE_UNKNOWN: NativeArchitectureCode = 0xFFFF;
}

/// Known processor architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProcessorArchitecture {
    X86,
    Amd64,
    Ia64,
    Arm,
}

impl ProcessorArchitecture {
    /// Name used for architecture-neutral (MSIL) assemblies. Never produced
    /// by the host probe, kept so callers can compare against it.
    pub const MSIL: &'static str = "MSIL";

    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessorArchitecture::X86 => "x86",
            ProcessorArchitecture::Amd64 => "AMD64",
            ProcessorArchitecture::Ia64 => "IA64",
            ProcessorArchitecture::Arm => "ARM",
        }
    }

    /// Map a native code; any code outside the four known ones is `None`
    pub fn from_native(code: NativeArchitectureCode) -> Option<Self> {
        match code {
            native::PROCESSOR_ARCHITECTURE_INTEL => Some(ProcessorArchitecture::X86),
            native::PROCESSOR_ARCHITECTURE_AMD64 => Some(ProcessorArchitecture::Amd64),
            native::PROCESSOR_ARCHITECTURE_IA64 => Some(ProcessorArchitecture::Ia64),
            native::PROCESSOR_ARCHITECTURE_ARM => Some(ProcessorArchitecture::Arm),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProcessorArchitecture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of probing the current process architecture.
///
/// Neither `Unsupported` nor `Unrecognized` is an error: both are expected,
/// steady-state outcomes on some hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostArchitecture {
    /// Host has no native architecture query; renders as an empty name
    Unsupported,
    /// Query ran but returned a code outside the known set; renders as no name
    Unrecognized,
    Known(ProcessorArchitecture),
}

impl HostArchitecture {
    pub fn from_native(code: NativeArchitectureCode) -> Self {
        match ProcessorArchitecture::from_native(code) {
            Some(arch) => HostArchitecture::Known(arch),
            None => HostArchitecture::Unrecognized,
        }
    }

    /// Architecture name: `Some("")` when unsupported, `None` when unrecognized
    pub fn name(&self) -> Option<&'static str> {
        match self {
            HostArchitecture::Unsupported => Some(""),
            HostArchitecture::Unrecognized => None,
            HostArchitecture::Known(arch) => Some(arch.as_str()),
        }
    }

    pub fn architecture(&self) -> Option<ProcessorArchitecture> {
        match self {
            HostArchitecture::Known(arch) => Some(*arch),
            _ => None,
        }
    }
}
