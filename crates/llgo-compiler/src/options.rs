//! Translation options.

use bitflags::bitflags;

bitflags! {
    /// Diagnostic trace output, written through the `log` facade at debug level.
    ///
    /// Tracing never changes the produced package.
    ///
    /// ```rust
    /// use llgo_compiler::DebugFlags;
    ///
    /// let flags = DebugFlags::INSTRUCTION | DebugFlags::SSA;
    /// assert_eq!(flags, DebugFlags::ALL);
    /// ```
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DebugFlags: u8 {
        /// Trace declarations, imports and body builds.
        const INSTRUCTION = 1 << 0;
        /// Dump each source function before its body is built, and trace calls.
        const SSA = 1 << 1;
        /// Everything.
        const ALL = Self::INSTRUCTION.bits() | Self::SSA.bits();
    }
}

/// What to do when a function body cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first error.
    #[default]
    AbortOnFirst,
    /// Keep building the remaining bodies after an unsupported construct and
    /// report every such error at the end. Internal errors still abort.
    Collect,
}

/// Options for one translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompileOptions {
    pub debug: DebugFlags,
    pub error_policy: ErrorPolicy,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: DebugFlags) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.error_policy = policy;
        self
    }

    pub(crate) fn trace_instructions(&self) -> bool {
        self.debug.contains(DebugFlags::INSTRUCTION)
    }

    pub(crate) fn trace_ssa(&self) -> bool {
        self.debug.contains(DebugFlags::SSA)
    }
}
