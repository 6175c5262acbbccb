//! Message data for composition diagnostics.
//!
//! Codes in the 1000 range are input-contract violations; codes in the
//! 2000 range are composition-logic errors.

use super::{DiagnosticMessage, ErrorCategory};

pub mod diagnostic_codes {
    // Input contract (programmer errors)
    pub const UNKNOWN_TYPE: u32 = 1001;
    pub const TARGET_NOT_CLASS: u32 = 1002;
    pub const MIXIN_NOT_CLASS: u32 = 1003;
    pub const COMPOSED_INTERFACE_NOT_INTERFACE: u32 = 1004;

    // Composition logic
    pub const CYCLIC_MIXIN_DEPENDENCY: u32 = 2001;
    pub const INTERFACE_ALREADY_INTRODUCED: u32 = 2002;
    pub const INTERFACE_MEMBER_NOT_IMPLEMENTED: u32 = 2003;
    pub const OVERRIDE_BASE_NOT_FOUND: u32 = 2004;
    pub const MULTIPLE_OVERRIDES: u32 = 2005;
    pub const UNSATISFIED_REQUIREMENT: u32 = 2006;
    pub const TARGET_INTERFACE_MEMBER_MISSING: u32 = 2007;
    pub const ANNOTATION_COPY_SOURCE_NOT_FOUND: u32 = 2008;
    pub const ANNOTATION_COPY_INCOMPATIBLE: u32 = 2009;
    pub const ANNOTATION_COPY_DEPTH_EXCEEDED: u32 = 2010;
    pub const REQUIRED_TYPE_NOT_SUPPLIED: u32 = 2011;
}

pub mod diagnostic_messages {
    use super::{DiagnosticMessage, ErrorCategory, diagnostic_codes};

    pub const UNKNOWN_TYPE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNKNOWN_TYPE,
        category: ErrorCategory::InvalidInput,
        message: "Type '{0}' is not declared in the composition model",
    };

    pub const TARGET_NOT_CLASS: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::TARGET_NOT_CLASS,
        category: ErrorCategory::InvalidInput,
        message: "Composition target '{0}' must be a class, but is declared as an interface",
    };

    pub const MIXIN_NOT_CLASS: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::MIXIN_NOT_CLASS,
        category: ErrorCategory::InvalidInput,
        message: "Mixin '{0}' attached to target class '{1}' must be a class, but is declared as an interface",
    };

    pub const COMPOSED_INTERFACE_NOT_INTERFACE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::COMPOSED_INTERFACE_NOT_INTERFACE,
        category: ErrorCategory::InvalidInput,
        message: "Composed interface '{0}' on target class '{1}' must be declared as an interface",
    };

    pub const CYCLIC_MIXIN_DEPENDENCY: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::CYCLIC_MIXIN_DEPENDENCY,
        category: ErrorCategory::Composition,
        message: "The mixins applied to target class '{0}' contain a dependency cycle: {1}",
    };

    pub const INTERFACE_ALREADY_INTRODUCED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INTERFACE_ALREADY_INTRODUCED,
        category: ErrorCategory::Composition,
        message: "Interface '{0}' is introduced by both mixin '{1}' and mixin '{2}' on target class '{3}'",
    };

    pub const INTERFACE_MEMBER_NOT_IMPLEMENTED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::INTERFACE_MEMBER_NOT_IMPLEMENTED,
        category: ErrorCategory::Composition,
        message: "Mixin '{0}' introduces interface '{1}' but does not implement its member '{2}'",
    };

    pub const OVERRIDE_BASE_NOT_FOUND: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::OVERRIDE_BASE_NOT_FOUND,
        category: ErrorCategory::Composition,
        message: "Member '{0}' of mixin '{1}' is marked as an override, but no matching base member exists on target class '{2}' or an earlier mixin",
    };

    pub const MULTIPLE_OVERRIDES: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::MULTIPLE_OVERRIDES,
        category: ErrorCategory::Composition,
        message: "Base member '{0}' of '{1}' is overridden by both mixin '{2}' and mixin '{3}'",
    };

    pub const UNSATISFIED_REQUIREMENT: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::UNSATISFIED_REQUIREMENT,
        category: ErrorCategory::Composition,
        message: "Required interface '{0}' of target class '{1}' is not satisfied: member '{2}' has no implementation",
    };

    pub const TARGET_INTERFACE_MEMBER_MISSING: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::TARGET_INTERFACE_MEMBER_MISSING,
        category: ErrorCategory::Composition,
        message: "Target class '{0}' declares interface '{1}' but does not implement its member '{2}'",
    };

    pub const ANNOTATION_COPY_SOURCE_NOT_FOUND: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::ANNOTATION_COPY_SOURCE_NOT_FOUND,
        category: ErrorCategory::Composition,
        message: "Annotation copy source '{0}' referenced from '{1}' could not be resolved",
    };

    pub const ANNOTATION_COPY_INCOMPATIBLE: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::ANNOTATION_COPY_INCOMPATIBLE,
        category: ErrorCategory::Composition,
        message: "Annotation copy source '{0}' is not compatible with destination '{1}'",
    };

    pub const ANNOTATION_COPY_DEPTH_EXCEEDED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::ANNOTATION_COPY_DEPTH_EXCEEDED,
        category: ErrorCategory::Composition,
        message: "Annotation copy chain starting at '{0}' exceeds the maximum depth",
    };

    pub const REQUIRED_TYPE_NOT_SUPPLIED: DiagnosticMessage = DiagnosticMessage {
        code: diagnostic_codes::REQUIRED_TYPE_NOT_SUPPLIED,
        category: ErrorCategory::Composition,
        message: "Required type '{0}' of target class '{1}' is supplied neither by the target class nor by any of its mixins",
    };
}

/// All diagnostic message definitions, for code-based lookup.
pub const DIAGNOSTIC_MESSAGES: &[DiagnosticMessage] = &[
    diagnostic_messages::UNKNOWN_TYPE,
    diagnostic_messages::TARGET_NOT_CLASS,
    diagnostic_messages::MIXIN_NOT_CLASS,
    diagnostic_messages::COMPOSED_INTERFACE_NOT_INTERFACE,
    diagnostic_messages::CYCLIC_MIXIN_DEPENDENCY,
    diagnostic_messages::INTERFACE_ALREADY_INTRODUCED,
    diagnostic_messages::INTERFACE_MEMBER_NOT_IMPLEMENTED,
    diagnostic_messages::OVERRIDE_BASE_NOT_FOUND,
    diagnostic_messages::MULTIPLE_OVERRIDES,
    diagnostic_messages::UNSATISFIED_REQUIREMENT,
    diagnostic_messages::TARGET_INTERFACE_MEMBER_MISSING,
    diagnostic_messages::ANNOTATION_COPY_SOURCE_NOT_FOUND,
    diagnostic_messages::ANNOTATION_COPY_INCOMPATIBLE,
    diagnostic_messages::ANNOTATION_COPY_DEPTH_EXCEEDED,
    diagnostic_messages::REQUIRED_TYPE_NOT_SUPPLIED,
];
