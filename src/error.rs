use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, editing or fetching node device descriptions.
#[derive(Debug, Error)]
pub enum NodedevError {
    #[error("XML parse error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("XML serialization failed: {message}")]
    Serialize { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot { expected: String, found: String },

    #[error("Required element missing: {path}")]
    MissingElement { path: String },

    #[error("Field '{field}' is not defined for capability type '{capability_type}'")]
    UnknownField { capability_type: String, field: String },

    #[error("Field '{field}' holds '{value}', not a base-{radix} integer")]
    InvalidInteger { field: String, value: String, radix: u32 },

    #[error("Field '{field}' expects a {expected} value")]
    FieldKindMismatch { field: String, expected: &'static str },

    #[error("Unknown capability type '{0}'")]
    UnknownCapabilityType(String),

    #[error("Device has no capability element or capability type")]
    MissingCapability,

    #[error("Invalid capability: {reason}")]
    InvalidCapability { reason: String },

    #[error("Capability type '{capability_type}' has no derivable sysfs path")]
    SysfsPathUnsupported { capability_type: String },

    #[error("Failed to run {program}: {source}")]
    CommandSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("nodedev-dumpxml {device} failed (exit status {status}).\nError: {stderr}")]
    DumpFailed { device: String, status: i32, stderr: String },

    #[error("nodedev-list failed (exit status {status}).\nError: {stderr}")]
    ListFailed { status: i32, stderr: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

pub type Result<T> = std::result::Result<T, NodedevError>;

impl NodedevError {
    pub fn missing_element<S: Into<String>>(path: S) -> Self {
        Self::MissingElement { path: path.into() }
    }

    pub fn invalid_capability<S: Into<String>>(reason: S) -> Self {
        Self::InvalidCapability { reason: reason.into() }
    }

    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration { message: message.into() }
    }

    pub fn serialize<S: Into<String>>(message: S) -> Self {
        Self::Serialize { message: message.into() }
    }

    /// Returns true if the document lacks something the schema requires
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::MissingElement { .. } | Self::MissingCapability | Self::InvalidInteger { .. }
        )
    }

    /// Returns true if the capability type could not be mapped to a variant
    pub fn is_dispatch_error(&self) -> bool {
        matches!(self, Self::UnknownCapabilityType(_))
    }

    /// Returns true if the external virsh invocation failed
    pub fn is_command_error(&self) -> bool {
        matches!(
            self,
            Self::CommandSpawn { .. } | Self::DumpFailed { .. } | Self::ListFailed { .. }
        )
    }
}
