// crates/apksplit-xml/src/error.rs

use quick_xml::events::attributes::AttrError;
use std::fmt;
use std::string::FromUtf8Error;

/// Errors that can occur while reading or writing an XML document.
#[derive(Debug, thiserror::Error)]
pub enum XmlError {
    /// The reader rejected the document at the given line.
    #[error("line {line}: XML parsing error: {source}")]
    Parse {
        line: usize,
        #[source]
        source: quick_xml::Error,
    },

    /// An error from the underlying `quick-xml` reader or writer.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A malformed attribute (e.g., a duplicate or unquoted one).
    #[error("attribute error: {0}")]
    Attribute(#[from] AttrError),

    /// The writer's sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Text or written output was not valid UTF-8.
    #[error("invalid UTF-8: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// A name used a prefix with no enclosing `xmlns:` declaration.
    #[error("line {line}: unbound namespace prefix '{prefix}'")]
    UnboundPrefix { prefix: String, line: usize },

    /// An element or attribute namespace has no prefix in scope when writing.
    #[error("no namespace prefix in scope for '{uri}'")]
    UnboundNamespace { uri: String },

    /// An entity reference that is neither predefined nor a character reference.
    #[error("line {line}: unknown entity '&{name};'")]
    UnknownEntity { name: String, line: usize },

    /// A second top-level element follows the root.
    #[error("line {line}: document has more than one root element")]
    MultipleRoots { line: usize },

    /// The document ended inside an element.
    #[error("unexpected end of document inside <{name}>")]
    UnclosedElement { name: String },
}

/// Why a single attribute value could not be extracted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The compiled value has a different kind than the one expected.
    WrongCompiledType { expected: &'static str },

    /// A string was required but the value is empty.
    EmptyValue { compiled: bool },

    /// The text does not parse as an integer.
    NotAnInteger { text: String },

    /// The value is neither a number nor a known platform codename.
    NotASdkVersion { text: String, compiled: bool },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::WrongCompiledType { expected } => {
                write!(f, "compiled value is not {}", expected)
            }
            ExtractError::EmptyValue { compiled: true } => {
                write!(f, "compiled value is an empty string")
            }
            ExtractError::EmptyValue { compiled: false } => write!(f, "value is an empty string"),
            ExtractError::NotAnInteger { text } => write!(f, "'{}' is not a valid integer", text),
            ExtractError::NotASdkVersion { compiled: true, .. } => {
                write!(f, "compiled string value is not a valid SDK version")
            }
            ExtractError::NotASdkVersion { text, .. } => {
                write!(f, "'{}' is not a valid SDK version", text)
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Why application identity could not be read from a manifest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManifestError {
    /// The document has no element at all.
    #[error("document has no root element")]
    EmptyDocument,

    #[error("root tag must be <manifest>")]
    WrongRootElement,

    #[error("<manifest> must have a 'package' attribute")]
    MissingPackage,

    #[error("invalid package name: {0}")]
    InvalidPackageName(ExtractError),

    #[error("invalid android:versionCode: {0}")]
    InvalidVersionCode(ExtractError),

    #[error("invalid android:revisionCode: {0}")]
    InvalidRevisionCode(ExtractError),

    #[error("invalid split name: {0}")]
    InvalidSplitName(ExtractError),

    #[error("invalid android:minSdkVersion: {0}")]
    InvalidMinSdkVersion(ExtractError),
}
