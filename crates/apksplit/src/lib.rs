#![no_std]

// Configuration sets, names and diagnostics are heap-backed.
extern crate alloc;

// --- Foundation Modules ---
pub mod types;
pub mod error;
pub mod diag;
pub mod utils;
pub mod value;

// --- Configuration Model ---
pub mod config;

// --- Parameter Resolution ---
pub mod density;
pub mod filter;
pub mod split;

// --- Top-level Exports ---
pub use config::{ConfigAxes, ConfigDescription, LocaleValue};
pub use density::parse_target_density_parameter;
pub use diag::{CollectingDiagnostics, DiagLevel, DiagMessage, Diagnostics, LogDiagnostics, Source};
pub use error::{ParamError, ParamWarning, ParseConfigError};
pub use filter::{AxisConfigFilter, ConfigFilter, parse_config_filter_parameters};
pub use split::{
    SplitConstraints, SplitOptions, SplitParameter, adjust_split_constraints_for_min_sdk,
    parse_split_parameter,
};
pub use types::ResourceId;
pub use value::{BinaryPrimitive, Item, Reference};
