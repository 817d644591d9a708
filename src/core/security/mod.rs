// Security module for output path validation
//
// When a root directory is configured, generated pages may only be written
// inside it. Without one, paths are used exactly as the caller gave them.

pub mod path_validator;

pub use path_validator::{PathSecurityError, validate_output_path};
