//! # carapace-io
//!
//! Run input/output contract and validation.
//!
//! Defines the boundary types that external systems (CLI, host
//! integrations) use to hand geometry and parameters to the culling
//! core, and the validation that catches data-level errors before the
//! pipeline receives them.

pub mod contract;
pub mod files;
pub mod validator;

pub use contract::CullInput;
pub use files::{load_mesh_json, load_params_toml, save_mesh_json};
pub use validator::validate_input;
