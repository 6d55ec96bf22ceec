//! Move definitions: authoring configs, immutable templates, the template registry and
//! the direction inverter.

pub mod invert;
pub mod registry;
pub mod template;

pub use invert::{invert, invert_x, invert_xy, invert_y, InvertMode};
pub use registry::MoveRegistry;
pub use template::{
    MoveConfig, MoveId, MoveKind, MoveTemplate, DEFAULT_CHARGE_TIMEOUT_MS,
    DEFAULT_SEQUENCE_TIMEOUT_MS,
};
