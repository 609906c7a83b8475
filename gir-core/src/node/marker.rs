//! Reserved variable names
//!
//! Control dependencies are ordinary edges routed through a synthetic
//! variable whose name is `CONTROL_DEP_VAR_NAME`. Everything beginning
//! with `RESERVED_PREFIX` belongs to the IR itself, so a user-defined
//! variable can never collide with the marker.

/// Name carried by every synthetic control-dependency variable
pub const CONTROL_DEP_VAR_NAME: &str = "__control_var";

/// Namespace reserved for names the IR generates itself
pub const RESERVED_PREFIX: &str = "__";

/// The control-dependency marker, readable without a node in hand
pub const fn control_dep_var_name() -> &'static str {
    CONTROL_DEP_VAR_NAME
}

/// Check whether a variable name marks a control-dependency carrier
pub fn is_control_dep_var_name(name: &str) -> bool {
    name == CONTROL_DEP_VAR_NAME
}

/// Check whether a name falls inside the reserved namespace
pub fn is_reserved_var_name(name: &str) -> bool {
    name.starts_with(RESERVED_PREFIX)
}
