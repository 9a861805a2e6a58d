pub mod permissions;

pub use permissions::{EnvPermissionProbe, PermissionFlags, PermissionProbe};
