//! Standard exit codes for CLI operations
//!
//! These exit codes follow Unix conventions and sysexits.h where applicable.

#![allow(dead_code)]

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - unspecified failure
pub const ERROR: i32 = 1;

/// Validation error - the variable set or topology failed its checks
pub const VALIDATION_ERROR: i32 = 2;

/// Render error - template resolution failed
pub const RENDER_ERROR: i32 = 3;

/// Project error - missing or malformed sitekit.yaml / manifests
pub const PROJECT_ERROR: i32 = 4;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 5;

/// Cluster error - the Kubernetes API rejected or failed an operation
pub const CLUSTER_ERROR: i32 = 6;

/// Usage error - invalid arguments or options (following sysexits.h convention)
pub const USAGE_ERROR: i32 = 64;
