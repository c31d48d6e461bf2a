//! Build metadata accessors.
//! Includes the generated version.rs from the build script so the binary and
//! library share a single source of truth.

include!(concat!(env!("OUT_DIR"), "/version.rs"));

/// Crate version from Cargo metadata
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Build time string from the build script (UTC)
pub fn build_time() -> &'static str {
    BUILD_TIME
}

/// Short git hash captured by the build script
pub fn git_hash() -> &'static str {
    GIT_HASH
}
