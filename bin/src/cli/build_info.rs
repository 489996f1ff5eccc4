//! quadrand binary build info

/// Formatted quadrand binary build info
#[allow(dead_code, missing_docs, clippy::missing_docs_in_private_items)]
mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

/// Returns `$default` for a `None` in const context.
macro_rules! const_unwrap_or {
    ($opt:expr, $default:expr) => {
        match $opt {
            Some(v) => v,
            None => $default,
        }
    };
}

/// Version, git commit, compiler and build time.
pub(crate) const BUILD_INFO: &str = const_format::formatcp!(
    "{}
        git info: {}
        compiler: {}
        build time: {}
    ",
    built_info::PKG_VERSION,
    const_unwrap_or!(built_info::GIT_COMMIT_HASH_SHORT, "unknown"),
    built_info::RUSTC_VERSION,
    built_info::BUILT_TIME_UTC
);
