use shadow_rs::shadow;

shadow!(build);

/// Log version and build info at startup.
#[allow(dead_code)] // Allow auto-generated code containing unused build metadata
pub fn log_version_info() {
    tracing::info!("Boardmap v{}", build::PKG_VERSION);
    tracing::info!(
        "Build date: {} ({})",
        build::BUILD_TIME_2822,
        build::BUILD_RUST_CHANNEL
    );
}
