pub const APP_NAME: &str = "Freight Cost Optimizer";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");
pub const GIT_COMMIT: Option<&str> = option_env!("GIT_COMMIT");

/// The release tag when built from a tagged checkout, else the crate version
/// with the commit appended when known.
pub fn version_label() -> String {
    label(GIT_TAG, GIT_COMMIT)
}

fn label(tag: Option<&str>, commit: Option<&str>) -> String {
    match (tag, commit) {
        (Some(tag), _) => tag.to_string(),
        (None, Some(commit)) => format!("v{APP_VERSION}+{commit}"),
        (None, None) => format!("v{APP_VERSION}"),
    }
}
