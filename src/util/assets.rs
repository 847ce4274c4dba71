use std::{borrow::Cow, sync::OnceLock};

use rust_embed::RustEmbed;

/// Embed the `assets/` directory into the binary.
#[derive(RustEmbed)]
#[folder = "assets"]
struct EmbeddedAssets;

static MAIN_CSS: OnceLock<String> = OnceLock::new();

/// Returns the contents of `assets/main.css`.
pub fn main_css() -> &'static str {
    MAIN_CSS.get_or_init(|| load_text("main.css")).as_str()
}

fn load_text(path: &str) -> String {
    let bytes: Cow<'static, [u8]> = EmbeddedAssets::get(path)
        .map(|file| file.data)
        .unwrap_or(Cow::Borrowed(&[]));
    String::from_utf8_lossy(&bytes).into_owned()
}
