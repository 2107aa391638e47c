use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

use eframe::egui;

const CJK_FONT_NAME: &str = "cjk-fallback";

/// Common install locations of a Hangul capable font, tried in order after
/// the configured one.
const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    "/Library/Fonts/AppleGothic.ttf",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

/// Installs the first readable CJK font as a fallback for both font
/// families. Returns the path that was used, if any.
pub fn install_cjk_fonts(ctx: &egui::Context, configured: Option<&Path>) -> Option<PathBuf> {
    let candidates = configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_CJK_FONTS.iter().map(|path| PathBuf::from(*path)));

    for path in candidates {
        match fs::read(&path) {
            Ok(bytes) => {
                ctx.set_fonts(with_fallback_font(egui::FontDefinitions::default(), bytes));
                tracing::info!(path = %path.display(), "installed CJK fallback font");
                return Some(path);
            }
            Err(err) => tracing::debug!(path = %path.display(), %err, "CJK font not available"),
        }
    }

    tracing::warn!("no CJK font found; set font_path in glossary.toml so Hangul renders");
    None
}

fn with_fallback_font(mut fonts: egui::FontDefinitions, bytes: Vec<u8>) -> egui::FontDefinitions {
    fonts.font_data.insert(
        CJK_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }
    fonts
}
