use std::path::PathBuf;

use egui::{FontData, FontDefinitions, FontFamily};

/// System fonts covering the full-width and half-width kana in the ASCII
/// character art. egui's bundled fonts don't.
fn find_glyph_fonts() -> Vec<PathBuf> {
    let cjk_candidates = [
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/TTF/NotoSansMonoCJKjp-Regular.otf",
        "/usr/share/fonts/adobe-source-han-sans/SourceHanSans.ttc",
    ];
    let mono_candidates = [
        "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    ];

    let mut out = Vec::new();
    for candidates in [cjk_candidates.as_slice(), mono_candidates.as_slice()] {
        if let Some(found) = candidates.iter().map(PathBuf::from).find(|p| p.exists()) {
            out.push(found);
        }
    }
    out
}

/// Appends discovered fonts as fallbacks behind egui's defaults.
pub fn install_glyph_fonts(ctx: &egui::Context) {
    let mut fonts = FontDefinitions::default();
    let mut installed = 0;
    for (idx, font_path) in find_glyph_fonts().into_iter().enumerate() {
        match std::fs::read(&font_path) {
            Ok(bytes) => {
                let key = format!("GlyphFont{idx}");
                fonts.font_data.insert(key.clone(), FontData::from_owned(bytes));
                fonts.families.entry(FontFamily::Monospace).or_default().push(key.clone());
                fonts.families.entry(FontFamily::Proportional).or_default().push(key);
                installed += 1;
            }
            Err(e) => log::warn!("could not read font {}: {e}", font_path.display()),
        }
    }
    if installed == 0 {
        log::info!("no CJK font found, character art may render with missing glyphs");
    }
    ctx.set_fonts(fonts);
}
