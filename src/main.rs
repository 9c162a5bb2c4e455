mod app;
mod ui;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use eframe::egui;
use url::Url;

use wordplay::config::WordplayConfig;
use wordplay::net::source::{DirectorySource, HttpSource, PageSource};

use app::ViewerApp;

/// Origin given to a site served from a local build directory.
const LOCAL_ORIGIN: &str = "http://site.local/";
const DEFAULT_START: &str = "http://localhost:4000/";

/// Where the viewer reads pages from: a live site, or a built `_site/`
/// directory given as a path.
fn start_point(arg: Option<String>) -> Result<(Arc<dyn PageSource>, Url), String> {
    let arg = arg.unwrap_or_else(|| DEFAULT_START.to_string());
    if Path::new(&arg).is_dir() {
        let base = Url::parse(LOCAL_ORIGIN).map_err(|e| e.to_string())?;
        log::info!("serving {arg} as {base}");
        return Ok((Arc::new(DirectorySource::new(PathBuf::from(arg))), base));
    }
    let url = if arg.starts_with("http://") || arg.starts_with("https://") {
        Url::parse(&arg)
    } else {
        Url::parse(&format!("https://{arg}"))
    }
    .map_err(|e| format!("invalid start URL {arg:?}: {e}"))?;
    Ok((Arc::new(HttpSource), url))
}

/// Preference store location: `WORDPLAY_STORE`, else the temp dir.
fn store_path() -> PathBuf {
    std::env::var_os("WORDPLAY_STORE")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("wordplay-header-store.json"))
}

/// Register the first Hebrew-capable system font as a fallback family.
fn install_fonts(ctx: &egui::Context) {
    let mut fonts = egui::FontDefinitions::default();
    let font_paths = [
        "/System/Library/Fonts/ArialHB.ttc",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];
    for path in &font_paths {
        if let Ok(data) = std::fs::read(path) {
            log::debug!("using {path} for Hebrew glyphs");
            fonts
                .font_data
                .insert("hebrew".to_owned(), egui::FontData::from_owned(data));
            for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
                if let Some(list) = fonts.families.get_mut(&family) {
                    list.push("hebrew".to_owned());
                }
            }
            break;
        }
    }
    ctx.set_fonts(fonts);
}

fn main() {
    env_logger::init();

    let config = match WordplayConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}; using defaults");
            WordplayConfig::default()
        }
    };
    let (source, start) = match start_point(std::env::args().nth(1)) {
        Ok(start) => start,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(2);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1100.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wordplay Header",
        options,
        Box::new(move |cc| {
            install_fonts(&cc.egui_ctx);
            Ok(Box::new(ViewerApp::new(source, start, config, store_path())))
        }),
    )
    .expect("Failed to start the viewer");
}
