//! Desktop viewer for the touchrig controller.
//!
//! Usage: `touchrig [OPTIONS.toml | PRESET_DIR [NAME]]`
//!
//! A directory argument loads preset `NAME` from it, or the first preset
//! in name order when no name is given.

use std::path::{Path, PathBuf};

use touchrig::{viewer::Viewer, Options};

/// Resolve the command-line arguments to an options file.
fn options_path(arg: &str, preset: Option<String>) -> Option<PathBuf> {
    let path = Path::new(arg);
    if !path.is_dir() {
        return Some(path.to_path_buf());
    }
    let presets = Options::list_presets(path);
    log::info!("presets in {arg}: {}", presets.join(", "));
    let name = preset.or_else(|| presets.first().cloned())?;
    Some(path.join(format!("{name}.toml")))
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut builder = Viewer::builder().with_title("touchrig");
    if let Some(arg) = args.next() {
        let Some(path) = options_path(&arg, args.next()) else {
            log::error!("no presets in {arg}");
            std::process::exit(1);
        };
        match Options::load(&path) {
            Ok(options) => {
                log::info!("loaded options from {}", path.display());
                builder = builder.with_options(options);
            }
            Err(e) => {
                log::error!(
                    "failed to load options from {}: {e}",
                    path.display()
                );
                std::process::exit(1);
            }
        }
    }

    if let Err(e) = builder.build().run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
