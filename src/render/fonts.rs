use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::foundation::error::{ReelError, ReelResult};
use crate::view::FontFamily;

const SANS_SERIF_NAMES: &[&str] = &[
    "Helvetica",
    "Arial",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
];
const MONOSPACE_NAMES: &[&str] = &[
    "Consolas",
    "Monaco",
    "Menlo",
    "Courier New",
    "Liberation Mono",
    "DejaVu Sans Mono",
    "Noto Sans Mono",
];

/// Where the renderer looks for fonts.
#[derive(Clone, Debug)]
pub struct FontOptions {
    /// Query the operating system's installed fonts.
    pub system_fonts: bool,
    /// Extra directories scanned (non-recursively) for `.ttf`, `.otf` and `.ttc` files.
    pub font_dirs: Vec<PathBuf>,
    /// Font file used for sans-serif text instead of a database lookup.
    pub sans_serif_file: Option<PathBuf>,
    /// Font file used for monospace text instead of a database lookup.
    pub monospace_file: Option<PathBuf>,
}

impl Default for FontOptions {
    fn default() -> Self {
        Self {
            system_fonts: true,
            font_dirs: vec![PathBuf::from("fonts")],
            sans_serif_file: None,
            monospace_file: None,
        }
    }
}

/// Raw bytes of one resolved font face.
#[derive(Debug)]
pub(crate) struct FaceData {
    pub(crate) bytes: Arc<Vec<u8>>,
    pub(crate) index: u32,
}

/// Lazily built font database mapping (family class, weight) to a concrete face.
pub(crate) struct FontBook {
    opts: FontOptions,
    db: Option<usvg::fontdb::Database>,
    resolved: HashMap<(FontFamily, bool), Arc<FaceData>>,
}

impl FontBook {
    pub(crate) fn new(opts: FontOptions) -> Self {
        Self {
            opts,
            db: None,
            resolved: HashMap::new(),
        }
    }

    /// Resolve the face used for `family` at the given weight, caching the result.
    pub(crate) fn resolve(&mut self, family: FontFamily, bold: bool) -> ReelResult<Arc<FaceData>> {
        if let Some(face) = self.resolved.get(&(family, bold)) {
            return Ok(face.clone());
        }

        let explicit = match family {
            FontFamily::SansSerif => self.opts.sans_serif_file.clone(),
            FontFamily::Monospace => self.opts.monospace_file.clone(),
        };
        let face = match explicit {
            Some(path) => read_face_file(&path)?,
            None => self.query(family, bold)?,
        };

        let face = Arc::new(face);
        self.resolved.insert((family, bold), face.clone());
        Ok(face)
    }

    fn query(&mut self, family: FontFamily, bold: bool) -> ReelResult<FaceData> {
        let opts = &self.opts;
        let db = self.db.get_or_insert_with(|| build_fontdb(opts));

        let (names, generic) = match family {
            FontFamily::SansSerif => (SANS_SERIF_NAMES, usvg::fontdb::Family::SansSerif),
            FontFamily::Monospace => (MONOSPACE_NAMES, usvg::fontdb::Family::Monospace),
        };
        let mut families = names
            .iter()
            .map(|n| usvg::fontdb::Family::Name(n))
            .collect::<Vec<_>>();
        families.push(generic);

        let query = usvg::fontdb::Query {
            families: &families,
            weight: if bold {
                usvg::fontdb::Weight::BOLD
            } else {
                usvg::fontdb::Weight::NORMAL
            },
            stretch: usvg::fontdb::Stretch::Normal,
            style: usvg::fontdb::Style::Normal,
        };

        let id = match db.query(&query) {
            Some(id) => id,
            None => {
                let Some(first) = db.faces().next() else {
                    return Err(ReelError::font(format!(
                        "no font face available for {family:?} (no system fonts and no font files)"
                    )));
                };
                tracing::warn!(?family, bold, "no matching font family, using first available face");
                first.id
            }
        };

        let (bytes, index) = db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| ReelError::font(format!("font face data unavailable for {family:?}")))?;

        tracing::debug!(?family, bold, bytes = bytes.len(), index, "resolved font face");
        Ok(FaceData {
            bytes: Arc::new(bytes),
            index,
        })
    }
}

fn read_face_file(path: &Path) -> ReelResult<FaceData> {
    let bytes = std::fs::read(path)
        .map_err(|e| ReelError::font(format!("read font file {}: {e}", path.display())))?;
    Ok(FaceData {
        bytes: Arc::new(bytes),
        index: 0,
    })
}

fn build_fontdb(opts: &FontOptions) -> usvg::fontdb::Database {
    let mut db = usvg::fontdb::Database::new();
    if opts.system_fonts {
        db.load_system_fonts();
    }
    for dir in &opts.font_dirs {
        load_fonts_from_dir(&mut db, dir);
    }
    tracing::debug!(faces = db.len(), "font database loaded");
    db
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        let _ = db.load_font_file(&path);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fonts.rs"]
mod tests;
