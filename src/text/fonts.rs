use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Arc,
};

use usvg::fontdb;

use crate::{
    config::FontsConfig,
    foundation::error::{SheetError, SheetResult},
};

/// Logical typefaces used by the sheet. Each is bound once to a concrete face and size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Player name in the header.
    Name,
    /// Song titles and plate text.
    Title,
    /// Achievement and total rating.
    Score,
    /// Rank marker, internal difficulty and per-chart rating.
    Label,
}

impl FontRole {
    pub const ALL: [FontRole; 4] = [
        FontRole::Name,
        FontRole::Title,
        FontRole::Score,
        FontRole::Label,
    ];
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoundFace {
    pub family: String,
    pub size: f32,
}

/// Read-only font database plus the role bindings. Built at startup, shared by reference.
#[derive(Clone)]
pub struct FontBook {
    db: Arc<fontdb::Database>,
    faces: HashMap<FontRole, BoundFace>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("face_count", &self.db.len())
            .field("faces", &self.faces)
            .finish()
    }
}

impl FontBook {
    /// Book with no font data; text draws resolve to nothing.
    pub fn empty() -> Self {
        let defaults = FontsConfig::default();
        let faces = FontRole::ALL
            .into_iter()
            .map(|role| {
                (
                    role,
                    BoundFace {
                        family: "sans-serif".to_string(),
                        size: defaults.get(role).size,
                    },
                )
            })
            .collect();
        Self {
            db: Arc::new(fontdb::Database::new()),
            faces,
        }
    }

    /// Load every role's font file from under `root`. Files shared by several roles are read once.
    pub fn load(root: &Path, fonts: &FontsConfig) -> SheetResult<Self> {
        let mut db = fontdb::Database::new();
        let mut families = HashMap::<PathBuf, String>::new();
        let mut faces = HashMap::new();

        for role in FontRole::ALL {
            let spec = fonts.get(role);
            let path = root.join(&spec.path);
            let family = match families.get(&path) {
                Some(family) => family.clone(),
                None => {
                    let family = register_font_file(&mut db, &path)?;
                    tracing::debug!(?role, family = %family, path = %path.display(), "font bound");
                    families.insert(path, family.clone());
                    family
                }
            };
            faces.insert(
                role,
                BoundFace {
                    family,
                    size: spec.size,
                },
            );
        }

        Ok(Self {
            db: Arc::new(db),
            faces,
        })
    }

    pub fn face(&self, role: FontRole) -> &BoundFace {
        &self.faces[&role]
    }

    pub fn database(&self) -> &Arc<fontdb::Database> {
        &self.db
    }
}

fn register_font_file(db: &mut fontdb::Database, path: &Path) -> SheetResult<String> {
    let bytes = std::fs::read(path)
        .map_err(|e| SheetError::font(format!("read '{}': {e}", path.display())))?;
    let ids = db.load_font_source(fontdb::Source::Binary(Arc::new(bytes)));
    ids.first()
        .and_then(|id| db.face(*id))
        .and_then(|face| face.families.first())
        .map(|(name, _)| name.clone())
        .ok_or_else(|| SheetError::font(format!("no usable face in '{}'", path.display())))
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
