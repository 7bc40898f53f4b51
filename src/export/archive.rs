//! Archive rendering
//!
//! A [`DocumentRenderer`] prepares its assets, then turns a
//! [`DocumentDefinition`] into file bytes. Asset preparation runs before
//! anything is built, so a missing font aborts the export without leaving a
//! partial file behind.
//!
//! [`DefinitionRenderer`] writes the definition as pretty JSON that a PDF
//! engine can consume; its files carry a `.json` extension.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{LedgerError, LedgerResult};
use crate::models::{ExportRequest, LetterheadInfo};
use crate::reports::{DocumentBuilder, DocumentDefinition};
use crate::storage::write_bytes_atomic;

/// Font files a renderer embeds, keyed by role
pub const REQUIRED_FONTS: [(&str, &str); 4] = [
    ("normal", "Roboto-Regular.ttf"),
    ("bold", "Roboto-Medium.ttf"),
    ("italics", "Roboto-Italic.ttf"),
    ("bolditalics", "Roboto-MediumItalic.ttf"),
];

/// Turns document definitions into file bytes
pub trait DocumentRenderer {
    /// Prepare fonts and other resources; an error aborts the export
    fn load_assets(&mut self) -> LedgerResult<()>;

    fn render(&self, document: &DocumentDefinition) -> LedgerResult<Vec<u8>>;

    /// File name for an export request
    fn file_name(&self, request: &ExportRequest) -> String {
        request.file_name()
    }
}

/// Output of a successful export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl RenderedDocument {
    /// Write into a directory atomically, returning the full path
    pub fn write_to(&self, dir: &Path) -> LedgerResult<PathBuf> {
        let path = dir.join(&self.file_name);
        write_bytes_atomic(&path, &self.bytes)
            .map_err(|e| LedgerError::Export(format!("Failed to write {}: {}", path.display(), e)))?;
        Ok(path)
    }
}

/// Resolved font files
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontAssets {
    pub files: BTreeMap<String, PathBuf>,
}

impl FontAssets {
    /// Locate every required font in a directory
    pub fn load(dir: &Path) -> LedgerResult<Self> {
        if !dir.is_dir() {
            return Err(LedgerError::Assets(format!(
                "Fonts directory not found: {}",
                dir.display()
            )));
        }

        let mut files = BTreeMap::new();
        for (role, file) in REQUIRED_FONTS {
            let path = dir.join(file);
            if !path.is_file() {
                return Err(LedgerError::Assets(format!(
                    "Missing font {} in {}",
                    file,
                    dir.display()
                )));
            }
            files.insert(role.to_string(), path);
        }
        Ok(Self { files })
    }
}

#[derive(Serialize)]
struct DefinitionFile<'a> {
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    fonts: BTreeMap<&'a str, String>,
    #[serde(flatten)]
    document: &'a DocumentDefinition,
}

/// Writes the document definition as JSON
#[derive(Debug, Default)]
pub struct DefinitionRenderer {
    fonts_dir: Option<PathBuf>,
    fonts: Option<FontAssets>,
}

impl DefinitionRenderer {
    /// Renderer using built-in fonts, or the fonts found in `fonts_dir`
    pub fn new(fonts_dir: Option<PathBuf>) -> Self {
        Self {
            fonts_dir,
            fonts: None,
        }
    }
}

impl DocumentRenderer for DefinitionRenderer {
    fn load_assets(&mut self) -> LedgerResult<()> {
        if let Some(dir) = &self.fonts_dir {
            self.fonts = Some(FontAssets::load(dir)?);
        }
        Ok(())
    }

    fn render(&self, document: &DocumentDefinition) -> LedgerResult<Vec<u8>> {
        let fonts = self
            .fonts
            .iter()
            .flat_map(|assets| assets.files.iter())
            .map(|(role, path)| (role.as_str(), path.display().to_string()))
            .collect();

        serde_json::to_vec_pretty(&DefinitionFile { fonts, document })
            .map_err(|e| LedgerError::Render(format!("Failed to serialize document: {}", e)))
    }

    fn file_name(&self, request: &ExportRequest) -> String {
        let name = request.file_name();
        match name.strip_suffix(".pdf") {
            Some(stem) => format!("{}.json", stem),
            None => name,
        }
    }
}

/// Run one export: assets, build, render
pub fn export_archive<R>(
    renderer: &mut R,
    builder: &DocumentBuilder,
    request: &ExportRequest,
    letterhead: &LetterheadInfo,
) -> LedgerResult<RenderedDocument>
where
    R: DocumentRenderer + ?Sized,
{
    renderer.load_assets()?;

    let document = builder.build(request, letterhead);
    let bytes = renderer.render(&document)?;
    let file_name = renderer.file_name(request);

    tracing::info!(
        file = %file_name,
        months = request.months.len(),
        bytes = bytes.len(),
        "rendered archive"
    );
    Ok(RenderedDocument { file_name, bytes })
}
