//! In-memory board backend
//!
//! [`MemoryBoard`] keeps everything a layout session produces in plain
//! vectors: resolved primitives, placed footprints with their pads, and the
//! net table. Footprint pad lists come from a [`FootprintCatalog`] instead of
//! library files on disk.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use circuitpainter_core::{BackendError, BoardPoint, PreconditionError, Result};
use circuitpainter_settings::PainterConfig;
use serde::{Deserialize, Serialize};

use crate::backend::{
    BoardBackend, FootprintPlacement, ItemHandle, NetHandle, PadInfo, Primitive, PrimitiveKind,
};
use crate::transform::AffineFrame;

/// Pad of a catalog footprint, relative to the footprint origin (mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PadTemplate {
    pub number: String,
    pub x: f64,
    pub y: f64,
}

impl PadTemplate {
    pub fn new(number: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            number: number.into(),
            x,
            y,
        }
    }
}

/// On-disk catalog layout: library name, then part name, then pads
#[derive(Debug, Deserialize)]
struct CatalogFile {
    libraries: BTreeMap<String, BTreeMap<String, Vec<PadTemplate>>>,
}

/// Footprint pad lists keyed by library path and part name
#[derive(Debug, Clone, Default)]
pub struct FootprintCatalog {
    entries: HashMap<(PathBuf, String), Vec<PadTemplate>>,
}

impl FootprintCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a footprint
    pub fn register(
        &mut self,
        library_path: impl Into<PathBuf>,
        part: impl Into<String>,
        pads: Vec<PadTemplate>,
    ) {
        self.entries.insert((library_path.into(), part.into()), pads);
    }

    pub fn lookup(&self, library_path: &Path, part: &str) -> Option<&[PadTemplate]> {
        self.entries
            .get(&(library_path.to_path_buf(), part.to_string()))
            .map(Vec::as_slice)
    }

    /// Parse a JSON catalog
    ///
    /// Library names are resolved against the configured library base, so
    /// `"LED_SMD"` registers its parts under `<library_base>/LED_SMD.pretty`.
    ///
    /// ```json
    /// { "libraries": { "LED_SMD": { "LED_0805_2012Metric": [
    ///     { "number": "1", "x": -1.0, "y": 0.0 },
    ///     { "number": "2", "x": 1.0, "y": 0.0 } ] } } }
    /// ```
    pub fn from_json(json: &str, config: &PainterConfig) -> Result<Self> {
        let file: CatalogFile =
            serde_json::from_str(json).map_err(|e| BackendError::InvalidCatalog {
                reason: e.to_string(),
            })?;

        let mut catalog = Self::new();
        for (library, parts) in file.libraries {
            let library_path = config.library_path(&library);
            for (part, pads) in parts {
                catalog.register(library_path.clone(), part, pads);
            }
        }
        tracing::debug!("Loaded footprint catalog with {} parts", catalog.len());
        Ok(catalog)
    }

    /// Read and parse a JSON catalog file
    pub fn from_json_file(path: &Path, config: &PainterConfig) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| BackendError::InvalidCatalog {
            reason: format!("{}: {}", path.display(), e),
        })?;
        Self::from_json(&json, config)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Pad of a placed footprint
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedPad {
    pub handle: ItemHandle,
    pub number: String,
    pub position: BoardPoint,
    pub net: Option<NetHandle>,
}

/// Footprint as placed on the board
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedFootprint {
    pub handle: ItemHandle,
    pub library_path: PathBuf,
    pub part: String,
    pub position: BoardPoint,
    pub angle: f64,
    pub reference: String,
    pub reference_visible: bool,
    pub pads: Vec<PlacedPad>,
}

/// Item counts for a board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardSummary {
    pub primitives: usize,
    pub footprints: usize,
    pub pads: usize,
    pub nets: usize,
}

impl fmt::Display for BoardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} primitives, {} footprints ({} pads), {} nets",
            self.primitives, self.footprints, self.pads, self.nets
        )
    }
}

/// Board backend that stores everything in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryBoard {
    catalog: FootprintCatalog,
    primitives: Vec<(ItemHandle, Primitive)>,
    footprints: Vec<PlacedFootprint>,
    positions: HashMap<ItemHandle, BoardPoint>,
    nets: Vec<String>,
}

impl MemoryBoard {
    /// Empty board with no known footprints
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(catalog: FootprintCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn catalog_mut(&mut self) -> &mut FootprintCatalog {
        &mut self.catalog
    }

    /// Primitives in emission order
    pub fn primitives(&self) -> impl Iterator<Item = &Primitive> {
        self.primitives.iter().map(|(_, p)| p)
    }

    pub fn primitive(&self, handle: ItemHandle) -> Option<&Primitive> {
        self.primitives
            .iter()
            .find(|(h, _)| *h == handle)
            .map(|(_, p)| p)
    }

    pub fn count_of(&self, kind: PrimitiveKind) -> usize {
        self.primitives().filter(|p| p.kind() == kind).count()
    }

    /// Footprints in placement order
    pub fn footprints(&self) -> &[PlacedFootprint] {
        &self.footprints
    }

    /// First footprint carrying `reference`
    pub fn footprint(&self, reference: &str) -> Option<&PlacedFootprint> {
        self.footprints.iter().find(|f| f.reference == reference)
    }

    /// Net names in creation order; net code `n` is entry `n - 1`
    pub fn net_names(&self) -> &[String] {
        &self.nets
    }

    pub fn net_name(&self, net: NetHandle) -> Option<&str> {
        let index = (net.code() as usize).checked_sub(1)?;
        self.nets.get(index).map(String::as_str)
    }

    pub fn summary(&self) -> BoardSummary {
        BoardSummary {
            primitives: self.primitives.len(),
            footprints: self.footprints.len(),
            pads: self.footprints.iter().map(|f| f.pads.len()).sum(),
            nets: self.nets.len(),
        }
    }

    fn lookup_pads(&self, library_path: &Path, part: &str) -> Result<&[PadTemplate]> {
        self.catalog.lookup(library_path, part).ok_or_else(|| {
            BackendError::FootprintNotFound {
                library: library_path.display().to_string(),
                part: part.to_string(),
            }
            .into()
        })
    }
}

impl BoardBackend for MemoryBoard {
    fn emit_primitive(&mut self, primitive: Primitive) -> Result<ItemHandle> {
        let handle = ItemHandle::new();
        self.positions.insert(handle, primitive.anchor());
        self.primitives.push((handle, primitive));
        Ok(handle)
    }

    fn load_pads(&self, library_path: &Path, part: &str) -> Result<Vec<PadInfo>> {
        Ok(self
            .lookup_pads(library_path, part)?
            .iter()
            .map(|pad| PadInfo {
                number: pad.number.clone(),
            })
            .collect())
    }

    fn emit_footprint(&mut self, placement: FootprintPlacement) -> Result<ItemHandle> {
        let templates = self.lookup_pads(&placement.library_path, &placement.part)?;

        if let Some(nets) = &placement.nets {
            if nets.len() != templates.len() {
                return Err(PreconditionError::NetCountMismatch {
                    part: placement.part.clone(),
                    expected: templates.len(),
                    actual: nets.len(),
                }
                .into());
            }
        }

        let (x, y) = placement.position.to_mm();
        let pose = AffineFrame::translation(x, y).rotated(placement.angle);
        let pads: Vec<PlacedPad> = templates
            .iter()
            .enumerate()
            .map(|(index, pad)| {
                let at = pose.apply(pad.x, pad.y);
                PlacedPad {
                    handle: ItemHandle::new(),
                    number: pad.number.clone(),
                    position: BoardPoint::from_mm(at.x, at.y),
                    net: placement.nets.as_ref().map(|nets| nets[index]),
                }
            })
            .collect();

        let handle = ItemHandle::new();
        self.positions.insert(handle, placement.position);
        for pad in &pads {
            self.positions.insert(pad.handle, pad.position);
        }
        self.footprints.push(PlacedFootprint {
            handle,
            library_path: placement.library_path,
            part: placement.part,
            position: placement.position,
            angle: placement.angle,
            reference: placement.reference,
            reference_visible: placement.reference_visible,
            pads,
        });
        Ok(handle)
    }

    fn footprint_pads(&self, reference: &str) -> Result<Vec<ItemHandle>> {
        self.footprint(reference)
            .map(|f| f.pads.iter().map(|p| p.handle).collect())
            .ok_or_else(|| {
                BackendError::UnknownReference {
                    reference: reference.to_string(),
                }
                .into()
            })
    }

    fn resolve_position(&self, handle: ItemHandle) -> Result<BoardPoint> {
        self.positions.get(&handle).copied().ok_or_else(|| {
            BackendError::UnknownHandle {
                handle: handle.to_string(),
            }
            .into()
        })
    }

    fn find_or_create_net(&mut self, name: &str) -> Result<NetHandle> {
        let index = match self.nets.iter().position(|n| n == name) {
            Some(index) => index,
            None => {
                self.nets.push(name.to_string());
                self.nets.len() - 1
            }
        };
        Ok(NetHandle::new(index as u32 + 1))
    }
}
