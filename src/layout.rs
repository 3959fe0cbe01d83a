use std::str::FromStr;

use crate::error::{BoothError, BoothResult};

/// Outer margin around the photo area, in pixels.
pub const PADDING: u32 = 40;
/// Gap between adjacent photos, in pixels.
pub const PHOTO_SPACING: u32 = 20;
/// Space reserved below the photos for the watermark footer, in pixels.
pub const BOTTOM_TEXT_SPACE: u32 = 30;

/// How a layout arranges its photos on the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GridKind {
    /// Single column, one photo per row.
    #[serde(rename = "vertical-strip")]
    VerticalStrip,
    /// Fixed 2 columns by 3 rows; always six photos.
    #[serde(rename = "grid-2x3")]
    Grid2x3,
}

impl GridKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GridKind::VerticalStrip => "vertical-strip",
            GridKind::Grid2x3 => "grid-2x3",
        }
    }
}

impl FromStr for GridKind {
    type Err = BoothError;

    fn from_str(s: &str) -> BoothResult<Self> {
        match s {
            "vertical-strip" => Ok(GridKind::VerticalStrip),
            "grid-2x3" => Ok(GridKind::Grid2x3),
            other => Err(BoothError::unsupported_layout(other)),
        }
    }
}

/// A named arrangement pattern: how many photos it expects and how they are
/// placed. Selected once per session from [`registry`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    pub name: String,
    pub poses: usize,
    pub grid: GridKind,
}

impl Layout {
    pub fn new(name: impl Into<String>, poses: usize, grid: GridKind) -> Self {
        Self {
            name: name.into(),
            poses,
            grid,
        }
    }

    pub fn validate(&self) -> BoothResult<()> {
        if self.poses == 0 {
            return Err(BoothError::Other(anyhow::anyhow!(
                "layout '{}' must expect at least one pose",
                self.name
            )));
        }
        if self.grid == GridKind::Grid2x3 && self.poses != 6 {
            return Err(BoothError::Other(anyhow::anyhow!(
                "layout '{}' uses grid-2x3 and must expect exactly 6 poses, got {}",
                self.name,
                self.poses
            )));
        }
        Ok(())
    }

    /// Output surface dimensions for photos of `photo_w` x `photo_h`.
    pub fn surface_size(&self, photo_w: u32, photo_h: u32) -> (u32, u32) {
        match self.grid {
            GridKind::VerticalStrip => {
                let poses = self.poses as u32;
                let photos_h = poses * photo_h + (poses - 1) * PHOTO_SPACING;
                (
                    photo_w + 2 * PADDING,
                    photos_h + 2 * PADDING + BOTTOM_TEXT_SPACE,
                )
            }
            GridKind::Grid2x3 => (
                2 * photo_w + PHOTO_SPACING + 2 * PADDING,
                3 * photo_h + 2 * PHOTO_SPACING + 2 * PADDING + BOTTOM_TEXT_SPACE,
            ),
        }
    }

    /// Top-left origin of the cell that photo `index` occupies.
    pub fn cell_origin(&self, index: usize, photo_w: u32, photo_h: u32) -> (u32, u32) {
        match self.grid {
            GridKind::VerticalStrip => (
                PADDING,
                PADDING + index as u32 * (photo_h + PHOTO_SPACING),
            ),
            GridKind::Grid2x3 => {
                let col = (index % 2) as u32;
                let row = (index / 2) as u32;
                (
                    PADDING + col * (photo_w + PHOTO_SPACING),
                    PADDING + row * (photo_h + PHOTO_SPACING),
                )
            }
        }
    }
}

/// Entry in the fixed layout registry.
#[derive(Clone, Debug)]
pub struct LayoutEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub poses: usize,
    pub grid: GridKind,
}

impl LayoutEntry {
    pub fn layout(&self) -> Layout {
        Layout::new(self.name, self.poses, self.grid)
    }
}

const REGISTRY: &[LayoutEntry] = &[
    LayoutEntry {
        id: "strip-1",
        name: "Single Shot",
        poses: 1,
        grid: GridKind::VerticalStrip,
    },
    LayoutEntry {
        id: "strip-2",
        name: "Double Strip",
        poses: 2,
        grid: GridKind::VerticalStrip,
    },
    LayoutEntry {
        id: "strip-3",
        name: "Classic Strip",
        poses: 3,
        grid: GridKind::VerticalStrip,
    },
    LayoutEntry {
        id: "strip-4",
        name: "Tall Strip",
        poses: 4,
        grid: GridKind::VerticalStrip,
    },
    LayoutEntry {
        id: "grid-6",
        name: "Six Grid",
        poses: 6,
        grid: GridKind::Grid2x3,
    },
];

/// The fixed layout registry, in display order.
pub fn registry() -> &'static [LayoutEntry] {
    REGISTRY
}

/// Look up a layout by its registry id.
pub fn layout_by_id(id: &str) -> BoothResult<Layout> {
    REGISTRY
        .iter()
        .find(|e| e.id == id)
        .map(LayoutEntry::layout)
        .ok_or_else(|| BoothError::unsupported_layout(id))
}
