//! Boothstrip composites photobooth captures into printable strips and grids.
//!
//! The pipeline is small and deterministic:
//!
//! - Collect [`CapturedPhoto`]s (raw bytes, files, or base64 data URLs)
//! - Pick a [`Layout`] from the fixed [`layout::registry`]
//! - [`render_photos`] decodes the batch in parallel and composites it onto a
//!   solid background with a watermark footer
//! - Export the surface as PNG bytes, a `data:` URL preview, or a saved file

#![forbid(unsafe_code)]

pub mod capture;
pub mod color;
pub mod compose;
pub mod decode;
pub mod error;
pub mod export;
pub mod font;
pub mod layout;

pub use capture::{CaptureSequencer, CapturedPhoto, SequencerState, Session, TickOutcome};
pub use color::{parse_hex_color, DEFAULT_BACKGROUND_COLORS};
pub use compose::{compose_decoded, render_photos, WATERMARK_LABEL};
pub use decode::{decode_batch, decode_photo};
pub use error::{BoothError, BoothResult};
pub use export::{encode_png, preview_data_url, save_png, timestamped_filename, DEFAULT_FILENAME};
pub use layout::{layout_by_id, GridKind, Layout, LayoutEntry};
