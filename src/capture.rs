use std::path::Path;

use anyhow::Context as _;
use base64::Engine as Base64Engine;

use crate::color::DEFAULT_BACKGROUND_COLORS;
use crate::error::{BoothError, BoothResult};

/// One encoded still image captured from the camera. Immutable once captured;
/// held in order for the duration of a session. Serializes its bytes as
/// base64, the same shape they arrive in from the webcam.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct CapturedPhoto {
    #[serde(with = "b64_bytes")]
    bytes: Vec<u8>,
}

mod b64_bytes {
    use base64::Engine as _;
    use serde::{Deserialize as _, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(d)?;
        base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(serde::de::Error::custom)
    }
}

impl CapturedPhoto {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Accept a `data:image/...;base64,` URL, the form webcam screenshots
    /// arrive in.
    pub fn from_data_url(url: &str) -> BoothResult<Self> {
        let payload = url
            .strip_prefix("data:")
            .and_then(|rest| rest.split_once(";base64,"))
            .map(|(_, b64)| b64)
            .ok_or_else(|| {
                BoothError::Other(anyhow::anyhow!("not a base64 data URL"))
            })?;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(payload)
            .context("decode base64 photo payload")?;
        Ok(Self { bytes })
    }

    pub fn from_path(path: impl AsRef<Path>) -> BoothResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read photo '{}'", path.display()))?;
        Ok(Self { bytes })
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// What a sequencer tick produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to do; the sequencer is idle.
    Idle,
    /// Countdown still running; shows the remaining seconds.
    Counting(u8),
    /// The countdown hit zero: capture exactly one frame now.
    Capture,
}

/// Countdown capture sequencer: `Idle -> Counting(3) -> Counting(2) ->
/// Counting(1) -> Capturing -> Idle`, driven by a one-second tick owned by the
/// caller. A running countdown cannot be aborted; `start` during a countdown is
/// ignored, matching the capture button being disabled until the sequencer
/// returns to idle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SequencerState {
    Idle,
    Counting(u8),
    Capturing,
}

#[derive(Clone, Debug)]
pub struct CaptureSequencer {
    state: SequencerState,
    countdown_from: u8,
}

impl CaptureSequencer {
    pub fn new() -> Self {
        Self::with_countdown(3)
    }

    pub fn with_countdown(seconds: u8) -> Self {
        Self {
            state: SequencerState::Idle,
            countdown_from: seconds.max(1),
        }
    }

    pub fn state(&self) -> SequencerState {
        self.state
    }

    /// Begin the countdown. Only honored from `Idle`.
    pub fn start(&mut self) -> bool {
        if self.state != SequencerState::Idle {
            return false;
        }
        self.state = SequencerState::Counting(self.countdown_from);
        true
    }

    /// Advance one second. Returns `Capture` exactly once per started
    /// countdown; the caller grabs the frame and acknowledges with
    /// [`CaptureSequencer::capture_complete`].
    pub fn tick(&mut self) -> TickOutcome {
        match self.state {
            SequencerState::Idle | SequencerState::Capturing => TickOutcome::Idle,
            SequencerState::Counting(1) => {
                self.state = SequencerState::Capturing;
                TickOutcome::Capture
            }
            SequencerState::Counting(n) => {
                self.state = SequencerState::Counting(n - 1);
                TickOutcome::Counting(n - 1)
            }
        }
    }

    /// The frame has been grabbed; return to idle so the capture button
    /// re-enables.
    pub fn capture_complete(&mut self) {
        if self.state == SequencerState::Capturing {
            self.state = SequencerState::Idle;
        }
    }
}

impl Default for CaptureSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// One photobooth session on the edit screen: the ordered captures, the chosen
/// layout, and the current background color. Changing the background drops the
/// cached preview; decoded bitmaps are never cached across renders, so the next
/// render re-decodes every photo. Serializable so a session can be stashed and
/// resumed; the preview is derived state and is not carried.
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct Session {
    photos: Vec<CapturedPhoto>,
    layout_id: String,
    background: String,
    #[serde(skip)]
    preview: Option<String>,
}

impl Session {
    pub fn new(layout_id: impl Into<String>) -> Self {
        Self {
            photos: Vec::new(),
            layout_id: layout_id.into(),
            background: DEFAULT_BACKGROUND_COLORS[0].to_string(),
            preview: None,
        }
    }

    pub fn photos(&self) -> &[CapturedPhoto] {
        &self.photos
    }

    pub fn layout_id(&self) -> &str {
        &self.layout_id
    }

    pub fn background(&self) -> &str {
        &self.background
    }

    pub fn push_photo(&mut self, photo: CapturedPhoto) {
        self.photos.push(photo);
        self.preview = None;
    }

    /// Discard all captures and start over.
    pub fn retake(&mut self) {
        self.photos.clear();
        self.preview = None;
    }

    /// Re-selecting the background invalidates the rendered preview; the next
    /// render starts from the encoded photos again.
    pub fn set_background(&mut self, color: impl Into<String>) {
        self.background = color.into();
        self.preview = None;
    }

    pub fn set_layout(&mut self, layout_id: impl Into<String>) {
        self.layout_id = layout_id.into();
        self.preview = None;
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn set_preview(&mut self, data_url: String) {
        self.preview = Some(data_url);
    }
}
