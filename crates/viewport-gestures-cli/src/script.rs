//! Replay scripts: loading, replaying and printing recorded gestures.

use serde::Deserialize;
use std::cell::RefCell;
use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info};
use viewport_gestures::{
    ConfigError, DragAxis, GestureConfig, GestureDetail, GestureEvent, GestureHandlers, GestureKind,
    GestureRecognizer, InputEvent, ParseKindError, ScriptedSource, Size, SurfaceHandle,
};

/// Errors surfaced by the replay tool.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Configuration could not be loaded or is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Script is not valid YAML or has the wrong shape.
    #[error("invalid script: {0}")]
    Script(#[from] serde_yaml_ng::Error),

    /// Unknown gesture kind in a filter.
    #[error(transparent)]
    Kind(#[from] ParseKindError),

    /// Gesture could not be written as JSON.
    #[error("failed to encode gesture: {0}")]
    Output(#[from] serde_json::Error),
}

/// Surface size change applied once replay time reaches `at_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Resize {
    /// Time the new size takes effect
    pub at_ms: u64,
    /// New width
    pub width: f32,
    /// New height
    pub height: f32,
}

/// A recorded input session.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Initial surface size
    pub surface: Size,
    /// Input notifications in delivery order
    pub events: Vec<InputEvent>,
    /// Surface size changes
    #[serde(default)]
    pub resizes: Vec<Resize>,
}

impl Script {
    /// Parse a script from YAML.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ReplayError> {
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        Self::from_yaml_str(&read(path)?)
    }
}

/// Output format for replayed gestures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    /// One human-readable line per gesture
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

fn read(path: &Path) -> Result<String, ReplayError> {
    std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a config file, or the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<GestureConfig, ReplayError> {
    match path {
        Some(path) => {
            let config = GestureConfig::from_yaml_str(&read(path)?)?;
            info!(path = %path.display(), "loaded gesture config");
            Ok(config)
        }
        None => Ok(GestureConfig::default()),
    }
}

/// Parse gesture kind names. An empty list keeps every kind.
pub fn parse_kinds(names: &[String]) -> Result<BTreeSet<GestureKind>, ReplayError> {
    names
        .iter()
        .map(|name| name.trim().parse::<GestureKind>().map_err(ReplayError::from))
        .collect()
}

/// Run a script through a fresh recognizer and collect every emitted gesture.
///
/// Resizes take effect before any notification or timer stamped at or after
/// their `at_ms`. Timers still pending after the last notification are fired.
pub fn replay(script: &Script, config: GestureConfig) -> Vec<GestureEvent> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let handlers = GestureHandlers::new()
        .on_each(&GestureKind::ALL, move |e| sink.borrow_mut().push(e.clone()));

    let surface = SurfaceHandle::new(script.surface);
    let mut recognizer = GestureRecognizer::new(config, handlers, surface.clone());
    let mut source = ScriptedSource::from_events(script.events.iter().cloned());
    recognizer.attach(&mut source);

    let mut resizes = script.resizes.clone();
    resizes.sort_by_key(|r| r.at_ms);
    for resize in resizes {
        source.pump_until(&mut recognizer, resize.at_ms);
        if resize.at_ms > 0 {
            recognizer.advance(resize.at_ms - 1);
        }
        debug!(at_ms = resize.at_ms, width = resize.width, height = resize.height, "resize");
        surface.resize(Size::new(resize.width, resize.height));
    }
    source.pump(&mut recognizer);
    recognizer.advance(u64::MAX);
    recognizer.destroy(&mut source);

    log.take()
}

/// Render one gesture as a text line.
pub fn format_text(event: &GestureEvent) -> String {
    let mut line = format!(
        "{:<9} start=({}, {}) end=({}, {}) surface={}x{}",
        event.kind.as_str(),
        event.start_x,
        event.start_y,
        event.end_x,
        event.end_y,
        event.surface_width,
        event.surface_height,
    );
    match &event.detail {
        Some(GestureDetail::DragX {
            x_offset,
            x_offset_ratio,
            move_direction,
            ..
        }) => {
            let _ = write!(line, " offset={x_offset} ratio={x_offset_ratio}% direction={move_direction}");
        }
        Some(GestureDetail::DragY {
            y_offset,
            y_offset_ratio,
            move_direction,
            ..
        }) => {
            let _ = write!(line, " offset={y_offset} ratio={y_offset_ratio}% direction={move_direction}");
        }
        Some(GestureDetail::Drag {
            x_offset,
            y_offset,
            x_offset_ratio,
            y_offset_ratio,
            move_direction,
            drag_type,
        }) => {
            let axis = match drag_type {
                DragAxis::X => "x",
                DragAxis::Y => "y",
            };
            let _ = write!(
                line,
                " offset=({x_offset}, {y_offset}) ratio=({x_offset_ratio}%, {y_offset_ratio}%) direction={move_direction} type={axis}"
            );
        }
        Some(GestureDetail::Wheel { zoom }) => {
            let _ = write!(line, " zoom={zoom}");
        }
        None => {}
    }
    line
}

/// Render gestures in the requested format, keeping only `only` kinds when non-empty.
pub fn render(
    events: &[GestureEvent],
    only: &BTreeSet<GestureKind>,
    format: Format,
) -> Result<Vec<String>, ReplayError> {
    events
        .iter()
        .filter(|e| only.is_empty() || only.contains(&e.kind))
        .map(|e| match format {
            Format::Text => Ok(format_text(e)),
            Format::Json => Ok(serde_json::to_string(e)?),
        })
        .collect()
}
