use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::io::WriteFormat;
use crate::tile::Rules;
use crate::transform::Window;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub format: WriteFormat,
    #[serde(default)]
    pub rules: Rules,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// One transform, applied in configuration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Rotate {
        origin: (f64, f64),
        angle: f64,
    },
    Translate {
        #[serde(default)]
        x_offset: f64,
        #[serde(default)]
        y_offset: f64,
    },
    SpaceVertical {
        space: f64,
        pdn_pitch: f64,
        #[serde(default = "default_true")]
        start_bot: bool,
    },
    SpaceHorizontal {
        space: f64,
        #[serde(default = "default_true")]
        start_left: bool,
        window: Option<Window>,
    },
}

fn default_true() -> bool {
    true
}

impl Step {
    pub fn desc(&self) -> String {
        match self {
            Step::Rotate { origin, angle } => {
                format!("Rotate by {angle} deg about ({}, {})", origin.0, origin.1)
            }
            Step::Translate { x_offset, y_offset } => format!("Move by ({x_offset}, {y_offset})"),
            Step::SpaceVertical { space, .. } => format!("Space rows by {space}"),
            Step::SpaceHorizontal { space, window, .. } => match window {
                Some(w) => format!("Space columns X{}..X{} by {space}", w.start, w.stop),
                None => format!("Space columns by {space}"),
            },
        }
    }

    /// Every numeric parameter of this step.
    pub(crate) fn numbers(&self) -> Vec<f64> {
        match *self {
            Step::Rotate { origin, angle } => vec![origin.0, origin.1, angle],
            Step::Translate { x_offset, y_offset } => vec![x_offset, y_offset],
            Step::SpaceVertical {
                space, pdn_pitch, ..
            } => vec![space, pdn_pitch],
            Step::SpaceHorizontal { space, .. } => vec![space],
        }
    }
}

pub fn parse_pipeline_config(path: impl AsRef<Path>) -> Result<PipelineConfig> {
    let contents = fs::read_to_string(path)?;
    let data = toml::from_str(&contents)?;
    Ok(data)
}
