use std::{fs, path::Path};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    schedule::{
        curve::{sort_by_time, validate},
        Breakpoint,
    },
};

/// On-disk session description.
///
/// ```yaml
/// frequency_changes:
///   - time: 0
///     frequency: 300
///     beat_frequency: 10
///     pink_noise_on: true
///     pink_noise_volume: 0.4
///     tone_volume: 0.1
///   - time: 600
///     frequency: 150
///     beat_frequency: 6
///     tone_volume: 0.15
/// ```
///
/// Every key except `time` may be omitted and defaults to zero / off.
/// Breakpoints are kept sorted by time after loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionFile {
    pub frequency_changes: Vec<Breakpoint>,
}

impl SessionFile {
    /// Validate and sort `breakpoints` into a session.
    pub fn new(mut breakpoints: Vec<Breakpoint>) -> Result<Self> {
        validate(&breakpoints)?;
        sort_by_time(&mut breakpoints);
        Ok(Self {
            frequency_changes: breakpoints,
        })
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self> {
        let raw: SessionFile = serde_yml::from_str(contents)?;
        Self::new(raw.frequency_changes)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("loading session from {:?}", path);

        let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let session = Self::from_yaml_str(&contents)?;

        debug!(
            "loaded {} breakpoints from {:?}",
            session.frequency_changes.len(),
            path
        );
        Ok(session)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yml::to_string(self)?)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = self.to_yaml_string()?;
        fs::write(path, yaml).map_err(|e| Error::io(path, e))
    }

    pub fn breakpoints(&self) -> &[Breakpoint] {
        &self.frequency_changes
    }

    pub fn into_breakpoints(self) -> Vec<Breakpoint> {
        self.frequency_changes
    }
}
