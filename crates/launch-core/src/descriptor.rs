use crate::process::ProcessSpec;
use eyre::{Result, WrapErr};
use serde::Serialize;
use tracing::debug;

/// Ordered collection of [ProcessSpec]s making up one system startup plan.
///
/// The order is for presentation only. The launcher may start the entries
/// in any order or all at once.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct LaunchDescriptor {
    entries: Vec<ProcessSpec>,
}

impl LaunchDescriptor {
    /// Assemble a descriptor, validating every entry.
    ///
    /// Any invalid entry fails the whole descriptor. A partially valid plan
    /// is never returned.
    pub fn new(entries: impl IntoIterator<Item = ProcessSpec>) -> Result<Self> {
        let entries: Vec<ProcessSpec> = entries.into_iter().collect();

        for (index, entry) in entries.iter().enumerate() {
            entry.validate().wrap_err_with(|| {
                format!(
                    "Invalid launch entry {} ({}/{})",
                    index,
                    entry.package(),
                    entry.executable()
                )
            })?;
        }

        debug!(entries = entries.len(), "Launch descriptor assembled");
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[ProcessSpec] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessSpec> {
        self.entries.iter()
    }

    /// Dump the descriptor as a YAML sequence of process specs.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).wrap_err("Failed to serialize launch descriptor")
    }
}

impl IntoIterator for LaunchDescriptor {
    type Item = ProcessSpec;
    type IntoIter = std::vec::IntoIter<ProcessSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a LaunchDescriptor {
    type Item = &'a ProcessSpec;
    type IntoIter = std::slice::Iter<'a, ProcessSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
