//! Launch specification for a single external process.

use crate::value::Mapping;
use eyre::{Result, WrapErr, ensure};
use indexmap::IndexMap;
use serde::Serialize;
use std::{path::PathBuf, time::Duration};

/// Flag asking the launcher to run the process under a pseudo terminal.
pub const EMULATE_TTY: &str = "emulate_tty";

/// Flag holding the grace period, in seconds, between SIGINT and SIGTERM
/// when the launcher shuts the process down.
pub const SIGTERM_TIMEOUT: &str = "sigterm_timeout";

/// One source of parameters for a process.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSet {
    /// Parameters written out in the launch description.
    Inline(Mapping),
    /// An existing parameter file handed to the process as is.
    File(PathBuf),
}

/// Rename of a communication channel, from the process' internal name to
/// the name used system-wide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Remapping {
    pub from: String,
    pub to: String,
}

impl Remapping {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

impl<A, B> From<(A, B)> for Remapping
where
    A: Into<String>,
    B: Into<String>,
{
    fn from((from, to): (A, B)) -> Self {
        Self::new(from, to)
    }
}

/// Describes one external process to start.
///
/// A spec is created through [ProcessSpec::builder] and is immutable once
/// built. Only the launcher interprets it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessSpec {
    package: String,
    executable: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(
        skip_serializing_if = "Vec::is_empty",
        with = "serde_yaml::with::singleton_map_recursive"
    )]
    parameters: Vec<ParameterSet>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    remappings: Vec<Remapping>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    arguments: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ros_arguments: Vec<String>,
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    extra_flags: IndexMap<String, String>,
}

impl ProcessSpec {
    /// Start describing `executable` from `package`.
    pub fn builder(package: impl Into<String>, executable: impl Into<String>) -> ProcessSpecBuilder {
        ProcessSpecBuilder {
            spec: ProcessSpec {
                package: package.into(),
                executable: executable.into(),
                name: None,
                namespace: None,
                parameters: Vec::new(),
                remappings: Vec::new(),
                arguments: Vec::new(),
                ros_arguments: Vec::new(),
                extra_flags: IndexMap::new(),
            },
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn executable(&self) -> &str {
        &self.executable
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The namespace with a leading slash, as the process will see it.
    pub fn fully_qualified_namespace(&self) -> Option<String> {
        self.namespace.as_deref().map(|namespace| {
            if namespace.starts_with('/') {
                namespace.to_string()
            } else {
                format!("/{namespace}")
            }
        })
    }

    /// Node name if one is set, executable name otherwise.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.executable)
    }

    pub fn parameters(&self) -> &[ParameterSet] {
        &self.parameters
    }

    /// Parameter mappings written out in the description, skipping files.
    pub fn inline_parameters(&self) -> impl Iterator<Item = &Mapping> {
        self.parameters.iter().filter_map(|set| match set {
            ParameterSet::Inline(mapping) => Some(mapping),
            ParameterSet::File(_) => None,
        })
    }

    pub fn remappings(&self) -> &[Remapping] {
        &self.remappings
    }

    /// Positional arguments passed to the executable.
    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    /// Arguments interpreted by the middleware client library rather than
    /// the executable itself.
    pub fn ros_arguments(&self) -> &[String] {
        &self.ros_arguments
    }

    pub fn extra_flags(&self) -> &IndexMap<String, String> {
        &self.extra_flags
    }

    pub fn flag(&self, key: &str) -> Option<&str> {
        self.extra_flags.get(key).map(String::as_str)
    }

    pub fn emulate_tty(&self) -> bool {
        self.flag(EMULATE_TTY) == Some("true")
    }

    /// The shutdown grace period, if one is set.
    pub fn sigterm_timeout(&self) -> Result<Option<Duration>> {
        let Some(raw) = self.flag(SIGTERM_TIMEOUT) else {
            return Ok(None);
        };

        let seconds: f64 = raw
            .parse()
            .wrap_err_with(|| format!("Invalid {SIGTERM_TIMEOUT} '{raw}'"))?;
        let timeout = Duration::try_from_secs_f64(seconds)
            .wrap_err_with(|| format!("Invalid {SIGTERM_TIMEOUT} '{raw}'"))?;

        Ok(Some(timeout))
    }

    /// Check that the spec is well-formed.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.package.is_empty(), "Package name cannot be empty");
        ensure!(
            !self.executable.is_empty(),
            "Executable name cannot be empty (package {})",
            self.package
        );
        ensure!(
            !self.executable.contains(['/', '\\']) && self.executable != "..",
            "Invalid executable name '{}'",
            self.executable
        );

        if let Some(name) = &self.name {
            ensure!(
                !name.is_empty() && !name.contains(['/', '\\']),
                "Invalid node name '{}'",
                name
            );
        }

        if let Some(namespace) = &self.namespace {
            ensure!(
                !namespace.is_empty() && !namespace.contains("//"),
                "Invalid namespace '{}'",
                namespace
            );
        }

        for (i, remapping) in self.remappings.iter().enumerate() {
            ensure!(
                !remapping.from.is_empty() && !remapping.to.is_empty(),
                "Remapping at index {} has an empty name",
                i
            );
        }

        for (i, set) in self.parameters.iter().enumerate() {
            match set {
                ParameterSet::Inline(mapping) => mapping
                    .validate()
                    .wrap_err_with(|| format!("Invalid parameter set at index {i}"))?,
                ParameterSet::File(path) => {
                    ensure!(
                        !path.as_os_str().is_empty(),
                        "Parameter file path at index {} is empty",
                        i
                    );
                }
            }
        }

        self.sigterm_timeout()?;

        Ok(())
    }
}

/// Consuming builder for [ProcessSpec].
#[derive(Debug, Clone)]
pub struct ProcessSpecBuilder {
    spec: ProcessSpec,
}

impl ProcessSpecBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.spec.name = Some(name.into());
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.spec.namespace = Some(namespace.into());
        self
    }

    /// Add an inline parameter set. Sets are applied in the order added.
    pub fn parameters(mut self, parameters: Mapping) -> Self {
        self.spec.parameters.push(ParameterSet::Inline(parameters));
        self
    }

    pub fn parameter_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.spec.parameters.push(ParameterSet::File(path.into()));
        self
    }

    pub fn remap(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.spec.remappings.push(Remapping::new(from, to));
        self
    }

    pub fn argument(mut self, argument: impl Into<String>) -> Self {
        self.spec.arguments.push(argument.into());
        self
    }

    pub fn arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.spec.arguments.extend(arguments.into_iter().map(Into::into));
        self
    }

    pub fn ros_arguments<I>(mut self, arguments: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.spec
            .ros_arguments
            .extend(arguments.into_iter().map(Into::into));
        self
    }

    /// Append a `--log-level <level>` pair. May be repeated, e.g. once for
    /// the default level and once per logger override (`rcl:=warn`).
    pub fn log_level(self, level: impl Into<String>) -> Self {
        self.ros_arguments(["--log-level".to_string(), level.into()])
    }

    pub fn flag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.spec.extra_flags.insert(key.into(), value.into());
        self
    }

    pub fn emulate_tty(self, enabled: bool) -> Self {
        self.flag(EMULATE_TTY, enabled.to_string())
    }

    pub fn sigterm_timeout(self, timeout: Duration) -> Self {
        self.flag(SIGTERM_TIMEOUT, timeout.as_secs_f64().to_string())
    }

    pub fn build(self) -> ProcessSpec {
        self.spec
    }
}
