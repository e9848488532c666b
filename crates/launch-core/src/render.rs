//! Rendering of process specs into what the launcher consumes: parameter
//! files and command lines.

use crate::{
    descriptor::LaunchDescriptor,
    process::{ParameterSet, ProcessSpec},
    value::{Mapping, Value},
};
use eyre::{Result, WrapErr, ensure};
use itertools::Itertools;
use std::{
    borrow::Cow,
    fs,
    path::{Path, PathBuf},
};
use tracing::debug;

/// Node selector matching every node in a parameter file.
pub const WILDCARD_NODE: &str = "/**";

/// Key holding the parameters of a node in a parameter file.
pub const ROS_PARAMETERS_KEY: &str = "ros__parameters";

/// Flatten nested mappings into dotted parameter names.
///
/// `{"att_offset": {"heading": 90.0}}` becomes `{"att_offset.heading": 90.0}`.
/// Keys that already contain dots pass through unchanged. When two paths
/// flatten to the same name, the later one wins.
pub fn flatten_parameters(mapping: &Mapping) -> Mapping {
    let mut flat = Mapping::new();
    flatten_into(&mut flat, None, mapping);
    flat
}

fn flatten_into(flat: &mut Mapping, prefix: Option<&str>, mapping: &Mapping) {
    for (key, value) in mapping {
        let name = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };

        match value {
            Value::Mapping(inner) => flatten_into(flat, Some(&name), inner),
            scalar_or_sequence => {
                flat.insert(name, scalar_or_sequence.clone());
            }
        }
    }
}

/// Render a parameter file applying `mapping` to every node.
pub fn parameter_file_yaml(mapping: &Mapping) -> Result<String> {
    let document = Mapping::new().with(
        WILDCARD_NODE,
        Mapping::new().with(ROS_PARAMETERS_KEY, flatten_parameters(mapping)),
    );

    serde_yaml::to_string(&document).wrap_err("Failed to serialize parameter file")
}

/// Write one parameter file per inline parameter set of `spec` into `dir`,
/// named `<stem>_<index>.yaml`.
///
/// Returns the files to pass to the process in order, with file parameter
/// sets passed through unchanged.
pub fn write_parameter_files(
    spec: &ProcessSpec,
    dir: impl AsRef<Path>,
    stem: &str,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();

    ensure!(
        !stem.is_empty() && !stem.contains(['/', '\\']) && stem != "..",
        "Invalid parameter file stem '{}'",
        stem
    );

    if spec.inline_parameters().next().is_some() {
        fs::create_dir_all(dir)
            .wrap_err_with(|| format!("Failed to create directory: {}", dir.display()))?;
    }

    spec.parameters()
        .iter()
        .enumerate()
        .map(|(index, set)| -> Result<PathBuf> {
            match set {
                ParameterSet::File(path) => Ok(path.clone()),
                ParameterSet::Inline(mapping) => {
                    let path = dir.join(format!("{stem}_{index}.yaml"));
                    let contents = parameter_file_yaml(mapping)?;
                    fs::write(&path, contents).wrap_err_with(|| {
                        format!("Failed to write parameter file: {}", path.display())
                    })?;

                    debug!(
                        path = %path.display(),
                        node = spec.display_name(),
                        "Wrote parameter file"
                    );
                    Ok(path)
                }
            }
        })
        .collect()
}

/// Write the parameter files of every entry in `descriptor`.
///
/// The result is indexed like the descriptor's entries.
pub fn write_all_parameter_files(
    descriptor: &LaunchDescriptor,
    dir: impl AsRef<Path>,
) -> Result<Vec<Vec<PathBuf>>> {
    let dir = dir.as_ref();

    descriptor
        .iter()
        .enumerate()
        .map(|(index, spec)| {
            let stem = format!("{:02}_{}", index, spec.display_name());
            write_parameter_files(spec, dir, &stem)
        })
        .collect()
}

/// Build the argument vector starting `spec`.
///
/// The layout is
/// `ros2 run <package> <executable> [arguments] --ros-args [ros_arguments]
/// [-r __node:=<name>] [-r __ns:=<namespace>] [--params-file <file>]...
/// [-r <from>:=<to>]...`, with `--ros-args` left out when nothing follows.
pub fn command_line(spec: &ProcessSpec, parameter_files: &[PathBuf]) -> Vec<String> {
    let mut argv = vec![
        "ros2".to_string(),
        "run".to_string(),
        spec.package().to_string(),
        spec.executable().to_string(),
    ];
    argv.extend(spec.arguments().iter().cloned());

    let mut ros_args = spec.ros_arguments().to_vec();

    if let Some(name) = spec.name() {
        ros_args.extend(["-r".to_string(), format!("__node:={name}")]);
    }
    if let Some(namespace) = spec.fully_qualified_namespace() {
        ros_args.extend(["-r".to_string(), format!("__ns:={namespace}")]);
    }
    for path in parameter_files {
        ros_args.extend(["--params-file".to_string(), path.display().to_string()]);
    }
    for remapping in spec.remappings() {
        ros_args.extend([
            "-r".to_string(),
            format!("{}:={}", remapping.from, remapping.to),
        ]);
    }

    if !ros_args.is_empty() {
        argv.push("--ros-args".to_string());
        argv.extend(ros_args);
    }

    argv
}

/// Quote `token` for a POSIX shell when it contains anything beyond a
/// conservative set of safe characters.
pub fn shell_quote(token: &str) -> Cow<'_, str> {
    let is_safe = |c: char| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c);

    if !token.is_empty() && token.chars().all(is_safe) {
        Cow::Borrowed(token)
    } else {
        Cow::Owned(format!("'{}'", token.replace('\'', r"'\''")))
    }
}

/// Join an argument vector into one shell-safe line.
pub fn shell_line(argv: &[String]) -> String {
    argv.iter().map(|token| shell_quote(token)).join(" ")
}
