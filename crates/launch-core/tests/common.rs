use launch_core::{Mapping, ProcessSpec};
use std::time::Duration;

/// A named, namespaced node with nested parameters, remappings and log
/// levels, exercising every part of a spec.
pub fn sample_node() -> ProcessSpec {
    ProcessSpec::builder("sensor_driver", "sensor_driver_node")
        .name("front_sensor")
        .namespace("robot_1")
        .emulate_tty(true)
        .sigterm_timeout(Duration::from_secs(5))
        .parameters(sample_parameters())
        .remap("/diagnostics", "robot/diagnostics")
        .remap("scan", "front/scan")
        .log_level("debug")
        .build()
}

pub fn sample_parameters() -> Mapping {
    Mapping::new()
        .with("device", "serial:///dev/ttyUSB0")
        .with("rate", 20)
        .with("mount", Mapping::new().with("x", 0.25).with("y", -0.1))
        .with("polling_period.scan", 100)
        .with("enabled_channels", [true, false, true])
}

/// A node without name, namespace or parameters.
pub fn bare_node(executable: &str) -> ProcessSpec {
    ProcessSpec::builder("utils", executable)
        .arguments(["one", "two"])
        .build()
}

#[allow(dead_code)]
pub fn argv_tail(argv: &[String]) -> &[String] {
    let start = argv
        .iter()
        .position(|token| token == "--ros-args")
        .map(|position| position + 1)
        .unwrap_or(argv.len());
    &argv[start..]
}
