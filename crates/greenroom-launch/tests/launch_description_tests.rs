mod common;

use common::*;
use greenroom_launch::{
    Component, build, build_driver_node, build_frame_publishers,
    driver::{DRIVER_NODE_NAME, VESSEL_NAMESPACE},
};
use launch_core::{Remapping, Value, render};
use std::time::Duration;

#[test]
fn test_description_has_driver_then_four_publishers() {
    let descriptor = descriptor();

    assert_eq!(descriptor.len(), 5);

    let kinds: Vec<Option<Component>> = descriptor.iter().map(Component::of).collect();
    assert_eq!(
        kinds,
        [
            Some(Component::GnssDriver),
            Some(Component::StaticTransformPublisher),
            Some(Component::StaticTransformPublisher),
            Some(Component::StaticTransformPublisher),
            Some(Component::StaticTransformPublisher),
        ]
    );
}

#[test]
fn test_frame_publishers_arguments() {
    let publishers = build_frame_publishers();
    assert_eq!(publishers.len(), 4);

    for spec in &publishers {
        let args = spec.arguments();
        assert_eq!(args.len(), 8);
        assert!(args[..6].iter().all(|arg| arg == "0"));
    }

    let pairs = frame_pairs(&descriptor());
    let expected = [
        ("base_link", "imu"),
        ("imu", "gnss"),
        ("imu", "vsm"),
        ("imu", "aux1"),
    ];
    assert_eq!(pairs.len(), expected.len());
    for ((parent, child), (expected_parent, expected_child)) in pairs.iter().zip(expected) {
        assert_eq!(parent, expected_parent);
        assert_eq!(child, expected_child);
    }
}

#[test]
fn test_duplicate_covariance_threshold_resolves_to_last_value() {
    let descriptor = descriptor();
    let driver = driver(&descriptor);

    let parameter_sets: Vec<_> = driver.inline_parameters().collect();
    assert_eq!(parameter_sets.len(), 1);

    let parameters = parameter_sets[0];
    let occurrences = parameters
        .keys()
        .filter(|key| *key == "covariance_threshold")
        .count();
    assert_eq!(occurrences, 1);
    assert_eq!(
        parameters.get("covariance_threshold"),
        Some(&Value::Float(50.0))
    );
}

#[test]
fn test_driver_remappings_in_order() {
    let descriptor = descriptor();
    let driver = driver(&descriptor);

    assert_eq!(
        driver.remappings(),
        [
            Remapping::new("/diagnostics", "gama/diagnostics"),
            Remapping::new("geopose", "geopose"),
            Remapping::new("twist_flu", "twist"),
        ]
    );
}

#[test]
fn test_driver_process_surface() {
    let driver = build_driver_node();

    assert_eq!(driver.name(), Some(DRIVER_NODE_NAME));
    assert_eq!(driver.namespace(), Some(VESSEL_NAMESPACE));
    assert_eq!(driver.fully_qualified_namespace().as_deref(), Some("/vessel_1"));
    assert_eq!(
        driver.ros_arguments(),
        ["--log-level", "info", "--log-level", "rcl:=warn"]
    );
    assert!(driver.emulate_tty());
    assert_eq!(
        driver.sigterm_timeout().unwrap(),
        Some(Duration::from_secs(20))
    );
}

#[test]
fn test_driver_nested_parameters() {
    let driver = build_driver_node();
    let parameters = driver.inline_parameters().next().unwrap();

    let lever_arms = ["poi_lever_arm", "ant_lever_arm", "vsm_lever_arm"];
    for arm in lever_arms {
        let mapping = parameters
            .lookup(&["ins_spatial_config", arm])
            .and_then(Value::as_mapping)
            .unwrap();
        assert_eq!(mapping.len(), 3, "{arm} should have three components");
    }

    let transports = parameters
        .lookup(&["ins_vsm"])
        .and_then(Value::as_mapping)
        .unwrap();
    assert_eq!(
        transports.keys().collect::<Vec<_>>(),
        ["ros", "ip_server", "serial"]
    );
    assert_eq!(
        parameters
            .lookup(&["ins_vsm", "ros", "config"])
            .and_then(Value::as_sequence)
            .map(<[Value]>::len),
        Some(3)
    );
    assert_eq!(
        parameters
            .lookup(&["publish", "diagnostics"])
            .and_then(Value::as_bool),
        Some(true)
    );
}

#[test]
fn test_build_is_idempotent() {
    let first = build().unwrap();
    let second = build().unwrap();

    assert_eq!(first, second);
    assert_eq!(first.to_yaml().unwrap(), second.to_yaml().unwrap());
}

#[test]
fn test_driver_command_line() {
    let descriptor = descriptor();
    let driver = driver(&descriptor);
    let dir = tempfile::tempdir().unwrap();

    let files = render::write_parameter_files(driver, dir.path(), "driver").unwrap();
    assert_eq!(files.len(), 1);

    let argv = render::command_line(driver, &files);
    let expected_params = files[0].display().to_string();
    assert_eq!(
        argv,
        [
            "ros2",
            "run",
            "septentrio_gnss_driver",
            "septentrio_gnss_driver_node",
            "--ros-args",
            "--log-level",
            "info",
            "--log-level",
            "rcl:=warn",
            "-r",
            "__node:=septentrio_ins",
            "-r",
            "__ns:=/vessel_1",
            "--params-file",
            expected_params.as_str(),
            "-r",
            "/diagnostics:=gama/diagnostics",
            "-r",
            "geopose:=geopose",
            "-r",
            "twist_flu:=twist",
        ]
    );
}

#[test]
fn test_driver_parameter_file_is_flat() {
    let yaml = render::parameter_file_yaml(build_driver_node().inline_parameters().next().unwrap())
        .unwrap();
    let document: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let parameters = &document[render::WILDCARD_NODE][render::ROS_PARAMETERS_KEY];

    assert_eq!(parameters["att_offset.heading"].as_f64(), Some(90.0));
    assert_eq!(
        parameters["ins_spatial_config.poi_lever_arm.delta_y"].as_f64(),
        Some(0.83)
    );
    assert_eq!(parameters["polling_period.pvt"].as_i64(), Some(100));
    assert_eq!(parameters["ins_vsm.serial.baud_rate"].as_i64(), Some(115200));
    assert_eq!(parameters["covariance_threshold"].as_f64(), Some(50.0));
    assert_eq!(parameters["ins_vsm.ros.source"].as_str(), Some(""));

    // Typed parameters: floats stay floats, integers stay integers
    for float_key in [
        "att_offset.heading",
        "ins_spatial_config.poi_lever_arm.delta_y",
        "covariance_threshold",
        "ins_std_dev_mask.pos_std_dev",
    ] {
        assert_eq!(parameters[float_key].as_i64(), None, "{float_key} must be a float");
    }
    assert!(yaml.contains("att_offset.heading: 90.0\n"));
    assert!(yaml.contains("covariance_threshold: 50.0\n"));
    assert!(yaml.contains("polling_period.pvt: 100\n"));
}

#[test]
fn test_transform_command_line() {
    let publisher = &build_frame_publishers()[1];
    let argv = render::command_line(publisher, &[]);

    assert_eq!(
        render::shell_line(&argv),
        "ros2 run tf2_ros static_transform_publisher 0 0 0 0 0 0 imu gnss"
    );
}
