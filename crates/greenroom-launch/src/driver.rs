//! The GNSS/INS driver node.

use launch_core::{Mapping, ProcessSpec};
use std::time::Duration;

pub const DRIVER_PACKAGE: &str = "septentrio_gnss_driver";
pub const DRIVER_EXECUTABLE: &str = "septentrio_gnss_driver_node";
pub const DRIVER_NODE_NAME: &str = "septentrio_ins";
pub const VESSEL_NAMESPACE: &str = "vessel_1";

/// Grace period the launcher allows the driver to close the receiver
/// connection on shutdown.
pub const DRIVER_SIGTERM_TIMEOUT: Duration = Duration::from_secs(20);

/// Describe the GNSS/INS driver process.
pub fn build_driver_node() -> ProcessSpec {
    ProcessSpec::builder(DRIVER_PACKAGE, DRIVER_EXECUTABLE)
        .name(DRIVER_NODE_NAME)
        .namespace(VESSEL_NAMESPACE)
        .emulate_tty(true)
        .sigterm_timeout(DRIVER_SIGTERM_TIMEOUT)
        .parameters(driver_parameters())
        .remap("/diagnostics", "gama/diagnostics")
        .remap("geopose", "geopose")
        .remap("twist_flu", "twist")
        .log_level("info")
        .log_level("rcl:=warn")
        .build()
}

/// Parameters of the driver node, as handed to the receiver configuration.
///
/// `covariance_threshold` is assigned twice; the second assignment is the
/// one that takes effect.
pub fn driver_parameters() -> Mapping {
    Mapping::new()
        .with("covariance_threshold", 50.0)
        .with("device", "tcp://10.27.1.102:28784")
        .with("configure_rx", true)
        .with("keep_open", true)
        .with("frame_id", "septentrio_gnss")
        .with("imu_frame_id", "imu")
        .with("poi_frame_id", "base_link")
        .with("vsm_frame_id", "vsm")
        .with("aux1_frame_id", "aux1")
        .with("vehicle_frame_id", "base_link")
        .with("local_frame_id", "odom")
        .with("insert_local_frame", true)
        .with("lock_utm_zone", true)
        .with("use_ros_axis_orientation", true)
        .with("receiver_type", "ins")
        .with("multi_antenna", true)
        .with("datum", "Default")
        .with(
            "att_offset",
            Mapping::new().with("heading", 90.0).with("pitch", 0.0),
        )
        .with("polling_period.pvt", 100)
        .with("gnss_error_level", 1)
        .with("gnss_warn_level", 4)
        .with("covariance_threshold", 50.0)
        .with(
            "publish",
            Mapping::new()
                .with("geopose_stamped", true)
                .with("twist_flu_stamped", true)
                .with("diagnostics", true),
        )
        .with("ins_spatial_config", spatial_config())
        .with("ins_initial_heading", "auto")
        .with(
            "ins_std_dev_mask",
            Mapping::new()
                .with("att_std_dev", 5.0)
                .with("pos_std_dev", 10.0),
        )
        .with("ins_use_poi", false)
        .with("ins_vsm", velocity_sensor_config())
        .with("activate_debug_log", false)
}

/// IMU orientation and the lever arms between the IMU and the point of
/// interest, the antenna and the velocity sensor.
fn spatial_config() -> Mapping {
    Mapping::new()
        .with(
            "imu_orientation",
            Mapping::new()
                .with("theta_x", 0.0)
                .with("theta_y", 0.0)
                .with("theta_z", 0.0),
        )
        .with(
            "poi_lever_arm",
            Mapping::new()
                .with("delta_x", 0.0)
                .with("delta_y", 0.83)
                .with("delta_z", 0.0),
        )
        .with(
            "ant_lever_arm",
            Mapping::new().with("x", 0.0).with("y", -0.5).with("z", 0.0),
        )
        .with(
            "vsm_lever_arm",
            Mapping::new()
                .with("vsm_x", 0.0)
                .with("vsm_y", 0.0)
                .with("vsm_z", 0.0),
        )
}

/// Velocity sensor measurement input. Each transport is configured but
/// left without a source.
fn velocity_sensor_config() -> Mapping {
    Mapping::new()
        .with(
            "ros",
            Mapping::new()
                .with("source", "")
                .with("config", [false, false, false])
                .with("variances_by_parameter", false)
                .with("variances", [0.0, 0.0, 0.0]),
        )
        .with(
            "ip_server",
            Mapping::new()
                .with("id", "")
                .with("port", 0)
                .with("keep_open", true),
        )
        .with(
            "serial",
            Mapping::new()
                .with("port", "")
                .with("baud_rate", 115200)
                .with("keep_open", true),
        )
}
