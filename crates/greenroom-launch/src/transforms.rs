//! Static transform publishers tying the sensor frames to the vehicle.

use launch_core::ProcessSpec;

pub const TF_PACKAGE: &str = "tf2_ros";
pub const TF_EXECUTABLE: &str = "static_transform_publisher";

/// Parent and child frame of every published transform, in launch order.
pub const FRAME_PAIRS: [(&str, &str); 4] = [
    ("base_link", "imu"),
    ("imu", "gnss"),
    ("imu", "vsm"),
    ("imu", "aux1"),
];

/// A fixed transform between two frames.
#[derive(Debug, Clone, PartialEq)]
pub struct StaticTransform {
    /// x, y, z offset in meters.
    pub translation: [f64; 3],
    /// yaw, pitch, roll in radians.
    pub rotation: [f64; 3],
    pub parent_frame: String,
    pub child_frame: String,
}

impl StaticTransform {
    /// Transform with no offset and no rotation.
    pub fn identity(parent_frame: impl Into<String>, child_frame: impl Into<String>) -> Self {
        Self {
            translation: [0.0; 3],
            rotation: [0.0; 3],
            parent_frame: parent_frame.into(),
            child_frame: child_frame.into(),
        }
    }

    /// The eight positional arguments of the publisher:
    /// `x y z yaw pitch roll parent child`.
    pub fn arguments(&self) -> Vec<String> {
        self.translation
            .iter()
            .chain(&self.rotation)
            .map(f64::to_string)
            .chain([self.parent_frame.clone(), self.child_frame.clone()])
            .collect()
    }

    pub fn to_process_spec(&self) -> ProcessSpec {
        ProcessSpec::builder(TF_PACKAGE, TF_EXECUTABLE)
            .arguments(self.arguments())
            .build()
    }
}

/// Describe one publisher per entry of [FRAME_PAIRS].
pub fn build_frame_publishers() -> Vec<ProcessSpec> {
    FRAME_PAIRS
        .iter()
        .map(|(parent, child)| StaticTransform::identity(*parent, *child).to_process_spec())
        .collect()
}
