//! greenroom-launch - Launch description for the vessel GNSS/INS stack.
//!
//! The description starts one GNSS/INS driver node and four static
//! transform publishers relating the IMU, GNSS, velocity sensor and
//! auxiliary antenna frames to the vehicle base:
//!
//! ```text
//! base_link -> imu -> gnss
//!                  -> vsm
//!                  -> aux1
//! ```
//!
//! All data is literal. Nothing here orders the startup of the entries;
//! the launcher may start them in any order or all at once.

pub mod driver;
pub mod transforms;

pub use driver::build_driver_node;
pub use transforms::{StaticTransform, build_frame_publishers};

use driver::{DRIVER_EXECUTABLE, DRIVER_PACKAGE};
use eyre::Result;
use launch_core::{LaunchDescriptor, ProcessSpec, configure_process_environment};
use transforms::{TF_EXECUTABLE, TF_PACKAGE};

/// What a launch entry runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    GnssDriver,
    StaticTransformPublisher,
}

impl Component {
    /// Classify an entry by its package and executable.
    pub fn of(spec: &ProcessSpec) -> Option<Self> {
        match (spec.package(), spec.executable()) {
            (DRIVER_PACKAGE, DRIVER_EXECUTABLE) => Some(Component::GnssDriver),
            (TF_PACKAGE, TF_EXECUTABLE) => Some(Component::StaticTransformPublisher),
            _ => None,
        }
    }
}

/// Build the launch description: the driver node first, then the frame
/// publishers.
///
/// Fails only if the literal data is malformed, in which case no
/// description is produced at all.
pub fn build() -> Result<LaunchDescriptor> {
    let entries = std::iter::once(build_driver_node()).chain(build_frame_publishers());
    LaunchDescriptor::new(entries)
}

/// Configure the process environment, then build the launch description.
pub fn generate_launch_description() -> Result<LaunchDescriptor> {
    configure_process_environment();
    build()
}
