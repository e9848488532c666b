//! This library describes a set of external processes to launch together,
//! each with its executable, parameters and channel remappings, and renders
//! them into what a ROS 2 style launcher consumes.
//!
//! # Usage
//!
//! ```rust
//! use launch_core::{LaunchDescriptor, Mapping, ProcessSpec, render};
//!
//! # fn main() -> eyre::Result<()> {
//! // Describe a process. Nested mappings become dotted parameter names
//! // when rendered.
//! let talker = ProcessSpec::builder("demo_nodes_cpp", "talker")
//!     .name("talker")
//!     .namespace("demo")
//!     .parameters(
//!         Mapping::new()
//!             .with("rate", 10)
//!             .with("qos", Mapping::new().with("depth", 5)),
//!     )
//!     .remap("chatter", "speech")
//!     .build();
//!
//! // Every entry is validated when the descriptor is assembled.
//! let descriptor = LaunchDescriptor::new([talker])?;
//!
//! let argv = render::command_line(&descriptor.entries()[0], &[]);
//! assert_eq!(
//!     render::shell_line(&argv),
//!     "ros2 run demo_nodes_cpp talker --ros-args -r __node:=talker -r __ns:=/demo -r chatter:=speech"
//! );
//! # Ok(())
//! # }
//! ```

mod descriptor;
pub mod environment;
pub mod process;
pub mod render;
pub mod value;

pub use descriptor::LaunchDescriptor;
pub use environment::configure_process_environment;
pub use process::{ParameterSet, ProcessSpec, ProcessSpecBuilder, Remapping};
pub use value::{Mapping, Value};
