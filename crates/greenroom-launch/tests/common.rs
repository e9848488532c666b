use greenroom_launch::{Component, build};
use launch_core::{LaunchDescriptor, ProcessSpec};

pub fn descriptor() -> LaunchDescriptor {
    build().expect("literal launch description is well-formed")
}

/// The single driver entry of the description.
pub fn driver(descriptor: &LaunchDescriptor) -> &ProcessSpec {
    let drivers: Vec<&ProcessSpec> = descriptor
        .iter()
        .filter(|spec| Component::of(spec) == Some(Component::GnssDriver))
        .collect();
    assert_eq!(drivers.len(), 1, "Expected exactly one driver entry");
    drivers[0]
}

/// (parent, child) frames of every transform publisher, in order.
#[allow(dead_code)]
pub fn frame_pairs(descriptor: &LaunchDescriptor) -> Vec<(String, String)> {
    descriptor
        .iter()
        .filter(|spec| Component::of(spec) == Some(Component::StaticTransformPublisher))
        .map(|spec| {
            let args = spec.arguments();
            (args[6].clone(), args[7].clone())
        })
        .collect()
}
