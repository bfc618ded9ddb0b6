use autowire_common::type_markers_of;
use marker_macros::primary;
use std::any::TypeId;

#[primary]
#[derive(Debug)]
struct OkScheduler;

fn main() {
    let markers = type_markers_of(TypeId::of::<OkScheduler>());
    assert!(markers.primary);
    assert!(markers.markers.is_empty());
}
