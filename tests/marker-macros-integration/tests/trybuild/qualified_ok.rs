use autowire_common::type_markers_of;
use marker_macros::qualified;
use std::any::TypeId;

#[qualified("primary")]
#[derive(Debug)]
struct OkCache;

fn main() {
    let markers = type_markers_of(TypeId::of::<OkCache>());
    assert_eq!(markers.markers.len(), 1);
    assert!(!markers.primary);
}
