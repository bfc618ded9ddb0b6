//! marker-macros crate 的集中集成测试
//!
//! 标记宏在程序启动时注册类型级标记，测试通过全局注册表验证展开结果。

use autowire_common::{type_markers_of, MetadataMarker, QualifierSpec, QUALIFIER_KIND};
use marker_macros::{primary, qualified};
use std::any::TypeId;

#[qualified("primary")]
#[derive(Debug)]
pub struct RedisCache;

#[primary]
#[derive(Debug)]
pub struct MemoryCache;

#[qualified(kind = "region", value = "east")]
#[derive(Debug)]
pub struct EastGateway;

#[qualified(kind = "tier")]
#[derive(Debug)]
pub struct EdgeNode;

#[qualified(value = "blue")]
#[derive(Debug)]
pub struct BlueTheme;

#[qualified("fast")]
#[primary]
#[derive(Debug)]
pub struct LocalQueue;

#[qualified("resilient")]
#[qualified(kind = "region", value = "north")]
#[derive(Debug)]
pub struct NorthBroker;

#[derive(Debug)]
pub struct PlainService;

#[test]
fn test_qualified_shorthand_registers_named_marker() {
    let markers = type_markers_of(TypeId::of::<RedisCache>());
    assert!(!markers.primary);
    assert_eq!(
        markers.markers,
        vec![MetadataMarker::Qualifier(QualifierSpec::named("primary"))]
    );
}

#[test]
fn test_primary_registers_flag_only() {
    let markers = type_markers_of(TypeId::of::<MemoryCache>());
    assert!(markers.primary);
    assert!(markers.markers.is_empty());
}

#[test]
fn test_qualified_with_kind_and_value() {
    let markers = type_markers_of(TypeId::of::<EastGateway>());
    assert_eq!(
        markers.markers,
        vec![MetadataMarker::Qualifier(
            QualifierSpec::of_kind("region").with_value("east")
        )]
    );
}

#[test]
fn test_qualified_kind_only_is_presence_marker() {
    let markers = type_markers_of(TypeId::of::<EdgeNode>());
    assert_eq!(
        markers.markers,
        vec![MetadataMarker::Qualifier(QualifierSpec::of_kind("tier"))]
    );
}

#[test]
fn test_qualified_value_only_uses_standard_kind() {
    let markers = type_markers_of(TypeId::of::<BlueTheme>());
    match &markers.markers[..] {
        [MetadataMarker::Qualifier(spec)] => {
            assert_eq!(spec.kind, QUALIFIER_KIND);
            assert_eq!(spec.value.as_deref(), Some("blue"));
        }
        other => panic!("意外的标记集合: {:?}", other),
    }
}

#[test]
fn test_stacked_markers_merge() {
    let markers = type_markers_of(TypeId::of::<LocalQueue>());
    assert!(markers.primary);
    assert_eq!(
        markers.markers,
        vec![MetadataMarker::Qualifier(QualifierSpec::named("fast"))]
    );
}

#[test]
fn test_multiple_qualifiers_accumulate() {
    let markers = type_markers_of(TypeId::of::<NorthBroker>());
    assert!(!markers.primary);
    assert_eq!(markers.markers.len(), 2);
    assert!(markers
        .markers
        .contains(&MetadataMarker::Qualifier(QualifierSpec::named("resilient"))));
    assert!(markers.markers.contains(&MetadataMarker::Qualifier(
        QualifierSpec::of_kind("region").with_value("north")
    )));
}

#[test]
fn test_unmarked_type_has_no_markers() {
    let markers = type_markers_of(TypeId::of::<PlainService>());
    assert!(!markers.primary);
    assert!(markers.markers.is_empty());
}
