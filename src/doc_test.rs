#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn rect_at(id: &str, x: f64, y: f64) -> Shape {
    Shape::with_defaults(id.to_owned(), "page-1", QuickShape::Rectangle, Point::new(x, y))
}

// =============================================================
// Defaults
// =============================================================

#[test]
fn rectangle_defaults() {
    let s = rect_at("r", 10.0, 20.0);
    assert_eq!(s.page_id, "page-1");
    assert_eq!(
        s.kind,
        ShapeKind::Rectangle { width: 60.0, height: 40.0, color: DEFAULT_FILL.to_owned() }
    );
}

#[test]
fn circle_defaults_to_radius_thirty() {
    let s = Shape::quick(QuickShape::Circle, "p", Point::new(0.0, 0.0));
    assert!(matches!(s.kind, ShapeKind::Circle { radius, .. } if radius == 30.0));
}

#[test]
fn line_and_arrow_default_to_horizontal_eighty() {
    for variant in [QuickShape::Line, QuickShape::Arrow] {
        let s = Shape::quick(variant, "p", Point::new(5.0, 7.0));
        match s.kind {
            ShapeKind::Line { x2, y2 } | ShapeKind::Arrow { x2, y2 } => {
                assert_eq!(x2, 85.0);
                assert_eq!(y2, 7.0);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }
}

#[test]
fn quick_ids_are_unique() {
    let a = Shape::quick(QuickShape::Circle, "p", Point::new(0.0, 0.0));
    let b = Shape::quick(QuickShape::Circle, "p", Point::new(0.0, 0.0));
    assert_ne!(a.id, b.id);
}

#[test]
fn text_uses_default_font() {
    let s = Shape::text("p", Point::new(1.0, 2.0), "hi".into());
    assert_eq!(s.type_name(), "text");
    assert!(matches!(
        s.kind,
        ShapeKind::Text { ref content, font_size, ref font_family }
            if content == "hi" && font_size == 16.0 && font_family == "sans-serif"
    ));
}

#[test]
fn quick_shape_parses_names() {
    assert_eq!("rectangle".parse::<QuickShape>(), Ok(QuickShape::Rectangle));
    assert_eq!("circle".parse::<QuickShape>(), Ok(QuickShape::Circle));
    assert_eq!("arrow".parse::<QuickShape>(), Ok(QuickShape::Arrow));
    assert!("pencil".parse::<QuickShape>().is_err());
}

// =============================================================
// Nominal size
// =============================================================

#[test]
fn nominal_size_prefers_explicit_dimensions() {
    let mut s = rect_at("r", 0.0, 0.0);
    s.kind = ShapeKind::Rectangle { width: 12.0, height: 34.0, color: "red".into() };
    assert_eq!(s.nominal_size(), (12.0, 34.0));
}

#[test]
fn nominal_size_uses_diameter_for_circles() {
    let s = Shape::quick(QuickShape::Circle, "p", Point::new(0.0, 0.0));
    assert_eq!(s.nominal_size(), (60.0, 60.0));
}

#[test]
fn nominal_size_falls_back_to_rect_default() {
    let s = Shape::text("p", Point::new(0.0, 0.0), "x".into());
    assert_eq!(s.nominal_size(), (60.0, 40.0));
    let l = Shape::quick(QuickShape::Line, "p", Point::new(0.0, 0.0));
    assert_eq!(l.nominal_size(), (60.0, 40.0));
}

// =============================================================
// Serde
// =============================================================

#[test]
fn serializes_with_type_tag_and_camel_case() {
    let s = Shape::text("page-9", Point::new(3.0, 4.0), "hello".into());
    let v = serde_json::to_value(&s).unwrap();
    assert_eq!(v["type"], "text");
    assert_eq!(v["pageId"], "page-9");
    assert_eq!(v["fontSize"], 16.0);
    assert_eq!(v["fontFamily"], "sans-serif");
    assert_eq!(v["content"], "hello");
}

#[test]
fn deserializes_pencil_points() {
    let v = json!({
        "id": "p1",
        "pageId": "page",
        "type": "pencil",
        "x": 0.0,
        "y": 0.0,
        "points": [{ "x": 0.0, "y": 0.0 }, { "x": 5.0, "y": 5.0 }]
    });
    let s: Shape = serde_json::from_value(v).unwrap();
    assert!(matches!(s.kind, ShapeKind::Pencil { ref points } if points.len() == 2));
}

#[test]
fn deserialize_fills_missing_rect_fields() {
    let v = json!({ "id": "r", "pageId": "p", "type": "rectangle", "x": 1.0, "y": 2.0 });
    let s: Shape = serde_json::from_value(v).unwrap();
    assert_eq!(s.nominal_size(), (60.0, 40.0));
}

#[test]
fn unknown_type_is_rejected() {
    let v = json!({ "id": "s", "pageId": "p", "type": "star", "x": 0.0, "y": 0.0 });
    assert!(serde_json::from_value::<Shape>(v).is_err());
}

#[test]
fn list_round_trips_through_json() {
    let shapes = vec![
        rect_at("a", 1.0, 2.0),
        Shape::quick(QuickShape::Arrow, "p", Point::new(3.0, 4.0)),
        Shape {
            id: "pen".into(),
            page_id: "p".into(),
            x: 0.0,
            y: 0.0,
            kind: ShapeKind::Pencil { points: vec![Point::new(0.0, 0.0), Point::new(2.5, 1.5)] },
        },
        Shape::text("p", Point::new(9.0, 9.0), "t".into()),
    ];
    let encoded = serde_json::to_string(&shapes).unwrap();
    let decoded: Vec<Shape> = serde_json::from_str(&encoded).unwrap();
    assert_eq!(decoded, shapes);
}

// =============================================================
// DocStore
// =============================================================

#[test]
fn store_preserves_insertion_order() {
    let mut doc = DocStore::new();
    doc.push(rect_at("a", 0.0, 0.0));
    doc.push(rect_at("b", 0.0, 0.0));
    doc.push(rect_at("c", 0.0, 0.0));
    let ids: Vec<&str> = doc.shapes().iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["a", "b", "c"]);
    assert_eq!(doc.len(), 3);
}

#[test]
fn reposition_moves_origin() {
    let mut doc = DocStore::new();
    doc.push(rect_at("a", 100.0, 100.0));
    let moved = doc.reposition("a", 190.0, 145.0).unwrap();
    assert_eq!((moved.x, moved.y), (190.0, 145.0));
}

#[test]
fn reposition_leaves_line_endpoint_alone() {
    let mut doc = DocStore::new();
    doc.push(Shape::with_defaults("l".into(), "p", QuickShape::Line, Point::new(0.0, 0.0)));
    let moved = doc.reposition("l", 10.0, 5.0).unwrap();
    assert_eq!((moved.x, moved.y), (10.0, 5.0));
    assert_eq!(moved.kind, ShapeKind::Line { x2: 80.0, y2: 0.0 });
}

#[test]
fn reposition_leaves_pencil_points_alone() {
    let mut doc = DocStore::new();
    let points = vec![Point::new(1.0, 1.0), Point::new(4.0, 5.0)];
    doc.push(Shape { id: "pen".into(), page_id: "p".into(), x: 1.0, y: 1.0, kind: ShapeKind::Pencil { points: points.clone() } });
    doc.reposition("pen", 11.0, 21.0);
    let pen = doc.get("pen").unwrap();
    assert_eq!((pen.x, pen.y), (11.0, 21.0));
    assert_eq!(pen.kind, ShapeKind::Pencil { points });
}

#[test]
fn reposition_unknown_id_is_none() {
    let mut doc = DocStore::new();
    assert!(doc.reposition("missing", 0.0, 0.0).is_none());
}

#[test]
fn load_snapshot_replaces_contents() {
    let mut doc = DocStore::new();
    doc.push(rect_at("old", 0.0, 0.0));
    doc.load_snapshot(vec![rect_at("new", 1.0, 1.0)]);
    assert!(doc.get("old").is_none());
    assert!(doc.get("new").is_some());
    assert!(!doc.is_empty());
}
