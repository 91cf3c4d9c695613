//! Behavior-driven tests for the line and treemap renderers.

use sectorscope_core::{LineViewConfig, RawRecord, TreemapViewConfig, XScale};
use sectorscope_render::{Element, Scene};
use sectorscope_tests::{sector_records, two_company_records, Pipeline};

fn rects(scene: &Scene) -> Vec<(f64, f64, f64, f64)> {
    fn collect(elements: &[Element], dx: f64, dy: f64, out: &mut Vec<(f64, f64, f64, f64)>) {
        for element in elements {
            match element {
                Element::Group { x, y, children } => collect(children, dx + x, dy + y, out),
                Element::Rect {
                    x,
                    y,
                    width,
                    height,
                    ..
                } => out.push((dx + x, dy + y, *width, *height)),
                _ => {}
            }
        }
    }

    let mut out = Vec::new();
    collect(&scene.elements, 0.0, 0.0, &mut out);
    out
}

// =============================================================================
// Line view
// =============================================================================

#[test]
fn line_svg_has_one_path_per_selected_company() {
    // Given: a sector larger than the line window
    let output = Pipeline::default().run_records(&sector_records(8, 4));

    // When: the line view is rendered to SVG
    let svg = sectorscope_render::line(&output.line, &LineViewConfig::default()).to_svg();

    // Then: five series are drawn and each is named in the legend
    assert_eq!(svg.matches("<path").count(), 5);
    for name in output.line.names() {
        assert!(svg.contains(&format!(">{name}</text>")), "legend entry for {name}");
    }
}

#[test]
fn line_markers_carry_hover_details() {
    // Given: the two-company dataset
    let output = Pipeline::default().run_records(&two_company_records());

    // When: the line view is rendered with tooltips
    let scene = sectorscope_render::line(&output.line, &LineViewConfig::default());

    // Then: each point has a marker whose title describes it
    let titles: Vec<&str> = scene
        .walk()
        .into_iter()
        .filter_map(|element| match element {
            Element::Circle { title, .. } => title.as_deref(),
            _ => None,
        })
        .collect();
    assert_eq!(titles.len(), 3);
    assert!(titles
        .iter()
        .any(|t| t.contains("A") && t.contains("2024-01-02") && t.contains("110.00%")));
}

#[test]
fn huge_price_moves_render_a_bounded_axis() {
    // Given: a company whose close grows by sixteen orders of magnitude
    let records = vec![
        RawRecord::new("Moonshot", "2024-01-01", 0.0001, Some(1.0e9)),
        RawRecord::new("Moonshot", "2024-01-02", 1.0e12, Some(1.0e9)),
    ];
    let output = Pipeline::default().run_records(&records);

    // When: the line view is rendered
    let scene = sectorscope_render::line(&output.line, &LineViewConfig::default());

    // Then: the y axis stays readable and the series is still drawn
    let labels = scene
        .walk()
        .into_iter()
        .filter(|element| {
            matches!(element, Element::Text { content, .. } if content.ends_with('%'))
        })
        .count();
    assert!(labels > 0 && labels <= 13, "{labels} axis labels");
    assert_eq!(scene.to_svg().matches("<path").count(), 1);
}

#[test]
fn point_scale_renders_the_same_series() {
    // Given: the point x scale
    let output = Pipeline::default().run_records(&sector_records(3, 3));
    let config = LineViewConfig {
        x_scale: XScale::Point,
        ..LineViewConfig::default()
    };

    // When: the line view is rendered
    let svg = sectorscope_render::line(&output.line, &config).to_svg();

    // Then: every company still gets a path
    assert_eq!(svg.matches("<path").count(), 3);
}

#[test]
fn empty_selection_renders_an_empty_canvas() {
    // Given: no records
    let output = Pipeline::default().run_records(&[]);

    // When: both views are rendered
    let line = sectorscope_render::line(&output.line, &LineViewConfig::default());
    let treemap = sectorscope_render::treemap(&output.treemap, &TreemapViewConfig::default());

    // Then: the canvases are sized but blank
    assert!(line.is_empty());
    assert_eq!((line.width, line.height), (1200.0, 400.0));
    assert!(treemap.is_empty());
    assert!(!treemap.to_svg().contains("<rect"));
}

// =============================================================================
// Treemap view
// =============================================================================

#[test]
fn treemap_tiles_are_proportional_and_inside_the_canvas() {
    // Given: ten companies with caps 100..1000
    let output = Pipeline::default().run_records(&sector_records(10, 2));
    let config = TreemapViewConfig {
        padding: 0.0,
        ..TreemapViewConfig::default()
    };

    // When: the treemap is rendered without padding
    let scene = sectorscope_render::treemap(&output.treemap, &config);
    let tiles = rects(&scene);

    // Then: tile areas follow weights and stay within the plot
    assert_eq!(tiles.len(), 10);
    let canvas = config.width * config.height;
    let total = output.treemap.total_weight();
    for (tile, node) in tiles.iter().zip(&output.treemap.nodes) {
        let (x, y, w, h) = *tile;
        let expected = canvas * node.weight / total;
        assert!((w * h - expected).abs() < 1e-6 * canvas, "{} area", node.name);
        assert!(x >= 10.0 - 1e-9 && y >= 10.0 - 1e-9);
        assert!(x + w <= 10.0 + config.width + 1e-6);
        assert!(y + h <= 10.0 + config.height + 1e-6);
    }
}

#[test]
fn treemap_labels_show_name_and_change() {
    // Given: the two-company dataset (A gains 10%, B is flat)
    let output = Pipeline::default().run_records(&two_company_records());

    // When: the treemap is rendered
    let svg = sectorscope_render::treemap(&output.treemap, &TreemapViewConfig::default()).to_svg();

    // Then: both labels and the cap tooltip are present
    assert!(svg.contains(">A</text>"));
    assert!(svg.contains(">10.00%</text>"));
    assert!(svg.contains(">0.00%</text>"));
    assert!(svg.contains("market cap: 0.00 x 1e8"));
}

#[test]
fn scenes_serialize_as_tagged_json() {
    // Given: a rendered treemap
    let output = Pipeline::default().run_records(&two_company_records());
    let scene = sectorscope_render::treemap(&output.treemap, &TreemapViewConfig::default());

    // When: it is serialized
    let value = serde_json::to_value(&scene).expect("serializable");

    // Then: elements are tagged by kind
    assert_eq!(value["width"], 1220.0);
    assert_eq!(value["elements"][0]["kind"], "group");
    assert_eq!(value["elements"][0]["children"][0]["children"][0]["kind"], "rect");
}
