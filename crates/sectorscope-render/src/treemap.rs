//! Treemap view: tiles sized by market cap, colored by window change.

use log::debug;
use sectorscope_core::{Hierarchy, TreemapViewConfig, WeightedNode};

use crate::color::{DivergingScale, Rgb, UNKNOWN_FILL};
use crate::layout::{self, Tile};
use crate::scene::{Anchor, Element, Scene};
use crate::Margin;

pub const MARGIN: Margin = Margin::uniform(10.0);

const MIN_FONT: f64 = 10.0;
const MAX_FONT: f64 = 20.0;
const MARKET_CAP_UNIT: f64 = 1e8;

/// Render the treemap view of a weighted hierarchy. The canvas is the
/// configured size plus the margin on every side.
pub fn render(hierarchy: &Hierarchy, config: &TreemapViewConfig) -> Scene {
    let (width, height) = MARGIN.outer(config.width, config.height);
    if hierarchy.is_empty() {
        return Scene::empty(width, height);
    }

    let weights: Vec<f64> = hierarchy.nodes.iter().map(|node| node.weight).collect();
    let tiles = layout::treemap(&weights, config.width, config.height, config.padding);
    let scale = DivergingScale::new(hierarchy.domain);
    debug!(
        "treemap view: {} tiles, color domain {:?}",
        tiles.len(),
        hierarchy.domain.as_triple()
    );

    let cells = hierarchy
        .nodes
        .iter()
        .zip(tiles)
        .map(|(node, tile)| cell(node, tile, scale.color(node.change)))
        .collect();

    Scene {
        width,
        height,
        elements: vec![Element::group(MARGIN.left, MARGIN.top, cells)],
    }
}

fn cell(node: &WeightedNode, tile: Tile, fill: Option<Rgb>) -> Element {
    let (w, h) = (tile.width(), tile.height());
    let font_size = (w.min(h) * 0.15).clamp(MIN_FONT, MAX_FONT);
    let text_fill = fill.map_or("#000", Rgb::contrasting_text);

    let rect = Element::Rect {
        x: 0.0,
        y: 0.0,
        width: w,
        height: h,
        fill: fill.map_or_else(|| UNKNOWN_FILL.to_owned(), Rgb::to_hex),
        stroke: Some(String::from("#fff")),
        title: Some(tooltip(node)),
    };

    let label = |dy: f64, content: String| Element::Text {
        x: w / 2.0,
        y: h / 2.0 + dy,
        content,
        font_size,
        fill: text_fill.to_owned(),
        anchor: Anchor::Middle,
    };

    Element::group(
        tile.x0,
        tile.y0,
        vec![
            rect,
            label(-font_size * 0.5, node.name.as_str().to_owned()),
            label(font_size * 0.5, format!("{:.2}%", node.change * 100.0)),
        ],
    )
}

fn tooltip(node: &WeightedNode) -> String {
    format!(
        "{}\nchange: {:.2}%\nmarket cap: {:.2} x 1e8",
        node.name,
        node.change * 100.0,
        node.weight / MARKET_CAP_UNIT
    )
}
