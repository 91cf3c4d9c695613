//! Squarified box packing for single-level weighted trees.

use serde::Serialize;

/// Target aspect ratio of squarified rows (the golden ratio).
pub const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Axis-aligned rectangle in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tile {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Tile {
    pub const fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Shrink by `amount` on every side; collapses to the centre line when the
    /// tile is too small.
    pub fn inset(&self, amount: f64) -> Self {
        let (mut x0, mut y0, mut x1, mut y1) = (
            self.x0 + amount,
            self.y0 + amount,
            self.x1 - amount,
            self.y1 - amount,
        );
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Self { x0, y0, x1, y1 }
    }
}

/// Pack `weights` into `bounds` so that tile areas are proportional to weight,
/// keeping tiles close to `GOLDEN_RATIO` in aspect. Tiles come back in input
/// order. Non-positive weights get zero-area tiles.
pub fn squarify(weights: &[f64], bounds: Tile) -> Vec<Tile> {
    let mut tiles = vec![Tile::new(bounds.x0, bounds.y0, bounds.x0, bounds.y0); weights.len()];
    let value_of = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };

    let mut remaining: f64 = weights.iter().copied().map(value_of).sum();
    let Tile {
        mut x0,
        mut y0,
        x1,
        y1,
    } = bounds;

    let n = weights.len();
    let mut start = 0;
    let mut end = 0;

    while start < n {
        let dx = x1 - x0;
        let dy = y1 - y0;

        let mut sum;
        loop {
            sum = value_of(weights[end]);
            end += 1;
            if sum > 0.0 || end >= n {
                break;
            }
        }

        let mut min_value = sum;
        let mut max_value = sum;
        let alpha = (dy / dx).max(dx / dy) / (remaining * GOLDEN_RATIO);
        let mut beta = sum * sum * alpha;
        let mut min_ratio = (max_value / beta).max(beta / min_value);

        while end < n {
            let value = value_of(weights[end]);
            let candidate_sum = sum + value;
            let candidate_min = min_value.min(value);
            let candidate_max = max_value.max(value);
            beta = candidate_sum * candidate_sum * alpha;
            let ratio = (candidate_max / beta).max(beta / candidate_min);
            if ratio > min_ratio {
                break;
            }
            sum = candidate_sum;
            min_value = candidate_min;
            max_value = candidate_max;
            min_ratio = ratio;
            end += 1;
        }

        let row = start..end;
        if dx < dy {
            // Row spans the full width and stacks downwards.
            let row_y1 = if remaining > 0.0 { y0 + dy * sum / remaining } else { y1 };
            dice(weights, row, &mut tiles, Tile::new(x0, y0, x1, row_y1), sum, value_of);
            y0 = row_y1;
        } else {
            // Row spans the full height and stacks rightwards.
            let row_x1 = if remaining > 0.0 { x0 + dx * sum / remaining } else { x1 };
            slice(weights, row, &mut tiles, Tile::new(x0, y0, row_x1, y1), sum, value_of);
            x0 = row_x1;
        }

        remaining -= sum;
        start = end;
    }

    // Guard against accumulated rounding pushing the last tile past the bounds.
    for tile in &mut tiles {
        tile.x1 = tile.x1.min(bounds.x1);
        tile.y1 = tile.y1.min(bounds.y1);
    }

    tiles
}

fn dice(
    weights: &[f64],
    row: std::ops::Range<usize>,
    tiles: &mut [Tile],
    area: Tile,
    sum: f64,
    value_of: impl Fn(f64) -> f64,
) {
    let k = if sum > 0.0 { area.width() / sum } else { 0.0 };
    let mut x = area.x0;
    for i in row {
        let next = x + value_of(weights[i]) * k;
        tiles[i] = Tile::new(x, area.y0, next, area.y1);
        x = next;
    }
}

fn slice(
    weights: &[f64],
    row: std::ops::Range<usize>,
    tiles: &mut [Tile],
    area: Tile,
    sum: f64,
    value_of: impl Fn(f64) -> f64,
) {
    let k = if sum > 0.0 { area.height() / sum } else { 0.0 };
    let mut y = area.y0;
    for i in row {
        let next = y + value_of(weights[i]) * k;
        tiles[i] = Tile::new(area.x0, y, area.x1, next);
        y = next;
    }
}

/// Treemap layout with uniform padding: `padding` between neighbouring tiles
/// and between tiles and the outer edge.
pub fn treemap(weights: &[f64], width: f64, height: f64, padding: f64) -> Vec<Tile> {
    let half = padding / 2.0;
    let bounds = Tile::new(0.0, 0.0, width, height).inset(padding - half);
    squarify(weights, bounds)
        .into_iter()
        .map(|tile| tile.inset(half))
        .collect()
}
