// venus_sim/src/simulation/plugins/map_view/components.rs

use bevy::prelude::*;
use venus_core::mapping::ExplorationMapper;
use venus_core::types::GridPosition;

/// Text label next to a rock marker, e.g. `A3`.
#[derive(Component, Debug, Clone, Copy)]
pub struct RockLabel {
    /// Grid cell the label is anchored to.
    pub anchor: GridPosition,
}

/// Marks the title and legend overlay.
#[derive(Component, Debug, Default)]
pub struct MapOverlay;

/// How much of the world the map shows.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct MapViewSettings {
    /// Half-width of the fixed view, in cells.
    pub zoom_range: i64,
    pub auto_zoom: bool,
    pub auto_zoom_padding: i64,
}

impl MapViewSettings {
    /// Half-width of the view to draw for the current map.
    pub fn extent(&self, mapper: &ExplorationMapper) -> i64 {
        if self.auto_zoom {
            mapper.fit_extent(self.auto_zoom_padding).max(1)
        } else {
            self.zoom_range.max(1)
        }
    }
}

/// Converts grid cells to world-space pixels for the current view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapProjection {
    pub extent: i64,
    pub cell_px: f32,
}

impl MapProjection {
    /// Share of the shorter window side used by the plot area.
    const FILL: f32 = 0.8;
    /// Grids denser than this are drawn without cell lines.
    const MAX_GRID_CELLS: i64 = 200;

    /// Scales the view so `extent` cells either side of the origin fit the viewport.
    pub fn fit(extent: i64, viewport: Vec2) -> Self {
        let extent = extent.max(1);
        let half_side = viewport.x.min(viewport.y) * 0.5 * Self::FILL;
        Self {
            extent,
            cell_px: half_side / extent as f32,
        }
    }

    pub fn to_world(&self, position: GridPosition) -> Vec2 {
        Vec2::new(position.x as f32, position.y as f32) * self.cell_px
    }

    /// Where a rock's label goes: one cell up and right of the rock. Offset in
    /// world space so rocks at the edge of the `i64` range still get one.
    pub fn label_position(&self, anchor: GridPosition) -> Vec2 {
        self.to_world(anchor) + Vec2::splat(self.cell_px)
    }

    /// Cells per side of the background grid, or `None` when the view is
    /// too wide to draw one.
    pub fn grid_cells(&self) -> Option<u32> {
        self.extent
            .checked_mul(2)
            .filter(|&cells| cells <= Self::MAX_GRID_CELLS)
            .and_then(|cells| u32::try_from(cells).ok())
    }

    /// Side length of the whole plot area in pixels.
    pub fn plot_side(&self) -> f32 {
        2.0 * self.extent as f32 * self.cell_px
    }
}
