use drawing_compactor::drawing::full_extents;
use drawing_compactor::image::RasterRgba;
use drawing_compactor::{Scene, WorldExtents};
use std::cell::RefCell;

use super::synthetic_image::{BLACK, WHITE};

/// Scene of solid rectangles rendered with a bottom-up world `y` axis.
pub struct RectScene {
    pub entities: Vec<WorldExtents>,
    /// Reported extents that draw nothing, like empty text or block frames.
    pub blank: Vec<WorldExtents>,
    /// Renders return `None` when false.
    pub renderable: bool,
    /// Entities are reported but not drawn.
    pub invisible_ink: bool,
    pub renders: RefCell<Vec<(Option<WorldExtents>, usize, usize)>>,
}

impl RectScene {
    pub fn new(entities: Vec<WorldExtents>) -> Self {
        Self {
            entities,
            blank: Vec::new(),
            renderable: true,
            invisible_ink: false,
            renders: RefCell::new(Vec::new()),
        }
    }

    pub fn render_count(&self) -> usize {
        self.renders.borrow().len()
    }
}

impl Scene for RectScene {
    fn entity_extents(&self) -> Vec<WorldExtents> {
        self.entities.iter().chain(&self.blank).copied().collect()
    }

    fn render(&self, viewport: Option<&WorldExtents>, width: usize, height: usize) -> Option<RasterRgba> {
        self.renders.borrow_mut().push((viewport.copied(), width, height));
        if !self.renderable {
            return None;
        }
        let mut img = RasterRgba::from_pixel(width, height, WHITE);
        let view = match viewport.copied().or_else(|| full_extents(self)) {
            Some(v) => v,
            None => return Some(img),
        };
        if self.invisible_ink {
            return Some(img);
        }
        let sx = width as f64 / view.width();
        let sy = height as f64 / view.height();
        for e in self.entities.iter().filter(|e| e.is_valid()) {
            let x0 = ((e.min.x - view.min.x) * sx).floor().max(0.0) as usize;
            let x1 = ((e.max.x - view.min.x) * sx).ceil().max(0.0) as usize;
            let y0 = ((view.max.y - e.max.y) * sy).floor().max(0.0) as usize;
            let y1 = ((view.max.y - e.min.y) * sy).ceil().max(0.0) as usize;
            if x1 > x0 && y1 > y0 {
                img.fill_rect(x0, y0, x1 - x0, y1 - y0, BLACK);
            }
        }
        Some(img)
    }
}
