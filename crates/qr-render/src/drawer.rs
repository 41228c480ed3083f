//! Module shapes.
//!
//! Drawers paint one module into a single-channel coverage mask: `255` where
//! the module is inked, untouched elsewhere. Colors are applied afterwards by
//! the fill strategy, so shapes and gradients stay independent.

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use qr_types::{EyeStyle, ModuleStyle};

use crate::qr::Neighbors;

/// Coverage value written for inked pixels.
pub const INK: Luma<u8> = Luma([255]);

/// Shrink factor for gapped squares and bar thickness.
pub const SIZE_RATIO: f64 = 0.8;

/// One module cell on the canvas.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub neighbors: Neighbors,
}

pub trait ModuleDrawer: Send + Sync {
    fn draw(&self, mask: &mut GrayImage, cell: Cell);
}

pub fn module_drawer(style: ModuleStyle) -> &'static dyn ModuleDrawer {
    match style {
        ModuleStyle::Square => &SquareDrawer,
        ModuleStyle::GappedSquare => &GappedSquareDrawer,
        ModuleStyle::Circle => &CircleDrawer,
        ModuleStyle::Rounded => &RoundedDrawer,
        ModuleStyle::HorizontalBars => &BarsDrawer::Horizontal,
        ModuleStyle::VerticalBars => &BarsDrawer::Vertical,
    }
}

pub fn eye_drawer(style: EyeStyle) -> &'static dyn ModuleDrawer {
    match style {
        EyeStyle::Square => &SquareDrawer,
        EyeStyle::Circle => &CircleDrawer,
        EyeStyle::Rounded => &RoundedDrawer,
    }
}

pub struct SquareDrawer;

impl ModuleDrawer for SquareDrawer {
    fn draw(&self, mask: &mut GrayImage, cell: Cell) {
        let rect = Rect::at(cell.x as i32, cell.y as i32).of_size(cell.size, cell.size);
        draw_filled_rect_mut(mask, rect, INK);
    }
}

pub struct GappedSquareDrawer;

impl ModuleDrawer for GappedSquareDrawer {
    fn draw(&self, mask: &mut GrayImage, cell: Cell) {
        let side = ((f64::from(cell.size) * SIZE_RATIO).round() as u32).max(1);
        let offset = (cell.size - side) / 2;
        let rect = Rect::at((cell.x + offset) as i32, (cell.y + offset) as i32).of_size(side, side);
        draw_filled_rect_mut(mask, rect, INK);
    }
}

pub struct CircleDrawer;

impl ModuleDrawer for CircleDrawer {
    fn draw(&self, mask: &mut GrayImage, cell: Cell) {
        let r = f64::from(cell.size) / 2.0;
        fill_where(mask, cell, |dx, dy| dx * dx + dy * dy <= r * r);
    }
}

/// Square module whose outer corners are rounded wherever neither adjacent
/// side touches another dark module.
pub struct RoundedDrawer;

impl ModuleDrawer for RoundedDrawer {
    fn draw(&self, mask: &mut GrayImage, cell: Cell) {
        let n = cell.neighbors;
        let r = f64::from(cell.size) / 2.0;
        fill_where(mask, cell, |dx, dy| {
            let rounded = match (dx < 0.0, dy < 0.0) {
                (true, true) => !n.north && !n.west,
                (false, true) => !n.north && !n.east,
                (true, false) => !n.south && !n.west,
                (false, false) => !n.south && !n.east,
            };
            !rounded || dx * dx + dy * dy <= r * r
        });
    }
}

/// Bars run along one axis; each end of a run gets a half-ellipse cap.
pub enum BarsDrawer {
    Horizontal,
    Vertical,
}

impl ModuleDrawer for BarsDrawer {
    fn draw(&self, mask: &mut GrayImage, cell: Cell) {
        let n = cell.neighbors;
        let half = f64::from(cell.size) / 2.0;
        let half_thickness = half * SIZE_RATIO;
        let (before, after) = match self {
            BarsDrawer::Horizontal => (n.west, n.east),
            BarsDrawer::Vertical => (n.north, n.south),
        };
        fill_where(mask, cell, |dx, dy| {
            // along: position on the bar axis, across: perpendicular offset
            let (along, across) = match self {
                BarsDrawer::Horizontal => (dx, dy),
                BarsDrawer::Vertical => (dy, dx),
            };
            if across.abs() > half_thickness {
                return false;
            }
            let joined = if along < 0.0 { before } else { after };
            joined || (along / half).powi(2) + (across / half_thickness).powi(2) <= 1.0
        });
    }
}

/// Ink every pixel of the cell whose centre satisfies `inside`. The
/// predicate receives offsets from the cell centre.
fn fill_where(mask: &mut GrayImage, cell: Cell, inside: impl Fn(f64, f64) -> bool) {
    let half = f64::from(cell.size) / 2.0;
    for py in 0..cell.size {
        for px in 0..cell.size {
            let dx = f64::from(px) + 0.5 - half;
            let dy = f64::from(py) + 0.5 - half;
            let (x, y) = (cell.x + px, cell.y + py);
            if inside(dx, dy) && x < mask.width() && y < mask.height() {
                mask.put_pixel(x, y, INK);
            }
        }
    }
}
