//! ASCII rasterizer for terminal rendering
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use cubes3d_core::{mesh, project_to_screen, Matrix4, Vector3};
use std::io::Write;

use crate::frame::Frame;

/// Character luminosity ramp for depth/shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Light that is always present, so faces turned away stay visible
const AMBIENT: f32 = 0.15;

/// Clear colour of the published frame
pub const BACKGROUND: [u8; 4] = [179, 230, 179, 255];

/// Pixel footprint of one terminal cell; cells are twice as tall as wide.
pub const CELL_WIDTH_PX: u32 = 8;
pub const CELL_HEIGHT_PX: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    depth: f32,
    glyph: char,
    color: Vector3,
}

impl Cell {
    const EMPTY: Self = Self {
        depth: f32::INFINITY,
        glyph: ' ',
        color: Vector3::ZERO,
    };
}

/// ASCII renderer that converts 3D meshes to terminal characters
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::EMPTY; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width over height of the cell grid in pixels.
    pub fn aspect(&self) -> f32 {
        (self.width as u32 * CELL_WIDTH_PX) as f32 / (self.height.max(1) as u32 * CELL_HEIGHT_PX) as f32
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::EMPTY; width * height];
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    /// Rasterize an interleaved vertex buffer.
    ///
    /// `to_light` is the world-space direction towards the light.
    pub fn render_mesh(
        &mut self,
        vertices: &[f32],
        model: &Matrix4,
        view_projection: &Matrix4,
        color: Vector3,
        to_light: Vector3,
    ) {
        let mvp = *view_projection * *model;
        let to_light = to_light.normalized();

        'triangles: for triangle in mesh::triangles(vertices) {
            // Project vertices to screen space
            let mut screen_coords = [(0.0, 0.0, 0.0); 3];
            for (slot, vertex) in screen_coords.iter_mut().zip(&triangle.vertices) {
                match project_to_screen(vertex.position, &mvp, self.width as u32, self.height as u32) {
                    Some(coords) => *slot = coords,
                    None => continue 'triangles, // Triangle is clipped
                }
            }

            // Face normal in world space for shading
            let normal = model.transform_vector(triangle.face_normal()).normalized();
            let brightness = (AMBIENT + (1.0 - AMBIENT) * normal.dot(&to_light).max(0.0)).min(1.0);

            // Map brightness to character
            let char_index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
            let glyph = LUMINOSITY_RAMP[char_index.min(LUMINOSITY_RAMP.len() - 1)];

            self.rasterize_triangle(&screen_coords, glyph, color * brightness);
        }
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], glyph: char, color: Vector3) {
        let [v0, v1, v2] = *coords;

        // Bounding box
        let min_x = v0.0.min(v1.0).min(v2.0).floor() as i32;
        let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i32;
        let min_y = v0.1.min(v1.1).min(v2.1).floor() as i32;
        let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i32;

        // Clip to screen bounds
        let min_x = min_x.max(0);
        let max_x = max_x.min(self.width as i32 - 1);
        let min_y = min_y.max(0);
        let max_y = max_y.min(self.height as i32 - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let px = x as f32 + 0.5;
                let py = y as f32 + 0.5;

                if let Some((w0, w1, w2)) = barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py)) {
                    if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                        // Interpolate depth
                        let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;

                        let cell = &mut self.cells[y as usize * self.width + x as usize];
                        if depth < cell.depth {
                            *cell = Cell { depth, glyph, color };
                        }
                    }
                }
            }
        }
    }

    /// Number of cells covered by geometry
    pub fn covered_cells(&self) -> usize {
        self.cells.iter().filter(|c| c.depth.is_finite()).count()
    }

    pub fn glyph_at(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x].glyph
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut current = None;
        for (i, row) in self.cells.chunks(self.width.max(1)).enumerate() {
            if i > 0 {
                writer.queue(Print("\r\n"))?;
            }
            for cell in row {
                let color = to_terminal_color(cell.color);
                if current != Some(color) {
                    writer.queue(SetForegroundColor(color))?;
                    current = Some(color);
                }
                writer.queue(Print(cell.glyph))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    /// Upscale the cell grid into `frame`, one flat colour per cell.
    pub fn write_frame(&self, frame: &mut Frame) {
        frame.fill(BACKGROUND);
        if self.width == 0 || self.height == 0 {
            return;
        }
        for y in 0..frame.height() {
            let cy = (y as usize * self.height) / frame.height() as usize;
            for x in 0..frame.width() {
                let cx = (x as usize * self.width) / frame.width() as usize;
                let cell = &self.cells[cy * self.width + cx];
                if cell.depth.is_finite() {
                    let [r, g, b] = to_rgb(cell.color);
                    frame.set_pixel(x, y, [r, g, b, 255]);
                }
            }
        }
    }
}

fn to_rgb(color: Vector3) -> [u8; 3] {
    color.to_array().map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

fn to_terminal_color(color: Vector3) -> Color {
    let [r, g, b] = to_rgb(color);
    Color::Rgb { r, g, b }
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
