//! World preview renderers: an RGBA image and an ASCII side view.

use rustc_hash::FxHashMap;

use super::image::{DebugImage, Rgba};
use crate::decoration::DecorationPart;
use crate::generator::GeneratedWorld;
use crate::heightmap;
use crate::material::Material;

const SKY: Rgba = [135, 190, 235, 255];
const CAVE: Rgba = [35, 30, 40, 255];

/// Ore colors by profile index; later profiles cycle through the list.
const ORE_COLORS: [Rgba; 4] = [
    [30, 30, 30, 255],
    [200, 150, 120, 255],
    [235, 195, 40, 255],
    [90, 225, 235, 255],
];

/// What occupies one position of the preview.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Texel {
    Sky,
    Cave,
    Cell(Material),
    Decoration(DecorationPart),
}

/// Color of a terrain cell.
pub fn material_color(material: Material) -> Rgba {
    match material {
        Material::Surface => [90, 170, 60, 255],
        Material::Subsurface => [134, 96, 67, 255],
        Material::Fill => [125, 125, 125, 255],
        Material::Ore(id) => ORE_COLORS[usize::from(id.0) % ORE_COLORS.len()],
    }
}

/// Color of a decoration cell.
pub fn decoration_color(part: DecorationPart) -> Rgba {
    match part {
        DecorationPart::Log => [110, 75, 40, 255],
        DecorationPart::Leaf => [40, 120, 40, 255],
        DecorationPart::GroundCover => [130, 205, 85, 255],
    }
}

fn material_glyph(material: Material) -> char {
    match material {
        Material::Surface => '=',
        Material::Subsurface => '%',
        Material::Fill => '#',
        Material::Ore(id) => char::from_digit(u32::from(id.0), 10).unwrap_or('*'),
    }
}

fn decoration_glyph(part: DecorationPart) -> char {
    match part {
        DecorationPart::Log => '|',
        DecorationPart::Leaf => '@',
        DecorationPart::GroundCover => '"',
    }
}

/// The preview grid: world columns by rows up to the highest occupied row.
struct Canvas<'a> {
    world: &'a GeneratedWorld,
    decorations: FxHashMap<(i32, i32), DecorationPart>,
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    fn new(world: &'a GeneratedWorld) -> Self {
        let width = world.heights().len() as u32;
        let decorations: FxHashMap<(i32, i32), DecorationPart> = world
            .decoration_cells()
            .filter(|cell| cell.x >= 0 && (cell.x as u32) < width)
            .map(|cell| ((cell.x, cell.y), cell.part))
            .collect();

        let terrain_rows = world
            .heights()
            .iter()
            .map(|&h| heightmap::row_count(h))
            .max()
            .unwrap_or(0);
        let decoration_rows = decorations
            .keys()
            .map(|&(_, y)| y as u32 + 1)
            .max()
            .unwrap_or(0);

        Self {
            world,
            decorations,
            width,
            height: terrain_rows.max(decoration_rows),
        }
    }

    fn texel(&self, x: i32, y: i32) -> Texel {
        if let Some(cell) = self.world.cell_at(x, y) {
            return Texel::Cell(cell.material);
        }
        if let Some(&part) = self.decorations.get(&(x, y)) {
            return Texel::Decoration(part);
        }
        match self.world.top_row(x) {
            Some(top) if y <= top => Texel::Cave,
            _ => Texel::Sky,
        }
    }

    /// Texels of image row `py` (0 = topmost world row), left to right.
    fn row(&self, py: u32) -> impl Iterator<Item = Texel> + '_ {
        let y = (self.height - 1 - py) as i32;
        (0..self.width as i32).map(move |x| self.texel(x, y))
    }
}

/// Render the world as an image, one pixel per cell, sky at the top.
///
/// Carved cells below a column's surface are drawn darker than the sky.
pub fn render_world(world: &GeneratedWorld) -> DebugImage {
    let canvas = Canvas::new(world);
    let mut image = DebugImage::new(canvas.width, canvas.height);

    for py in 0..canvas.height {
        for (px, texel) in canvas.row(py).enumerate() {
            let color = match texel {
                Texel::Sky => SKY,
                Texel::Cave => CAVE,
                Texel::Cell(material) => material_color(material),
                Texel::Decoration(part) => decoration_color(part),
            };
            image.set_pixel(px as u32, py, color);
        }
    }

    image
}

/// Render the world as text, one glyph per cell and one line per row.
///
/// `=` surface, `%` subsurface, `#` fill, digits for ore ids, `|` logs,
/// `@` leaves, `"` ground cover, `.` caves, space for sky.
pub fn render_ascii(world: &GeneratedWorld) -> String {
    let canvas = Canvas::new(world);
    let mut out = String::with_capacity(((canvas.width + 1) * canvas.height) as usize);

    for py in 0..canvas.height {
        out.extend(canvas.row(py).map(|texel| match texel {
            Texel::Sky => ' ',
            Texel::Cave => '.',
            Texel::Cell(material) => material_glyph(material),
            Texel::Decoration(part) => decoration_glyph(part),
        }));
        out.push('\n');
    }

    out
}
