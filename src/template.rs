use egui::Pos2;
use image::{Rgba, RgbaImage};
use std::f32::consts::TAU;

use crate::error::{ColoringError, Result};
use crate::pixels::{PixelBuffer, INK, PAPER};

/// Default swatches for imported line art
pub const DEFAULT_PALETTE: [Rgba<u8>; 8] = [
    Rgba([231, 76, 60, 255]),
    Rgba([230, 126, 34, 255]),
    Rgba([241, 196, 15, 255]),
    Rgba([46, 204, 113, 255]),
    Rgba([52, 152, 219, 255]),
    Rgba([155, 89, 182, 255]),
    Rgba([121, 85, 72, 255]),
    Rgba([255, 182, 193, 255]),
];

/// Line-art primitive in unit coordinates (`0..1` on both axes)
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Line { from: (f32, f32), to: (f32, f32) },
    Circle { center: (f32, f32), radius: f32 },
    Ellipse { center: (f32, f32), radii: (f32, f32) },
    Rect { min: (f32, f32), max: (f32, f32) },
    Polygon(Vec<(f32, f32)>),
}

const CIRCLE_SEGMENTS: usize = 96;

impl Shape {
    /// Closed or open polyline in buffer coordinates
    fn polyline(&self, width: f32, height: f32) -> Vec<Pos2> {
        let to_buffer = |(x, y): (f32, f32)| Pos2::new(x * width, y * height);
        match self {
            Self::Line { from, to } => vec![to_buffer(*from), to_buffer(*to)],
            Self::Circle { center, radius } => ellipse_points(to_buffer(*center), radius * width, radius * height),
            Self::Ellipse { center, radii } => {
                ellipse_points(to_buffer(*center), radii.0 * width, radii.1 * height)
            }
            Self::Rect { min, max } => {
                let corners = [*min, (max.0, min.1), *max, (min.0, max.1), *min];
                corners.into_iter().map(to_buffer).collect()
            }
            Self::Polygon(points) => {
                let mut line: Vec<Pos2> = points.iter().copied().map(to_buffer).collect();
                if let Some(first) = line.first().copied() {
                    line.push(first);
                }
                line
            }
        }
    }
}

fn ellipse_points(center: Pos2, rx: f32, ry: f32) -> Vec<Pos2> {
    (0..=CIRCLE_SEGMENTS)
        .map(|i| {
            let angle = TAU * i as f32 / CIRCLE_SEGMENTS as f32;
            Pos2::new(center.x + rx * angle.cos(), center.y + ry * angle.sin())
        })
        .collect()
}

/// Where a template's line art comes from
#[derive(Debug, Clone, PartialEq)]
pub enum OutlineArt {
    /// Encoded raster (PNG, JPEG)
    Encoded(Vec<u8>),
    /// Built-in art, rasterized at the canvas size
    Shapes(Vec<Shape>),
}

/// A picture to color. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct Template {
    pub id: String,
    pub display_name: String,
    pub outline: OutlineArt,
    pub suggested_palette: Vec<Rgba<u8>>,
    pub fun_fact: String,
}

impl Template {
    /// Template from an encoded line-art image, e.g. a dropped PNG
    pub fn from_encoded(id: impl Into<String>, display_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        // Decode once up front so a broken file is rejected at import time
        image::load_from_memory(&bytes)?;
        Ok(Self {
            id: id.into(),
            display_name: display_name.into(),
            outline: OutlineArt::Encoded(bytes),
            suggested_palette: DEFAULT_PALETTE.to_vec(),
            fun_fact: "You drew this one yourself!".to_owned(),
        })
    }

    /// Rasterize the line art at the requested size
    pub fn render_outline(&self, width: u32, height: u32, line_width: f32) -> Result<RgbaImage> {
        if width == 0 || height == 0 {
            return Err(ColoringError::InvalidDimensions { width, height });
        }
        match &self.outline {
            OutlineArt::Encoded(bytes) => Ok(image::load_from_memory(bytes)?.to_rgba8()),
            OutlineArt::Shapes(shapes) => {
                let mut art = PixelBuffer::new(width, height, PAPER);
                let radius = line_width / 2.0;
                for shape in shapes {
                    let line = shape.polyline(width as f32, height as f32);
                    for pair in line.windows(2) {
                        art.paint_segment(pair[0], pair[1], radius, INK);
                    }
                }
                Ok(art.into_image())
            }
        }
    }
}

/// The list of pictures offered to the child
#[derive(Debug, Clone, Default)]
pub struct TemplateStore {
    templates: Vec<Template>,
}

impl TemplateStore {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// The bundled line art
    pub fn builtin() -> Self {
        Self::new(builtin_templates())
    }

    pub fn get(&self, id: &str) -> Result<&Template> {
        self.templates
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| ColoringError::UnknownTemplate(id.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Add imported line art; an existing id is replaced
    pub fn add(&mut self, template: Template) {
        match self.templates.iter_mut().find(|t| t.id == template.id) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Rgba<u8> {
    Rgba([r, g, b, 255])
}

fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            id: "sun".to_owned(),
            display_name: "Happy Sun".to_owned(),
            outline: OutlineArt::Shapes(sun_shapes()),
            suggested_palette: vec![rgb(255, 213, 0), rgb(255, 152, 0), rgb(255, 87, 34), rgb(135, 206, 235)],
            fun_fact: "The Sun is so big that about one million Earths could fit inside it!".to_owned(),
        },
        Template {
            id: "house".to_owned(),
            display_name: "Cozy House".to_owned(),
            outline: OutlineArt::Shapes(vec![
                Shape::Rect { min: (0.25, 0.45), max: (0.75, 0.85) },
                Shape::Polygon(vec![(0.2, 0.45), (0.5, 0.18), (0.8, 0.45)]),
                Shape::Rect { min: (0.44, 0.62), max: (0.56, 0.85) },
                Shape::Rect { min: (0.3, 0.52), max: (0.4, 0.62) },
                Shape::Rect { min: (0.6, 0.52), max: (0.7, 0.62) },
                Shape::Line { from: (0.05, 0.85), to: (0.95, 0.85) },
            ]),
            suggested_palette: vec![rgb(192, 57, 43), rgb(241, 196, 15), rgb(121, 85, 72), rgb(39, 174, 96)],
            fun_fact: "Some of the oldest houses people built were made of mammoth bones!".to_owned(),
        },
        Template {
            id: "fish".to_owned(),
            display_name: "Swimming Fish".to_owned(),
            outline: OutlineArt::Shapes(vec![
                Shape::Ellipse { center: (0.45, 0.5), radii: (0.28, 0.18) },
                Shape::Polygon(vec![(0.72, 0.5), (0.9, 0.33), (0.9, 0.67)]),
                Shape::Circle { center: (0.3, 0.45), radius: 0.035 },
                Shape::Polygon(vec![(0.4, 0.33), (0.5, 0.22), (0.55, 0.33)]),
            ]),
            suggested_palette: vec![rgb(255, 140, 0), rgb(52, 152, 219), rgb(26, 188, 156), rgb(255, 255, 255)],
            fun_fact: "Fish have been around for more than 500 million years, long before dinosaurs!".to_owned(),
        },
        Template {
            id: "flower".to_owned(),
            display_name: "Pretty Flower".to_owned(),
            outline: OutlineArt::Shapes(flower_shapes()),
            suggested_palette: vec![rgb(233, 30, 99), rgb(156, 39, 176), rgb(255, 235, 59), rgb(76, 175, 80)],
            fun_fact: "Sunflowers turn to follow the Sun across the sky while they are young.".to_owned(),
        },
        Template {
            id: "balloons".to_owned(),
            display_name: "Party Balloons".to_owned(),
            outline: OutlineArt::Shapes(vec![
                Shape::Ellipse { center: (0.3, 0.3), radii: (0.13, 0.17) },
                Shape::Ellipse { center: (0.55, 0.25), radii: (0.13, 0.17) },
                Shape::Ellipse { center: (0.75, 0.38), radii: (0.12, 0.16) },
                Shape::Line { from: (0.3, 0.47), to: (0.5, 0.85) },
                Shape::Line { from: (0.55, 0.42), to: (0.5, 0.85) },
                Shape::Line { from: (0.75, 0.54), to: (0.5, 0.85) },
            ]),
            suggested_palette: vec![rgb(231, 76, 60), rgb(52, 152, 219), rgb(241, 196, 15), rgb(155, 89, 182)],
            fun_fact: "The first rubber balloons were made in 1824 by a scientist studying gases.".to_owned(),
        },
    ]
}

fn sun_shapes() -> Vec<Shape> {
    let mut shapes = vec![
        Shape::Circle { center: (0.5, 0.5), radius: 0.2 },
        Shape::Circle { center: (0.43, 0.45), radius: 0.025 },
        Shape::Circle { center: (0.57, 0.45), radius: 0.025 },
        Shape::Line { from: (0.42, 0.57), to: (0.5, 0.61) },
        Shape::Line { from: (0.5, 0.61), to: (0.58, 0.57) },
    ];
    for i in 0..12 {
        let angle = TAU * i as f32 / 12.0;
        let (sin, cos) = angle.sin_cos();
        shapes.push(Shape::Line {
            from: (0.5 + 0.25 * cos, 0.5 + 0.25 * sin),
            to: (0.5 + 0.4 * cos, 0.5 + 0.4 * sin),
        });
    }
    shapes
}

fn flower_shapes() -> Vec<Shape> {
    let mut shapes = Vec::new();
    for i in 0..6 {
        let angle = TAU * i as f32 / 6.0;
        let (sin, cos) = angle.sin_cos();
        shapes.push(Shape::Circle {
            center: (0.5 + 0.13 * cos, 0.35 + 0.13 * sin),
            radius: 0.08,
        });
    }
    shapes.push(Shape::Circle { center: (0.5, 0.35), radius: 0.07 });
    shapes.push(Shape::Line { from: (0.5, 0.56), to: (0.5, 0.92) });
    shapes.push(Shape::Ellipse { center: (0.4, 0.74), radii: (0.08, 0.035) });
    shapes
}
