use egui::{Pos2, Rect, Response, Ui, Vec2};

/// Map a pointer position measured in displayed (scaled) pixels, relative to
/// the canvas' top-left corner, to continuous buffer coordinates:
/// `buffer = pointer * (buffer_size / displayed_size)` on each axis.
pub fn display_to_buffer(local: Pos2, displayed_size: Vec2, buffer_size: [u32; 2]) -> Pos2 {
    Pos2::new(
        local.x * (buffer_size[0] as f32 / displayed_size.x),
        local.y * (buffer_size[1] as f32 / displayed_size.y),
    )
}

/// Largest rect with the buffer's aspect ratio centered in `available`
pub fn fit_canvas_rect(available: Rect, buffer_size: [u32; 2]) -> Rect {
    let aspect = buffer_size[0] as f32 / buffer_size[1].max(1) as f32;
    let mut size = available.size();
    if size.x / size.y > aspect {
        size.x = size.y * aspect;
    } else {
        size.y = size.x / aspect;
    }
    Rect::from_center_size(available.center(), size)
}

/// Pointer events in buffer coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CanvasPointer {
    Down(Pos2),
    Move(Pos2),
    Up,
    Leave,
}

/// Translates egui pointer input over the canvas rect into [`CanvasPointer`]s
#[derive(Debug, Default)]
pub struct CanvasInput {
    pressed: bool,
    last_buffer_pos: Option<Pos2>,
}

impl CanvasInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Process this frame's input for a canvas drawn at `canvas_rect`
    pub fn process(&mut self, ui: &Ui, response: &Response, canvas_rect: Rect, buffer_size: [u32; 2]) -> Vec<CanvasPointer> {
        let mut events = Vec::new();
        let (primary_pressed, primary_down) = ui.input(|i| (i.pointer.primary_pressed(), i.pointer.primary_down()));

        let to_buffer = |pos: Pos2| display_to_buffer((pos - canvas_rect.min).to_pos2(), canvas_rect.size(), buffer_size);

        if let Some(pos) = response.interact_pointer_pos() {
            let buffer_pos = to_buffer(pos);
            if primary_pressed && canvas_rect.contains(pos) {
                self.pressed = true;
                self.last_buffer_pos = Some(buffer_pos);
                events.push(CanvasPointer::Down(buffer_pos));
            } else if self.pressed && primary_down {
                if !canvas_rect.contains(pos) {
                    self.pressed = false;
                    self.last_buffer_pos = None;
                    events.push(CanvasPointer::Leave);
                } else if self.last_buffer_pos != Some(buffer_pos) {
                    self.last_buffer_pos = Some(buffer_pos);
                    events.push(CanvasPointer::Move(buffer_pos));
                }
            }
        }

        if self.pressed && !primary_down {
            self.pressed = false;
            self.last_buffer_pos = None;
            events.push(CanvasPointer::Up);
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_to_buffer_scales_each_axis() {
        let pos = display_to_buffer(Pos2::new(125.0, 50.0), Vec2::new(250.0, 100.0), [500, 400]);
        assert_eq!(pos, Pos2::new(250.0, 200.0));
    }

    #[test]
    fn test_display_to_buffer_identity() {
        let pos = display_to_buffer(Pos2::new(10.25, 3.5), Vec2::new(500.0, 500.0), [500, 500]);
        assert_eq!(pos, Pos2::new(10.25, 3.5));
    }

    #[test]
    fn test_fit_canvas_rect_keeps_aspect() {
        let available = Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 400.0));
        let rect = fit_canvas_rect(available, [500, 500]);
        assert_eq!(rect.size(), Vec2::new(400.0, 400.0));
        assert_eq!(rect.center(), available.center());
    }
}
