//! Paints the layered splash content. Everything here is a function of the
//! resolved images and the value passed in, so repaints can call it freely.

use egui::{
    pos2, vec2, Color32, FontId, Frame, Margin, Rect, Response, Sense, Shape, Stroke,
    TextureId, Ui, Vec2,
};

use crate::theme::{
    ASCII_SIZE, BAR_TRACK, BORDER_WIDTH, DIM_ALPHA, FRAME_FILL, FRAME_PADDING, NIKO_ASCII, PURPLE, YELLOW,
};

const FULL_UV: Rect = Rect::from_min_max(pos2(0.0, 0.0), pos2(1.0, 1.0));

/// Backdrop for the whole window: the image stretched over `rect` and dimmed
/// for legibility, or plain black.
pub fn background(rect: Rect, image: Option<TextureId>) -> Vec<Shape> {
    match image {
        Some(tex) => vec![
            Shape::image(tex, rect, FULL_UV, Color32::WHITE),
            Shape::rect_filled(rect, 0.0, Color32::from_black_alpha(DIM_ALPHA)),
        ],
        None => vec![Shape::rect_filled(rect, 0.0, Color32::BLACK)],
    }
}

pub fn progress_bar(rect: Rect, fraction: f32) -> Vec<Shape> {
    let fraction = fraction.clamp(0.0, 1.0);
    let mut shapes = vec![Shape::rect_filled(rect, 0.0, BAR_TRACK)];
    if fraction > 0.0 {
        let filled = Rect::from_min_size(rect.min, vec2(rect.width() * fraction, rect.height()));
        shapes.push(Shape::rect_filled(filled, 0.0, PURPLE));
    }
    shapes.push(Shape::rect_stroke(rect, 0.0, Stroke::new(BORDER_WIDTH, PURPLE)));
    shapes
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Character {
    /// Already fitted into the character box by the resolver.
    Framed { texture: TextureId, size: Vec2 },
    Ascii,
}

pub fn draw_character(ui: &mut Ui, character: Character) -> Response {
    match character {
        Character::Framed { texture, size } => {
            Frame::none()
                .fill(FRAME_FILL)
                .stroke(Stroke::new(BORDER_WIDTH, PURPLE))
                .inner_margin(Margin::same(FRAME_PADDING))
                .show(ui, |ui| {
                    ui.add(egui::Image::new(egui::load::SizedTexture::new(texture, size)));
                })
                .response
        }
        Character::Ascii => {
            // Painted as one galley so the art's lines keep their relative
            // indentation inside a centered layout.
            let galley = ui.fonts(|f| f.layout_no_wrap(NIKO_ASCII.to_owned(), FontId::monospace(ASCII_SIZE), YELLOW));
            let (rect, response) = ui.allocate_exact_size(galley.size(), Sense::hover());
            ui.painter().galley(rect.min, galley, YELLOW);
            response
        }
    }
}
