use crate::popup::card::RoomCard;

/// A point in the page's coordinate space, in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn offset_by(self, delta: f64) -> Self {
        Self {
            x: self.x + delta,
            y: self.y + delta,
        }
    }
}

/// Rendering surface for the popup.
///
/// The dashboard page provides a popup container with a title line, a
/// temperature field, a humidity field, and a close button; an
/// implementation of this trait binds those elements. Tests use a recording
/// implementation instead.
pub trait PopupView {
    fn set_content(&mut self, title: &str, card: &RoomCard);
    fn move_to(&mut self, position: Point);
    fn show(&mut self);
    fn hide(&mut self);
}
