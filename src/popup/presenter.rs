use crate::fetcher::SensorFetcher;
use crate::popup::card::RoomCard;
use crate::popup::view::{Point, PopupView};

/// Distance from the cursor to the popup's top-left corner, so the popup
/// never sits directly under the pointer.
pub const CURSOR_OFFSET: f64 = 10.0;

/// What a page-level click landed on, as classified by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// Inside the popup itself.
    Popup,
    /// On a floor-plan region carrying a room attribute.
    Region,
    /// Anywhere else on the page.
    Other,
}

/// Drives the popup over a [`PopupView`].
///
/// Hovering a region fills the popup with that room's formatted readings
/// and makes it follow the cursor. A click pins it in place; it then
/// ignores cursor movement and region leave events until dismissed by an
/// outside click or the close button.
pub struct PopupPresenter<V: PopupView> {
    view: V,
    visible: bool,
    pinned: bool,
}

impl<V: PopupView> PopupPresenter<V> {
    #[must_use]
    pub fn new(view: V) -> Self {
        Self {
            view,
            visible: false,
            pinned: false,
        }
    }

    /// Cursor entered a floor-plan region. Reads the cached all-sensors
    /// snapshot; missing rooms or readings show as placeholders.
    pub async fn hover(&mut self, fetcher: &SensorFetcher, room_id: &str, at: Point) {
        if self.pinned {
            return;
        }

        let snapshot = fetcher.all_sensors().await;
        let card = RoomCard::for_room(&snapshot, room_id);
        self.show_card(room_id, &card, at);
    }

    /// Show an already-built card. Split out of [`hover`](Self::hover) so
    /// hosts that fetch on their own schedule can drive the popup directly.
    pub fn show_card(&mut self, room_id: &str, card: &RoomCard, at: Point) {
        if self.pinned {
            return;
        }

        let title = format!("Readings in {room_id}");
        self.view.set_content(&title, card);
        self.view.move_to(at.offset_by(CURSOR_OFFSET));
        self.view.show();
        self.visible = true;
    }

    /// Cursor moved within the hovered region.
    pub fn cursor_moved(&mut self, at: Point) {
        if self.visible && !self.pinned {
            self.view.move_to(at.offset_by(CURSOR_OFFSET));
        }
    }

    /// Cursor left the hovered region.
    pub fn leave(&mut self) {
        if !self.pinned {
            self.hide();
        }
    }

    /// Click on the hovered region: pin the popup at the click point.
    pub fn click(&mut self, at: Point) {
        if !self.visible {
            return;
        }
        self.pinned = true;
        self.view.move_to(at.offset_by(CURSOR_OFFSET));
    }

    /// Page-level click. Clicks outside the popup and outside any region
    /// dismiss the popup, pinned or not.
    pub fn document_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Other {
            self.hide();
        }
    }

    /// The popup's close button.
    pub fn close(&mut self) {
        self.hide();
    }

    fn hide(&mut self) {
        self.view.hide();
        self.visible = false;
        self.pinned = false;
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    pub fn view(&self) -> &V {
        &self.view
    }
}
