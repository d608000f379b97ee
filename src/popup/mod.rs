mod card;
mod presenter;
mod view;

pub use card::{get_latest_value, RoomCard, PLACEHOLDER};
pub use presenter::{ClickTarget, PopupPresenter, CURSOR_OFFSET};
pub use view::{Point, PopupView};
