mod card;

pub use card::{build_card, card_height, tag_color, CardView, FALLBACK_TAG_COLOR};

/// A view that batches style changes and writes them on `flush`.
pub trait StyleView {
    fn set_dirty(&mut self) {
        self.set_dirty_flag(true);
    }

    fn set_dirty_flag(&mut self, is_dirty: bool);
    fn is_dirty(&self) -> bool;
}
