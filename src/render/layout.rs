use std::collections::HashMap;

use crate::config::LayoutConfig;
use crate::header::registry::WordRegistry;
use crate::header::renderer::HeaderView;
use crate::language::{Direction, Language};

/// Bounding box for a laid-out header word
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl LayoutBox {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Offset that moves `other` onto `self`.
    pub fn delta_from(&self, other: &LayoutBox) -> (f32, f32) {
        (self.x - other.x, self.y - other.y)
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    fn mirrored(self, width: f32) -> Self {
        Self {
            x: width - self.x - self.width,
            ..self
        }
    }
}

/// Word id → box.
pub type Positions = HashMap<String, LayoutBox>;

/// Laid-out header: every rendered word plus the static home word.
#[derive(Debug, Clone, Default)]
pub struct HeaderGeometry {
    pub words: Positions,
    pub home: Option<LayoutBox>,
    pub height: f32,
}

/// Header geometry: place zone, then a fixed-width pinned slot, then the
/// pile flowing into as many rows as it needs. Hebrew mirrors the whole
/// header horizontally.
#[derive(Debug, Clone)]
pub struct HeaderLayout {
    config: LayoutConfig,
}

impl HeaderLayout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn set_width(&mut self, width: f32) {
        self.config.header_width = width.max(1.0);
    }

    /// Monospace measurement: label chars × char width plus padding.
    pub fn measure(&self, label: &str) -> (f32, f32) {
        let chars = label.chars().count().max(1) as f32;
        (
            chars * self.config.char_width + self.config.word_padding * 2.0,
            self.config.line_height,
        )
    }

    pub fn compute(
        &self,
        view: &HeaderView,
        registry: &WordRegistry,
        lang: Language,
    ) -> HeaderGeometry {
        let c = &self.config;
        let mut words = Positions::new();
        let mut cursor_x = c.padding;
        let top = c.padding;

        let home = registry.home().map(|home| {
            let (w, h) = self.measure(home.label(lang));
            let b = LayoutBox::new(cursor_x, top, w, h);
            cursor_x += w + c.zone_gap;
            b
        });

        // The pinned slot is as wide as the widest word so the pile does not
        // jump when the pin changes.
        let slot_width = registry
            .words()
            .iter()
            .map(|w| self.measure(w.label(lang)).0)
            .fold(0.0_f32, f32::max);
        if let Some(word) = view.pinned.as_deref().and_then(|id| registry.get(id)) {
            let (w, h) = self.measure(word.label(lang));
            words.insert(word.id.clone(), LayoutBox::new(cursor_x, top, w, h));
        }
        cursor_x += slot_width + c.zone_gap;

        let pile_left = cursor_x;
        let right_edge = (c.header_width - c.padding).max(pile_left);
        let mut x = pile_left;
        let mut y = top;
        for word in view.pile.iter().filter_map(|id| registry.get(id)) {
            let (w, h) = self.measure(word.label(lang));
            if x > pile_left && x + w > right_edge {
                x = pile_left;
                y += c.line_height + c.row_gap;
            }
            words.insert(word.id.clone(), LayoutBox::new(x, y, w, h));
            x += w + c.word_gap;
        }

        let height = y + c.line_height + c.padding;
        let mut geometry = HeaderGeometry {
            words,
            home,
            height,
        };
        if lang.dir() == Direction::Rtl {
            let width = c.header_width;
            for b in geometry.words.values_mut() {
                *b = b.mirrored(width);
            }
            geometry.home = geometry.home.map(|b| b.mirrored(width));
        }
        geometry
    }
}
