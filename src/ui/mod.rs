//! Stateless egui helpers shared by the header and content views.

use eframe::egui;

use wordplay::render::animator::Transform;
use wordplay::render::layout::LayoutBox;

// ─── Geometry ────────────────────────────────────────────────────────────────

/// Screen rect of a laid-out word: its box relative to `origin`, shifted
/// and scaled about its centre by the current animation transform.
pub fn word_rect(origin: egui::Pos2, b: &LayoutBox, t: Transform) -> egui::Rect {
    let rect = egui::Rect::from_min_size(
        origin + egui::vec2(b.x + t.dx, b.y + t.dy),
        egui::vec2(b.width, b.height),
    );
    if (t.scale - 1.0).abs() <= f32::EPSILON {
        rect
    } else {
        egui::Rect::from_center_size(rect.center(), rect.size() * t.scale)
    }
}

// ─── Text utilities ───────────────────────────────────────────────────────────

/// Truncate `s` to at most `max_chars` Unicode scalar values, appending `"..."` if truncated.
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let t: String = s.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_keeps_box() {
        let b = LayoutBox::new(10.0, 5.0, 40.0, 20.0);
        let r = word_rect(egui::pos2(100.0, 0.0), &b, Transform::IDENTITY);
        assert_eq!(r.min, egui::pos2(110.0, 5.0));
        assert_eq!(r.size(), egui::vec2(40.0, 20.0));
    }

    #[test]
    fn scale_is_about_the_centre() {
        let b = LayoutBox::new(0.0, 0.0, 40.0, 20.0);
        let t = Transform {
            dx: 0.0,
            dy: 0.0,
            scale: 2.0,
        };
        let r = word_rect(egui::Pos2::ZERO, &b, t);
        assert_eq!(r.center(), egui::pos2(20.0, 10.0));
        assert_eq!(r.width(), 80.0);
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_str("שלום עולם", 6), "שלו...");
        assert_eq!(truncate_str("short", 10), "short");
    }
}
