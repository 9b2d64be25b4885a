//! Confetti burst fired by the contact form.
//!
//! A burst is planned up front as a list of [`ConfettiPiece`]s; the browser
//! side only turns each piece into a short-lived `div` at its spawn delay.

use rand::Rng;

pub const FORM_ID: &str = "contact-form";
pub const ROOT_ID: &str = "confetti-root";
pub const PIECE_CLASS: &str = "confetti-piece";
pub const ACKNOWLEDGEMENT: &str = "Message sent — thank you!";

pub const SPAWN_STAGGER_MS: u32 = 20;
/// Pieces are removed this long after they spawn, finished or not.
pub const PIECE_LIFETIME_MS: u32 = 2_200;
/// Anchor sits this far below the form's top edge.
pub const ANCHOR_DROP: f64 = 40.0;
pub const SPAWN_SPREAD_X: f64 = 200.0;
pub const SPAWN_SPREAD_Y: f64 = 20.0;
pub const EASING: &str = "cubic-bezier(.2,.6,.2,1)";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Shape {
    Square,
    Circle,
}

impl Shape {
    pub fn border_radius(self) -> &'static str {
        match self {
            Self::Square => "3px",
            Self::Circle => "50%",
        }
    }
}

/// Viewport rectangle of the submitted form.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FormRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
}

impl FormRect {
    pub fn anchor(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + ANCHOR_DROP)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub spawn_delay_ms: u32,
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub hue: f64,
    pub shape: Shape,
    pub initial_rotation: f64,
    pub dx: f64,
    pub dy: f64,
    pub rotation: f64,
    pub duration_ms: f64,
}

impl ConfettiPiece {
    pub fn random(rng: &mut impl Rng, index: usize, anchor: (f64, f64)) -> Self {
        let (cx, cy) = anchor;
        Self {
            spawn_delay_ms: index as u32 * SPAWN_STAGGER_MS,
            x: cx + (rng.random::<f64>() - 0.5) * SPAWN_SPREAD_X,
            y: cy + (rng.random::<f64>() - 0.5) * SPAWN_SPREAD_Y,
            size: 6.0 + rng.random::<f64>() * 10.0,
            hue: rng.random::<f64>() * 360.0,
            shape: if rng.random_bool(0.5) {
                Shape::Square
            } else {
                Shape::Circle
            },
            initial_rotation: rng.random::<f64>() * 360.0,
            dx: (rng.random::<f64>() - 0.5) * 400.0,
            dy: 700.0 + rng.random::<f64>() * 200.0,
            rotation: (rng.random::<f64>() - 0.5) * 720.0,
            duration_ms: 1_600.0 + rng.random::<f64>() * 600.0,
        }
    }

    /// Time from the submit event until this piece is removed.
    pub fn removal_at_ms(&self) -> u32 {
        self.spawn_delay_ms + PIECE_LIFETIME_MS
    }

    pub fn background(&self) -> String {
        format!("hsl({} 80% 65%)", self.hue)
    }

    /// Inline style properties set on the piece before it is attached.
    pub fn style_properties(&self) -> Vec<(&'static str, String)> {
        let size = format!("{}px", self.size);
        vec![
            ("position", "fixed".to_string()),
            ("left", format!("{}px", self.x)),
            ("top", format!("{}px", self.y)),
            ("width", size.clone()),
            ("height", size),
            ("background", self.background()),
            ("border-radius", self.shape.border_radius().to_string()),
            ("opacity", "1".to_string()),
            (
                "transform",
                format!("translateY(0) rotate({}deg)", self.initial_rotation),
            ),
            ("z-index", "9999".to_string()),
            ("pointer-events", "none".to_string()),
        ]
    }

    /// Start and end keyframes as `(transform, opacity)`.
    pub fn keyframes(&self) -> [(String, f64); 2] {
        [
            ("translate(0,0) rotate(0deg)".to_string(), 1.0),
            (
                format!(
                    "translate({}px, {}px) rotate({}deg)",
                    self.dx, self.dy, self.rotation
                ),
                0.0,
            ),
        ]
    }
}

pub fn plan_burst(rng: &mut impl Rng, rect: FormRect, count: usize) -> Vec<ConfettiPiece> {
    let anchor = rect.anchor();
    (0..count)
        .map(|index| ConfettiPiece::random(rng, index, anchor))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_CONFETTI_COUNT;
    use rand::{rngs::SmallRng, SeedableRng};

    const RECT: FormRect = FormRect {
        left: 100.0,
        top: 300.0,
        width: 600.0,
    };

    fn burst(seed: u64) -> Vec<ConfettiPiece> {
        let mut rng = SmallRng::seed_from_u64(seed);
        plan_burst(&mut rng, RECT, DEFAULT_CONFETTI_COUNT)
    }

    #[test]
    fn burst_has_forty_staggered_pieces() {
        let pieces = burst(1);

        assert_eq!(pieces.len(), 40);
        for (index, piece) in pieces.iter().enumerate() {
            assert_eq!(piece.spawn_delay_ms, index as u32 * 20);
        }
        assert_eq!(pieces.last().map(|piece| piece.spawn_delay_ms), Some(780));
    }

    #[test]
    fn each_piece_is_removed_lifetime_after_its_own_spawn() {
        for piece in burst(2) {
            assert_eq!(piece.removal_at_ms() - piece.spawn_delay_ms, 2_200);
        }
    }

    #[test]
    fn pieces_spawn_around_anchor() {
        assert_eq!(RECT.anchor(), (400.0, 340.0));

        for piece in burst(3) {
            assert!((piece.x - 400.0).abs() <= SPAWN_SPREAD_X / 2.0);
            assert!((piece.y - 340.0).abs() <= SPAWN_SPREAD_Y / 2.0);
        }
    }

    #[test]
    fn randomized_properties_stay_in_range() {
        for piece in burst(4) {
            assert!((6.0..16.0).contains(&piece.size));
            assert!((0.0..360.0).contains(&piece.hue));
            assert!((-200.0..=200.0).contains(&piece.dx));
            assert!((700.0..900.0).contains(&piece.dy));
            assert!((-360.0..=360.0).contains(&piece.rotation));
            assert!((1_600.0..2_200.0).contains(&piece.duration_ms));
        }
    }

    #[test]
    fn both_shapes_appear_in_a_burst() {
        let pieces = burst(5);

        assert!(pieces.iter().any(|piece| piece.shape == Shape::Square));
        assert!(pieces.iter().any(|piece| piece.shape == Shape::Circle));
    }

    #[test]
    fn style_and_keyframes_render_css() {
        let piece = ConfettiPiece {
            spawn_delay_ms: 0,
            x: 10.0,
            y: 20.0,
            size: 8.0,
            hue: 120.0,
            shape: Shape::Circle,
            initial_rotation: 45.0,
            dx: -50.0,
            dy: 750.0,
            rotation: 90.0,
            duration_ms: 1_800.0,
        };
        let style = piece.style_properties();

        assert!(style.contains(&("width", "8px".to_string())));
        assert!(style.contains(&("background", "hsl(120 80% 65%)".to_string())));
        assert!(style.contains(&("border-radius", "50%".to_string())));
        assert!(style.contains(&("transform", "translateY(0) rotate(45deg)".to_string())));

        let [start, end] = piece.keyframes();
        assert_eq!(start, ("translate(0,0) rotate(0deg)".to_string(), 1.0));
        assert_eq!(end, ("translate(-50px, 750px) rotate(90deg)".to_string(), 0.0));
    }
}
