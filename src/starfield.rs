//! Particle state behind the hero canvas.
//!
//! Two pools live side by side: stars for the night scene and slow floating
//! particles for the day scene. Only the pool of the active scene is drawn
//! and advanced on a given frame; the other one stays frozen.

use crate::theme::Theme;
use rand::Rng;

/// How far past an edge a particle may drift before it reappears opposite.
pub const WRAP_MARGIN: f64 = 10.0;
/// Scale applied to the pointer's offset from the canvas centre.
pub const PARALLAX_STRENGTH: f64 = 0.005;
/// One tick per repaint.
pub const FRAME_STEP: f64 = 1.0;

pub const PARTICLE_RGB: &str = "180,220,255";
pub const NIGHT_GRADIENT: (&str, &str) = ("#04040a", "#070714");
pub const DAY_GRADIENT: (&str, &str) = ("#e0f7ff", "#ffffff");

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scene {
    Night,
    Day,
}

impl Scene {
    pub fn for_theme(theme: Theme) -> Self {
        if theme.is_dark() {
            Self::Night
        } else {
            Self::Day
        }
    }

    /// Top and bottom colour of the vertical backdrop gradient.
    pub fn gradient(self) -> (&'static str, &'static str) {
        match self {
            Self::Night => NIGHT_GRADIENT,
            Self::Day => DAY_GRADIENT,
        }
    }

    /// Stars are blended additively; day particles use normal compositing.
    pub fn additive(self) -> bool {
        matches!(self, Self::Night)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub alpha: f64,
    /// Parallax multiplier; `None` for particles that ignore the pointer.
    pub depth: Option<f64>,
}

impl Particle {
    pub fn star(rng: &mut impl Rng, width: f64, height: f64) -> Self {
        Self {
            x: random_in(rng, 0.0, width),
            y: random_in(rng, 0.0, height),
            radius: random_in(rng, 0.3, 1.8),
            vx: random_in(rng, -0.05, 0.05),
            vy: random_in(rng, -0.02, 0.02),
            alpha: random_in(rng, 0.2, 0.9),
            depth: Some(random_in(rng, 0.5, 2.0)),
        }
    }

    pub fn mote(rng: &mut impl Rng, width: f64, height: f64) -> Self {
        Self {
            x: random_in(rng, 0.0, width),
            y: random_in(rng, 0.0, height),
            radius: random_in(rng, 1.5, 4.0),
            vx: random_in(rng, -0.1, 0.1),
            vy: random_in(rng, -0.1, 0.1),
            alpha: random_in(rng, 0.1, 0.3),
            depth: None,
        }
    }

    /// Where the particle is painted this frame, including parallax.
    pub fn drawn_at(&self, pointer: Pointer, bounds: Bounds) -> (f64, f64) {
        match self.depth {
            Some(depth) => {
                let (dx, dy) = parallax_offset(pointer, bounds, depth);
                (self.x + dx, self.y + dy)
            }
            None => (self.x, self.y),
        }
    }

    pub fn fill_style(&self) -> String {
        format!("rgba({PARTICLE_RGB},{})", self.alpha)
    }

    fn advance(&mut self, bounds: Bounds, dt: f64) {
        self.x += self.vx * dt;
        self.y += self.vy * dt;
        self.x = wrap_axis(self.x, bounds.width);
        self.y = wrap_axis(self.y, bounds.height);
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f64,
    pub height: f64,
}

pub fn parallax_offset(pointer: Pointer, bounds: Bounds, depth: f64) -> (f64, f64) {
    (
        (pointer.x - bounds.width / 2.0) * PARALLAX_STRENGTH * depth,
        (pointer.y - bounds.height / 2.0) * PARALLAX_STRENGTH * depth,
    )
}

/// Moves a coordinate that left `[-margin, extent + margin]` to the opposite edge.
pub fn wrap_axis(value: f64, extent: f64) -> f64 {
    if value < -WRAP_MARGIN {
        extent + WRAP_MARGIN
    } else if value > extent + WRAP_MARGIN {
        -WRAP_MARGIN
    } else {
        value
    }
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    bounds: Bounds,
    stars: Vec<Particle>,
    motes: Vec<Particle>,
}

impl ParticleField {
    pub fn seed(
        rng: &mut impl Rng,
        bounds: Bounds,
        star_count: usize,
        mote_count: usize,
    ) -> Self {
        let stars = (0..star_count)
            .map(|_| Particle::star(rng, bounds.width, bounds.height))
            .collect();
        let motes = (0..mote_count)
            .map(|_| Particle::mote(rng, bounds.width, bounds.height))
            .collect();

        Self {
            bounds,
            stars,
            motes,
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Only the wrap boundary changes; particles keep their coordinates.
    pub fn resize(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    pub fn particles(&self, scene: Scene) -> &[Particle] {
        match scene {
            Scene::Night => &self.stars,
            Scene::Day => &self.motes,
        }
    }

    /// Steps every particle of `scene` by `dt` frame units, then wraps it.
    pub fn advance(&mut self, scene: Scene, dt: f64) {
        let bounds = self.bounds;
        let pool = match scene {
            Scene::Night => &mut self.stars,
            Scene::Day => &mut self.motes,
        };

        for particle in pool.iter_mut() {
            particle.advance(bounds, dt);
        }
    }
}

fn random_in(rng: &mut impl Rng, min: f64, max: f64) -> f64 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::SmallRng, SeedableRng};

    const BOUNDS: Bounds = Bounds {
        width: 640.0,
        height: 360.0,
    };

    fn within_wrap_box(particle: &Particle, bounds: Bounds) -> bool {
        (-WRAP_MARGIN..=bounds.width + WRAP_MARGIN).contains(&particle.x)
            && (-WRAP_MARGIN..=bounds.height + WRAP_MARGIN).contains(&particle.y)
    }

    #[test]
    fn seed_builds_both_pools_inside_canvas() {
        let mut rng = SmallRng::seed_from_u64(7);
        let field = ParticleField::seed(&mut rng, BOUNDS, 800, 150);

        assert_eq!(field.particles(Scene::Night).len(), 800);
        assert_eq!(field.particles(Scene::Day).len(), 150);
        assert!(field
            .particles(Scene::Night)
            .iter()
            .all(|star| star.depth.is_some() && star.x < BOUNDS.width && star.y < BOUNDS.height));
        assert!(field.particles(Scene::Day).iter().all(|mote| mote.depth.is_none()));
    }

    #[test]
    fn seeded_ranges_match_pool_kind() {
        let mut rng = SmallRng::seed_from_u64(11);
        let field = ParticleField::seed(&mut rng, BOUNDS, 200, 200);

        for star in field.particles(Scene::Night) {
            assert!((0.3..1.8).contains(&star.radius));
            assert!((-0.05..0.05).contains(&star.vx));
            assert!((-0.02..0.02).contains(&star.vy));
            assert!((0.2..0.9).contains(&star.alpha));
            assert!(star.depth.is_some_and(|depth| (0.5..2.0).contains(&depth)));
        }
        for mote in field.particles(Scene::Day) {
            assert!((1.5..4.0).contains(&mote.radius));
            assert!((-0.1..0.1).contains(&mote.vx));
            assert!((0.1..0.3).contains(&mote.alpha));
        }
    }

    #[test]
    fn wrap_moves_to_opposite_margin() {
        assert_eq!(wrap_axis(-10.5, 100.0), 110.0);
        assert_eq!(wrap_axis(110.5, 100.0), -10.0);
        assert_eq!(wrap_axis(-10.0, 100.0), -10.0);
        assert_eq!(wrap_axis(110.0, 100.0), 110.0);
        assert_eq!(wrap_axis(42.0, 100.0), 42.0);
    }

    #[test]
    fn advance_only_touches_active_scene() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut field = ParticleField::seed(&mut rng, BOUNDS, 10, 10);
        let motes_before = field.particles(Scene::Day).to_vec();
        let stars_before = field.particles(Scene::Night).to_vec();

        field.advance(Scene::Night, FRAME_STEP);

        assert_eq!(field.particles(Scene::Day), motes_before.as_slice());
        for (after, before) in field.particles(Scene::Night).iter().zip(&stars_before) {
            assert_eq!(after.x, wrap_axis(before.x + before.vx, BOUNDS.width));
            assert_eq!(after.y, wrap_axis(before.y + before.vy, BOUNDS.height));
        }
    }

    #[test]
    fn particle_crossing_right_edge_reappears_left() {
        let mut particle = Particle {
            x: BOUNDS.width + WRAP_MARGIN - 0.01,
            y: 5.0,
            radius: 1.0,
            vx: 0.05,
            vy: 0.0,
            alpha: 0.5,
            depth: None,
        };

        particle.advance(BOUNDS, FRAME_STEP);

        assert_eq!(particle.x, -WRAP_MARGIN);
        assert_eq!(particle.y, 5.0);
    }

    #[test]
    fn resize_keeps_positions() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut field = ParticleField::seed(&mut rng, BOUNDS, 5, 5);
        let before = field.particles(Scene::Night).to_vec();

        field.resize(Bounds {
            width: 1920.0,
            height: 1080.0,
        });

        assert_eq!(field.particles(Scene::Night), before.as_slice());
        assert_eq!(field.bounds().width, 1920.0);
    }

    #[test]
    fn parallax_scales_with_depth_and_ignores_motes() {
        let pointer = Pointer { x: 420.0, y: 180.0 };
        let star = Particle {
            x: 10.0,
            y: 10.0,
            radius: 1.0,
            vx: 0.0,
            vy: 0.0,
            alpha: 0.5,
            depth: Some(2.0),
        };
        let mote = Particle { depth: None, ..star };

        let (x, y) = star.drawn_at(pointer, BOUNDS);
        assert!((x - (10.0 + 100.0 * 0.005 * 2.0)).abs() < 1e-9);
        assert!((y - 10.0).abs() < 1e-9);
        assert_eq!(mote.drawn_at(pointer, BOUNDS), (10.0, 10.0));
    }

    #[test]
    fn centred_pointer_has_no_parallax() {
        let centre = Pointer {
            x: BOUNDS.width / 2.0,
            y: BOUNDS.height / 2.0,
        };

        assert_eq!(parallax_offset(centre, BOUNDS, 1.7), (0.0, 0.0));
    }

    #[test]
    fn scene_follows_theme() {
        assert_eq!(Scene::for_theme(Theme::Dark), Scene::Night);
        assert_eq!(Scene::for_theme(Theme::Light), Scene::Day);
        assert!(Scene::Night.additive());
        assert_eq!(Scene::Day.gradient(), ("#e0f7ff", "#ffffff"));
    }

    #[test]
    fn fill_style_uses_particle_alpha() {
        let mote = Particle {
            x: 0.0,
            y: 0.0,
            radius: 2.0,
            vx: 0.0,
            vy: 0.0,
            alpha: 0.25,
            depth: None,
        };

        assert_eq!(mote.fill_style(), "rgba(180,220,255,0.25)");
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn particles_stay_in_wrap_box(
                seed in any::<u64>(),
                width in 1.0f64..2_000.0,
                height in 1.0f64..2_000.0,
                steps in 0usize..400,
                night in any::<bool>(),
            ) {
                let bounds = Bounds { width, height };
                let scene = if night { Scene::Night } else { Scene::Day };
                let mut rng = SmallRng::seed_from_u64(seed);
                let mut field = ParticleField::seed(&mut rng, bounds, 30, 30);

                for _ in 0..steps {
                    field.advance(scene, FRAME_STEP);
                    prop_assert!(field.particles(scene).iter().all(|p| within_wrap_box(p, bounds)));
                }
            }

            #[test]
            fn shrinking_canvas_recovers_after_one_step(
                seed in any::<u64>(),
                shrink in 0.05f64..1.0,
            ) {
                let mut rng = SmallRng::seed_from_u64(seed);
                let mut field = ParticleField::seed(&mut rng, BOUNDS, 40, 0);
                let smaller = Bounds { width: BOUNDS.width * shrink, height: BOUNDS.height * shrink };

                field.resize(smaller);
                field.advance(Scene::Night, FRAME_STEP);

                prop_assert!(field.particles(Scene::Night).iter().all(|p| within_wrap_box(p, smaller)));
            }
        }
    }
}
