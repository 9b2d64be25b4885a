use std::{
    cell::{Cell, RefCell},
    f64::consts::TAU,
    rc::Rc,
};

use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{window, CanvasRenderingContext2d, Event, HtmlCanvasElement, HtmlElement, MouseEvent};

use super::{applied_theme, element_by_id, listen, seeded_rng, viewport_size};
use crate::{
    config::SiteConfig,
    error::SiteError,
    log::Logger,
    starfield::{Bounds, ParticleField, Pointer, Scene, FRAME_STEP},
};

const CANVAS_ID: &str = "hero-canvas";

/// Last pointer position; written on `mousemove`, read every frame.
type SharedPointer = Rc<Cell<Pointer>>;

struct HeroCanvas {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    field: ParticleField,
}

impl HeroCanvas {
    fn fit_to_display(&mut self) {
        let bounds = fit_canvas(&self.canvas);
        self.field.resize(bounds);
    }

    /// Paints the scene, then advances the field even if painting failed.
    fn draw_frame(&mut self, scene: Scene, pointer: Pointer) -> Result<(), SiteError> {
        let painted = self.paint(scene, pointer);
        let restored = if scene.additive() {
            self.context
                .set_global_composite_operation("source-over")
                .map_err(SiteError::from)
        } else {
            Ok(())
        };

        self.field.advance(scene, FRAME_STEP);
        painted.and(restored)
    }

    fn paint(&self, scene: Scene, pointer: Pointer) -> Result<(), SiteError> {
        let bounds = self.field.bounds();
        let context = &self.context;

        context.clear_rect(0.0, 0.0, bounds.width, bounds.height);

        let (top, bottom) = scene.gradient();
        let gradient = context.create_linear_gradient(0.0, 0.0, 0.0, bounds.height);
        gradient.add_color_stop(0.0, top)?;
        gradient.add_color_stop(1.0, bottom)?;
        context.set_fill_style_canvas_gradient(&gradient);
        context.fill_rect(0.0, 0.0, bounds.width, bounds.height);

        if scene.additive() {
            context.set_global_composite_operation("lighter")?;
        }

        for particle in self.field.particles(scene) {
            let (x, y) = particle.drawn_at(pointer, bounds);
            context.begin_path();
            context.set_fill_style_str(&particle.fill_style());
            context.arc(x, y, particle.radius, 0.0, TAU)?;
            context.fill();
        }
        Ok(())
    }
}

/// Matches the backing store to the displayed size, falling back to the window.
fn fit_canvas(canvas: &HtmlCanvasElement) -> Bounds {
    let (fallback_width, fallback_height) = viewport_size();
    let width = match canvas.client_width() {
        0 => fallback_width,
        value => f64::from(value),
    };
    let height = match canvas.client_height() {
        0 => fallback_height,
        value => f64::from(value),
    };

    canvas.set_width(width.max(0.0) as u32);
    canvas.set_height(height.max(0.0) as u32);

    Bounds {
        width: f64::from(canvas.width()),
        height: f64::from(canvas.height()),
    }
}

pub(super) fn install(config: &SiteConfig, logger: Logger) -> Result<(), SiteError> {
    let window = window().ok_or(SiteError::NoDocument)?;
    let document = window.document().ok_or(SiteError::NoDocument)?;

    let canvas = element_by_id(&document, CANVAS_ID)?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| SiteError::UnexpectedElement(CANVAS_ID))?;
    let context = canvas
        .get_context("2d")?
        .ok_or_else(|| SiteError::Browser("2d context unavailable".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SiteError::UnexpectedElement(CANVAS_ID))?;
    let body = document.body().ok_or(SiteError::MissingElement("body"))?;

    let bounds = fit_canvas(&canvas);
    let field = ParticleField::seed(
        &mut seeded_rng(),
        bounds,
        config.star_count,
        config.particle_count,
    );
    let hero = Rc::new(RefCell::new(HeroCanvas {
        canvas,
        context,
        field,
    }));
    let pointer = SharedPointer::default();

    {
        let pointer = pointer.clone();
        listen(&window, "mousemove", move |event: MouseEvent| {
            pointer.set(Pointer {
                x: f64::from(event.client_x()),
                y: f64::from(event.client_y()),
            });
        })?;
    }

    {
        let hero = hero.clone();
        listen(&window, "resize", move |_: Event| {
            hero.borrow_mut().fit_to_display();
        })?;
    }

    start_render_loop(hero, pointer, body, logger)
}

fn request_animation_frame(callback: &Closure<dyn FnMut()>) -> Result<(), SiteError> {
    window()
        .ok_or(SiteError::NoDocument)?
        .request_animation_frame(callback.as_ref().unchecked_ref())?;
    Ok(())
}

/// Redraws on every repaint for the lifetime of the page.
fn start_render_loop(
    hero: Rc<RefCell<HeroCanvas>>,
    pointer: SharedPointer,
    body: HtmlElement,
    logger: Logger,
) -> Result<(), SiteError> {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let mut reported = false;

    *callback.borrow_mut() = Some(Closure::wrap(Box::new({
        let next = callback.clone();
        move || {
            // Theme is read per frame so a toggle shows up on the next repaint.
            let scene = Scene::for_theme(applied_theme(&body));
            if let Err(error) = hero.borrow_mut().draw_frame(scene, pointer.get()) {
                if !reported {
                    logger.warn("hero_frame_failed", json!({ "error": error.to_string() }));
                    reported = true;
                }
            }

            if let Some(next) = next.borrow().as_ref() {
                if let Err(error) = request_animation_frame(next) {
                    logger.warn("hero_loop_stopped", json!({ "error": error.to_string() }));
                }
            }
        }
    }) as Box<dyn FnMut()>));

    let first = callback.borrow();
    if let Some(first) = first.as_ref() {
        request_animation_frame(first)?;
    }
    Ok(())
}
