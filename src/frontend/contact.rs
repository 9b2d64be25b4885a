use js_sys::{Array, Function, Object, Reflect};
use serde_json::json;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{window, Element, Event, HtmlElement, HtmlFormElement};

use super::{document, element_by_id, listen, seeded_rng, set_timeout};
use crate::{
    config::SiteConfig,
    confetti::{
        plan_burst, ConfettiPiece, FormRect, ACKNOWLEDGEMENT, EASING, FORM_ID, PIECE_CLASS,
        PIECE_LIFETIME_MS, ROOT_ID,
    },
    error::SiteError,
    log::Logger,
};

pub(super) fn install(config: &SiteConfig, logger: Logger) -> Result<(), SiteError> {
    let document = document()?;
    let form = element_by_id(&document, FORM_ID)?
        .dyn_into::<HtmlFormElement>()
        .map_err(|_| SiteError::UnexpectedElement(FORM_ID))?;
    let root = element_by_id(&document, ROOT_ID)?;

    let count = config.confetti_count;
    let mut rng = seeded_rng();
    let target = form.clone();

    listen(&form, "submit", move |event: Event| {
        event.prevent_default();

        let rect = target.get_bounding_client_rect();
        let burst = plan_burst(
            &mut rng,
            FormRect {
                left: rect.left(),
                top: rect.top(),
                width: rect.width(),
            },
            count,
        );
        let settled_after_ms = burst.last().map(ConfettiPiece::removal_at_ms);

        for piece in burst {
            let root = root.clone();
            let scheduled = set_timeout(piece.spawn_delay_ms, move || {
                if let Err(error) = spawn_piece(&root, &piece) {
                    logger.warn("confetti_spawn_failed", json!({ "error": error.to_string() }));
                }
            });
            if let Err(error) = scheduled {
                logger.warn("confetti_schedule_failed", json!({ "error": error.to_string() }));
            }
        }

        // No request is sent; the form is only cleared and acknowledged.
        target.reset();
        logger.info(
            "contact_submitted",
            json!({ "pieces": count, "settled_after_ms": settled_after_ms }),
        );
        if let Some(window) = window() {
            let _ = window.alert_with_message(ACKNOWLEDGEMENT);
        }
    })
}

fn spawn_piece(root: &Element, piece: &ConfettiPiece) -> Result<(), SiteError> {
    let element = document()?
        .create_element("div")?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::UnexpectedElement("div"))?;
    element.set_class_name(PIECE_CLASS);

    let style = element.style();
    for (name, value) in piece.style_properties() {
        style.set_property(name, &value)?;
    }
    root.append_child(&element)?;

    let removable = element.clone();
    set_timeout(PIECE_LIFETIME_MS, move || removable.remove())?;

    animate(&element, piece)
}

/// Runs the fall through `Element.animate`, looked up dynamically.
fn animate(element: &HtmlElement, piece: &ConfettiPiece) -> Result<(), SiteError> {
    let element_js: &JsValue = element.as_ref();
    let animate = Reflect::get(element_js, &JsValue::from_str("animate"))?;
    let Some(animate) = animate.dyn_ref::<Function>() else {
        return Err(SiteError::Browser("Element.animate is unavailable".to_string()));
    };

    let keyframes = Array::new();
    for (transform, opacity) in piece.keyframes() {
        let frame = Object::new();
        Reflect::set(&frame, &JsValue::from_str("transform"), &JsValue::from_str(&transform))?;
        Reflect::set(&frame, &JsValue::from_str("opacity"), &JsValue::from_f64(opacity))?;
        keyframes.push(&frame);
    }

    let options = Object::new();
    Reflect::set(&options, &JsValue::from_str("duration"), &JsValue::from_f64(piece.duration_ms))?;
    Reflect::set(&options, &JsValue::from_str("easing"), &JsValue::from_str(EASING))?;

    animate.call2(element_js, &keyframes, &options)?;
    Ok(())
}
