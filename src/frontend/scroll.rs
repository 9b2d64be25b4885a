use js_sys::Array;
use serde_json::json;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{
    window, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use super::{document, element_by_id, elements, listen, listen_passive, viewport_size};
use crate::{
    error::SiteError,
    log::Logger,
    observer::{EntryAction, WatchSpec},
    reveal::{FADE_IN, REVEAL_SELECTOR},
    timeline::{
        progress_fraction, progress_height, ACTIVE_ITEMS, ITEM_SELECTOR, PROGRESS_SELECTOR,
        SECTION_ID,
    },
};

/// Observer that applies `spec` to every element later passed to `observe`.
fn watch(spec: &'static WatchSpec, logger: Logger) -> Result<IntersectionObserver, SiteError> {
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let classes = target.class_list();

                let result = match spec.decide(entry.is_intersecting()) {
                    EntryAction::Mark => classes.add_1(spec.marker_class),
                    EntryAction::Unmark => classes.remove_1(spec.marker_class),
                    EntryAction::MarkAndUnwatch => {
                        observer.unobserve(&target);
                        classes.add_1(spec.marker_class)
                    }
                    EntryAction::Ignore => Ok(()),
                };

                if let Err(error) = result {
                    logger.warn(
                        "marker_update_failed",
                        json!({
                            "class": spec.marker_class,
                            "error": SiteError::from(error).to_string(),
                        }),
                    );
                }
            }
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_root_margin(spec.root_margin);
    options.set_threshold(&JsValue::from_f64(0.0));

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

fn update_progress(section: &Element, progress: &HtmlElement) -> Result<(), SiteError> {
    let rect = section.get_bounding_client_rect();
    let (_, viewport_height) = viewport_size();
    let fraction = progress_fraction(rect.top(), rect.height(), viewport_height);

    progress
        .style()
        .set_property("height", &progress_height(fraction))?;
    Ok(())
}

fn progress_handler(
    section: Element,
    progress: HtmlElement,
    logger: Logger,
) -> impl FnMut(Event) + 'static {
    move |_| {
        if let Err(error) = update_progress(&section, &progress) {
            logger.warn("timeline_progress_failed", json!({ "error": error.to_string() }));
        }
    }
}

pub(super) fn install_timeline(logger: Logger) -> Result<(), SiteError> {
    let window = window().ok_or(SiteError::NoDocument)?;
    let section = element_by_id(&document()?, SECTION_ID)?;
    let progress = section
        .query_selector(PROGRESS_SELECTOR)?
        .ok_or(SiteError::MissingElement(PROGRESS_SELECTOR))?
        .dyn_into::<HtmlElement>()
        .map_err(|_| SiteError::UnexpectedElement(PROGRESS_SELECTOR))?;

    let observer = watch(&ACTIVE_ITEMS, logger)?;
    for item in elements(&section.query_selector_all(ITEM_SELECTOR)?) {
        observer.observe(&item);
    }

    listen_passive::<Event, _>(
        &window,
        "scroll",
        progress_handler(section.clone(), progress.clone(), logger),
    )?;
    listen::<Event, _>(
        &window,
        "resize",
        progress_handler(section.clone(), progress.clone(), logger),
    )?;

    update_progress(&section, &progress)
}

pub(super) fn install_fade_in(logger: Logger) -> Result<(), SiteError> {
    let observer = watch(&FADE_IN, logger)?;
    for element in elements(&document()?.query_selector_all(REVEAL_SELECTOR)?) {
        observer.observe(&element);
    }
    Ok(())
}
