mod contact;
mod hero;
mod media;
mod scroll;

use rand::{rngs::SmallRng, SeedableRng};
use serde_json::json;
use wasm_bindgen::{closure::Closure, convert::FromWasmAbi, JsCast};
use web_sys::{
    window, AddEventListenerOptions, Document, Element, EventTarget, HtmlElement, NodeList,
    Storage,
};

use crate::{
    config::SiteConfig,
    error::SiteError,
    log::Logger,
    theme::{
        read_stored_theme, resolve_theme, toggle_theme, Theme, ThemeStore, DARK_CLASS, THEME_KEY,
    },
    typewriter::Typewriter,
};

const YEAR_ID: &str = "year";
const TOGGLE_ID: &str = "toggle-btn";
const LEGACY_TOGGLE_ID: &str = "lrm-mode-toggle";
const TYPER_SELECTOR: &str = ".mono-typer";

pub fn run() {
    console_error_panic_hook::set_once();

    let config = read_config();
    let logger = Logger::new(config.log_level);

    // Video controls bind as soon as the script runs, not on DOMContentLoaded.
    report(logger, "video_controls", media::install(logger));

    let on_ready = move || {
        report(logger, "year_stamp", stamp_year());
        report(logger, "theme_toggle", install_theme_toggle(logger));
        report(logger, "hero_canvas", hero::install(&config, logger));
        report(logger, "typewriter", install_typewriter(&config, logger));
        report(logger, "timeline", scroll::install_timeline(logger));
        report(logger, "fade_in", scroll::install_fade_in(logger));
        report(logger, "contact_confetti", contact::install(&config, logger));
    };

    if let Err(error) = when_document_ready(on_ready) {
        report(logger, "page", Err(error));
    }
}

fn report(logger: Logger, module: &str, result: Result<(), SiteError>) {
    match result {
        Ok(()) => logger.debug("module_ready", json!({ "module": module })),
        Err(error) if error.is_missing() => logger.debug(
            "module_skipped",
            json!({ "module": module, "reason": error.to_string() }),
        ),
        Err(error) => logger.warn(
            "module_failed",
            json!({ "module": module, "error": error.to_string() }),
        ),
    }
}

fn read_config() -> SiteConfig {
    let root = window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());

    match root {
        Some(root) => SiteConfig::from_lookup(|name| root.get_attribute(name)),
        None => SiteConfig::default(),
    }
}

fn when_document_ready<F>(callback: F) -> Result<(), SiteError>
where
    F: FnOnce() + 'static,
{
    let document = document()?;
    if document.ready_state() != "loading" {
        callback();
        return Ok(());
    }

    let callback = Closure::once_into_js(callback);
    document.add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())?;
    Ok(())
}

fn document() -> Result<Document, SiteError> {
    window()
        .and_then(|w| w.document())
        .ok_or(SiteError::NoDocument)
}

fn element_by_id(document: &Document, id: &'static str) -> Result<Element, SiteError> {
    document
        .get_element_by_id(id)
        .ok_or(SiteError::MissingElement(id))
}

fn elements(list: &NodeList) -> impl Iterator<Item = Element> + '_ {
    (0..list.length())
        .filter_map(|index| list.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
}

/// Attaches `handler` for the page's lifetime.
fn listen<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), SiteError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    target.add_event_listener_with_callback(event_type, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn listen_passive<E, F>(target: &EventTarget, event_type: &str, handler: F) -> Result<(), SiteError>
where
    E: FromWasmAbi + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(E)>::new(handler);
    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event_type,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

fn set_timeout<F>(delay_ms: u32, callback: F) -> Result<(), SiteError>
where
    F: FnOnce() + 'static,
{
    let window = window().ok_or(SiteError::NoDocument)?;
    let callback = Closure::once_into_js(callback);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        i32::try_from(delay_ms).unwrap_or(i32::MAX),
    )?;
    Ok(())
}

fn seeded_rng() -> SmallRng {
    let high = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    let low = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    SmallRng::seed_from_u64((high << 32) | low)
}

fn viewport_size() -> (f64, f64) {
    let Some(win) = window() else {
        return (1280.0, 720.0);
    };

    let width = win
        .inner_width()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(1280.0);
    let height = win
        .inner_height()
        .ok()
        .and_then(|value| value.as_f64())
        .unwrap_or(720.0);

    (width, height)
}

fn stamp_year() -> Result<(), SiteError> {
    let year = element_by_id(&document()?, YEAR_ID)?;
    year.set_text_content(Some(&js_sys::Date::new_0().get_full_year().to_string()));
    Ok(())
}

struct LocalThemeStore(Option<Storage>);

impl LocalThemeStore {
    fn open() -> Self {
        Self(window().and_then(|w| w.local_storage().ok().flatten()))
    }
}

impl ThemeStore for LocalThemeStore {
    fn load(&self) -> Option<String> {
        self.0.as_ref()?.get_item(THEME_KEY).ok().flatten()
    }

    fn save(&mut self, value: &str) {
        if let Some(storage) = self.0.as_ref() {
            let _ = storage.set_item(THEME_KEY, value);
        }
    }
}

fn system_prefers_dark() -> bool {
    window()
        .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
        .map(|mq| mq.matches())
        .unwrap_or(false)
}

fn applied_theme(body: &HtmlElement) -> Theme {
    Theme::from_dark_marker(body.class_list().contains(DARK_CLASS))
}

fn apply_theme(body: &HtmlElement, theme: Theme) -> Result<(), SiteError> {
    body.class_list()
        .toggle_with_force(DARK_CLASS, theme.is_dark())?;
    Ok(())
}

fn install_theme_toggle(logger: Logger) -> Result<(), SiteError> {
    let document = document()?;
    let toggle = element_by_id(&document, TOGGLE_ID)?;
    let body = document.body().ok_or(SiteError::MissingElement("body"))?;

    let mut store = LocalThemeStore::open();
    apply_theme(
        &body,
        resolve_theme(read_stored_theme(&store), system_prefers_dark()),
    )?;

    listen(&toggle, "click", move |_: web_sys::Event| {
        let next = toggle_theme(applied_theme(&body), &mut store);
        match apply_theme(&body, next) {
            Ok(()) => logger.debug("theme_changed", json!({ "theme": next })),
            Err(error) => logger.warn(
                "theme_apply_failed",
                json!({ "theme": next, "error": error.to_string() }),
            ),
        }
    })?;

    hide_legacy_toggle(&document)
}

/// The standalone timeline toggle predates the global one and stays hidden.
fn hide_legacy_toggle(document: &Document) -> Result<(), SiteError> {
    let container = document
        .get_element_by_id(LEGACY_TOGGLE_ID)
        .and_then(|legacy| legacy.parent_element())
        .and_then(|parent| parent.dyn_into::<HtmlElement>().ok());

    if let Some(container) = container {
        container.style().set_property("display", "none")?;
    }
    Ok(())
}

fn install_typewriter(config: &SiteConfig, logger: Logger) -> Result<(), SiteError> {
    let element = document()?
        .query_selector(TYPER_SELECTOR)?
        .ok_or(SiteError::MissingElement(TYPER_SELECTOR))?;

    let typer = Typewriter::from_source(element.get_attribute("data-text"), element.text_content());
    element.set_text_content(Some(""));

    let speed_ms = config.typewriter_speed_ms;
    set_timeout(config.typewriter_delay_ms, move || {
        type_next(element, typer, speed_ms, logger)
    })
}

fn type_next(element: Element, mut typer: Typewriter, speed_ms: u32, logger: Logger) {
    if typer.step().is_none() {
        return;
    }
    element.set_text_content(Some(&typer.visible()));

    if typer.is_done() {
        return;
    }

    if let Err(error) = set_timeout(speed_ms, move || type_next(element, typer, speed_ms, logger)) {
        logger.warn("typewriter_stalled", json!({ "error": error.to_string() }));
    }
}
