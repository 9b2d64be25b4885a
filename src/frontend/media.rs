use std::rc::Rc;

use serde_json::json;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Element, Event, HtmlVideoElement};

use super::{document, elements, listen};
use crate::{
    error::SiteError,
    log::Logger,
    video::{
        playback_ended, toggle_playback, Player, OVERLAY_SELECTOR, PLAYING_CLASS, VIDEO_SELECTOR,
        WRAPPER_SELECTOR,
    },
};

/// A video with the wrapper that takes clicks.
struct VideoControl {
    video: HtmlVideoElement,
    wrapper: Element,
    logger: Logger,
}

impl VideoControl {
    fn register(element: Element, logger: Logger) -> Result<Self, SiteError> {
        let video = element
            .dyn_into::<HtmlVideoElement>()
            .map_err(|_| SiteError::UnexpectedElement(VIDEO_SELECTOR))?;
        let wrapper = video
            .closest(WRAPPER_SELECTOR)?
            .ok_or(SiteError::MissingElement(WRAPPER_SELECTOR))?;
        // The overlay is shown and hidden by CSS keyed on the `playing` class,
        // but a wrapper without one is still incomplete.
        if wrapper.query_selector(OVERLAY_SELECTOR)?.is_none() {
            return Err(SiteError::MissingElement(OVERLAY_SELECTOR));
        }

        Ok(Self {
            video,
            wrapper,
            logger,
        })
    }

    fn wire(self) -> Result<(), SiteError> {
        let control = Rc::new(self);

        let clicked = control.clone();
        listen(&control.wrapper, "click", move |_: Event| {
            toggle_playback(clicked.as_ref());
        })?;

        let finished = control.clone();
        listen(&control.video, "ended", move |_: Event| {
            playback_ended(finished.as_ref());
        })
    }
}

impl Player for VideoControl {
    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn play(&self) {
        let logger = self.logger;
        match self.video.play() {
            Ok(promise) => spawn_local(async move {
                if let Err(error) = JsFuture::from(promise).await {
                    logger.warn(
                        "video_play_rejected",
                        json!({ "error": SiteError::from(error).to_string() }),
                    );
                }
            }),
            Err(error) => logger.warn(
                "video_play_rejected",
                json!({ "error": SiteError::from(error).to_string() }),
            ),
        }
    }

    fn pause(&self) {
        if let Err(error) = self.video.pause() {
            self.logger.warn(
                "video_pause_failed",
                json!({ "error": SiteError::from(error).to_string() }),
            );
        }
    }

    fn set_playing_marker(&self, playing: bool) {
        if let Err(error) = self.video.class_list().toggle_with_force(PLAYING_CLASS, playing) {
            self.logger.warn(
                "video_marker_failed",
                json!({ "error": SiteError::from(error).to_string() }),
            );
        }
    }
}

/// Binds every video on the page; incomplete ones are skipped individually.
pub(super) fn install(logger: Logger) -> Result<(), SiteError> {
    let videos = document()?.query_selector_all(VIDEO_SELECTOR)?;
    let mut wired = 0;

    for (index, element) in elements(&videos).enumerate() {
        match VideoControl::register(element, logger).and_then(VideoControl::wire) {
            Ok(()) => wired += 1,
            Err(error) => logger.warn(
                "video_skipped",
                json!({ "index": index, "reason": error.to_string() }),
            ),
        }
    }

    logger.debug("video_controls_wired", json!({ "count": wired }));
    Ok(())
}
