//! Hero video block: applies the controller's effects to the page.
//!
//! [`HeroController`] decides; this module only touches elements and feeds
//! the outcome of each background `play()` request back as an event.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::{EventListener, EventListenerOptions};
use vast_core::ClientSettings;
use vast_core::hero::{
    HeroController, HeroEffect, HeroEvent, is_control_tag, keydown_event, toggle_presentation,
};
use vast_core::scroll::ScrollHolder;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::{Document, Element, Event, HtmlElement, HtmlSourceElement, HtmlVideoElement, KeyboardEvent};

use crate::dom::{self, ids, selectors};

/// Elements of the hero block. Only the background video is required.
struct HeroElements {
    video: HtmlVideoElement,
    fallback: Option<HtmlElement>,
    toggle: Option<HtmlElement>,
    toggle_icon: Option<Element>,
    watch_full: Option<Element>,
    modal: Option<Element>,
    modal_video: Option<HtmlVideoElement>,
    modal_close: Option<HtmlElement>,
    backdrop: Option<Element>,
}

impl HeroElements {
    fn find(document: &Document) -> Option<Self> {
        let video = dom::by_id::<HtmlVideoElement>(document, ids::HERO_VIDEO)?;
        let toggle = dom::by_id::<HtmlElement>(document, ids::HERO_TOGGLE);
        let modal = document.get_element_by_id(ids::VIDEO_MODAL);
        Some(Self {
            fallback: dom::by_id(document, ids::AUTOPLAY_FALLBACK),
            toggle_icon: toggle
                .as_ref()
                .and_then(|t| dom::query(t, selectors::HERO_TOGGLE_ICON)),
            toggle,
            watch_full: document.get_element_by_id(ids::WATCH_FULL),
            backdrop: modal
                .as_ref()
                .and_then(|m| dom::query(m, selectors::MODAL_BACKDROP)),
            modal,
            modal_video: dom::by_id(document, ids::MODAL_VIDEO),
            modal_close: dom::by_id(document, ids::MODAL_CLOSE),
            video,
        })
    }

    fn modal_has_source(&self) -> bool {
        self.modal_video
            .as_ref()
            .is_some_and(|v| v.query_selector("source").ok().flatten().is_some())
    }
}

/// The mounted hero block.
pub struct Hero {
    document: Document,
    elements: HeroElements,
    controller: RefCell<HeroController>,
}

/// Mount the hero block and attempt muted autoplay.
pub fn install(document: &Document, settings: &ClientSettings) {
    let Some(elements) = HeroElements::find(document) else {
        return;
    };
    let controller = HeroController::new(settings.full_video_src.clone(), elements.modal_has_source());
    let hero = Rc::new(Hero {
        document: document.clone(),
        elements,
        controller: RefCell::new(controller),
    });
    hero.wire();
    hero.dispatch(HeroEvent::Init);
}

impl Hero {
    fn dispatch(self: &Rc<Self>, event: HeroEvent) {
        let effects = self.controller.borrow_mut().handle(event);
        for effect in effects {
            self.apply(effect);
        }
    }

    fn apply(self: &Rc<Self>, effect: HeroEffect) {
        let el = &self.elements;
        match effect {
            HeroEffect::PlayBackground => self.play_background(),
            HeroEffect::PauseBackground => {
                let _ = el.video.pause();
            }
            HeroEffect::ShowFallback => {
                if let Some(fallback) = &el.fallback {
                    fallback.set_hidden(false);
                }
            }
            HeroEffect::HideFallback => {
                if let Some(fallback) = &el.fallback {
                    fallback.set_hidden(true);
                }
            }
            HeroEffect::SetToggle { playing } => self.set_toggle(playing),
            HeroEffect::AppendModalSource { src } => {
                if let Err(e) = self.append_modal_source(&src) {
                    log::warn!("Failed to attach full video source: {e:?}");
                }
            }
            HeroEffect::OpenModal => {
                if let Some(modal) = &el.modal {
                    dom::set_aria_hidden(modal, false);
                }
            }
            HeroEffect::HideModal => {
                if let Some(modal) = &el.modal {
                    dom::set_aria_hidden(modal, true);
                }
            }
            HeroEffect::RewindModal => {
                if let Some(video) = &el.modal_video {
                    video.set_current_time(0.0);
                }
            }
            HeroEffect::PlayModal => {
                if let Some(video) = &el.modal_video {
                    play_and_forget(video);
                }
            }
            HeroEffect::PauseModal => {
                if let Some(video) = &el.modal_video {
                    let _ = video.pause();
                }
            }
            HeroEffect::LockScroll => dom::set_scroll_locked(&self.document, ScrollHolder::VideoModal, true),
            HeroEffect::ReleaseScroll => dom::set_scroll_locked(&self.document, ScrollHolder::VideoModal, false),
            HeroEffect::FocusModalClose => {
                if let Some(close) = &el.modal_close {
                    let _ = close.focus();
                }
            }
        }
    }

    /// Request muted inline playback; the outcome comes back as an event.
    fn play_background(self: &Rc<Self>) {
        let video = &self.elements.video;
        video.set_muted(true);
        let _ = video.set_attribute("playsinline", "");

        match video.play() {
            Ok(promise) => {
                let hero = Rc::clone(self);
                spawn_local(async move {
                    let event = match JsFuture::from(promise).await {
                        Ok(_) => HeroEvent::PlaybackStarted,
                        Err(e) => {
                            log::info!("Background playback rejected: {e:?}");
                            HeroEvent::PlaybackRejected
                        }
                    };
                    hero.dispatch(event);
                });
            }
            Err(e) => {
                log::info!("Background playback unavailable: {e:?}");
                self.dispatch(HeroEvent::PlaybackRejected);
            }
        }
    }

    fn set_toggle(&self, playing: bool) {
        let (icon, label) = toggle_presentation(playing);
        if let Some(toggle_icon) = &self.elements.toggle_icon {
            toggle_icon.set_text_content(Some(icon));
        }
        if let Some(toggle) = &self.elements.toggle {
            let _ = toggle.set_attribute("aria-label", label);
        }
    }

    fn append_modal_source(&self, src: &str) -> Result<(), JsValue> {
        let Some(video) = &self.elements.modal_video else {
            return Ok(());
        };
        let source = self
            .document
            .create_element("source")?
            .dyn_into::<HtmlSourceElement>()?;
        source.set_src(src);
        source.set_type("video/mp4");
        video.append_child(&source)?;
        video.load();
        Ok(())
    }

    fn wire(self: &Rc<Self>) {
        let el = &self.elements;

        if let Some(fallback) = &el.fallback {
            self.on(fallback, "click", |_| Some(HeroEvent::FallbackActivated));
        }
        if let Some(toggle) = &el.toggle {
            self.on(toggle, "click", |_| Some(HeroEvent::Toggle));
        }
        if let Some(watch_full) = &el.watch_full {
            self.on(watch_full, "click", |event| {
                event.prevent_default();
                Some(HeroEvent::WatchFull)
            });
        }
        if let Some(close) = &el.modal_close {
            self.on(close, "click", |_| Some(HeroEvent::CloseModal));
        }
        if let Some(backdrop) = &el.backdrop {
            self.on(backdrop, "click", |_| Some(HeroEvent::CloseModal));
        }

        let hero = Rc::clone(self);
        EventListener::new_with_options(
            &self.document,
            "keydown",
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                let modal_open = hero.controller.borrow().is_modal_open();
                let from_control = targets_control(event);
                if let Some(hero_event) = keydown_event(&keyboard.key(), modal_open, from_control) {
                    if hero_event == HeroEvent::Toggle {
                        // Space would otherwise scroll the page.
                        event.prevent_default();
                    }
                    hero.dispatch(hero_event);
                }
            },
        )
        .forget();
    }

    /// Map a DOM event on `target` to a controller event.
    fn on<F>(self: &Rc<Self>, target: &Element, event_type: &'static str, map: F)
    where
        F: Fn(&Event) -> Option<HeroEvent> + 'static,
    {
        let hero = Rc::clone(self);
        EventListener::new_with_options(
            target,
            event_type,
            EventListenerOptions::enable_prevent_default(),
            move |event| {
                if let Some(hero_event) = map(event) {
                    hero.dispatch(hero_event);
                }
            },
        )
        .forget();
    }
}

/// Keys pressed in form fields or on buttons belong to that control.
fn targets_control(event: &Event) -> bool {
    event
        .target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .is_some_and(|element| {
            is_control_tag(&element.tag_name()) || element.has_attribute("contenteditable")
        })
}

/// Start playback of the modal video; a rejection is only logged.
fn play_and_forget(video: &HtmlVideoElement) {
    if let Ok(promise) = video.play() {
        spawn_local(async move {
            if let Err(e) = JsFuture::from(promise).await {
                log::debug!("Modal playback rejected: {e:?}");
            }
        });
    }
}
