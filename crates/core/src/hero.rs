//! Hero media controller.
//!
//! A state machine for the hero's muted background video, its autoplay
//! fallback control, the play/pause toggle, and the full-video modal.
//!
//! The controller never touches media elements. Each [`HeroEvent`] returns
//! the [`HeroEffect`]s the browser layer must apply, in order. Results of
//! asynchronous playback requests come back as `PlaybackStarted` or
//! `PlaybackRejected`.
//!
//! ```text
//!             Init                 PlaybackRejected
//!  Starting ─────────► (request) ─────────────────► AutoplayFailed
//!     │ PlaybackStarted                                 │ FallbackActivated / Toggle
//!     ▼                                                 ▼
//!  Autoplaying ◄──────── Toggle ──────────────────── Paused / Starting
//!     │ WatchFull                 CloseModal (resume if it was playing)
//!     ▼                              ▲
//!  ModalOpen ────────────────────────┘
//! ```

/// Externally visible controller state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroState {
    /// A playback request for the background video is in flight.
    Starting,
    Autoplaying,
    /// Playback was refused; the fallback control is visible.
    AutoplayFailed,
    /// Paused by the user.
    Paused,
    ModalOpen,
}

/// Input to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeroEvent {
    /// Page ready: attempt muted autoplay.
    Init,
    /// The last background playback request succeeded.
    PlaybackStarted,
    /// The last background playback request was rejected.
    PlaybackRejected,
    /// The autoplay fallback control was activated.
    FallbackActivated,
    /// Toggle control or keyboard shortcut.
    Toggle,
    /// "Watch full video" activation.
    WatchFull,
    /// Close control, backdrop click, or Escape.
    CloseModal,
}

/// Side effect requested by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeroEffect {
    /// Request muted, inline playback of the background video.
    PlayBackground,
    PauseBackground,
    ShowFallback,
    HideFallback,
    /// Update the toggle's icon and accessible label.
    SetToggle { playing: bool },
    /// Append the full-resolution source to the modal video and load it.
    AppendModalSource { src: String },
    OpenModal,
    HideModal,
    /// Rewind the modal video to position zero.
    RewindModal,
    PlayModal,
    PauseModal,
    LockScroll,
    ReleaseScroll,
    FocusModalClose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    Starting,
    Playing,
    Blocked,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ModalSession {
    resume_background: bool,
}

/// Hero media controller.
#[derive(Debug, Clone)]
pub struct HeroController {
    playback: Playback,
    modal: Option<ModalSession>,
    modal_source_loaded: bool,
    fallback_armed: bool,
    full_video_src: String,
}

impl HeroController {
    /// Create a controller.
    ///
    /// `modal_has_source` reports whether the modal video already carries a
    /// source element, so it is never appended twice.
    #[must_use]
    pub fn new(full_video_src: impl Into<String>, modal_has_source: bool) -> Self {
        Self {
            playback: Playback::Starting,
            modal: None,
            modal_source_loaded: modal_has_source,
            fallback_armed: false,
            full_video_src: full_video_src.into(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> HeroState {
        if self.modal.is_some() {
            return HeroState::ModalOpen;
        }
        match self.playback {
            Playback::Starting => HeroState::Starting,
            Playback::Playing => HeroState::Autoplaying,
            Playback::Blocked => HeroState::AutoplayFailed,
            Playback::Paused => HeroState::Paused,
        }
    }

    #[must_use]
    pub const fn is_modal_open(&self) -> bool {
        self.modal.is_some()
    }

    /// Apply an event and return the effects to perform.
    pub fn handle(&mut self, event: HeroEvent) -> Vec<HeroEffect> {
        match event {
            HeroEvent::Init => self.request_play(),
            HeroEvent::PlaybackStarted => self.on_started(),
            HeroEvent::PlaybackRejected => self.on_rejected(),
            HeroEvent::FallbackActivated => self.on_fallback(),
            HeroEvent::Toggle => self.on_toggle(),
            HeroEvent::WatchFull => self.on_watch_full(),
            HeroEvent::CloseModal => self.on_close_modal(),
        }
    }

    fn request_play(&mut self) -> Vec<HeroEffect> {
        self.playback = Playback::Starting;
        vec![HeroEffect::PlayBackground]
    }

    fn on_started(&mut self) -> Vec<HeroEffect> {
        if self.modal.is_some() {
            // Started underneath the modal: keep it quiet until close.
            self.playback = Playback::Paused;
            return vec![HeroEffect::PauseBackground];
        }
        self.playback = Playback::Playing;
        self.fallback_armed = false;
        vec![HeroEffect::HideFallback, HeroEffect::SetToggle { playing: true }]
    }

    fn on_rejected(&mut self) -> Vec<HeroEffect> {
        self.playback = Playback::Blocked;
        self.fallback_armed = true;
        vec![HeroEffect::ShowFallback, HeroEffect::SetToggle { playing: false }]
    }

    fn on_fallback(&mut self) -> Vec<HeroEffect> {
        if self.playback != Playback::Blocked || !self.fallback_armed || self.modal.is_some() {
            return Vec::new();
        }
        self.fallback_armed = false;
        self.request_play()
    }

    fn on_toggle(&mut self) -> Vec<HeroEffect> {
        if self.modal.is_some() {
            return Vec::new();
        }
        match self.playback {
            Playback::Playing => {
                self.playback = Playback::Paused;
                vec![HeroEffect::PauseBackground, HeroEffect::SetToggle { playing: false }]
            }
            Playback::Paused | Playback::Blocked => {
                self.fallback_armed = false;
                self.request_play()
            }
            Playback::Starting => Vec::new(),
        }
    }

    fn on_watch_full(&mut self) -> Vec<HeroEffect> {
        if self.modal.is_some() {
            return Vec::new();
        }
        let mut effects = Vec::with_capacity(7);
        if !self.modal_source_loaded {
            self.modal_source_loaded = true;
            effects.push(HeroEffect::AppendModalSource {
                src: self.full_video_src.clone(),
            });
        }

        let was_playing = self.playback == Playback::Playing;
        if was_playing {
            self.playback = Playback::Paused;
        }
        self.modal = Some(ModalSession {
            resume_background: was_playing,
        });

        effects.extend([
            HeroEffect::PauseBackground,
            HeroEffect::OpenModal,
            HeroEffect::LockScroll,
            HeroEffect::RewindModal,
            HeroEffect::PlayModal,
            HeroEffect::FocusModalClose,
        ]);
        effects
    }

    fn on_close_modal(&mut self) -> Vec<HeroEffect> {
        let Some(session) = self.modal.take() else {
            return Vec::new();
        };
        let mut effects = vec![
            HeroEffect::PauseModal,
            HeroEffect::HideModal,
            HeroEffect::ReleaseScroll,
        ];
        if session.resume_background {
            effects.extend(self.request_play());
        }
        effects
    }
}

/// Map a keyboard `key` value to a controller event.
///
/// Space and "k" toggle playback while no modal is open; Escape closes an
/// open modal.
#[must_use]
pub fn key_event(key: &str, modal_open: bool) -> Option<HeroEvent> {
    match key {
        " " | "Spacebar" | "k" | "K" if !modal_open => Some(HeroEvent::Toggle),
        "Escape" | "Esc" if modal_open => Some(HeroEvent::CloseModal),
        _ => None,
    }
}

/// Whether an element with this tag name handles keys itself.
#[must_use]
pub fn is_control_tag(tag: &str) -> bool {
    ["input", "textarea", "select", "button"]
        .iter()
        .any(|control| tag.eq_ignore_ascii_case(control))
}

/// Map a document keydown to a controller event.
///
/// `from_control` is set when the key was pressed in a form field, on a
/// button, or in editable content. Such controls keep the toggle keys, but
/// Escape still closes the modal, whose close button holds focus while open.
#[must_use]
pub fn keydown_event(key: &str, modal_open: bool, from_control: bool) -> Option<HeroEvent> {
    match key_event(key, modal_open) {
        Some(HeroEvent::Toggle) if from_control => None,
        other => other,
    }
}

/// Icon and accessible label for the toggle control.
#[must_use]
pub const fn toggle_presentation(playing: bool) -> (&'static str, &'static str) {
    if playing {
        ("❚❚", "Pause background video")
    } else {
        ("▶", "Play background video")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SRC: &str = "/static/video/hero-full-1080.mp4";

    fn playing_controller() -> HeroController {
        let mut hero = HeroController::new(SRC, false);
        hero.handle(HeroEvent::Init);
        hero.handle(HeroEvent::PlaybackStarted);
        hero
    }

    #[test]
    fn test_init_requests_playback() {
        let mut hero = HeroController::new(SRC, false);
        assert_eq!(hero.handle(HeroEvent::Init), vec![HeroEffect::PlayBackground]);
        assert_eq!(hero.state(), HeroState::Starting);
    }

    #[test]
    fn test_autoplay_success() {
        let hero = playing_controller();
        assert_eq!(hero.state(), HeroState::Autoplaying);
    }

    #[test]
    fn test_autoplay_rejected_shows_fallback_and_retries() {
        let mut hero = HeroController::new(SRC, false);
        hero.handle(HeroEvent::Init);
        let effects = hero.handle(HeroEvent::PlaybackRejected);
        assert!(effects.contains(&HeroEffect::ShowFallback));
        assert_eq!(hero.state(), HeroState::AutoplayFailed);

        assert_eq!(
            hero.handle(HeroEvent::FallbackActivated),
            vec![HeroEffect::PlayBackground]
        );
        // Fallback is single-shot until the next rejection
        assert!(hero.handle(HeroEvent::FallbackActivated).is_empty());

        let effects = hero.handle(HeroEvent::PlaybackStarted);
        assert!(effects.contains(&HeroEffect::HideFallback));
        assert_eq!(hero.state(), HeroState::Autoplaying);
    }

    #[test]
    fn test_toggle_flips_playback() {
        let mut hero = playing_controller();
        assert_eq!(
            hero.handle(HeroEvent::Toggle),
            vec![HeroEffect::PauseBackground, HeroEffect::SetToggle { playing: false }]
        );
        assert_eq!(hero.state(), HeroState::Paused);
        assert_eq!(hero.handle(HeroEvent::Toggle), vec![HeroEffect::PlayBackground]);
        hero.handle(HeroEvent::PlaybackStarted);
        assert_eq!(hero.state(), HeroState::Autoplaying);
    }

    #[test]
    fn test_toggle_ignored_while_request_in_flight() {
        let mut hero = HeroController::new(SRC, false);
        hero.handle(HeroEvent::Init);
        assert!(hero.handle(HeroEvent::Toggle).is_empty());
    }

    #[test]
    fn test_watch_full_sequence() {
        let mut hero = playing_controller();
        let effects = hero.handle(HeroEvent::WatchFull);
        assert_eq!(
            effects,
            vec![
                HeroEffect::AppendModalSource { src: SRC.to_string() },
                HeroEffect::PauseBackground,
                HeroEffect::OpenModal,
                HeroEffect::LockScroll,
                HeroEffect::RewindModal,
                HeroEffect::PlayModal,
                HeroEffect::FocusModalClose,
            ]
        );
        assert_eq!(hero.state(), HeroState::ModalOpen);
    }

    #[test]
    fn test_modal_source_appended_at_most_once() {
        let mut hero = playing_controller();
        let mut appended = 0;
        for _ in 0..3 {
            appended += hero
                .handle(HeroEvent::WatchFull)
                .iter()
                .filter(|e| matches!(e, HeroEffect::AppendModalSource { .. }))
                .count();
            hero.handle(HeroEvent::CloseModal);
        }
        assert_eq!(appended, 1);
    }

    #[test]
    fn test_existing_modal_source_is_respected() {
        let mut hero = HeroController::new(SRC, true);
        let effects = hero.handle(HeroEvent::WatchFull);
        assert!(!effects.iter().any(|e| matches!(e, HeroEffect::AppendModalSource { .. })));
    }

    #[test]
    fn test_close_resumes_only_if_playing_before() {
        let mut hero = playing_controller();
        hero.handle(HeroEvent::WatchFull);
        let effects = hero.handle(HeroEvent::CloseModal);
        assert_eq!(
            effects,
            vec![
                HeroEffect::PauseModal,
                HeroEffect::HideModal,
                HeroEffect::ReleaseScroll,
                HeroEffect::PlayBackground,
            ]
        );

        let mut paused = playing_controller();
        paused.handle(HeroEvent::Toggle);
        paused.handle(HeroEvent::WatchFull);
        let effects = paused.handle(HeroEvent::CloseModal);
        assert!(!effects.contains(&HeroEffect::PlayBackground));
        assert_eq!(paused.state(), HeroState::Paused);
    }

    #[test]
    fn test_toggle_ignored_while_modal_open() {
        let mut hero = playing_controller();
        hero.handle(HeroEvent::WatchFull);
        assert!(hero.handle(HeroEvent::Toggle).is_empty());
        assert!(hero.handle(HeroEvent::WatchFull).is_empty());
    }

    #[test]
    fn test_close_without_modal_is_noop() {
        let mut hero = playing_controller();
        assert!(hero.handle(HeroEvent::CloseModal).is_empty());
    }

    #[test]
    fn test_late_start_under_modal_is_paused() {
        let mut hero = HeroController::new(SRC, false);
        hero.handle(HeroEvent::Init);
        hero.handle(HeroEvent::WatchFull);
        assert_eq!(
            hero.handle(HeroEvent::PlaybackStarted),
            vec![HeroEffect::PauseBackground]
        );
        let effects = hero.handle(HeroEvent::CloseModal);
        assert!(!effects.contains(&HeroEffect::PlayBackground));
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(key_event(" ", false), Some(HeroEvent::Toggle));
        assert_eq!(key_event("k", false), Some(HeroEvent::Toggle));
        assert_eq!(key_event("k", true), None);
        assert_eq!(key_event("Escape", true), Some(HeroEvent::CloseModal));
        assert_eq!(key_event("Escape", false), None);
        assert_eq!(key_event("x", false), None);
    }

    #[test]
    fn test_escape_from_focused_close_button_closes_modal() {
        let mut hero = HeroController::new(SRC, false);
        hero.handle(HeroEvent::Init);
        hero.handle(HeroEvent::PlaybackStarted);
        let effects = hero.handle(HeroEvent::WatchFull);
        assert!(effects.contains(&HeroEffect::FocusModalClose));

        // Focus now sits on the modal's close <button>
        let from_control = is_control_tag("BUTTON");
        assert!(from_control);
        let event = keydown_event("Escape", hero.is_modal_open(), from_control);
        assert_eq!(event, Some(HeroEvent::CloseModal));

        let effects = hero.handle(HeroEvent::CloseModal);
        assert!(effects.contains(&HeroEffect::HideModal));
        assert!(!hero.is_modal_open());
    }

    #[test]
    fn test_toggle_keys_stay_with_controls() {
        assert_eq!(keydown_event(" ", false, true), None);
        assert_eq!(keydown_event("k", false, true), None);
        assert_eq!(keydown_event(" ", false, false), Some(HeroEvent::Toggle));
        assert_eq!(keydown_event("Escape", true, true), Some(HeroEvent::CloseModal));
    }

    #[test]
    fn test_control_tags() {
        for tag in ["INPUT", "textarea", "Select", "BUTTON"] {
            assert!(is_control_tag(tag));
        }
        assert!(!is_control_tag("DIV"));
        assert!(!is_control_tag("VIDEO"));
    }

    #[test]
    fn test_toggle_presentation() {
        assert_eq!(toggle_presentation(true).1, "Pause background video");
        assert_eq!(toggle_presentation(false).1, "Play background video");
    }
}
