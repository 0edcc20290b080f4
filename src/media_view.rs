use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use tilebox_core::{LabelPolicy, MediaElement, PlaybackControl, PlaybackRequest, TimelineSync};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Element, HtmlProgressElement, HtmlVideoElement, MouseEvent};

use crate::config::AppConfig;

pub const VIDEO_ID: &str = "mediaPlayer";
pub const PLAY_PAUSE_BUTTON_ID: &str = "playPauseButton";
pub const TIMELINE_ID: &str = "timelineProgress";

thread_local! {
    static MEDIA_VIEW: RefCell<Option<MediaView>> = RefCell::new(None);
}

/// `MediaElement` over a native `<video>`.
#[derive(Clone)]
pub struct VideoMedia {
    video: HtmlVideoElement,
}

impl VideoMedia {
    pub fn new(video: HtmlVideoElement) -> Self {
        Self { video }
    }
}

impl MediaElement for VideoMedia {
    fn paused(&self) -> bool {
        self.video.paused()
    }

    fn ended(&self) -> bool {
        self.video.ended()
    }

    fn play(&mut self) {
        match self.video.play() {
            Ok(promise) => {
                wasm_bindgen_futures::spawn_local(async move {
                    if let Err(err) = JsFuture::from(promise).await {
                        gloo::console::warn!("media: play request rejected", err);
                    }
                });
            }
            Err(err) => {
                gloo::console::warn!("media: play request failed", err);
            }
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.video.pause() {
            gloo::console::warn!("media: pause request failed", err);
        }
    }

    fn current_time(&self) -> f64 {
        self.video.current_time()
    }

    fn duration(&self) -> f64 {
        self.video.duration()
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.video.set_current_time(seconds);
    }
}

pub struct MediaState {
    pub media: VideoMedia,
    pub control: PlaybackControl,
    pub timeline: TimelineSync,
    button: Option<Element>,
    progress: Option<HtmlProgressElement>,
}

impl MediaState {
    pub fn new(
        media: VideoMedia,
        policy: LabelPolicy,
        button: Option<Element>,
        progress: Option<HtmlProgressElement>,
    ) -> Self {
        Self {
            media,
            control: PlaybackControl::new(policy),
            timeline: TimelineSync::new(),
            button,
            progress,
        }
    }

    pub fn play_pause(&mut self) -> PlaybackRequest {
        let request = self.control.play_pause(&mut self.media);
        // legacy buttons keep whatever text they had until the first pause
        if self.control.policy() == LabelPolicy::Resync || request == PlaybackRequest::Pause {
            self.write_label();
        }
        request
    }

    pub fn sync_label(&mut self) {
        if self.control.sync_label(&self.media) {
            self.write_label();
        }
    }

    pub fn time_update(&mut self) {
        if let Some(ratio) = self.timeline.on_time_update(&self.media) {
            self.write_progress(ratio);
        }
    }

    pub fn seek(&mut self, ratio: f64) {
        if let Some(ratio) = self.timeline.seek(&mut self.media, ratio) {
            self.write_progress(ratio);
        }
    }

    fn write_label(&self) {
        if let Some(button) = &self.button {
            let label = self.control.label();
            if button.text_content().as_deref() != Some(label) {
                button.set_text_content(Some(label));
            }
        }
    }

    fn write_progress(&self, ratio: f64) {
        if let Some(progress) = &self.progress {
            progress.set_value(ratio);
        }
    }
}

pub struct MediaView {
    state: Rc<RefCell<MediaState>>,
    _listeners: Vec<EventListener>,
}

impl MediaView {
    pub fn state(&self) -> &Rc<RefCell<MediaState>> {
        &self.state
    }
}

/// Takes over the page's video element: hides native controls and wires the
/// play/pause button and the timeline. Does nothing when the video is missing.
pub fn run(config: &AppConfig) {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        return;
    };
    let Some(video) = document
        .get_element_by_id(VIDEO_ID)
        .and_then(|element| element.dyn_into::<HtmlVideoElement>().ok())
    else {
        gloo::console::log!("media: no video element, skipping", VIDEO_ID);
        return;
    };
    let button = document.get_element_by_id(PLAY_PAUSE_BUTTON_ID);
    let progress = document
        .get_element_by_id(TIMELINE_ID)
        .and_then(|element| element.dyn_into::<HtmlProgressElement>().ok());
    if button.is_none() {
        gloo::console::warn!("media: no play/pause button", PLAY_PAUSE_BUTTON_ID);
    }
    if progress.is_none() {
        gloo::console::warn!("media: no timeline progress", TIMELINE_ID);
    }
    let view = mount(video, button, progress, config.label_policy);
    MEDIA_VIEW.with(|slot| {
        *slot.borrow_mut() = Some(view);
    });
}

pub fn mount(
    video: HtmlVideoElement,
    button: Option<Element>,
    progress: Option<HtmlProgressElement>,
    policy: LabelPolicy,
) -> MediaView {
    let _ = video.remove_attribute("controls");
    if let Some(progress) = &progress {
        progress.set_max(1.0);
    }
    let state = Rc::new(RefCell::new(MediaState::new(
        VideoMedia::new(video.clone()),
        policy,
        button.clone(),
        progress.clone(),
    )));
    if policy == LabelPolicy::Resync {
        let mut current = state.borrow_mut();
        let current = &mut *current;
        current.control.sync_label(&current.media);
        current.write_label();
    }
    let mut listeners = Vec::new();

    if let Some(button) = &button {
        let state = state.clone();
        listeners.push(EventListener::new(button, "click", move |_| {
            with_state(&state, |state| {
                state.play_pause();
            });
        }));
    }

    let on_time = state.clone();
    listeners.push(EventListener::new(&video, "timeupdate", move |_| {
        with_state(&on_time, MediaState::time_update);
    }));

    for event in ["play", "pause", "ended"] {
        let state = state.clone();
        listeners.push(EventListener::new(&video, event, move |_| {
            with_state(&state, MediaState::sync_label);
        }));
    }

    if let Some(progress) = &progress {
        let state = state.clone();
        let target = progress.clone();
        listeners.push(EventListener::new(progress, "click", move |event| {
            let Some(event) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let Some(ratio) = timeline_click_ratio(&target, event.client_x() as f64) else {
                return;
            };
            with_state(&state, |state| state.seek(ratio));
        }));
    }

    MediaView {
        state,
        _listeners: listeners,
    }
}

/// Horizontal position of `client_x` within the timeline, as a fraction of
/// its width. `None` while the timeline has no layout.
pub fn timeline_click_ratio(timeline: &Element, client_x: f64) -> Option<f64> {
    let rect = timeline.get_bounding_client_rect();
    if rect.width() <= 0.0 {
        return None;
    }
    Some((client_x - rect.left()) / rect.width())
}

fn with_state<F>(state: &Rc<RefCell<MediaState>>, action: F)
where
    F: FnOnce(&mut MediaState),
{
    let Ok(mut state) = state.try_borrow_mut() else {
        gloo::console::warn!("media: event dropped during dispatch");
        return;
    };
    action(&mut *state);
}
