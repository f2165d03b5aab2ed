#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

use hoverreel_config::{AudienceProfile, PreviewConfig};
use hoverreel_model::{
    CardGeometry, ContentId, ContentSummary, TrailerSource, Viewport,
};
use hoverreel_preview::{
    HoverRegion, MediaHandle, NavigationError, PlayTicket, PreviewCallbacks,
    PreviewEvent, PreviewSessionController, TileSurface, TimeProvider,
    VirtualTimeProvider,
};

#[derive(Debug, Clone, PartialEq)]
pub enum MediaCall {
    Play { muted: bool },
    Pause,
    Rewind,
    Mute(bool),
}

#[derive(Debug, Default)]
pub struct MediaLog {
    pub created: usize,
    pub calls: Vec<MediaCall>,
    pub tickets: Vec<PlayTicket>,
}

struct FakeMedia {
    log: Rc<RefCell<MediaLog>>,
}

impl MediaHandle for FakeMedia {
    fn begin_play(&mut self, ticket: PlayTicket, muted: bool) {
        let mut log = self.log.borrow_mut();
        log.calls.push(MediaCall::Play { muted });
        log.tickets.push(ticket);
    }

    fn pause(&mut self) {
        self.log.borrow_mut().calls.push(MediaCall::Pause);
    }

    fn rewind(&mut self) {
        self.log.borrow_mut().calls.push(MediaCall::Rewind);
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.borrow_mut().calls.push(MediaCall::Mute(muted));
    }
}

struct FakeSurface {
    card: CardGeometry,
    viewport: Rc<Cell<Viewport>>,
    log: Rc<RefCell<MediaLog>>,
}

impl TileSurface for FakeSurface {
    fn card_rect(&self) -> CardGeometry {
        self.card
    }

    fn viewport(&self) -> Viewport {
        self.viewport.get()
    }

    fn create_media(&self, _trailer: &TrailerSource) -> Box<dyn MediaHandle> {
        self.log.borrow_mut().created += 1;
        Box::new(FakeMedia {
            log: Rc::clone(&self.log),
        })
    }
}

pub const DESKTOP: Viewport = Viewport::new(1280.0, 800.0);
pub const CARD: CardGeometry = CardGeometry::new(400.0, 420.0, 180.0, 260.0);

pub fn id(raw: &str) -> ContentId {
    ContentId::new(raw).expect("valid id")
}

pub fn trailer_content() -> ContentSummary {
    ContentSummary::new(id("movie-42"), "The Long Hover")
        .with_primary_image("https://img.example/movie-42.jpg")
        .with_trailer("https://video.example/movie-42.mp4")
}

pub fn poster_only_content() -> ContentSummary {
    ContentSummary::new(id("movie-7"), "Stills")
        .with_primary_image("https://img.example/movie-7.jpg")
}

pub struct Harness {
    pub controller: PreviewSessionController,
    pub clock: VirtualTimeProvider,
    pub media: Rc<RefCell<MediaLog>>,
    pub viewport: Rc<Cell<Viewport>>,
    pub navigations: Rc<RefCell<Vec<ContentId>>>,
    pub details: Rc<RefCell<Vec<(ContentId, CardGeometry)>>>,
    pub fail_navigation: Rc<Cell<bool>>,
}

impl Harness {
    pub fn new(content: ContentSummary) -> Self {
        Self::with(content, PreviewConfig::default(), CARD, DESKTOP)
    }

    pub fn kids(content: ContentSummary) -> Self {
        Self::with(
            content,
            PreviewConfig::for_audience(AudienceProfile::Kids),
            CARD,
            DESKTOP,
        )
    }

    pub fn with(
        content: ContentSummary,
        config: PreviewConfig,
        card: CardGeometry,
        viewport: Viewport,
    ) -> Self {
        let media = Rc::new(RefCell::new(MediaLog::default()));
        let viewport = Rc::new(Cell::new(viewport));
        let navigations = Rc::new(RefCell::new(Vec::new()));
        let details = Rc::new(RefCell::new(Vec::new()));
        let fail_navigation = Rc::new(Cell::new(false));

        let callbacks = {
            let navigations = Rc::clone(&navigations);
            let details = Rc::clone(&details);
            let fail = Rc::clone(&fail_navigation);
            PreviewCallbacks::new(
                move |content_id: &ContentId| {
                    navigations.borrow_mut().push(content_id.clone());
                    if fail.get() {
                        return Err(NavigationError::Failed {
                            content_id: content_id.clone(),
                            message: "router unavailable".into(),
                        });
                    }
                    Ok(())
                },
                move |content: &ContentSummary, geometry: CardGeometry| {
                    details.borrow_mut().push((content.id.clone(), geometry));
                },
            )
        };

        let mut controller =
            PreviewSessionController::new(content, config, callbacks);
        controller.attach(Box::new(FakeSurface {
            card,
            viewport: Rc::clone(&viewport),
            log: Rc::clone(&media),
        }));

        Self {
            controller,
            clock: VirtualTimeProvider::new(),
            media,
            viewport,
            navigations,
            details,
            fail_navigation,
        }
    }

    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    pub fn at(&self, ms: u64) -> Instant {
        self.clock.origin() + Duration::from_millis(ms)
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    /// Fire every deadline up to `ms` after the origin, in order.
    pub fn try_run_until(&mut self, ms: u64) -> Result<(), NavigationError> {
        let target = self.at(ms);
        while let Some(deadline) = self.controller.next_deadline()
            && deadline <= target
        {
            let now = self.clock.advance_to(deadline);
            self.controller.poll(now)?;
        }
        let now = self.clock.advance_to(target);
        self.controller.poll(now)
    }

    pub fn run_until(&mut self, ms: u64) {
        self.try_run_until(ms).expect("navigation succeeds");
    }

    pub fn enter(&mut self, region: HoverRegion) {
        let now = self.now();
        self.controller.on_pointer_enter(region, now);
    }

    pub fn leave(&mut self, region: HoverRegion) {
        let now = self.now();
        self.controller.on_pointer_leave(region, now);
    }

    pub fn last_ticket(&self) -> PlayTicket {
        self.media
            .borrow()
            .tickets
            .last()
            .cloned()
            .expect("a play request was made")
    }

    pub fn media_calls(&self) -> Vec<MediaCall> {
        self.media.borrow().calls.clone()
    }

    pub fn events(&mut self) -> Vec<PreviewEvent> {
        self.controller.drain_events()
    }

    /// Hover the card until the trailer is playing. Returns the events.
    pub fn open_and_play(&mut self) -> Vec<PreviewEvent> {
        self.enter(HoverRegion::Card);
        self.run_until(self.elapsed_ms() + 1_250);
        let ticket = self.last_ticket();
        self.controller.on_play_settled(&ticket, Ok(()));
        self.events()
    }
}
