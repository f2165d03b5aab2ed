//! Scripted scenario replay on a virtual clock.
//!
//! A [`Scenario`] fixes the card, the viewport and the content, then lists
//! timed user and platform actions. [`replay`] drives a controller through
//! them, jumping the clock to every timer deadline in between, and returns
//! every [`PreviewEvent`] with the virtual time it happened at.

use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, bail};
use hoverreel_config::{AudienceProfile, PreviewConfig};
use hoverreel_model::{
    CardGeometry, ContentId, ContentSummary, PreferenceSnapshot,
    TrailerSource, Viewport,
};
use serde::{Deserialize, Serialize};

use crate::clock::{TimeProvider, VirtualTimeProvider};
use crate::collaborators::{PreviewCallbacks, TileSurface};
use crate::error::MediaError;
use crate::hover_intent::HoverRegion;
use crate::media_preview::{MediaHandle, PlayTicket};
use crate::session::{PreviewEvent, PreviewSessionController, PreviewView};
use crate::testing::InMemoryPreferenceService;

/// Timers a single step may fire before the replay gives up.
const MAX_TICKS_PER_STEP: usize = 1_000;
/// How long the clock keeps running after the last step.
const DEFAULT_TAIL_MS: u64 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepAction {
    EnterCard,
    LeaveCard,
    EnterOverlay,
    LeaveOverlay,
    Activate,
    Details,
    PlayResolved,
    PlayRejected,
    TrailerEnded,
    MediaError,
    ToggleMute,
    ToggleLike,
    ToggleWatchlist,
    Resize,
    Detach,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ScenarioStep {
    pub at_ms: u64,
    pub action: StepAction,
    /// Failure text for `play_rejected` and `media_error`.
    #[serde(default)]
    pub reason: Option<String>,
    /// New viewport for `resize`.
    #[serde(default)]
    pub viewport: Option<Viewport>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Scenario {
    pub viewport: Viewport,
    pub card: CardGeometry,
    pub content: ContentSummary,
    /// Overrides the audience from the loaded configuration.
    #[serde(default)]
    pub audience: Option<AudienceProfile>,
    /// Preference state the in-memory backend starts with.
    #[serde(default)]
    pub preferences: Option<PreferenceSnapshot>,
    /// Keep running timers this long after the last step.
    #[serde(default)]
    pub tail_ms: Option<u64>,
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&raw)
            .with_context(|| format!("parsing scenario {}", path.display()))
    }

    /// TOML first, then JSON.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let scenario: Scenario = match toml::from_str(raw) {
            Ok(scenario) => scenario,
            Err(toml_err) => serde_json::from_str(raw).map_err(|json_err| {
                anyhow::anyhow!(
                    "not valid TOML ({toml_err}) or JSON ({json_err})"
                )
            })?,
        };
        scenario.content.validate().context("invalid scenario content")?;
        Ok(scenario)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedEvent {
    pub at_ms: u64,
    #[serde(flatten)]
    pub event: PreviewEvent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayReport {
    pub events: Vec<TimedEvent>,
    pub navigations: Vec<ContentId>,
    pub details_requests: usize,
    pub final_view: PreviewView,
}

impl ReplayReport {
    pub fn count(&self, matches: impl Fn(&PreviewEvent) -> bool) -> usize {
        self.events.iter().filter(|timed| matches(&timed.event)).count()
    }
}

/// Play tickets handed to the scripted media, newest last.
#[derive(Debug, Default)]
struct MediaScript {
    tickets: Vec<PlayTicket>,
}

struct ScriptedMedia {
    script: Rc<RefCell<MediaScript>>,
}

impl MediaHandle for ScriptedMedia {
    fn begin_play(&mut self, ticket: PlayTicket, muted: bool) {
        log::trace!("scripted play (muted: {muted})");
        self.script.borrow_mut().tickets.push(ticket);
    }

    fn pause(&mut self) {
        log::trace!("scripted pause");
    }

    fn rewind(&mut self) {}

    fn set_muted(&mut self, muted: bool) {
        log::trace!("scripted mute: {muted}");
    }
}

struct ScriptedSurface {
    card: CardGeometry,
    viewport: Rc<RefCell<Viewport>>,
    script: Rc<RefCell<MediaScript>>,
}

impl TileSurface for ScriptedSurface {
    fn card_rect(&self) -> CardGeometry {
        self.card
    }

    fn viewport(&self) -> Viewport {
        *self.viewport.borrow()
    }

    fn create_media(&self, trailer: &TrailerSource) -> Box<dyn MediaHandle> {
        log::debug!("creating scripted media for {}", trailer.url);
        Box::new(ScriptedMedia {
            script: Rc::clone(&self.script),
        })
    }
}

struct Replayer {
    clock: VirtualTimeProvider,
    controller: PreviewSessionController,
    service: InMemoryPreferenceService,
    script: Rc<RefCell<MediaScript>>,
    viewport: Rc<RefCell<Viewport>>,
    events: Vec<TimedEvent>,
}

impl Replayer {
    fn now(&self) -> Instant {
        self.clock.now()
    }

    fn at_ms(&self) -> u64 {
        self.clock.elapsed().as_millis() as u64
    }

    async fn tick(&mut self) {
        let now = self.now();
        if let Err(err) = self.controller.poll(now) {
            // Already recorded as an event; the replay carries on.
            log::warn!("navigation failed during replay: {err}");
        }
        self.settle_preferences().await;
        self.collect();
    }

    async fn settle_preferences(&mut self) {
        for request in self.controller.take_preference_requests() {
            let outcome = request.run(&self.service).await;
            self.controller.apply_preference_outcome(outcome);
        }
    }

    fn collect(&mut self) {
        let at_ms = self.at_ms();
        self.events.extend(
            self.controller
                .drain_events()
                .into_iter()
                .map(|event| TimedEvent { at_ms, event }),
        );
    }

    /// Fire every timer due up to `until`, in deadline order.
    async fn run_timers_until(&mut self, until: Instant) -> anyhow::Result<()> {
        let mut ticks = 0;
        while let Some(deadline) = self.controller.next_deadline()
            && deadline <= until
        {
            ticks += 1;
            if ticks > MAX_TICKS_PER_STEP {
                bail!("timers kept firing at {}ms", self.at_ms());
            }
            self.clock.advance_to(deadline);
            self.tick().await;
        }
        self.clock.advance_to(until);
        Ok(())
    }

    async fn apply(&mut self, step: &ScenarioStep) -> anyhow::Result<()> {
        let now = self.now();
        let controller = &mut self.controller;
        match step.action {
            StepAction::EnterCard => {
                controller.on_pointer_enter(HoverRegion::Card, now)
            }
            StepAction::LeaveCard => {
                controller.on_pointer_leave(HoverRegion::Card, now)
            }
            StepAction::EnterOverlay => {
                controller.on_pointer_enter(HoverRegion::Overlay, now)
            }
            StepAction::LeaveOverlay => {
                controller.on_pointer_leave(HoverRegion::Overlay, now)
            }
            StepAction::Activate => {
                controller.on_activate(now);
            }
            StepAction::Details => {
                controller.on_request_details();
            }
            StepAction::PlayResolved | StepAction::PlayRejected => {
                let ticket = self.script.borrow().tickets.last().cloned();
                let Some(ticket) = ticket else {
                    bail!(
                        "{:?} at {}ms with no play request",
                        step.action,
                        step.at_ms
                    );
                };
                let result = if step.action == StepAction::PlayResolved {
                    Ok(())
                } else {
                    Err(MediaError::AutoplayRejected(
                        step.reason.clone().unwrap_or_else(|| {
                            "NotAllowedError".to_string()
                        }),
                    ))
                };
                controller.on_play_settled(&ticket, result);
            }
            StepAction::TrailerEnded => controller.on_trailer_ended(now),
            StepAction::MediaError => {
                controller.on_media_error(MediaError::Decode(
                    step.reason
                        .clone()
                        .unwrap_or_else(|| "decode failure".to_string()),
                ));
            }
            StepAction::ToggleMute => {
                controller.toggle_mute();
            }
            StepAction::ToggleLike => {
                if let Some(request) = controller.request_like_toggle() {
                    let outcome = request.run(&self.service).await;
                    controller.apply_preference_outcome(outcome);
                }
            }
            StepAction::ToggleWatchlist => {
                if let Some(request) = controller.request_watchlist_toggle() {
                    let outcome = request.run(&self.service).await;
                    controller.apply_preference_outcome(outcome);
                }
            }
            StepAction::Resize => {
                let Some(viewport) = step.viewport else {
                    bail!("resize at {}ms without a viewport", step.at_ms);
                };
                *self.viewport.borrow_mut() = viewport;
                controller.on_viewport_resized(viewport);
            }
            StepAction::Detach => controller.detach(),
        }
        self.tick().await;
        Ok(())
    }
}

/// Run `scenario` against `config` and report what happened.
pub async fn replay(
    scenario: &Scenario,
    mut config: PreviewConfig,
) -> anyhow::Result<ReplayReport> {
    if let Some(audience) = scenario.audience {
        config.audience = audience;
    }
    config.validate().context("invalid preview configuration")?;

    let navigations = Rc::new(RefCell::new(Vec::new()));
    let details = Rc::new(RefCell::new(0usize));
    let callbacks = {
        let navigations = Rc::clone(&navigations);
        let details = Rc::clone(&details);
        PreviewCallbacks::new(
            move |id: &ContentId| {
                navigations.borrow_mut().push(id.clone());
                Ok(())
            },
            move |_: &ContentSummary, _: CardGeometry| {
                *details.borrow_mut() += 1;
            },
        )
    };

    let service = InMemoryPreferenceService::new().with_snapshot(
        scenario.content.id.clone(),
        scenario.preferences.unwrap_or_default(),
    );
    let script = Rc::new(RefCell::new(MediaScript::default()));
    let viewport = Rc::new(RefCell::new(scenario.viewport));

    let mut controller = PreviewSessionController::new(
        scenario.content.clone(),
        config,
        callbacks,
    );
    controller.attach(Box::new(ScriptedSurface {
        card: scenario.card,
        viewport: Rc::clone(&viewport),
        script: Rc::clone(&script),
    }));

    let clock = VirtualTimeProvider::new();
    let origin = clock.origin();
    let mut replayer = Replayer {
        clock,
        controller,
        service,
        script,
        viewport,
        events: Vec::new(),
    };

    let mut steps = scenario.steps.clone();
    steps.sort_by_key(|step| step.at_ms);

    for step in &steps {
        let step_at = origin + Duration::from_millis(step.at_ms);
        replayer.run_timers_until(step_at).await?;
        log::debug!("step {:?} at {}ms", step.action, step.at_ms);
        replayer.apply(step).await?;
    }

    let last_ms = steps.last().map_or(0, |step| step.at_ms);
    let tail = scenario.tail_ms.unwrap_or(DEFAULT_TAIL_MS);
    replayer
        .run_timers_until(origin + Duration::from_millis(last_ms + tail))
        .await?;

    let final_view = replayer.controller.view(replayer.now());
    let navigations = navigations.borrow().clone();
    let details_requests = *details.borrow();
    Ok(ReplayReport {
        events: replayer.events,
        navigations,
        details_requests,
        final_view,
    })
}
