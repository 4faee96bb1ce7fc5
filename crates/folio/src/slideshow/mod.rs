pub mod timer;

#[cfg(test)]
mod tests;

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use timer::{Scheduler, TimerId};

/// Which way the incoming slide enters from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Prev,
}

/// Whether a slide takes part in layout at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Hidden,
    Shown,
}

/// Animation class carried by a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlideClass {
    #[default]
    None,
    Entering(Direction),
    Active,
    Exiting,
}

/// Presentation attributes of one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlideState {
    pub display: Display,
    pub class: SlideClass,
}

impl SlideState {
    pub fn is_visible(&self) -> bool {
        self.display == Display::Shown
    }
}

/// Transition phase. Anything but `Idle` holds the latch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Target is displayed with its entering class; waiting for layout to settle.
    Entering {
        from: usize,
        to: usize,
        direction: Direction,
    },
    /// Classes swapped; waiting for the visual transition to finish.
    Active {
        from: usize,
        to: usize,
        direction: Direction,
    },
}

/// Deferred events the controller schedules on its own scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    Settle,
    Cleanup,
    AutoAdvance,
}

/// Input routed to a slideshow by its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideshowInput {
    ArrowLeft,
    ArrowRight,
    /// Zero-based position of the activated indicator.
    IndicatorActivated(usize),
    PointerEnter,
    PointerLeave,
}

/// Delays driving the transition cycle and autoplay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Delay between showing the incoming slide and swapping classes.
    #[serde(with = "millis", rename = "settle_ms")]
    pub settle: Duration,
    /// Length of the visual transition; cleanup runs after it.
    #[serde(with = "millis", rename = "transition_ms")]
    pub transition: Duration,
    /// Autoplay period.
    #[serde(with = "millis", rename = "interval_ms")]
    pub interval: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(50),
            transition: Duration::from_millis(600),
            interval: Duration::from_millis(5000),
        }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// One slideshow on a page: slide and indicator state, the transition
/// latch, and the autoplay timer.
pub struct Slideshow<S> {
    slides: Vec<SlideState>,
    indicators: Vec<bool>,
    current: usize,
    phase: Phase,
    auto_advance: Option<TimerId>,
    timing: Timing,
    scheduler: S,
}

impl<S: Scheduler<Tick>> Slideshow<S> {
    /// Mount a slideshow on discovered slides and indicators.
    ///
    /// The first slide starts shown and active. With no slides the
    /// controller stays inert and no timer is started.
    pub fn mount(
        slide_count: usize,
        indicator_count: usize,
        timing: Timing,
        scheduler: S,
    ) -> Self {
        let mut slides = vec![SlideState::default(); slide_count];
        let mut indicators = vec![false; indicator_count];
        if let Some(first) = slides.first_mut() {
            *first = SlideState {
                display: Display::Shown,
                class: SlideClass::Active,
            };
            if let Some(dot) = indicators.first_mut() {
                *dot = true;
            }
        }

        let mut show = Self {
            slides,
            indicators,
            current: 0,
            phase: Phase::Idle,
            auto_advance: None,
            timing,
            scheduler,
        };

        if show.slides.is_empty() {
            debug!("slideshow: no slides found, staying inert");
            return show;
        }

        show.start();
        debug!(
            slides = slide_count,
            indicators = indicator_count,
            "slideshow mounted"
        );
        show
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_transitioning(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn is_autoplaying(&self) -> bool {
        self.auto_advance.is_some_and(|id| self.scheduler.is_live(id))
    }

    pub fn slides(&self) -> &[SlideState] {
        &self.slides
    }

    pub fn indicators(&self) -> &[bool] {
        &self.indicators
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Start a transition towards `target`.
    ///
    /// Out-of-range targets wrap by a single step only: anything at or past
    /// the end becomes the first slide, anything negative the last one.
    pub fn go_to(&mut self, target: isize, direction: Direction) {
        if self.slides.is_empty() || self.is_transitioning() {
            return;
        }

        let len = self.slides.len();
        let to = if target >= len as isize {
            0
        } else if target < 0 {
            len - 1
        } else {
            target as usize
        };

        if to == self.current {
            return;
        }

        let from = self.current;
        self.slides[to] = SlideState {
            display: Display::Shown,
            class: SlideClass::Entering(direction),
        };
        self.phase = Phase::Entering {
            from,
            to,
            direction,
        };
        self.scheduler.schedule_once(self.timing.settle, Tick::Settle);
        trace!(from, to, ?direction, "slideshow: transition started");
    }

    /// Move by a single step; positive offsets go forward.
    pub fn advance(&mut self, offset: isize) {
        if self.is_transitioning() {
            return;
        }
        let direction = if offset > 0 {
            Direction::Next
        } else {
            Direction::Prev
        };
        self.go_to((self.current as isize).saturating_add(offset), direction);
    }

    /// Go to a slide by its one-based position, as indicator markup numbers them.
    pub fn jump_to(&mut self, one_based: isize) {
        if self.is_transitioning() {
            return;
        }
        let target = one_based.saturating_sub(1);
        let direction = if target > self.current as isize {
            Direction::Next
        } else {
            Direction::Prev
        };
        self.go_to(target, direction);
    }

    /// Start autoplay unless it is already running.
    pub fn start(&mut self) {
        if self.slides.is_empty() || self.is_autoplaying() {
            return;
        }
        let id = self
            .scheduler
            .schedule_repeating(self.timing.interval, Tick::AutoAdvance);
        self.auto_advance = Some(id);
    }

    /// Stop autoplay. Does nothing if it is not running.
    pub fn stop(&mut self) {
        if let Some(id) = self.auto_advance.take() {
            self.scheduler.cancel(id);
        }
    }

    pub fn handle(&mut self, input: SlideshowInput) {
        match input {
            SlideshowInput::ArrowLeft if !self.is_transitioning() => self.advance(-1),
            SlideshowInput::ArrowRight if !self.is_transitioning() => self.advance(1),
            SlideshowInput::ArrowLeft | SlideshowInput::ArrowRight => {}
            SlideshowInput::IndicatorActivated(position) => self.jump_to(position as isize + 1),
            SlideshowInput::PointerEnter => self.stop(),
            SlideshowInput::PointerLeave => self.start(),
        }
    }

    /// Run every deferred event due at or before `now`.
    pub fn run_until(&mut self, now: Duration) {
        while let Some(tick) = self.scheduler.pop_due(now) {
            self.on_tick(tick);
        }
    }

    fn on_tick(&mut self, tick: Tick) {
        match (tick, self.phase) {
            (
                Tick::Settle,
                Phase::Entering {
                    from,
                    to,
                    direction,
                },
            ) => {
                self.slides[from].class = SlideClass::Exiting;
                self.slides[to].class = SlideClass::Active;
                self.current = to;
                for (i, dot) in self.indicators.iter_mut().enumerate() {
                    *dot = i == to;
                }
                self.phase = Phase::Active {
                    from,
                    to,
                    direction,
                };
                self.scheduler
                    .schedule_once(self.timing.transition, Tick::Cleanup);
            }
            (Tick::Cleanup, Phase::Active { from, to, .. }) => {
                self.slides[from] = SlideState::default();
                if matches!(self.slides[to].class, SlideClass::Entering(_)) {
                    self.slides[to].class = SlideClass::Active;
                }
                self.phase = Phase::Idle;
                trace!(index = to, "slideshow: transition finished");
            }
            (Tick::AutoAdvance, _) => {
                if !self.is_transitioning() {
                    self.advance(1);
                }
            }
            (tick, phase) => debug!(?tick, ?phase, "slideshow: stray tick ignored"),
        }
    }
}
