//! Scroll-triggered fly-in for keypoint lists and hero text.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::slideshow::timer::Scheduler;

pub type TargetId = usize;

/// What an observed element is; decides how its fly-in is staged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    /// A list whose items fly in one after another.
    Keypoints { items: usize },
    /// A single block of hero text.
    HeroText,
}

/// Vertical placement of an element relative to the top of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub top: f32,
    pub height: f32,
}

/// How visibility is decided.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "mode")]
pub enum Strategy {
    /// Trigger once `threshold` of the element is inside the viewport,
    /// with the viewport's bottom edge pulled up by `bottom_margin`.
    Intersection { threshold: f32, bottom_margin: f32 },
    /// Trigger once the element's top passes `ratio` of the viewport height.
    ScrollFallback { ratio: f32 },
}

impl Default for Strategy {
    fn default() -> Self {
        Self::Intersection {
            threshold: 0.3,
            bottom_margin: 50.0,
        }
    }
}

impl Strategy {
    pub fn scroll_fallback() -> Self {
        Self::ScrollFallback { ratio: 0.8 }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "scroll" => Self::scroll_fallback(),
            _ => Self::default(),
        }
    }

    fn is_visible(&self, bounds: Bounds, viewport_height: f32) -> bool {
        match *self {
            Self::Intersection {
                threshold,
                bottom_margin,
            } => intersection_ratio(bounds, viewport_height - bottom_margin) >= threshold,
            Self::ScrollFallback { ratio } => bounds.top < viewport_height * ratio,
        }
    }
}

/// Fraction of the element's height lying within `[0, root_bottom]`.
fn intersection_ratio(bounds: Bounds, root_bottom: f32) -> f32 {
    let root_bottom = root_bottom.max(0.0);
    if bounds.height <= 0.0 {
        return if (0.0..=root_bottom).contains(&bounds.top) {
            1.0
        } else {
            0.0
        };
    }
    let top = bounds.top.max(0.0);
    let bottom = (bounds.top + bounds.height).min(root_bottom);
    (bottom - top).max(0.0) / bounds.height
}

/// Deferred event: one item of one target starts flying in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlyIn {
    pub target: TargetId,
    pub item: usize,
}

#[derive(Debug)]
struct Target {
    kind: TargetKind,
    observed: bool,
    flown: Vec<bool>,
}

pub struct ScrollReveal<S> {
    targets: Vec<Target>,
    strategy: Strategy,
    stagger: Duration,
    hero_delay: Duration,
    scheduler: S,
}

impl<S: Scheduler<FlyIn>> ScrollReveal<S> {
    pub fn new(strategy: Strategy, scheduler: S) -> Self {
        Self {
            targets: Vec::new(),
            strategy,
            stagger: Duration::from_millis(100),
            hero_delay: Duration::from_millis(100),
            scheduler,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Start watching an element.
    pub fn observe(&mut self, kind: TargetKind) -> TargetId {
        let slots = match kind {
            TargetKind::Keypoints { items } => items,
            TargetKind::HeroText => 1,
        };
        self.targets.push(Target {
            kind,
            observed: true,
            flown: vec![false; slots],
        });
        self.targets.len() - 1
    }

    pub fn is_observed(&self, id: TargetId) -> bool {
        self.targets.get(id).is_some_and(|t| t.observed)
    }

    /// Whether `item` of `id` has flown in. Hero text has a single item, 0.
    pub fn is_flown(&self, id: TargetId, item: usize) -> bool {
        self.targets
            .get(id)
            .and_then(|t| t.flown.get(item))
            .copied()
            .unwrap_or(false)
    }

    /// Report an element's current placement. Triggers at most once.
    pub fn update(&mut self, id: TargetId, bounds: Bounds, viewport_height: f32) {
        let Some(target) = self.targets.get_mut(id) else {
            debug!(id, "reveal: geometry for unknown target ignored");
            return;
        };
        if !target.observed || !self.strategy.is_visible(bounds, viewport_height) {
            return;
        }

        target.observed = false;
        match target.kind {
            TargetKind::Keypoints { items } => {
                for item in 0..items {
                    let delay = self.stagger * item as u32;
                    self.scheduler
                        .schedule_once(delay, FlyIn { target: id, item });
                }
            }
            TargetKind::HeroText => {
                self.scheduler
                    .schedule_once(self.hero_delay, FlyIn { target: id, item: 0 });
            }
        }
        trace!(id, kind = ?target.kind, "reveal: target triggered");
    }

    pub fn run_until(&mut self, now: Duration) {
        while let Some(FlyIn { target, item }) = self.scheduler.pop_due(now) {
            if let Some(slot) = self
                .targets
                .get_mut(target)
                .and_then(|t| t.flown.get_mut(item))
            {
                *slot = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slideshow::timer::TimerQueue;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn reveal(strategy: Strategy) -> ScrollReveal<TimerQueue<FlyIn>> {
        ScrollReveal::new(strategy, TimerQueue::new())
    }

    fn at(top: f32, height: f32) -> Bounds {
        Bounds { top, height }
    }

    #[test]
    fn test_intersection_ratio() {
        assert_eq!(intersection_ratio(at(0.0, 100.0), 800.0), 1.0);
        assert_eq!(intersection_ratio(at(750.0, 100.0), 800.0), 0.5);
        assert_eq!(intersection_ratio(at(900.0, 100.0), 800.0), 0.0);
        assert_eq!(intersection_ratio(at(-50.0, 100.0), 800.0), 0.5);
        assert_eq!(intersection_ratio(at(10.0, 0.0), 800.0), 1.0);
    }

    #[test]
    fn test_keypoints_trigger_past_threshold() {
        let mut r = reveal(Strategy::default());
        let list = r.observe(TargetKind::Keypoints { items: 3 });

        // Viewport 800 minus 50 margin: 20 of 100 visible
        r.update(list, at(730.0, 100.0), 800.0);
        assert!(r.is_observed(list));

        // 30 of 100 visible
        r.update(list, at(720.0, 100.0), 800.0);
        assert!(!r.is_observed(list));
    }

    #[test]
    fn test_items_fly_in_staggered() {
        let mut r = reveal(Strategy::default());
        let list = r.observe(TargetKind::Keypoints { items: 3 });
        r.update(list, at(100.0, 200.0), 800.0);

        r.run_until(ms(0));
        assert!(r.is_flown(list, 0));
        assert!(!r.is_flown(list, 1));

        r.run_until(ms(99));
        assert!(!r.is_flown(list, 1));
        r.run_until(ms(100));
        assert!(r.is_flown(list, 1));
        assert!(!r.is_flown(list, 2));
        r.run_until(ms(200));
        assert!(r.is_flown(list, 2));
    }

    #[test]
    fn test_hero_text_waits_100ms() {
        let mut r = reveal(Strategy::default());
        let hero = r.observe(TargetKind::HeroText);
        r.update(hero, at(0.0, 80.0), 800.0);
        r.run_until(ms(99));
        assert!(!r.is_flown(hero, 0));
        r.run_until(ms(100));
        assert!(r.is_flown(hero, 0));
    }

    #[test]
    fn test_triggers_only_once() {
        let mut r = reveal(Strategy::default());
        let list = r.observe(TargetKind::Keypoints { items: 2 });
        r.update(list, at(0.0, 100.0), 800.0);
        r.update(list, at(0.0, 100.0), 800.0);
        r.update(list, at(10.0, 100.0), 800.0);
        r.run_until(ms(1000));
        assert!(r.is_flown(list, 1));
        assert!(r.scheduler.is_empty());
    }

    #[test]
    fn test_scroll_fallback_ratio() {
        let mut r = reveal(Strategy::scroll_fallback());
        let hero = r.observe(TargetKind::HeroText);
        r.update(hero, at(650.0, 10.0), 800.0);
        assert!(r.is_observed(hero));
        r.update(hero, at(630.0, 10.0), 800.0);
        assert!(!r.is_observed(hero));
    }

    #[test]
    fn test_targets_are_independent() {
        let mut r = reveal(Strategy::default());
        let a = r.observe(TargetKind::Keypoints { items: 1 });
        let b = r.observe(TargetKind::Keypoints { items: 1 });
        r.update(b, at(0.0, 10.0), 800.0);
        r.run_until(ms(500));
        assert!(!r.is_flown(a, 0));
        assert!(r.is_flown(b, 0));
        assert!(r.is_observed(a));
    }

    #[test]
    fn test_unknown_target_is_ignored() {
        let mut r = reveal(Strategy::default());
        r.update(7, at(0.0, 10.0), 800.0);
        assert!(!r.is_flown(7, 0));
        assert!(!r.is_observed(7));
    }

    #[test]
    fn test_strategy_from_name() {
        assert_eq!(Strategy::from_name("scroll"), Strategy::scroll_fallback());
        assert_eq!(Strategy::from_name("intersection"), Strategy::default());
    }
}
