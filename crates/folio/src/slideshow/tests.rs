use std::time::Duration;

use super::timer::TimerQueue;
use super::*;

type Show = Slideshow<TimerQueue<Tick>>;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn mounted(n: usize) -> Show {
    Slideshow::mount(n, n, Timing::default(), TimerQueue::new())
}

/// Drive a transition started at `start` through both deferred phases.
fn finish_cycle(show: &mut Show, start: u64) {
    show.run_until(ms(start + 50));
    show.run_until(ms(start + 50 + 600));
}

/// Assert the steady-state invariant: one active, shown slide with its
/// indicator lit, everything else hidden without classes.
fn assert_steady(show: &Show, index: usize) {
    assert!(!show.is_transitioning(), "still transitioning");
    assert_eq!(show.current_index(), index);
    for (i, slide) in show.slides().iter().enumerate() {
        if i == index {
            assert_eq!(slide.class, SlideClass::Active, "slide {i}");
            assert_eq!(slide.display, Display::Shown, "slide {i}");
        } else {
            assert_eq!(*slide, SlideState::default(), "slide {i}");
        }
    }
    for (i, &lit) in show.indicators().iter().enumerate() {
        assert_eq!(lit, i == index, "indicator {i}");
    }
}

#[test]
fn test_mount_shows_first_slide_and_starts_autoplay() {
    let show = mounted(3);
    assert_steady(&show, 0);
    assert!(show.is_autoplaying());
}

#[test]
fn test_advance_end_to_end() {
    let mut show = mounted(3);
    show.advance(1);

    assert_eq!(
        show.phase(),
        Phase::Entering {
            from: 0,
            to: 1,
            direction: Direction::Next
        }
    );
    assert_eq!(show.slides()[1].class, SlideClass::Entering(Direction::Next));
    assert!(show.slides()[1].is_visible());
    assert_eq!(show.current_index(), 0);

    show.run_until(ms(49));
    assert!(matches!(show.phase(), Phase::Entering { .. }));

    show.run_until(ms(50));
    assert_eq!(
        show.phase(),
        Phase::Active {
            from: 0,
            to: 1,
            direction: Direction::Next
        }
    );
    assert_eq!(show.current_index(), 1);
    assert_eq!(show.slides()[0].class, SlideClass::Exiting);
    assert!(show.slides()[0].is_visible());
    assert_eq!(show.slides()[1].class, SlideClass::Active);
    assert_eq!(show.indicators(), &[false, true, false]);

    show.run_until(ms(649));
    assert!(show.is_transitioning());

    show.run_until(ms(650));
    assert_steady(&show, 1);
}

#[test]
fn test_single_active_after_every_cycle() {
    let mut show = mounted(4);
    let mut t = 0;
    for expected in [1, 2, 3, 0, 1] {
        show.advance(1);
        finish_cycle(&mut show, t);
        assert_steady(&show, expected);
        t += 1000;
        show.run_until(ms(t));
    }
}

#[test]
fn test_only_one_active_class_mid_transition() {
    let mut show = mounted(3);
    show.advance(1);
    show.run_until(ms(50));
    let active = show
        .slides()
        .iter()
        .filter(|s| s.class == SlideClass::Active)
        .count();
    assert_eq!(active, 1);
}

#[test]
fn test_requests_dropped_while_transitioning() {
    let mut show = mounted(3);
    show.advance(1);

    show.advance(1);
    show.jump_to(3);
    show.go_to(2, Direction::Next);
    show.handle(SlideshowInput::ArrowLeft);
    show.handle(SlideshowInput::IndicatorActivated(2));
    assert_eq!(
        show.phase(),
        Phase::Entering {
            from: 0,
            to: 1,
            direction: Direction::Next
        }
    );
    assert_eq!(show.slides()[2], SlideState::default());

    show.run_until(ms(50));
    show.advance(-1);
    show.jump_to(3);
    assert_eq!(
        show.phase(),
        Phase::Active {
            from: 0,
            to: 1,
            direction: Direction::Next
        }
    );

    show.run_until(ms(650));
    assert_steady(&show, 1);
}

#[test]
fn test_wrap_around_single_slide() {
    let mut show = mounted(1);
    show.go_to(1, Direction::Next);
    assert!(!show.is_transitioning());
    show.go_to(-1, Direction::Prev);
    assert!(!show.is_transitioning());
    assert_steady(&show, 0);
}

#[test]
fn test_wrap_around() {
    for n in 2..=6 {
        let mut show = mounted(n);
        show.go_to(-1, Direction::Prev);
        finish_cycle(&mut show, 0);
        assert_steady(&show, n - 1);

        show.run_until(ms(1000));
        show.go_to(n as isize, Direction::Next);
        finish_cycle(&mut show, 1000);
        assert_steady(&show, 0);
    }
}

#[test]
fn test_multi_step_offsets_clamp_to_the_ends() {
    let mut show = mounted(5);
    show.advance(-3);
    assert!(matches!(show.phase(), Phase::Entering { to: 4, .. }));
    finish_cycle(&mut show, 0);

    show.run_until(ms(1000));
    show.advance(2);
    assert!(matches!(show.phase(), Phase::Entering { to: 0, .. }));
}

#[test]
fn test_extreme_offsets_wrap_without_overflow() {
    let mut show = mounted(3);
    show.advance(isize::MIN);
    assert!(matches!(
        show.phase(),
        Phase::Entering {
            to: 2,
            direction: Direction::Prev,
            ..
        }
    ));
    finish_cycle(&mut show, 0);
    assert_steady(&show, 2);

    show.run_until(ms(1000));
    show.advance(isize::MAX);
    assert!(matches!(
        show.phase(),
        Phase::Entering {
            to: 0,
            direction: Direction::Next,
            ..
        }
    ));
    finish_cycle(&mut show, 1000);
    assert_steady(&show, 0);

    show.run_until(ms(2000));
    show.jump_to(isize::MIN);
    assert!(matches!(show.phase(), Phase::Entering { to: 2, .. }));
}

#[test]
fn test_active_phase_keeps_direction() {
    let mut show = mounted(3);
    show.advance(-1);
    show.run_until(ms(50));
    assert_eq!(
        show.phase(),
        Phase::Active {
            from: 0,
            to: 2,
            direction: Direction::Prev
        }
    );
}

#[test]
fn test_jump_to_current_is_noop() {
    let mut show = mounted(3);
    show.jump_to(1);
    assert!(!show.is_transitioning());
    assert_eq!(show.scheduler().next_deadline(), Some(ms(5000)));
    assert_steady(&show, 0);
}

#[test]
fn test_jump_to_direction() {
    let mut show = mounted(3);
    show.jump_to(3);
    assert_eq!(show.slides()[2].class, SlideClass::Entering(Direction::Next));
    finish_cycle(&mut show, 0);

    show.run_until(ms(1000));
    show.jump_to(1);
    assert_eq!(show.slides()[0].class, SlideClass::Entering(Direction::Prev));
    finish_cycle(&mut show, 1000);
    assert_steady(&show, 0);
}

#[test]
fn test_advance_backwards_enters_from_prev() {
    let mut show = mounted(3);
    show.advance(-1);
    assert_eq!(show.slides()[2].class, SlideClass::Entering(Direction::Prev));
}

#[test]
fn test_autoplay_advances_once_per_interval() {
    let mut show = mounted(3);

    show.run_until(ms(4999));
    assert_steady(&show, 0);

    show.run_until(ms(5000));
    assert!(show.is_transitioning());
    show.run_until(ms(5650));
    assert_steady(&show, 1);

    show.run_until(ms(10_650));
    assert_steady(&show, 2);

    show.run_until(ms(15_650));
    assert_steady(&show, 0);
}

#[test]
fn test_stop_then_start_resumes_on_a_fresh_interval() {
    let mut show = mounted(3);
    show.stop();
    assert!(!show.is_autoplaying());

    show.run_until(ms(12_000));
    assert_steady(&show, 0);

    show.start();
    assert!(show.is_autoplaying());
    show.run_until(ms(16_999));
    assert_steady(&show, 0);

    show.run_until(ms(17_650));
    assert_steady(&show, 1);
    show.run_until(ms(22_650));
    assert_steady(&show, 2);
}

#[test]
fn test_stop_is_idempotent() {
    let mut show = mounted(2);
    show.stop();
    show.stop();
    assert!(!show.is_autoplaying());
    assert!(show.scheduler().is_empty());
}

#[test]
fn test_start_does_not_double_schedule() {
    let mut show = mounted(2);
    show.start();
    show.start();
    assert_eq!(show.scheduler().len(), 1);
}

#[test]
fn test_hover_pauses_and_leave_resumes() {
    let mut show = mounted(3);
    show.handle(SlideshowInput::PointerEnter);
    assert!(!show.is_autoplaying());
    show.run_until(ms(20_000));
    assert_steady(&show, 0);

    show.handle(SlideshowInput::PointerLeave);
    assert!(show.is_autoplaying());
    show.run_until(ms(25_650));
    assert_steady(&show, 1);
}

#[test]
fn test_leave_without_enter_starts_timer() {
    let mut show = mounted(2);
    show.stop();
    show.handle(SlideshowInput::PointerLeave);
    assert!(show.is_autoplaying());
}

#[test]
fn test_keyboard_routing() {
    let mut show = mounted(3);
    show.handle(SlideshowInput::ArrowRight);
    finish_cycle(&mut show, 0);
    assert_steady(&show, 1);

    show.run_until(ms(1000));
    show.handle(SlideshowInput::ArrowLeft);
    finish_cycle(&mut show, 1000);
    assert_steady(&show, 0);
}

#[test]
fn test_indicator_click_jumps() {
    let mut show = mounted(4);
    show.handle(SlideshowInput::IndicatorActivated(2));
    finish_cycle(&mut show, 0);
    assert_steady(&show, 2);
}

#[test]
fn test_missing_indicators_are_skipped() {
    let mut show: Show = Slideshow::mount(3, 2, Timing::default(), TimerQueue::new());
    show.jump_to(3);
    finish_cycle(&mut show, 0);
    assert_eq!(show.current_index(), 2);
    assert_eq!(show.indicators(), &[false, false]);
}

#[test]
fn test_empty_slideshow_is_inert() {
    let mut show = mounted(0);
    assert!(show.is_empty());
    assert!(!show.is_autoplaying());
    assert!(show.scheduler().is_empty());

    show.advance(1);
    show.advance(-1);
    show.jump_to(1);
    show.go_to(0, Direction::Next);
    show.start();
    show.stop();
    for input in [
        SlideshowInput::ArrowLeft,
        SlideshowInput::ArrowRight,
        SlideshowInput::IndicatorActivated(0),
        SlideshowInput::PointerEnter,
        SlideshowInput::PointerLeave,
    ] {
        show.handle(input);
    }
    show.run_until(ms(60_000));

    assert!(!show.is_transitioning());
    assert!(!show.is_autoplaying());
    assert!(show.scheduler().is_empty());
}

#[test]
fn test_custom_timing() {
    let timing = Timing {
        settle: ms(10),
        transition: ms(100),
        interval: ms(1000),
    };
    let mut show = Slideshow::mount(2, 2, timing, TimerQueue::new());
    show.run_until(ms(1000));
    assert_eq!(show.current_index(), 0);
    show.run_until(ms(1010));
    assert_eq!(show.current_index(), 1);
    show.run_until(ms(1110));
    assert!(!show.is_transitioning());
}

#[test]
fn test_timing_from_yaml_uses_defaults_for_missing_fields() {
    let timing: Timing = serde_yaml::from_str("interval_ms: 3000").unwrap();
    assert_eq!(timing.interval, ms(3000));
    assert_eq!(timing.settle, ms(50));
    assert_eq!(timing.transition, ms(600));
}
