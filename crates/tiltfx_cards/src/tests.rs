//! End-to-end card scenarios
//!
//! These drive complete cards through a real frame scheduler, the way a host
//! UI would: pointer events between frames, one `tick` per rendered frame.

use crate::pipeline::TiltPipeline;
use crate::prelude::*;
use crate::registry::BUILTIN_VARIANTS;
use crate::tracker::{PointerSample, PointerTracker};
use tiltfx_animation::{FrameScheduler, SpringConfig};
use tiltfx_core::PointerEvents;

const FRAME: f32 = 1.0 / 60.0;

/// 240x160 card at the origin
fn card_rect() -> Rect {
    Rect::new(0.0, 0.0, 240.0, 160.0)
}

fn mounted_card(scheduler: &FrameScheduler, key: &str, features: CardFeatures) -> TiltCard {
    let mut card = TiltCard::from_registry(
        CardVariantRegistry::global(),
        key,
        TiltConfig::card(),
        features,
        card_rect(),
    );
    card.mount(&scheduler.handle());
    card
}

fn run(scheduler: &FrameScheduler, frames: usize) {
    for _ in 0..frames {
        scheduler.tick(FRAME);
    }
}

#[test]
fn test_pointer_above_center_tilts_top_toward_viewer() {
    let sample = PointerTracker::sample(&card_rect(), Point::new(120.0, -40.0));
    assert_eq!(sample, PointerSample::new(0.0, -120.0));

    let scheduler = FrameScheduler::new();
    let card = mounted_card(&scheduler, "default", CardFeatures::interactive());
    card.handle_event(&PointerEvent::Move {
        client: Point::new(120.0, -40.0),
    });

    for _ in 0..120 {
        scheduler.tick(FRAME);
        let angles = card.angles();
        assert!(angles.rotate_x >= 0.0, "rotate_x must oppose dy");
        assert!(angles.rotate_x <= 15.0);
        assert_eq!(angles.rotate_y, 0.0);
    }
    // Settles near 120 / 300 * 15
    assert!((card.angles().rotate_x - 6.0).abs() < 0.05);
}

#[test]
fn test_leave_relaxes_with_bounded_steps() {
    let scheduler = FrameScheduler::new();
    let card = mounted_card(&scheduler, "premium", CardFeatures::interactive());
    card.handle_event(&PointerEvent::Enter {
        client: Point::new(240.0, 160.0),
    });
    run(&scheduler, 30);
    let tilted = card.angles();
    assert!(tilted.magnitude() > 1.0);

    card.handle_event(&PointerEvent::Leave);
    let mut previous = card.angles();
    for _ in 0..300 {
        scheduler.tick(FRAME);
        let angles = card.angles();
        assert!((angles.rotate_x - previous.rotate_x).abs() < 2.0);
        assert!((angles.rotate_y - previous.rotate_y).abs() < 2.0);
        previous = angles;
    }
    assert!(card.angles().magnitude() < 1e-3);
    assert!(card.is_settled());
    assert!(!card.is_hovered());
}

#[test]
fn test_critical_damping_never_overshoots() {
    let spring = SpringConfig::new(100.0, 20.0, 1.0);
    assert!(spring.is_critically_damped());

    let mut pipeline = TiltPipeline::new(TiltConfig::card().with_spring(spring));
    pipeline.push_sample(PointerSample::new(150.0, 0.0));
    let mut previous = 0.0;
    for _ in 0..240 {
        let angles = pipeline.tick(FRAME);
        assert!(angles.rotate_y + 1e-4 >= previous);
        assert!(angles.rotate_y <= 7.5 + 1e-3);
        previous = angles.rotate_y;
    }
}

#[test]
fn test_unmount_stops_everything() {
    let scheduler = FrameScheduler::new();
    let mut card = mounted_card(&scheduler, "holographic", CardFeatures::interactive());
    card.set_visible(true);
    card.handle_event(&PointerEvent::Enter {
        client: Point::new(200.0, 20.0),
    });
    card.handle_event(&PointerEvent::Click {
        client: Point::new(200.0, 20.0),
    });
    run(&scheduler, 5);
    assert_eq!(scheduler.pending_timer_count(), 1);

    card.unmount();
    assert_eq!(scheduler.tick_callback_count(), 0);
    assert_eq!(scheduler.pending_timer_count(), 0);
    assert_eq!(card.ripple_count(), 0);
    assert!(!card.is_hovered());
    assert_eq!(card.angles(), TiltAngles::ZERO);

    let frames = card.frame_count();
    let frame = card.frame();
    run(&scheduler, 120);
    assert_eq!(card.frame_count(), frames);
    assert_eq!(card.angles(), TiltAngles::ZERO);
    assert_eq!(card.frame(), frame);

    // Events after unmount change nothing either
    card.handle_event(&PointerEvent::Enter {
        client: Point::new(200.0, 20.0),
    });
    assert!(!card.is_hovered());
}

#[test]
fn test_dropping_card_leaves_scheduler_idle() {
    let scheduler = FrameScheduler::new();
    let card = mounted_card(&scheduler, "default", CardFeatures::interactive());
    card.handle_event(&PointerEvent::Click {
        client: Point::new(10.0, 10.0),
    });
    drop(card);
    assert!(scheduler.is_idle());
    run(&scheduler, 60);
}

#[test]
fn test_ripple_lives_600ms() {
    let scheduler = FrameScheduler::new();
    let card = mounted_card(&scheduler, "default", CardFeatures::interactive());
    card.handle_event(&PointerEvent::Click {
        client: Point::new(60.0, 40.0),
    });
    run(&scheduler, 35);
    assert_eq!(card.ripple_count(), 1);
    run(&scheduler, 2);
    assert_eq!(card.ripple_count(), 0);
    assert!(card.frame().ripples.is_empty());
}

#[test]
fn test_neon_composes_glow_and_border_only() {
    let scheduler = FrameScheduler::new();
    let card = mounted_card(&scheduler, "neon", CardFeatures::interactive());
    run(&scheduler, 3);
    let kinds: Vec<LayerKind> = card.frame().card.layers.iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![LayerKind::Glow, LayerKind::Border]);
}

#[test]
fn test_layer_order_stable_for_every_variant() {
    let scheduler = FrameScheduler::new();
    for key in BUILTIN_VARIANTS {
        let card = mounted_card(&scheduler, key, CardFeatures::interactive());
        card.set_visible(true);
        run(&scheduler, 1);
        let first: Vec<(LayerKind, i32)> = card
            .frame()
            .card
            .layers
            .iter()
            .map(|l| (l.kind, l.z_index))
            .collect();
        assert!(first.windows(2).all(|w| w[0].1 <= w[1].1), "{key} not sorted");

        for i in 0..90 {
            let event = if i % 30 < 15 {
                PointerEvent::Move {
                    client: Point::new(i as f32 * 3.0, 80.0),
                }
            } else {
                PointerEvent::Leave
            };
            card.handle_event(&event);
            scheduler.tick(FRAME);
            let frame = card.frame();
            let order: Vec<(LayerKind, i32)> =
                frame.card.layers.iter().map(|l| (l.kind, l.z_index)).collect();
            assert_eq!(order, first, "{key} reordered");
            assert!(frame
                .card
                .layers
                .iter()
                .all(|l| l.pointer_events == PointerEvents::None));
            assert!(frame.card.root.is_finite());
        }
    }
}

#[test]
fn test_entrance_ends_at_rest() {
    let scheduler = FrameScheduler::new();
    let card = mounted_card(
        &scheduler,
        "glass",
        CardFeatures::interactive().with_entrance(EntranceDirection::Scale, 0.2),
    );
    run(&scheduler, 2);
    assert_eq!(card.frame().card.root.scale, 0.8);

    card.set_visible(true);
    run(&scheduler, 70);
    let frame = card.frame().card;
    assert_eq!(frame.opacity, 1.0);
    assert_eq!(frame.root.scale, 1.0);
    assert_eq!(frame.root.to_css(), "perspective(1000px)");
}

#[test]
fn test_unknown_variant_uses_default() {
    let scheduler = FrameScheduler::new();
    let card = mounted_card(&scheduler, "does-not-exist", CardFeatures::basic());
    assert_eq!(card.variant_key(), "default");
}

#[test]
fn test_cards_do_not_share_state() {
    let scheduler = FrameScheduler::new();
    let a = mounted_card(&scheduler, "default", CardFeatures::interactive());
    let b = mounted_card(&scheduler, "default", CardFeatures::interactive());
    a.handle_event(&PointerEvent::Move {
        client: Point::new(240.0, 80.0),
    });
    run(&scheduler, 20);
    assert!(a.angles().rotate_y > 0.0);
    assert_eq!(b.angles(), TiltAngles::ZERO);
}
