// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_popover` crate.
//!
//! These run whole layout passes through the public API: anchors are
//! recorded, popovers composed against them, and the resulting node trees
//! painted into a recording sink.

use kurbo::{Affine, Rect, RoundedRect, RoundedRectRadii, Shape, Size, Vec2};
use peniko::{Brush, Color};
use understory_popover::{
    AnchorRegistry, Animation, ArrowShape, Layer, LayoutPass, PaintSink, PopoverKind,
    PopoverLayout, PopoverSettings, Position, anchor_view, popover_view,
};

#[derive(Clone, Debug, PartialEq)]
enum Op {
    Push {
        offset: Vec2,
        opacity: f32,
        clipped: bool,
        shadow: f64,
    },
    Pop,
    Fill(Rect, Brush),
    Content(&'static str, Rect),
}

#[derive(Default)]
struct Recorder {
    ops: Vec<Op>,
}

impl PaintSink<&'static str> for Recorder {
    fn push_layer(&mut self, layer: &Layer<'_>) {
        self.ops.push(Op::Push {
            offset: layer.offset,
            opacity: layer.opacity,
            clipped: layer.clip.is_some(),
            shadow: layer.shadow_radius,
        });
    }

    fn pop_layer(&mut self) {
        self.ops.push(Op::Pop);
    }

    fn fill(&mut self, shape: &ArrowShape, brush: &Brush) {
        self.ops.push(Op::Fill(shape.bounding_box(), brush.clone()));
    }

    fn content(&mut self, content: &&'static str, frame: Rect) {
        self.ops.push(Op::Content(*content, frame));
    }
}

const BUTTON: Rect = Rect::new(100.0, 200.0, 150.0, 220.0);
const TARGET: Rect = Rect::new(0.0, 0.0, 120.0, 60.0);

fn pass_with_button() -> LayoutPass {
    let mut pass = LayoutPass::new();
    pass.anchor(&anchor_view("button"), BUTTON);
    pass
}

#[test]
fn end_to_end_scenario_from_top() {
    let pass = pass_with_button();
    let view = popover_view(
        "menu",
        true,
        TARGET,
        PopoverKind::Popover,
        Position::Top,
        "button",
    )
    .with_settings(PopoverSettings::default().with_offset(Vec2::new(0.0, -5.0)));

    let popover = pass.popover(&view, Affine::IDENTITY);
    // x: 100 + (50 - 120) / 2; y: 200 - 60 - 5.
    assert_eq!(popover.layout().offset, Vec2::new(65.0, 135.0));

    let mut rec = Recorder::default();
    popover.paint(&mut rec);
    assert_eq!(
        rec.ops,
        [
            Op::Push {
                offset: Vec2::new(65.0, 135.0),
                opacity: 1.0,
                clipped: true,
                shadow: 10.0,
            },
            Op::Fill(TARGET, PopoverSettings::default().background),
            Op::Content("menu", Rect::new(20.0, 20.0, 100.0, 40.0)),
            Op::Pop,
        ]
    );
}

#[test]
fn unknown_anchor_is_transparent_regardless_of_presentation() {
    let pass = pass_with_button();
    for presented in [false, true] {
        let view = popover_view(
            "menu",
            presented,
            TARGET,
            PopoverKind::Popover,
            Position::Bottom,
            "not-rendered-yet",
        );
        let popover = pass.popover(&view, Affine::IDENTITY);
        assert_eq!(popover.opacity(), 0.0);
        assert_eq!(popover.anchor_bounds(), None);
    }
}

#[test]
fn popover_size_never_depends_on_presentation() {
    let pass = pass_with_button();
    let mut view = popover_view(
        "menu",
        false,
        TARGET,
        PopoverKind::Popover,
        Position::Right,
        "button",
    );
    let hidden = pass.popover(&view, Affine::IDENTITY);
    view.set_presented(true);
    let shown = pass.popover(&view, Affine::IDENTITY);

    assert_eq!(hidden.layout(), shown.layout());
    assert_eq!(shown.layout().size, Size::new(120.0, 60.0));
    assert_eq!((hidden.opacity(), shown.opacity()), (0.0, 1.0));
}

#[test]
fn popout_collapses_onto_anchor_and_expands_to_target() {
    let pass = pass_with_button();
    let mut view = popover_view(
        "menu",
        false,
        TARGET,
        PopoverKind::Popout,
        Position::BottomRight,
        "button",
    );
    let collapsed = pass.popover(&view, Affine::IDENTITY);
    assert_eq!(collapsed.frame(), BUTTON);

    view.set_presented(true);
    let expanded = pass.popover(&view, Affine::IDENTITY);
    assert_eq!(expanded.frame(), Rect::new(150.0, 220.0, 270.0, 280.0));
    assert_eq!(expanded.arrow_position(), Position::TopLeft);

    // A host drives the transition with the configured animation.
    let animation = view.settings().animation;
    let start = collapsed.layout().lerp(&expanded.layout(), animation.progress(0.0));
    assert_eq!(start, collapsed.layout());
    let settle = animation.settle_time();
    let end = collapsed
        .layout()
        .lerp(&expanded.layout(), animation.progress(settle * 2.0));
    assert!((end.offset - expanded.layout().offset).hypot() < 0.5);
}

#[test]
fn placements_sit_flush_against_the_anchor() {
    let registry = AnchorRegistry::contribution("button", BUTTON);
    let expectations: [(Position, fn(Rect) -> bool); 8] = [
        (Position::Top, |f: Rect| f.y1 == BUTTON.y0),
        (Position::Bottom, |f: Rect| f.y0 == BUTTON.y1),
        (Position::Left, |f: Rect| f.x1 == BUTTON.x0),
        (Position::Right, |f: Rect| f.x0 == BUTTON.x1),
        (Position::TopLeft, |f: Rect| {
            f.x1 == BUTTON.x0 && f.y1 == BUTTON.y0
        }),
        (Position::TopRight, |f: Rect| {
            f.x0 == BUTTON.x1 && f.y1 == BUTTON.y0
        }),
        (Position::BottomLeft, |f: Rect| {
            f.x1 == BUTTON.x0 && f.y0 == BUTTON.y1
        }),
        (Position::BottomRight, |f: Rect| {
            f.x0 == BUTTON.x1 && f.y0 == BUTTON.y1
        }),
    ];
    for (position, flush) in expectations {
        let view = popover_view((), true, TARGET, PopoverKind::Popover, position, "button");
        let popover = view.compose(&registry, Affine::IDENTITY);
        assert!(flush(popover.frame()), "{position:?}: {:?}", popover.frame());
        // The arrow points back at the anchor.
        assert_eq!(popover.arrow_position(), position.opposite());
    }
}

#[test]
fn first_declared_anchor_wins() {
    let mut pass = LayoutPass::new();
    let mut subtree = AnchorRegistry::new();
    subtree.reduce(anchor_view("dup").contribute(Rect::new(0.0, 0.0, 10.0, 10.0)));
    subtree.reduce(anchor_view("dup").contribute(Rect::new(50.0, 50.0, 60.0, 60.0)));
    pass.record(subtree);

    let view = popover_view((), true, TARGET, PopoverKind::Popover, Position::Bottom, "dup");
    let popover = pass.popover(&view, Affine::IDENTITY);
    assert_eq!(
        popover.anchor_bounds(),
        Some(Rect::new(0.0, 0.0, 10.0, 10.0))
    );
    assert_eq!(pass.finish().len(), 2);
}

#[test]
fn zero_length_arrow_is_a_plain_rounded_rect() {
    let radii = RoundedRectRadii::new(2.0, 4.0, 6.0, 8.0);
    let pass = pass_with_button();
    let view = popover_view((), true, TARGET, PopoverKind::Popover, Position::Top, "button")
        .with_settings(
            PopoverSettings::default()
                .with_arrow_length(0.0)
                .with_corner_radii(radii),
        );
    let popover = pass.popover(&view, Affine::IDENTITY);
    let understory_popover::Node::Composite(c) = popover.node() else {
        panic!("popover root is a composite");
    };
    let clip = c.clip.expect("popovers are clipped");
    assert_eq!(
        clip.to_path(0.1),
        RoundedRect::from_rect(TARGET, radii).to_path(0.1)
    );
}

#[test]
fn arrow_override_replaces_opposite() {
    let pass = pass_with_button();
    let view = popover_view((), true, TARGET, PopoverKind::Popover, Position::Top, "button")
        .with_settings(PopoverSettings::default().with_arrow_position(Position::BottomLeft));
    let popover = pass.popover(&view, Affine::IDENTITY);
    assert_eq!(popover.arrow_position(), Position::BottomLeft);
}

#[test]
fn negative_settings_are_clamped_during_composition() {
    let pass = pass_with_button();
    let settings = PopoverSettings::default()
        .with_arrow_length(-10.0)
        .with_shadow_radius(-1.0)
        .with_background(Color::BLACK)
        .with_animation(Animation::None);
    assert!(settings.validate().is_err());

    let view = popover_view("menu", true, TARGET, PopoverKind::Popover, Position::Top, "button")
        .with_settings(settings);
    let mut rec = Recorder::default();
    pass.popover(&view, Affine::IDENTITY).paint(&mut rec);
    assert_eq!(
        rec.ops,
        [
            Op::Push {
                offset: Vec2::new(65.0, 140.0),
                opacity: 1.0,
                clipped: true,
                shadow: 0.0,
            },
            Op::Fill(TARGET, Brush::Solid(Color::BLACK)),
            Op::Content("menu", TARGET),
            Op::Pop,
        ]
    );
}

#[test]
fn layout_lerp_is_a_plain_interpolation() {
    let a = PopoverLayout::ZERO;
    let b = PopoverLayout {
        offset: Vec2::new(10.0, 20.0),
        size: Size::new(30.0, 40.0),
    };
    let quarter = a.lerp(&b, 0.25);
    assert_eq!(quarter.offset, Vec2::new(2.5, 5.0));
    assert_eq!(quarter.size, Size::new(7.5, 10.0));
}
