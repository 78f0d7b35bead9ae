// Copyright 2025 the Quickdraw Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layered scene with hover highlighting and click routing.
//!
//! This example shows how to:
//! - build a stage with two layers and mixed shape and text nodes,
//! - restyle a node from inside its own hover handlers,
//! - observe which layers each frame actually repaints.
//!
//! Run:
//! - `cargo run -p quickdraw_demos --example hover_stage`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Circle, Rect, Shape};
use peniko::Color;
use quickdraw::{Layer, Node, Stage};
use quickdraw_surface::{Command, DisplayList, RecordedPaint};

const IDLE: Color = Color::from_rgb8(40, 110, 200);
const HOT: Color = Color::from_rgb8(240, 180, 40);

fn main() {
    let mut stage: Stage<DisplayList> = Stage::new(400, 300);
    let events = Rc::new(RefCell::new(Vec::new()));

    // Background layer: a static panel and a caption. Captions are never hit.
    let mut background = Layer::new("background").with_z(0.0);
    background.add(
        Node::shape(Rect::new(0.0, 0.0, 400.0, 300.0).to_path(0.1))
            .with_fill(Color::from_rgb8(245, 245, 245))
            .with_touchable(false),
    );
    background.add(Node::text("hover the shapes", (20.0, 280.0)).with_font_size(14.0));

    // Foreground layer: a button and a badge that overlaps it.
    let mut foreground = Layer::new("foreground").with_z(1.0);
    let mut button = Node::shape(Rect::new(50.0, 50.0, 150.0, 150.0).to_path(0.1))
        .with_fill(IDLE)
        .with_stroke(Color::from_rgb8(20, 20, 20))
        .with_line_width(2.0);
    let log = events.clone();
    button.set_on_mouse_over(move |node, _| {
        node.set_fill(HOT);
        log.borrow_mut().push(format!("over button {}", node.id().get()));
    });
    let log = events.clone();
    button.set_on_mouse_out(move |node, _| {
        node.set_fill(IDLE);
        log.borrow_mut().push(format!("out button {}", node.id().get()));
    });
    let log = events.clone();
    button.set_on_click(move |_, at| {
        log.borrow_mut().push(format!("click button at ({}, {})", at.x, at.y));
    });
    foreground.add(button);

    let mut badge = Node::shape(Circle::new((150.0, 50.0), 20.0).to_path(0.1))
        .with_z(2.0)
        .with_fill(Color::from_rgb8(200, 40, 40));
    let log = events.clone();
    badge.set_on_click(move |_, _| log.borrow_mut().push("click badge".to_owned()));
    foreground.add(badge);

    stage.add(background);
    stage.add(foreground);

    println!("frame 1: {:?}", stage.render());
    println!("touch targets: {}", stage.touch_targets().len());

    // Pointer path: enter the button, cross into the badge, leave into empty space.
    for (x, y) in [(100.0, 100.0), (110.0, 110.0), (145.0, 55.0), (300.0, 200.0)] {
        match stage.on_move(x, y) {
            Ok(hit) => println!("move to ({x}, {y}) -> {hit:?}"),
            Err(err) => println!("move to ({x}, {y}) failed: {err}"),
        }
    }
    // The badge wins where it overlaps the button.
    for (x, y) in [(145.0, 55.0), (60.0, 140.0)] {
        match stage.on_click(x, y) {
            Ok(hit) => println!("click at ({x}, {y}) -> {hit:?}"),
            Err(err) => println!("click at ({x}, {y}) failed: {err}"),
        }
    }

    println!("frame 2: {:?}", stage.render());
    println!("frame 3 (idle): {:?}", stage.render());

    for line in events.borrow().iter() {
        println!("  {line}");
    }

    if let Some(Command::FillPath {
        paint: RecordedPaint::Solid(color),
        ..
    }) = stage.display().fill_at((100.0, 100.0).into())
    {
        println!("pixel at (100, 100) is {:?}", color.to_rgba8());
    }
}
