use scene_input::input::{
    InputSource, Key, KeyDownArgs, KeyboardState, MouseButton, MouseState, QueuedSource,
};
use scene_input::util::{Point, Rect};
use scene_input::{EventContext, InputHandler, InputRouter, InputState, NodeLayout, Scene};
use std::cell::RefCell;
use std::rc::Rc;

/// Horizontal slider that tracks its value while dragged.
struct Slider {
    value: Rc<RefCell<f64>>,
}

impl InputHandler for Slider {
    fn on_drag_start(&mut self, _cx: &mut EventContext<'_>) -> bool {
        true
    }

    fn on_drag(&mut self, cx: &mut EventContext<'_>) -> bool {
        if let Some(delta) = cx.mouse().and_then(|m| m.delta()) {
            *self.value.borrow_mut() += delta.x;
        }
        true
    }
}

/// Text field that collects typed characters while focused.
struct TextField {
    text: Rc<RefCell<String>>,
}

impl InputHandler for TextField {
    fn on_click(&mut self, _cx: &mut EventContext<'_>) -> bool {
        true
    }

    fn on_key_down(&mut self, cx: &mut EventContext<'_>, args: KeyDownArgs) -> bool {
        let shifted = cx.keyboard().is_some_and(|k| k.modifiers().shift);
        match args.key {
            Key::Char(c) if shifted => self.text.borrow_mut().extend(c.to_uppercase()),
            Key::Char(c) => self.text.borrow_mut().push(c),
            Key::Return => cx.release_focus(),
            _ => return false,
        }
        true
    }

    fn accepts_focus(&self) -> bool {
        true
    }
}

fn bounds(x: f64, y: f64, w: f64, h: f64) -> NodeLayout {
    NodeLayout::new(Rect::new(x, y, w, h).unwrap())
}

fn mouse(x: f64, y: f64, left: bool) -> InputState {
    let mut state = MouseState::at(x, y);
    state.set_pressed(MouseButton::Left, left);
    InputState::new().with_mouse(state)
}

fn keys(keys: &[Key]) -> InputState {
    InputState::new().with_keyboard(KeyboardState::from_keys(keys.iter().copied()))
}

#[test]
fn slider_follows_drag() {
    let value = Rc::new(RefCell::new(0.0));
    let mut scene = Scene::new();
    let slider = scene
        .add(
            scene.root(),
            bounds(0.0, 0.0, 200.0, 20.0),
            Slider {
                value: Rc::clone(&value),
            },
        )
        .unwrap();
    let mut router = InputRouter::default();

    router.update(&mut scene, vec![mouse(10.0, 10.0, true)], 16.0).unwrap();
    router.update(&mut scene, vec![mouse(30.0, 10.0, true)], 16.0).unwrap();
    assert_eq!(router.dragged(), Some(slider));

    // Dragging continues outside the slider's bounds.
    router.update(&mut scene, vec![mouse(60.0, 50.0, true)], 16.0).unwrap();
    router.update(&mut scene, vec![mouse(90.0, 50.0, true)], 16.0).unwrap();
    router.update(&mut scene, vec![mouse(90.0, 50.0, false)], 16.0).unwrap();

    assert_eq!(*value.borrow(), 60.0);
    assert_eq!(router.dragged(), None);
    assert!(!scene.flags(slider).is_dragged());
}

#[test]
fn typing_into_a_clicked_field() {
    let text = Rc::new(RefCell::new(String::new()));
    let mut scene = Scene::new();
    let field = scene
        .add(
            scene.root(),
            bounds(0.0, 0.0, 100.0, 20.0),
            TextField {
                text: Rc::clone(&text),
            },
        )
        .unwrap();
    let mut router = InputRouter::default();

    router.update(&mut scene, vec![mouse(5.0, 5.0, true)], 16.0).unwrap();
    router.update(&mut scene, vec![mouse(5.0, 5.0, false)], 16.0).unwrap();
    assert_eq!(router.focused(), Some(field));

    let pending = vec![
        keys(&[Key::Char('h')]),
        keys(&[]),
        keys(&[Key::LShift, Key::Char('i')]),
        keys(&[]),
    ];
    router.update(&mut scene, pending, 16.0).unwrap();
    assert_eq!(text.borrow().as_str(), "hI");

    router.update(&mut scene, vec![keys(&[Key::Return])], 16.0).unwrap();
    assert_eq!(router.focused(), None);
    assert!(!scene.flags(field).has_focus());
}

#[test]
fn queued_sources_feed_the_router() {
    let mut scene = Scene::new();
    let node = scene
        .add(scene.root(), bounds(0.0, 0.0, 50.0, 50.0), Slider {
            value: Rc::default(),
        })
        .unwrap();
    let mut router = InputRouter::default();

    let mut source = QueuedSource::new();
    source.push(mouse(10.0, 10.0, false));
    let mut sources: Vec<Box<dyn InputSource>> = vec![Box::new(source)];

    router
        .update_from_sources(&mut scene, &mut sources, 16.0)
        .unwrap();

    assert_eq!(router.mouse_queue(), &[node]);
    assert!(scene.flags(node).is_hovered());
    assert_eq!(
        router.current_state().mouse.as_ref().map(|m| m.position),
        Some(Point::new(10.0, 10.0))
    );
}
