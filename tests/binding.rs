//! Attribute, event and behavior bindings driven through whole view trees.

mod common;

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use pretty_assertions::assert_eq;

use common::{button_text, children, is_checked, label_text, object, root, tick, Harness};
use stardewui::behaviors::ViewBehavior;
use stardewui::context::{BindingContext, ContextUpdateTracker};
use stardewui::model::{DynamicModel, Value};
use stardewui::view::{raise_event, view_as, view_as_mut, EventArgs, View, ViewRef};
use stardewui::widgets::{CheckBox, Image, Label};
use stardewui::BindingError;

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

#[test]
fn test_first_then_second() {
    let model = DynamicModel::observable("Model")
        .with_property("Name", "First")
        .into_ref();
    let mut tree = common::build(
        r#"<lane><label text={Name} /><label text={:Name} /></lane>"#,
        object(&model),
    );
    let labels = children(&root(&tree));
    assert_eq!(label_text(&labels[0]), "First");
    assert_eq!(label_text(&labels[1]), "First");

    model.set_value("Name", "Second");
    assert!(tick(&mut tree));
    assert_eq!(label_text(&labels[0]), "Second");
    assert_eq!(label_text(&labels[1]), "First");
}

#[test]
fn test_update_is_idempotent() {
    let model = DynamicModel::observable("Model")
        .with_property("Name", "Abigail")
        .into_ref();
    let mut tree = common::build(r#"<label text={Name} />"#, object(&model));
    assert!(!tick(&mut tree));
    assert!(!tick(&mut tree));

    model.set_value("Name", "Sebastian");
    assert!(tick(&mut tree));
    assert!(!tick(&mut tree));
}

#[test]
fn test_plain_models_are_polled() {
    let model = DynamicModel::plain("Plain").with_property("Name", "A").into_ref();
    let mut tree = common::build(r#"<label text={Name} />"#, object(&model));
    let label = root(&tree);
    assert_eq!(label_text(&label), "A");

    model.set_value("Name", "B");
    assert!(tick(&mut tree));
    assert_eq!(label_text(&label), "B");
    assert!(!tick(&mut tree));
}

#[test]
fn test_literal_values_are_converted() {
    let mut tree = common::build(r#"<label text="Hi" max-lines="3" />"#, Value::Null);
    let label = root(&tree);
    assert_eq!(view_as::<Label>(&label).unwrap().max_lines(), 3);
    assert!(!tick(&mut tree));
}

#[test]
fn test_context_path_follows_leaf_and_intermediate_changes() {
    let stats = DynamicModel::observable("Stats").with_property("Level", 3).into_ref();
    let player = DynamicModel::observable("Player")
        .with_property("Stats", object(&stats))
        .into_ref();
    let model = DynamicModel::observable("Root")
        .with_property("Player", object(&player))
        .into_ref();
    let mut tree = common::build(r#"<label text={Player.Stats.Level} />"#, object(&model));
    let label = root(&tree);
    assert_eq!(label_text(&label), "3");

    stats.set_value("Level", 4);
    assert!(tick(&mut tree));
    assert_eq!(label_text(&label), "4");

    // A new player whose stats hold the same level must still be re-resolved,
    // and later edits must go to the new object.
    let new_stats = DynamicModel::observable("Stats").with_property("Level", 4).into_ref();
    let new_player = DynamicModel::observable("Player")
        .with_property("Stats", object(&new_stats))
        .into_ref();
    model.set_value("Player", object(&new_player));
    assert!(tick(&mut tree));
    assert_eq!(label_text(&label), "4");

    stats.set_value("Level", 99);
    assert!(!tick(&mut tree));
    assert_eq!(label_text(&label), "4");

    new_stats.set_value("Level", 5);
    assert!(tick(&mut tree));
    assert_eq!(label_text(&label), "5");
}

#[test]
fn test_unresolved_path_renders_empty_until_it_resolves() {
    let model = DynamicModel::observable("Root")
        .with_property("Player", Value::Null)
        .into_ref();
    let mut tree = common::build(r#"<label text={Player.Name} />"#, object(&model));
    let label = root(&tree);
    assert_eq!(label_text(&label), "");

    let player = DynamicModel::observable("Player")
        .with_property("Name", "Leah")
        .into_ref();
    model.set_value("Player", object(&player));
    tick(&mut tree);
    assert_eq!(label_text(&label), "Leah");
}

#[test]
fn test_two_way_binding_writes_back() {
    let model = DynamicModel::observable("Options")
        .with_property("Enabled", false)
        .into_ref();
    let mut tree = common::build(r#"<checkbox is-checked={<>Enabled} />"#, object(&model));
    let checkbox = root(&tree);
    assert!(!is_checked(&checkbox));

    view_as_mut::<CheckBox>(&checkbox).unwrap().set_checked(true);
    tick(&mut tree);
    assert_eq!(model.value("Enabled"), Value::Bool(true));

    model.set_value("Enabled", false);
    tick(&mut tree);
    assert!(!is_checked(&checkbox));
}

#[test]
fn test_output_binding_only_writes_on_view_change() {
    let model = DynamicModel::observable("Options")
        .with_property("Text", "unset")
        .into_ref();
    let mut tree = common::build(r#"<label text={>Text} />"#, object(&model));
    let label = root(&tree);
    assert_eq!(model.value("Text"), Value::from("unset"));

    view_as_mut::<Label>(&label).unwrap().set_text("typed");
    tick(&mut tree);
    assert_eq!(model.value("Text"), Value::from("typed"));
}

#[test]
fn test_unknown_view_property_fails() {
    let mut harness = Harness::new();
    let result = harness
        .engine()
        .create_tree_from_markup(r#"<label colour="red" />"#, Value::Null);
    assert!(matches!(
        result,
        Err(BindingError::UnknownViewProperty { property, .. }) if property == "colour"
    ));
}

// ---------------------------------------------------------------------------
// Ticks
// ---------------------------------------------------------------------------

fn counting_model(count: Rc<Cell<u32>>, last: Rc<Cell<Duration>>) -> Rc<DynamicModel> {
    DynamicModel::observable("Clock")
        .with_property("Name", "clock")
        .with_ticker(move |_, elapsed| {
            count.set(count.get() + 1);
            last.set(elapsed);
        })
        .into_ref()
}

#[test]
fn test_shared_context_ticks_once_per_frame() {
    let count = Rc::new(Cell::new(0));
    let last = Rc::new(Cell::new(Duration::ZERO));
    let clock = counting_model(count.clone(), last.clone());
    let model = DynamicModel::observable("Root")
        .with_property("Clock", object(&clock))
        .into_ref();
    let engine = Harness::new().engine();
    let mut tree = engine
        .create_tree_from_markup(
            r#"<lane>
                 <frame *context={Clock}><label text={Name} /></frame>
                 <frame *context={Clock}><label text={Name} /></frame>
               </lane>"#,
            object(&model),
        )
        .unwrap();
    assert_eq!(count.get(), 1);

    engine.begin_frame();
    tree.update(Duration::from_millis(50)).unwrap();
    assert_eq!(count.get(), 2);
    assert_eq!(last.get(), Duration::from_millis(50));

    // Same frame: the tick has already run.
    tree.update(Duration::from_millis(60)).unwrap();
    assert_eq!(count.get(), 2);
    assert_eq!(last.get(), Duration::from_millis(50));

    engine.begin_frame();
    tree.update(Duration::from_millis(40)).unwrap();
    assert_eq!(count.get(), 3);
    assert_eq!(last.get(), Duration::from_millis(40));
}

#[test]
fn test_trees_sharing_a_model_tick_it_once_per_frame() {
    let count = Rc::new(Cell::new(0));
    let last = Rc::new(Cell::new(Duration::ZERO));
    let clock = counting_model(count.clone(), last);
    let engine = Harness::new().engine();
    let markup = r#"<label text={Name} />"#;
    let mut first = engine.create_tree_from_markup(markup, object(&clock)).unwrap();
    let mut second = engine.create_tree_from_markup(markup, object(&clock)).unwrap();
    assert_eq!(count.get(), 2);

    engine.begin_frame();
    first.update(Duration::from_millis(16)).unwrap();
    second.update(Duration::from_millis(16)).unwrap();
    assert_eq!(count.get(), 3);
}

#[test]
fn test_tick_is_skipped_until_reset() {
    let count = Rc::new(Cell::new(0));
    let last = Rc::new(Cell::new(Duration::ZERO));
    let clock = counting_model(count.clone(), last);
    let first = BindingContext::root(object(&clock));
    let second = BindingContext::new(object(&clock), Some(first.clone()));

    ContextUpdateTracker::reset();
    assert!(first.tick(Duration::ZERO));
    assert!(!second.tick(Duration::ZERO));
    assert_eq!(count.get(), 1);

    assert!(!first.tick(Duration::ZERO));
    assert_eq!(count.get(), 1);

    ContextUpdateTracker::reset();
    assert!(second.tick(Duration::ZERO));
    assert_eq!(count.get(), 2);
}

#[test]
fn test_models_without_ticker_are_not_ticked() {
    let model = DynamicModel::observable("Still").into_ref();
    let context = BindingContext::root(object(&model));
    ContextUpdateTracker::reset();
    assert!(!context.tick(Duration::from_secs(1)));
    assert_eq!(ContextUpdateTracker::updated_count(), 0);
}

// ---------------------------------------------------------------------------
// Assets and translations
// ---------------------------------------------------------------------------

#[test]
fn test_asset_content_swap() {
    let mut harness = Harness::new();
    harness.assets.put("Sprites/Heart", "heart-v1");
    let mut tree = harness.build(r#"<image sprite={@Sprites/Heart} />"#, Value::Null);
    let image = root(&tree);
    assert_eq!(view_as::<Image>(&image).unwrap().sprite(), Value::from("heart-v1"));
    assert!(!tick(&mut tree));

    harness.assets.put("Sprites/Heart", "heart-v2");
    assert!(tick(&mut tree));
    assert_eq!(view_as::<Image>(&image).unwrap().sprite(), Value::from("heart-v2"));
}

#[test]
fn test_asset_name_swap() {
    let mut harness = Harness::new();
    harness.assets.put("Sprites/Heart", "heart");
    harness.assets.put("Sprites/Star", "star");
    let model = DynamicModel::observable("Icon")
        .with_property("Sprite", "Sprites/Heart")
        .into_ref();
    let mut tree = harness.build(r#"<image sprite={@<Sprite} />"#, object(&model));
    let image = root(&tree);
    assert_eq!(view_as::<Image>(&image).unwrap().sprite(), Value::from("heart"));

    model.set_value("Sprite", "Sprites/Star");
    assert!(tick(&mut tree));
    assert_eq!(view_as::<Image>(&image).unwrap().sprite(), Value::from("star"));
}

#[test]
fn test_missing_asset_appears_later() {
    let mut harness = Harness::new();
    let mut tree = harness.build(r#"<label text={@Strings/Late} />"#, Value::Null);
    let label = root(&tree);
    assert_eq!(label_text(&label), "");
    assert!(!tick(&mut tree));

    harness.assets.put("Strings/Late", "here now");
    assert!(tick(&mut tree));
    assert_eq!(label_text(&label), "here now");
}

#[test]
fn test_translation_binding() {
    let mut harness = Harness::new();
    harness.translations.add_translation("greeting", "Hello, farmer");
    let tree = harness.build(r#"<label text={#greeting} />"#, Value::Null);
    assert_eq!(label_text(&root(&tree)), "Hello, farmer");
}

#[test]
fn test_missing_translation_is_empty() {
    let tree = common::build(r#"<label text={#nowhere} />"#, Value::Null);
    assert_eq!(label_text(&root(&tree)), "");
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

fn shop(log: Rc<RefCell<Vec<Vec<Value>>>>) -> Rc<DynamicModel> {
    DynamicModel::observable("Shop")
        .with_property("Item", "Parsnip Seeds")
        .with_method("Buy", move |_, args| {
            log.borrow_mut().push(args.to_vec());
            Value::Bool(true)
        })
        .into_ref()
}

#[test]
fn test_event_arguments_from_literal_context_and_event() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let model = shop(log.clone());
    let tree = common::build(
        r#"<button text="Buy" click=|Buy("shop", Item, $Button)| />"#,
        object(&model),
    );
    let button = root(&tree);
    assert_eq!(button_text(&button), "Buy");

    let handled = raise_event(&button, "click", &EventArgs::new().with("Button", "Left"));
    assert!(handled);
    assert_eq!(
        log.borrow().clone(),
        vec![vec![
            Value::from("shop"),
            Value::from("Parsnip Seeds"),
            Value::from("Left"),
        ]]
    );
}

#[test]
fn test_event_argument_tracks_current_value() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let model = shop(log.clone());
    let tree = common::build(r#"<button click=|Buy(Item)| />"#, object(&model));
    let button = root(&tree);

    model.set_value("Item", "Cauliflower Seeds");
    raise_event(&button, "click", &EventArgs::new());
    assert_eq!(log.borrow()[0], vec![Value::from("Cauliflower Seeds")]);
}

#[test]
fn test_event_handler_on_parent_context() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let owner = shop(log.clone());
    let item = DynamicModel::observable("Item").with_property("Name", "Melon").into_ref();
    owner.set_value("Selected", object(&item));
    let tree = common::build(
        r#"<frame *context={Selected}><button click=|^Buy(Name)| /></frame>"#,
        object(&owner),
    );
    let button = common::content(&root(&tree)).unwrap();
    assert!(raise_event(&button, "click", &EventArgs::new()));
    assert_eq!(log.borrow()[0], vec![Value::from("Melon")]);
}

#[test]
fn test_method_changes_are_picked_up_next_frame() {
    let model = DynamicModel::observable("Counter")
        .with_property("Count", 0)
        .with_method("Increment", |m, _| {
            let next = m.value("Count").as_i64().unwrap_or_default() + 1;
            m.set_value("Count", next);
            Value::Null
        })
        .into_ref();
    let mut tree = common::build(
        r#"<lane><label text={Count} /><button click=|Increment()| /></lane>"#,
        object(&model),
    );
    let views = children(&root(&tree));
    assert!(!raise_event(&views[1], "click", &EventArgs::new()));
    raise_event(&views[1], "click", &EventArgs::new());
    tick(&mut tree);
    assert_eq!(label_text(&views[0]), "2");
}

#[test]
fn test_unknown_event_is_an_error() {
    let result = Harness::new()
        .engine()
        .create_tree_from_markup(r#"<label explode=|Boom()| />"#, Value::Null);
    assert!(matches!(result, Err(BindingError::UnknownEvent { event, .. }) if event == "explode"));
}

// ---------------------------------------------------------------------------
// Behaviors
// ---------------------------------------------------------------------------

/// Writes "<data> (<frames>)" into the label it is attached to.
struct FrameCounter {
    prefix: String,
    view: Option<ViewRef>,
    data: Value,
    frames: u32,
    detached: Rc<Cell<u32>>,
}

impl ViewBehavior for FrameCounter {
    fn can_attach(&self, view: &dyn View) -> bool {
        view.as_any().is::<Label>()
    }

    fn attach(&mut self, view: ViewRef) {
        self.view = Some(view);
    }

    fn set_data(&mut self, data: Value) {
        self.data = data;
    }

    fn update(&mut self, _elapsed: Duration) {
        let Some(view) = &self.view else {
            return;
        };
        let text = format!("{}{} ({})", self.prefix, self.data, self.frames);
        if let Some(mut label) = view_as_mut::<Label>(view) {
            label.set_text(text);
        }
        self.frames += 1;
    }

    fn detach(&mut self) {
        self.view = None;
        self.detached.set(self.detached.get() + 1);
    }
}

fn behavior_harness(detached: Rc<Cell<u32>>) -> Harness {
    Harness::new().configure(move |builder| {
        builder.register_behavior("frames", move |argument| {
            Box::new(FrameCounter {
                prefix: argument.to_owned(),
                view: None,
                data: Value::Null,
                frames: 0,
                detached: detached.clone(),
            })
        })
    })
}

#[test]
fn test_behavior_receives_data_and_frames() {
    let detached = Rc::new(Cell::new(0));
    let model = DynamicModel::observable("Crop").with_property("Name", "Kale").into_ref();
    let mut harness = behavior_harness(detached.clone());
    let mut tree = harness.build(r#"<label +frames={Name} />"#, object(&model));
    let label = root(&tree);
    assert_eq!(label_text(&label), "Kale (0)");

    tick(&mut tree);
    assert_eq!(label_text(&label), "Kale (1)");

    model.set_value("Name", "Garlic");
    tick(&mut tree);
    assert_eq!(label_text(&label), "Garlic (2)");
    assert_eq!(detached.get(), 0);
}

#[test]
fn test_behavior_argument_and_detach_on_rebind() {
    let detached = Rc::new(Cell::new(0));
    let mut harness = behavior_harness(detached.clone());
    let first = DynamicModel::observable("Crop").with_property("Name", "Kale").into_ref();
    let mut tree = harness.build(r#"<label +frames:crop-={Name} />"#, object(&first));
    let label = root(&tree);
    assert_eq!(label_text(&label), "crop-Kale (0)");

    let second = DynamicModel::observable("Crop").with_property("Name", "Hops").into_ref();
    tree.set_context(object(&second));
    tick(&mut tree);
    assert_eq!(detached.get(), 1);
    assert_eq!(label_text(&label), "crop-Hops (0)");
}

#[test]
fn test_behavior_skipped_for_incompatible_view() {
    let detached = Rc::new(Cell::new(0));
    let mut harness = behavior_harness(detached);
    let tree = harness.build(r#"<button text="Go" +frames="x" />"#, Value::Null);
    assert_eq!(button_text(&root(&tree)), "Go");
}
