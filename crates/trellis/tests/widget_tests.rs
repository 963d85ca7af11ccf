use trellis::backend::configure_context;
use trellis::prelude::*;
use trellis::HeadlessBackend;
use trellis_test_utils::{CallLog, DropProbe, InputScript, run_frames};

/// A leaf that records its name each time it is drawn.
#[derive(Clone)]
struct Probe {
    name: &'static str,
    log: CallLog<&'static str>,
}

impl Widget for Probe {
    fn draw(&self, ui: &mut egui::Ui) {
        self.log.record(self.name);
        ui.label(self.name);
    }
}

#[derive(Clone)]
struct Tracked {
    _probe: DropProbe,
}

impl Widget for Tracked {
    fn draw(&self, _ui: &mut egui::Ui) {}
}

fn context() -> egui::Context {
    let ctx = egui::Context::default();
    configure_context(&ctx, Theme::Dark);
    ctx
}

fn draw_frame(ctx: &egui::Context, widget: &dyn Fn(&mut egui::Ui)) {
    let _ = ctx.run(egui::RawInput::default(), |ctx| {
        egui::CentralPanel::default().show(ctx, |ui| widget(ui));
    });
}

fn probe(name: &'static str, log: &CallLog<&'static str>) -> Probe {
    Probe {
        name,
        log: log.clone(),
    }
}

#[test]
fn test_children_draw_in_insertion_order() {
    let log = CallLog::new();
    let row = Row::new()
        .add(probe("a", &log))
        .add(probe("b", &log))
        .add(Row::new().add(probe("c", &log)))
        .add(probe("d", &log));

    let ctx = context();
    draw_frame(&ctx, &|ui| row.draw(ui));
    assert_eq!(log.calls(), vec!["a", "b", "c", "d"]);

    log.clear();
    draw_frame(&ctx, &|ui| row.draw(ui));
    assert_eq!(log.calls(), vec!["a", "b", "c", "d"]);
}

#[test]
fn test_stack_draws_every_child() {
    let log = CallLog::new();
    let stack = Stack::new().add(probe("back", &log)).add(probe("front", &log));
    assert_eq!(stack.len(), 2);

    let ctx = context();
    draw_frame(&ctx, &|ui| stack.draw(ui));
    assert_eq!(log.calls(), vec!["back", "front"]);
}

#[test]
fn test_empty_containers_draw_nothing() {
    let ctx = context();
    let row = Row::new();
    let stack = Stack::new();
    assert!(row.is_empty());
    draw_frame(&ctx, &|ui| {
        row.draw(ui);
        stack.draw(ui);
        AnyWidget::empty().draw(ui);
    });
}

#[test]
fn test_clone_is_independent() {
    let probe = DropProbe::new();
    let observer = probe.observer();

    let original = AnyWidget::new(Tracked { _probe: probe });
    let copy = original.clone();
    assert_eq!(observer.live(), 2);

    let a = original.downcast_ref::<Tracked>().unwrap() as *const Tracked;
    let b = copy.downcast_ref::<Tracked>().unwrap() as *const Tracked;
    assert_ne!(a, b);

    drop(original);
    assert_eq!(observer.drops(), 1);
    assert!(copy.is::<Tracked>());
    drop(copy);
    assert_eq!(observer.drops(), 2);
    assert_eq!(observer.live(), 0);
}

#[test]
fn test_take_moves_the_widget_once() {
    let probe = DropProbe::new();
    let observer = probe.observer();

    let mut holder = AnyWidget::new(Tracked { _probe: probe });
    let taken = holder.take();
    assert!(holder.is_empty());
    assert!(!taken.is_empty());
    assert_eq!(observer.drops(), 0);

    drop(holder);
    assert_eq!(observer.drops(), 0);
    drop(taken);
    assert_eq!(observer.drops(), 1);
}

#[test]
fn test_container_releases_children_once() {
    let probe = DropProbe::new();
    let observer = probe.observer();

    let row = Row::new().add(Tracked { _probe: probe });
    drop(row);
    assert_eq!(observer.drops(), 1);
    assert_eq!(observer.live(), 0);
}

#[test]
fn test_int_input_clamps_out_of_range_value() {
    let value = Binding::new(15);
    let input = IntInput::new("count", value.clone()).with_range(0, 10);

    let ctx = context();
    draw_frame(&ctx, &|ui| input.draw(ui));
    assert_eq!(value.get(), 10);

    for kept in [0, 10, 7] {
        value.set(kept);
        draw_frame(&ctx, &|ui| input.draw(ui));
        assert_eq!(value.get(), kept);
    }

    value.set(-4);
    draw_frame(&ctx, &|ui| input.draw(ui));
    assert_eq!(value.get(), 0);
}

#[test]
fn test_combo_box_leaves_unknown_value_alone() {
    let options = Binding::new(vec!["red".to_string(), "green".to_string()]);
    let current = Binding::new("blue".to_string());
    let combo = ComboBox::new("colour", options.clone(), current.clone());

    assert_eq!(combo.selected_index(), None);
    let ctx = context();
    draw_frame(&ctx, &|ui| combo.draw(ui));
    assert_eq!(current.get(), "blue");

    assert!(combo.choose(1));
    assert_eq!(current.get(), "green");
    assert_eq!(combo.selected_index(), Some(1));

    assert!(!combo.choose(5));
    assert_eq!(current.get(), "green");
}

#[test]
fn test_combo_box_entry_click_sets_current() {
    let options = Binding::new(vec![
        "red".to_string(),
        "green".to_string(),
        "blue".to_string(),
    ]);
    let current = Binding::new("red".to_string());
    let combo = ComboBox::new("colour", options, current.clone());
    let ui = |ctx: &egui::Context| {
        egui::CentralPanel::default().show(ctx, |ui| combo.draw(ui));
    };

    let mut backend = HeadlessBackend::default();
    run_frames(&mut backend, 1, ui);
    assert!(backend.text_rect("green").is_none());

    InputScript::new()
        .click_label(&backend, "red")
        .apply(&mut backend);
    run_frames(&mut backend, 4, ui);
    assert_eq!(current.get(), "red");

    InputScript::new()
        .click_label(&backend, "green")
        .apply(&mut backend);
    run_frames(&mut backend, 2, ui);
    assert_eq!(current.get(), "green");
    assert_eq!(combo.selected_index(), Some(1));
}

#[test]
fn test_combo_box_sees_option_changes() {
    let options = Binding::new(vec!["a".to_string()]);
    let current = Binding::new("b".to_string());
    let combo = ComboBox::new("letters", options.clone(), current);

    assert_eq!(combo.selected_index(), None);
    options.with_mut(|options| options.push("b".to_string()));
    assert_eq!(combo.selected_index(), Some(1));
}

fn tabs(log: &CallLog<&'static str>) -> TabBar {
    TabBar::new()
        .with_id("settings")
        .add(TabPage::new("General").add(probe("general", log)))
        .add(TabPage::new("Video").add(probe("video", log)))
        .add(TabPage::new("Audio").add(probe("audio", log)))
}

#[test]
fn test_first_tab_is_active_by_default() {
    let log = CallLog::new();
    let bar = tabs(&log);
    let ctx = context();
    let id = TabBar::id_for("settings");

    draw_frame(&ctx, &|ui| bar.draw(ui));
    assert_eq!(log.calls(), vec!["general"]);
    assert_eq!(TabBar::active(&ctx, id).as_deref(), Some("General"));

    log.clear();
    draw_frame(&ctx, &|ui| bar.draw(ui));
    assert_eq!(log.calls(), vec!["general"]);
}

#[test]
fn test_set_active_switches_page() {
    let log = CallLog::new();
    let bar = tabs(&log);
    let ctx = context();
    let id = TabBar::id_for("settings");

    draw_frame(&ctx, &|ui| bar.draw(ui));
    TabBar::set_active(&ctx, id, "Audio");

    log.clear();
    draw_frame(&ctx, &|ui| bar.draw(ui));
    assert_eq!(log.calls(), vec!["audio"]);
    assert_eq!(TabBar::active(&ctx, id).as_deref(), Some("Audio"));
}

#[test]
fn test_selection_before_first_frame_is_kept() {
    let log = CallLog::new();
    let bar = tabs(&log);
    let ctx = context();

    TabBar::set_active(&ctx, TabBar::id_for("settings"), "Video");
    draw_frame(&ctx, &|ui| bar.draw(ui));
    assert_eq!(log.calls(), vec!["video"]);
}

#[test]
fn test_stale_tab_falls_back_to_first() {
    let log = CallLog::new();
    let bar = tabs(&log);
    let ctx = context();
    let id = TabBar::id_for("settings");

    draw_frame(&ctx, &|ui| bar.draw(ui));
    TabBar::set_active(&ctx, id, "Missing");

    log.clear();
    draw_frame(&ctx, &|ui| bar.draw(ui));
    assert_eq!(log.calls(), vec!["general"]);
    assert_eq!(TabBar::active(&ctx, id).as_deref(), Some("General"));
}

#[test]
fn test_nested_bars_keep_their_own_pages() {
    let log = CallLog::new();
    let inner = TabBar::new()
        .with_id("inner")
        .add(TabPage::new("One").add(probe("one", &log)))
        .add(TabPage::new("Two").add(probe("two", &log)));
    let outer = TabBar::new()
        .with_id("outer")
        .add(TabPage::new("Nested").add(inner))
        .add(TabPage::new("Other").add(probe("other", &log)));

    let ctx = context();
    draw_frame(&ctx, &|ui| outer.draw(ui));
    assert_eq!(log.calls(), vec!["one"]);
    assert_eq!(
        TabBar::active(&ctx, TabBar::id_for("outer")).as_deref(),
        Some("Nested")
    );
    assert_eq!(
        TabBar::active(&ctx, TabBar::id_for("inner")).as_deref(),
        Some("One")
    );
}

#[test]
fn test_tab_page_outside_bar_draws() {
    let log = CallLog::new();
    let page = TabPage::new("Loose").add(probe("loose", &log));

    let ctx = context();
    draw_frame(&ctx, &|ui| page.draw(ui));
    assert_eq!(log.calls(), vec!["loose"]);
}

#[test]
fn test_window_draws_children() {
    let log = CallLog::new();
    let window = Window::new("Tools")
        .with_size((200.0, 100.0))
        .with_position((10.0, 10.0))
        .add(probe("inside", &log));

    let ctx = context();
    let _ = ctx.run(egui::RawInput::default(), |ctx| window.show(ctx));
    assert_eq!(log.calls(), vec!["inside"]);
    assert_eq!(window.title(), "Tools");
}
