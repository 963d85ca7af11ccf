use trellis::backend::{FontRegistry, egui::FullOutput};
use trellis::prelude::*;
use trellis::{Backend, BackendError, HeadlessBackend, HeadlessConfig};
use trellis_test_utils::{CallLog, InputScript};

/// Forwards to a headless backend and records lifecycle calls.
struct Recording {
    inner: HeadlessBackend,
    calls: CallLog<&'static str>,
}

impl Backend for Recording {
    fn context(&self) -> &egui::Context {
        self.inner.context()
    }

    fn should_close(&self) -> bool {
        self.inner.should_close()
    }

    fn request_close(&mut self) {
        self.calls.record("request_close");
        self.inner.request_close();
    }

    fn begin_frame(&mut self) -> egui::RawInput {
        self.calls.record("begin_frame");
        self.inner.begin_frame()
    }

    fn end_frame(&mut self, output: FullOutput) -> Result<(), BackendError> {
        self.calls.record("end_frame");
        self.inner.end_frame(output)
    }

    fn teardown(&mut self) {
        self.calls.record("teardown");
        self.inner.teardown();
    }

    fn fonts_mut(&mut self) -> &mut FontRegistry {
        self.inner.fonts_mut()
    }
}

fn recording(frame_limit: u64) -> (Recording, CallLog<&'static str>) {
    let calls = CallLog::new();
    let backend = Recording {
        inner: HeadlessBackend::new(HeadlessConfig::default().with_frame_limit(frame_limit)),
        calls: calls.clone(),
    };
    (backend, calls)
}

fn headless_app() -> Application {
    Application::new(
        AppConfig::default()
            .with_log_size((200.0, 100.0))
            .with_log_position((560.0, 460.0)),
    )
}

#[test]
fn test_frames_require_init() {
    let mut app = headless_app();
    assert_eq!(app.state(), AppState::Uninitialized);
    assert!(!app.should_run());
    assert!(matches!(app.run_frame(), Err(AppError::NotInitialized)));
    assert!(matches!(app.run(), Err(AppError::NotInitialized)));
    assert!(matches!(
        app.load_texture_bytes("none", Vec::new()),
        Err(AppError::NotInitialized)
    ));
}

#[test]
fn test_init_twice_fails() {
    let mut app = headless_app();
    app.init_headless().unwrap();
    assert_eq!(app.state(), AppState::Initialized);
    assert!(matches!(app.init_headless(), Err(AppError::AlreadyInitialized)));
}

#[test]
fn test_closed_application_stays_closed() {
    let mut app = headless_app();
    app.init_headless().unwrap();
    app.run_frame().unwrap();
    assert_eq!(app.state(), AppState::Running);

    app.close();
    assert_eq!(app.state(), AppState::Closed);
    assert!(matches!(app.run_frame(), Err(AppError::Closed)));
    assert!(matches!(app.init_headless(), Err(AppError::Closed)));
}

#[test]
fn test_run_stops_at_frame_limit_and_tears_down_once() {
    let (backend, calls) = recording(3);
    let mut app = headless_app();
    app.init_with_backend(backend).unwrap();
    app.run().unwrap();

    assert_eq!(app.state(), AppState::Closed);
    assert_eq!(
        calls.calls(),
        vec![
            "begin_frame",
            "end_frame",
            "begin_frame",
            "end_frame",
            "begin_frame",
            "end_frame",
            "teardown",
        ]
    );

    app.close();
    drop(app);
    assert_eq!(calls.calls().iter().filter(|call| **call == "teardown").count(), 1);
}

#[test]
fn test_drop_tears_down() {
    let (backend, calls) = recording(10);
    let mut app = headless_app();
    app.init_with_backend(backend).unwrap();
    app.run_frame().unwrap();
    drop(app);
    assert_eq!(calls.calls().last(), Some(&"teardown"));
}

#[test]
fn test_request_close_ends_run() {
    let (backend, calls) = recording(100);
    let mut app = headless_app();
    app.init_with_backend(backend).unwrap();
    app.run_frame().unwrap();
    app.request_close();
    assert!(!app.should_run());
    app.run().unwrap();

    assert_eq!(calls.calls().iter().filter(|call| **call == "begin_frame").count(), 1);
}

#[test]
fn test_click_updates_bound_state() {
    let clicks = Binding::new(0);
    let text = Binding::new(String::from("idle"));

    let button = {
        let clicks = clicks.clone();
        let text = text.clone();
        ClickButton::new("Click", move || {
            clicks.with_mut(|count| *count += 1);
            text.set(format!("clicked {}", clicks.get()));
        })
    };

    let mut backend = HeadlessBackend::new(HeadlessConfig::default());
    InputScript::new()
        .click(1, egui::pos2(14.0, 16.0))
        .apply(&mut backend);

    let mut app = headless_app();
    app.init_with_backend(backend).unwrap();
    app.add(Row::new().add(button).add(BoundLabel::new(text.clone())));

    let mut seen = Vec::new();
    for _ in 0..5 {
        app.run_frame().unwrap();
        seen.push(clicks.get());
    }
    assert_eq!(seen, vec![0, 0, 1, 1, 1]);
    assert_eq!(text.get(), "clicked 1");
}

#[test]
fn test_roots_draw_in_order_each_frame() {
    #[derive(Clone)]
    struct Named(&'static str, CallLog<&'static str>);

    impl Widget for Named {
        fn draw(&self, _ui: &mut egui::Ui) {
            self.1.record(self.0);
        }
    }

    let log = CallLog::new();
    let mut app = Application::builder()
        .with_root(Named("first", log.clone()))
        .build();
    app.add(Named("second", log.clone()));
    assert_eq!(app.roots().len(), 2);

    app.init_headless().unwrap();
    app.run_frame().unwrap();
    app.run_frame().unwrap();
    assert_eq!(log.calls(), vec!["first", "second", "first", "second"]);
}

#[test]
fn test_log_messages_reach_the_window() {
    let mut app = headless_app();
    app.info("hello");
    app.warn("careful");
    let logger = app.logger();
    logger.error("broken");

    app.init_headless().unwrap();
    app.run_frame().unwrap();

    let lines: Vec<String> = app
        .log_window()
        .with_buffer(|buffer| buffer.lines().map(str::to_string).collect());
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with("info: hello"));
    assert!(lines[1].ends_with("warning: careful"));
    assert!(lines[2].ends_with("error: broken"));
}

#[test]
fn test_log_window_follows_config() {
    let app = Application::new(AppConfig::default().with_log_title("Events"));
    assert_eq!(app.log_window().title(), "Events");
}

#[test]
fn test_textures_load_after_init() {
    let mut app = headless_app();
    app.init_headless().unwrap();

    let mut png = Vec::new();
    image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 255]))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let texture = app.load_texture_bytes("red", png).unwrap();
    assert_eq!((texture.width(), texture.height()), (4, 2));

    assert!(matches!(
        app.load_texture_file("/definitely/not/here.png"),
        Err(AppError::Backend(_))
    ));
}

#[test]
fn test_state_button_is_true_while_held() {
    let held = Binding::new(false);
    let pos = egui::pos2(14.0, 16.0);

    let mut backend = HeadlessBackend::new(HeadlessConfig::default());
    InputScript::new()
        .move_to(1, pos)
        .press(1, pos)
        .release(4, pos)
        .apply(&mut backend);

    let mut app = headless_app();
    app.init_with_backend(backend).unwrap();
    app.add(Row::new().add(StateButton::new("Hold", held.clone())));

    let mut seen = Vec::new();
    for _ in 0..6 {
        app.run_frame().unwrap();
        seen.push(held.get());
    }
    assert!(!seen[0]);
    assert!(seen[2] && seen[3]);
    assert!(!seen[5]);
}

#[test]
fn test_run_after_close_fails() {
    let mut app = headless_app();
    app.init_headless().unwrap();
    app.close();
    assert!(matches!(app.run(), Err(AppError::Closed)));
}

#[test]
fn test_failed_font_is_kept_for_retry() {
    let mut app = Application::builder()
        .with_font(b"not a font".to_vec())
        .build();

    assert!(matches!(app.init_headless(), Err(AppError::Backend(_))));
    assert_eq!(app.state(), AppState::Uninitialized);

    // the font is still configured on retry
    assert!(matches!(app.init_headless(), Err(AppError::Backend(_))));
    assert_eq!(app.state(), AppState::Uninitialized);
}
