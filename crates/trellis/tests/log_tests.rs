use trellis::{HeadlessBackend, LogBuffer, LogFilter, LogLevel, LogWindow};
use trellis_test_utils::{InputScript, run_frames};

#[test]
fn test_offsets_follow_appends() {
    let mut buffer = LogBuffer::new();
    buffer.append("a\nb\nc");
    assert_eq!(buffer.line_offsets(), &[1, 3]);

    buffer.append("d\n");
    assert_eq!(buffer.text(), "a\nb\ncd\n");
    assert_eq!(buffer.line_offsets(), &[1, 3, 6]);
    assert_eq!(buffer.lines().collect::<Vec<_>>(), vec!["a", "b", "cd"]);
}

#[test]
fn test_offsets_match_newlines() {
    let mut buffer = LogBuffer::new();
    for chunk in ["first\n", "", "sec", "ond\nthird\n\n", "tail"] {
        buffer.append(chunk);
    }
    let expected: Vec<usize> = buffer
        .text()
        .char_indices()
        .filter(|(_, c)| *c == '\n')
        .map(|(index, _)| index)
        .collect();
    assert_eq!(buffer.line_offsets(), expected.as_slice());
    assert_eq!(
        buffer.lines().collect::<Vec<_>>(),
        vec!["first", "second", "third", "", "tail"]
    );
}

#[test]
fn test_clear_then_append_starts_fresh() {
    let mut buffer = LogBuffer::new();
    buffer.append("old\nlines\n");
    buffer.clear();
    assert!(buffer.is_empty());
    assert!(buffer.line_offsets().is_empty());

    buffer.append("x\n");
    assert_eq!(buffer.line_offsets(), &[1]);
}

#[test]
fn test_clear_then_same_content_matches_fresh_buffer() {
    let content = ["one\n", "two\nthr", "ee\n"];
    let mut fresh = LogBuffer::new();
    for chunk in content {
        fresh.append(chunk);
    }

    let mut reused = LogBuffer::new();
    for chunk in content {
        reused.append(chunk);
    }
    reused.clear();
    for chunk in content {
        reused.append(chunk);
    }

    assert_eq!(reused.text(), fresh.text());
    assert_eq!(reused.line_offsets(), fresh.line_offsets());
}

#[test]
fn test_filter_selects_matching_lines() {
    let mut buffer = LogBuffer::new();
    buffer.append("a\nb\nc");
    buffer.append("d\n");
    buffer.set_filter("b");
    assert_eq!(buffer.filtered_lines().collect::<Vec<_>>(), vec!["b"]);
    assert_eq!(buffer.visible_text(), "b");

    // filtering is a view; the buffer keeps everything
    buffer.set_filter("");
    assert_eq!(buffer.visible_text(), "a\nb\ncd\n");
}

#[test]
fn test_filter_is_idempotent() {
    let mut buffer = LogBuffer::new();
    buffer.append("info: ready\nerror: disk\ninfo: done\n");
    buffer.set_filter("info");
    let first: Vec<String> = buffer.filtered_lines().map(str::to_string).collect();
    buffer.set_filter("info");
    let second: Vec<String> = buffer.filtered_lines().map(str::to_string).collect();
    assert_eq!(first, second);
    assert_eq!(first, vec!["info: ready", "info: done"]);
}

#[test]
fn test_filter_terms() {
    let filter = LogFilter::new("Error, warn ,-disk");
    assert!(filter.is_active());
    assert!(filter.passes("ERROR: network"));
    assert!(filter.passes("warning: slow"));
    assert!(!filter.passes("error: disk full"));
    assert!(!filter.passes("info: ok"));

    let exclude_only = LogFilter::new("-noise");
    assert!(exclude_only.passes("anything"));
    assert!(!exclude_only.passes("some noise"));

    assert!(!LogFilter::new(" , ").is_active());
    assert_eq!(LogFilter::new("a,b").pattern(), "a,b");
}

#[test]
fn test_level_tags() {
    let tags: Vec<String> = [LogLevel::Info, LogLevel::Warning, LogLevel::Error]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(tags, ["info", "warning", "error"]);
}

#[test]
fn test_logger_appends_tagged_lines() {
    let window = LogWindow::new("Log");
    let logger = window.logger();
    logger.info("started");
    logger.warn("careful");
    window.logger().error(format_args!("failed {} times", 3));

    let lines: Vec<String> = window.with_buffer(|buffer| buffer.lines().map(str::to_string).collect());
    assert_eq!(lines.len(), 3);
    assert!(lines[0].ends_with(" info: started"));
    assert!(lines[1].ends_with(" warning: careful"));
    assert!(lines[2].ends_with(" error: failed 3 times"));
    // "YYYY-MM-DD HH:MM:SS " prefix
    assert_eq!(lines[0].find(" info"), Some(19));
}

#[test]
fn test_log_window_clone_copies_contents() {
    let window = LogWindow::new("Log");
    window.append("before\n");

    let copy = window.clone();
    window.append("after\n");

    assert_eq!(copy.with_buffer(|buffer| buffer.text().to_string()), "before\n");
    assert_eq!(
        window.with_buffer(|buffer| buffer.text().to_string()),
        "before\nafter\n"
    );
}

#[test]
fn test_log_window_shows_filtered_text() {
    let window = LogWindow::new("Log");
    window.append("keep\ndrop\n");
    window.with_buffer_mut(|buffer| buffer.set_filter("keep"));

    let ctx = egui::Context::default();
    let _ = ctx.run(egui::RawInput::default(), |ctx| window.show(ctx));
    assert!(!window.with_buffer(|buffer| buffer.wants_scroll_to_bottom()));
    assert_eq!(window.with_buffer(|buffer| buffer.visible_text()), "keep");
}

fn placed_log() -> LogWindow {
    LogWindow::new("Log")
        .with_position((10.0, 10.0))
        .with_size((300.0, 200.0))
}

#[test]
fn test_copy_button_copies_visible_text() {
    let window = placed_log();
    window.append("keep\ndrop\nkeep going\n");
    window.with_buffer_mut(|buffer| buffer.set_filter("keep"));

    let mut backend = HeadlessBackend::default();
    run_frames(&mut backend, 2, |ctx| window.show(ctx));
    assert_eq!(backend.clipboard(), None);

    InputScript::new()
        .click_label(&backend, "Copy")
        .apply(&mut backend);
    run_frames(&mut backend, 2, |ctx| window.show(ctx));

    let visible = window.with_buffer(|buffer| buffer.visible_text());
    assert_eq!(visible, "keep\nkeep going");
    assert_eq!(backend.clipboard(), Some(visible.as_str()));
    assert_eq!(
        window.with_buffer(|buffer| buffer.text().to_string()),
        "keep\ndrop\nkeep going\n"
    );
}

#[test]
fn test_clear_button_empties_the_buffer() {
    let window = placed_log();
    window.append("a\nb\n");

    let mut backend = HeadlessBackend::default();
    run_frames(&mut backend, 2, |ctx| window.show(ctx));
    InputScript::new()
        .click_label(&backend, "Clear")
        .apply(&mut backend);
    run_frames(&mut backend, 2, |ctx| window.show(ctx));

    assert!(window.with_buffer(|buffer| buffer.is_empty()));
    assert!(window.with_buffer(|buffer| buffer.line_offsets().is_empty()));

    window.append("a\nb\n");
    let mut fresh = LogBuffer::new();
    fresh.append("a\nb\n");
    assert_eq!(
        window.with_buffer(|buffer| buffer.line_offsets().to_vec()),
        fresh.line_offsets()
    );
}
