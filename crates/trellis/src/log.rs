//! The application log: an append-only buffer indexed by line, a text
//! filter, the window that shows both, and the handle that writes to it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, Local};
use trellis_core::geometry::{Position, Size};

use crate::widget::Widget;
use crate::window::first_use_window;

/// Comma-separated include terms, with `-term` excluding.
///
/// Matching is ASCII case-insensitive substring search. A line passes when
/// it hits no exclude term and either there are no include terms or it hits
/// one of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogFilter {
    pattern: String,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl LogFilter {
    pub fn new(pattern: &str) -> Self {
        let mut filter = Self::default();
        filter.set_pattern(pattern);
        filter
    }

    pub fn set_pattern(&mut self, pattern: &str) {
        self.pattern = pattern.to_string();
        self.include.clear();
        self.exclude.clear();
        for term in pattern.split(',').map(str::trim).filter(|term| !term.is_empty()) {
            match term.strip_prefix('-') {
                Some(excluded) if !excluded.is_empty() => {
                    self.exclude.push(excluded.to_ascii_lowercase())
                }
                Some(_) => {}
                None => self.include.push(term.to_ascii_lowercase()),
            }
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn is_active(&self) -> bool {
        !self.include.is_empty() || !self.exclude.is_empty()
    }

    pub fn passes(&self, line: &str) -> bool {
        let line = line.to_ascii_lowercase();
        if self.exclude.iter().any(|term| line.contains(term.as_str())) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|term| line.contains(term.as_str()))
    }
}

/// Append-only text with the byte offset of every `'\n'`.
#[derive(Debug, Clone, Default)]
pub struct LogBuffer {
    text: String,
    line_offsets: Vec<usize>,
    filter: LogFilter,
    scroll_to_bottom: bool,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `text`, indexing only the newlines it brings.
    pub fn append(&mut self, text: &str) {
        let start = self.text.len();
        self.text.push_str(text);
        self.line_offsets
            .extend(text.match_indices('\n').map(|(index, _)| start + index));
        self.scroll_to_bottom = true;
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.line_offsets.clear();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_offsets(&self) -> &[usize] {
        &self.line_offsets
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Every line without its newline; a trailing partial line only if
    /// it is non-empty.
    pub fn lines(&self) -> impl Iterator<Item = &str> + '_ {
        let mut start = 0;
        let complete = self.line_offsets.iter().map(move |&end| {
            let line = &self.text[start..end];
            start = end + 1;
            line
        });
        let tail_start = self.line_offsets.last().map_or(0, |&end| end + 1);
        let tail = Some(&self.text[tail_start..]).filter(|tail| !tail.is_empty());
        complete.chain(tail)
    }

    pub fn filtered_lines(&self) -> impl Iterator<Item = &str> + '_ {
        self.lines().filter(|line| self.filter.passes(line))
    }

    /// What the log panel shows: the passing lines, or the whole buffer
    /// when the filter is inactive.
    pub fn visible_text(&self) -> String {
        if self.filter.is_active() {
            self.filtered_lines().collect::<Vec<_>>().join("\n")
        } else {
            self.text.clone()
        }
    }

    pub fn filter(&self) -> &LogFilter {
        &self.filter
    }

    pub fn set_filter(&mut self, pattern: &str) {
        self.filter.set_pattern(pattern);
    }

    pub fn wants_scroll_to_bottom(&self) -> bool {
        self.scroll_to_bottom
    }

    /// Read and reset the scroll request.
    pub fn take_scroll_to_bottom(&mut self) -> bool {
        std::mem::take(&mut self.scroll_to_bottom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn tag(self) -> &'static str {
        match self {
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// `"{%Y-%m-%d %H:%M:%S} {tag}: {message}\n"`
pub fn format_log_line(time: &DateTime<Local>, level: LogLevel, message: &str) -> String {
    format!("{} {}: {}\n", time.format("%Y-%m-%d %H:%M:%S"), level.tag(), message)
}

/// Writes timestamped lines into a log window's buffer.
///
/// Clones write to the same buffer, so callbacks can hold one.
#[derive(Clone)]
pub struct Logger {
    buffer: Rc<RefCell<LogBuffer>>,
}

impl Logger {
    pub fn log(&self, level: LogLevel, message: impl fmt::Display) {
        let message = message.to_string();
        match level {
            LogLevel::Info => tracing::info!(target: "trellis::log", "{message}"),
            LogLevel::Warning => tracing::warn!(target: "trellis::log", "{message}"),
            LogLevel::Error => tracing::error!(target: "trellis::log", "{message}"),
        }
        let line = format_log_line(&Local::now(), level, &message);
        self.buffer.borrow_mut().append(&line);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(LogLevel::Warning, message);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(LogLevel::Error, message);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").finish_non_exhaustive()
    }
}

/// A window showing a [`LogBuffer`] with clear, copy and filter controls.
///
/// Cloning copies the buffer; the clone logs independently.
pub struct LogWindow {
    title: String,
    size: Size,
    position: Position,
    buffer: Rc<RefCell<LogBuffer>>,
}

impl LogWindow {
    pub const DEFAULT_SIZE: Size = Size::new(500.0, 400.0);

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            size: Self::DEFAULT_SIZE,
            position: Position::ORIGIN,
            buffer: Rc::default(),
        }
    }

    pub fn with_size(mut self, size: impl Into<Size>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_position(mut self, position: impl Into<Position>) -> Self {
        self.position = position.into();
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn append(&self, text: &str) {
        self.buffer.borrow_mut().append(text);
    }

    pub fn logger(&self) -> Logger {
        Logger {
            buffer: Rc::clone(&self.buffer),
        }
    }

    pub fn with_buffer<R>(&self, f: impl FnOnce(&LogBuffer) -> R) -> R {
        f(&self.buffer.borrow())
    }

    pub fn with_buffer_mut<R>(&self, f: impl FnOnce(&mut LogBuffer) -> R) -> R {
        f(&mut self.buffer.borrow_mut())
    }

    pub fn show(&self, ctx: &egui::Context) {
        first_use_window(&self.title, self.size, self.position)
            .show(ctx, |ui| self.draw_contents(ui));
    }

    fn draw_contents(&self, ui: &mut egui::Ui) {
        let mut buffer = self.buffer.borrow_mut();

        let mut copy = false;
        ui.horizontal(|ui| {
            if ui.button("Clear").clicked() {
                buffer.clear();
            }
            copy = ui.button("Copy").clicked();

            let mut pattern = buffer.filter().pattern().to_string();
            let edit = egui::TextEdit::singleline(&mut pattern).hint_text("Filter");
            if ui.add(edit).changed() {
                buffer.set_filter(&pattern);
            }
        });
        if copy {
            ui.ctx().copy_text(buffer.visible_text());
        }
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing.y = 1.0;
                if buffer.filter().is_active() {
                    for line in buffer.filtered_lines() {
                        ui.monospace(line);
                    }
                } else {
                    ui.monospace(buffer.text());
                }
                if buffer.take_scroll_to_bottom() {
                    ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                }
            });
    }
}

impl Clone for LogWindow {
    fn clone(&self) -> Self {
        Self {
            title: self.title.clone(),
            size: self.size,
            position: self.position,
            buffer: Rc::new(RefCell::new(self.buffer.borrow().clone())),
        }
    }
}

impl fmt::Debug for LogWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogWindow")
            .field("title", &self.title)
            .field("size", &self.size)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Widget for LogWindow {
    fn draw(&self, ui: &mut egui::Ui) {
        self.show(ui.ctx());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_log_line() {
        let time = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(
            format_log_line(&time, LogLevel::Warning, "disk full"),
            "2024-03-09 07:05:01 warning: disk full\n"
        );
    }

    #[test]
    fn test_lone_dash_is_not_a_term() {
        let filter = LogFilter::new(" - , ");
        assert!(!filter.is_active());
        assert!(filter.passes("anything"));
    }

    #[test]
    fn test_scroll_request_is_consumed_once() {
        let mut buffer = LogBuffer::new();
        buffer.append("x\n");
        assert!(buffer.take_scroll_to_bottom());
        assert!(!buffer.take_scroll_to_bottom());
    }
}
