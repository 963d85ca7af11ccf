//! Hex view and editor windows over bound byte buffers.
//!
//! Click a byte to select it, type two hex digits and press Enter to write
//! it; the selection then moves to the next byte. Selection and the pending
//! input live in egui memory under the window's id, so the widgets
//! themselves stay plain values.

use trellis_core::geometry::{Position, Size};

use crate::binding::Binding;
use crate::widget::Widget;
use crate::window::first_use_window;

const DEFAULT_COLUMNS: usize = 16;

#[derive(Clone, Default)]
struct EditorState {
    selected: Option<usize>,
    input: String,
}

/// Printable ASCII as is, everything else as `.`.
pub fn ascii_column(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&byte| {
            if byte.is_ascii_graphic() || byte == b' ' {
                byte as char
            } else {
                '.'
            }
        })
        .collect()
}

/// One or two hex digits, surrounding blanks ignored.
pub fn parse_hex_byte(text: &str) -> Option<u8> {
    let text = text.trim();
    if text.is_empty() || text.len() > 2 {
        return None;
    }
    u8::from_str_radix(text, 16).ok()
}

pub fn row_count(len: usize, columns: usize) -> usize {
    len.div_ceil(columns.max(1))
}

fn draw_editor(ui: &mut egui::Ui, bytes: &mut [u8], columns: usize) {
    let id = ui.id().with("trellis::memory_editor");
    let mut state = ui
        .data(|data| data.get_temp::<EditorState>(id))
        .unwrap_or_default();
    if state.selected.is_some_and(|index| index >= bytes.len()) {
        state = EditorState::default();
    }

    ui.horizontal(|ui| {
        ui.monospace(format!("Range 0000..{:04X}", bytes.len().saturating_sub(1)));
        if let Some(index) = state.selected {
            ui.separator();
            ui.monospace(format!("{index:04X}:"));
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.input)
                    .desired_width(24.0)
                    .char_limit(2)
                    .font(egui::TextStyle::Monospace),
            );
            let submitted =
                response.lost_focus() && ui.input(|input| input.key_pressed(egui::Key::Enter));
            if submitted && let Some(value) = parse_hex_byte(&state.input) {
                bytes[index] = value;
                let next = (index + 1).min(bytes.len() - 1);
                state.selected = Some(next);
                state.input = format!("{:02X}", bytes[next]);
            }
        }
    });
    ui.separator();

    let row_height = ui.text_style_height(&egui::TextStyle::Monospace);
    let columns = columns.max(1);
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show_rows(ui, row_height, row_count(bytes.len(), columns), |ui, rows| {
            for row in rows {
                let start = row * columns;
                let end = (start + columns).min(bytes.len());
                ui.horizontal(|ui| {
                    ui.spacing_mut().item_spacing.x = 4.0;
                    ui.monospace(format!("{start:04X}:"));
                    for index in start..end {
                        let text = egui::RichText::new(format!("{:02X}", bytes[index])).monospace();
                        if ui
                            .selectable_label(state.selected == Some(index), text)
                            .clicked()
                        {
                            state.selected = Some(index);
                            state.input = format!("{:02X}", bytes[index]);
                        }
                    }
                    ui.monospace(ascii_column(&bytes[start..end]));
                });
            }
        });

    ui.data_mut(|data| data.insert_temp(id, state));
}

/// A window with a hex editor over a bound byte buffer.
///
/// The buffer is edited in place and never resized.
#[derive(Clone, Debug)]
pub struct MemoryEditorWindow {
    title: String,
    bytes: Binding<Vec<u8>>,
    size: Size,
    position: Position,
    columns: usize,
}

impl MemoryEditorWindow {
    pub fn new(title: impl Into<String>, bytes: Binding<Vec<u8>>) -> Self {
        Self {
            title: title.into(),
            bytes,
            size: Size::ZERO,
            position: Position::ORIGIN,
            columns: DEFAULT_COLUMNS,
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

    /// Bytes per row.
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }
}

impl Widget for MemoryEditorWindow {
    fn draw(&self, ui: &mut egui::Ui) {
        first_use_window(&self.title, self.size, self.position).show(ui.ctx(), |ui| {
            self.bytes
                .with_mut(|bytes| draw_editor(ui, bytes, self.columns));
        });
    }
}

/// A hex editor over one sector of a bound list, picked by a bound index.
///
/// Draws nothing while the index is out of range.
#[derive(Clone, Debug)]
pub struct SectorMemoryEditorWindow {
    title: String,
    sectors: Binding<Vec<Vec<u8>>>,
    current: Binding<i32>,
    size: Size,
    position: Position,
    columns: usize,
}

impl SectorMemoryEditorWindow {
    pub fn new(
        title: impl Into<String>,
        sectors: Binding<Vec<Vec<u8>>>,
        current: Binding<i32>,
    ) -> Self {
        Self {
            title: title.into(),
            sectors,
            current,
            size: Size::ZERO,
            position: Position::ORIGIN,
            columns: DEFAULT_COLUMNS,
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

    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// The sector index to show, if it names an existing sector.
    pub fn current_sector(&self) -> Option<usize> {
        let index = usize::try_from(self.current.get()).ok()?;
        let len = self.sectors.with(Vec::len);
        (index < len).then_some(index)
    }
}

impl Widget for SectorMemoryEditorWindow {
    fn draw(&self, ui: &mut egui::Ui) {
        let Some(index) = self.current_sector() else {
            return;
        };
        first_use_window(&self.title, self.size, self.position)
            .show(ui.ctx(), |ui| {
                ui.label(format!("Sector {index}"));
                self.sectors.with_mut(|sectors| {
                    if let Some(sector) = sectors.get_mut(index) {
                        draw_editor(ui, sector, self.columns);
                    }
                });
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_column_masks_unprintable() {
        assert_eq!(ascii_column(b"Hi\x00\xff !"), "Hi.. !");
    }

    #[test]
    fn test_parse_hex_byte() {
        assert_eq!(parse_hex_byte("ff"), Some(0xff));
        assert_eq!(parse_hex_byte(" 0A "), Some(0x0a));
        assert_eq!(parse_hex_byte("7"), Some(7));
        assert_eq!(parse_hex_byte("100"), None);
        assert_eq!(parse_hex_byte("zz"), None);
        assert_eq!(parse_hex_byte(""), None);
    }

    #[test]
    fn test_row_count_rounds_up() {
        assert_eq!(row_count(0, 16), 0);
        assert_eq!(row_count(16, 16), 1);
        assert_eq!(row_count(17, 16), 2);
    }

    #[test]
    fn test_out_of_range_sector_is_none() {
        let sectors = Binding::new(vec![vec![0u8; 4], vec![1u8; 4]]);
        let current = Binding::new(2);
        let editor = SectorMemoryEditorWindow::new("disk", sectors, current.clone());
        assert_eq!(editor.current_sector(), None);
        current.set(-1);
        assert_eq!(editor.current_sector(), None);
        current.set(1);
        assert_eq!(editor.current_sector(), Some(1));
    }
}
