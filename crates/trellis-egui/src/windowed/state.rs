//! Translation of window events into egui input.

use trellis_core::profiling::profile_function;
use trellis_render::RenderableWindow;
use trellis_winit::event::{
    ElementState, Event, HandleStatus, Key, KeyCode, KeyEvent, ModifiersState, MouseButton,
    MouseScrollDelta, NamedKey, PhysicalKey,
};

use super::clipboard::Clipboard;

pub(crate) struct InputState {
    input: egui::RawInput,
    pointer_pos: Option<egui::Pos2>,
}

impl InputState {
    pub fn new(scale_factor: f32) -> Self {
        let mut input = egui::RawInput {
            focused: true,
            ..Default::default()
        };
        input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(scale_factor);
        Self {
            input,
            pointer_pos: None,
        }
    }

    /// Hand over everything accumulated since the last frame.
    pub fn take_input(&mut self, ctx: &egui::Context, window: &RenderableWindow) -> egui::RawInput {
        profile_function!();
        let size = window.window().physical_size();
        let points = egui::vec2(size.width as f32, size.height as f32) / pixels_per_point(ctx, window);

        self.input.screen_rect = (points.x > 0.0 && points.y > 0.0)
            .then(|| egui::Rect::from_min_size(egui::Pos2::ZERO, points));
        self.input.max_texture_side = Some(window.graphics_context().max_texture_dimension_2d() as usize);
        self.input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(window.window().scale_factor() as f32);

        self.input.take()
    }

    pub fn on_event(
        &mut self,
        ctx: &egui::Context,
        window: &RenderableWindow,
        clipboard: &mut Clipboard,
        event: &Event,
    ) -> HandleStatus {
        match event {
            Event::ScaleFactorChanged(scale_factor) => {
                self.input
                    .viewports
                    .entry(egui::ViewportId::ROOT)
                    .or_default()
                    .native_pixels_per_point = Some(*scale_factor as f32);
                HandleStatus::handled()
            }
            Event::Focused(focused) => {
                self.input.focused = *focused;
                self.input.events.push(egui::Event::WindowFocused(*focused));
                HandleStatus::handled()
            }
            Event::MouseButtonDown(button) | Event::MouseButtonUp(button) => {
                let pressed = matches!(event, Event::MouseButtonDown(_));
                if let (Some(pos), Some(button)) = (self.pointer_pos, translate_mouse_button(*button)) {
                    self.input.events.push(egui::Event::PointerButton {
                        pos,
                        button,
                        pressed,
                        modifiers: self.input.modifiers,
                    });
                }
                consumed_if(ctx.wants_pointer_input())
            }
            Event::MouseScrolled(delta) => {
                let (unit, delta) = match *delta {
                    MouseScrollDelta::LineDelta(x, y) => (egui::MouseWheelUnit::Line, egui::vec2(x, y)),
                    MouseScrollDelta::PixelDelta(pos) => (
                        egui::MouseWheelUnit::Point,
                        egui::vec2(pos.x as f32, pos.y as f32) / pixels_per_point(ctx, window),
                    ),
                };
                self.input.events.push(egui::Event::MouseWheel {
                    unit,
                    delta,
                    modifiers: self.input.modifiers,
                });
                consumed_if(ctx.wants_pointer_input())
            }
            Event::MouseMoved(pos) => {
                // logical -> physical -> points; zoom makes the last two differ
                let scale = window.window().scale_factor() as f32 / pixels_per_point(ctx, window);
                let pos = egui::pos2(pos.x as f32 * scale, pos.y as f32 * scale);
                self.pointer_pos = Some(pos);
                self.input.events.push(egui::Event::PointerMoved(pos));
                consumed_if(ctx.is_using_pointer())
            }
            Event::MouseLeft => {
                self.pointer_pos = None;
                self.input.events.push(egui::Event::PointerGone);
                HandleStatus::handled()
            }
            Event::ModifiersChanged(state) => {
                self.input.modifiers = translate_modifiers(*state);
                HandleStatus::handled()
            }
            Event::KeyInput(key_event) => {
                if key_event.is_synthetic && key_event.state == ElementState::Pressed {
                    return HandleStatus::handled();
                }
                self.on_key(key_event, clipboard);
                consumed_if(
                    ctx.wants_keyboard_input()
                        || matches!(key_event.logical_key, Key::Named(NamedKey::Tab)),
                )
            }
            _ => HandleStatus::ignored(),
        }
    }

    fn on_key(&mut self, event: &KeyEvent, clipboard: &mut Clipboard) {
        let pressed = event.state == ElementState::Pressed;
        let modifiers = self.input.modifiers;

        let physical_key = match event.physical_key {
            PhysicalKey::Code(code) => key_from_key_code(code),
            PhysicalKey::Unidentified(_) => None,
        };
        let logical_key = match &event.logical_key {
            Key::Named(named) => key_from_named_key(*named),
            Key::Character(text) => egui::Key::from_name(text.as_str()),
            Key::Unidentified(_) | Key::Dead(_) => None,
        };

        if let Some(key) = logical_key.or(physical_key) {
            if pressed {
                if is_cut_command(modifiers, key) {
                    self.input.events.push(egui::Event::Cut);
                    return;
                }
                if is_copy_command(modifiers, key) {
                    self.input.events.push(egui::Event::Copy);
                    return;
                }
                if is_paste_command(modifiers, key) {
                    if let Some(text) = clipboard.get() {
                        self.input.events.push(egui::Event::Paste(text.replace("\r\n", "\n")));
                    }
                    return;
                }
            }

            self.input.events.push(egui::Event::Key {
                key,
                physical_key,
                pressed,
                repeat: event.repeat,
                modifiers,
            });
        }

        let is_command = modifiers.ctrl || modifiers.command || modifiers.mac_cmd;
        if let Some(text) = &event.text
            && pressed
            && !is_command
            && !text.is_empty()
            && text.chars().all(is_printable_char)
        {
            self.input.events.push(egui::Event::Text(text.to_string()));
        }
    }
}

fn consumed_if(consumed: bool) -> HandleStatus {
    if consumed {
        HandleStatus::consumed()
    } else {
        HandleStatus::handled()
    }
}

fn pixels_per_point(ctx: &egui::Context, window: &RenderableWindow) -> f32 {
    ctx.zoom_factor() * window.window().scale_factor() as f32
}

fn is_printable_char(chr: char) -> bool {
    // private use area holds the function keys on macOS
    let is_private_use = ('\u{e000}'..='\u{f8ff}').contains(&chr)
        || ('\u{f0000}'..='\u{ffffd}').contains(&chr)
        || ('\u{100000}'..='\u{10fffd}').contains(&chr);
    !is_private_use && !chr.is_ascii_control()
}

fn is_cut_command(modifiers: egui::Modifiers, key: egui::Key) -> bool {
    key == egui::Key::Cut
        || (modifiers.command && key == egui::Key::X)
        || (cfg!(target_os = "windows") && modifiers.shift && key == egui::Key::Delete)
}

fn is_copy_command(modifiers: egui::Modifiers, key: egui::Key) -> bool {
    key == egui::Key::Copy
        || (modifiers.command && key == egui::Key::C)
        || (cfg!(target_os = "windows") && modifiers.ctrl && key == egui::Key::Insert)
}

fn is_paste_command(modifiers: egui::Modifiers, key: egui::Key) -> bool {
    key == egui::Key::Paste
        || (modifiers.command && key == egui::Key::V)
        || (cfg!(target_os = "windows") && modifiers.shift && key == egui::Key::Insert)
}

fn translate_modifiers(state: ModifiersState) -> egui::Modifiers {
    let mac = cfg!(target_os = "macos");
    egui::Modifiers {
        alt: state.alt_key(),
        ctrl: state.control_key(),
        shift: state.shift_key(),
        mac_cmd: mac && state.super_key(),
        command: if mac { state.super_key() } else { state.control_key() },
    }
}

fn translate_mouse_button(button: MouseButton) -> Option<egui::PointerButton> {
    match button {
        MouseButton::Left => Some(egui::PointerButton::Primary),
        MouseButton::Right => Some(egui::PointerButton::Secondary),
        MouseButton::Middle => Some(egui::PointerButton::Middle),
        MouseButton::Back => Some(egui::PointerButton::Extra1),
        MouseButton::Forward => Some(egui::PointerButton::Extra2),
        MouseButton::Other(_) => None,
    }
}

fn key_from_named_key(named: NamedKey) -> Option<egui::Key> {
    use egui::Key;
    Some(match named {
        NamedKey::Enter => Key::Enter,
        NamedKey::Tab => Key::Tab,
        NamedKey::Space => Key::Space,
        NamedKey::Backspace => Key::Backspace,
        NamedKey::Delete => Key::Delete,
        NamedKey::Insert => Key::Insert,
        NamedKey::Escape => Key::Escape,
        NamedKey::ArrowDown => Key::ArrowDown,
        NamedKey::ArrowLeft => Key::ArrowLeft,
        NamedKey::ArrowRight => Key::ArrowRight,
        NamedKey::ArrowUp => Key::ArrowUp,
        NamedKey::Home => Key::Home,
        NamedKey::End => Key::End,
        NamedKey::PageDown => Key::PageDown,
        NamedKey::PageUp => Key::PageUp,
        NamedKey::Cut => Key::Cut,
        NamedKey::Copy => Key::Copy,
        NamedKey::Paste => Key::Paste,
        NamedKey::F1 => Key::F1,
        NamedKey::F2 => Key::F2,
        NamedKey::F3 => Key::F3,
        NamedKey::F4 => Key::F4,
        NamedKey::F5 => Key::F5,
        NamedKey::F6 => Key::F6,
        NamedKey::F7 => Key::F7,
        NamedKey::F8 => Key::F8,
        NamedKey::F9 => Key::F9,
        NamedKey::F10 => Key::F10,
        NamedKey::F11 => Key::F11,
        NamedKey::F12 => Key::F12,
        _ => return None,
    })
}

fn key_from_key_code(code: KeyCode) -> Option<egui::Key> {
    use egui::Key;
    Some(match code {
        KeyCode::ArrowDown => Key::ArrowDown,
        KeyCode::ArrowLeft => Key::ArrowLeft,
        KeyCode::ArrowRight => Key::ArrowRight,
        KeyCode::ArrowUp => Key::ArrowUp,
        KeyCode::Escape => Key::Escape,
        KeyCode::Tab => Key::Tab,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter | KeyCode::NumpadEnter => Key::Enter,
        KeyCode::Space => Key::Space,
        KeyCode::Insert => Key::Insert,
        KeyCode::Delete => Key::Delete,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        KeyCode::PageUp => Key::PageUp,
        KeyCode::PageDown => Key::PageDown,
        KeyCode::Minus | KeyCode::NumpadSubtract => Key::Minus,
        KeyCode::Equal => Key::Equals,
        KeyCode::Digit0 | KeyCode::Numpad0 => Key::Num0,
        KeyCode::Digit1 | KeyCode::Numpad1 => Key::Num1,
        KeyCode::Digit2 | KeyCode::Numpad2 => Key::Num2,
        KeyCode::Digit3 | KeyCode::Numpad3 => Key::Num3,
        KeyCode::Digit4 | KeyCode::Numpad4 => Key::Num4,
        KeyCode::Digit5 | KeyCode::Numpad5 => Key::Num5,
        KeyCode::Digit6 | KeyCode::Numpad6 => Key::Num6,
        KeyCode::Digit7 | KeyCode::Numpad7 => Key::Num7,
        KeyCode::Digit8 | KeyCode::Numpad8 => Key::Num8,
        KeyCode::Digit9 | KeyCode::Numpad9 => Key::Num9,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyC => Key::C,
        KeyCode::KeyV => Key::V,
        KeyCode::KeyX => Key::X,
        KeyCode::KeyY => Key::Y,
        KeyCode::KeyZ => Key::Z,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_follows_platform() {
        let modifiers = translate_modifiers(ModifiersState::CONTROL);
        assert!(modifiers.ctrl);
        assert_eq!(modifiers.command, !cfg!(target_os = "macos"));
    }

    #[test]
    fn test_clipboard_shortcuts() {
        let command = egui::Modifiers::COMMAND;
        assert!(is_copy_command(command, egui::Key::C));
        assert!(is_paste_command(command, egui::Key::V));
        assert!(!is_copy_command(egui::Modifiers::NONE, egui::Key::C));
    }

    #[test]
    fn test_private_use_chars_are_not_text() {
        assert!(is_printable_char('a'));
        assert!(!is_printable_char('\u{f700}'));
        assert!(!is_printable_char('\n'));
    }
}
