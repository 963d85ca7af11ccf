//! A tour of the widget set in one window.
//!
//! Pass a `.toml` config path as the first argument to override the window
//! settings.

use trellis::core::logging;
use trellis::core::profiling;
use trellis::prelude::*;

const SECTORS: usize = 8;
const SECTOR_SIZE: usize = 256;

/// A round lamp, lit or dark.
fn lamp(lit: bool) -> TextureSource {
    const SIDE: u32 = 24;
    let colour = if lit {
        [255, 196, 32, 255]
    } else {
        [70, 60, 40, 255]
    };
    let centre = (SIDE as f32 - 1.0) / 2.0;
    let mut pixels = Vec::with_capacity((SIDE * SIDE * 4) as usize);
    for y in 0..SIDE {
        for x in 0..SIDE {
            let dx = x as f32 - centre;
            let dy = y as f32 - centre;
            let inside = dx * dx + dy * dy <= centre * centre;
            pixels.extend_from_slice(if inside { &colour } else { &[0, 0, 0, 0] });
        }
    }
    TextureSource::Rgba {
        width: SIDE,
        height: SIDE,
        pixels,
    }
}

fn main() -> Result<(), AppError> {
    logging::init();
    profiling::init_profiling(profiling::DEFAULT_PROFILER_ADDR);

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default()
            .with_title("Trellis Gallery")
            .with_size((1280.0, 800.0))
            .with_log_size((600.0, 220.0))
            .with_log_position((660.0, 560.0)),
    };

    let mut app = Application::new(config);
    app.init()?;

    let running = Binding::new(true);
    let clicks = Binding::new(0);
    let clicks_text = Binding::new(String::from("Number of clicks = 0"));

    let logger = app.logger();
    let counter = {
        let clicks = clicks.clone();
        let clicks_text = clicks_text.clone();
        ClickButton::new("Click", move || {
            clicks.with_mut(|count| *count += 1);
            clicks_text.set(format!("Number of clicks = {}", clicks.get()));
            logger.info("Button clicked");
        })
    };
    let exit = {
        let running = running.clone();
        ClickButton::new("Exit", move || running.set(false))
    };

    app.add(
        Window::new("Main Window")
            .with_size((400.0, 120.0))
            .with_position((10.0, 10.0))
            .add(Row::new().add(counter).add(exit).add(BoundLabel::new(clicks_text)))
            .add(FrameRateLabel),
    );

    let display = Binding::new(false);
    let demand = Binding::new(false);
    let cover = Binding::new(false);
    app.add(
        Window::new("Buttons")
            .with_position((10.0, 150.0))
            .add(
                Row::new()
                    .add(StateButton::new("Display", display.clone()))
                    .add(StateButton::new("Demand", demand.clone())),
            )
            .add(Checkbox::new("Main cover", cover.clone())),
    );

    // Held buttons light the lamps.
    let lit = app.load_texture("lamp-on", lamp(true))?;
    let dark = app.load_texture("lamp-off", lamp(false))?;
    let lamp_stack = |on: &Binding<bool>| {
        Stack::new()
            .add(Image::new(dark.clone()))
            .add(Image::new(lit.clone()).with_visibility(on.clone()))
    };
    app.add(
        Window::new("Lamps")
            .with_position((10.0, 280.0))
            .add(
                Row::new()
                    .add(lamp_stack(&display))
                    .add(lamp_stack(&demand))
                    .add(lamp_stack(&cover)),
            )
            .add(TextField::new("display   demand   cover").with_offset((0.0, 4.0))),
    );

    let ports = Binding::new(vec![
        "COM1".to_string(),
        "COM2".to_string(),
        "/dev/ttyUSB0".to_string(),
    ]);
    let optical = Binding::new(String::from("none"));
    let bench = Binding::new(String::from("none"));
    app.add(
        Window::new("Serial Ports")
            .with_position((430.0, 10.0))
            .add(ComboBox::new("Optical port", ports.clone(), optical.clone()))
            .add(ComboBox::new("Bench port", ports, bench.clone())),
    );

    let voltage = Binding::new(230.0);
    let current = Binding::new(5.0);
    let frequency = Binding::new(50.0);
    let update = {
        let logger = app.logger();
        let voltage = voltage.clone();
        let frequency = frequency.clone();
        ClickButton::new("Update", move || {
            logger.info(format_args!(
                "bench set to {:.3} V at {:.3} Hz",
                voltage.get(),
                frequency.get()
            ));
        })
    };
    app.add(
        Window::new("Bench")
            .with_size((260.0, 260.0))
            .with_position((430.0, 160.0))
            .add(
                TabBar::new()
                    .add(
                        TabPage::new("Input")
                            .add(DoubleInput::new("Voltage", voltage))
                            .add(DoubleInput::new("Current", current))
                            .add(DoubleInput::new("Frequency", frequency))
                            .add(update),
                    )
                    .add(
                        TabPage::new("State")
                            .add(BoundLabel::new(optical))
                            .add(BoundLabel::new(bench)),
                    ),
            ),
    );

    let sector = Binding::new(0);
    let sectors = Binding::new(
        (0..SECTORS)
            .map(|index| vec![index as u8; SECTOR_SIZE])
            .collect::<Vec<_>>(),
    );
    let eeprom = Binding::new((0..=255u8).collect::<Vec<_>>());
    app.add(
        Window::new("Control")
            .with_position((10.0, 420.0))
            .add(IntInput::new("Sector", sector.clone()).with_range(0, SECTORS as i32 - 1))
            .add(Separator)
            .add(FontText::new("88.8", egui::FontFamily::Monospace, 40.0).with_letter_spacing(6.0)),
    );
    app.add(
        MemoryEditorWindow::new("EEPROM", eeprom)
            .with_size((560.0, 300.0))
            .with_position((700.0, 10.0)),
    );
    app.add(
        SectorMemoryEditorWindow::new("Sectors", sectors, sector)
            .with_size((560.0, 220.0))
            .with_position((700.0, 330.0)),
    );

    app.info("gallery ready");
    while running.get() && app.should_run() {
        app.run_frame()?;
    }
    app.close();
    Ok(())
}
