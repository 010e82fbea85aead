use std::thread;
use std::time::Duration;

use tile_tui::config::EnvConfig;
use tile_tui::logging;
use tile_tui::{
    AppConfig, Application, Box as UiBox, Button, Center, CrosstermTerminal, Direction, Flex,
    Form, GridCell, Key, Modifiers, ProgressBar, Sizing, TextField,
};

const HINTS: &str = "Tab/Shift+Tab move  Enter submit  Ctrl+Q quit  Ctrl+Z suspend";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env = EnvConfig::from_env();
    logging::init_from_env(&env)?;

    let mut app = Application::with_config(CrosstermTerminal::new(), AppConfig::from_env());
    let handle = app.handle();

    let mut form = Form::new();
    form.grid_mut()
        .set_columns(vec![Sizing::Fixed(10), Sizing::Proportional(1)]);
    form.grid_mut().set_rows(vec![
        Sizing::Fixed(1),
        Sizing::Fixed(1),
        Sizing::Fixed(1),
        Sizing::Proportional(1),
    ]);
    form.grid_mut()
        .add(Box::new(TextField::new("Name")), GridCell::new(0, 0, 1, 1));
    form.grid_mut()
        .add(Box::new(TextField::new("Host")), GridCell::new(0, 1, 1, 1));

    let mut connect = Button::new("Connect");
    let quit_handle = handle.clone();
    connect.set_on_click(move || quit_handle.request_stop());
    form.add_item(Box::new(Button::new("Edit name")), GridCell::new(1, 0, 1, 1));
    form.add_item(Box::new(Button::new("Edit host")), GridCell::new(1, 1, 1, 1));
    form.add_item(Box::new(connect), GridCell::new(1, 2, 1, 1));

    let mut progress = ProgressBar::new();
    progress.set_indeterminate(false);
    let progress_handle = progress.handle();

    let mut layout = Flex::new(Direction::Vertical);
    layout.add(Box::new(form), Sizing::Proportional(1));
    layout.add(Box::new(progress), Sizing::Fixed(1));
    layout.add(Box::new(TextField::new(HINTS)), Sizing::Fixed(1));

    let mut frame = UiBox::new(Box::new(layout));
    frame.set_title("tile_tui showcase");
    let keys = handle.clone();
    frame.set_key_capture(move |event| {
        if event.modifiers.contains(Modifiers::CTRL) {
            match event.key {
                Key::Char('q') => {
                    keys.request_stop();
                    return None;
                }
                Key::Char('z') => {
                    let _ = keys.suspend(|| println!("suspended; resuming"));
                    return None;
                }
                _ => {}
            }
        }
        Some(*event)
    });

    let mut center = Center::new(Box::new(frame), 60, 12);
    center.set_always_focus_child(true);
    app.set_root(Box::new(center));

    let ticker = handle.clone();
    thread::spawn(move || {
        while !ticker.is_running() {
            thread::sleep(Duration::from_millis(10));
        }
        while ticker.is_running() {
            thread::sleep(Duration::from_millis(100));
            progress_handle.increment(1);
            if progress_handle.get() >= 100 {
                progress_handle.set(0);
            }
            ticker.redraw();
        }
    });

    app.start()?;
    Ok(())
}
