mod cat;
mod console;
mod input;
mod time;
mod widgets;

use std::{cell::RefCell, io, rc::Rc};

use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};

use cat::catalog::Catalog;
use cat::save::SaveStore;
use cat::CatGame;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use time::WallClock;

/// Query the grid container's bounding rect and convert a pointer position to a cell.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let window = web_sys::window()?;
    let document = window.document()?;

    // DomBackend renders the grid into a <div> directly under <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

#[cfg(target_arch = "wasm32")]
fn open_store() -> Box<dyn SaveStore> {
    Box::new(cat::save::LocalStorageStore)
}

#[cfg(not(target_arch = "wasm32"))]
fn open_store() -> Box<dyn SaveStore> {
    Box::new(cat::save::MemoryStore::new())
}

/// Write the final state when the tab closes or reloads.
#[cfg(target_arch = "wasm32")]
fn save_on_unload(game: &Rc<RefCell<CatGame>>) {
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;

    let Some(window) = web_sys::window() else {
        return;
    };
    let game = game.clone();
    let handler = Closure::<dyn FnMut()>::new(move || {
        if let Ok(mut game) = game.try_borrow_mut() {
            game.on_teardown();
        }
    });
    if window
        .add_event_listener_with_callback("beforeunload", handler.as_ref().unchecked_ref())
        .is_err()
    {
        console::warn("beforeunload を登録できませんでした");
    }
    // Lives as long as the page
    handler.forget();
}

#[cfg(not(target_arch = "wasm32"))]
fn save_on_unload(_game: &Rc<RefCell<CatGame>>) {}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();

    let game = Rc::new(RefCell::new(CatGame::new(
        Catalog::reference(),
        open_store(),
        Box::new(WallClock),
    )));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    save_on_unload(&game);

    // Mouse/touch
    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let action = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs)
                .and_then(|(col, row)| cs.hit_test(col, row));
            drop(cs);

            if let Some(action_id) = action {
                game.borrow_mut().handle_input(&InputEvent::Click(action_id));
            }
        }
    });

    // Keyboard
    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            let event = match key_event.code {
                KeyCode::Char(c) => InputEvent::Key(c.to_ascii_lowercase()),
                KeyCode::Esc => InputEvent::Key('n'),
                _ => return,
            };
            game.borrow_mut().handle_input(&event);
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let mut game = game.borrow_mut();
            game.on_frame();

            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            cat::render::render(&game, f, size, &click_state);
        }
    });

    Ok(())
}
