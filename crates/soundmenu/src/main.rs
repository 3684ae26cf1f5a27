mod dispatch;
mod editor;
mod grab;
mod layer_shell;
mod lifecycle;
mod window;

use grab::GrabController;
use gtk4::prelude::*;
use gtk4::{gdk, glib};
use lifecycle::Lifecycle;
use soundmenu_core::config::Config;
use soundmenu_core::menu;
use soundmenu_core::selection::SelectionModel;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{info, warn};

fn main() -> glib::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("soundmenu=info".parse().unwrap()),
        )
        .init();

    info!("soundmenu starting");

    let config = Config::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        Config::default()
    });

    let app = gtk4::Application::builder()
        .flags(gtk4::gio::ApplicationFlags::NON_UNIQUE)
        .build();

    app.connect_activate(move |app| present_menu(app, &config));

    // No CLI surface: the menu is launched from a desktop keybinding and
    // the process ends when the window closes.
    app.run_with_args::<&str>(&[])
}

fn present_menu(app: &gtk4::Application, config: &Config) {
    let entries = menu::build_entries(&config.entries);
    let selection = Rc::new(RefCell::new(SelectionModel::new(menu::selectable_items(
        &entries,
    ))));
    info!(selectable = selection.borrow().len(), "menu built");

    let window = window::build_window(app);
    let exclusive_capable = layer_shell::try_init_overlay(&window);
    if !exclusive_capable {
        // Fallback surface still covers the display, so outside presses
        // land on us even without a grab.
        window.maximize();
    }

    window::apply_css(&config.popup);

    let (menu_box, rows) = window::build_menu_box(&config.popup, &entries);
    let fixed = gtk4::Fixed::new();
    fixed.put(&menu_box, 0.0, 0.0);
    window.set_child(Some(&fixed));

    let lifecycle = Lifecycle::new(
        window.clone(),
        GrabController::new(window.clone(), exclusive_capable),
    );
    let rows = Rc::new(rows);
    let config = Rc::new(config.clone());

    window::apply_highlight(&rows, selection.borrow().active_index());

    // Row handlers: each captures its own item and index by value.
    for row in rows.iter() {
        let item = row.item.clone();
        let lc = Rc::clone(&lifecycle);
        let cfg = Rc::clone(&config);
        row.button.connect_clicked(move |_| {
            // Close first: the UI never waits on the dispatched action.
            lc.close("selection");
            dispatch::dispatch(&cfg, &item);
        });

        let index = row.index;
        let sel = Rc::clone(&selection);
        let all_rows = Rc::clone(&rows);
        let hover = gtk4::EventControllerMotion::new();
        hover.connect_enter(move |_, _, _| {
            if let Some(active) = sel.borrow_mut().set_active(index) {
                window::apply_highlight(&all_rows, Some(active));
            }
        });
        row.button.add_controller(hover);
    }

    let key = gtk4::EventControllerKey::new();
    {
        let lc = Rc::clone(&lifecycle);
        let sel = Rc::clone(&selection);
        let cfg = Rc::clone(&config);
        let all_rows = Rc::clone(&rows);
        key.connect_key_pressed(move |_, keyval, _keycode, _modifiers| {
            match keyval {
                gdk::Key::Escape => lc.close("escape"),
                gdk::Key::Return | gdk::Key::KP_Enter => {
                    let current = sel.borrow().current().cloned();
                    if let Some(item) = current {
                        lc.close("selection");
                        dispatch::dispatch(&cfg, &item);
                    }
                }
                gdk::Key::Up | gdk::Key::k => {
                    if let Some(active) = sel.borrow_mut().move_by(-1) {
                        window::apply_highlight(&all_rows, Some(active));
                    }
                }
                gdk::Key::Down | gdk::Key::j => {
                    if let Some(active) = sel.borrow_mut().move_by(1) {
                        window::apply_highlight(&all_rows, Some(active));
                    }
                }
                _ => return glib::Propagation::Proceed,
            }
            glib::Propagation::Stop
        });
    }
    window.add_controller(key);

    // Any press outside the menu box dismisses. Capture phase, so presses
    // on the rows themselves still reach their buttons.
    let click = gtk4::GestureClick::new();
    click.set_propagation_phase(gtk4::PropagationPhase::Capture);
    {
        let lc = Rc::clone(&lifecycle);
        let win = window.clone();
        let mb = menu_box.clone();
        click.connect_pressed(move |_, _n_press, x, y| {
            if !window::press_inside_menu(&win, &mb, x, y) {
                lc.close("outside click");
            }
        });
    }
    window.add_controller(click);

    {
        let lc = Rc::clone(&lifecycle);
        window.connect_is_active_notify(move |w| {
            if !w.is_active() {
                lc.schedule_focus_close();
            }
        });
    }

    // Place once mapped, then acquire input shortly after: the surface must
    // be visible to the compositor before a grab can succeed.
    {
        let lc = Rc::clone(&lifecycle);
        let fx = fixed.clone();
        let mb = menu_box.clone();
        let cfg = Rc::clone(&config);
        window.connect_map(move |w| {
            window::place_menu(w, &fx, &mb, &cfg.popup);
            lc.schedule_grab();
        });
    }

    window.present();
}
