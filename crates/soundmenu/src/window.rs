use gtk4::prelude::*;
use gtk4::{gdk, graphene};
use soundmenu_core::config::PopupConfig;
use soundmenu_core::menu::{EntryAction, MenuEntry, MenuItem};
use soundmenu_core::placement::{self, Rect};
use tracing::debug;

/// One selectable row widget, tied to its own item and selection index at
/// construction time.
pub struct Row {
    pub button: gtk4::Button,
    pub item: MenuItem,
    pub index: usize,
}

pub fn build_window(app: &gtk4::Application) -> gtk4::Window {
    gtk4::Window::builder()
        .application(app)
        .title("soundmenu")
        .decorated(false)
        .resizable(false)
        .build()
}

/// Process-wide style, applied once. Derived from immutable `[popup]` config.
pub fn apply_css(popup: &PopupConfig) {
    let css = format!(
        "
        window {{
            background-color: transparent;
        }}
        .menu-container {{
            background-color: #1a1a2e;
            border-radius: 12px;
            padding: 8px 0;
            border: 1px solid #e94560;
        }}
        .menu-header {{
            color: #e94560;
            font-size: {header_size}px;
            font-weight: bold;
            padding: 4px 16px;
        }}
        .menu-item {{
            padding: 10px 16px;
            border-radius: 0;
            background: transparent;
            border: none;
            min-width: 240px;
        }}
        .menu-item label {{
            color: #e0e0e0;
            font-size: {font_size}px;
        }}
        .menu-item.highlighted {{
            background-color: rgba(233, 69, 96, 0.3);
        }}
        .menu-item.highlighted label {{
            color: #ffffff;
        }}
        .menu-icon {{
            font-size: {icon_size}px;
            margin-right: 12px;
        }}
        .menu-separator {{
            background-color: #3a3a4a;
            margin: 4px 16px;
            min-height: 1px;
        }}
        .stop-item label {{
            color: #ff6b6b;
        }}
        ",
        font_size = popup.font_size,
        header_size = popup.font_size,
        icon_size = popup.font_size + 2,
    );

    let css_provider = gtk4::CssProvider::new();
    css_provider.load_from_data(&css);
    gtk4::style_context_add_provider_for_display(
        &gdk::Display::default().expect("display"),
        &css_provider,
        gtk4::STYLE_PROVIDER_PRIORITY_APPLICATION,
    );
}

/// Build the menu container and its rows. Rows are constructed with explicit
/// indices so every handler can capture its own entry by value.
pub fn build_menu_box(popup: &PopupConfig, entries: &[MenuEntry]) -> (gtk4::Box, Vec<Row>) {
    let menu_box = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    menu_box.add_css_class("menu-container");

    let header = gtk4::Label::new(Some(&popup.header));
    header.add_css_class("menu-header");
    menu_box.append(&header);
    menu_box.append(&separator());

    let mut rows = Vec::new();
    for entry in entries {
        match entry {
            MenuEntry::Separator => menu_box.append(&separator()),
            MenuEntry::Item(item) => {
                let button = build_row(item);
                menu_box.append(&button);
                rows.push(Row {
                    button,
                    item: item.clone(),
                    index: rows.len(),
                });
            }
        }
    }

    (menu_box, rows)
}

fn separator() -> gtk4::Separator {
    let sep = gtk4::Separator::new(gtk4::Orientation::Horizontal);
    sep.add_css_class("menu-separator");
    sep
}

fn build_row(item: &MenuItem) -> gtk4::Button {
    let button = gtk4::Button::new();
    button.set_has_frame(false);
    button.set_can_focus(false);
    button.add_css_class("menu-item");
    if item.action == EntryAction::Stop {
        button.add_css_class("stop-item");
    }

    let hbox = gtk4::Box::new(gtk4::Orientation::Horizontal, 0);

    let icon = gtk4::Label::new(Some(&item.icon));
    icon.add_css_class("menu-icon");
    hbox.append(&icon);

    let label = gtk4::Label::new(Some(&item.label));
    label.set_xalign(0.0);
    label.set_hexpand(true);
    hbox.append(&label);

    button.set_child(Some(&hbox));
    button
}

/// Re-render the highlight: exactly one row carries the class.
pub fn apply_highlight(rows: &[Row], active: Option<usize>) {
    for row in rows {
        if Some(row.index) == active {
            row.button.add_css_class("highlighted");
        } else {
            row.button.remove_css_class("highlighted");
        }
    }
}

/// Position the menu box inside the overlay surface, anchored to the pointer
/// and clamped to the display. Before the first layout pass the box reports
/// no useful size, so the configured fallback dimensions stand in.
pub fn place_menu(
    window: &gtk4::Window,
    fixed: &gtk4::Fixed,
    menu_box: &gtk4::Box,
    popup: &PopupConfig,
) {
    let bounds = surface_bounds(window);

    let (pointer_x, pointer_y) = pointer_position(window).unwrap_or_else(|| {
        // No pointer to anchor to (e.g. keyboard-only session): center.
        debug!("pointer position unavailable, centering menu");
        (
            f64::from(bounds.x + bounds.width / 2),
            f64::from(bounds.y + bounds.height / 2),
        )
    });

    let mut menu_width = menu_box.width();
    let mut menu_height = menu_box.height();
    if menu_width <= 1 {
        menu_width = popup.default_width;
    }
    if menu_height <= 1 {
        menu_height = popup.default_height;
    }

    let (x, y) = placement::compute_position(
        pointer_x as i32,
        pointer_y as i32,
        menu_width,
        menu_height,
        bounds,
    );
    fixed.move_(menu_box, f64::from(x), f64::from(y));
    debug!(x, y, menu_width, menu_height, "menu placed");
}

/// True when a press at window coordinates `(x, y)` lands on the menu box.
pub fn press_inside_menu(window: &gtk4::Window, menu_box: &gtk4::Box, x: f64, y: f64) -> bool {
    let Some(bounds) = menu_box.compute_bounds(window) else {
        return true;
    };
    bounds.contains_point(&graphene::Point::new(x as f32, y as f32))
}

/// The overlay surface covers exactly the display that hosts the menu, so
/// its own size is the display bounds in surface coordinates. Before the
/// surface has a size, fall back to the monitor geometry.
fn surface_bounds(window: &gtk4::Window) -> Rect {
    let (width, height) = (window.width(), window.height());
    if width > 1 && height > 1 {
        return Rect {
            x: 0,
            y: 0,
            width,
            height,
        };
    }
    monitor_bounds().unwrap_or(Rect {
        x: 0,
        y: 0,
        width: 1920,
        height: 1080,
    })
}

fn monitor_bounds() -> Option<Rect> {
    let display = gdk::Display::default()?;
    let monitor = display.monitors().item(0).and_downcast::<gdk::Monitor>()?;
    let geometry = monitor.geometry();
    Some(Rect {
        x: 0,
        y: 0,
        width: geometry.width(),
        height: geometry.height(),
    })
}

fn pointer_position(window: &gtk4::Window) -> Option<(f64, f64)> {
    let display = gdk::Display::default()?;
    let pointer = display.default_seat()?.pointer()?;
    let surface = window.surface()?;
    let (x, y, _modifiers) = surface.device_position(&pointer)?;
    Some((x, y))
}
