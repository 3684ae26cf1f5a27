use gtk4_layer_shell::{Edge, KeyboardMode, Layer, LayerShell};
use tracing::info;

/// Try to initialize the window as a fullscreen overlay layer-shell surface
/// (for wlroots compositors). Returns true if layer-shell was applied.
/// NOTE: GNOME Wayland does not support wlr-layer-shell. The menu falls back
/// to a regular maximized window, which cannot take an exclusive grab.
pub fn try_init_overlay(window: &gtk4::Window) -> bool {
    if !gtk4_layer_shell::is_supported() {
        info!("layer-shell not supported on this compositor");
        return false;
    }

    window.init_layer_shell();
    window.set_layer(Layer::Overlay);

    // Cover the whole display: the menu box is positioned inside the
    // surface, and any press outside it is an outside click.
    window.set_anchor(Edge::Top, true);
    window.set_anchor(Edge::Bottom, true);
    window.set_anchor(Edge::Left, true);
    window.set_anchor(Edge::Right, true);

    // Don't reserve space
    window.set_exclusive_zone(-1);

    // Keyboard stays passive until the grab controller asserts exclusive mode.
    window.set_keyboard_mode(KeyboardMode::None);

    info!("layer-shell overlay initialized");
    true
}
