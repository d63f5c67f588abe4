//! Menu screen demo: a small game-client screen on the real terminal.
//!
//! Demonstrates:
//! - Auto-sized menu group with buttons positioned relative to each other
//! - Drop menu opened with a right click, dismissed by clicking elsewhere
//! - Alert with fogging, opened from a button
//! - Click markers that expire through a TTL map and a background eviction task
//!
//! Reads `dungeon-ui.toml` from the working directory if present.
//! Press ESC or Ctrl+C to exit.

use dungeon_ui::event::UiEvent;
use dungeon_ui::render::{Cell, Style};
use dungeon_ui::{
    logging, Group, InputEvent, KeyCode, MouseButton, MouseEvent, Rgb, TerminalSession,
    TtlMap, UiConfig, UiError, WidgetBuilder,
};

const MENU_BACKGROUND: Rgb = Rgb::new(30, 30, 50);
const MARKER: Rgb = Rgb::new(255, 200, 0);

fn main() -> Result<(), UiError> {
    let config = UiConfig::load("dungeon-ui.toml")?;
    logging::init(&config.logging)?;

    let mut session = TerminalSession::start(&config.frame)?;
    let mut screen = Group::new(TerminalSession::canvas()?);
    let events = screen.subscribe();
    let screen_size = screen.surface().size();

    // Main menu: three buttons stacked under a title.
    let menu = WidgetBuilder::new("Menu")
        .position(4, 2)
        .padding(1)
        .border(1, Rgb::GRAY)
        .background(MENU_BACKGROUND)
        .parent(screen.root())
        .group();
    let title = WidgetBuilder::new("Menu-Title")
        .parent(&menu)
        .styled_label("DUNGEON", Style::fg(Rgb::WHITE));
    let play = WidgetBuilder::new("Menu-Play")
        .y_with({
            let title = title.widget().clone();
            move |_| Ok(title.rect()?.bottom() + 1)
        })
        .parent(&menu)
        .button("[ Play ]");
    let about = WidgetBuilder::new("Menu-About")
        .y_with({
            let play = play.widget().clone();
            move |_| Ok(play.rect()?.bottom())
        })
        .parent(&menu)
        .button("[ About ]");
    let exit = WidgetBuilder::new("Menu-Exit")
        .y_with({
            let about = about.widget().clone();
            move |_| Ok(about.rect()?.bottom())
        })
        .parent(&menu)
        .button("[ Exit ]");
    let hero_name = WidgetBuilder::new("Menu-Name")
        .y_with({
            let exit = exit.widget().clone();
            move |_| Ok(exit.rect()?.bottom() + 1)
        })
        .width(16)
        .border(1, Rgb::GRAY)
        .parent(&menu)
        .input_box("Hero name");
    hero_name.set_border_colors(Some(Rgb::GRAY), Some(Rgb::WHITE));
    for button in [&play, &about, &exit] {
        button.set_active_background(Some(Rgb::GRAY));
    }

    // Context menu, opened on right click.
    let context = WidgetBuilder::new("Context")
        .border(1, Rgb::WHITE)
        .background(MENU_BACKGROUND)
        .parent(screen.root())
        .drop_menu();
    let inspect = WidgetBuilder::new("Context-Inspect").parent(&context).button("Inspect");
    WidgetBuilder::new("Context-Close")
        .y_with({
            let inspect = inspect.widget().clone();
            move |_| Ok(inspect.rect()?.bottom())
        })
        .parent(&context)
        .button("Close");

    // Modal alert over everything else.
    let alert = WidgetBuilder::new("Alert")
        .padding(1)
        .border(1, Rgb::RED)
        .background(Rgb::BLACK)
        .parent(screen.root())
        .alert(screen_size);
    alert.set_fogging(Some(120));
    alert.set_dismiss_on_outside(true);

    // Click markers fade out on their own.
    let markers: TtlMap<(i32, i32), char> = TtlMap::new(config.tasks.ttl());
    let _eviction = markers.spawn_eviction(config.tasks.eviction_interval(), screen.bus().clone());

    screen.update()?;
    let mut running = true;
    let mut dirty = true;

    while running {
        session.begin_frame();

        for event in session.drain_input() {
            match &event {
                InputEvent::Quit | InputEvent::Key { code: KeyCode::Esc, .. } => running = false,
                InputEvent::Error(message) => tracing::warn!(%message, "input error"),
                InputEvent::MouseDown(MouseEvent { x, y, button: Some(MouseButton::Right) }) => {
                    context.open((*x, *y));
                    dirty = true;
                }
                _ => {
                    let response = screen.handle_event(&event);
                    if let Some((x, y)) = event.primary_press() {
                        if !response.stop_propagation {
                            markers.insert((x, y), '*');
                        }
                    }
                    dirty = true;
                }
            }
        }

        for event in events.drain() {
            match event {
                UiEvent::Clicked { source, .. } if source == exit.id() => running = false,
                UiEvent::Clicked { source, .. } if source == play.id() => {
                    alert.show_message("The dungeon is not open yet.");
                }
                UiEvent::Clicked { source, .. } if source == about.id() => {
                    alert.show_message("dungeon-ui menu demo");
                }
                UiEvent::Clicked { source, .. } if source == inspect.id() => {
                    context.close();
                    alert.show_message(format!("{} markers on screen", markers.len()));
                }
                UiEvent::Clicked { name, .. } if name == "Context-Close" => context.close(),
                UiEvent::Clicked { name, .. } => tracing::debug!(%name, "unhandled click"),
                UiEvent::Dismissed { name, .. } => tracing::debug!(%name, "dismissed"),
                UiEvent::Submitted { text, .. } if !text.is_empty() => {
                    hero_name.clear();
                    alert.show_message(format!("Welcome, {text}."));
                }
                UiEvent::Submitted { .. } => {}
                UiEvent::RedrawRequested => {}
            }
            dirty = true;
        }

        if dirty {
            screen.draw();
            let canvas = screen.surface_mut();
            for ((x, y), symbol) in markers.snapshot() {
                canvas.set(x, y, Cell::new(symbol).with_fg(MARKER));
            }
            session.present(screen.surface())?;
            dirty = false;
        }

        session.end_frame();
    }

    tracing::info!(frames = session.frame_count(), "menu screen closed");
    Ok(())
}
