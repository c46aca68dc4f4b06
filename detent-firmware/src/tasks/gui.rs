//! GUI input task
//!
//! Reads the input driver every `read_period_ms`, routes the reading into
//! the bound focus group, logs each widget event and redraws the menu.
//!
//! Two menus demonstrate rebinding: clicking "Settings" moves the driver
//! to the settings group, clicking "Back" moves it home again.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use detent_core::config::NavConfig;
use detent_core::nav::{GroupId, GroupTable, Navigator, WidgetId};
use detent_core::observer::{general_event_handler, EventKind};
use detent_core::{ButtonsInputEncoder, EncoderInputDriver, EncoderSource};
use detent_display::Screen;

use super::SharedEncoder;
use crate::console::DefmtConsole;

const MAIN_LABELS: [&str; 4] = ["Brightness", "Volume", "Settings", "About"];
const SETTINGS_LABELS: [&str; 3] = ["Wi-Fi", "Bluetooth", "Back"];

/// First widget id of the settings menu
const SETTINGS_BASE: u16 = 10;

const SETTINGS_ENTRY: WidgetId = WidgetId(2);
const BACK_ENTRY: WidgetId = WidgetId(SETTINGS_BASE + 2);

struct Menus {
    groups: GroupTable<2>,
    main: GroupId,
    settings: GroupId,
}

impl Menus {
    fn build(wrap: bool) -> Option<Self> {
        let mut groups = GroupTable::new();
        let main = groups.create_group_with(wrap).ok()?;
        let settings = groups.create_group_with(wrap).ok()?;

        for id in 0..MAIN_LABELS.len() as u16 {
            groups.add_widget(main, WidgetId(id)).ok()?;
        }
        for id in 0..SETTINGS_LABELS.len() as u16 {
            groups.add_widget(settings, WidgetId(SETTINGS_BASE + id)).ok()?;
        }

        Some(Self {
            groups,
            main,
            settings,
        })
    }

    fn labels(&self, group: GroupId) -> &'static [&'static str] {
        if group == self.settings {
            &SETTINGS_LABELS
        } else {
            &MAIN_LABELS
        }
    }
}

#[embassy_executor::task]
pub async fn gui_buttons_task(
    driver: EncoderInputDriver<&'static ButtonsInputEncoder>,
    nav: NavConfig,
) {
    run(driver, nav).await;
}

#[embassy_executor::task]
pub async fn gui_i2c_task(driver: EncoderInputDriver<SharedEncoder>, nav: NavConfig) {
    run(driver, nav).await;
}

async fn run<S: EncoderSource>(mut driver: EncoderInputDriver<S>, nav: NavConfig) {
    let Some(mut menus) = Menus::build(nav.wrap) else {
        error!("Menu does not fit the group table");
        return;
    };
    driver.set_group(Some(menus.main));

    let mut navigator = Navigator::new(&nav);
    let mut screen = Screen::new();
    let mut console = DefmtConsole::new();
    let mut ticker = Ticker::every(Duration::from_millis(u64::from(nav.read_period_ms)));

    info!("GUI task started: read every {}ms", nav.read_period_ms);
    redraw(&menus, &driver, &mut screen);

    loop {
        ticker.next().await;
        let now_ms = Instant::now().as_millis();

        let events = navigator.poll(&mut driver, &mut menus.groups, now_ms);
        for event in &events {
            general_event_handler(event.widget, event.kind);

            if event.kind == EventKind::Clicked {
                let target = match event.widget {
                    SETTINGS_ENTRY => Some(menus.settings),
                    BACK_ENTRY => Some(menus.main),
                    _ => None,
                };
                if let Some(group) = target {
                    let previous = driver.set_group(Some(group));
                    debug!("Rebound {} -> {}", previous, group);
                }
            }
        }

        if !events.is_empty() {
            redraw(&menus, &driver, &mut screen);
        }
        if let Err(e) = screen.render(&mut console) {
            warn!("Render failed: {}", e);
        }
    }
}

fn redraw<S: EncoderSource>(menus: &Menus, driver: &EncoderInputDriver<S>, screen: &mut Screen) {
    let Some(group_id) = driver.group() else {
        screen.clear();
        return;
    };
    let selected = menus
        .groups
        .get(group_id)
        .and_then(|group| group.focused_index());
    screen.show_menu(menus.labels(group_id), selected);
}
