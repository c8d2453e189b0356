//! Terminal presentation loop.
//!
//! Owns the single-threaded event loop the core marshals into: indicator
//! events arrive over the [`ChannelSink`] channel and render as a one-line
//! status display, while key presses feed back into the poller. Background
//! threads never touch the terminal directly.

use anyhow::Result;
use console::style;
use crossbeam_channel::Receiver;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use crossterm::{cursor, execute};
use std::io::{Write, stdout};
use std::sync::Arc;
use std::time::Duration;
use uplink_core::{
    BLINK_INTERVAL, CHECK_INTERVAL, ChannelSink, ConnectivityMonitor, IconVariant,
    IndicatorEvent, MAX_ATTEMPTS, Poller, PollerHandle, Prober, TEST_URL,
};

/// How long one loop turn waits for a key before draining indicator events.
const INPUT_POLL: Duration = Duration::from_millis(100);

pub fn run() -> Result<()> {
    banner();

    let (sink, events) = ChannelSink::new();
    let monitor = Arc::new(ConnectivityMonitor::new(Arc::new(sink)));
    let poller = Poller::new(Prober::new(), monitor).spawn();

    enable_raw_mode()?;
    let result = event_loop(&events, &poller);
    disable_raw_mode()?;
    println!();
    result
}

fn banner() {
    println!("uplink {}", env!("CARGO_PKG_VERSION"));
    println!("Checking connection to: {TEST_URL}");
    println!(
        "Check interval: {}s | blink interval: {}ms | retry attempts: {MAX_ATTEMPTS}",
        CHECK_INTERVAL.as_secs(),
        BLINK_INTERVAL.as_millis()
    );
    println!("Keys: [c] check now, [q] quit");
    println!();
}

/// What the tray would show: current icon, its tooltip, and the menu label.
struct Indicator {
    icon: IconVariant,
    tooltip: String,
    label: String,
}

impl Indicator {
    fn new() -> Self {
        Self {
            icon: IconVariant::Connected,
            tooltip: "Unknown".to_string(),
            label: "Status: Unknown".to_string(),
        }
    }

    fn apply(&mut self, event: IndicatorEvent) {
        match event {
            IndicatorEvent::Icon { variant, tooltip } => {
                self.icon = variant;
                self.tooltip = tooltip;
            }
            IndicatorEvent::StatusLabel(label) => self.label = label,
        }
    }
}

fn event_loop(events: &Receiver<IndicatorEvent>, poller: &PollerHandle) -> Result<()> {
    let mut indicator = Indicator::new();
    draw(&indicator)?;

    loop {
        // Keys first, so quitting stays responsive while blink frames
        // stream in.
        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => break,
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break;
                        }
                        KeyCode::Char('c') => poller.check_now(),
                        _ => {}
                    }
                }
            }
        }

        let mut dirty = false;
        while let Ok(event) = events.try_recv() {
            indicator.apply(event);
            dirty = true;
        }
        if dirty {
            draw(&indicator)?;
        }
    }

    Ok(())
}

fn draw(indicator: &Indicator) -> Result<()> {
    let glyph = match indicator.icon {
        IconVariant::Connected => style("●").green(),
        IconVariant::Disconnected => style("●").red(),
    };

    let mut out = stdout();
    execute!(
        out,
        cursor::MoveToColumn(0),
        terminal::Clear(terminal::ClearType::CurrentLine)
    )?;
    write!(out, "{glyph} {}  ({})", indicator.label, indicator.tooltip)?;
    out.flush()?;
    Ok(())
}
