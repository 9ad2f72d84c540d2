//! Minimal end-to-end wiring: session + dial + a synthetic hold gesture.
//!
//! Run against a device (or any WebSocket echo endpoint):
//!
//! ```bash
//! cargo run --example dial_demo -- 192.168.4.1
//! ```

use std::sync::Arc;
use std::time::Duration;

use lightdial::{
    DeviceIntent, DialController, DialCore, InputConfig, PointerEvent, Session, SessionConfig,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lightdial=debug".into()),
        )
        .init();

    let host = std::env::args().nth(1).unwrap_or_else(|| "192.168.4.1".to_string());

    let session = Arc::new(Session::open(SessionConfig::for_host(&host)?));
    session.set_message_handler(Box::new(|text| {
        println!("device says: {text}");
    }));

    let core = DialCore::new(
        DeviceIntent::new("#008c95"),
        InputConfig::default(),
        session.clone(),
    )
    .with_render_hook(Box::new(|intent| {
        println!(
            "dial repaint: powered_on={} color={}",
            intent.powered_on(),
            intent.wire_color()
        );
    }));
    let dial = DialController::spawn(core);

    // Give the session a moment to connect.
    tokio::time::sleep(Duration::from_secs(1)).await;

    // Press inside the power zone and hold past the 500ms threshold:
    // power toggles on and the stored color goes to the device.
    dial.pointer_down(PointerEvent::from_mouse(250.0, 300.0, 400.0, 500.0));
    tokio::time::sleep(Duration::from_millis(700)).await;
    dial.pointer_up();

    // Pick a new color from the chooser.
    dial.color_input("#ff5733");
    tokio::time::sleep(Duration::from_millis(500)).await;

    dial.shutdown();
    session.shutdown();
    Ok(())
}
