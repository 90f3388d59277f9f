use std::sync::mpsc;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};
use std::time::Duration;

use serde_json::{Value, json};

use super::{ChannelError, ColormapSelection, Command, CommandChannel, DragMode, ViewMode};

#[test]
fn command_names_match_wire_catalog() {
    let cases = [
        (Command::LoadVolumes(vec![]), "loadVolumes"),
        (Command::LoadSurfaces(vec![]), "loadSurfaces"),
        (Command::AddVolumeOverlay("a".into()), "addVolumeOverlay"),
        (Command::SetView(ViewMode::Axial), "setView"),
        (Command::SetDragMode(DragMode::Pan), "setDragMode"),
        (Command::SetFrame(1), "setFrame"),
        (
            Command::SetColormaps(ColormapSelection {
                name: "a".into(),
                colormap: "gray".into(),
            }),
            "setColormaps",
        ),
        (Command::SetOptions(Default::default()), "setOptions"),
    ];
    for (command, expected) in cases {
        assert_eq!(command.name(), expected);
    }
}

#[test]
fn view_and_drag_modes_serialize_to_wire_strings() {
    assert_eq!(json!(ViewMode::MultiPlanarAcs), json!("multiPlanarACS"));
    assert_eq!(json!(ViewMode::MultiPlanarAcsr), json!("multiPlanarACSR"));
    assert_eq!(json!(ViewMode::Render), json!("render"));
    assert_eq!(json!(DragMode::None), json!("none"));
    assert_eq!(json!(DragMode::Contrast), json!("contrast"));
}

#[test]
fn set_colormaps_payload_carries_name_and_colormap() {
    let command = Command::SetColormaps(ColormapSelection {
        name: "brain.nii.gz".into(),
        colormap: "viridis".into(),
    });
    assert_eq!(
        command.payload(),
        json!({"name": "brain.nii.gz", "colormap": "viridis"})
    );
}

#[test]
fn second_registration_replaces_first_handler() {
    let channel = CommandChannel::new();
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));

    let counter = Arc::clone(&first_calls);
    channel.on_command("setView", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    let counter = Arc::clone(&second_calls);
    channel.on_command("setView", move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    channel
        .dispatch(&Command::SetView(ViewMode::Coronal))
        .expect("dispatch");
    channel.flush().expect("flush");

    assert_eq!(first_calls.load(Ordering::SeqCst), 0);
    assert_eq!(second_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn commands_from_one_source_arrive_in_dispatch_order() {
    let channel = CommandChannel::new();
    let (tx, rx) = mpsc::channel();
    channel.on_command("setFrame", move |payload| {
        let _ = tx.send(payload.as_i64().unwrap_or(0));
    });

    for delta in [1, -1, 1, 1, -1] {
        channel
            .dispatch(&Command::SetFrame(delta))
            .expect("dispatch");
    }
    channel.flush().expect("flush");

    let received: Vec<i64> = rx.try_iter().collect();
    assert_eq!(received, vec![1, -1, 1, 1, -1]);
}

#[test]
fn command_without_handler_is_dropped_silently() {
    let channel = CommandChannel::new();
    channel
        .dispatch(&Command::SetDragMode(DragMode::Measure))
        .expect("dispatch");
    channel.flush().expect("flush");
}

#[test]
fn invoke_resolves_against_registered_responder() {
    let channel = CommandChannel::new();
    channel.respond_to("getCommsInfo", |_| Ok(json!({"fileServerPort": 8080})));
    let result = channel
        .invoke("getCommsInfo", &Value::Null)
        .expect("invoke");
    assert_eq!(result["fileServerPort"], 8080);
}

#[test]
fn second_responder_replaces_first_for_an_operation() {
    let channel = CommandChannel::new();
    channel.respond_to("getCommsInfo", |_| Ok(json!({"fileServerPort": 1})));
    channel.respond_to("getCommsInfo", |_| Ok(json!({"fileServerPort": 2})));

    let result = channel
        .invoke("getCommsInfo", &Value::Null)
        .expect("invoke");
    assert_eq!(result["fileServerPort"], 2);
}

#[test]
fn handler_may_register_handlers_without_deadlock() {
    let channel = Arc::new(CommandChannel::new());
    let registrar = Arc::downgrade(&channel);
    let (tx, rx) = mpsc::channel();
    channel.on_command("setFrame", move |_| {
        if let Some(channel) = registrar.upgrade() {
            channel.on_command("setView", |_| {});
        }
        let _ = tx.send(());
    });

    channel
        .dispatch(&Command::SetFrame(1))
        .expect("dispatch");
    rx.recv_timeout(Duration::from_secs(5))
        .expect("handler completed");
    channel.flush().expect("flush");
}

#[test]
fn invoke_unknown_operation_is_an_error() {
    let channel = CommandChannel::new();
    let result = channel.invoke("sendDocument", &Value::Null);
    assert!(matches!(result, Err(ChannelError::UnknownOperation(_))));
}
