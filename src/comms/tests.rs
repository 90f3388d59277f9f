use std::thread;
use std::time::Duration;

use super::{CommsError, CommsInfo, CommsState};

#[test]
fn file_url_matches_wire_convention() {
    let info = CommsInfo::local(8080);
    assert_eq!(
        info.file_url("/a/b.nii.gz"),
        "http://localhost:8080/file?filename=/a/b.nii.gz"
    );
}

#[test]
fn comms_info_serializes_camel_case() {
    let info = CommsInfo::local(4242);
    let value = serde_json::to_value(&info).expect("serialize comms info");
    assert_eq!(value["fileServerPort"], 4242);
    assert_eq!(value["host"], "localhost");
    assert_eq!(value["route"], "file");
    assert_eq!(value["queryKey"], "filename");
}

#[test]
fn first_published_port_wins_for_host_lifetime() {
    let state = CommsState::new();
    state.publish(CommsInfo::local(9001));
    state.publish(CommsInfo::local(9002));
    let info = state.get().expect("published info");
    assert_eq!(info.file_server_port, 9001);
}

#[test]
fn wait_before_publish_reports_not_ready() {
    let state = CommsState::new();
    let result = state.wait(Duration::from_millis(20));
    assert!(matches!(result, Err(CommsError::NotReady(_))));
}

#[test]
fn wait_unblocks_when_supervisor_publishes() {
    let state = CommsState::new();
    let publisher = state.clone();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(10));
        publisher.publish(CommsInfo::local(7777));
    });
    let info = state.wait(Duration::from_secs(5)).expect("publish arrives");
    assert_eq!(info.file_server_port, 7777);
}
