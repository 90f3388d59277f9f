//! End-to-end exercise of the file-server subprocess: spawn the real
//! binary, wait for the port handshake, then fetch files over HTTP.

use std::io::Write;
use std::process::Command;
use std::time::Duration;

use voxview::comms::CommsState;
use voxview::server::Supervisor;

const HANDSHAKE_WAIT: Duration = Duration::from_secs(10);

fn spawn_file_server(comms: &CommsState) -> Supervisor {
    let mut command = Command::new(env!("CARGO_BIN_EXE_voxview"));
    command.arg("file-server");
    Supervisor::start(command, comms).expect("spawn file server")
}

#[test]
fn serves_a_local_file_at_the_announced_url() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("volume.nii");
    let mut file = std::fs::File::create(&path).expect("create");
    file.write_all(b"not really a volume").expect("write");
    drop(file);

    let comms = CommsState::new();
    let mut server = spawn_file_server(&comms);
    let info = comms.wait(HANDSHAKE_WAIT).expect("port handshake");

    let url = info.file_url(&path.display().to_string());
    let body = ureq::get(&url)
        .call()
        .expect("fetch")
        .into_string()
        .expect("body");
    assert_eq!(body, "not really a volume");

    server.shutdown();
}

#[test]
fn missing_file_and_unknown_route_are_not_found() {
    let comms = CommsState::new();
    let mut server = spawn_file_server(&comms);
    let info = comms.wait(HANDSHAKE_WAIT).expect("port handshake");

    let missing = info.file_url("/no/such/file.nii");
    match ureq::get(&missing).call() {
        Err(ureq::Error::Status(status, _)) => assert_eq!(status, 404),
        other => panic!("expected 404, got {other:?}"),
    }

    let unknown = format!(
        "http://{}:{}/other?filename=/tmp/x",
        info.host, info.file_server_port
    );
    match ureq::get(&unknown).call() {
        Err(ureq::Error::Status(status, _)) => assert_eq!(status, 404),
        other => panic!("expected 404, got {other:?}"),
    }

    server.shutdown();
}

#[test]
fn request_without_a_filename_is_a_bad_request() {
    let comms = CommsState::new();
    let mut server = spawn_file_server(&comms);
    let info = comms.wait(HANDSHAKE_WAIT).expect("port handshake");

    let bare = format!("http://{}:{}/file", info.host, info.file_server_port);
    match ureq::get(&bare).call() {
        Err(ureq::Error::Status(status, _)) => assert_eq!(status, 400),
        other => panic!("expected 400, got {other:?}"),
    }

    server.shutdown();
}
