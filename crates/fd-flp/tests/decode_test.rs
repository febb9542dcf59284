//! Decoding behaviour on complete project buffers.

use fd_flp::{parse_metadata, read_metadata, FlpError, FlpMetadata};

/// Build a project file from a preamble and a raw event stream.
fn project(events: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"FLhd");
    buf.extend_from_slice(&6u32.to_le_bytes());
    buf.extend_from_slice(&0u16.to_le_bytes()); // format
    buf.extend_from_slice(&1u16.to_le_bytes()); // channels
    buf.extend_from_slice(&96u16.to_le_bytes()); // ppq
    buf.extend_from_slice(b"FLdt");
    buf.extend_from_slice(&(events.len() as u32).to_le_bytes());
    buf.extend_from_slice(events);
    buf
}

fn tempo(bpm: u16) -> Vec<u8> {
    let [lo, hi] = bpm.to_le_bytes();
    vec![66, lo, hi]
}

fn fine_tempo(milli_bpm: u32) -> Vec<u8> {
    let mut ev = vec![156];
    ev.extend_from_slice(&milli_bpm.to_le_bytes());
    ev
}

fn text(id: u8, value: &str) -> Vec<u8> {
    let mut payload = value.as_bytes().to_vec();
    payload.push(0);
    assert!(payload.len() < 0x80);
    let mut ev = vec![id, payload.len() as u8];
    ev.extend_from_slice(&payload);
    ev
}

#[test]
fn all_fields_then_garbage() {
    let mut events = Vec::new();
    events.extend(tempo(140));
    events.extend(text(194, "Night Drive"));
    events.extend(text(199, "21.2.3.4004"));
    events.extend([0xFF, 0xFE, 0x80, 0x01, 0x99, 0xC3]);

    let meta = parse_metadata(&project(&events)).unwrap();
    assert_eq!(
        meta,
        FlpMetadata {
            bpm: Some(140.0),
            title: Some("Night Drive".into()),
            version: Some("21.2.3.4004".into()),
        }
    );
}

#[test]
fn later_fine_tempo_wins() {
    let mut events = Vec::new();
    events.extend(tempo(60000));
    events.extend(fine_tempo(128_500));

    let meta = parse_metadata(&project(&events)).unwrap();
    assert_eq!(meta.bpm, Some(128.5));
}

#[test]
fn integer_tempo_alone() {
    let meta = parse_metadata(&project(&tempo(174))).unwrap();
    assert_eq!(meta.bpm, Some(174.0));
    assert_eq!(meta.title, None);
    assert_eq!(meta.version, None);
}

#[test]
fn wrong_magic_is_invalid_format() {
    let mut buf = project(&tempo(120));
    buf[..4].copy_from_slice(b"MThd");
    let err = parse_metadata(&buf).unwrap_err();
    assert!(matches!(err, FlpError::InvalidFormat(_)));
}

#[test]
fn ends_mid_event() {
    let mut events = Vec::new();
    events.extend(text(199, "20.8.4"));
    events.extend(tempo(95));
    events.push(194); // id with no value byte

    let meta = parse_metadata(&project(&events)).unwrap();
    assert_eq!(meta.version.as_deref(), Some("20.8.4"));
    assert_eq!(meta.bpm, Some(95.0));
    assert_eq!(meta.title, None);
}

#[test]
fn ends_inside_text_payload() {
    let mut events = Vec::new();
    events.extend(tempo(88));
    events.extend([194, 20, b'H', b'a', b'l', b'f']);

    let meta = parse_metadata(&project(&events)).unwrap();
    assert_eq!(meta.bpm, Some(88.0));
    assert_eq!(meta.title, None);
}

#[test]
fn long_title_uses_continuation_length() {
    let title = "x".repeat(300);
    let payload_len = title.len() + 1;
    let mut events = vec![
        194,
        (payload_len as u8 & 0x7F) | 0x80,
        (payload_len >> 7) as u8,
    ];
    events.extend_from_slice(title.as_bytes());
    events.push(0);

    let meta = parse_metadata(&project(&events)).unwrap();
    assert_eq!(meta.title.as_deref(), Some(title.as_str()));
}

#[test]
fn source_buffer_is_untouched() {
    let buf = project(&tempo(120));
    let copy = buf.clone();
    parse_metadata(&buf).unwrap();
    assert_eq!(buf, copy);
}

#[tokio::test]
async fn read_metadata_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Night Drive.flp");

    let mut events = Vec::new();
    events.extend(fine_tempo(92_000));
    events.extend(text(194, "Night Drive"));
    std::fs::write(&path, project(&events)).unwrap();

    let meta = read_metadata(&path).await.unwrap();
    assert_eq!(meta.bpm, Some(92.0));
    assert_eq!(meta.title.as_deref(), Some("Night Drive"));
}

#[tokio::test]
async fn read_metadata_missing_file_is_io() {
    let dir = tempfile::tempdir().unwrap();
    let err = read_metadata(dir.path().join("missing.flp")).await.unwrap_err();
    assert!(matches!(err, FlpError::Io(_)));
}
