//! Integration tests for ffmpeg conversions.
use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use tempfile::tempdir;
use textract_host::{Platform, Transcoder, TranscoderConfig};

fn ffmpeg_available() -> bool {
    Command::new("ffmpeg")
        .arg("-version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// 0.1 s of a mono 8 kHz 16-bit square wave.
fn write_wav(path: &Path) {
    let samples: Vec<i16> = (0..800)
        .map(|i| if (i / 20) % 2 == 0 { 8000 } else { -8000 })
        .collect();
    let data_len = (samples.len() * 2) as u32;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + data_len).to_le_bytes());
    bytes.extend_from_slice(b"WAVEfmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes()); // PCM
    bytes.extend_from_slice(&1u16.to_le_bytes()); // mono
    bytes.extend_from_slice(&8000u32.to_le_bytes());
    bytes.extend_from_slice(&16000u32.to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&data_len.to_le_bytes());
    for s in samples {
        bytes.extend_from_slice(&s.to_le_bytes());
    }
    fs::write(path, bytes).unwrap();
}

fn host_transcoder() -> Transcoder {
    Transcoder::new(TranscoderConfig::new().platform(Platform::Other))
}

#[test]
fn converts_with_host_ffmpeg() {
    if !ffmpeg_available() {
        eprintln!("ffmpeg not on PATH; skipping");
        return;
    }
    let d = tempdir().unwrap();
    let input = d.path().join("Music_1.wav");
    let output = d.path().join("out/../Music_1_pcm.wav");
    write_wav(&input);

    let outcome = host_transcoder().try_convert(&input, &output).unwrap();
    assert!(outcome.success);
    assert_eq!(outcome.exit_code, Some(0));

    let written = d.path().join("Music_1_pcm.wav");
    assert!(fs::metadata(written).unwrap().len() > 0);
}

#[test]
fn missing_input_returns_normally() {
    let d = tempdir().unwrap();
    let output = d.path().join("out.wav");

    host_transcoder().convert(&d.path().join("missing.wav"), &output);
    textract_host::convert(&d.path().join("missing.wav"), &output);

    assert!(!output.exists());
}

#[test]
fn missing_input_is_an_unsuccessful_outcome() {
    if !ffmpeg_available() {
        eprintln!("ffmpeg not on PATH; skipping");
        return;
    }
    let d = tempdir().unwrap();
    let outcome = host_transcoder()
        .try_convert(&d.path().join("missing.wav"), &d.path().join("out.wav"))
        .unwrap();
    assert!(!outcome.success);
    assert_ne!(outcome.exit_code, Some(0));
}

#[test]
fn unreachable_executable_returns_normally() {
    let d = tempdir().unwrap();
    let input = d.path().join("in.wav");
    write_wav(&input);
    let t = Transcoder::new(TranscoderConfig::new().executable(d.path().join("no-ffmpeg-here")));

    t.convert(&input, &d.path().join("out.wav"));
    assert!(t.try_convert(&input, &d.path().join("out.wav")).is_err());
}
