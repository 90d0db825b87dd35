// Tests for configuration loading and validation

use anyhow::Result;
use mic_sampler::audio::{AudioBackendConfig, AudioSource, ToneBackend};
use mic_sampler::Config;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_missing_file_uses_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("does-not-exist");

    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.audio.source, AudioSource::Tone);
    assert_eq!(cfg.audio.fft_size, 2048);
    assert_eq!(cfg.audio.sample_rate, 44100);
    assert_eq!(cfg.scheduler.refresh_hz, 60.0);
    assert!(cfg.status.live);
    assert_eq!(cfg.session_config().window_size(), 1024);

    Ok(())
}

#[test]
fn test_file_overrides_defaults() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("sampler.toml");
    fs::write(
        &path,
        r#"
[audio]
fft_size = 4096
tone_hz = 220.0

[scheduler]
refresh_hz = 144.0

[status]
live = false
"#,
    )?;

    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.audio.fft_size, 4096);
    assert_eq!(cfg.audio.tone_hz, 220.0);
    assert_eq!(cfg.audio.block_ms, 10, "unset keys keep their defaults");
    assert_eq!(cfg.scheduler.refresh_hz, 144.0);
    assert!(!cfg.status.live);

    let backend = cfg.backend_config();
    assert_eq!(backend.tone_hz, 220.0);
    assert_eq!(backend.sample_rate, 44100);

    Ok(())
}

#[test]
fn test_microphone_source_from_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("mic.toml");
    fs::write(&path, "[audio]\nsource = \"microphone\"\n")?;

    let cfg = Config::load(path.to_str().unwrap())?;
    assert_eq!(cfg.audio.source, AudioSource::Microphone);

    Ok(())
}

#[test]
fn test_rejects_fft_size_that_is_not_a_power_of_two() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[audio]\nfft_size = 1000\n")?;

    let err = Config::load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("power of two"), "{}", err);

    Ok(())
}

#[test]
fn test_rejects_non_positive_refresh_rate() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("bad.toml");
    fs::write(&path, "[scheduler]\nrefresh_hz = 0.0\n")?;

    assert!(Config::load(path.to_str().unwrap()).is_err());

    Ok(())
}

#[test]
fn test_rejects_refresh_rate_too_fast_for_timer() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("fast.toml");
    fs::write(&path, "[scheduler]\nrefresh_hz = 1e10\n")?;

    let err = Config::load(path.to_str().unwrap()).unwrap_err();
    assert!(err.to_string().contains("at most"), "{}", err);

    Ok(())
}

#[test]
fn test_rejects_oversized_block() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("block.toml");
    fs::write(&path, format!("[audio]\nblock_ms = {}\n", i64::MAX))?;

    assert!(Config::load(path.to_str().unwrap()).is_err());

    Ok(())
}

#[test]
fn test_tone_backend_rejects_overflowing_block() {
    let config = AudioBackendConfig {
        block_ms: u64::MAX,
        ..AudioBackendConfig::default()
    };

    assert!(ToneBackend::new(config).is_err());
}
