// Environment override tests
//
// Kept in their own test binary so the process environment they change is
// not shared with the file-based configuration tests.

use anyhow::Result;
use mic_sampler::Config;
use tempfile::TempDir;

#[test]
fn test_environment_overrides_nested_keys() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().join("none");

    std::env::set_var("MIC_SAMPLER_AUDIO__FFT_SIZE", "4096");
    std::env::set_var("MIC_SAMPLER_SCHEDULER__REFRESH_HZ", "120");
    let loaded = Config::load(path.to_str().unwrap());
    std::env::remove_var("MIC_SAMPLER_AUDIO__FFT_SIZE");
    std::env::remove_var("MIC_SAMPLER_SCHEDULER__REFRESH_HZ");

    let cfg = loaded?;
    assert_eq!(cfg.audio.fft_size, 4096);
    assert_eq!(cfg.scheduler.refresh_hz, 120.0);
    assert_eq!(cfg.session_config().window_size(), 2048);

    Ok(())
}
