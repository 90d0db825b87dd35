use anyhow::{Context, Result};
use clap::Parser;
use mic_sampler::audio::{AudioBackendFactory, AudioSource, RollingAnalyser};
use mic_sampler::recording::{ConsoleStatus, Control, FrameTicker, Recorder};
use mic_sampler::{Config, RecordingSession, SessionState};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, Level};

#[derive(Parser)]
#[command(name = "mic-sampler")]
#[command(about = "Sample live audio into fixed-size chunks on a display-refresh cadence")]
struct Args {
    /// Configuration file (extension optional)
    #[arg(short, long, default_value = "config/mic-sampler")]
    config: String,

    /// Audio source, overrides the configuration
    #[arg(short, long, value_enum)]
    source: Option<AudioSource>,

    /// FFT size; each chunk holds half this many samples
    #[arg(long)]
    fft_size: Option<usize>,

    /// Tick rate of the frame scheduler in Hz
    #[arg(long)]
    refresh_hz: Option<f64>,

    /// Record immediately for this many seconds, then exit
    #[arg(short, long)]
    duration: Option<f64>,

    /// Print the final summary as JSON
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .init();

    let mut cfg = Config::load(&args.config)?;
    if let Some(source) = args.source {
        cfg.audio.source = source;
    }
    if let Some(fft_size) = args.fft_size {
        cfg.audio.fft_size = fft_size;
    }
    if let Some(refresh_hz) = args.refresh_hz {
        cfg.scheduler.refresh_hz = refresh_hz;
    }
    cfg.validate()?;

    info!("mic-sampler v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Source: {:?}, FFT size: {}, refresh: {:.1}Hz",
        cfg.audio.source, cfg.audio.fft_size, cfg.scheduler.refresh_hz
    );

    // Setup failures are reported once and end the process
    let mut backend = AudioBackendFactory::create(cfg.audio.source, cfg.backend_config())
        .inspect_err(|e| error!("Error accessing audio input: {:#}", e))?;
    let frames = backend
        .start()
        .await
        .inspect_err(|e| error!("Error accessing audio input: {:#}", e))?;
    info!("Capturing from {}", backend.name());

    let analyser = RollingAnalyser::new(cfg.audio.fft_size)?;
    let pump = analyser.attach(frames);

    let ticker = FrameTicker::new(cfg.scheduler.refresh_hz)?;
    debug!("Frame period: {:?}", ticker.period());
    let session = RecordingSession::new(cfg.session_config());
    let status = ConsoleStatus::new(cfg.status.live, args.json);
    let recorder = Recorder::new(session, analyser, ticker, status);

    let (control_tx, control_rx) = mpsc::channel(8);

    match args.duration {
        Some(secs) => {
            let duration = Duration::try_from_secs_f64(secs)
                .with_context(|| format!("Invalid duration: {}", secs))?;
            tokio::spawn(async move {
                let _ = control_tx.send(Control::Toggle).await;
                tokio::time::sleep(duration).await;
                let _ = control_tx.send(Control::Shutdown).await;
            });
        }
        None => {
            info!(
                "Press Enter to {} (again to stop), q to quit",
                SessionState::default().action_label()
            );
            tokio::spawn(async move {
                let mut lines = BufReader::new(tokio::io::stdin()).lines();
                while let Ok(Some(line)) = lines.next_line().await {
                    let control = match line.trim() {
                        "q" | "quit" => Control::Shutdown,
                        _ => Control::Toggle,
                    };
                    if control_tx.send(control).await.is_err() || control == Control::Shutdown {
                        break;
                    }
                }
                let _ = control_tx.send(Control::Shutdown).await;
            });
        }
    }

    let recorder = recorder.run(control_rx).await;

    if let Err(e) = backend.stop().await {
        error!("Failed to stop audio backend: {}", e);
    }
    pump.abort();

    info!(
        "Session {} finished after {} episode(s)",
        recorder.session().session_id(),
        recorder.session().episode()
    );

    Ok(())
}
