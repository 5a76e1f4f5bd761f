//! Stream simulation: runs the full pipeline on the host in real time.
//!
//! A transfer thread stands in for the two linked DMA channels: once per
//! block period it fills the active input half with a test signal, drains
//! the active output half and raises both completion events. The processing
//! task runs on its own thread and is unparked whenever a half is posted.
//! The main thread evaluates the indicators at a slower cadence, like the
//! periodic scheduler on hardware.
//!
//! ```text
//! transfer thread ──complete()──► PipelineState ──Mailbox──► task thread
//!        │                                                       │
//!        └────────────── BlockArena (A/B, in/out) ◄──────────────┘
//! ```
//!
//! Usage: `stream_sim [mode] [seconds]` (mode 0–15, default 7).

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use fir_stream::block::{BlockArena, Direction, Half};
use fir_stream::constants::BLOCK_FRAMES;
use fir_stream::control::{IndicatorPolicy, ModeCell};
use fir_stream::dsp::{EnvelopeState, FilterBank, Mode};
use fir_stream::pipeline::{PipelineState, PipelineTask};

const SAMPLE_RATE: f32 = 48_000.0;
const INDICATOR_PERIOD: Duration = Duration::from_millis(100);

static ARENA: BlockArena = BlockArena::new();
static STATE: PipelineState = PipelineState::new();
static ENVELOPE: EnvelopeState = EnvelopeState::new();
static MODE: ModeCell = ModeCell::new(Mode::ALL_BANDS);
static BANK: FilterBank = FilterBank::STANDARD;

static RUNNING: AtomicBool = AtomicBool::new(true);
static OUTPUT_PEAK: AtomicI32 = AtomicI32::new(0);

/// Low tone on the right channel, high tone on the left, slowly swept in level.
fn fill_test_signal(block: &mut [i16], first_frame: u64) {
    for (i, frame) in block.chunks_exact_mut(2).enumerate() {
        let t = (first_frame + i as u64) as f32 / SAMPLE_RATE;
        let level = 0.5 + 0.5 * libm::sinf(t * 0.5);
        frame[0] = (libm::sinf(t * 2.0 * core::f32::consts::PI * 150.0) * 12_000.0 * level) as i16;
        frame[1] = (libm::sinf(t * 2.0 * core::f32::consts::PI * 9_000.0) * 8_000.0 * level) as i16;
    }
}

fn transfer_loop(task: thread::Thread, blocks: u64) {
    let period = Duration::from_secs_f32(BLOCK_FRAMES as f32 / SAMPLE_RATE);
    let start = Instant::now();
    let mut half = Half::A;

    for k in 0..blocks {
        // SAFETY: the simulated transfer owns `half` for this period; the task
        // only touches the half it took from the mailbox, which is the other one.
        unsafe {
            let t = ARENA.transfer(half);
            fill_test_signal(&mut t.input.samples, k * BLOCK_FRAMES as u64);
            let peak = t.output.iter().map(|s| (*s as i32).abs()).max().unwrap_or(0);
            OUTPUT_PEAK.fetch_max(peak, Ordering::Relaxed);
        }

        if let Some(deadline) = (start + period * (k as u32 + 1)).checked_duration_since(Instant::now()) {
            thread::sleep(deadline);
        }

        STATE.complete(Direction::Input);
        if STATE.complete(Direction::Output).is_some() {
            task.unpark();
        }
        half = half.other();
    }

    RUNNING.store(false, Ordering::Release);
    task.unpark();
}

fn task_loop() {
    let mut task = PipelineTask::new(&BANK);
    loop {
        match task.poll(&STATE, &ARENA, MODE.get(), &ENVELOPE) {
            Some(half) => log::trace!("processed half {:?}", half),
            None if !RUNNING.load(Ordering::Acquire) => break,
            None => thread::park(),
        }
    }
    log::info!("task: {} blocks processed", task.processed());
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let mut args = std::env::args().skip(1);
    let mode = args
        .next()
        .and_then(|a| a.parse::<u8>().ok())
        .map(Mode::new)
        .unwrap_or(Mode::ALL_BANDS);
    let seconds = args.next().and_then(|a| a.parse::<f32>().ok()).unwrap_or(3.0);
    let blocks = (seconds * SAMPLE_RATE / BLOCK_FRAMES as f32).ceil() as u64;

    MODE.set(mode);
    log::info!(
        "mode {} ({:?}, bands {:?}), {} blocks of {} frames",
        mode.code(),
        mode.state(),
        mode.bands(),
        blocks,
        BLOCK_FRAMES
    );

    let task = thread::Builder::new()
        .name("task".into())
        .spawn(task_loop)
        .expect("spawn task thread");
    let task_handle = task.thread().clone();
    let transfer = thread::Builder::new()
        .name("transfer".into())
        .spawn(move || transfer_loop(task_handle, blocks))
        .expect("spawn transfer thread");

    let policy = IndicatorPolicy::STANDARD;
    let mut shown = [false; 3];
    while RUNNING.load(Ordering::Acquire) {
        thread::sleep(INDICATOR_PERIOD);
        let power = ENVELOPE.snapshot();
        let lit = policy.evaluate(&ENVELOPE);
        if lit != shown {
            log::info!(
                "indicators low={} mid={} high={} (power {:.0} / {:.0} / {:.1})",
                lit[0] as u8,
                lit[1] as u8,
                lit[2] as u8,
                power[0],
                power[1],
                power[2]
            );
            shown = lit;
        }
    }

    transfer.join().expect("transfer thread");
    task.join().expect("task thread");

    log::info!(
        "done: {} triggers, {} overruns, output peak {}",
        STATE.triggers(),
        STATE.overruns(),
        OUTPUT_PEAK.load(Ordering::Relaxed)
    );
}
