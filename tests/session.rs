use binaural_dsp::{
    dsp::{PhaseAccumulator, PinkNoise},
    engine::{BinauralEngine, EngineConfig},
    graph::{Channel, Frame, SampleSource, SILENCE},
    schedule::Breakpoint,
    Error, HEADROOM, MAX_BLOCK_SIZE,
};

const SAMPLE_RATE: u32 = 44_100;
const SEED: u64 = 2024;

fn reference_session() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new(0.0, 300.0, 10.0)
            .with_tone_volume(0.1)
            .with_noise(0.4),
        Breakpoint::new(10.0, 150.0, 6.0).with_tone_volume(0.15),
    ]
}

fn engine() -> BinauralEngine {
    BinauralEngine::new(reference_session(), EngineConfig::default().with_seed(SEED)).unwrap()
}

fn render_all(engine: &mut BinauralEngine, block: usize) -> Vec<Frame> {
    let mut out = Vec::new();
    let mut buffer = vec![SILENCE; block];
    loop {
        let produced = engine.render_block(&mut buffer);
        out.extend_from_slice(&buffer[..produced]);
        if produced < block {
            break;
        }
    }
    out
}

#[test]
fn renders_exactly_the_session_length() {
    let mut engine = engine();
    assert_eq!(engine.total_frames(), 441_000);

    let frames = render_all(&mut engine, 4_096);
    assert_eq!(frames.len(), 441_000);
    assert!(engine.is_finished());

    // Never more after end-of-data
    let mut buffer = vec![SILENCE; 64];
    assert_eq!(engine.render_block(&mut buffer), 0);
}

#[test]
fn first_frame_is_noise_only() {
    let mut engine = engine();
    let mut buffer = vec![SILENCE; 1];
    engine.render_block(&mut buffer);

    let mut noise = PinkNoise::seeded(SEED);
    let expected = (noise.next_sample() * 0.4 * HEADROOM) as f32;

    assert_ne!(expected, 0.0);
    assert_eq!(buffer[0], [expected, expected]);
}

#[test]
fn midpoint_frequencies() {
    let engine = engine();
    let schedule = engine.schedule();
    let t = 220_500.0 / SAMPLE_RATE as f64;

    assert_eq!(t, 5.0);
    assert_eq!(Channel::Left.frequency_at(schedule, t), 225.0);
    assert_eq!(Channel::Right.frequency_at(schedule, t), 233.0);
    assert!((schedule.tone_volume(t) - 0.125).abs() < 1e-12);
    assert!(schedule.noise(t).on);
}

#[test]
fn matches_independently_composed_sources() {
    let mut engine = engine();
    let schedule = engine.schedule().clone();
    let frames = render_all(&mut engine, MAX_BLOCK_SIZE);

    let mut left = PhaseAccumulator::new(SAMPLE_RATE);
    let mut right = PhaseAccumulator::new(SAMPLE_RATE);
    let mut noise = PinkNoise::seeded(SEED);

    for (n, frame) in frames.iter().enumerate() {
        let t = n as f64 / SAMPLE_RATE as f64;
        let volume = schedule.tone_volume(t);

        let l = left.tick(schedule.frequency(t)) * volume * HEADROOM;
        let r = right.tick(schedule.frequency(t) + schedule.beat_frequency(t)) * volume * HEADROOM;
        let n_sample = noise.next_sample() * schedule.noise(t).gain() * HEADROOM;

        assert!(
            (frame[0] as f64 - (l + n_sample)).abs() < 1e-6,
            "left mismatch at frame {n}"
        );
        assert!(
            (frame[1] as f64 - (r + n_sample)).abs() < 1e-6,
            "right mismatch at frame {n}"
        );
    }
}

#[test]
fn output_stays_within_headroom() {
    // Tone peak is 0.15 * 0.5; pink noise peaks at 0.5 before 0.4 * 0.5
    let frames = render_all(&mut engine(), MAX_BLOCK_SIZE);
    let peak = frames
        .iter()
        .flat_map(|f| f.iter())
        .fold(0.0f32, |acc, s| acc.max(s.abs()));

    assert!(peak > 0.0);
    assert!(peak <= (0.15 * HEADROOM + 0.5 * 0.4 * HEADROOM) as f32 + 1e-6);
}

#[test]
fn block_size_does_not_change_output() {
    let a = render_all(&mut engine(), 64);
    let b = render_all(&mut engine(), MAX_BLOCK_SIZE);
    let c = render_all(&mut engine(), 10_000);
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn stretch_scales_length() {
    let engine = BinauralEngine::new(
        reference_session(),
        EngineConfig::default().with_seed(SEED).with_stretch(0.5),
    )
    .unwrap();
    assert_eq!(engine.total_frames(), 220_500);
    assert_eq!(engine.schedule().frequency(2.5), 225.0);
}

#[test]
fn zero_length_session_is_rejected() {
    let result = BinauralEngine::new(
        vec![Breakpoint::new(0.0, 200.0, 4.0)],
        EngineConfig::default(),
    );
    assert!(matches!(result, Err(Error::ZeroDuration)));
}
