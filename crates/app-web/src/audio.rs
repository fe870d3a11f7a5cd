//! One-shot reward chord over WebAudio.

use wasm_bindgen::JsValue;
use web_sys as web;

// C5, E5, G5
const CHORD_FREQS_HZ: [f32; 3] = [523.25, 659.25, 783.99];
const CHORD_GAIN: f32 = 0.1;
const CHORD_DECAY_SEC: f64 = 0.3;
const ONSET_STAGGER_SEC: f64 = 0.05;

/// Play the click-reward chord. Fire-and-forget: failure is logged and must
/// never block the note transition that triggered it.
pub(crate) fn play_jazz_chord() {
    if let Err(e) = try_play() {
        log::warn!("audio unavailable: {e:?}");
    }
}

fn try_play() -> Result<(), JsValue> {
    let ctx = web::AudioContext::new()?;
    let gain = web::GainNode::new(&ctx)?;
    let _ = gain.connect_with_audio_node(&ctx.destination())?;

    let now = ctx.current_time();
    let _ = gain.gain().set_value_at_time(CHORD_GAIN, now)?;
    let _ = gain
        .gain()
        .exponential_ramp_to_value_at_time(0.01, now + CHORD_DECAY_SEC)?;

    // Slightly rolled chord rather than a hard block triad
    for (i, freq) in CHORD_FREQS_HZ.iter().enumerate() {
        let osc = web::OscillatorNode::new(&ctx)?;
        osc.set_type(web::OscillatorType::Sine);
        osc.frequency().set_value(*freq);
        let _ = osc.connect_with_audio_node(&gain)?;
        osc.start_with_when(now + i as f64 * ONSET_STAGGER_SEC)?;
        osc.stop_with_when(now + CHORD_DECAY_SEC)?;
    }
    Ok(())
}
