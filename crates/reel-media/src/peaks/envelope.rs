//! Short-time RMS energy envelope.

/// Compute an RMS envelope over fixed-size frames with the given hop.
///
/// A trailing partial frame is skipped; input shorter than one frame yields
/// an empty envelope.
pub fn rms_envelope(samples: &[f32], frame_len: usize, hop_len: usize) -> Vec<f32> {
    if frame_len == 0 || hop_len == 0 || samples.len() < frame_len {
        return Vec::new();
    }

    let mut envelope = Vec::with_capacity(samples.len() / hop_len + 1);
    let mut start = 0;
    while start + frame_len <= samples.len() {
        let frame = &samples[start..start + frame_len];
        let energy: f32 = frame.iter().map(|s| s * s).sum::<f32>() / frame_len as f32;
        envelope.push(energy.sqrt());
        start += hop_len;
    }

    envelope
}

/// Normalize an envelope in place against its loudest frame.
///
/// Returns `false` for silent input (maximum indistinguishable from zero),
/// in which case the envelope is left untouched and the caller should treat
/// the clip as having no peaks.
pub fn normalize_envelope(envelope: &mut [f32]) -> bool {
    let max = envelope.iter().fold(0.0f32, |acc, &v| acc.max(v));
    if max <= f32::EPSILON {
        return false;
    }
    for value in envelope.iter_mut() {
        *value /= max;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_constant_signal() {
        // RMS of a constant 0.5 signal is 0.5 in every frame.
        let samples = vec![0.5f32; 1600];
        let envelope = rms_envelope(&samples, 800, 400);
        assert_eq!(envelope.len(), 3);
        for value in &envelope {
            assert!((value - 0.5).abs() < 0.001);
        }
    }

    #[test]
    fn test_envelope_tracks_loud_region() {
        let mut samples = vec![0.01f32; 2400];
        for s in &mut samples[800..1600] {
            *s = 0.9;
        }
        let envelope = rms_envelope(&samples, 800, 800);
        assert_eq!(envelope.len(), 3);
        assert!(envelope[1] > envelope[0] * 10.0);
        assert!(envelope[1] > envelope[2] * 10.0);
    }

    #[test]
    fn test_envelope_short_input() {
        let samples = vec![0.5f32; 100];
        assert!(rms_envelope(&samples, 800, 400).is_empty());
        assert!(rms_envelope(&[], 800, 400).is_empty());
    }

    #[test]
    fn test_normalize() {
        let mut envelope = vec![0.1, 0.4, 0.2];
        assert!(normalize_envelope(&mut envelope));
        assert!((envelope[1] - 1.0).abs() < 0.001);
        assert!((envelope[0] - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_normalize_silence() {
        let mut envelope = vec![0.0f32; 10];
        assert!(!normalize_envelope(&mut envelope));
    }
}
