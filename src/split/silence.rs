//! Silence locator.
//!
//! Finds the best nearby pause for a chunk boundary: given a target
//! position, scans a bounded window for intervals whose level stays below
//! a dBFS threshold long enough, and picks the one whose midpoint is
//! closest to the target.

use crate::audio::AudioTrack;
use crate::config::SplitConfig;
use crate::defaults;

/// A sustained quiet interval `[start_ms, end_ms)` inside the search window.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SilenceRun {
    start_ms: u64,
    end_ms: u64,
}

impl SilenceRun {
    fn len_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }

    fn midpoint_ms(&self) -> u64 {
        (self.start_ms + self.end_ms) / 2
    }
}

/// RMS level of a frame in dBFS relative to i16 full scale.
///
/// An all-zero frame is digital silence and maps to negative infinity,
/// which compares below any threshold.
fn frame_dbfs(frame: &[i16]) -> f32 {
    if frame.is_empty() {
        return f32::NEG_INFINITY;
    }

    let sum_squares: f64 = frame
        .iter()
        .map(|&s| {
            let normalized = s as f64 / i16::MAX as f64;
            normalized * normalized
        })
        .sum();
    let rms = (sum_squares / frame.len() as f64).sqrt();

    if rms <= 0.0 {
        f32::NEG_INFINITY
    } else {
        (20.0 * rms.log10()) as f32
    }
}

/// Collect all silence runs of at least `min_silence_ms` within
/// `[window_start_ms, window_end_ms)`, in start order.
fn detect_silence_runs(
    track: &AudioTrack,
    window_start_ms: u64,
    window_end_ms: u64,
    min_silence_ms: u32,
    threshold_db: f32,
) -> Vec<SilenceRun> {
    let frame_ms = defaults::SILENCE_FRAME_MS as u64;
    let frame_len = (track.sample_rate() as u64 * frame_ms / 1000).max(1) as usize;
    let samples = track.samples();
    let window_start = track.sample_at(window_start_ms);
    let window_end = track.sample_at(window_end_ms);

    // Frame positions in ms derive from the sample index; accumulating a
    // fixed frame_ms would drift at rates where frame_len truncates
    // (22050Hz frames are 220 samples, not quite 10ms).
    let rate = track.sample_rate() as u64;
    let ms_at = |idx: usize| idx as u64 * 1000 / rate;

    let mut runs = Vec::new();
    let mut run_start: Option<u64> = None;

    let mut idx = window_start;
    while idx < window_end {
        let frame_end = (idx + frame_len).min(window_end);
        let quiet = frame_dbfs(&samples[idx..frame_end]) < threshold_db;
        let pos_ms = ms_at(idx);

        match (quiet, run_start) {
            (true, None) => run_start = Some(pos_ms),
            (false, Some(start)) => {
                // Run ended at the start of this loud frame
                if pos_ms - start >= min_silence_ms as u64 {
                    runs.push(SilenceRun {
                        start_ms: start,
                        end_ms: pos_ms,
                    });
                }
                run_start = None;
            }
            _ => {}
        }

        idx = frame_end;
    }

    // Close a run still open at the window edge
    if let Some(start) = run_start {
        let end_ms = ms_at(window_end);
        if end_ms - start >= min_silence_ms as u64 {
            runs.push(SilenceRun {
                start_ms: start,
                end_ms,
            });
        }
    }

    runs
}

/// Find the best silence point near `target_ms`.
///
/// Searches within `split_window_seconds` either side of the target,
/// clamped to the track boundaries. Returns the absolute midpoint (ms) of
/// the qualifying silence whose midpoint is closest to the target, or
/// `None` when nothing in the window qualifies. Ties go to the
/// earliest-starting run.
///
/// Pure function of its inputs; no side effects.
pub fn find_silence_near(track: &AudioTrack, target_ms: u64, config: &SplitConfig) -> Option<u64> {
    let window_ms = config.split_window_seconds as u64 * 1000;
    let window_start = target_ms.saturating_sub(window_ms);
    let window_end = (target_ms + window_ms).min(track.duration_ms());

    let runs = detect_silence_runs(
        track,
        window_start,
        window_end,
        config.min_silence_ms,
        config.silence_threshold_db,
    );

    let mut best: Option<u64> = None;
    let mut best_dist = u64::MAX;
    for run in &runs {
        let midpoint = run.midpoint_ms();
        let dist = midpoint.abs_diff(target_ms);
        // Strict < keeps the first-found (lowest start) run on ties
        if dist < best_dist {
            best_dist = dist;
            best = Some(midpoint);
        }
    }

    best
}
