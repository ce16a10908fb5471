//! Incremental parsing of a job's log stream.
//!
//! The renderer writes a terminal-style log: progress meters end lines with a
//! bare carriage return so the next write overwrites them in place. Fragments
//! arrive with arbitrary chunking, in order, and the parser reconstructs the
//! exact display a terminal would show (`buffer + line`) while extracting a
//! monotonic completion estimate.
//!
//! Fragments must be fed strictly in arrival order: `pending_cr` and
//! `completed_time` are sequential accumulators, and reordering corrupts both
//! the reconstructed display and the time baseline.

use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// Progress state for one export job, reset at job start.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobProgress {
    /// Committed, newline-terminated scroll-back text
    pub buffer: String,
    /// The current, not-yet-terminated trailing line
    pub line: String,
    /// The previous fragment ended with a bare carriage return; the next
    /// fragment overwrites `line` instead of extending it
    pub pending_cr: bool,
    /// Total output seconds rendered so far, across parts
    pub time: f64,
    /// Output seconds accumulated by fully rendered parts, the baseline the
    /// current part's progress is added to
    pub completed_time: f64,
    /// 1-based index of the part being rendered
    pub part_index: u32,
    /// Total part count announced by the renderer
    pub part_count: u32,
    /// Expected total output duration, for the permille estimate
    pub duration: f64,
    /// Completion in thousandths, 0..=1000
    pub permil: i64,
    /// Terminal exit code, recorded verbatim when announced
    pub exit_code: Option<String>,
}

impl JobProgress {
    /// Fresh progress state for a job expected to produce `duration` seconds
    /// of output.
    pub fn start(duration: f64) -> Self {
        Self {
            duration,
            ..Self::default()
        }
    }

    /// Reset in place at job start.
    pub fn reset(&mut self, duration: f64) {
        *self = Self::start(duration);
    }

    /// Consume one log fragment.
    pub fn feed(&mut self, fragment: &str) {
        if self.pending_cr {
            self.line.clear();
            self.pending_cr = false;
        }
        // one extraction per fragment, first match wins
        if let Some((index, count)) = match_part_boundary(fragment) {
            if index <= self.part_count {
                self.completed_time = self.time;
            } else {
                self.completed_time = 0.0;
            }
            self.part_index = index;
            self.part_count = count;
            debug!(part = index, of = count, "render part boundary");
        } else if let Some(elapsed) = match_progress_time(fragment) {
            self.time = self.completed_time + elapsed;
            if self.duration > 0.0 {
                self.permil = (self.time * 1000.0 / self.duration).floor() as i64;
            }
        } else if let Some(code) = match_exit_code(fragment) {
            self.exit_code = Some(code.to_string());
            debug!(code, "render exit code");
        }
        self.commit(fragment);
    }

    /// Append the fragment's text to the reconstructed display.
    fn commit(&mut self, fragment: &str) {
        if let Some(newline) = fragment.rfind('\n') {
            // everything up to the last newline joins the scroll-back,
            // prefixed by the pending line; the remainder starts a new line
            self.buffer.push_str(&self.line);
            self.buffer.push_str(&fragment[..=newline]);
            self.line.clear();
            self.line.push_str(&fragment[newline + 1..]);
        } else if let Some(before) = fragment.strip_suffix('\r') {
            // overwrite takes effect when the next fragment arrives
            self.line.push_str(before);
            self.pending_cr = true;
        } else if let Some(cr) = fragment.rfind('\r') {
            // mid-fragment overwrite: the text after the return replaces the
            // current line
            self.line.clear();
            self.line.push_str(&fragment[cr + 1..]);
        } else {
            self.line.push_str(fragment);
        }
    }

    /// The display a terminal would show for the bytes consumed so far.
    pub fn display(&self) -> String {
        format!("{}{}", self.buffer, self.line)
    }
}

// ── Pattern matchers, in priority order ─────────────────────────

/// `\nstarting command <i>/<n>` at the start of a fragment.
fn match_part_boundary(fragment: &str) -> Option<(u32, u32)> {
    let rest = fragment.strip_prefix('\n')?;
    let rest = rest.strip_prefix("starting command ")?;
    let (index, rest) = take_integer(rest)?;
    let rest = rest.strip_prefix('/')?;
    let (count, _) = take_integer(rest)?;
    Some((index, count))
}

/// `size=… time=H:MM:SS.ff bitrate=` anywhere in the fragment.
fn match_progress_time(fragment: &str) -> Option<f64> {
    let at = fragment.find("size=")?;
    let rest = &fragment[at..];
    let at = rest.find("time=")?;
    let rest = &rest[at + "time=".len()..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit() && c != ':' && c != '.')
        .unwrap_or(rest.len());
    let (stamp, rest) = rest.split_at(end);
    if !rest.trim_start().starts_with("bitrate=") {
        return None;
    }
    parse_timestamp(stamp)
}

/// `\nexit code <n>` at the start of a fragment.
fn match_exit_code(fragment: &str) -> Option<&str> {
    let rest = fragment.strip_prefix('\n')?;
    let rest = rest.strip_prefix("exit code ")?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

fn take_integer(text: &str) -> Option<(u32, &str)> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let value = text[..end].parse().ok()?;
    Some((value, &text[end..]))
}

/// `H:MM:SS` with optional fractional seconds, as seconds.
fn parse_timestamp(stamp: &str) -> Option<f64> {
    let mut components = stamp.split(':');
    let hours: f64 = components.next()?.parse().ok()?;
    let minutes: f64 = components.next()?.parse().ok()?;
    let seconds: f64 = components.next()?.parse().ok()?;
    if components.next().is_some() {
        return None;
    }
    Some(hours * 3600.0 + minutes * 60.0 + seconds)
}

// ── Stream consumption ──────────────────────────────────────────

/// Drain a job's log stream into its progress state.
///
/// One sequential loop per job: fragments are processed strictly in arrival
/// order. Returns when the sender side closes, which is the job-termination
/// signal.
pub async fn drain(rx: &mut UnboundedReceiver<String>, progress: &mut JobProgress) {
    while let Some(fragment) = rx.recv().await {
        progress.feed(&fragment);
    }
}
