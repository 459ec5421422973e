//! Terminal rendering of a workout session.

use std::io::{self, Stdout, Write};
use std::process::{Child, Command, Stdio};

use mundane_core::error::SinkError;
use mundane_core::sink::{NotificationSink, SinkResult};
use mundane_core::storage::SpeechConfig;
use mundane_core::timer::{format_clock, is_final_seconds};
use mundane_core::{ExerciseRecord, SessionPhase};

const BAR_WIDTH: usize = 30;

/// Prints exercises, a single-line countdown and announcements to stdout,
/// and optionally hands announcements to an external speech program.
pub struct TerminalSink {
    out: Stdout,
    /// The countdown line is open and must be ended before other output.
    mid_line: bool,
    speech: Option<String>,
    speaking: Option<Child>,
}

impl TerminalSink {
    pub fn new(speech: &SpeechConfig) -> Self {
        Self {
            out: io::stdout(),
            mid_line: false,
            speech: speech.command.clone().filter(|_| speech.enabled),
            speaking: None,
        }
    }

    fn end_line(&mut self) -> io::Result<()> {
        if self.mid_line {
            writeln!(self.out)?;
            self.mid_line = false;
        }
        Ok(())
    }

    /// Start speaking `text`, cutting off anything still being spoken.
    fn speak(&mut self, text: &str) -> SinkResult {
        let Some(program) = self.speech.as_deref() else {
            return Ok(());
        };
        if let Some(mut previous) = self.speaking.take() {
            let _ = previous.kill();
            let _ = previous.wait();
        }
        let child = Command::new(program)
            .arg(text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| SinkError::Unavailable(format!("speech command '{program}': {e}")))?;
        self.speaking = Some(child);
        Ok(())
    }
}

impl NotificationSink for TerminalSink {
    fn show_exercise(&mut self, record: &ExerciseRecord, next_label: &str) -> SinkResult {
        self.end_line()?;
        writeln!(self.out)?;
        writeln!(self.out, "== {} ==", record.name)?;
        writeln!(
            self.out,
            "   {} | {}",
            record.equipment,
            record.setting_label()
        )?;
        writeln!(self.out, "   {}", record.detail)?;
        writeln!(self.out, "   visuals: {} | {}", record.vis_static, record.vis_loop)?;
        writeln!(self.out, "   NEXT: {}", next_label.to_uppercase())?;
        self.out.flush()?;
        Ok(())
    }

    fn show_countdown(&mut self, remaining_secs: u32, progress: f64) -> SinkResult {
        let filled = ((progress * BAR_WIDTH as f64).round() as usize).min(BAR_WIDTH);
        let marker = if is_final_seconds(remaining_secs) { "!" } else { " " };
        write!(
            self.out,
            "\r   {}{} [{}{}] {:>3.0}%",
            format_clock(remaining_secs),
            marker,
            "#".repeat(filled),
            "-".repeat(BAR_WIDTH - filled),
            progress * 100.0
        )?;
        self.out.flush()?;
        self.mid_line = true;
        Ok(())
    }

    fn announce(&mut self, text: &str) -> SinkResult {
        self.end_line()?;
        writeln!(self.out, ">> {text}")?;
        self.out.flush()?;
        self.speak(text)
    }

    fn show_phase(&mut self, phase: SessionPhase) -> SinkResult {
        self.end_line()?;
        match phase {
            SessionPhase::Work { .. } => writeln!(self.out, "-- WORK --")?,
            SessionPhase::Complete => {
                writeln!(self.out)?;
                writeln!(self.out, "== WORKOUT COMPLETE ==")?;
            }
            SessionPhase::Idle | SessionPhase::Prep { .. } => {}
        }
        self.out.flush()?;
        Ok(())
    }
}

impl Drop for TerminalSink {
    fn drop(&mut self) {
        if let Some(mut child) = self.speaking.take() {
            // Let the final announcement finish.
            let _ = child.wait();
        }
    }
}
