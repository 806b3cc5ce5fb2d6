//! Replaying traces through the engine
//!
//! The trace is sampled at a fixed frame rate. Before each frame every
//! event stamped at or before the frame time is delivered, so moves that
//! land within one frame coalesce the same way they do in a browser.

use anyhow::{Context, Result};
use reveal_core::{
    ApertureGeometry, HeadlessPage, HeadlessSurface, RenderCommand, RevealConfig, RevealEngine,
};
use serde::Serialize;
use std::fmt::Write as _;

use crate::trace::PointerTrace;

/// Longest replay accepted, in frames
pub const MAX_FRAMES: u64 = 1_000_000;

/// How frame reports are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Engine state after one replayed frame
#[derive(Clone, Debug, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    pub time_ms: f32,
    pub speed: f32,
    pub direction: f32,
    pub trail: usize,
    pub aperture: Option<ApertureGeometry>,
    pub command: RenderCommand,
}

/// Run `trace` through a fresh engine at `fps` frames per second
pub fn replay(trace: &PointerTrace, config: RevealConfig, fps: u32) -> Result<Vec<FrameReport>> {
    if fps == 0 {
        anyhow::bail!("frame rate must be at least 1");
    }
    let frame_ms = 1000.0 / fps as f32;
    let span = (trace.duration_ms() / frame_ms).ceil();
    if !(span < MAX_FRAMES as f32) {
        anyhow::bail!(
            "trace of {}ms at {} fps needs more than {} frames",
            trace.duration_ms(),
            fps,
            MAX_FRAMES
        );
    }
    let frames = (span as u64)
        .checked_add(1)
        .filter(|&frames| frames <= MAX_FRAMES)
        .context("frame count out of range")?;

    let mut page = trace
        .elements
        .iter()
        .fold(HeadlessPage::new(), |page, e| page.with_element(e.id, e.rect));
    let surface = HeadlessSurface::new();
    let mut engine = RevealEngine::new(config, trace.viewport).with_surface(surface.clone());
    engine.register_magnetic(trace.elements.iter().map(|e| e.id));

    tracing::info!(
        frames,
        events = trace.events.len(),
        elements = trace.elements.len(),
        strategy = %engine.config().emitter_strategy,
        "replaying trace"
    );

    let mut pending = trace.events.iter().peekable();
    let mut reports = Vec::with_capacity(frames as usize);
    for frame in 0..frames {
        let time_ms = frame as f32 * frame_ms;
        while let Some(timed) = pending.next_if(|e| e.time_ms <= time_ms) {
            engine.handle_event(&timed.event.to_event(), &mut page);
        }

        let command = engine.tick(frame_ms, &mut page);
        let velocity = engine.velocity();
        reports.push(FrameReport {
            frame,
            time_ms,
            speed: velocity.smoothed_speed,
            direction: velocity.direction,
            trail: engine.trail().len(),
            aperture: engine.aperture().copied(),
            command,
        });
    }

    tracing::debug!(applied = surface.len(), "replay finished");
    engine.dispose(&mut page);
    Ok(reports)
}

/// Render reports in the requested format
pub fn render(reports: &[FrameReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(reports)?),
        OutputFormat::Text => {
            let mut out = String::new();
            for report in reports {
                writeln!(
                    out,
                    "frame {:>4} t={:>8.2}ms speed={:>7.2} dir={:>7.2} trail={:>3} holes={:>3} | {}",
                    report.frame,
                    report.time_ms,
                    report.speed,
                    report.direction,
                    report.trail,
                    report.command.exclusion_count(),
                    report.command
                )?;
            }
            Ok(out)
        }
    }
}
