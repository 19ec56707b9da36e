//! Rendering interface
//!
//! The simulation hands the renderer one [`Frame`] per tick, after that tick's
//! events have been drained. Drawing itself happens outside this crate; two
//! renderers ship here:
//! - [`HeadlessRenderer`]: draws nothing, never asks to stop
//! - [`RecordingRenderer`]: keeps a summary of every frame it receives

use crate::models::drawable::{Drawable, Position, Sprite};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Renderer's answer after drawing a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderControl {
    /// Keep simulating
    #[default]
    Continue,
    /// The user asked to stop (e.g. closed the window)
    Stop,
}

/// Everything visible at one simulated instant
pub struct Frame<'a> {
    time: NaiveDateTime,
    drawables: Vec<&'a dyn Drawable>,
}

impl<'a> Frame<'a> {
    pub fn new(time: NaiveDateTime, drawables: Vec<&'a dyn Drawable>) -> Self {
        Self { time, drawables }
    }

    pub fn time(&self) -> NaiveDateTime {
        self.time
    }

    /// Stations first, then rides in flight
    pub fn drawables(&self) -> &[&'a dyn Drawable] {
        &self.drawables
    }

    /// Sprite and position of every drawable at this frame's time
    pub fn placements(&self) -> Vec<(Sprite, Position)> {
        self.drawables
            .iter()
            .map(|d| (d.sprite(), d.position_at(self.time)))
            .collect()
    }

    pub fn count(&self, sprite: Sprite) -> usize {
        self.drawables.iter().filter(|d| d.sprite() == sprite).count()
    }
}

/// Draws simulation frames
pub trait Renderer {
    /// Draw `frame`. The returned control is advisory.
    fn render(&mut self, frame: &Frame<'_>) -> RenderControl;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn render(&mut self, frame: &Frame<'_>) -> RenderControl {
        (**self).render(frame)
    }
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn render(&mut self, frame: &Frame<'_>) -> RenderControl {
        (**self).render(frame)
    }
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessRenderer;

impl Renderer for HeadlessRenderer {
    fn render(&mut self, _frame: &Frame<'_>) -> RenderControl {
        RenderControl::Continue
    }
}

/// Summary of one rendered frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameRecord {
    pub time: NaiveDateTime,
    pub stations: usize,
    pub rides: usize,
    pub placements: Vec<(Sprite, Position)>,
}

/// Renderer that records every frame it is given
///
/// Optionally asks the simulation to stop after a fixed number of frames,
/// the way a user closing the window would.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Vec<FrameRecord>,
    stop_after: Option<usize>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a stop once `frames` frames have been drawn
    pub fn stop_after(frames: usize) -> Self {
        Self {
            frames: Vec::new(),
            stop_after: Some(frames),
        }
    }

    pub fn frames(&self) -> &[FrameRecord] {
        &self.frames
    }

    pub fn into_frames(self) -> Vec<FrameRecord> {
        self.frames
    }
}

impl Renderer for RecordingRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> RenderControl {
        self.frames.push(FrameRecord {
            time: frame.time(),
            stations: frame.count(Sprite::Station),
            rides: frame.count(Sprite::Ride),
            placements: frame.placements(),
        });

        match self.stop_after {
            Some(limit) if self.frames.len() >= limit => RenderControl::Stop,
            _ => RenderControl::Continue,
        }
    }
}
