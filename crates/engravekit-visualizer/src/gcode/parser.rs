//! Engraving program parser
//!
//! Turns program text back into layered geometry. The pass is a small state
//! machine over lines: at most one layer is open at a time, `M3 S` opens one,
//! `M5` closes it, `G1` draws into it and `G0` only moves the tool.
//!
//! Parsing is total. Unrecognised or malformed lines leave the state
//! untouched and the result is always a (possibly empty) layer list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::command::{classify_line, Instruction, Target};
use super::layer::{Layer, Point};

/// Counters gathered during a parse
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProgramStats {
    /// Lines in the input, including blank ones
    pub lines: usize,
    /// `G0` moves with usable coordinates
    pub rapid_moves: usize,
    /// `G1` moves that added a point
    pub drawing_moves: usize,
    /// `G1` moves seen while no layer was open
    pub ignored_drawing_moves: usize,
    /// `G0`/`G1` lines with missing or unreadable coordinates
    pub malformed_motions: usize,
    /// `M3 S` instructions seen
    pub layers_opened: usize,
    /// Layers discarded because they never received a point
    pub empty_layers_dropped: usize,
    /// Tool position after the last usable move
    pub final_position: Option<(f64, f64)>,
}

/// Parser output: the layers plus what was seen on the way
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedProgram {
    pub layers: Vec<Layer>,
    pub stats: ProgramStats,
}

/// Accumulator threaded through the parse loop
#[derive(Debug)]
struct ParseState {
    line_height: f64,
    open: Option<Layer>,
    layers_started: u32,
    position: Option<Target>,
    layers: Vec<Layer>,
    stats: ProgramStats,
}

impl ParseState {
    fn new(line_height: f64) -> Self {
        Self {
            line_height,
            open: None,
            layers_started: 0,
            position: None,
            layers: Vec::new(),
            stats: ProgramStats::default(),
        }
    }

    fn apply(&mut self, instruction: Instruction) {
        match instruction {
            Instruction::LaserOn { power } => {
                self.close_layer();
                self.open = Some(Layer::new(self.layers_started, power));
                self.layers_started = self.layers_started.saturating_add(1);
                self.stats.layers_opened += 1;
            }
            Instruction::Rapid(Some(target)) => {
                self.position = Some(target);
                self.stats.rapid_moves += 1;
            }
            Instruction::Linear(Some(target)) => {
                self.position = Some(target);
                match self.open.as_mut() {
                    Some(layer) => {
                        let z = layer.z(self.line_height);
                        layer.points.push(Point::new(target.x, target.y, z));
                        self.stats.drawing_moves += 1;
                    }
                    None => self.stats.ignored_drawing_moves += 1,
                }
            }
            Instruction::Rapid(None) | Instruction::Linear(None) => {
                self.stats.malformed_motions += 1;
            }
            Instruction::LaserOff => self.close_layer(),
            Instruction::Other => {}
        }
    }

    /// Finalize the open layer, keeping it only if it drew something
    fn close_layer(&mut self) {
        if let Some(layer) = self.open.take() {
            if layer.is_empty() {
                self.stats.empty_layers_dropped += 1;
            } else {
                self.layers.push(layer);
            }
        }
    }

    fn finish(mut self) -> ParsedProgram {
        self.close_layer();
        self.stats.final_position = self.position.map(|t| (t.x, t.y));
        ParsedProgram {
            layers: self.layers,
            stats: self.stats,
        }
    }
}

/// Parse a program into layers, with statistics
pub fn parse_program(text: &str, line_height: f64) -> ParsedProgram {
    let mut state = ParseState::new(line_height);

    for line in text.lines() {
        state.stats.lines += 1;
        state.apply(classify_line(line));
    }

    let program = state.finish();
    debug!(
        "Parse complete: lines={}, layers={}, G0={}, G1={}, ignored G1={}, malformed={}",
        program.stats.lines,
        program.layers.len(),
        program.stats.rapid_moves,
        program.stats.drawing_moves,
        program.stats.ignored_drawing_moves,
        program.stats.malformed_motions
    );
    program
}

/// Parse a program into layers.
///
/// Every point's `z` is `layer.index * line_height`. Layers that never
/// received a point are omitted, so `layer.index` can skip values.
pub fn parse(text: &str, line_height: f64) -> Vec<Layer> {
    parse_program(text, line_height).layers
}
