//! Peephole optimization passes
//!
//! Works on a single method body. Implements label-aware dead code
//! elimination, redundant jump removal, unused label removal and a few
//! stack-neutral peephole rewrites.

use crate::chunk::MethodChunk;
use crate::label::Label;
use crate::opcode::Opcode;
use std::collections::HashSet;

/// Bytecode optimizer that applies passes until a fixed point
pub struct Optimizer {
    /// Maximum number of optimization passes to run
    max_passes: usize,
}

impl Optimizer {
    /// Create a new optimizer with default settings
    pub fn new() -> Self {
        Self { max_passes: 10 }
    }

    /// Set maximum number of optimization passes
    pub fn with_max_passes(mut self, max: usize) -> Self {
        self.max_passes = max;
        self
    }

    /// Run all optimization passes on the method
    pub fn optimize(&mut self, chunk: &mut MethodChunk) {
        for pass in 0..self.max_passes {
            let changed = self.run_single_pass(chunk);
            if !changed {
                log::trace!("{}: optimizer settled after {} passes", chunk.name, pass + 1);
                break;
            }
        }
    }

    /// Run a single optimization pass, returns true if any changes were made
    fn run_single_pass(&self, chunk: &mut MethodChunk) -> bool {
        let mut changed = false;

        if self.eliminate_dead_code(chunk) {
            changed = true;
        }

        if self.remove_redundant_jumps(chunk) {
            changed = true;
        }

        if self.remove_unused_labels(chunk) {
            changed = true;
        }

        if self.peephole_optimize(chunk) {
            changed = true;
        }

        changed
    }

    /// Remove instructions between an unconditional terminator and the next label
    fn eliminate_dead_code(&self, chunk: &mut MethodChunk) -> bool {
        let before = chunk.instructions.len();
        let mut dead = false;

        chunk.instructions.retain(|inst| {
            if inst.opcode.is_label() {
                dead = false;
                return true;
            }
            if dead {
                return false;
            }
            if inst.opcode.is_unconditional_terminator() {
                dead = true;
            }
            true
        });

        chunk.instructions.len() < before
    }

    /// Remove `goto L` when `L:` is the very next instruction
    fn remove_redundant_jumps(&self, chunk: &mut MethodChunk) -> bool {
        let mut changed = false;
        let mut i = 0;

        while i + 1 < chunk.instructions.len() {
            let redundant = match (
                &chunk.instructions[i].opcode,
                &chunk.instructions[i + 1].opcode,
            ) {
                (Opcode::Goto(target), Opcode::Label(here)) => target == here,
                _ => false,
            };

            if redundant {
                chunk.instructions.remove(i);
                changed = true;
            } else {
                i += 1;
            }
        }

        changed
    }

    /// Remove labels no branch refers to
    fn remove_unused_labels(&self, chunk: &mut MethodChunk) -> bool {
        let targets: HashSet<Label> = chunk
            .instructions
            .iter()
            .filter_map(|inst| inst.opcode.branch_target().cloned())
            .collect();

        let before = chunk.instructions.len();
        chunk.instructions.retain(|inst| match &inst.opcode {
            Opcode::Label(label) => targets.contains(label),
            _ => true,
        });

        chunk.instructions.len() < before
    }

    /// Apply stack-neutral peephole rewrites
    fn peephole_optimize(&self, chunk: &mut MethodChunk) -> bool {
        if chunk.instructions.len() < 2 {
            return false;
        }

        let mut new_instructions = Vec::with_capacity(chunk.instructions.len());
        let mut changed = false;
        let mut i = 0;

        while i < chunk.instructions.len() {
            if i + 1 < chunk.instructions.len() {
                let pair = (
                    &chunk.instructions[i].opcode,
                    &chunk.instructions[i + 1].opcode,
                );
                let cancels = matches!(pair, (Opcode::Dup, Opcode::Pop))
                    || matches!(pair, (Opcode::ALoad(_), Opcode::Pop))
                    || matches!(pair, (Opcode::DLoad(_), Opcode::Pop2));
                if cancels {
                    i += 2;
                    changed = true;
                    continue;
                }
            }

            new_instructions.push(chunk.instructions[i].clone());
            i += 1;
        }

        chunk.instructions = new_instructions;
        changed
    }
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new()
    }
}
