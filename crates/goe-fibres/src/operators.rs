// ─────────────────────────────────────────────────────────────────────
// Geometrodynamics of Entropy — Ladder Operator Algebra
// ─────────────────────────────────────────────────────────────────────
//! Symbolic creation/annihilation operators with the canonical
//! commutator [a_k, a†_k] = 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::quantizer::ModeIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LadderKind {
    Creation,
    Annihilation,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LadderOperator {
    pub kind: LadderKind,
    pub mode: ModeIndex,
    pub norm: f64,
}

impl LadderOperator {
    pub fn is_creation(&self) -> bool {
        self.kind == LadderKind::Creation
    }
}

/// Registry of the ladder operators handed out so far.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OperatorAlgebra {
    n_modes: usize,
    operators: BTreeMap<(LadderKind, ModeIndex), LadderOperator>,
}

impl OperatorAlgebra {
    pub fn new(n_modes: usize) -> Self {
        Self {
            n_modes,
            operators: BTreeMap::new(),
        }
    }

    pub fn n_modes(&self) -> usize {
        self.n_modes
    }

    pub fn creation(&mut self, mode: ModeIndex) -> LadderOperator {
        self.register(LadderKind::Creation, mode)
    }

    pub fn annihilation(&mut self, mode: ModeIndex) -> LadderOperator {
        self.register(LadderKind::Annihilation, mode)
    }

    fn register(&mut self, kind: LadderKind, mode: ModeIndex) -> LadderOperator {
        *self
            .operators
            .entry((kind, mode))
            .or_insert(LadderOperator {
                kind,
                mode,
                norm: 1.0,
            })
    }

    pub fn get(&self, kind: LadderKind, mode: ModeIndex) -> Option<&LadderOperator> {
        self.operators.get(&(kind, mode))
    }

    pub fn len(&self) -> usize {
        self.operators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operators.is_empty()
    }

    /// [a, b] for canonical bosonic operators: +1 for [a_k, a†_k],
    /// −1 for [a†_k, a_k], 0 otherwise.
    pub fn commutator(&self, a: &LadderOperator, b: &LadderOperator) -> f64 {
        if a.mode != b.mode {
            return 0.0;
        }
        match (a.kind, b.kind) {
            (LadderKind::Annihilation, LadderKind::Creation) => 1.0,
            (LadderKind::Creation, LadderKind::Annihilation) => -1.0,
            _ => 0.0,
        }
    }
}
