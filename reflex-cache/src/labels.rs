//! Process-wide label interner.
//!
//! Screen text repeats every frame, so the renderer keys its rasterized text
//! by a small integer instead of hashing strings.
//!
//! Name fields and result lines produce new strings all day, so the table is
//! cleared whenever the text cache that keys on it is. Ids carry the
//! generation they were issued in and never match an id from another one.

use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
pub use string_cache::DefaultAtom as Atom;

#[derive(Default)]
struct Labels {
    generation: u32,
    atoms: Vec<Atom>,
    index: HashMap<Atom, usize>,
}

impl Labels {
    fn id(&self, index: usize) -> LabelId {
        LabelId {
            generation: self.generation,
            index,
        }
    }
}

lazy_static! {
    static ref LABELS: RwLock<Labels> = RwLock::new(Labels::default());
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelId {
    generation: u32,
    index: usize,
}

/// Intern `text`, returning the same id for equal strings until the next
/// [`clear_labels`].
pub fn intern_label(text: &str) -> LabelId {
    let atom = Atom::from(text);
    {
        let labels = LABELS.read().unwrap_or_else(PoisonError::into_inner);
        if let Some(&idx) = labels.index.get(&atom) {
            return labels.id(idx);
        }
    }
    let mut labels = LABELS.write().unwrap_or_else(PoisonError::into_inner);
    // another thread may have won the race between the two locks
    if let Some(&idx) = labels.index.get(&atom) {
        return labels.id(idx);
    }
    let idx = labels.atoms.len();
    labels.atoms.push(atom.clone());
    labels.index.insert(atom, idx);
    labels.id(idx)
}

/// Forget every label. Ids handed out before this call stop resolving.
pub fn clear_labels() {
    let mut labels = LABELS.write().unwrap_or_else(PoisonError::into_inner);
    labels.generation = labels.generation.wrapping_add(1);
    labels.atoms.clear();
    labels.index.clear();
}

pub fn label_count() -> usize {
    LABELS.read().unwrap_or_else(PoisonError::into_inner).atoms.len()
}

pub fn label(id: LabelId) -> Option<Atom> {
    let labels = LABELS.read().unwrap_or_else(PoisonError::into_inner);
    if id.generation != labels.generation {
        return None;
    }
    labels.atoms.get(id.index).cloned()
}
