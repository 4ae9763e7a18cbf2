//! Ordered registry of property models shared by streams.

use crate::error::{StreamError, StreamResult};
use pf_thermo::CompoundModel;
use std::sync::Arc;

/// Immutable, ordered collection of species backing a family of streams.
///
/// Streams hold an `Arc<SpeciesSet>`; the position of a species in the set
/// is the position of its molar flow in every stream's `mol` vector.
#[derive(Debug, Clone)]
pub struct SpeciesSet {
    compounds: Vec<Arc<CompoundModel>>,
}

impl SpeciesSet {
    /// Build from shared models. Rejects an empty set and duplicate IDs.
    pub fn new(compounds: Vec<Arc<CompoundModel>>) -> StreamResult<Self> {
        if compounds.is_empty() {
            return Err(StreamError::InvalidArg {
                what: "species set must not be empty",
            });
        }
        for (i, a) in compounds.iter().enumerate() {
            for b in &compounds[i + 1..] {
                if a.id() == b.id() {
                    return Err(StreamError::InvalidArg {
                        what: "species set contains duplicate IDs",
                    });
                }
            }
        }
        Ok(Self { compounds })
    }

    /// Build from owned models, wrapping each in an `Arc`.
    pub fn from_models(models: impl IntoIterator<Item = CompoundModel>) -> StreamResult<Self> {
        Self::new(models.into_iter().map(Arc::new).collect())
    }

    pub fn len(&self) -> usize {
        self.compounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compounds.is_empty()
    }

    /// Position of a species by ID.
    pub fn index_of(&self, id: &str) -> StreamResult<usize> {
        self.compounds
            .iter()
            .position(|c| c.id() == id)
            .ok_or_else(|| StreamError::UnknownSpecies { id: id.to_string() })
    }

    pub fn get(&self, index: usize) -> Option<&Arc<CompoundModel>> {
        self.compounds.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<CompoundModel>> {
        self.compounds.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.compounds.iter().map(|c| c.id())
    }
}
