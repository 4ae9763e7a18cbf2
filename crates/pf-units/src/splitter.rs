//! Splitter unit.

use crate::error::{UnitError, UnitResult};
use crate::unit::{FlowUnit, StreamPool};
use pf_core::StreamId;
use pf_stream::SpeciesSet;

/// Split specification: the fraction of feed routed to the 0th outlet.
#[derive(Debug, Clone, PartialEq)]
pub enum Split {
    /// One fraction applied uniformly across all species.
    Fraction(f64),
    /// Per-species fractions, ordered like the species set.
    Componentwise(Vec<f64>),
}

impl Split {
    /// Uniform split, validated to [0, 1].
    pub fn uniform(fraction: f64) -> UnitResult<Self> {
        check_fraction(fraction)?;
        Ok(Split::Fraction(fraction))
    }

    /// Componentwise split, each entry validated to [0, 1].
    pub fn componentwise(fractions: Vec<f64>) -> UnitResult<Self> {
        for &f in &fractions {
            check_fraction(f)?;
        }
        Ok(Split::Componentwise(fractions))
    }

    /// Componentwise split from ID-fraction pairs, resolved against the
    /// species set; unnamed species split to the remainder outlet.
    pub fn by_name(species: &SpeciesSet, pairs: &[(&str, f64)]) -> UnitResult<Self> {
        let mut fractions = vec![0.0; species.len()];
        for (id, fraction) in pairs {
            check_fraction(*fraction)?;
            let idx = species.index_of(id).map_err(UnitError::Stream)?;
            fractions[idx] = *fraction;
        }
        Ok(Split::Componentwise(fractions))
    }

    fn fraction_for(&self, index: usize) -> f64 {
        match self {
            Split::Fraction(f) => *f,
            Split::Componentwise(v) => v[index],
        }
    }

    fn check_len(&self, expected: usize) -> UnitResult<()> {
        match self {
            Split::Fraction(_) => Ok(()),
            Split::Componentwise(v) if v.len() == expected => Ok(()),
            Split::Componentwise(_) => Err(UnitError::InvalidArg {
                what: "componentwise split length does not match the species set",
            }),
        }
    }
}

fn check_fraction(f: f64) -> UnitResult<()> {
    if !f.is_finite() || !(0.0..=1.0).contains(&f) {
        return Err(UnitError::InvalidArg {
            what: "split fraction must lie in [0, 1]",
        });
    }
    Ok(())
}

/// Separates one feed into a split stream and a remainder stream.
///
/// T/P/phase copy unchanged from the feed to both outlets; splitting is a
/// pure flow routing with no energy or phase change. Conservation is exact:
/// the remainder is computed by subtraction, never by the complement
/// fraction.
#[derive(Debug)]
pub struct Splitter {
    name: String,
    ins: [StreamId; 1],
    outs: [StreamId; 2],
    split: Split,
}

impl Splitter {
    pub fn new(
        name: impl Into<String>,
        input: StreamId,
        top: StreamId,
        bot: StreamId,
        split: Split,
    ) -> Self {
        Self {
            name: name.into(),
            ins: [input],
            outs: [top, bot],
            split,
        }
    }

    pub fn split(&self) -> &Split {
        &self.split
    }
}

impl FlowUnit for Splitter {
    fn name(&self) -> &str {
        &self.name
    }

    fn ins(&self) -> &[StreamId] {
        &self.ins
    }

    fn outs(&self) -> &[StreamId] {
        &self.outs
    }

    fn run(&mut self, streams: &mut StreamPool) -> UnitResult<()> {
        let feed = streams.get(self.ins[0])?.clone();
        self.split.check_len(feed.mol().len())?;

        let top_mol: Vec<f64> = feed
            .mol()
            .iter()
            .enumerate()
            .map(|(i, &m)| m * self.split.fraction_for(i))
            .collect();

        let top = streams.get_mut(self.outs[0])?;
        top.copy_like(&feed)?;
        top.set_mol(&top_mol)?;

        let bot = streams.get_mut(self.outs[1])?;
        bot.copy_like(&feed)?;
        for (b, &t) in bot.mol_mut().iter_mut().zip(&top_mol) {
            *b -= t;
        }
        Ok(())
    }
}
