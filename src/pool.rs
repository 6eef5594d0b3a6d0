//! Identity pool: uniquely-keyed synthetic identities.
//!
//! The pool owns the uniqueness bookkeeping (id, name pair, phone, wallet)
//! and keeps it across calls, so a later `generate` never collides with an
//! earlier population — that is what lets the pipeline draw returning
//! donors from the prospect pool and top the rest up with fresh people.
//!
//! Candidate values come from rejection sampling over the bounded
//! vocabularies. Every field has a fixed attempt bound; hitting it means
//! the vocabulary cannot supply the requested count and the run aborts
//! with [`GenerationError::Exhausted`] instead of spinning.

use std::collections::HashSet;

use rand::Rng;

use crate::error::GenerationError;
use crate::model::Identity;
use crate::vocab;

/// Attempts per field before declaring the candidate space exhausted.
pub const MAX_FIELD_ATTEMPTS: u32 = 1000;

const ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const HEX_CHARSET: &[u8] = b"0123456789abcdef";

/// Vocabulary the pool draws from. Swappable so tests can shrink the
/// candidate space; defaults to the full tables in [`crate::vocab`].
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub first_names: Vec<&'static str>,
    pub last_names: Vec<&'static str>,
    pub cities: Vec<(&'static str, &'static str, &'static str)>,
    pub employers: Vec<&'static str>,
    pub occupations: Vec<&'static str>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary {
            first_names: vocab::FIRST_NAMES.to_vec(),
            last_names: vocab::LAST_NAMES.to_vec(),
            cities: vocab::CITIES.to_vec(),
            employers: vocab::EMPLOYERS.to_vec(),
            occupations: vocab::OCCUPATIONS.to_vec(),
        }
    }
}

/// Generator for unique synthetic identities.
pub struct IdentityPool {
    vocabulary: Vocabulary,
    used_ids: HashSet<String>,
    used_names: HashSet<(String, String)>,
    used_phones: HashSet<String>,
    used_wallets: HashSet<String>,
}

impl Default for IdentityPool {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityPool {
    pub fn new() -> Self {
        Self::with_vocabulary(Vocabulary::default())
    }

    pub fn with_vocabulary(vocabulary: Vocabulary) -> Self {
        IdentityPool {
            vocabulary,
            used_ids: HashSet::new(),
            used_names: HashSet::new(),
            used_phones: HashSet::new(),
            used_wallets: HashSet::new(),
        }
    }

    /// Number of identities generated so far across all calls.
    pub fn generated_count(&self) -> usize {
        self.used_ids.len()
    }

    /// Generate exactly `count` identities, all unique against every
    /// identity this pool has ever produced.
    pub fn generate<R: Rng>(
        &mut self,
        rng: &mut R,
        count: usize,
    ) -> Result<Vec<Identity>, GenerationError> {
        let mut out = Vec::with_capacity(count);
        while out.len() < count {
            let identity = self.next_identity(rng, out.len(), count)?;
            out.push(identity);
        }
        Ok(out)
    }

    fn next_identity<R: Rng>(
        &mut self,
        rng: &mut R,
        generated: usize,
        requested: usize,
    ) -> Result<Identity, GenerationError> {
        let exhausted = |field: &'static str| GenerationError::Exhausted {
            field,
            attempts: MAX_FIELD_ATTEMPTS,
            generated,
            requested,
        };

        let unique_id = Self::draw_unique(rng, &self.used_ids, random_id)
            .ok_or_else(|| exhausted("unique_id"))?;
        self.used_ids.insert(unique_id.clone());

        let name = Self::draw_unique(rng, &self.used_names, |rng| {
            let first = *pick(rng, &self.vocabulary.first_names);
            let last = *pick(rng, &self.vocabulary.last_names);
            (first.to_string(), last.to_string())
        })
        .ok_or_else(|| exhausted("name"))?;
        self.used_names.insert(name.clone());

        let phone_number = Self::draw_unique(rng, &self.used_phones, |rng| {
            format!("555-{}", rng.gen_range(1000..=9999))
        })
        .ok_or_else(|| exhausted("phone_number"))?;
        self.used_phones.insert(phone_number.clone());

        let wallet_address = Self::draw_unique(rng, &self.used_wallets, random_wallet)
            .ok_or_else(|| exhausted("wallet_address"))?;
        self.used_wallets.insert(wallet_address.clone());

        let address_line_1 = format!(
            "{} {} {}",
            rng.gen_range(100..=999),
            pick(rng, vocab::STREET_NAMES),
            pick(rng, vocab::STREET_TYPES),
        );
        // Roughly a third of identities carry a unit designator.
        let address_line_2 = if rng.gen_bool(0.3) {
            format!(
                "{} {}{}",
                pick(rng, vocab::UNIT_TYPES),
                rng.gen_range(1..=20),
                pick(rng, vocab::UNIT_SUFFIXES),
            )
        } else {
            String::new()
        };
        let (city, state, zip) = *pick(rng, &self.vocabulary.cities);

        Ok(Identity {
            unique_id,
            first_name: name.0,
            last_name: name.1,
            phone_number,
            employer: pick(rng, &self.vocabulary.employers).to_string(),
            occupation: pick(rng, &self.vocabulary.occupations).to_string(),
            address_line_1,
            address_line_2,
            city: city.to_string(),
            state: state.to_string(),
            zip: zip.to_string(),
            wallet_address,
        })
    }

    /// Rejection-sample a candidate not yet in `used`, bounded by
    /// [`MAX_FIELD_ATTEMPTS`].
    fn draw_unique<R, T, F>(rng: &mut R, used: &HashSet<T>, mut candidate: F) -> Option<T>
    where
        R: Rng,
        T: std::hash::Hash + Eq,
        F: FnMut(&mut R) -> T,
    {
        for _ in 0..MAX_FIELD_ATTEMPTS {
            let value = candidate(rng);
            if !used.contains(&value) {
                return Some(value);
            }
        }
        None
    }
}

fn pick<'a, R: Rng, T>(rng: &mut R, items: &'a [T]) -> &'a T {
    &items[rng.gen_range(0..items.len())]
}

fn random_id<R: Rng>(rng: &mut R) -> String {
    (0..8)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect()
}

fn random_wallet<R: Rng>(rng: &mut R) -> String {
    let hex: String = (0..40)
        .map(|_| HEX_CHARSET[rng.gen_range(0..HEX_CHARSET.len())] as char)
        .collect();
    format!("0x{hex}")
}
