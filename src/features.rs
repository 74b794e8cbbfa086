//! Encoding of validated observations into the fixed feature vector the
//! trained model expects. Column order is part of the on-disk model's
//! contract and must never change without retraining.

use crate::models::PlanetObservation;

pub const FEATURE_DIM: usize = 15;

/// The registered feature schema, in model input order: six raw
/// numerics, then one-hot spectral class, then one-hot planet class.
pub const FEATURE_SCHEMA: [&str; FEATURE_DIM] = [
    "pl_orbper",
    "pl_orbsmax",
    "pl_bmasse",
    "st_met",
    "st_logg",
    "disc_year",
    "st_type_F",
    "st_type_G",
    "st_type_K",
    "st_type_M",
    "st_type_Other",
    "pl_type_rocky",
    "pl_type_super_earth",
    "pl_type_neptune",
    "pl_type_jupiter",
];

const ST_TYPE_OFFSET: usize = 6;
const PL_TYPE_OFFSET: usize = 11;

/// Deterministically encode an observation. Numeric fields pass through
/// unchanged; the training pipeline applied no normalization.
pub fn encode(obs: &PlanetObservation) -> [f32; FEATURE_DIM] {
    let mut v = [0.0_f32; FEATURE_DIM];
    v[0] = obs.pl_orbper as f32;
    v[1] = obs.pl_orbsmax as f32;
    v[2] = obs.pl_bmasse as f32;
    v[3] = obs.st_met as f32;
    v[4] = obs.st_logg as f32;
    v[5] = obs.disc_year as f32;
    v[ST_TYPE_OFFSET + obs.st_type.one_hot_index()] = 1.0;
    v[PL_TYPE_OFFSET + obs.pl_type.one_hot_index()] = 1.0;
    v
}
