//! Rating models
//!
//! The replay only talks to the [`RatingModel`] trait; [`TrueSkillModel`]
//! is the two-team TrueSkill update from the skillratings crate.

pub mod model;
pub mod trueskill;

pub use model::{RatingMap, RatingModel};
pub use trueskill::TrueSkillModel;
