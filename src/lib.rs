//! Grid raycaster.
//!
//! A first-person view of a 2-D tile scene, built by casting one ray per
//! screen column and walking it across grid lines until it enters an
//! occupied cell.
//!
//! * [`world`]    – vectors, scene grid, player, textures
//! * [`raycast`]  – grid-line stepper and caster
//! * [`renderer`] – render-target trait, wall strips, minimap, software back-end
//! * [`sim`]      – input flags, movement integrator, frame clock
//! * [`session`]  – one running game: scene + player + input, ticked per frame

pub mod defs;
pub mod raycast;
pub mod renderer;
pub mod session;
pub mod sim;
pub mod world;
