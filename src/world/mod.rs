mod color;
mod player;
mod scene;
mod texture;
mod vector;

pub use color::Color;
pub use player::Player;
pub use scene::{Cell, DEFAULT_SCENE, Scene, SceneError};
pub use texture::{NO_TEXTURE, Texture, TextureBank, TextureError, TextureId};
pub use vector::{GridVecExt, Vector2};
