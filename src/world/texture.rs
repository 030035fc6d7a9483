// Repository of wall textures addressed by `TextureId`.
// Scene cells and the renderer only ever hold ids; pixels stay here.

use std::collections::HashMap;

use tracing::debug;

use crate::renderer::Rgba;

/// Runtime handle for a texture in this bank.
///
/// Stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// CPU-side storage: 32-bit **ARGB** (0xAARRGGBB) in row-major order.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    pub w: usize,
    pub h: usize,
    pub pixels: Vec<Rgba>,
}

impl Texture {
    /// Texture of `w`×`h` filled by `f(x, y)`.
    pub fn from_fn(w: usize, h: usize, mut f: impl FnMut(usize, usize) -> Rgba) -> Self {
        let mut pixels = Vec::with_capacity(w * h);
        for y in 0..h {
            for x in 0..w {
                pixels.push(f(x, y));
            }
        }
        Self { w, h, pixels }
    }

    /// Texel column for a horizontal coordinate `u` in `[0, 1]`.
    ///
    /// `u == 1.0` (a hit exactly on the far edge of a cell) maps to the
    /// last column instead of running off the image.
    #[inline]
    pub fn column(&self, u: f64) -> usize {
        let col = (u * self.w as f64).floor();
        (col.max(0.0) as usize).min(self.w.saturating_sub(1))
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgba {
        self.pixels[y * self.w + x]
    }

    /// 16×16 brick pattern: red-brown courses with grey mortar.
    pub fn bricks() -> Self {
        const BRICK: Rgba = 0xFF_8E_3B_2E;
        const MORTAR: Rgba = 0xFF_9A_9A_9A;
        Self::from_fn(16, 16, |x, y| {
            let course = y / 4;
            let offset = if course % 2 == 0 { 0 } else { 4 };
            if y % 4 == 3 || (x + offset) % 8 == 7 {
                MORTAR
            } else {
                BRICK
            }
        })
    }
}

/// Convenience checkerboard 8×8 (dark/light grey).
impl Default for Texture {
    fn default() -> Self {
        const LIGHT: Rgba = 0xFF_C0_C0_C0;
        const DARK: Rgba = 0xFF_40_40_40;
        Self::from_fn(8, 8, |x, y| if (x ^ y) & 1 == 0 { LIGHT } else { DARK })
    }
}

/// Things that can go wrong when using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),
}

/// A format-agnostic cache of wall textures.
///
/// * Stores exactly one copy of every name.
/// * ID **0** is always the "missing" checkerboard.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl TextureBank {
    /// Create a bank holding only the mandatory *missing* texture, under the
    /// fixed name `"MISSING"` with handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    /// Checker fallback plus the procedural textures scenes can name:
    /// `checker` and `bricks`.
    pub fn with_builtin() -> Self {
        let mut bank = Self::default_with_checker();
        for (name, tex) in [("checker", Texture::default()), ("bricks", Texture::bricks())] {
            // names are distinct, so insertion cannot collide
            let _ = bank.insert(name, tex);
        }
        bank
    }

    /// Number of textures stored (including the "missing" one).
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Id for a loaded texture by name, `None` if the name is unknown.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    /// Fallback-safe query: unknown names resolve to the checkerboard id.
    pub fn id_or_missing(&self, name: &str) -> TextureId {
        self.id(name).unwrap_or(NO_TEXTURE)
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Like [`texture`](Self::texture) but unknown ids fall back to the
    /// checkerboard, so a stale id never blanks a wall.
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data.get(id as usize).unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        let id = self.data.len() as TextureId;
        debug!(%name, id, w = tex.w, h = tex.h, "texture registered");
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
