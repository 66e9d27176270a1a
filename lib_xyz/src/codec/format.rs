pub const MAGIC_HEADER: [u8; 4] = *b"XYZ1";

/// Number of entries in an XYZ palette, always, regardless of how many
/// distinct colors the image actually uses.
pub const PALETTE_LEN: usize = 256;
/// Size of the serialized palette: 256 RGB triples.
pub const PALETTE_BYTES: usize = PALETTE_LEN * 3;

/// A decoded XYZ container: a 256-entry RGB palette plus one palette
/// index per pixel, row-major.
#[derive(Debug)]
pub struct XyzImage {
    pub width: u16,
    pub height: u16,
    pub palette: Vec<[u8; 3]>,
    pub indices: Vec<u8>,
}

impl XyzImage {
    pub const MAGIC_SIZE: usize = 4;
    pub const WIDTH_HEIGHT_SIZE: usize = std::mem::size_of::<u16>();
    /// Magic plus the two uncompressed dimension fields.
    pub const HEADER_SIZE: usize = Self::MAGIC_SIZE + 2 * Self::WIDTH_HEIGHT_SIZE;

    pub fn new(width: u16, height: u16, palette: Vec<[u8; 3]>, indices: Vec<u8>) -> Self {
        Self {
            width,
            height,
            palette,
            indices,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Expands the index plane into RGBA bytes. The on-disk format carries
    /// no alpha, so every pixel comes back fully opaque.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.pixel_count() * 4);
        for &index in &self.indices {
            let [r, g, b] = self.palette[index as usize];
            rgba.extend_from_slice(&[r, g, b, 255]);
        }
        rgba
    }
}
