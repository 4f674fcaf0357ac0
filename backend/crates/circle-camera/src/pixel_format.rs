/// Frame encoding requested from a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FourCc {
    Mjpeg,
}

impl FourCc {
    pub const fn code(&self) -> [u8; 4] {
        match self {
            FourCc::Mjpeg => *b"MJPG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelFormat {
    pub width: u32,
    pub height: u32,
    pub fourcc: FourCc,
}

impl PixelFormat {
    pub const fn mjpeg(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            fourcc: FourCc::Mjpeg,
        }
    }
}

impl std::fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = self.fourcc.code();
        write!(
            f,
            "{}x{} {}",
            self.width,
            self.height,
            String::from_utf8_lossy(&code)
        )
    }
}
