//! Output formats and their options
//!
//! Each format carries its own option struct. Adding a format means adding a
//! variant to [`ExportFormat`] and implementing [`FormatOptions`] for its
//! options.

use super::errors::StrataError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Capability shared by every format's option set
pub trait FormatOptions {
    /// File extension without the leading dot
    fn extension(&self) -> &'static str;

    /// Checks the option values
    fn validate(&self) -> Result<(), String>;

    /// One-line human readable description
    fn describe(&self) -> String;
}

/// PNG options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PngOptions {
    /// 8 (indexed) or 24 (truecolor)
    pub bit_depth: u8,
    /// Keep the alpha channel
    pub transparency: bool,
    /// Adam7 interlacing
    pub interlaced: bool,
}

impl Default for PngOptions {
    fn default() -> Self {
        Self {
            bit_depth: 24,
            transparency: true,
            interlaced: false,
        }
    }
}

impl FormatOptions for PngOptions {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn validate(&self) -> Result<(), String> {
        if ![8, 24].contains(&self.bit_depth) {
            return Err(format!(
                "format.bit_depth {} is not valid for PNG. Must be 8 or 24",
                self.bit_depth
            ));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "PNG-{}{}{}",
            self.bit_depth,
            if self.transparency { ", transparent" } else { "" },
            if self.interlaced { ", interlaced" } else { "" }
        )
    }
}

/// JPEG options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JpegOptions {
    /// Encoder quality, 1-100
    pub quality: u8,
    /// Progressive scan order
    pub progressive: bool,
}

impl Default for JpegOptions {
    fn default() -> Self {
        Self {
            quality: 90,
            progressive: false,
        }
    }
}

impl FormatOptions for JpegOptions {
    fn extension(&self) -> &'static str {
        "jpg"
    }

    fn validate(&self) -> Result<(), String> {
        if self.quality == 0 || self.quality > 100 {
            return Err(format!(
                "format.quality {} is out of range. Must be between 1 and 100",
                self.quality
            ));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "JPEG quality {}{}",
            self.quality,
            if self.progressive { ", progressive" } else { "" }
        )
    }
}

/// Targa options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargaOptions {
    /// 16, 24 or 32 (32 keeps alpha)
    pub bit_depth: u8,
    /// Run-length encoding
    pub rle_compression: bool,
}

impl Default for TargaOptions {
    fn default() -> Self {
        Self {
            bit_depth: 32,
            rle_compression: true,
        }
    }
}

impl FormatOptions for TargaOptions {
    fn extension(&self) -> &'static str {
        "tga"
    }

    fn validate(&self) -> Result<(), String> {
        if ![16, 24, 32].contains(&self.bit_depth) {
            return Err(format!(
                "format.bit_depth {} is not valid for Targa. Must be 16, 24 or 32",
                self.bit_depth
            ));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "Targa {}-bit{}",
            self.bit_depth,
            if self.rle_compression { ", RLE" } else { "" }
        )
    }
}

/// BMP options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BmpOptions {
    /// 1, 4, 8, 16, 24 or 32
    pub bit_depth: u8,
    /// Run-length encoding (4 and 8 bit only)
    pub rle_compression: bool,
    /// Store rows top-down instead of bottom-up
    pub flip_row_order: bool,
}

impl Default for BmpOptions {
    fn default() -> Self {
        Self {
            bit_depth: 24,
            rle_compression: false,
            flip_row_order: false,
        }
    }
}

impl FormatOptions for BmpOptions {
    fn extension(&self) -> &'static str {
        "bmp"
    }

    fn validate(&self) -> Result<(), String> {
        if ![1, 4, 8, 16, 24, 32].contains(&self.bit_depth) {
            return Err(format!(
                "format.bit_depth {} is not valid for BMP. Must be one of 1, 4, 8, 16, 24, 32",
                self.bit_depth
            ));
        }
        if self.rle_compression && ![4, 8].contains(&self.bit_depth) {
            return Err("BMP RLE compression requires a bit_depth of 4 or 8".to_string());
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "BMP {}-bit{}{}",
            self.bit_depth,
            if self.rle_compression { ", RLE" } else { "" },
            if self.flip_row_order { ", top-down" } else { "" }
        )
    }
}

/// TIFF compression schemes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TiffCompression {
    /// Uncompressed
    None,
    /// LZW
    #[default]
    Lzw,
    /// Deflate
    Zip,
    /// Lossy JPEG
    Jpeg,
}

/// TIFF options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiffOptions {
    /// Compression scheme
    pub compression: TiffCompression,
    /// Keep the alpha channel
    pub transparency: bool,
}

impl Default for TiffOptions {
    fn default() -> Self {
        Self {
            compression: TiffCompression::default(),
            transparency: true,
        }
    }
}

impl FormatOptions for TiffOptions {
    fn extension(&self) -> &'static str {
        "tif"
    }

    fn validate(&self) -> Result<(), String> {
        if self.compression == TiffCompression::Jpeg && self.transparency {
            return Err("TIFF JPEG compression cannot keep transparency".to_string());
        }
        Ok(())
    }

    fn describe(&self) -> String {
        format!(
            "TIFF {:?} compression{}",
            self.compression,
            if self.transparency { ", transparent" } else { "" }
        )
    }
}

/// Output format selection with its options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ExportFormat {
    /// Portable Network Graphics
    Png(PngOptions),
    /// JPEG
    Jpeg(JpegOptions),
    /// Truevision Targa
    Targa(TargaOptions),
    /// Windows bitmap
    Bmp(BmpOptions),
    /// Tagged Image File Format
    Tiff(TiffOptions),
}

impl ExportFormat {
    fn options(&self) -> &dyn FormatOptions {
        match self {
            ExportFormat::Png(o) => o,
            ExportFormat::Jpeg(o) => o,
            ExportFormat::Targa(o) => o,
            ExportFormat::Bmp(o) => o,
            ExportFormat::Tiff(o) => o,
        }
    }

    /// Format name as used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            ExportFormat::Png(_) => "png",
            ExportFormat::Jpeg(_) => "jpeg",
            ExportFormat::Targa(_) => "targa",
            ExportFormat::Bmp(_) => "bmp",
            ExportFormat::Tiff(_) => "tiff",
        }
    }

    /// Whether a file with extension `ext` already holds data in this format
    pub fn accepts_extension(&self, ext: &str) -> bool {
        let ext = ext.to_ascii_lowercase();
        match self {
            ExportFormat::Png(_) => ext == "png",
            ExportFormat::Jpeg(_) => ext == "jpg" || ext == "jpeg",
            ExportFormat::Targa(_) => ext == "tga",
            ExportFormat::Bmp(_) => ext == "bmp",
            ExportFormat::Tiff(_) => ext == "tif" || ext == "tiff",
        }
    }
}

impl Default for ExportFormat {
    fn default() -> Self {
        ExportFormat::Png(PngOptions::default())
    }
}

impl FormatOptions for ExportFormat {
    fn extension(&self) -> &'static str {
        self.options().extension()
    }

    fn validate(&self) -> Result<(), String> {
        self.options().validate()
    }

    fn describe(&self) -> String {
        self.options().describe()
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl FromStr for ExportFormat {
    type Err = StrataError;

    /// Parses a format name into that format with default options
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "png" => Ok(Self::Png(PngOptions::default())),
            "png8" | "png-8" => Ok(Self::Png(PngOptions {
                bit_depth: 8,
                ..PngOptions::default()
            })),
            "jpg" | "jpeg" => Ok(Self::Jpeg(JpegOptions::default())),
            "tga" | "targa" => Ok(Self::Targa(TargaOptions::default())),
            "bmp" => Ok(Self::Bmp(BmpOptions::default())),
            "tif" | "tiff" => Ok(Self::Tiff(TiffOptions::default())),
            _ => Err(StrataError::Configuration(format!(
                "Invalid format: {s}. Expected one of png, png8, jpeg, targa, bmp, tiff"
            ))),
        }
    }
}
