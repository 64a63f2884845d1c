//! CLI command implementations

pub mod deltae;
pub mod feather;
pub mod fill;
pub mod line;
pub mod patch;
pub mod simulate;

use anyhow::{bail, Context, Result};
use kmsim_core::{LabelImage, SrgbImage};
use std::path::Path;

/// Load an sRGB image with a path-bearing error.
pub fn load_srgb(path: &Path) -> Result<SrgbImage> {
    kmsim_io::load_srgb(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Load a single-channel label image with a path-bearing error.
pub fn load_label(path: &Path) -> Result<LabelImage> {
    kmsim_io::load_label(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save an sRGB image with a path-bearing error.
pub fn save_srgb(path: &Path, image: &SrgbImage) -> Result<()> {
    kmsim_io::save_srgb(image, path).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Save a label image with a path-bearing error.
pub fn save_label(path: &Path, image: &LabelImage) -> Result<()> {
    kmsim_io::save_label(image, path).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse an "X,Y" point argument.
pub fn parse_point(s: &str) -> Result<(u32, u32)> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 2 {
        bail!("Expected X,Y but got '{s}'");
    }
    let x = parts[0].trim().parse().with_context(|| format!("Bad X in '{s}'"))?;
    let y = parts[1].trim().parse().with_context(|| format!("Bad Y in '{s}'"))?;
    Ok((x, y))
}

/// Parse an "R,G,B" byte-triple argument.
pub fn parse_rgb(s: &str) -> Result<[u8; 3]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        bail!("Expected R,G,B but got '{s}'");
    }
    let mut rgb = [0u8; 3];
    for (i, part) in parts.iter().enumerate() {
        rgb[i] = part
            .trim()
            .parse()
            .with_context(|| format!("Bad channel value in '{s}'"))?;
    }
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("144,269").unwrap(), (144, 269));
        assert_eq!(parse_point(" 3 , 7 ").unwrap(), (3, 7));
        assert!(parse_point("144").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn test_parse_rgb() {
        assert_eq!(parse_rgb("120,40,60").unwrap(), [120, 40, 60]);
        assert!(parse_rgb("120,40").is_err());
        assert!(parse_rgb("120,40,300").is_err());
    }
}
