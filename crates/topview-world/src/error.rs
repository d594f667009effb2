use std::path::PathBuf;

#[derive(Debug)]
pub enum WorldError {
    MissingRegion(PathBuf),
    Io(PathBuf, std::io::Error),
    Region(PathBuf, fastanvil::Error),
    Decode {
        cx: usize,
        cz: usize,
        source: DecodeError,
    },
}

/// Why a chunk payload could not be turned into blocks.
#[derive(Debug)]
pub enum DecodeError {
    Nbt(fastnbt::error::Error),
    ShortBlockStates {
        longs: usize,
        needed: usize,
        bits: usize,
    },
    Invalid(&'static str),
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorldError::MissingRegion(path) => {
                write!(f, "region file not found: {}", path.display())
            }
            WorldError::Io(path, e) => write!(f, "cannot read {}: {}", path.display(), e),
            WorldError::Region(path, e) => {
                write!(f, "unreadable region {}: {}", path.display(), e)
            }
            WorldError::Decode { cx, cz, source } => {
                write!(f, "corrupt chunk ({}, {}): {}", cx, cz, source)
            }
        }
    }
}

impl std::error::Error for WorldError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WorldError::Io(_, e) => Some(e),
            WorldError::Region(_, e) => Some(e),
            WorldError::Decode { source, .. } => Some(source),
            WorldError::MissingRegion(_) => None,
        }
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Nbt(e) => write!(f, "bad chunk nbt: {}", e),
            DecodeError::ShortBlockStates { longs, needed, bits } => write!(
                f,
                "block states too short: {} longs, need {} for {} bits",
                longs, needed, bits
            ),
            DecodeError::Invalid(reason) => f.write_str(reason),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Nbt(e) => Some(e),
            _ => None,
        }
    }
}
