// Cartridge module - iNES image parsing and ROM loading
//
// An iNES image is a 16-byte header, an optional 512-byte trainer, then the
// PRG banks (16 KiB units) and CHR banks (8 KiB units). The loader validates
// the header, slices the banks, and copies them into the shared PRG/CHR ROM
// regions the buses route to. Only mapper 0 (NROM) executes; the header's
// mapper, mirroring, and TV fields are still decoded in full.

use std::fs;
use std::io;
use std::path::Path;

use crate::rom::Rom;

/// Size of the iNES header in bytes
const HEADER_SIZE: usize = 16;

/// Size of one PRG-ROM bank
const PRG_BANK_SIZE: usize = 16 * 1024;

/// Size of one CHR bank
const CHR_BANK_SIZE: usize = 8 * 1024;

/// Size of the optional trainer blob
const TRAINER_SIZE: usize = 512;

/// The iNES magic bytes: "NES" followed by MS-DOS EOF
const INES_MAGIC: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];

/// Errors produced while loading an iNES image
#[derive(Debug)]
pub enum INesError {
    /// The first four header bytes are not "NES\x1A"
    InvalidMagic,
    /// The image is shorter than its header declares
    Truncated,
    /// The image needs a mapper this core does not implement
    UnsupportedMapper(u8),
    /// I/O error while reading the image
    Io(io::Error),
}

impl std::fmt::Display for INesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            INesError::InvalidMagic => {
                write!(f, "invalid cartridge: iNES magic bytes mismatch")
            }
            INesError::Truncated => {
                write!(f, "invalid cartridge: image shorter than header declares")
            }
            INesError::UnsupportedMapper(num) => {
                write!(f, "mapper {} is not supported", num)
            }
            INesError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for INesError {}

impl From<io::Error> for INesError {
    fn from(e: io::Error) -> Self {
        INesError::Io(e)
    }
}

/// Nametable mirroring arrangement declared by the cartridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirroring {
    /// Horizontal arrangement ($2000=$2400, $2800=$2C00)
    Horizontal,
    /// Vertical arrangement ($2000=$2800, $2400=$2C00)
    Vertical,
    /// Four independent nametables on cartridge RAM
    FourScreen,
}

/// TV system declared by the cartridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TvSystem {
    Ntsc,
    Pal,
}

/// Decoded iNES header fields
#[derive(Debug, Clone, Copy)]
pub struct INesHeader {
    /// Number of 16 KiB PRG-ROM banks
    pub prg_banks: u8,
    /// Number of 8 KiB CHR banks (0 means the board carries CHR RAM)
    pub chr_banks: u8,
    /// Mapper number (low nibble from byte 6, high nibble from byte 7)
    pub mapper: u8,
    /// Nametable mirroring arrangement
    pub mirroring: Mirroring,
    /// Battery-backed PRG RAM present at $6000-$7FFF
    pub battery: bool,
    /// A 512-byte trainer precedes the PRG banks
    pub trainer: bool,
    /// Declared TV system
    pub tv_system: TvSystem,
}

impl INesHeader {
    /// Parse the 16-byte iNES header
    ///
    /// # Errors
    /// `INesError::InvalidMagic` if the magic bytes mismatch,
    /// `INesError::Truncated` if fewer than 16 bytes are given.
    pub fn parse(bytes: &[u8]) -> Result<Self, INesError> {
        if bytes.len() < HEADER_SIZE {
            return Err(INesError::Truncated);
        }
        if bytes[0..4] != INES_MAGIC {
            return Err(INesError::InvalidMagic);
        }

        let flags6 = bytes[6];
        let flags7 = bytes[7];
        let flags9 = bytes[9];

        let mirroring = if flags6 & 0x08 != 0 {
            Mirroring::FourScreen
        } else if flags6 & 0x01 != 0 {
            Mirroring::Vertical
        } else {
            Mirroring::Horizontal
        };

        Ok(INesHeader {
            prg_banks: bytes[4],
            chr_banks: bytes[5],
            mapper: (flags7 & 0xF0) | (flags6 >> 4),
            mirroring,
            battery: flags6 & 0x02 != 0,
            trainer: flags6 & 0x04 != 0,
            tv_system: if flags9 & 0x01 != 0 {
                TvSystem::Pal
            } else {
                TvSystem::Ntsc
            },
        })
    }
}

/// A parsed cartridge image
///
/// Holds the sliced PRG and CHR bytes; `load_into` copies them into the
/// machine's shared ROM regions.
pub struct Cartridge {
    /// Decoded header fields
    pub header: INesHeader,
    prg: Vec<u8>,
    chr: Vec<u8>,
}

impl Cartridge {
    /// Parse an iNES image from memory
    ///
    /// # Errors
    /// Fails on bad magic, truncated bank data, or a mapper other than 0.
    pub fn from_ines_bytes(bytes: &[u8]) -> Result<Self, INesError> {
        let header = INesHeader::parse(bytes)?;

        if header.mapper != 0 {
            return Err(INesError::UnsupportedMapper(header.mapper));
        }

        let prg_len = header.prg_banks as usize * PRG_BANK_SIZE;
        let chr_len = header.chr_banks as usize * CHR_BANK_SIZE;

        let mut offset = HEADER_SIZE;
        if header.trainer {
            offset += TRAINER_SIZE;
        }

        if bytes.len() < offset + prg_len + chr_len {
            return Err(INesError::Truncated);
        }

        let prg = bytes[offset..offset + prg_len].to_vec();
        offset += prg_len;

        // CHR banks = 0 means the board carries 8 KiB of CHR RAM instead
        let chr = if chr_len > 0 {
            bytes[offset..offset + chr_len].to_vec()
        } else {
            vec![0x00; CHR_BANK_SIZE]
        };

        log::info!(
            "loaded iNES image: {} KiB PRG, {} KiB CHR, mapper {}, {:?} mirroring",
            prg.len() / 1024,
            chr.len() / 1024,
            header.mapper,
            header.mirroring
        );

        Ok(Cartridge { header, prg, chr })
    }

    /// Parse an iNES image from a file
    ///
    /// # Errors
    /// As `from_ines_bytes`, plus I/O errors reading the file.
    pub fn from_ines_file<P: AsRef<Path>>(path: P) -> Result<Self, INesError> {
        let bytes = fs::read(path)?;
        Self::from_ines_bytes(&bytes)
    }

    /// PRG-ROM bytes
    pub fn prg(&self) -> &[u8] {
        &self.prg
    }

    /// CHR bytes (ROM, or blank RAM when the header declared none)
    pub fn chr(&self) -> &[u8] {
        &self.chr
    }

    /// Copy the image into the machine's shared ROM regions
    ///
    /// PRG lands at the PRG region's base ($8000); CHR at the CHR region's
    /// base ($0000). The caller resets the buses afterwards so routing
    /// reflects the resized windows.
    pub fn load_into(&self, prg_rom: &mut Rom, chr_rom: &mut Rom) {
        prg_rom.load(&self.prg);
        chr_rom.load(&self.chr);
    }
}
