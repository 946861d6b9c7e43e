//! FlyMovieFormat (`.fmf`) access.
//!
//! An FMF file is a small little-endian header followed by fixed-size chunks,
//! one per frame. Each chunk is an `f64` capture timestamp followed by the raw
//! image bytes. Version 1 files are always `MONO8`; version 3 files name their
//! pixel format and bit depth in the header.

use super::TimestampSource;
use crate::error::{Result, SummaryError};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

const TIMESTAMP_LEN: u64 = 8;
const WRITER_FORMAT: &str = "MONO8";

#[derive(Debug)]
pub struct FmfReader {
    path: PathBuf,
    file: BufReader<File>,
    pub version: u32,
    pub format: String,
    pub bits_per_pixel: u32,
    pub height: u32,
    pub width: u32,
    bytes_per_chunk: u64,
    chunk_start: u64,
    frame_count: u64,
}

impl FmfReader {
    pub fn open(path: &Path) -> Result<Self> {
        let file =
            File::open(path).map_err(|_| SummaryError::VideoNotFound(path.to_path_buf()))?;
        let file_len = file.metadata()?.len();
        let mut file = BufReader::new(file);

        let version = read_u32(&mut file)?;
        let (format, bits_per_pixel) = match version {
            1 => (WRITER_FORMAT.to_owned(), 8),
            3 => {
                let format_len = read_u32(&mut file)? as u64;
                if format_len > file_len {
                    return Err(SummaryError::VideoDecode(format!(
                        "pixel format length {format_len} exceeds file size {file_len}"
                    )));
                }
                let mut format = vec![0u8; format_len as usize];
                file.read_exact(&mut format).map_err(truncated)?;
                let format = String::from_utf8(format).map_err(|_| {
                    SummaryError::VideoDecode("pixel format is not valid utf-8".to_owned())
                })?;
                (format, read_u32(&mut file)?)
            }
            v => {
                return Err(SummaryError::VideoDecode(format!(
                    "unsupported FMF version {v}"
                )))
            }
        };
        let height = read_u32(&mut file)?;
        let width = read_u32(&mut file)?;
        let bytes_per_chunk = read_u64(&mut file)?;
        let max_n_frames = read_u64(&mut file)?;
        let chunk_start = file.stream_position()?;

        let expected_chunk = (height as u64)
            .checked_mul(width as u64)
            .and_then(|pixels| pixels.checked_mul(bits_per_pixel as u64))
            .map(|bits| bits / 8)
            .and_then(|bytes_per_image| bytes_per_image.checked_add(TIMESTAMP_LEN))
            .ok_or_else(|| {
                SummaryError::VideoDecode(format!(
                    "frame geometry {width}x{height} at {bits_per_pixel} bits overflows"
                ))
            })?;
        if bytes_per_chunk != expected_chunk {
            return Err(SummaryError::VideoDecode(format!(
                "chunk size {bytes_per_chunk} does not match {width}x{height} {format} frames"
            )));
        }

        // Unfinished recordings leave max_n_frames at zero. Trailing partial
        // chunks are never counted.
        let available = file_len.saturating_sub(chunk_start) / bytes_per_chunk;
        let frame_count = match max_n_frames {
            0 => available,
            n => n.min(available),
        };

        log::debug!(
            "Opened {} (FMF v{version}, {width}x{height} {format}, {frame_count} frames)",
            path.display()
        );
        Ok(Self {
            path: path.to_path_buf(),
            file,
            version,
            format,
            bits_per_pixel,
            height,
            width,
            bytes_per_chunk,
            chunk_start,
            frame_count,
        })
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    fn read_timestamp(&mut self, frame_number: u64) -> Result<f64> {
        let offset = self.chunk_start + frame_number * self.bytes_per_chunk;
        self.file.seek(SeekFrom::Start(offset))?;
        let mut buf = [0u8; TIMESTAMP_LEN as usize];
        self.file.read_exact(&mut buf).map_err(truncated)?;
        Ok(f64::from_le_bytes(buf))
    }
}

impl TimestampSource for FmfReader {
    fn timestamps(&mut self) -> Result<Vec<f64>> {
        let timestamps = (0..self.frame_count)
            .map(|frame_number| self.read_timestamp(frame_number))
            .collect::<Result<Vec<_>>>()?;
        log::debug!(
            "Read {} timestamps from {}",
            timestamps.len(),
            self.path.display()
        );
        Ok(timestamps)
    }
}

/// Writes `MONO8` movies in FMF version 3.
pub struct FmfWriter {
    file: BufWriter<File>,
    width: u32,
    height: u32,
    frame_count_offset: u64,
    frame_count: u64,
}

impl FmfWriter {
    pub fn create(path: &Path, width: u32, height: u32) -> Result<Self> {
        let mut file = BufWriter::new(File::create(path)?);
        let bytes_per_chunk = TIMESTAMP_LEN + width as u64 * height as u64;
        file.write_all(&3u32.to_le_bytes())?;
        file.write_all(&(WRITER_FORMAT.len() as u32).to_le_bytes())?;
        file.write_all(WRITER_FORMAT.as_bytes())?;
        file.write_all(&8u32.to_le_bytes())?;
        file.write_all(&height.to_le_bytes())?;
        file.write_all(&width.to_le_bytes())?;
        file.write_all(&bytes_per_chunk.to_le_bytes())?;
        let frame_count_offset = file.stream_position()?;
        file.write_all(&0u64.to_le_bytes())?;
        Ok(Self {
            file,
            width,
            height,
            frame_count_offset,
            frame_count: 0,
        })
    }

    pub fn write_frame(&mut self, image: &[u8], timestamp: f64) -> Result<()> {
        let expected = self.width as usize * self.height as usize;
        if image.len() != expected {
            return Err(SummaryError::VideoDecode(format!(
                "frame has {} bytes, expected {expected}",
                image.len()
            )));
        }
        self.file.write_all(&timestamp.to_le_bytes())?;
        self.file.write_all(image)?;
        self.frame_count += 1;
        Ok(())
    }

    /// Records the final frame count in the header.
    pub fn finish(mut self) -> Result<()> {
        self.file.seek(SeekFrom::Start(self.frame_count_offset))?;
        self.file.write_all(&self.frame_count.to_le_bytes())?;
        self.file.flush()?;
        Ok(())
    }
}

fn truncated(e: std::io::Error) -> SummaryError {
    SummaryError::VideoDecode(format!("truncated FMF file: {e}"))
}

fn read_u32(reader: &mut impl Read) -> Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf).map_err(truncated)?;
    Ok(u32::from_le_bytes(buf))
}

fn read_u64(reader: &mut impl Read) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf).map_err(truncated)?;
    Ok(u64::from_le_bytes(buf))
}
